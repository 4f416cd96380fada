use crate::error::LoadError;
use crate::loader::{DataSource, Loader};
use crate::render::{render_error, render_list};
use crate::search::{filter_indices, SearchQuery};
use crate::stats::compute_stats;
use crate::types::{DashboardView, Note, Stats};

/// Owns the loaded dataset and the current working view.
///
/// The working view is kept as ascending indices into the dataset, so it is
/// always an order-preserving subsequence of it.
#[derive(Debug, Default)]
pub struct Dashboard {
    dataset: Vec<Note>,
    view: Vec<usize>,
    error: Option<LoadError>,
}

impl Dashboard {
    /// A dashboard over `dataset` with no search term active.
    pub fn loaded(dataset: Vec<Note>) -> Self {
        let view = (0..dataset.len()).collect();
        Self {
            dataset,
            view,
            error: None,
        }
    }

    /// An empty dashboard that reports `error` in its list region.
    pub fn failed(error: LoadError) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }

    /// Load `source` once and build the dashboard from it.
    pub async fn load(loader: &Loader, source: &DataSource) -> Result<Self, LoadError> {
        loader.load(source).await.map(Self::loaded)
    }

    /// Like [`Dashboard::load`], but a failure becomes a dashboard showing
    /// the error instead of being returned.
    pub async fn load_or_report(loader: &Loader, source: &DataSource) -> Self {
        Self::load(loader, source).await.unwrap_or_else(|err| {
            tracing::warn!("Dataset load failed: {err}");
            Self::failed(err)
        })
    }

    /// Recompute the working view for `term` and return the repainted view.
    pub fn search(&mut self, term: &str) -> DashboardView {
        let query = SearchQuery::new(term);
        self.view = filter_indices(&self.dataset, &query);
        tracing::debug!(
            "Search {:?} matched {} of {} notes",
            query.term(),
            self.view.len(),
            self.dataset.len()
        );
        self.view()
    }

    pub fn dataset(&self) -> &[Note] {
        &self.dataset
    }

    pub fn error(&self) -> Option<&LoadError> {
        self.error.as_ref()
    }

    /// Indices of the working view into [`Dashboard::dataset`].
    pub fn view_indices(&self) -> &[usize] {
        &self.view
    }

    pub fn working_view(&self) -> impl Iterator<Item = &Note> + '_ {
        self.view.iter().map(|&i| &self.dataset[i])
    }

    pub fn stats(&self) -> Stats {
        compute_stats(self.working_view())
    }

    /// Stats, slot text and list markup for the current working view. A
    /// failed load keeps showing its error in the list region.
    pub fn view(&self) -> DashboardView {
        let stats = self.stats();
        let list_html = match &self.error {
            Some(err) => render_error(err),
            None => render_list(self.working_view()),
        };
        DashboardView {
            stats,
            display: stats.display(),
            list_html,
            error: self.error.as_ref().map(ToString::to_string),
        }
    }
}
