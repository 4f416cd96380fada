use crate::types::Note;

/// A normalized search term: trimmed and lowercased once up front.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchQuery {
    term: String,
}

impl SearchQuery {
    pub fn new(raw: &str) -> Self {
        Self {
            term: raw.trim().to_lowercase(),
        }
    }

    /// An empty query matches everything.
    pub fn is_empty(&self) -> bool {
        self.term.is_empty()
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn matches_str(&self, s: &str) -> bool {
        s.to_lowercase().contains(&self.term)
    }
}

pub trait MatchSearchQuery {
    fn matches_query(&self, query: &SearchQuery) -> bool;
}

impl MatchSearchQuery for Note {
    /// Title or author nickname contains the term. Missing fields never match
    /// a non-empty term; the display defaults are not searched.
    fn matches_query(&self, query: &SearchQuery) -> bool {
        query.is_empty()
            || self.title.as_deref().is_some_and(|t| query.matches_str(t))
            || self
                .user_nickname
                .as_deref()
                .is_some_and(|n| query.matches_str(n))
    }
}

/// Indices of the notes in `dataset` matching `query`, ascending.
pub fn filter_indices(dataset: &[Note], query: &SearchQuery) -> Vec<usize> {
    if query.is_empty() {
        return (0..dataset.len()).collect();
    }
    dataset
        .iter()
        .enumerate()
        .filter(|(_, note)| note.matches_query(query))
        .map(|(i, _)| i)
        .collect()
}
