use tauri::Manager;

use crate::dashboard::Dashboard;
use crate::loader::Loader;
use crate::types::DashboardView;
use crate::AppMutex;

// ─── Tauri commands ────────────────────────────────────────────────────────────

/// Called by the frontend once the page is ready: load the bundled dataset
/// and return the first full view.
///
/// A load failure is not a command error; the returned view carries the
/// message for the list region.
#[tauri::command]
pub async fn load_dashboard(
    state: tauri::State<'_, AppMutex>,
    app: tauri::AppHandle,
) -> Result<DashboardView, String> {
    let resource_dir = app.path().resource_dir().map_err(|e| e.to_string())?;
    let source = crate::config::bundled_source(Some(resource_dir.as_path()));

    // Fetch without holding the lock.
    let dashboard = Dashboard::load_or_report(&Loader::default(), &source).await;

    let mut s = state.lock().await;
    *s = dashboard;
    Ok(s.view())
}

/// Live search: refilter the dataset and return the repainted view.
#[tauri::command]
pub async fn search_notes(
    term: String,
    state: tauri::State<'_, AppMutex>,
) -> Result<DashboardView, String> {
    Ok(state.lock().await.search(&term))
}
