#[cfg(feature = "desktop")]
pub mod commands;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod format;
pub mod loader;
pub mod render;
pub mod search;
pub mod stats;
pub mod types;

use tokio::sync::Mutex;

use crate::dashboard::Dashboard;

/// State shared across Tauri commands: the dashboard for this window session.
pub type AppMutex = Mutex<Dashboard>;

#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    use tauri::Manager;

    // Only log WARN and above in production to avoid leaking note content
    #[cfg(debug_assertions)]
    tracing_subscriber::fmt::init();
    #[cfg(not(debug_assertions))]
    tracing_subscriber::fmt().with_max_level(tracing::Level::WARN).init();
    tauri::Builder::default()
        .manage(AppMutex::new(Dashboard::default()))
        .invoke_handler(tauri::generate_handler![
            commands::load_dashboard,
            commands::search_notes,
        ])
        .setup(|app| {
            // Set the window icon explicitly so the taskbar shows our icon on Linux.
            if let Some(window) = app.get_webview_window("main") {
                if let Some(icon) = app.default_window_icon() {
                    if let Err(e) = window.set_icon(icon.clone()) {
                        tracing::warn!("Could not set window icon: {e}");
                    }
                }
            }
            Ok(())
        })
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
