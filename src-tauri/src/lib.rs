use std::sync::Mutex;

pub mod backend;
mod commands;
mod error;
pub mod session;

use session::SessionState;

pub fn run() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tauri::Builder::default()
        .plugin(tauri_plugin_store::Builder::new().build())
        .manage(Mutex::new(SessionState::new()))
        .invoke_handler(tauri::generate_handler![
            commands::config::get_preference,
            commands::config::set_preference,
            commands::session::save_session,
            commands::session::load_session,
            commands::session::clear_session,
            commands::matching::match_services,
            commands::matching::recalculate_matches,
            commands::text::process_text_and_match,
            commands::text::process_clarification,
            commands::lead::submit_lead,
            commands::report::generate_insights,
            commands::report::generate_report,
        ])
        .setup(|app| {
            // Pick up a session persisted by a previous run
            use tauri::Manager;
            if let Some(snapshot) = commands::restore_session(app.handle()) {
                tracing::info!("Restoring persisted session");
                let state = app.state::<Mutex<SessionState>>();
                if let Ok(mut session) = state.lock() {
                    session.restore(snapshot);
                }
            }
            Ok(())
        })
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
