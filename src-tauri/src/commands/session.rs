use std::sync::Mutex;

use tauri::{AppHandle, State};
use tracing::info;

use crate::backend::types::{MatchResult, PreferenceRecord};
use crate::session::{SessionSnapshot, SessionState};

/// Store a completed wizard session: the frozen preference record plus
/// the match list that was shown (live results or the fallback set).
#[tauri::command]
pub fn save_session(
    app: AppHandle,
    state: State<'_, Mutex<SessionState>>,
    preferences: PreferenceRecord,
    matches: Vec<MatchResult>,
) -> Result<(), String> {
    info!(
        "save_session: {} answers, {} matches",
        preferences.len(),
        matches.len()
    );
    let mut session = super::lock_session(&state)?;
    session.store_results(preferences, matches);
    super::persist_session(&app, &session)
}

/// Hand the current session to the frontend, or None when the user lands
/// on a results-dependent view without one.
#[tauri::command]
pub fn load_session(state: State<'_, Mutex<SessionState>>) -> Result<Option<SessionSnapshot>, String> {
    let session = super::lock_session(&state)?;
    Ok(session.snapshot())
}

/// Drop the session. Called when a new wizard run starts.
#[tauri::command]
pub fn clear_session(
    app: AppHandle,
    state: State<'_, Mutex<SessionState>>,
) -> Result<(), String> {
    info!("clear_session");
    let mut session = super::lock_session(&state)?;
    session.clear();
    super::persist_session(&app, &session)
}
