use std::sync::{Mutex, MutexGuard};

use tauri::AppHandle;
use tauri_plugin_store::StoreExt;
use tracing::warn;

use crate::backend::BackendClient;
use crate::error::BeleggingsMatchError;
use crate::session::{SessionSnapshot, SessionState};

pub mod config;
pub mod lead;
pub mod matching;
pub mod report;
pub mod session;
pub mod text;

/// Store file holding the persisted session: the two named records
/// `userPreferences` and `matchResults`.
const SESSION_STORE: &str = "session.json";
const KEY_PREFERENCES: &str = "userPreferences";
const KEY_MATCHES: &str = "matchResults";

/// Build a backend client against the configured base URL.
pub(crate) fn backend_client(app: &AppHandle) -> Result<BackendClient, String> {
    let base_url = config::api_base_url(app);
    BackendClient::new(&base_url).map_err(String::from)
}

pub(crate) fn lock_session(
    state: &Mutex<SessionState>,
) -> Result<MutexGuard<'_, SessionState>, String> {
    state
        .lock()
        .map_err(|_| "Session state lock poisoned".to_string())
}

/// Write the current session through to disk so it survives an app
/// restart. An empty session clears both records.
pub(crate) fn persist_session(app: &AppHandle, session: &SessionState) -> Result<(), String> {
    let store = app
        .store(SESSION_STORE)
        .map_err(|e| BeleggingsMatchError::Store(e.to_string()))?;

    match session.snapshot() {
        Some(snapshot) => {
            let preferences = serde_json::to_value(&snapshot.preferences)
                .map_err(|e| BeleggingsMatchError::Store(e.to_string()))?;
            let matches = serde_json::to_value(&snapshot.matches)
                .map_err(|e| BeleggingsMatchError::Store(e.to_string()))?;
            store.set(KEY_PREFERENCES, preferences);
            store.set(KEY_MATCHES, matches);
        }
        None => {
            store.delete(KEY_PREFERENCES);
            store.delete(KEY_MATCHES);
        }
    }

    store
        .save()
        .map_err(|e| BeleggingsMatchError::Store(e.to_string()))
        .map_err(String::from)
}

/// Read a persisted session back, if one exists. Used once at startup.
pub(crate) fn restore_session(app: &AppHandle) -> Option<SessionSnapshot> {
    let store = match app.store(SESSION_STORE) {
        Ok(store) => store,
        Err(e) => {
            warn!("Failed to open session store: {}", e);
            return None;
        }
    };

    let preferences = store
        .get(KEY_PREFERENCES)
        .and_then(|v| serde_json::from_value(v).ok())?;
    let matches = store
        .get(KEY_MATCHES)
        .and_then(|v| serde_json::from_value(v).ok())
        .unwrap_or_default();

    Some(SessionSnapshot {
        preferences,
        matches,
    })
}
