use std::sync::Mutex;

use serde::Serialize;
use tauri::{AppHandle, State};
use tracing::info;

use crate::backend::types::{MatchResult, PreferenceRecord};
use crate::session::SessionState;

/// Result of the primary matching call.
#[derive(Debug, Clone, Serialize)]
pub struct MatchOutcome {
    pub matches: Vec<MatchResult>,
    pub total_found: usize,
}

/// Result of a recalculation round. When `restart` is set the backend
/// asked for the wizard to start over and the session has been discarded;
/// `matches` is empty in that case.
#[derive(Debug, Clone, Serialize)]
pub struct RecalculateOutcome {
    pub matches: Vec<MatchResult>,
    pub restart: bool,
    pub modified_preferences: Option<PreferenceRecord>,
    pub total_found: usize,
}

/// Submit a complete preference record to the matching backend.
///
/// Any failure (transport, status, malformed body) surfaces as Err; the
/// wizard substitutes its canned fallback list in that case, so this
/// command never invents matches of its own.
#[tauri::command]
pub async fn match_services(
    app: AppHandle,
    state: State<'_, Mutex<SessionState>>,
    preferences: PreferenceRecord,
) -> Result<MatchOutcome, String> {
    info!("match_services called with {} answers", preferences.len());

    let client = super::backend_client(&app)?;
    let response = client.match_services(&preferences).await?;
    let total_found = response.total_found.unwrap_or(response.matches.len());
    info!(
        "Matching returned {} matches ({} found in total)",
        response.matches.len(),
        total_found
    );

    {
        let mut session = super::lock_session(&state)?;
        session.store_results(preferences, response.matches.clone());
        super::persist_session(&app, &session)?;
    }

    Ok(MatchOutcome {
        matches: response.matches,
        total_found,
    })
}

/// Recalculate matches from the original preferences plus the impact
/// objects produced by the answered follow-up questions.
#[tauri::command]
pub async fn recalculate_matches(
    app: AppHandle,
    state: State<'_, Mutex<SessionState>>,
    original_preferences: PreferenceRecord,
    impacts: Vec<serde_json::Value>,
) -> Result<RecalculateOutcome, String> {
    info!("recalculate_matches called with {} impacts", impacts.len());

    let client = super::backend_client(&app)?;
    let response = client
        .recalculate_matches(&original_preferences, &impacts)
        .await?;

    if !response.success {
        return Err(response
            .error
            .unwrap_or_else(|| "Herberekening van matches mislukt".to_string()));
    }

    if response.wants_restart() {
        info!("Backend requested wizard restart, discarding session");
        let mut session = super::lock_session(&state)?;
        session.clear();
        super::persist_session(&app, &session)?;
        return Ok(RecalculateOutcome {
            matches: Vec::new(),
            restart: true,
            modified_preferences: None,
            total_found: 0,
        });
    }

    let matches = response
        .matches
        .ok_or_else(|| "Herberekening gaf geen matches terug".to_string())?;
    let total_found = response.total_found.unwrap_or(matches.len());

    {
        let mut session = super::lock_session(&state)?;
        session.replace_matches(matches.clone());
        if let Some(preferences) = response.modified_preferences.clone() {
            session.replace_preferences(preferences);
        }
        super::persist_session(&app, &session)?;
    }

    Ok(RecalculateOutcome {
        matches,
        restart: false,
        modified_preferences: response.modified_preferences,
        total_found,
    })
}
