use std::sync::Mutex;

use serde::Serialize;
use tauri::{AppHandle, State};
use tracing::info;

use crate::backend::types::{MatchResult, PreferenceRecord};
use crate::session::SessionState;

/// Result of a free-text refinement round.
///
/// When `clarifications` is non-empty the backend needs a second
/// round-trip before anything may change: no matches or preferences are
/// applied, and the session stays as it was.
#[derive(Debug, Clone, Serialize)]
pub struct TextOutcome {
    pub clarifications: Vec<String>,
    pub reasoning: String,
    pub matches: Option<Vec<MatchResult>>,
    pub updated_preferences: Option<PreferenceRecord>,
    pub preferences_changed: bool,
}

/// Result of answering one clarification.
#[derive(Debug, Clone, Serialize)]
pub struct ClarificationOutcome {
    pub matches: Vec<MatchResult>,
    pub applied_filter: Option<String>,
    pub filter_active: bool,
}

/// Interpret free text against the current preferences and, when the
/// interpretation is unambiguous, apply the resulting match list.
#[tauri::command]
pub async fn process_text_and_match(
    app: AppHandle,
    state: State<'_, Mutex<SessionState>>,
    text: String,
    preferences: PreferenceRecord,
) -> Result<TextOutcome, String> {
    let text = text.trim().to_string();
    if text.is_empty() {
        return Err("Geen tekst input ontvangen".to_string());
    }
    info!("process_text_and_match called ({} chars)", text.len());

    let client = super::backend_client(&app)?;
    let response = client.process_text(&text, &preferences).await?;

    if !response.success {
        return Err(response
            .error
            .unwrap_or_else(|| "Tekstverwerking mislukt".to_string()));
    }

    let analysis = response.text_analysis.unwrap_or_default();

    if !analysis.clarifications_needed.is_empty() {
        info!(
            "Text analysis needs {} clarification(s), suspending refinement",
            analysis.clarifications_needed.len()
        );
        return Ok(TextOutcome {
            clarifications: analysis.clarifications_needed,
            reasoning: analysis.reasoning,
            matches: None,
            updated_preferences: None,
            preferences_changed: false,
        });
    }

    {
        let mut session = super::lock_session(&state)?;
        if let Some(matches) = response.new_matches.clone() {
            session.replace_matches(matches);
        }
        if let Some(preferences) = response.updated_preferences.clone() {
            session.replace_preferences(preferences);
        }
        super::persist_session(&app, &session)?;
    }

    Ok(TextOutcome {
        clarifications: Vec::new(),
        reasoning: analysis.reasoning,
        matches: response.new_matches,
        updated_preferences: response.updated_preferences,
        preferences_changed: response.preferences_changed,
    })
}

/// Second round-trip: the user picked one of the fixed clarification
/// options. Only a successful response replaces the match list.
#[tauri::command]
pub async fn process_clarification(
    app: AppHandle,
    state: State<'_, Mutex<SessionState>>,
    clarification_id: String,
    selected_option: serde_json::Value,
    preferences: PreferenceRecord,
) -> Result<ClarificationOutcome, String> {
    info!("process_clarification called for '{}'", clarification_id);

    let client = super::backend_client(&app)?;
    let response = client
        .process_clarification(&clarification_id, &selected_option, &preferences)
        .await?;

    if !response.success {
        return Err(response
            .error
            .unwrap_or_else(|| "Verwerken van verduidelijking mislukt".to_string()));
    }

    let matches = response
        .matches
        .ok_or_else(|| "Verduidelijking gaf geen matches terug".to_string())?;

    {
        let mut session = super::lock_session(&state)?;
        session.replace_matches(matches.clone());
        super::persist_session(&app, &session)?;
    }

    Ok(ClarificationOutcome {
        matches,
        applied_filter: response.applied_filter,
        filter_active: response.filter_active,
    })
}
