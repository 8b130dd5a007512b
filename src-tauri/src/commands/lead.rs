use tauri::AppHandle;
use tracing::info;

use crate::backend::types::{LeadRequest, PreferenceRecord};

/// One-shot lead capture. Fire-and-forget from the flow's perspective:
/// success shows a confirmation, failure an inline error, nothing else
/// changes.
#[tauri::command]
pub async fn submit_lead(
    app: AppHandle,
    email: String,
    name: String,
    interest_in_guidance: bool,
    preferences: PreferenceRecord,
) -> Result<(), String> {
    let email = email.trim().to_string();
    if email.is_empty() {
        return Err("E-mailadres is verplicht".to_string());
    }
    info!("submit_lead called (guidance: {})", interest_in_guidance);

    let client = super::backend_client(&app)?;
    let response = client
        .submit_lead(&LeadRequest {
            email,
            name,
            interest_in_guidance,
            preferences,
        })
        .await?;

    if !response.is_success() {
        return Err(format!(
            "Lead niet geaccepteerd (status: {})",
            response.status
        ));
    }
    Ok(())
}
