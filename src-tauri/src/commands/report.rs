use serde::Serialize;
use tauri::AppHandle;
use tracing::{info, warn};

use crate::backend::types::{Insights, MatchResult, PreferenceRecord, ReportRequest};
use crate::error::BeleggingsMatchError;
use crate::session::TOP_MATCH_COUNT;

/// Result of report generation: inline HTML/text content, a download
/// URL, or both.
#[derive(Debug, Clone, Serialize)]
pub struct ReportOutcome {
    pub content: Option<String>,
    pub url: Option<String>,
    pub generated_at: String,
}

/// Fetch the supplementary narrative for the current matches.
#[tauri::command]
pub async fn generate_insights(
    app: AppHandle,
    preferences: PreferenceRecord,
    matches: Vec<MatchResult>,
) -> Result<Insights, String> {
    info!("generate_insights called for {} matches", matches.len());

    let client = super::backend_client(&app)?;
    let response = client.generate_insights(&preferences, &matches).await?;

    if !response.success {
        return Err(response
            .error
            .unwrap_or_else(|| "Inzichten konden niet worden gegenereerd".to_string()));
    }
    response
        .insights
        .ok_or_else(|| "Geen inzichten in antwoord".to_string())
}

/// Generate the personalized report for the top matches.
///
/// Two best-effort enrichment steps precede the actual call: a longer
/// provider profile per match, and a narrative analysis. Either may fail
/// without blocking the report itself.
#[tauri::command]
pub async fn generate_report(
    app: AppHandle,
    preferences: PreferenceRecord,
    matches: Vec<MatchResult>,
) -> Result<ReportOutcome, String> {
    info!("generate_report called for {} matches", matches.len());

    let client = super::backend_client(&app)?;
    let mut report_matches: Vec<MatchResult> =
        matches.into_iter().take(TOP_MATCH_COUNT).collect();

    for entry in report_matches.iter_mut() {
        match client.provider_profile(&entry.id).await {
            Ok(profile) if !profile.description.trim().is_empty() => {
                entry.description = profile.description;
            }
            Ok(_) => {}
            Err(e) => {
                warn!(
                    "Skipping profile enrichment for '{}': {}",
                    entry.id,
                    String::from(e)
                );
            }
        }
    }

    let claude_analysis = match client.generate_insights(&preferences, &report_matches).await {
        Ok(response) => response
            .insights
            .map(|i| {
                format!(
                    "{}\n\n{}\n\n{}",
                    i.key_insight, i.trade_offs, i.priority_analysis
                )
            })
            .unwrap_or_default(),
        Err(e) => {
            warn!("Report analysis unavailable: {}", String::from(e));
            String::new()
        }
    };

    let request = ReportRequest {
        user_data: preferences,
        matches: report_matches,
        claude_analysis,
    };
    let response = client.generate_report(&request).await?;

    if !response.success {
        let message = response
            .error
            .unwrap_or_else(|| "Rapportgeneratie mislukt".to_string());
        return Err(BeleggingsMatchError::Report(message).into());
    }

    Ok(ReportOutcome {
        content: response.report_content,
        url: response.report_url,
        generated_at: response.generated_at.unwrap_or_else(|| {
            chrono::Local::now().format("%d-%m-%Y %H:%M").to_string()
        }),
    })
}
