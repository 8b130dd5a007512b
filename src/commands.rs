use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["window", "__TAURI__", "core"], catch)]
    async fn invoke(cmd: &str, args: JsValue) -> Result<JsValue, JsValue>;
}

/// Flattened questionnaire answers, keyed by question id. Key order is
/// the question order (`serde_json` is built with `preserve_order`).
pub type PreferenceRecord = serde_json::Map<String, serde_json::Value>;

// -- Match types matching backend structs --

/// One ranked provider returned by the matching service.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MatchResult {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub logo: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    /// 0-100, higher is better
    #[serde(rename = "matchScore")]
    pub match_score: u8,
    /// Star rating, 0-5
    #[serde(default)]
    pub rating: u8,
    #[serde(default)]
    pub details: MatchDetails,
}

/// Per-provider detail bag; `tco` is the cost proxy used for
/// cost-vs-quality trade-off questions.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct MatchDetails {
    #[serde(default)]
    pub minimum_bedrag: Option<i64>,
    #[serde(default)]
    pub tco: Option<f64>,
    #[serde(default)]
    pub sterren_score: Option<u8>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Result of the primary matching call.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchOutcome {
    pub matches: Vec<MatchResult>,
    pub total_found: usize,
}

/// Result of a recalculation round.
#[derive(Debug, Clone, Deserialize)]
pub struct RecalculateOutcome {
    pub matches: Vec<MatchResult>,
    pub restart: bool,
    pub modified_preferences: Option<PreferenceRecord>,
    pub total_found: usize,
}

/// Result of a free-text refinement round. Non-empty `clarifications`
/// means nothing was applied yet and a second round-trip is required.
#[derive(Debug, Clone, Deserialize)]
pub struct TextOutcome {
    pub clarifications: Vec<String>,
    pub reasoning: String,
    pub matches: Option<Vec<MatchResult>>,
    pub updated_preferences: Option<PreferenceRecord>,
    pub preferences_changed: bool,
}

/// Result of answering one clarification.
#[derive(Debug, Clone, Deserialize)]
pub struct ClarificationOutcome {
    pub matches: Vec<MatchResult>,
    pub applied_filter: Option<String>,
    pub filter_active: bool,
}

/// Supplementary narrative block for the results page.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Insights {
    #[serde(default)]
    pub key_insight: String,
    #[serde(default)]
    pub trade_offs: String,
    #[serde(default)]
    pub priority_analysis: String,
}

/// Result of report generation.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportOutcome {
    pub content: Option<String>,
    pub url: Option<String>,
    pub generated_at: String,
}

/// A stored session: frozen preferences plus the latest match list.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionSnapshot {
    pub preferences: PreferenceRecord,
    pub matches: Vec<MatchResult>,
}

// -- Arg structs for serialization --

#[derive(Serialize)]
struct GetPreferenceArgs {
    key: String,
}

#[derive(Serialize)]
struct SetPreferenceArgs {
    key: String,
    value: String,
}

#[derive(Serialize)]
struct SaveSessionArgs {
    preferences: PreferenceRecord,
    matches: Vec<MatchResult>,
}

#[derive(Serialize)]
struct MatchServicesArgs {
    preferences: PreferenceRecord,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RecalculateArgs {
    original_preferences: PreferenceRecord,
    impacts: Vec<serde_json::Value>,
}

#[derive(Serialize)]
struct ProcessTextArgs {
    text: String,
    preferences: PreferenceRecord,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProcessClarificationArgs {
    clarification_id: String,
    selected_option: serde_json::Value,
    preferences: PreferenceRecord,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SubmitLeadArgs {
    email: String,
    name: String,
    interest_in_guidance: bool,
    preferences: PreferenceRecord,
}

#[derive(Serialize)]
struct ReportArgs {
    preferences: PreferenceRecord,
    matches: Vec<MatchResult>,
}

// -- Typed invoke helpers --

fn to_args<T: Serialize>(args: &T) -> Result<JsValue, String> {
    serde_wasm_bindgen::to_value(args).map_err(|e| e.to_string())
}

fn err_to_string(e: JsValue) -> String {
    e.as_string().unwrap_or_else(|| "Unknown error".to_string())
}

pub async fn get_preference(key: &str) -> Result<Option<String>, String> {
    let args = to_args(&GetPreferenceArgs {
        key: key.to_string(),
    })?;

    let result = invoke("get_preference", args).await.map_err(err_to_string)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

pub async fn set_preference(key: &str, value: &str) -> Result<(), String> {
    let args = to_args(&SetPreferenceArgs {
        key: key.to_string(),
        value: value.to_string(),
    })?;

    invoke("set_preference", args)
        .await
        .map(|_| ())
        .map_err(err_to_string)
}

// -- Session commands --

/// Store a completed session (preferences frozen, match list replaced).
pub async fn save_session(
    preferences: PreferenceRecord,
    matches: Vec<MatchResult>,
) -> Result<(), String> {
    let args = to_args(&SaveSessionArgs {
        preferences,
        matches,
    })?;

    invoke("save_session", args)
        .await
        .map(|_| ())
        .map_err(err_to_string)
}

/// Load the current session, or None when no wizard run completed yet.
pub async fn load_session() -> Result<Option<SessionSnapshot>, String> {
    let args = to_args(&serde_json::json!({}))?;

    let result = invoke("load_session", args).await.map_err(err_to_string)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

/// Discard the session. Called when a new wizard run starts.
pub async fn clear_session() -> Result<(), String> {
    let args = to_args(&serde_json::json!({}))?;

    invoke("clear_session", args)
        .await
        .map(|_| ())
        .map_err(err_to_string)
}

// -- Matching and refinement commands --

/// Submit the complete preference record for matching.
/// Errors cover transport failures, bad statuses and malformed bodies
/// alike; the wizard answers all of them with the fallback list.
pub async fn match_services(preferences: PreferenceRecord) -> Result<MatchOutcome, String> {
    let args = to_args(&MatchServicesArgs { preferences })?;

    let result = invoke("match_services", args).await.map_err(err_to_string)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| format!("Failed to parse response: {}", e))
}

/// Recalculate with the merged impact objects from the follow-up round.
pub async fn recalculate_matches(
    original_preferences: PreferenceRecord,
    impacts: Vec<serde_json::Value>,
) -> Result<RecalculateOutcome, String> {
    let args = to_args(&RecalculateArgs {
        original_preferences,
        impacts,
    })?;

    let result = invoke("recalculate_matches", args)
        .await
        .map_err(err_to_string)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| format!("Failed to parse response: {}", e))
}

/// Free-text refinement round.
pub async fn process_text_and_match(
    text: String,
    preferences: PreferenceRecord,
) -> Result<TextOutcome, String> {
    let args = to_args(&ProcessTextArgs { text, preferences })?;

    let result = invoke("process_text_and_match", args)
        .await
        .map_err(err_to_string)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| format!("Failed to parse response: {}", e))
}

/// Second round-trip after an ambiguous free-text request.
pub async fn process_clarification(
    clarification_id: String,
    selected_option: serde_json::Value,
    preferences: PreferenceRecord,
) -> Result<ClarificationOutcome, String> {
    let args = to_args(&ProcessClarificationArgs {
        clarification_id,
        selected_option,
        preferences,
    })?;

    let result = invoke("process_clarification", args)
        .await
        .map_err(err_to_string)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| format!("Failed to parse response: {}", e))
}

// -- Lead, insights and report commands --

pub async fn submit_lead(
    email: String,
    name: String,
    interest_in_guidance: bool,
    preferences: PreferenceRecord,
) -> Result<(), String> {
    let args = to_args(&SubmitLeadArgs {
        email,
        name,
        interest_in_guidance,
        preferences,
    })?;

    invoke("submit_lead", args)
        .await
        .map(|_| ())
        .map_err(err_to_string)
}

/// Supplementary narrative; callers treat failure as "no insights".
pub async fn generate_insights(
    preferences: PreferenceRecord,
    matches: Vec<MatchResult>,
) -> Result<Insights, String> {
    let args = to_args(&ReportArgs {
        preferences,
        matches,
    })?;

    let result = invoke("generate_insights", args)
        .await
        .map_err(err_to_string)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| format!("Failed to parse response: {}", e))
}

/// Generate the personalized report for the top matches.
pub async fn generate_report(
    preferences: PreferenceRecord,
    matches: Vec<MatchResult>,
) -> Result<ReportOutcome, String> {
    let args = to_args(&ReportArgs {
        preferences,
        matches,
    })?;

    let result = invoke("generate_report", args)
        .await
        .map_err(err_to_string)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| format!("Failed to parse response: {}", e))
}
