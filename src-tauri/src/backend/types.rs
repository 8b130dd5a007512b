use serde::{Deserialize, Serialize};

/// Flattened questionnaire answers, keyed by question id.
///
/// This is exactly what crosses the wire to the matching backend: a flat
/// mapping of primitive values, no nested objects. Key order follows the
/// question order (`serde_json` is built with `preserve_order`).
pub type PreferenceRecord = serde_json::Map<String, serde_json::Value>;

/// One ranked provider returned by the matching service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
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
    /// 0-100, higher is better. Lists are sorted descending on this.
    #[serde(rename = "matchScore")]
    pub match_score: u8,
    /// Star rating, 0-5.
    #[serde(default)]
    pub rating: u8,
    #[serde(default)]
    pub details: MatchDetails,
}

/// Per-provider detail bag. Only `tco` (total cost of ownership, a yearly
/// cost fraction) is consumed client-side, for cost tie-breaking; the rest
/// is carried along for the report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
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

/// Sort a match list descending by score. The backend already sorts, but
/// the ordering invariant is ours to uphold for everything downstream.
pub fn sort_by_score(matches: &mut [MatchResult]) {
    matches.sort_by(|a, b| b.match_score.cmp(&a.match_score));
}

/// Response of `POST /match-diensten`.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchResponse {
    #[serde(default)]
    pub success: Option<bool>,
    pub matches: Vec<MatchResult>,
    #[serde(default)]
    pub total_found: Option<usize>,
}

/// Response of `POST /recalculate-matches`.
///
/// Either carries a replacement match list, or the `restart_wizard`
/// control directive instead of matches.
#[derive(Debug, Clone, Deserialize)]
pub struct RecalculateResponse {
    pub success: bool,
    #[serde(default)]
    pub matches: Option<Vec<MatchResult>>,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub modified_preferences: Option<PreferenceRecord>,
    #[serde(default)]
    pub total_found: Option<usize>,
    #[serde(default)]
    pub error: Option<String>,
}

impl RecalculateResponse {
    pub fn wants_restart(&self) -> bool {
        self.action.as_deref() == Some("restart_wizard")
    }
}

/// Response of `POST /process-text-and-match`.
#[derive(Debug, Clone, Deserialize)]
pub struct TextMatchResponse {
    pub success: bool,
    #[serde(default, rename = "textAnalysis")]
    pub text_analysis: Option<TextAnalysis>,
    #[serde(default, rename = "newMatches")]
    pub new_matches: Option<Vec<MatchResult>>,
    #[serde(default, rename = "updatedPreferences")]
    pub updated_preferences: Option<PreferenceRecord>,
    #[serde(default, rename = "preferencesChanged")]
    pub preferences_changed: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// The interpretation block inside a text-processing response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TextAnalysis {
    #[serde(default)]
    pub clarifications_needed: Vec<String>,
    #[serde(default)]
    pub reasoning: String,
    #[serde(default)]
    pub soft_preferences: Vec<serde_json::Value>,
    #[serde(default)]
    pub confidence: Option<String>,
}

/// Response of `POST /process-clarification`.
#[derive(Debug, Clone, Deserialize)]
pub struct ClarificationResponse {
    pub success: bool,
    #[serde(default)]
    pub matches: Option<Vec<MatchResult>>,
    #[serde(default, rename = "appliedFilter")]
    pub applied_filter: Option<String>,
    #[serde(default, rename = "filterActive")]
    pub filter_active: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// Response of `POST /generate-ai-insights`.
#[derive(Debug, Clone, Deserialize)]
pub struct InsightsResponse {
    pub success: bool,
    #[serde(default)]
    pub insights: Option<Insights>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Supplementary narrative block rendered next to the match list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Insights {
    #[serde(default)]
    pub key_insight: String,
    #[serde(default)]
    pub trade_offs: String,
    #[serde(default)]
    pub priority_analysis: String,
}

/// Request body of `POST /submit-lead`.
#[derive(Debug, Clone, Serialize)]
pub struct LeadRequest {
    pub email: String,
    pub name: String,
    pub interest_in_guidance: bool,
    pub preferences: PreferenceRecord,
}

/// Response of `POST /submit-lead`.
#[derive(Debug, Clone, Deserialize)]
pub struct LeadResponse {
    pub status: String,
}

impl LeadResponse {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

/// Request body of `POST /generate-ai-report`.
#[derive(Debug, Clone, Serialize)]
pub struct ReportRequest {
    pub user_data: PreferenceRecord,
    pub matches: Vec<MatchResult>,
    pub claude_analysis: String,
}

/// Response of `POST /generate-ai-report`.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportResponse {
    pub success: bool,
    #[serde(default)]
    pub report_content: Option<String>,
    #[serde(default)]
    pub report_url: Option<String>,
    #[serde(default)]
    pub generated_at: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Longer provider profile fetched for report enrichment
/// (`GET /banks/{id}`). Every field is optional in practice; enrichment
/// is best-effort and must never block report generation.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderProfile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_match_json() -> &'static str {
        r#"{
            "id": "dienst_7",
            "name": "Keytrade Bank",
            "logo": "keytrade.svg",
            "description": "Doe-het-zelf beleggen van Keytrade Bank",
            "strengths": ["Zeer lage kosten", "Sterk digitaal platform"],
            "weaknesses": ["Geen persoonlijk advies"],
            "matchScore": 88,
            "rating": 4,
            "details": {
                "minimum_bedrag": 0,
                "tco": 0.012,
                "sterren_score": 4,
                "kenmerken": "online, ETF"
            }
        }"#
    }

    #[test]
    fn test_match_result_parses_wire_shape() {
        let m: MatchResult = serde_json::from_str(sample_match_json()).unwrap();
        assert_eq!(m.id, "dienst_7");
        assert_eq!(m.match_score, 88);
        assert_eq!(m.rating, 4);
        assert_eq!(m.details.tco, Some(0.012));
        // Unknown detail fields are retained, not dropped
        assert!(m.details.extra.contains_key("kenmerken"));
    }

    #[test]
    fn test_match_result_tolerates_missing_optionals() {
        let json = r#"{"id": "x", "name": "X", "matchScore": 50}"#;
        let m: MatchResult = serde_json::from_str(json).unwrap();
        assert_eq!(m.match_score, 50);
        assert!(m.strengths.is_empty());
        assert_eq!(m.rating, 0);
        assert_eq!(m.details.tco, None);
    }

    #[test]
    fn test_match_response_requires_matches_array() {
        // A body without a well-formed matches array must fail to parse;
        // the caller maps that to the fallback policy.
        let bad = r#"{"success": true, "total_found": 3}"#;
        assert!(serde_json::from_str::<MatchResponse>(bad).is_err());

        let good = format!(
            r#"{{"matches": [{}], "total_found": 12}}"#,
            sample_match_json()
        );
        let parsed: MatchResponse = serde_json::from_str(&good).unwrap();
        assert_eq!(parsed.matches.len(), 1);
        assert_eq!(parsed.total_found, Some(12));
    }

    #[test]
    fn test_sort_by_score_descending() {
        let mut matches: Vec<MatchResult> = [55u8, 92, 78]
            .iter()
            .map(|score| {
                let json = format!(
                    r#"{{"id": "m{score}", "name": "M{score}", "matchScore": {score}}}"#
                );
                serde_json::from_str(&json).unwrap()
            })
            .collect();
        sort_by_score(&mut matches);
        for pair in matches.windows(2) {
            assert!(
                pair[0].match_score >= pair[1].match_score,
                "expected descending order, got {} before {}",
                pair[0].match_score,
                pair[1].match_score
            );
        }
    }

    #[test]
    fn test_recalculate_restart_directive() {
        let json = r#"{"success": true, "action": "restart_wizard", "message": "terug naar start"}"#;
        let resp: RecalculateResponse = serde_json::from_str(json).unwrap();
        assert!(resp.wants_restart());
        assert!(resp.matches.is_none());
    }

    #[test]
    fn test_recalculate_with_modified_preferences() {
        let json = format!(
            r#"{{
                "success": true,
                "matches": [{}],
                "modified_preferences": {{"kosten_belangrijkheid": "heel_belangrijk"}},
                "total_found": 5
            }}"#,
            sample_match_json()
        );
        let resp: RecalculateResponse = serde_json::from_str(&json).unwrap();
        assert!(!resp.wants_restart());
        let prefs = resp.modified_preferences.unwrap();
        assert_eq!(
            prefs.get("kosten_belangrijkheid").and_then(|v| v.as_str()),
            Some("heel_belangrijk")
        );
    }

    #[test]
    fn test_text_response_with_clarifications() {
        let json = r#"{
            "success": true,
            "textAnalysis": {
                "clarifications_needed": ["Wilt u specifiek Triodos hoger scoren?"],
                "reasoning": "Bankvoorkeur zonder context",
                "confidence": "medium"
            },
            "preferencesChanged": false
        }"#;
        let resp: TextMatchResponse = serde_json::from_str(json).unwrap();
        let analysis = resp.text_analysis.unwrap();
        assert_eq!(analysis.clarifications_needed.len(), 1);
        assert!(!resp.preferences_changed);
        assert!(resp.new_matches.is_none());
    }

    #[test]
    fn test_lead_response_status() {
        let ok: LeadResponse = serde_json::from_str(r#"{"status": "success"}"#).unwrap();
        assert!(ok.is_success());
        let nok: LeadResponse = serde_json::from_str(r#"{"status": "stored"}"#).unwrap();
        assert!(!nok.is_success());
    }

    #[test]
    fn test_preference_record_preserves_insertion_order() {
        let mut record = PreferenceRecord::new();
        record.insert("investment_goal".into(), "groei".into());
        record.insert("investment_horizon".into(), ">10 jaar".into());
        record.insert("amount".into(), 25000.into());

        let keys: Vec<&String> = record.keys().collect();
        assert_eq!(keys, vec!["investment_goal", "investment_horizon", "amount"]);
    }
}
