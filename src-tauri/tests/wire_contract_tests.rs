//! Contract tests: full response bodies as the matching backend sends
//! them, parsed through the public wire types.

use beleggingsmatch_tauri::backend::types::*;
use beleggingsmatch_tauri::session::{SessionSnapshot, SessionState};

fn full_match_body() -> &'static str {
    r#"{
        "success": true,
        "matches": [
            {
                "id": "dienst_3",
                "name": "KBC",
                "logo": "kbc.svg",
                "description": "Samen beleggen van KBC",
                "strengths": ["Groot kantorennetwerk", "Persoonlijke begeleiding"],
                "weaknesses": ["Minder scherpe tarieven"],
                "matchScore": 84,
                "rating": 4,
                "details": {
                    "minimum_bedrag": 10000,
                    "tco": 0.019,
                    "sterren_score": 4,
                    "kenmerken": "advies, fondsen"
                }
            },
            {
                "id": "dienst_9",
                "name": "Keytrade Bank",
                "logo": "keytrade_bank.svg",
                "description": "Doe-het-zelf van Keytrade Bank",
                "strengths": ["Zeer lage kosten", "Sterk digitaal platform"],
                "weaknesses": ["Geen persoonlijk advies"],
                "matchScore": 90,
                "rating": 4,
                "details": {
                    "minimum_bedrag": 0,
                    "tco": 0.011,
                    "sterren_score": 4
                }
            }
        ],
        "total_found": 7,
        "filters_applied": {
            "type_dienst": "doe_het_zelf",
            "bedrag": 25000
        }
    }"#
}

#[test]
fn match_response_parses_and_sorts() {
    let mut response: MatchResponse = serde_json::from_str(full_match_body()).unwrap();
    assert_eq!(response.matches.len(), 2);
    assert_eq!(response.total_found, Some(7));

    // This body arrives unsorted on purpose
    sort_by_score(&mut response.matches);
    assert_eq!(response.matches[0].name, "Keytrade Bank");
    for pair in response.matches.windows(2) {
        assert!(pair[0].match_score >= pair[1].match_score);
    }
}

#[test]
fn recalculate_response_carries_modified_preferences() {
    let body = r#"{
        "success": true,
        "matches": [
            {"id": "a", "name": "A", "matchScore": 77}
        ],
        "modified_preferences": {
            "investment_goal": "groei",
            "kosten_belangrijkheid": "heel_belangrijk"
        },
        "applied_impacts": [{"weight_kosten": 1.5}],
        "total_found": 4
    }"#;
    let response: RecalculateResponse = serde_json::from_str(body).unwrap();
    assert!(response.success);
    assert!(!response.wants_restart());

    let preferences = response.modified_preferences.unwrap();
    assert_eq!(
        preferences.get("kosten_belangrijkheid").and_then(|v| v.as_str()),
        Some("heel_belangrijk")
    );
}

#[test]
fn recalculate_restart_has_no_matches() {
    let body = r#"{
        "success": true,
        "action": "restart_wizard",
        "message": "Gebruiker wil wizard opnieuw starten"
    }"#;
    let response: RecalculateResponse = serde_json::from_str(body).unwrap();
    assert!(response.wants_restart());
    assert!(response.matches.is_none());
}

#[test]
fn text_response_three_outcomes() {
    // Outcome 1: direct application
    let direct = r#"{
        "success": true,
        "updatedPreferences": {"duurzaamheid_belangrijkheid": "heel_belangrijk"},
        "newMatches": [{"id": "t", "name": "Triodos", "matchScore": 88}],
        "textAnalysis": {"reasoning": "Duurzaamheid verhoogd", "confidence": "high"},
        "preferencesChanged": true
    }"#;
    let parsed: TextMatchResponse = serde_json::from_str(direct).unwrap();
    assert!(parsed.success && parsed.preferences_changed);
    assert_eq!(parsed.new_matches.unwrap().len(), 1);
    assert!(parsed
        .text_analysis
        .unwrap()
        .clarifications_needed
        .is_empty());

    // Outcome 2: clarification round required
    let ambiguous = r#"{
        "success": true,
        "textAnalysis": {
            "clarifications_needed": ["Wilt u specifiek KBC hoger scoren, of veel kantoren?"],
            "reasoning": "Bankvoorkeur zonder context"
        },
        "preferencesChanged": false
    }"#;
    let parsed: TextMatchResponse = serde_json::from_str(ambiguous).unwrap();
    assert_eq!(
        parsed.text_analysis.unwrap().clarifications_needed.len(),
        1
    );

    // Outcome 3: failure flag with message
    let failed = r#"{"success": false, "error": "Text analysis error: timeout"}"#;
    let parsed: TextMatchResponse = serde_json::from_str(failed).unwrap();
    assert!(!parsed.success);
    assert_eq!(parsed.error.as_deref(), Some("Text analysis error: timeout"));
}

#[test]
fn clarification_response_parses_filter_fields() {
    let body = r#"{
        "success": true,
        "matches": [{"id": "kbc", "name": "KBC", "matchScore": 91}],
        "appliedFilter": "Boost toegepast voor KBC",
        "filterActive": true,
        "note": "Boost toegepast via clarification"
    }"#;
    let response: ClarificationResponse = serde_json::from_str(body).unwrap();
    assert!(response.filter_active);
    assert_eq!(
        response.applied_filter.as_deref(),
        Some("Boost toegepast voor KBC")
    );
}

#[test]
fn insights_response_narrative_fields() {
    let body = r#"{
        "success": true,
        "insights": {
            "key_insight": "KBC scoort 91% en past goed bij uw profiel.",
            "trade_offs": "Persoonlijke service tegenover hogere kosten.",
            "priority_analysis": "Uw prioriteit begeleiding scoort goed."
        }
    }"#;
    let response: InsightsResponse = serde_json::from_str(body).unwrap();
    let insights = response.insights.unwrap();
    assert!(insights.key_insight.contains("91%"));
    assert!(!insights.trade_offs.is_empty());
}

#[test]
fn session_snapshot_survives_store_roundtrip() {
    let body: MatchResponse = serde_json::from_str(full_match_body()).unwrap();
    let mut preferences = PreferenceRecord::new();
    preferences.insert("investment_goal".into(), "groei".into());
    preferences.insert("amount".into(), 25000.into());

    let mut state = SessionState::new();
    state.store_results(preferences, body.matches);
    let snapshot = state.snapshot().unwrap();

    // Through JSON, as tauri-plugin-store persists it
    let json = serde_json::to_string(&snapshot).unwrap();
    let restored: SessionSnapshot = serde_json::from_str(&json).unwrap();

    let mut state2 = SessionState::new();
    state2.restore(restored);
    assert_eq!(state.matches(), state2.matches());
    assert_eq!(state.preferences(), state2.preferences());
}
