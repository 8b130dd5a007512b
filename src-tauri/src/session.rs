//! In-memory session state: the user's frozen preference record and the
//! latest match list.
//!
//! This is a plain container managed as Tauri state, so the write/replace
//! rules can be unit-tested without a running app. Match lists are only
//! ever replaced wholesale; nothing mutates an individual entry after a
//! recalculation, which keeps rank order and per-card state consistent.

use serde::{Deserialize, Serialize};

use crate::backend::types::{MatchResult, PreferenceRecord};

/// How many matches are surfaced to the user. More may be retained for
/// recalculation purposes.
pub const TOP_MATCH_COUNT: usize = 3;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    preferences: Option<PreferenceRecord>,
    matches: Vec<MatchResult>,
}

/// Serializable view of a complete session, used for persistence and for
/// handing the session to the frontend in one piece.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub preferences: PreferenceRecord,
    pub matches: Vec<MatchResult>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop everything. Called at the start of a new wizard session and
    /// on a `restart_wizard` directive.
    pub fn clear(&mut self) {
        self.preferences = None;
        self.matches.clear();
    }

    /// Record the outcome of a completed match call: the preference record
    /// is frozen here and the match list replaces whatever was shown.
    pub fn store_results(&mut self, preferences: PreferenceRecord, matches: Vec<MatchResult>) {
        self.preferences = Some(preferences);
        self.matches = matches;
    }

    /// Wholesale match-list replacement after recalculation or text
    /// refinement. Preferences stay as they are unless the backend
    /// returned a modified copy.
    pub fn replace_matches(&mut self, matches: Vec<MatchResult>) {
        self.matches = matches;
    }

    /// Adopt a server-returned replacement of the preference record. The
    /// original is never edited in place.
    pub fn replace_preferences(&mut self, preferences: PreferenceRecord) {
        self.preferences = Some(preferences);
    }

    pub fn preferences(&self) -> Option<&PreferenceRecord> {
        self.preferences.as_ref()
    }

    pub fn matches(&self) -> &[MatchResult] {
        &self.matches
    }

    pub fn top_matches(&self) -> &[MatchResult] {
        let n = self.matches.len().min(TOP_MATCH_COUNT);
        &self.matches[..n]
    }

    /// A session only counts once a preference record exists; a match list
    /// without preferences cannot be refined and is not worth restoring.
    pub fn snapshot(&self) -> Option<SessionSnapshot> {
        self.preferences.as_ref().map(|preferences| SessionSnapshot {
            preferences: preferences.clone(),
            matches: self.matches.clone(),
        })
    }

    pub fn restore(&mut self, snapshot: SessionSnapshot) {
        self.preferences = Some(snapshot.preferences);
        self.matches = snapshot.matches;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_match(id: &str, score: u8) -> MatchResult {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "name": format!("Aanbieder {}", id),
            "matchScore": score,
        }))
        .unwrap()
    }

    fn make_preferences() -> PreferenceRecord {
        let mut prefs = PreferenceRecord::new();
        prefs.insert("investment_goal".into(), "groei".into());
        prefs.insert("amount".into(), 25000.into());
        prefs
    }

    #[test]
    fn test_empty_session_has_no_snapshot() {
        let state = SessionState::new();
        assert!(state.snapshot().is_none());
        assert!(state.matches().is_empty());
    }

    #[test]
    fn test_store_results_freezes_preferences() {
        let mut state = SessionState::new();
        state.store_results(make_preferences(), vec![make_match("a", 90)]);

        assert_eq!(state.preferences().unwrap().len(), 2);
        assert_eq!(state.matches().len(), 1);
    }

    #[test]
    fn test_replace_matches_is_wholesale() {
        let mut state = SessionState::new();
        state.store_results(
            make_preferences(),
            vec![make_match("a", 90), make_match("b", 80)],
        );

        state.replace_matches(vec![make_match("c", 95)]);
        assert_eq!(state.matches().len(), 1);
        assert_eq!(state.matches()[0].id, "c");
        // Preferences untouched by a match replacement
        assert!(state.preferences().is_some());
    }

    #[test]
    fn test_clear_discards_both_records() {
        let mut state = SessionState::new();
        state.store_results(make_preferences(), vec![make_match("a", 90)]);
        state.clear();

        assert!(state.preferences().is_none());
        assert!(state.matches().is_empty());
        assert!(state.snapshot().is_none());
    }

    #[test]
    fn test_top_matches_caps_at_three() {
        let mut state = SessionState::new();
        state.store_results(
            make_preferences(),
            vec![
                make_match("a", 90),
                make_match("b", 85),
                make_match("c", 80),
                make_match("d", 75),
            ],
        );
        assert_eq!(state.top_matches().len(), 3);
        assert_eq!(state.matches().len(), 4);
    }

    #[test]
    fn test_snapshot_restore_roundtrip() {
        let mut state = SessionState::new();
        state.store_results(make_preferences(), vec![make_match("a", 90)]);
        let snapshot = state.snapshot().unwrap();

        let mut restored = SessionState::new();
        restored.restore(snapshot);
        assert_eq!(state, restored);
    }

    #[test]
    fn test_snapshot_serializes_for_store() {
        let mut state = SessionState::new();
        state.store_results(make_preferences(), vec![make_match("a", 90)]);
        let snapshot = state.snapshot().unwrap();

        let json = serde_json::to_string(&snapshot).unwrap();
        let parsed: SessionSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot, parsed);
    }
}
