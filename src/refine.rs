//! Iterative refinement: classify how decisive the current matches are,
//! generate scenario-specific follow-up questions, and turn the chosen
//! options into the impact objects the recalculation endpoint expects.
//!
//! Everything here is a pure function of the match list, so the whole
//! round can be tested without a backend.

use serde_json::Value;

use crate::commands::MatchResult;

/// Classification of the gap between the top two matches.
///
/// A close race outranks low scores: when two providers are within 5
/// points of each other, deciding between them matters more than the
/// absolute level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scenario {
    CloseRace,
    LowScores,
    Refinement,
}

impl Scenario {
    /// Pure function of the top two match scores; None with fewer than
    /// two matches.
    pub fn detect(matches: &[MatchResult]) -> Option<Scenario> {
        if matches.len() < 2 {
            return None;
        }
        let top = matches[0].match_score as i32;
        let second = matches[1].match_score as i32;

        if top - second <= 5 {
            Some(Scenario::CloseRace)
        } else if top < 75 {
            Some(Scenario::LowScores)
        } else {
            Some(Scenario::Refinement)
        }
    }

    pub fn urgency_class(self) -> &'static str {
        match self {
            Scenario::CloseRace => "urgency-high",
            Scenario::LowScores => "urgency-medium",
            Scenario::Refinement => "urgency-low",
        }
    }
}

/// Weighting criteria the generated questions may adjust. The wire keys
/// mirror the backend's weight vocabulary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WeightKey {
    Kosten,
    Begeleiding,
    Functionaliteiten,
}

impl WeightKey {
    fn wire_key(self) -> &'static str {
        match self {
            WeightKey::Kosten => "weight_kosten",
            WeightKey::Begeleiding => "weight_begeleiding",
            WeightKey::Functionaliteiten => "weight_functionaliteiten",
        }
    }
}

/// Control flags an option may raise instead of (or next to) a weight
/// change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Directive {
    LowerThresholds,
    ExpandScope,
    MaintainStandards,
    BoostSimilarAttributes,
    NeutralWeight,
    ReduceSimilarAttributes,
    RestartWizard,
}

impl Directive {
    fn wire_key(self) -> &'static str {
        match self {
            Directive::LowerThresholds => "lower_thresholds",
            Directive::ExpandScope => "expand_scope",
            Directive::MaintainStandards => "maintain_standards",
            Directive::BoostSimilarAttributes => "boost_similar_attributes",
            Directive::NeutralWeight => "neutral_weight",
            Directive::ReduceSimilarAttributes => "reduce_similar_attributes",
            Directive::RestartWizard => "restart_wizard",
        }
    }
}

/// One adjustment carried by a chosen answer option. Closed set, so the
/// merge step is checked exhaustively.
#[derive(Debug, Clone, PartialEq)]
pub enum ImpactDelta {
    Weight { key: WeightKey, multiplier: f64 },
    Prefer { match_id: String },
    Directive(Directive),
}

impl ImpactDelta {
    fn apply_to(&self, object: &mut serde_json::Map<String, Value>) {
        match self {
            ImpactDelta::Weight { key, multiplier } => {
                object.insert(key.wire_key().to_string(), Value::from(*multiplier));
            }
            ImpactDelta::Prefer { match_id } => {
                object.insert("preferred_match".to_string(), Value::from(match_id.clone()));
            }
            ImpactDelta::Directive(directive) => {
                object.insert(directive.wire_key().to_string(), Value::from(true));
            }
        }
    }
}

/// Fold each answered question's deltas into one flat impact object, in
/// answer order. This array is the `impacts` field of the recalculation
/// request.
pub fn merge_impacts<'a, I>(answers: I) -> Vec<Value>
where
    I: IntoIterator<Item = &'a [ImpactDelta]>,
{
    answers
        .into_iter()
        .map(|deltas| {
            let mut object = serde_json::Map::new();
            for delta in deltas {
                delta.apply_to(&mut object);
            }
            Value::Object(object)
        })
        .collect()
}

/// All generated questions must be answered before recalculation is
/// offered; a partial answer set keeps the action disabled.
pub fn recalculation_enabled(answered: usize, total: usize) -> bool {
    total > 0 && answered == total
}

/// One selectable answer of a generated question.
#[derive(Debug, Clone, PartialEq)]
pub struct RefineOption {
    pub id: &'static str,
    pub label: String,
    pub impacts: Vec<ImpactDelta>,
}

/// A generated follow-up question with 2-3 fixed options.
#[derive(Debug, Clone, PartialEq)]
pub struct RefineQuestion {
    pub id: &'static str,
    pub prompt: String,
    pub options: Vec<RefineOption>,
}

/// The full follow-up round derived from the current match list.
#[derive(Debug, Clone, PartialEq)]
pub struct RefinementPrompt {
    pub scenario: Scenario,
    pub title: String,
    pub description: String,
    pub questions: Vec<RefineQuestion>,
}

/// Build the follow-up round for the current match list, or None when
/// there is nothing worth asking.
pub fn build_refinement(matches: &[MatchResult]) -> Option<RefinementPrompt> {
    let scenario = Scenario::detect(matches)?;
    let top = &matches[0];
    let second = &matches[1];

    let (title, description, questions) = match scenario {
        Scenario::CloseRace => (
            "Zeer close race!".to_string(),
            format!(
                "{} ({}%) vs {} ({}%) - slechts {}% verschil!",
                top.name,
                top.match_score,
                second.name,
                second.match_score,
                top.match_score - second.match_score
            ),
            close_race_questions(top, second),
        ),
        Scenario::LowScores => (
            "Misschien te strenge criteria?".to_string(),
            format!(
                "Je beste match scoort {}%. Wil je flexibeler zijn?",
                top.match_score
            ),
            flexibility_questions(top),
        ),
        Scenario::Refinement => (
            "Verfijn je matches".to_string(),
            "Goede matches gevonden! Wil je ze nog verder optimaliseren?".to_string(),
            strength_questions(top),
        ),
    };

    if questions.is_empty() {
        return None;
    }
    Some(RefinementPrompt {
        scenario,
        title,
        description,
        questions,
    })
}

fn mentions_any(strengths: &[String], needles: &[&str]) -> bool {
    strengths.iter().any(|s| {
        let lowered = s.to_lowercase();
        needles.iter().any(|needle| lowered.contains(needle))
    })
}

/// Close race: put the actual trade-offs between the two front-runners
/// to the user. Yearly cost difference below 0.2% is noise and skipped.
fn close_race_questions(first: &MatchResult, second: &MatchResult) -> Vec<RefineQuestion> {
    let mut questions = Vec::new();

    let tco1 = first.details.tco.unwrap_or(0.0);
    let tco2 = second.details.tco.unwrap_or(0.0);
    let cost_diff_pct = (tco1 - tco2).abs() * 100.0;

    if cost_diff_pct > 0.2 {
        let (cheaper, costlier) = if tco1 < tco2 {
            (first, second)
        } else {
            (second, first)
        };
        questions.push(RefineQuestion {
            id: "cost_vs_quality",
            prompt: format!(
                "Belangrijke afweging: {} is {:.2}% per jaar goedkoper, maar {} scoort hoger op andere vlakken. Wat weegt zwaarder?",
                cheaper.name, cost_diff_pct, costlier.name
            ),
            options: vec![
                RefineOption {
                    id: "choose_cheaper",
                    label: format!("Kies voor lagere kosten ({})", cheaper.name),
                    impacts: vec![
                        ImpactDelta::Weight { key: WeightKey::Kosten, multiplier: 1.5 },
                        ImpactDelta::Prefer { match_id: cheaper.id.clone() },
                    ],
                },
                RefineOption {
                    id: "choose_quality",
                    label: format!("Kies voor betere totaalscore ({})", costlier.name),
                    impacts: vec![
                        ImpactDelta::Weight { key: WeightKey::Kosten, multiplier: 0.8 },
                        ImpactDelta::Prefer { match_id: costlier.id.clone() },
                    ],
                },
            ],
        });
    }

    let personal = mentions_any(&first.strengths, &["persoonlijk", "begeleiding"]);
    let digital = mentions_any(&second.strengths, &["platform", "digitaal"]);
    if personal && digital {
        questions.push(RefineQuestion {
            id: "service_vs_digital",
            prompt: format!(
                "Verschillende sterke punten: {} biedt meer persoonlijke begeleiding, {} heeft een sterker digitaal platform. Wat past beter bij jou?",
                first.name, second.name
            ),
            options: vec![
                RefineOption {
                    id: "prefer_personal",
                    label: "Ik waardeer persoonlijke begeleiding".to_string(),
                    impacts: vec![
                        ImpactDelta::Weight { key: WeightKey::Begeleiding, multiplier: 1.4 },
                        ImpactDelta::Prefer { match_id: first.id.clone() },
                    ],
                },
                RefineOption {
                    id: "prefer_digital",
                    label: "Ik prefereer een sterk digitaal platform".to_string(),
                    impacts: vec![
                        ImpactDelta::Weight { key: WeightKey::Functionaliteiten, multiplier: 1.4 },
                        ImpactDelta::Prefer { match_id: second.id.clone() },
                    ],
                },
            ],
        });
    }

    questions
}

/// Low scores: offer to relax the criteria, keep them, or start over.
fn flexibility_questions(top: &MatchResult) -> Vec<RefineQuestion> {
    vec![RefineQuestion {
        id: "criteria_flexibility",
        prompt: format!(
            "De beste optie ({}) scoort {}%. Wil je je criteria aanpassen voor meer keuze?",
            top.name, top.match_score
        ),
        options: vec![
            RefineOption {
                id: "broaden_search",
                label: "Ja, laat meer opties zien (bredere criteria)".to_string(),
                impacts: vec![
                    ImpactDelta::Directive(Directive::LowerThresholds),
                    ImpactDelta::Directive(Directive::ExpandScope),
                ],
            },
            RefineOption {
                id: "keep_strict",
                label: "Nee, ik houd mijn eisen aan (kwaliteit boven kwantiteit)".to_string(),
                impacts: vec![ImpactDelta::Directive(Directive::MaintainStandards)],
            },
            RefineOption {
                id: "reconfigure",
                label: "Laat me mijn prioriteiten opnieuw instellen".to_string(),
                impacts: vec![ImpactDelta::Directive(Directive::RestartWizard)],
            },
        ],
    }]
}

/// Comfortable lead: validate how much the winner's main strength
/// actually matters. Without strengths there is nothing to ask.
fn strength_questions(top: &MatchResult) -> Vec<RefineQuestion> {
    let Some(main_strength) = top.strengths.first() else {
        return Vec::new();
    };
    vec![RefineQuestion {
        id: "strength_validation",
        prompt: format!(
            "{} valt op door '{}'. Hoe belangrijk is dit voor jou?",
            top.name, main_strength
        ),
        options: vec![
            RefineOption {
                id: "very_important",
                label: "Zeer belangrijk - dit is precies wat ik zoek".to_string(),
                impacts: vec![ImpactDelta::Directive(Directive::BoostSimilarAttributes)],
            },
            RefineOption {
                id: "nice_to_have",
                label: "Leuk meegenomen, maar niet doorslaggevend".to_string(),
                impacts: vec![ImpactDelta::Directive(Directive::NeutralWeight)],
            },
            RefineOption {
                id: "not_priority",
                label: "Eigenlijk niet zo belangrijk voor mij".to_string(),
                impacts: vec![ImpactDelta::Directive(Directive::ReduceSimilarAttributes)],
            },
        ],
    }]
}

// ============================================================================
// Clarification chooser - second round of the free-text path
// ============================================================================

/// The fixed options offered for every clarification prompt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClarificationAction {
    BoostSpecific,
    AdjustCriteria,
    Cancel,
}

impl ClarificationAction {
    pub fn all() -> [ClarificationAction; 3] {
        [
            ClarificationAction::BoostSpecific,
            ClarificationAction::AdjustCriteria,
            ClarificationAction::Cancel,
        ]
    }

    pub fn wire(self) -> &'static str {
        match self {
            ClarificationAction::BoostSpecific => "boost_specific",
            ClarificationAction::AdjustCriteria => "adjust_criteria",
            ClarificationAction::Cancel => "cancel",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ClarificationAction::BoostSpecific => "Ja, geef deze aanbieder voorrang",
            ClarificationAction::AdjustCriteria => "Pas liever mijn criteria aan",
            ClarificationAction::Cancel => "Laat maar, niets wijzigen",
        }
    }
}

/// The provider a clarification refers to: the first current match whose
/// name occurs in the prompt, else the top match.
pub fn clarification_target(clarification: &str, matches: &[MatchResult]) -> Option<String> {
    let lowered = clarification.to_lowercase();
    matches
        .iter()
        .find(|m| lowered.contains(&m.name.to_lowercase()))
        .or_else(|| matches.first())
        .map(|m| m.name.clone())
}

/// Wire payload of the selected option for `process-clarification`.
pub fn clarification_payload(
    action: ClarificationAction,
    clarification: &str,
    matches: &[MatchResult],
) -> Value {
    match action {
        ClarificationAction::BoostSpecific => serde_json::json!({
            "action": action.wire(),
            "target": clarification_target(clarification, matches),
            "text": clarification,
        }),
        ClarificationAction::AdjustCriteria => serde_json::json!({
            "action": action.wire(),
            "text": clarification,
        }),
        ClarificationAction::Cancel => serde_json::json!({
            "action": action.wire(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MatchDetails;

    fn make_match(id: &str, score: u8, tco: Option<f64>, strengths: &[&str]) -> MatchResult {
        MatchResult {
            id: id.to_string(),
            name: format!("Bank {}", id.to_uppercase()),
            logo: String::new(),
            description: String::new(),
            strengths: strengths.iter().map(|s| s.to_string()).collect(),
            weaknesses: Vec::new(),
            match_score: score,
            rating: 4,
            details: MatchDetails {
                minimum_bedrag: None,
                tco,
                sterren_score: None,
                extra: Default::default(),
            },
        }
    }

    #[test]
    fn test_scenario_detection_cases() {
        let detect = |a: u8, b: u8| {
            Scenario::detect(&[
                make_match("a", a, None, &[]),
                make_match("b", b, None, &[]),
            ])
        };

        assert_eq!(detect(90, 70), Some(Scenario::Refinement));
        assert_eq!(detect(80, 78), Some(Scenario::CloseRace));
        assert_eq!(detect(60, 55), Some(Scenario::LowScores));
        // Close race wins over low scores regardless of absolute level
        assert_eq!(detect(60, 57), Some(Scenario::CloseRace));
        // Exactly 5 apart still counts as close
        assert_eq!(detect(80, 75), Some(Scenario::CloseRace));
    }

    #[test]
    fn test_scenario_needs_two_matches() {
        assert_eq!(Scenario::detect(&[]), None);
        assert_eq!(
            Scenario::detect(&[make_match("a", 90, None, &[])]),
            None
        );
    }

    #[test]
    fn test_close_race_cost_question_picks_cheaper() {
        let matches = vec![
            make_match("a", 80, Some(0.022), &[]),
            make_match("b", 78, Some(0.012), &[]),
        ];
        let prompt = build_refinement(&matches).unwrap();
        assert_eq!(prompt.scenario, Scenario::CloseRace);

        let cost = prompt
            .questions
            .iter()
            .find(|q| q.id == "cost_vs_quality")
            .expect("1% cost gap should produce the cost question");
        assert_eq!(cost.options.len(), 2);

        // The cheaper option boosts the cost weight and prefers b
        let cheaper = &cost.options[0];
        assert_eq!(cheaper.id, "choose_cheaper");
        assert!(cheaper.label.contains("Bank B"));
        assert!(cheaper
            .impacts
            .contains(&ImpactDelta::Prefer { match_id: "b".to_string() }));
        assert!(cheaper.impacts.contains(&ImpactDelta::Weight {
            key: WeightKey::Kosten,
            multiplier: 1.5
        }));
    }

    #[test]
    fn test_close_race_without_cost_gap_or_strengths_is_empty() {
        let matches = vec![
            make_match("a", 80, Some(0.015), &[]),
            make_match("b", 79, Some(0.015), &[]),
        ];
        // No cost gap, no strength contrast: nothing to ask
        assert_eq!(build_refinement(&matches), None);
    }

    #[test]
    fn test_close_race_service_vs_digital() {
        let matches = vec![
            make_match("a", 80, None, &["Persoonlijke begeleiding op kantoor"]),
            make_match("b", 78, None, &["Sterk digitaal platform"]),
        ];
        let prompt = build_refinement(&matches).unwrap();
        let question = prompt
            .questions
            .iter()
            .find(|q| q.id == "service_vs_digital")
            .expect("contrasting strengths should produce the service question");

        let personal = &question.options[0];
        assert!(personal.impacts.contains(&ImpactDelta::Weight {
            key: WeightKey::Begeleiding,
            multiplier: 1.4
        }));
        let digital = &question.options[1];
        assert!(digital.impacts.contains(&ImpactDelta::Weight {
            key: WeightKey::Functionaliteiten,
            multiplier: 1.4
        }));
    }

    #[test]
    fn test_low_scores_offers_restart() {
        let matches = vec![
            make_match("a", 62, None, &[]),
            make_match("b", 50, None, &[]),
        ];
        let prompt = build_refinement(&matches).unwrap();
        assert_eq!(prompt.scenario, Scenario::LowScores);
        assert_eq!(prompt.questions.len(), 1);

        let options = &prompt.questions[0].options;
        assert_eq!(options.len(), 3);
        let restart = options.iter().find(|o| o.id == "reconfigure").unwrap();
        assert_eq!(
            restart.impacts,
            vec![ImpactDelta::Directive(Directive::RestartWizard)]
        );
    }

    #[test]
    fn test_refinement_validates_top_strength() {
        let matches = vec![
            make_match("a", 92, None, &["Zeer lage kosten"]),
            make_match("b", 75, None, &[]),
        ];
        let prompt = build_refinement(&matches).unwrap();
        assert_eq!(prompt.scenario, Scenario::Refinement);
        assert!(prompt.questions[0].prompt.contains("Zeer lage kosten"));
        assert_eq!(prompt.questions[0].options.len(), 3);
    }

    #[test]
    fn test_refinement_without_strengths_yields_nothing() {
        let matches = vec![
            make_match("a", 92, None, &[]),
            make_match("b", 75, None, &[]),
        ];
        assert_eq!(build_refinement(&matches), None);
    }

    #[test]
    fn test_merge_impacts_wire_shape() {
        let first: Vec<ImpactDelta> = vec![
            ImpactDelta::Weight { key: WeightKey::Kosten, multiplier: 1.5 },
            ImpactDelta::Prefer { match_id: "kbc".to_string() },
        ];
        let second: Vec<ImpactDelta> = vec![ImpactDelta::Directive(Directive::RestartWizard)];

        let impacts = merge_impacts([first.as_slice(), second.as_slice()]);
        assert_eq!(
            impacts,
            vec![
                serde_json::json!({"weight_kosten": 1.5, "preferred_match": "kbc"}),
                serde_json::json!({"restart_wizard": true}),
            ]
        );
    }

    #[test]
    fn test_all_or_nothing_gating() {
        assert!(!recalculation_enabled(0, 2));
        assert!(!recalculation_enabled(1, 2));
        assert!(recalculation_enabled(2, 2));
        // No questions means nothing to recalculate either
        assert!(!recalculation_enabled(0, 0));
    }

    #[test]
    fn test_clarification_target_prefers_named_match() {
        let matches = vec![
            make_match("a", 80, None, &[]),
            make_match("b", 78, None, &[]),
        ];
        let target =
            clarification_target("Wilt u specifiek Bank B hoger scoren?", &matches);
        assert_eq!(target, Some("Bank B".to_string()));

        // Unnamed clarifications boost the current number one
        let target = clarification_target("Zoekt u kantoren dichtbij?", &matches);
        assert_eq!(target, Some("Bank A".to_string()));
    }

    #[test]
    fn test_clarification_payload_shapes() {
        let matches = vec![make_match("a", 80, None, &[])];
        let boost = clarification_payload(
            ClarificationAction::BoostSpecific,
            "Wilt u Bank A hoger scoren?",
            &matches,
        );
        assert_eq!(boost["action"], "boost_specific");
        assert_eq!(boost["target"], "Bank A");

        let cancel = clarification_payload(ClarificationAction::Cancel, "wat dan ook", &matches);
        assert_eq!(cancel, serde_json::json!({"action": "cancel"}));
    }
}
