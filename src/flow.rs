//! Wizard flow: an explicit state machine over a fixed question list.
//!
//! The flow owns the preference record while the user is answering; once
//! the last answer lands the record is frozen and submitted. Submission
//! failures never strand the user: the canned fallback list is
//! substituted and the flow still completes.

use crate::commands::{MatchDetails, MatchResult, PreferenceRecord};

/// One selectable option of a single-choice question.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChoiceOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// Validity domain of a question.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QuestionKind {
    SingleChoice { options: &'static [ChoiceOption] },
    Rating { max: u8 },
    AmountSlider { min: u64, max: u64, default: u64 },
}

/// One question of the wizard. Identifiers are unique within the list;
/// they become the keys of the preference record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuestionSpec {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub kind: QuestionKind,
}

/// An answer as entered in the UI, before validation.
#[derive(Debug, Clone, PartialEq)]
pub enum AnswerValue {
    Choice(String),
    Rating(u8),
    Amount(u64),
}

impl AnswerValue {
    fn to_json(&self) -> serde_json::Value {
        match self {
            AnswerValue::Choice(value) => serde_json::Value::String(value.clone()),
            AnswerValue::Rating(value) => serde_json::Value::from(*value),
            AnswerValue::Amount(value) => serde_json::Value::from(*value),
        }
    }
}

const GOAL_OPTIONS: &[ChoiceOption] = &[
    ChoiceOption { value: "groei", label: "Vermogensgroei op lange termijn" },
    ChoiceOption { value: "pensioen", label: "Pensioenopbouw" },
    ChoiceOption { value: "kapitaalbehoud", label: "Behoud van kapitaal met beperkt risico" },
    ChoiceOption { value: "inkomen", label: "Genereren van regelmatig inkomen" },
];

const HORIZON_OPTIONS: &[ChoiceOption] = &[
    ChoiceOption { value: "<3 jaar", label: "Korte termijn (minder dan 3 jaar)" },
    ChoiceOption { value: "3-10 jaar", label: "Middellange termijn (3 tot 10 jaar)" },
    ChoiceOption { value: ">10 jaar", label: "Lange termijn (meer dan 10 jaar)" },
];

const STYLE_OPTIONS: &[ChoiceOption] = &[
    ChoiceOption { value: "zelf doen", label: "Zelf beleggen (volledige controle)" },
    ChoiceOption { value: "met hulp", label: "Met begeleiding (advies, maar zelf beslissen)" },
    ChoiceOption { value: "volledig uitbesteden", label: "Volledig uitbesteden (vermogensbeheer)" },
];

const PREFERENCE_OPTIONS: &[ChoiceOption] = &[
    ChoiceOption { value: "lage kosten", label: "Lage kosten en transparante tarieven" },
    ChoiceOption { value: "duurzaamheid", label: "Duurzaam en maatschappelijk verantwoord beleggen" },
    ChoiceOption { value: "vertrouwen/advies", label: "Persoonlijk advies en vertrouwen" },
];

const QUESTIONS: &[QuestionSpec] = &[
    QuestionSpec {
        id: "investment_goal",
        title: "Wat is je belangrijkste beleggingsdoel?",
        description: "Kies het doel dat het beste bij je situatie past.",
        kind: QuestionKind::SingleChoice { options: GOAL_OPTIONS },
    },
    QuestionSpec {
        id: "investment_horizon",
        title: "Hoe lang ben je van plan te beleggen?",
        description: "Je beleggingshorizon bepaalt mede je risicoprofiel.",
        kind: QuestionKind::SingleChoice { options: HORIZON_OPTIONS },
    },
    QuestionSpec {
        id: "management_style",
        title: "Hoe wil je je beleggingen beheren?",
        description: "Kies de beheerstijl die het beste bij je past.",
        kind: QuestionKind::SingleChoice { options: STYLE_OPTIONS },
    },
    QuestionSpec {
        id: "preference",
        title: "Wat is voor jou het belangrijkste bij het kiezen van een beleggingspartner?",
        description: "Kies de factor die voor jou het zwaarst weegt.",
        kind: QuestionKind::SingleChoice { options: PREFERENCE_OPTIONS },
    },
    QuestionSpec {
        id: "min_rating",
        title: "Welke minimale beoordeling moet een aanbieder hebben?",
        description: "Kies 0 sterren als je geen minimum wilt opleggen.",
        kind: QuestionKind::Rating { max: 5 },
    },
    QuestionSpec {
        id: "amount",
        title: "Welk bedrag ben je van plan te beleggen?",
        description: "Sleep de slider naar het gewenste bedrag of vul het zelf in.",
        kind: QuestionKind::AmountSlider { min: 0, max: 1_000_000, default: 25_000 },
    },
];

/// The fixed, ordered question list of a wizard session.
pub fn wizard_questions() -> &'static [QuestionSpec] {
    QUESTIONS
}

/// Wizard lifecycle. `AnsweringStep(i)` for each question, then the
/// terminal submission states.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WizardState {
    AnsweringStep(usize),
    Submitting,
    Submitted,
    Failed,
}

/// What `WizardFlow::answer` did with the given value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AdvanceOutcome {
    /// Answer stored, moved on to the question at this index.
    Next(usize),
    /// Answer stored, the record is complete: submission started.
    ReadyToSubmit,
    /// Value outside the question's domain, or the flow was not
    /// answering. Nothing changed; the caller logs and ignores.
    Rejected,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WizardFlow {
    state: WizardState,
    answers: PreferenceRecord,
}

impl WizardFlow {
    pub fn new() -> Self {
        Self {
            state: WizardState::AnsweringStep(0),
            answers: PreferenceRecord::new(),
        }
    }

    pub fn state(&self) -> WizardState {
        self.state
    }

    pub fn question_count(&self) -> usize {
        wizard_questions().len()
    }

    pub fn current_index(&self) -> Option<usize> {
        match self.state {
            WizardState::AnsweringStep(i) => Some(i),
            _ => None,
        }
    }

    pub fn current_question(&self) -> Option<&'static QuestionSpec> {
        self.current_index().map(|i| &wizard_questions()[i])
    }

    /// The accumulated preference record. Complete (one key per question)
    /// once the flow leaves the answering states.
    pub fn answers(&self) -> &PreferenceRecord {
        &self.answers
    }

    pub fn progress_percent(&self) -> u8 {
        match self.state {
            WizardState::AnsweringStep(i) => {
                (((i + 1) as f64 / self.question_count() as f64) * 100.0) as u8
            }
            _ => 100,
        }
    }

    fn validates(question: &QuestionSpec, value: &AnswerValue) -> bool {
        match (question.kind, value) {
            (QuestionKind::SingleChoice { options }, AnswerValue::Choice(chosen)) => {
                options.iter().any(|o| o.value == chosen)
            }
            (QuestionKind::Rating { max }, AnswerValue::Rating(r)) => *r <= max,
            (QuestionKind::AmountSlider { min, max, .. }, AnswerValue::Amount(amount)) => {
                (min..=max).contains(amount)
            }
            _ => false,
        }
    }

    /// Record an answer for the active question and advance.
    ///
    /// Values outside the question's validity domain are rejected without
    /// any state change. On the last question the flow transitions to
    /// `Submitting` and the caller invokes the match call.
    pub fn answer(&mut self, value: AnswerValue) -> AdvanceOutcome {
        let index = match self.state {
            WizardState::AnsweringStep(i) => i,
            _ => return AdvanceOutcome::Rejected,
        };
        let questions = wizard_questions();
        let question = &questions[index];
        if !Self::validates(question, &value) {
            return AdvanceOutcome::Rejected;
        }

        self.answers.insert(question.id.to_string(), value.to_json());

        if index + 1 < questions.len() {
            self.state = WizardState::AnsweringStep(index + 1);
            AdvanceOutcome::Next(index + 1)
        } else {
            self.state = WizardState::Submitting;
            AdvanceOutcome::ReadyToSubmit
        }
    }

    /// One entry per declared question id, no more, no less.
    pub fn is_complete(&self) -> bool {
        let questions = wizard_questions();
        self.answers.len() == questions.len()
            && questions.iter().all(|q| self.answers.contains_key(q.id))
    }

    pub fn mark_submitted(&mut self) {
        self.state = WizardState::Submitted;
    }

    pub fn mark_failed(&mut self) {
        self.state = WizardState::Failed;
    }

    /// Recover from a failed or cancelled submission: the canned fallback
    /// list stands in for live results and the flow still completes.
    pub fn recover_with_fallback(&mut self) -> Vec<MatchResult> {
        self.state = WizardState::Submitted;
        fallback_matches()
    }

    /// Back to step 0 with an empty record (the `restart_wizard`
    /// directive, or a fresh session).
    pub fn reset(&mut self) {
        self.state = WizardState::AnsweringStep(0);
        self.answers.clear();
    }
}

impl Default for WizardFlow {
    fn default() -> Self {
        Self::new()
    }
}

fn canned_match(
    id: &str,
    name: &str,
    description: &str,
    strengths: &[&str],
    weaknesses: &[&str],
    score: u8,
    rating: u8,
    tco: f64,
) -> MatchResult {
    MatchResult {
        id: id.to_string(),
        name: name.to_string(),
        logo: format!("{}.svg", id),
        description: description.to_string(),
        strengths: strengths.iter().map(|s| s.to_string()).collect(),
        weaknesses: weaknesses.iter().map(|s| s.to_string()).collect(),
        match_score: score,
        rating,
        details: MatchDetails {
            minimum_bedrag: None,
            tco: Some(tco),
            sterren_score: Some(rating),
            extra: Default::default(),
        },
    }
}

/// The deterministic fallback list shown when the live matching call
/// fails or times out. Same three entries, same order, every time.
pub fn fallback_matches() -> Vec<MatchResult> {
    vec![
        canned_match(
            "nova_invest",
            "Nova Invest",
            "Breed beleggingsplatform met een evenwicht tussen kosten en begeleiding.",
            &[
                "Lage instapdrempel",
                "Duidelijke, transparante tarieven",
                "Goede balans tussen zelf doen en advies",
            ],
            &["Beperkt kantorennetwerk"],
            85,
            4,
            0.015,
        ),
        canned_match(
            "greencap",
            "GreenCap",
            "Duurzame vermogensbeheerder met focus op impactbeleggen.",
            &[
                "Sterke duurzaamheidsfocus",
                "Volledig vermogensbeheer mogelijk",
            ],
            &["Hogere beheerkosten", "Minder keuze in fondsen"],
            70,
            4,
            0.022,
        ),
        canned_match(
            "fortex",
            "Fortex",
            "Online broker voor wie volledig zelf wil beleggen.",
            &[
                "Zeer lage transactiekosten",
                "Uitgebreid aanbod aan beurzen en producten",
            ],
            &["Geen persoonlijk advies", "Enkel digitale ondersteuning"],
            60,
            3,
            0.009,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer_for(question: &QuestionSpec) -> AnswerValue {
        match question.kind {
            QuestionKind::SingleChoice { options } => {
                AnswerValue::Choice(options[0].value.to_string())
            }
            QuestionKind::Rating { .. } => AnswerValue::Rating(3),
            QuestionKind::AmountSlider { default, .. } => AnswerValue::Amount(default),
        }
    }

    #[test]
    fn test_question_ids_unique() {
        let questions = wizard_questions();
        for (i, a) in questions.iter().enumerate() {
            for b in &questions[i + 1..] {
                assert_ne!(a.id, b.id, "duplicate question id '{}'", a.id);
            }
        }
    }

    #[test]
    fn test_full_run_produces_complete_record() {
        let mut flow = WizardFlow::new();
        let questions = wizard_questions();

        for (i, question) in questions.iter().enumerate() {
            let outcome = flow.answer(answer_for(question));
            if i + 1 < questions.len() {
                assert_eq!(outcome, AdvanceOutcome::Next(i + 1));
            } else {
                assert_eq!(outcome, AdvanceOutcome::ReadyToSubmit);
            }
        }

        assert_eq!(flow.state(), WizardState::Submitting);
        assert!(flow.is_complete(), "record should have one key per question");
        assert_eq!(flow.answers().len(), questions.len());
        // Insertion order equals question order
        let keys: Vec<&String> = flow.answers().keys().collect();
        let ids: Vec<&str> = questions.iter().map(|q| q.id).collect();
        assert_eq!(keys, ids);
    }

    #[test]
    fn test_invalid_choice_is_silent_noop() {
        let mut flow = WizardFlow::new();
        let outcome = flow.answer(AnswerValue::Choice("geld verbranden".to_string()));

        assert_eq!(outcome, AdvanceOutcome::Rejected);
        assert_eq!(flow.state(), WizardState::AnsweringStep(0));
        assert!(flow.answers().is_empty());
    }

    #[test]
    fn test_wrong_answer_kind_rejected() {
        let mut flow = WizardFlow::new();
        // First question is single-choice; an amount does not fit its domain
        let outcome = flow.answer(AnswerValue::Amount(10_000));
        assert_eq!(outcome, AdvanceOutcome::Rejected);
    }

    #[test]
    fn test_amount_out_of_range_rejected() {
        let mut flow = WizardFlow::new();
        let questions = wizard_questions();
        for question in &questions[..questions.len() - 1] {
            flow.answer(answer_for(question));
        }
        assert_eq!(flow.current_question().unwrap().id, "amount");

        let outcome = flow.answer(AnswerValue::Amount(1_000_001));
        assert_eq!(outcome, AdvanceOutcome::Rejected);
        assert_eq!(
            flow.state(),
            WizardState::AnsweringStep(questions.len() - 1)
        );
    }

    #[test]
    fn test_rating_above_max_rejected() {
        let mut flow = WizardFlow::new();
        for question in &wizard_questions()[..4] {
            flow.answer(answer_for(question));
        }
        assert_eq!(flow.current_question().unwrap().id, "min_rating");
        assert_eq!(flow.answer(AnswerValue::Rating(6)), AdvanceOutcome::Rejected);
        assert_eq!(flow.answer(AnswerValue::Rating(5)), AdvanceOutcome::Next(5));
    }

    #[test]
    fn test_answer_after_submission_rejected() {
        let mut flow = WizardFlow::new();
        for question in wizard_questions() {
            flow.answer(answer_for(question));
        }
        flow.mark_submitted();

        let outcome = flow.answer(AnswerValue::Amount(5_000));
        assert_eq!(outcome, AdvanceOutcome::Rejected);
        assert_eq!(flow.state(), WizardState::Submitted);
    }

    #[test]
    fn test_failed_submission_recovers_with_fallback() {
        let mut flow = WizardFlow::new();
        for question in wizard_questions() {
            flow.answer(answer_for(question));
        }
        flow.mark_failed();
        assert_eq!(flow.state(), WizardState::Failed);

        let matches = flow.recover_with_fallback();
        assert_eq!(flow.state(), WizardState::Submitted);

        // The canned list, exactly: same entries, same order
        let names: Vec<&str> = matches.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Nova Invest", "GreenCap", "Fortex"]);
        let scores: Vec<u8> = matches.iter().map(|m| m.match_score).collect();
        assert_eq!(scores, vec![85, 70, 60]);
    }

    #[test]
    fn test_fallback_is_deterministic_and_sorted() {
        assert_eq!(fallback_matches(), fallback_matches());
        for pair in fallback_matches().windows(2) {
            assert!(pair[0].match_score >= pair[1].match_score);
        }
        // Every entry carries the cost proxy the refinement round needs
        assert!(fallback_matches().iter().all(|m| m.details.tco.is_some()));
    }

    #[test]
    fn test_reset_discards_answers() {
        let mut flow = WizardFlow::new();
        for question in wizard_questions() {
            flow.answer(answer_for(question));
        }
        flow.mark_submitted();

        flow.reset();
        assert_eq!(flow.state(), WizardState::AnsweringStep(0));
        assert!(flow.answers().is_empty());
        assert!(!flow.is_complete());
    }

    #[test]
    fn test_progress_runs_to_completion() {
        let mut flow = WizardFlow::new();
        let mut last = 0;
        for question in wizard_questions() {
            let progress = flow.progress_percent();
            assert!(progress >= last, "progress should not move backwards");
            last = progress;
            flow.answer(answer_for(question));
        }
        assert_eq!(flow.progress_percent(), 100);
    }
}
