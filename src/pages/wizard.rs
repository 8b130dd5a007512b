use leptos::logging::{log, warn};
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use wasm_bindgen_futures::spawn_local;

use crate::commands::{self, PreferenceRecord};
use crate::components::progress_bar::ProgressBar;
use crate::components::question_card::QuestionCard;
use crate::flow::{AdvanceOutcome, AnswerValue, WizardFlow, WizardState};

/// The questionnaire wizard. One question at a time; the final answer
/// freezes the preference record and submits it for matching.
///
/// Every submission carries a sequence number. A response only counts if
/// no newer action (cancel, re-submit) happened in between; late arrivals
/// for a superseded request are dropped on the floor.
#[component]
pub fn WizardPage() -> impl IntoView {
    let navigate = use_navigate();
    let (flow, set_flow) = signal(WizardFlow::new());
    let request_seq = StoredValue::new(0u64);
    let (redirect, set_redirect) = signal::<Option<String>>(None);

    // Navigation happens through this signal so async handlers only need
    // to touch reactive state.
    Effect::new(move |_| {
        if let Some(path) = redirect.get() {
            navigate(&path, Default::default());
        }
    });

    // A wizard run starts from a clean slate: previous session records
    // are overwritten, not extended.
    Effect::new(move |_| {
        spawn_local(async move {
            if let Err(e) = commands::clear_session().await {
                warn!("Failed to clear previous session: {}", e);
            }
        });
    });

    let submit = move |preferences: PreferenceRecord| {
        let seq = request_seq.get_value() + 1;
        request_seq.set_value(seq);

        spawn_local(async move {
            match commands::match_services(preferences.clone()).await {
                Ok(outcome) if !outcome.matches.is_empty() => {
                    if request_seq.get_value() != seq {
                        // Superseded by a cancel; the fallback already won
                        return;
                    }
                    log!(
                        "Matching gaf {} resultaten ({} gevonden in totaal)",
                        outcome.matches.len(),
                        outcome.total_found
                    );
                    set_flow.update(|f| f.mark_submitted());
                    set_redirect.set(Some("/results".to_string()));
                }
                other => {
                    if request_seq.get_value() != seq {
                        return;
                    }
                    match other {
                        Err(e) => warn!("Matching failed, substituting fallback list: {}", e),
                        Ok(_) => warn!("Matching returned an empty list, substituting fallback"),
                    }
                    let mut fallback = Vec::new();
                    set_flow.update(|f| {
                        f.mark_failed();
                        fallback = f.recover_with_fallback();
                    });
                    if let Err(e) = commands::save_session(preferences, fallback).await {
                        warn!("Failed to store fallback session: {}", e);
                    }
                    set_redirect.set(Some("/results".to_string()));
                }
            }
        });
    };

    let on_answer = Callback::new(move |value: AnswerValue| {
        let mut outcome = AdvanceOutcome::Rejected;
        set_flow.update(|f| outcome = f.answer(value));
        match outcome {
            AdvanceOutcome::Rejected => {
                warn!("Answer outside the active question's domain, ignoring");
            }
            AdvanceOutcome::Next(_) => {}
            AdvanceOutcome::ReadyToSubmit => {
                let preferences = flow.get_untracked().answers().clone();
                submit(preferences);
            }
        }
    });

    // User-initiated cancel of a pending submission: invalidate the
    // in-flight request and force the fallback immediately.
    let cancel = move |_| {
        request_seq.set_value(request_seq.get_value() + 1);
        let preferences = flow.get_untracked().answers().clone();
        let mut fallback = Vec::new();
        set_flow.update(|f| fallback = f.recover_with_fallback());
        spawn_local(async move {
            if let Err(e) = commands::save_session(preferences, fallback).await {
                warn!("Failed to store fallback session: {}", e);
            }
            set_redirect.set(Some("/results".to_string()));
        });
    };

    view! {
        <div class="page wizard-page">
            <style>{include_str!("wizard.css")}</style>

            {move || match flow.get().state() {
                WizardState::AnsweringStep(index) => {
                    let current = flow.get();
                    let question = current
                        .current_question()
                        .expect("answering state always has a question");
                    view! {
                        <ProgressBar percent=Signal::derive(move || flow.get().progress_percent()) />
                        <p class="wizard-step-counter">
                            {format!("Vraag {} van {}", index + 1, current.question_count())}
                        </p>
                        <QuestionCard question=question on_answer=on_answer />
                    }
                    .into_any()
                }

                WizardState::Submitting | WizardState::Failed => view! {
                    <div class="wizard-submitting">
                        <div class="spinner"></div>
                        <h2>"We zoeken je beste matches..."</h2>
                        <p class="panel-hint">
                            "Dit duurt normaal maar een paar seconden."
                        </p>
                        <button class="btn btn-secondary" on:click=cancel>
                            "Toon alvast resultaten"
                        </button>
                    </div>
                }
                .into_any(),

                WizardState::Submitted => view! {
                    <div class="wizard-submitting">
                        <div class="spinner"></div>
                        <p>"Resultaten worden geladen..."</p>
                    </div>
                }
                .into_any(),
            }}
        </div>
    }
}
