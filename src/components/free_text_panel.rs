use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::commands::{self, MatchResult, PreferenceRecord};
use crate::refine::{clarification_payload, ClarificationAction};

/// Free-text refinement: the user describes what should change in their
/// own words. Three outcomes come back from the interpretation call:
/// a direct match update, one or more clarification prompts (each a
/// fixed 3-option chooser requiring a second round-trip), or an error
/// that leaves everything untouched.
#[component]
pub fn FreeTextPanel(
    #[prop(into)] preferences: Signal<PreferenceRecord>,
    #[prop(into)] matches: Signal<Vec<MatchResult>>,
    #[prop(into)] on_matches: Callback<Vec<MatchResult>>,
    #[prop(into)] on_preferences: Callback<PreferenceRecord>,
) -> impl IntoView {
    let text = RwSignal::new(String::new());
    let (processing, set_processing) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let clarifications: RwSignal<Vec<String>> = RwSignal::new(Vec::new());
    let (reasoning, set_reasoning) = signal::<Option<String>>(None);
    let (notice, set_notice) = signal::<Option<String>>(None);

    let submit_text = move |_| {
        let input = text.get();
        if input.trim().is_empty() || processing.get() {
            return;
        }
        set_error.set(None);
        set_notice.set(None);
        set_processing.set(true);

        let prefs = preferences.get_untracked();
        spawn_local(async move {
            match commands::process_text_and_match(input, prefs).await {
                Ok(outcome) => {
                    if !outcome.clarifications.is_empty() {
                        // Suspend: nothing applies until the user answers
                        clarifications.set(outcome.clarifications);
                        set_reasoning.set(Some(outcome.reasoning));
                    } else {
                        if let Some(new_matches) = outcome.matches {
                            on_matches.run(new_matches);
                        }
                        if let Some(new_preferences) = outcome.updated_preferences {
                            on_preferences.run(new_preferences);
                        }
                        if outcome.preferences_changed {
                            set_notice.set(Some(
                                "Je voorkeuren zijn aangepast en de matches zijn vernieuwd."
                                    .to_string(),
                            ));
                        }
                        text.set(String::new());
                    }
                }
                Err(e) => set_error.set(Some(e)),
            }
            set_processing.set(false);
        });
    };

    let answer_clarification = move |index: usize, action: ClarificationAction| {
        let Some(clarification) = clarifications.get_untracked().get(index).cloned() else {
            return;
        };

        if action == ClarificationAction::Cancel {
            clarifications.update(|list| {
                list.remove(index);
            });
            return;
        }

        set_error.set(None);
        set_processing.set(true);
        let payload = clarification_payload(action, &clarification, &matches.get_untracked());
        let prefs = preferences.get_untracked();

        spawn_local(async move {
            match commands::process_clarification(
                format!("clarification_{}", index),
                payload,
                prefs,
            )
            .await
            {
                Ok(outcome) => {
                    on_matches.run(outcome.matches);
                    if outcome.filter_active {
                        set_notice.set(outcome.applied_filter);
                    }
                    clarifications.update(|list| {
                        if index < list.len() {
                            list.remove(index);
                        }
                    });
                }
                Err(e) => set_error.set(Some(e)),
            }
            set_processing.set(false);
        });
    };

    view! {
        <div class="free-text-panel">
            <h2>"Nog iets kwijt?"</h2>
            <p class="panel-hint">
                "Beschrijf in je eigen woorden wat je belangrijk vindt, dan passen we de matches aan."
            </p>

            <textarea
                class="free-text-input"
                placeholder="Bijvoorbeeld: ik wil vooral lage kosten en een kantoor in de buurt"
                prop:value=move || text.get()
                on:input=move |ev| text.set(event_target_value(&ev))
                disabled=move || processing.get()
            ></textarea>

            <div class="free-text-actions">
                <button
                    class="btn btn-primary"
                    on:click=submit_text
                    disabled=move || processing.get() || text.get().trim().is_empty()
                >
                    {move || if processing.get() { "Verwerken..." } else { "Pas matches aan" }}
                </button>
            </div>

            {move || error.get().map(|e| view! {
                <div class="error-message">
                    <strong>"Er ging iets mis: "</strong>
                    {e}
                    <button class="btn-link" on:click=move |_| set_error.set(None)>
                        "Sluiten"
                    </button>
                </div>
            })}

            {move || notice.get().map(|message| view! {
                <div class="notice-message">{message}</div>
            })}

            <Show when=move || !clarifications.get().is_empty()>
                <div class="clarifications">
                    <h3>"Even verduidelijken"</h3>
                    {move || reasoning.get().map(|r| view! {
                        <p class="panel-hint">{r}</p>
                    })}
                    {move || {
                        clarifications
                            .get()
                            .iter()
                            .enumerate()
                            .map(|(index, clarification)| {
                                view! {
                                    <div class="clarification">
                                        <p class="clarification-prompt">{clarification.clone()}</p>
                                        <div class="clarification-options">
                                            {ClarificationAction::all()
                                                .into_iter()
                                                .map(|action| {
                                                    view! {
                                                        <button
                                                            class="refine-option"
                                                            disabled=move || processing.get()
                                                            on:click=move |_| {
                                                                answer_clarification(index, action)
                                                            }
                                                        >
                                                            {action.label()}
                                                        </button>
                                                    }
                                                })
                                                .collect_view()}
                                        </div>
                                    </div>
                                }
                            })
                            .collect_view()
                    }}
                </div>
            </Show>
        </div>
    }
}
