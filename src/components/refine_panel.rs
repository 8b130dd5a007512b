use std::collections::HashMap;

use leptos::prelude::*;

use crate::refine::{merge_impacts, recalculation_enabled, ImpactDelta, RefinementPrompt};

/// Scenario-driven follow-up questions under the match grid.
///
/// Every generated question must be answered before the recalculate
/// action enables; a partial answer set keeps the button disabled
/// instead of producing an error. The parent recreates this panel
/// whenever the match list changes, so the answer state never outlives
/// the list it was generated from.
#[component]
pub fn RefinePanel(
    prompt: RefinementPrompt,
    #[prop(into)] recalculating: Signal<bool>,
    #[prop(into)] on_recalculate: Callback<Vec<serde_json::Value>>,
    #[prop(into)] on_dismiss: Callback<()>,
) -> impl IntoView {
    let selected: RwSignal<HashMap<String, usize>> = RwSignal::new(HashMap::new());
    let total_questions = prompt.questions.len();
    let questions_for_submit = prompt.questions.clone();

    let submit = move |_| {
        let chosen = selected.get();
        let picked: Vec<Vec<ImpactDelta>> = questions_for_submit
            .iter()
            .filter_map(|question| {
                chosen
                    .get(question.id)
                    .map(|&index| question.options[index].impacts.clone())
            })
            .collect();
        if picked.len() != total_questions {
            return;
        }
        on_recalculate.run(merge_impacts(picked.iter().map(|deltas| deltas.as_slice())));
    };

    let ready = move || {
        recalculation_enabled(selected.get().len(), total_questions) && !recalculating.get()
    };

    view! {
        <div class=format!("refine-panel {}", prompt.scenario.urgency_class())>
            <style>{include_str!("refine_panel.css")}</style>

            <div class="refine-header">
                <div>
                    <h2>{prompt.title.clone()}</h2>
                    <p class="refine-description">{prompt.description.clone()}</p>
                </div>
                <button class="btn-close" on:click=move |_| on_dismiss.run(())>
                    "✕"
                </button>
            </div>

            {prompt
                .questions
                .iter()
                .map(|question| {
                    let question_id = question.id.to_string();
                    view! {
                        <div class="refine-question">
                            <h3>{question.prompt.clone()}</h3>
                            <div class="refine-options">
                                {question
                                    .options
                                    .iter()
                                    .enumerate()
                                    .map(|(index, option)| {
                                        let id_for_click = question_id.clone();
                                        let id_for_class = question_id.clone();
                                        view! {
                                            <button
                                                class="refine-option"
                                                class:refine-option-selected=move || {
                                                    selected.get().get(&id_for_class) == Some(&index)
                                                }
                                                value=option.id
                                                on:click=move |_| {
                                                    selected.update(|map| {
                                                        map.insert(id_for_click.clone(), index);
                                                    });
                                                }
                                            >
                                                {option.label.clone()}
                                            </button>
                                        }
                                    })
                                    .collect_view()}
                            </div>
                        </div>
                    }
                })
                .collect_view()}

            <div class="refine-actions">
                <button class="btn-link" on:click=move |_| on_dismiss.run(())>
                    "Overslaan"
                </button>
                <button
                    class="btn btn-primary"
                    disabled=move || !ready()
                    on:click=submit
                >
                    {move || {
                        if recalculating.get() {
                            "Herberekenen..."
                        } else {
                            "Herbereken matches"
                        }
                    }}
                </button>
            </div>
        </div>
    }
}
