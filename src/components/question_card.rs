use leptos::prelude::*;

use crate::components::amount_slider::AmountSlider;
use crate::flow::{AnswerValue, QuestionKind, QuestionSpec};

/// One wizard question. Single-choice questions advance on click;
/// rating and amount questions have an explicit "Volgende" button.
#[component]
pub fn QuestionCard(
    question: &'static QuestionSpec,
    #[prop(into)] on_answer: Callback<AnswerValue>,
) -> impl IntoView {
    view! {
        <div class="question-card">
            <h2>{question.title}</h2>
            <p class="question-description">{question.description}</p>

            {match question.kind {
                QuestionKind::SingleChoice { options } => view! {
                    <div class="question-options">
                        {options
                            .iter()
                            .map(|option| {
                                let value = option.value;
                                view! {
                                    <button
                                        class="question-option"
                                        on:click=move |_| {
                                            on_answer.run(AnswerValue::Choice(value.to_string()))
                                        }
                                    >
                                        {option.label}
                                    </button>
                                }
                            })
                            .collect_view()}
                    </div>
                }
                .into_any(),

                QuestionKind::Rating { max } => {
                    let (selected, set_selected) = signal(0u8);
                    view! {
                        <div class="question-rating">
                            <div class="rating-stars">
                                {(1..=max)
                                    .map(|star| {
                                        view! {
                                            <button
                                                class="rating-star"
                                                class:rating-star-active=move || { selected.get() >= star }
                                                on:click=move |_| set_selected.set(star)
                                            >
                                                "★"
                                            </button>
                                        }
                                    })
                                    .collect_view()}
                            </div>
                            <p class="rating-hint">
                                {move || {
                                    let value = selected.get();
                                    if value == 0 {
                                        "Geen minimum".to_string()
                                    } else {
                                        format!("Minimaal {} sterren", value)
                                    }
                                }}
                            </p>
                            <button
                                class="btn btn-primary"
                                on:click=move |_| on_answer.run(AnswerValue::Rating(selected.get()))
                            >
                                "Volgende"
                            </button>
                        </div>
                    }
                    .into_any()
                }

                QuestionKind::AmountSlider { default, .. } => {
                    let (amount, set_amount) = signal(default);
                    view! {
                        <div class="question-amount">
                            <AmountSlider
                                amount=amount
                                on_change=move |value: u64| set_amount.set(value)
                            />
                            <button
                                class="btn btn-primary"
                                on:click=move |_| on_answer.run(AnswerValue::Amount(amount.get()))
                            >
                                "Volgende"
                            </button>
                        </div>
                    }
                    .into_any()
                }
            }}
        </div>
    }
}
