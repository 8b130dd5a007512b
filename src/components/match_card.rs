use leptos::prelude::*;

use crate::commands::MatchResult;

/// One provider card in the top-3 grid: score, rating, strengths,
/// weaknesses, and the two lead actions.
#[component]
pub fn MatchCard(
    result: MatchResult,
    #[prop(into)] on_contact: Callback<String>,
    #[prop(into)] on_guidance: Callback<String>,
) -> impl IntoView {
    let name_for_contact = result.name.clone();
    let name_for_guidance = result.name.clone();
    let stars: String = "★".repeat(result.rating as usize);

    view! {
        <div class="match-card">
            <style>{include_str!("match_card.css")}</style>

            <div class="match-card-header">
                <span class="match-score-label">"Matchscore"</span>
                <span class="match-score">{format!("{}%", result.match_score)}</span>
            </div>

            {(result.rating > 0).then(|| view! {
                <div class="match-rating">
                    <span class="match-score-label">"Beoordeling"</span>
                    <span class="match-stars">{stars.clone()}</span>
                </div>
            })}

            <h3 class="match-name">{result.name.clone()}</h3>
            <p class="match-description">{result.description.clone()}</p>

            <div class="match-points">
                <h4>"Sterke punten"</h4>
                <ul class="match-strengths">
                    {result
                        .strengths
                        .iter()
                        .map(|point| view! { <li>{point.clone()}</li> })
                        .collect_view()}
                </ul>
            </div>

            {(!result.weaknesses.is_empty()).then(|| view! {
                <div class="match-points">
                    <h4>"Aandachtspunten"</h4>
                    <ul class="match-weaknesses">
                        {result
                            .weaknesses
                            .iter()
                            .map(|point| view! { <li>{point.clone()}</li> })
                            .collect_view()}
                    </ul>
                </div>
            })}

            <div class="match-card-actions">
                <button
                    class="btn btn-primary"
                    on:click=move |_| on_contact.run(name_for_contact.clone())
                >
                    "Ik neem contact op"
                </button>
                <button
                    class="btn btn-secondary"
                    on:click=move |_| on_guidance.run(name_for_guidance.clone())
                >
                    "Ik wens begeleiding"
                </button>
            </div>
        </div>
    }
}
