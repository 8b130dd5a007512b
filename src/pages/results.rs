use leptos::logging::{log, warn};
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use wasm_bindgen_futures::spawn_local;

use crate::commands::{self, Insights, MatchResult, PreferenceRecord};
use crate::components::free_text_panel::FreeTextPanel;
use crate::components::lead_form::LeadForm;
use crate::components::match_card::MatchCard;
use crate::components::refine_panel::RefinePanel;
use crate::refine::build_refinement;

/// Results view: the top-3 match cards plus every way to act on them —
/// scenario follow-up questions, free-text refinement, lead capture and
/// the report entry point.
///
/// Reaching this page without a stored session redirects to the start;
/// there is nothing to show without a completed wizard run.
#[component]
pub fn ResultsPage() -> impl IntoView {
    let navigate = use_navigate();
    let preferences: RwSignal<PreferenceRecord> = RwSignal::new(PreferenceRecord::new());
    let matches: RwSignal<Vec<MatchResult>> = RwSignal::new(Vec::new());
    let (loaded, set_loaded) = signal(false);
    let (insights, set_insights) = signal::<Option<Insights>>(None);
    let (recalculating, set_recalculating) = signal(false);
    let (refine_error, set_refine_error) = signal::<Option<String>>(None);
    let (refine_dismissed, set_refine_dismissed) = signal(false);
    let (lead_target, set_lead_target) = signal::<Option<(String, bool)>>(None);
    let (redirect, set_redirect) = signal::<Option<String>>(None);

    // Navigation happens through this signal so async handlers only need
    // to touch reactive state.
    Effect::new(move |_| {
        if let Some(path) = redirect.get() {
            navigate(&path, Default::default());
        }
    });

    Effect::new(move |_| {
        spawn_local(async move {
            match commands::load_session().await {
                Ok(Some(snapshot)) => {
                    preferences.set(snapshot.preferences.clone());
                    matches.set(snapshot.matches.clone());
                    set_loaded.set(true);

                    // Insights are garnish: fetch after the matches are
                    // on screen, ignore failures entirely.
                    if !snapshot.matches.is_empty() {
                        match commands::generate_insights(snapshot.preferences, snapshot.matches)
                            .await
                        {
                            Ok(generated) => set_insights.set(Some(generated)),
                            Err(e) => warn!("Insights unavailable: {}", e),
                        }
                    }
                }
                Ok(None) => set_redirect.set(Some("/".to_string())),
                Err(e) => {
                    warn!("Failed to load session: {}", e);
                    set_redirect.set(Some("/".to_string()));
                }
            }
        });
    });

    let on_recalculate = Callback::new(move |impacts: Vec<serde_json::Value>| {
        if recalculating.get_untracked() {
            return;
        }
        set_refine_error.set(None);
        set_recalculating.set(true);

        let prefs = preferences.get_untracked();
        spawn_local(async move {
            match commands::recalculate_matches(prefs, impacts).await {
                Ok(outcome) if outcome.restart => {
                    // Control signal instead of matches: back to step 0
                    set_redirect.set(Some("/wizard".to_string()));
                }
                Ok(outcome) => {
                    log!(
                        "Herberekening gaf {} resultaten ({} gevonden in totaal)",
                        outcome.matches.len(),
                        outcome.total_found
                    );
                    matches.set(outcome.matches);
                    if let Some(modified) = outcome.modified_preferences {
                        preferences.set(modified);
                    }
                    set_refine_dismissed.set(false);
                }
                Err(e) => set_refine_error.set(Some(e)),
            }
            set_recalculating.set(false);
        });
    });

    let on_new_matches = Callback::new(move |replacement: Vec<MatchResult>| {
        matches.set(replacement);
        set_refine_dismissed.set(false);
    });
    let on_new_preferences = Callback::new(move |replacement: PreferenceRecord| {
        preferences.set(replacement);
    });

    let on_contact = Callback::new(move |name: String| {
        set_lead_target.set(Some((name, false)));
    });
    let on_guidance = Callback::new(move |name: String| {
        set_lead_target.set(Some((name, true)));
    });

    view! {
        <div class="page results-page">
            <style>{include_str!("results.css")}</style>

            <Show
                when=move || loaded.get()
                fallback=|| view! {
                    <div class="results-loading">
                        <div class="spinner"></div>
                        <h2>"Resultaten laden..."</h2>
                        <p class="panel-hint">
                            "We zoeken de beste beleggingspartners op basis van je criteria."
                        </p>
                    </div>
                }
            >
                <header class="results-header">
                    <h1>"Jouw top 3 beleggingspartners"</h1>
                    <p class="panel-hint">
                        "Gebaseerd op je antwoorden hebben we deze matches voor jou gevonden. \
                         Vergelijk de opties en kies de partner die het beste bij jou past."
                    </p>
                </header>

                // Scenario follow-up round
                {move || {
                    if refine_dismissed.get() {
                        return None;
                    }
                    build_refinement(&matches.get()).map(|prompt| view! {
                        <RefinePanel
                            prompt=prompt
                            recalculating=recalculating
                            on_recalculate=on_recalculate
                            on_dismiss=Callback::new(move |_| set_refine_dismissed.set(true))
                        />
                    })
                }}

                {move || refine_error.get().map(|e| view! {
                    <div class="error-message">
                        <strong>"Herberekenen lukte niet: "</strong>
                        {e}
                        <button class="btn-link" on:click=move |_| set_refine_error.set(None)>
                            "Sluiten"
                        </button>
                    </div>
                })}

                <div class="match-grid">
                    {move || {
                        matches
                            .get()
                            .iter()
                            .take(3)
                            .map(|result| view! {
                                <MatchCard
                                    result=result.clone()
                                    on_contact=on_contact
                                    on_guidance=on_guidance
                                />
                            })
                            .collect_view()
                    }}
                </div>

                {move || insights.get().map(|block| view! {
                    <div class="insights-panel">
                        <h2>"Wat valt op"</h2>
                        <p>{block.key_insight.clone()}</p>
                        <p>{block.trade_offs.clone()}</p>
                        <p>{block.priority_analysis.clone()}</p>
                    </div>
                })}

                <FreeTextPanel
                    preferences=preferences
                    matches=matches
                    on_matches=on_new_matches
                    on_preferences=on_new_preferences
                />

                <footer class="results-footer">
                    <a href="/" class="btn btn-secondary">"Terug naar start"</a>
                    <a href="/wizard" class="btn btn-secondary">"Opnieuw beginnen"</a>
                    <a href="/report" class="btn btn-primary">"Rapport genereren"</a>
                </footer>
            </Show>

            {move || lead_target.get().map(|(name, guidance)| view! {
                <LeadForm
                    provider_name=name
                    guidance=guidance
                    preferences=preferences
                    on_close=Callback::new(move |_| set_lead_target.set(None))
                />
            })}
        </div>
    }
}
