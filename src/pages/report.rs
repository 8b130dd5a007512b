use leptos::logging::warn;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use wasm_bindgen_futures::spawn_local;

use crate::commands::{self, ReportOutcome};

#[derive(Debug, Clone)]
enum ReportState {
    Generating,
    Ready(ReportOutcome),
    Error(String),
}

/// Report page: requests generation for the stored session on mount.
/// Without a session the user is sent back to the start.
#[component]
pub fn ReportPage() -> impl IntoView {
    let navigate = use_navigate();
    let (state, set_state) = signal(ReportState::Generating);

    {
        let navigate = navigate.clone();
        Effect::new(move |_| {
            let navigate = navigate.clone();
            spawn_local(async move {
                let snapshot = match commands::load_session().await {
                    Ok(Some(snapshot)) => snapshot,
                    Ok(None) => {
                        navigate("/", Default::default());
                        return;
                    }
                    Err(e) => {
                        warn!("Failed to load session: {}", e);
                        navigate("/", Default::default());
                        return;
                    }
                };

                match commands::generate_report(snapshot.preferences, snapshot.matches).await {
                    Ok(outcome) => set_state.set(ReportState::Ready(outcome)),
                    Err(e) => set_state.set(ReportState::Error(e)),
                }
            });
        });
    }

    view! {
        <div class="page report-page">
            <style>{include_str!("report.css")}</style>

            {move || match state.get() {
                ReportState::Generating => view! {
                    <div class="report-loading">
                        <div class="spinner"></div>
                        <h2>"Je rapport wordt gegenereerd..."</h2>
                        <p class="panel-hint">"Dit kan tot een halve minuut duren."</p>
                        <a href="/results" class="btn-link">
                            "Terug naar de resultaten"
                        </a>
                    </div>
                }
                .into_any(),

                ReportState::Ready(outcome) => view! {
                    <div class="report-ready">
                        <h1>"Je persoonlijke beleggingsrapport is klaar!"</h1>
                        <p class="panel-hint">
                            {format!("Gegenereerd op {}", outcome.generated_at)}
                        </p>

                        {outcome.content.clone().map(|content| view! {
                            <pre class="report-body">{content}</pre>
                        })}

                        {outcome.url.clone().map(|url| view! {
                            <p class="report-download">
                                <a href=url target="_blank" class="btn btn-primary">
                                    "Download het rapport"
                                </a>
                            </p>
                        })}

                        <div class="report-next-steps">
                            <h3>"Volgende stappen"</h3>
                            <ul>
                                <li>"Bestudeer het rapport en de aanbevelingen"</li>
                                <li>"Neem contact op met de aanbevolen beleggingspartners"</li>
                                <li>"Plan een persoonlijk gesprek voor een gedetailleerde analyse"</li>
                            </ul>
                        </div>

                        <a href="/results" class="btn btn-secondary">
                            "Terug naar de resultaten"
                        </a>
                    </div>
                }
                .into_any(),

                ReportState::Error(message) => view! {
                    <div class="report-error">
                        <h2>"Rapport genereren mislukt"</h2>
                        <p class="error-message">{message}</p>
                        <a href="/results" class="btn btn-secondary">
                            "Terug naar de resultaten"
                        </a>
                    </div>
                }
                .into_any(),
            }}
        </div>
    }
}
