use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::commands::{self, PreferenceRecord};

fn valid_email(email: &str) -> bool {
    let trimmed = email.trim();
    match trimmed.split_once('@') {
        Some((user, domain)) => !user.is_empty() && domain.contains('.') && !domain.ends_with('.'),
        None => false,
    }
}

/// Modal lead-capture form for one provider. Submission is one-shot:
/// success shows a confirmation, failure an inline error, and the rest
/// of the page is left alone.
#[component]
pub fn LeadForm(
    provider_name: String,
    guidance: bool,
    #[prop(into)] preferences: Signal<PreferenceRecord>,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let email = RwSignal::new(String::new());
    let name = RwSignal::new(String::new());
    let wants_guidance = RwSignal::new(guidance);
    let (error, set_error) = signal::<Option<String>>(None);
    let (submitting, set_submitting) = signal(false);
    let (submitted, set_submitted) = signal(false);

    let provider_for_title = provider_name.clone();
    let provider_for_confirm = provider_name.clone();

    let submit = move |_| {
        let address = email.get();
        if !valid_email(&address) {
            set_error.set(Some("Voer een geldig e-mailadres in".to_string()));
            return;
        }
        set_error.set(None);
        set_submitting.set(true);

        let full_name = name.get();
        let interest = wants_guidance.get();
        let prefs = preferences.get_untracked();
        spawn_local(async move {
            match commands::submit_lead(address, full_name, interest, prefs).await {
                Ok(()) => set_submitted.set(true),
                Err(e) => set_error.set(Some(e)),
            }
            set_submitting.set(false);
        });
    };

    view! {
        <div class="modal-backdrop">
            <div class="modal lead-form">
                <style>{include_str!("lead_form.css")}</style>

                <Show
                    when=move || submitted.get()
                    fallback=move || {
                        let title = if guidance {
                            format!("Vraag begeleiding aan bij {}", provider_for_title)
                        } else {
                            format!("Neem contact op met {}", provider_for_title)
                        };
                        view! {
                            <h3>{title}</h3>
                            <p class="panel-hint">
                                "Laat je gegevens achter en we nemen zo snel mogelijk contact met je op."
                            </p>

                            <label>"E-mailadres *"</label>
                            <input
                                type="email"
                                class="input"
                                placeholder="jouw@email.be"
                                prop:value=move || email.get()
                                on:input=move |ev| email.set(event_target_value(&ev))
                            />

                            <label>"Naam (optioneel)"</label>
                            <input
                                type="text"
                                class="input"
                                placeholder="Voornaam Achternaam"
                                prop:value=move || name.get()
                                on:input=move |ev| name.set(event_target_value(&ev))
                            />

                            <label class="checkbox-row">
                                <input
                                    type="checkbox"
                                    prop:checked=move || wants_guidance.get()
                                    on:change=move |_| wants_guidance.update(|v| *v = !*v)
                                />
                                "Ik wil graag persoonlijke begeleiding bij mijn keuze"
                            </label>

                            <p class="privacy-note">
                                "Je gegevens worden vertrouwelijk behandeld en niet gedeeld met derden."
                            </p>

                            {move || error.get().map(|e| view! {
                                <div class="error-message">{e}</div>
                            })}

                            <div class="modal-actions">
                                <button class="btn btn-secondary" on:click=move |_| on_close.run(())>
                                    "Annuleren"
                                </button>
                                <button
                                    class="btn btn-primary"
                                    on:click=submit
                                    disabled=move || submitting.get()
                                >
                                    {move || if submitting.get() { "Versturen..." } else { "Versturen" }}
                                </button>
                            </div>
                        }
                    }
                >
                    <h3>"Bedankt!"</h3>
                    <p>
                        {format!(
                            "Je aanvraag voor {} is ontvangen. We nemen snel contact met je op.",
                            provider_for_confirm
                        )}
                    </p>
                    <div class="modal-actions">
                        <button class="btn btn-primary" on:click=move |_| on_close.run(())>
                            "Sluiten"
                        </button>
                    </div>
                </Show>
            </div>
        </div>
    }
}
