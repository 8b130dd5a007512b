use leptos::prelude::*;

use crate::slider_scale::{amount_to_position, clamp_amount, position_to_amount, MAX_AMOUNT};

/// Format a whole-euro amount with Dutch thousands separators.
pub fn format_euro(amount: u64) -> String {
    let digits = amount.to_string();
    let mut formatted = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            formatted.push('.');
        }
        formatted.push(c);
    }
    formatted
}

/// Amount slider on the hybrid linear/log scale, with a direct numeric
/// entry field that bypasses the slider (clamped, then mapped back to a
/// position; the round-trip is lossy by design, see `slider_scale`).
#[component]
pub fn AmountSlider(
    #[prop(into)] amount: Signal<u64>,
    #[prop(into)] on_change: Callback<u64>,
) -> impl IntoView {
    let (show_entry, set_show_entry) = signal(false);
    let (entry_text, set_entry_text) = signal(String::new());

    let apply_entry = move || {
        let parsed = entry_text.get().replace('.', "").trim().parse::<i64>();
        if let Ok(value) = parsed {
            on_change.run(clamp_amount(value));
        }
        set_show_entry.set(false);
    };

    view! {
        <div class="amount-slider">
            <input
                type="range"
                min="0"
                max="100"
                step="0.5"
                prop:value=move || amount_to_position(amount.get()).to_string()
                on:input=move |ev| {
                    if let Ok(position) = event_target_value(&ev).parse::<f64>() {
                        on_change.run(position_to_amount(position));
                    }
                }
            />
            <div class="amount-slider-bounds">
                <span>"€0"</span>
                <span>{format!("€{}", format_euro(MAX_AMOUNT))}</span>
            </div>

            <div class="amount-slider-value">
                <span class="amount-display">
                    {move || format!("€{}", format_euro(amount.get()))}
                </span>
                <button
                    class="btn-link"
                    on:click=move |_| {
                        set_entry_text.set(amount.get().to_string());
                        set_show_entry.set(true);
                    }
                >
                    "Zelf invullen"
                </button>
            </div>

            <Show when=move || show_entry.get()>
                <div class="amount-entry">
                    <input
                        type="text"
                        class="input"
                        inputmode="numeric"
                        prop:value=move || entry_text.get()
                        on:input=move |ev| set_entry_text.set(event_target_value(&ev))
                        on:keydown=move |ev| {
                            if ev.key() == "Enter" {
                                apply_entry();
                            }
                        }
                    />
                    <button class="btn btn-secondary" on:click=move |_| apply_entry()>
                        "Ok"
                    </button>
                </div>
            </Show>
        </div>
    }
}
