use leptos::prelude::*;

/// Thin progress bar for the wizard, `percent` in 0-100.
#[component]
pub fn ProgressBar(#[prop(into)] percent: Signal<u8>) -> impl IntoView {
    view! {
        <div class="progress-bar">
            <div
                class="progress-bar-fill"
                style:width=move || format!("{}%", percent.get())
            ></div>
        </div>
    }
}
