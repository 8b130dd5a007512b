use leptos::logging::warn;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::commands;
use crate::theme::ThemeContext;

#[component]
pub fn Navbar() -> impl IntoView {
    let theme = use_context::<ThemeContext>();

    let cycle_theme = move |_| {
        if let Some(ctx) = theme {
            let next = match ctx.theme.get().as_str() {
                "light" => "dark",
                "dark" => "system",
                _ => "light",
            };
            ctx.set_theme.set(next.to_string());
            spawn_local(async move {
                if let Err(e) = commands::set_preference("theme", next).await {
                    warn!("Failed to save theme preference: {}", e);
                }
            });
        }
    };

    let theme_label = move || {
        theme
            .map(|ctx| match ctx.theme.get().as_str() {
                "light" => "Licht",
                "dark" => "Donker",
                _ => "Auto",
            })
            .unwrap_or("Auto")
    };

    view! {
        <nav class="navbar">
            <a href="/" class="navbar-brand">"BeleggingsMatch"</a>
            <div class="navbar-links">
                <a href="/">"Home"</a>
                <a href="/wizard">"Start de test"</a>
                <a href="/about">"Over ons"</a>
                <button class="btn-link" on:click=cycle_theme title="Thema wisselen">
                    {theme_label}
                </button>
            </div>
        </nav>
    }
}
