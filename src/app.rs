use leptos::prelude::*;
use leptos_router::components::*;
use leptos_router::path;
use wasm_bindgen_futures::spawn_local;

use crate::commands;
use crate::components::navbar::Navbar;
use crate::pages::about::AboutPage;
use crate::pages::home::HomePage;
use crate::pages::report::ReportPage;
use crate::pages::results::ResultsPage;
use crate::pages::wizard::WizardPage;
use crate::theme::{apply_theme, ThemeContext};

#[component]
pub fn App() -> impl IntoView {
    let (theme, set_theme) = signal(String::from("system"));
    provide_context(ThemeContext { theme, set_theme });

    // Load saved theme preference on mount
    Effect::new(move |_| {
        spawn_local(async move {
            if let Ok(Some(saved)) = commands::get_preference("theme").await {
                set_theme.set(saved);
            }
        });
    });

    // Apply theme to DOM whenever the signal changes
    Effect::new(move |_| {
        let t = theme.get();
        apply_theme(&t);
    });

    view! {
        <Router>
            <div class="app-layout">
                <Navbar />
                <main class="content">
                    <Routes fallback=|| view! { <p>"Pagina niet gevonden"</p> }>
                        <Route path=path!("/") view=HomePage />
                        <Route path=path!("/wizard") view=WizardPage />
                        <Route path=path!("/results") view=ResultsPage />
                        <Route path=path!("/report") view=ReportPage />
                        <Route path=path!("/about") view=AboutPage />
                    </Routes>
                </main>
            </div>
        </Router>
    }
}
