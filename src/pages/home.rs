use leptos::prelude::*;

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div class="page home-page">
            <style>{include_str!("home.css")}</style>

            <section class="hero">
                <h1>"Vind de beleggingspartner die bij je past"</h1>
                <p class="hero-subtitle">
                    "Beantwoord een paar korte vragen en ontdek welke Belgische \
                     beleggingsdiensten het beste aansluiten bij jouw doelen, \
                     horizon en budget."
                </p>
                <a href="/wizard" class="btn btn-primary btn-large">
                    "Start de test"
                </a>
            </section>

            <section class="how-it-works">
                <h2>"Hoe werkt het?"</h2>
                <div class="steps">
                    <div class="step">
                        <span class="step-number">"1"</span>
                        <h3>"Beantwoord de vragen"</h3>
                        <p>"Zes korte vragen over je doel, horizon en voorkeuren."</p>
                    </div>
                    <div class="step">
                        <span class="step-number">"2"</span>
                        <h3>"Bekijk je top 3"</h3>
                        <p>"We rangschikken de aanbieders die het beste bij je passen."</p>
                    </div>
                    <div class="step">
                        <span class="step-number">"3"</span>
                        <h3>"Verfijn en vergelijk"</h3>
                        <p>
                            "Stel bij met extra vragen of vrije tekst en ontvang een \
                             persoonlijk rapport."
                        </p>
                    </div>
                </div>
            </section>
        </div>
    }
}
