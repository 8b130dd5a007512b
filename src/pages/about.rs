use leptos::prelude::*;

#[component]
pub fn AboutPage() -> impl IntoView {
    view! {
        <div class="page about-page">
            <h1>"Over BeleggingsMatch"</h1>
            <p>
                "BeleggingsMatch helpt je in enkele minuten de Belgische \
                 beleggingsdienst te vinden die bij jouw situatie past. We \
                 vergelijken aanbieders op kosten, begeleiding, duurzaamheid \
                 en functionaliteiten, en rangschikken ze op basis van jouw \
                 antwoorden."
            </p>
            <p>
                "De vergelijking is onafhankelijk: we tonen de sterke en \
                 zwakke punten van elke aanbieder, ook als die minder goed \
                 uitkomen. Twijfel je na de test nog? Verfijn je resultaten \
                 met extra vragen of beschrijf in je eigen woorden wat je \
                 belangrijk vindt."
            </p>
            <p>
                <a href="/wizard" class="btn btn-primary">
                    "Start de test"
                </a>
            </p>
        </div>
    }
}
