//! Fallback page for paths outside the route table.

use leptos::prelude::*;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="not-found-page">
            <h1>"Page not found."</h1>
            <a href="/" class="cta-button">
                "Back to Trego"
            </a>
        </div>
    }
}
