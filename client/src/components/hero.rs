//! Landing hero with the primary call to action.

use leptos::prelude::*;

#[component]
pub fn Hero() -> impl IntoView {
    view! {
        <section class="hero">
            <h1 class="hero__title">"Trego"</h1>
            <p class="hero__tagline">"Your Hub for Sports Connections"</p>
            <p class="hero__lead">
                "Connect with players, teams, clubs, and coaches all in one place. Find reliable teammates, \
                 discover tryout opportunities, and build lasting sports connections."
            </p>
            <a href="/login" class="cta-button">
                "Get Started"
            </a>
        </section>
    }
}
