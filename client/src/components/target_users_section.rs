//! "Who We Serve" closing pitch.

use leptos::prelude::*;

#[component]
pub fn TargetUsersSection() -> impl IntoView {
    view! {
        <section class="panel target-users">
            <h2 class="section-title">"Who We Serve"</h2>
            <p class="target-users__body">
                "Trego is designed for university students, recreational players, sports clubs, and coaches \
                 seeking to grow their networks and find new opportunities to play."
            </p>
            <a href="/login" class="cta-button">
                "Join Trego Today"
            </a>
        </section>
    }
}
