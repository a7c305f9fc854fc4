//! "How Trego Helps" feature cards.

use leptos::prelude::*;

/// `(title, body)` per feature card.
pub const FEATURES: [(&str, &str); 4] = [
    (
        "For Players",
        "Create profiles showcasing your sports, skill levels, and availability. Find compatible teammates \
         through smart matchmaking algorithms.",
    ),
    (
        "For Teams & Clubs",
        "Post openings, schedule tryouts, and manage substitutions all in one place. Build a reliable roster \
         with accountability.",
    ),
    (
        "For Coaches",
        "Advertise your lessons and allow players to book sessions directly. Grow your network and find new \
         opportunities.",
    ),
    (
        "Reputation System",
        "Built-in reliability and reputation tracking ensures accountability and builds trust within the \
         community.",
    ),
];

#[component]
pub fn FeaturesSection() -> impl IntoView {
    view! {
        <section class="features">
            <h2 class="section-title">"How Trego Helps"</h2>
            <div class="features__grid">
                {FEATURES
                    .iter()
                    .map(|(title, body)| {
                        view! {
                            <article class="card feature-card">
                                <h3>{*title}</h3>
                                <p>{*body}</p>
                            </article>
                        }
                    })
                    .collect_view()}
            </div>
        </section>
    }
}
