//! "The Problem" strip on the landing page.

use leptos::prelude::*;

/// `(icon, title, body)` per problem card.
pub const PROBLEMS: [(&str, &str, &str); 3] = [
    ("🏀", "Empty Courts", "Struggling to find reliable teammates to keep the game going"),
    ("📱", "Fragmented Info", "Tryout opportunities scattered across Instagram posts and group chats"),
    ("🤝", "Lost Connections", "Difficulty maintaining consistent team rosters and finding coaches"),
];

#[component]
pub fn ProblemSection() -> impl IntoView {
    view! {
        <section class="panel problem">
            <h2 class="section-title">"The Problem"</h2>
            <div class="problem__grid">
                {PROBLEMS
                    .iter()
                    .map(|(icon, title, body)| {
                        view! {
                            <div class="problem__item">
                                <div class="problem__icon" aria-hidden="true">{*icon}</div>
                                <h3>{*title}</h3>
                                <p>{*body}</p>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
        </section>
    }
}
