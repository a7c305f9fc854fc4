//! Dashboard page shown after sign-in.
//!
//! SYSTEM CONTEXT
//! ==============
//! Figures here are fixed placeholders until the backend exposes real
//! activity. The route guard decides whether this page mounts at all.

use leptos::prelude::*;

use crate::components::stat_card::StatCard;
use crate::net::types::User;
use crate::state::auth::AuthState;

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

/// `(label, value, hint)` for each placeholder card.
pub const PLACEHOLDER_STATS: [(&str, &str, &str); 4] = [
    ("Upcoming games", "3", "Next one this Saturday"),
    ("Teammates", "12", "Across 2 teams"),
    ("Reliability score", "98%", "Based on your last 20 check-ins"),
    ("Open tryouts", "5", "Near you this month"),
];

/// Header line for the signed-in user, or a generic one without a session.
pub fn greeting(user: Option<&User>) -> String {
    match user {
        Some(user) if !user.username.trim().is_empty() => format!("Welcome, {}!", user.username),
        _ => "Welcome!".to_owned(),
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let heading = move || greeting(auth.get().user());

    view! {
        <div class="dashboard-page">
            <div class="panel dashboard-page__welcome">
                <h1>{heading}</h1>
                <p>"This is your dashboard. More features coming soon!"</p>
            </div>
            <div class="dashboard-page__stats">
                {PLACEHOLDER_STATS
                    .iter()
                    .map(|(label, value, hint)| view! { <StatCard label=*label value=*value hint=*hint/> })
                    .collect_view()}
            </div>
        </div>
    }
}
