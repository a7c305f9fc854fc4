//! Placeholder shown until the auth bootstrap settles.

use leptos::prelude::*;

#[component]
pub fn BootSplash() -> impl IntoView {
    view! {
        <div class="boot-splash" role="status" aria-live="polite">
            <span class="boot-splash__spinner" aria-hidden="true"></span>
            <span class="boot-splash__label">"Loading..."</span>
        </div>
    }
}
