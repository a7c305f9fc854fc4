use leptos::prelude::*;

pub const FOOTER_TEXT: &str = "© 2025 Trego. Building lasting sports connections.";

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer class="site-footer">
            <p>{FOOTER_TEXT}</p>
        </footer>
    }
}
