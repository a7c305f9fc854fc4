//! Login page with the Google sign-in hand-off.
//!
//! The page only renders [`LoginFlow`]; the request, timeout and redirect
//! live in [`LoginController`], shared through context by `App`.

use leptos::prelude::*;

use crate::state::login::{LoginController, LoginFlow};

#[component]
pub fn LoginPage() -> impl IntoView {
    let flow = expect_context::<RwSignal<LoginFlow>>();
    let controller = expect_context::<StoredValue<LoginController, LocalStorage>>();

    let on_sign_in = move |_| {
        if !flow.get_untracked().can_submit() {
            return;
        }
        let controller = controller.get_value();
        leptos::task::spawn_local(async move {
            controller.submit().await;
        });
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Trego"</h1>
                <p class="login-card__subtitle">"Sign in to continue"</p>
                <div class="card login-card__body">
                    <button
                        class="google-button"
                        type="button"
                        disabled=move || !flow.get().can_submit()
                        aria-busy=move || flow.get().is_pending().to_string()
                        on:click=on_sign_in
                    >
                        <img src="/google-logo.svg" alt="Google" class="google-button__logo"/>
                        <span>{move || flow.get().button_label()}</span>
                    </button>
                    <Show when=move || flow.get().error_message().is_some()>
                        <p class="login-message login-message--error" role="alert">
                            {move || flow.get().error_message().unwrap_or_default()}
                        </p>
                    </Show>
                </div>
            </div>
        </div>
    }
}
