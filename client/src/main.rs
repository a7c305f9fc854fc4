//! Trunk entry point: installs browser logging and mounts the app.

#[cfg(feature = "csr")]
fn main() {
    use leptos::prelude::*;
    use trego_client::app::{App, AppServices};

    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    mount_to_body(|| view! { <App services=AppServices::from_build_env()/> });
}

#[cfg(not(feature = "csr"))]
fn main() {}
