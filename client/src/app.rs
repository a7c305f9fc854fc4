//! Root application component with routing and context providers.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` starts the auth bootstrap once, publishes auth and login state as
//! context signals, and hands the current path to [`RouteOutlet`], which asks
//! the route table what to show. Browser collaborators (HTTP, location) come
//! in through [`AppServices`] so the page logic never reaches for globals.

use std::rc::Rc;

use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::NavigateOptions;
use leptos_router::components::Router;
use leptos_router::hooks::{use_location, use_navigate};

use crate::components::boot_splash::BootSplash;
use crate::net::api::{HttpLoginApi, HttpSessionSource, parse_timeout_ms};
use crate::pages::{dashboard::DashboardPage, landing::LandingPage, login::LoginPage, not_found::NotFoundPage};
use crate::router::{self, GateDecision, GuardPolicy, RouteTable};
use crate::state::auth::{AuthBootstrap, AuthState, NoSession, SessionSource};
use crate::state::login::{LoginApi, LoginController, LoginFlow};
use crate::util::navigate::{BrowserNavigator, Navigator};

/// Collaborators the app talks to outside of Leptos.
#[derive(Clone)]
pub struct AppServices {
    pub session: Rc<dyn SessionSource>,
    pub login_api: Rc<dyn LoginApi>,
    pub navigator: Rc<dyn Navigator>,
    pub routes: RouteTable,
}

impl AppServices {
    /// Wire the browser implementations using build-time settings.
    ///
    /// Without `TREGO_SESSION_ENDPOINT` the bootstrap always resolves to no
    /// session.
    pub fn from_build_env() -> Self {
        let session: Rc<dyn SessionSource> = match option_env!("TREGO_SESSION_ENDPOINT") {
            Some(endpoint) if !endpoint.trim().is_empty() => Rc::new(HttpSessionSource::new(endpoint.trim())),
            _ => Rc::new(NoSession),
        };
        Self {
            session,
            login_api: Rc::new(HttpLoginApi::new(parse_timeout_ms(option_env!("TREGO_LOGIN_TIMEOUT_MS")))),
            navigator: Rc::new(BrowserNavigator),
            routes: RouteTable::standard(GuardPolicy::parse(option_env!("TREGO_DASHBOARD_GUARD"))),
        }
    }
}

/// Root application component.
///
/// Provides auth and login state contexts and sets up client-side routing.
#[component]
pub fn App(services: AppServices) -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthState::default());
    provide_context(auth);

    let bootstrap = AuthBootstrap::new(services.session.clone());
    leptos::task::spawn_local(bootstrap.publish(move |state| auth.set(state)));

    let login_flow = RwSignal::new(LoginFlow::default());
    provide_context(login_flow);
    let controller = LoginController::new(services.login_api.clone(), services.navigator.clone())
        .with_observer(move |flow| login_flow.set(flow.clone()));
    provide_context(StoredValue::new_local(controller));

    let routes = services.routes;

    view! {
        <Title text="Trego"/>

        <Router>
            <main class="app">
                <RouteOutlet routes/>
            </main>
        </Router>
    }
}

/// Renders whatever the route table decides for the current path.
#[component]
fn RouteOutlet(routes: RouteTable) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let location = use_location();
    let navigate = use_navigate();

    let decision = Memo::new(move |_| routes.gate(&location.pathname.get(), &auth.get()));

    Effect::new(move || {
        if let GateDecision::Redirect(target) = decision.get() {
            log::info!("route guard redirect -> {target}");
            navigate(target, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    move || match decision.get() {
        GateDecision::Wait | GateDecision::Redirect(_) => view! { <BootSplash/> }.into_any(),
        GateDecision::Render(router::View::Landing) => view! { <LandingPage/> }.into_any(),
        GateDecision::Render(router::View::Login) => view! { <LoginPage/> }.into_any(),
        GateDecision::Render(router::View::Dashboard) => view! { <DashboardPage/> }.into_any(),
        GateDecision::NotFound => view! { <NotFoundPage/> }.into_any(),
    }
}
