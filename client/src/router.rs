//! Route table and auth gate.
//!
//! DESIGN
//! ======
//! Routes are an explicit table of `(path, view, guard)` rows built once at
//! startup and handed to the outlet, rather than discovered from file names.
//! [`RouteTable::gate`] turns the current path plus auth state into a single
//! decision the outlet renders. While the auth bootstrap is pending every
//! path, known or not, resolves to [`GateDecision::Wait`].

#[cfg(test)]
#[path = "router_test.rs"]
mod router_test;

use crate::state::auth::AuthState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    Landing,
    Login,
    Dashboard,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Guard {
    Public,
    /// Signed-out visitors are sent to `redirect_to` when the policy enforces guards.
    RequireSession { redirect_to: &'static str },
    /// Signed-in visitors are sent to `redirect_to`.
    RedirectSignedIn { redirect_to: &'static str },
}

/// Whether [`Guard::RequireSession`] actually redirects.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GuardPolicy {
    #[default]
    Enforce,
    /// Render session-guarded views to anyone (demo builds).
    Permissive,
}

impl GuardPolicy {
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("permissive" | "off" | "false") => Self::Permissive,
            _ => Self::Enforce,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteDef {
    pub path: &'static str,
    pub view: View,
    pub guard: Guard,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateDecision {
    /// Auth bootstrap still pending; render nothing route-specific.
    Wait,
    Render(View),
    Redirect(&'static str),
    NotFound,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteTable {
    routes: Vec<RouteDef>,
    policy: GuardPolicy,
}

impl RouteTable {
    #[must_use]
    pub fn new(routes: Vec<RouteDef>, policy: GuardPolicy) -> Self {
        Self { routes, policy }
    }

    /// `/` landing, `/login` sign-in, `/dashboard` behind a session.
    #[must_use]
    pub fn standard(policy: GuardPolicy) -> Self {
        Self::new(
            vec![
                RouteDef { path: "/", view: View::Landing, guard: Guard::Public },
                RouteDef { path: "/login", view: View::Login, guard: Guard::RedirectSignedIn { redirect_to: "/dashboard" } },
                RouteDef {
                    path: "/dashboard",
                    view: View::Dashboard,
                    guard: Guard::RequireSession { redirect_to: "/login" },
                },
            ],
            policy,
        )
    }

    #[must_use]
    pub fn policy(&self) -> GuardPolicy {
        self.policy
    }

    /// Exact match, ignoring a trailing slash and any query or fragment.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<&RouteDef> {
        let path = normalize(path);
        self.routes.iter().find(|route| route.path == path)
    }

    #[must_use]
    pub fn gate(&self, path: &str, auth: &AuthState) -> GateDecision {
        let Some(session) = auth.session() else {
            return GateDecision::Wait;
        };
        let Some(route) = self.resolve(path) else {
            return GateDecision::NotFound;
        };

        match route.guard {
            Guard::Public => GateDecision::Render(route.view),
            Guard::RequireSession { redirect_to } => {
                if session.is_signed_in() || self.policy == GuardPolicy::Permissive {
                    GateDecision::Render(route.view)
                } else {
                    GateDecision::Redirect(redirect_to)
                }
            }
            Guard::RedirectSignedIn { redirect_to } => {
                if session.is_signed_in() {
                    GateDecision::Redirect(redirect_to)
                } else {
                    GateDecision::Render(route.view)
                }
            }
        }
    }
}

fn normalize(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}
