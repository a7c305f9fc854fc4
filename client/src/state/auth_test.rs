use std::cell::{Cell, RefCell};

use futures::channel::oneshot;
use futures::executor::{LocalPool, block_on};
use futures::task::LocalSpawnExt;

use super::*;
use crate::router::{GateDecision, GuardPolicy, RouteTable, View};

fn sam() -> User {
    User { id: "u-1".to_owned(), email: "sam@trego.test".to_owned(), username: "sam".to_owned() }
}

struct CountingSource {
    calls: Cell<usize>,
    answer: Result<Option<User>, SessionError>,
}

impl CountingSource {
    fn new(answer: Result<Option<User>, SessionError>) -> Rc<Self> {
        Rc::new(Self { calls: Cell::new(0), answer })
    }
}

#[async_trait(?Send)]
impl SessionSource for CountingSource {
    async fn current_session(&self) -> Result<Option<User>, SessionError> {
        self.calls.set(self.calls.get() + 1);
        self.answer.clone()
    }
}

/// Holds the session answer until the test releases it.
struct DelayedSource {
    answer: RefCell<Option<oneshot::Receiver<Result<Option<User>, SessionError>>>>,
}

impl DelayedSource {
    fn new() -> (oneshot::Sender<Result<Option<User>, SessionError>>, Rc<Self>) {
        let (tx, rx) = oneshot::channel();
        (tx, Rc::new(Self { answer: RefCell::new(Some(rx)) }))
    }
}

#[async_trait(?Send)]
impl SessionSource for DelayedSource {
    async fn current_session(&self) -> Result<Option<User>, SessionError> {
        let answer = self.answer.borrow_mut().take();
        match answer {
            Some(rx) => rx.await.unwrap_or(Err(SessionError::Network("answer dropped".to_owned()))),
            None => Err(SessionError::Network("asked twice".to_owned())),
        }
    }
}

// =============================================================
// AuthState
// =============================================================

#[test]
fn auth_state_starts_loading() {
    let state = AuthState::default();
    assert!(state.is_loading());
    assert!(state.session().is_none());
    assert!(state.user().is_none());
}

#[test]
fn resolved_state_exposes_user() {
    let state = AuthState::Resolved(Session::SignedIn(sam()));
    assert!(!state.is_loading());
    assert_eq!(state.user().map(|u| u.username.as_str()), Some("sam"));
}

#[test]
fn unknown_session_has_no_user() {
    let session = Session::Unknown { reason: "offline".to_owned() };
    assert!(!session.is_signed_in());
    assert!(session.user().is_none());
}

// =============================================================
// resolve_session
// =============================================================

#[test]
fn no_session_source_resolves_anonymous() {
    assert_eq!(block_on(resolve_session(&NoSession)), Session::Anonymous);
}

#[test]
fn user_answer_resolves_signed_in() {
    let source = CountingSource::new(Ok(Some(sam())));
    assert_eq!(block_on(resolve_session(source.as_ref())), Session::SignedIn(sam()));
}

#[test]
fn failed_check_is_unknown_not_anonymous() {
    let source = CountingSource::new(Err(SessionError::Status(503)));
    let session = block_on(resolve_session(source.as_ref()));
    assert_eq!(session, Session::Unknown { reason: "session check returned status 503".to_owned() });
    assert_ne!(session, Session::Anonymous);
}

// =============================================================
// AuthBootstrap
// =============================================================

#[test]
fn bootstrap_queries_source_exactly_once() {
    let source = CountingSource::new(Ok(Some(sam())));
    let mut bootstrap = AuthBootstrap::new(source.clone());

    let first = block_on(bootstrap.run_once());
    let second = block_on(bootstrap.run_once());

    assert_eq!(first, Some(Session::SignedIn(sam())));
    assert_eq!(second, None);
    assert_eq!(source.calls.get(), 1);
}

// =============================================================
// Bootstrap barrier through to the route gate
// =============================================================

/// Runs the bootstrap on a local pool the way `App` spawns it.
fn spawn_bootstrap(pool: &LocalPool, source: Rc<dyn SessionSource>) -> Rc<RefCell<AuthState>> {
    let auth = Rc::new(RefCell::new(AuthState::default()));
    let sink = auth.clone();
    pool.spawner()
        .spawn_local(AuthBootstrap::new(source).publish(move |state| *sink.borrow_mut() = state))
        .expect("spawn should succeed");
    auth
}

#[test]
fn routes_wait_until_delayed_session_answer_arrives() {
    let (release, source) = DelayedSource::new();
    let routes = RouteTable::standard(GuardPolicy::Enforce);
    let mut pool = LocalPool::new();
    let auth = spawn_bootstrap(&pool, source);

    pool.run_until_stalled();
    assert!(auth.borrow().is_loading());
    for path in ["/", "/login", "/dashboard", "/missing"] {
        assert_eq!(routes.gate(path, &auth.borrow()), GateDecision::Wait, "path {path}");
    }

    release.send(Ok(Some(sam()))).expect("source should still be waiting");
    pool.run_until_stalled();

    assert_eq!(*auth.borrow(), AuthState::Resolved(Session::SignedIn(sam())));
    assert_eq!(routes.gate("/dashboard", &auth.borrow()), GateDecision::Render(View::Dashboard));
    assert_eq!(routes.gate("/login", &auth.borrow()), GateDecision::Redirect("/dashboard"));
}

#[test]
fn delayed_absent_session_releases_to_redirect() {
    let (release, source) = DelayedSource::new();
    let routes = RouteTable::standard(GuardPolicy::Enforce);
    let mut pool = LocalPool::new();
    let auth = spawn_bootstrap(&pool, source);

    pool.run_until_stalled();
    assert_eq!(routes.gate("/dashboard", &auth.borrow()), GateDecision::Wait);

    release.send(Ok(None)).expect("source should still be waiting");
    pool.run_until_stalled();

    assert_eq!(routes.gate("/", &auth.borrow()), GateDecision::Render(View::Landing));
    assert_eq!(routes.gate("/dashboard", &auth.borrow()), GateDecision::Redirect("/login"));
}

#[test]
fn delayed_failed_check_still_renders_landing() {
    let (release, source) = DelayedSource::new();
    let routes = RouteTable::standard(GuardPolicy::Enforce);
    let mut pool = LocalPool::new();
    let auth = spawn_bootstrap(&pool, source);

    pool.run_until_stalled();
    assert_eq!(routes.gate("/", &auth.borrow()), GateDecision::Wait);

    release.send(Err(SessionError::Status(502))).expect("source should still be waiting");
    pool.run_until_stalled();

    assert!(matches!(auth.borrow().session(), Some(Session::Unknown { .. })));
    assert_eq!(routes.gate("/", &auth.borrow()), GateDecision::Render(View::Landing));
}
