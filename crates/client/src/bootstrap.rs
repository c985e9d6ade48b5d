//! Startup orchestration: configuration, device classes, route guard and
//! the opportunistic profile fetch.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use portal_shared::{
    route_path, ConfigPayload, Dimension, NavigationEvent, UserProfile, AUTH_PATH, MAIN_PATH,
    ROOT_PATH,
};

use crate::context::BootstrapContext;
use crate::device::{classify_device, DeviceDetector, ViewSurface};
use crate::router::{AppRouter, Subscription};
use crate::services::{ConfigSource, ErrorReporter, ProfileSource, TokenSource};
use crate::stores::ProfileStore;

/// Everything the controller talks to besides the router.
#[derive(Clone)]
pub struct Collaborators {
    pub config: Rc<dyn ConfigSource>,
    pub tokens: Rc<dyn TokenSource>,
    pub profiles: Rc<dyn ProfileSource>,
    pub store: Rc<dyn ProfileStore>,
    pub errors: Rc<dyn ErrorReporter>,
    pub device: Rc<dyn DeviceDetector>,
    pub surface: Rc<dyn ViewSurface>,
}

/// Where a navigation-start to `url` must be sent instead, if anywhere.
///
/// Signed-in users skip the auth page; anonymous users may only see the
/// landing and auth pages.
pub fn redirect_for(url: &str, has_token: bool) -> Option<&'static str> {
    let path = route_path(url);
    if path == AUTH_PATH && has_token {
        Some(MAIN_PATH)
    } else if path != AUTH_PATH && path != ROOT_PATH && !has_token {
        Some(AUTH_PATH)
    } else {
        None
    }
}

pub struct BootstrapController {
    this: Weak<BootstrapController>,
    context: Rc<BootstrapContext>,
    router: AppRouter,
    services: Collaborators,
    initialized: Cell<bool>,
    navigation: RefCell<Option<Subscription>>,
    ready_listener: RefCell<Option<Box<dyn Fn()>>>,
}

impl BootstrapController {
    pub fn new(context: Rc<BootstrapContext>, router: AppRouter, services: Collaborators) -> Rc<Self> {
        Rc::new_cyclic(|this| Self {
            this: this.clone(),
            context,
            router,
            services,
            initialized: Cell::new(false),
            navigation: RefCell::new(None),
            ready_listener: RefCell::new(None),
        })
    }

    pub fn context(&self) -> &Rc<BootstrapContext> {
        &self.context
    }

    pub fn router(&self) -> &AppRouter {
        &self.router
    }

    /// Run the startup sequence once: listen to navigation, tag the device,
    /// then load configuration (and the profile, when signed in).
    ///
    /// A failed config request is logged and leaves the config unloaded.
    pub async fn initialize(&self) {
        if self.prepare() {
            self.load_configuration().await;
        }
    }

    /// Synchronous half of [`initialize`](Self::initialize). Returns `false`
    /// when the controller was already started.
    ///
    /// The shell calls this before the router renders its first route, so
    /// the guard sees that first navigation.
    pub fn prepare(&self) -> bool {
        if self.initialized.replace(true) {
            crate::log_debug!("bootstrap already initialized");
            return false;
        }

        self.register_navigation_listener();
        self.classify_device();
        true
    }

    pub async fn load_configuration(&self) {
        match self.services.config.fetch_config().await {
            Ok(payload) => self.on_config_loaded(payload).await,
            Err(e) => crate::log_error!("failed to load configuration: {}", e),
        }
    }

    /// Called once the configuration is merged, before any profile request.
    pub fn set_ready_listener(&self, listener: impl Fn() + 'static) {
        *self.ready_listener.borrow_mut() = Some(Box::new(listener));
    }

    pub async fn on_config_loaded(&self, payload: ConfigPayload) {
        crate::log_debug!("configuration loaded with {} keys", payload.len());
        self.context.apply_config(payload);
        if let Some(listener) = self.ready_listener.borrow().as_ref() {
            listener();
        }

        if self.current_token().is_some() {
            self.fetch_user_profile().await;
        }
    }

    /// Fetch the profile for the stored token. Any failure is reported and
    /// treated as signed out.
    pub async fn fetch_user_profile(&self) {
        match self.services.profiles.fetch_profile().await {
            Ok(response) => {
                self.services.store.set_profile(UserProfile {
                    token: self.current_token(),
                    fullname: response.fullname,
                });
            }
            Err(e) => {
                self.services.errors.handle_error(&e);
                self.services.store.clear();
            }
        }
    }

    pub fn on_navigation_event(&self, event: &NavigationEvent) {
        match event {
            NavigationEvent::Start { url } => {
                let has_token = self.current_token().is_some();
                if let Some(target) = redirect_for(url, has_token) {
                    self.router.navigate(target);
                }
            }
            NavigationEvent::End { url } => self.context.set_current_page(url),
        }
    }

    pub fn classify_device(&self) {
        classify_device(self.services.device.as_ref(), self.services.surface.as_ref());
    }

    /// Update one viewport axis. Unknown kinds are ignored.
    pub fn on_dimension_changed(&self, kind: &str, value: u32) {
        match kind.parse::<Dimension>() {
            Ok(dimension) => self.context.set_dimension(dimension, value),
            Err(e) => crate::log_debug!("ignoring dimension change: {}", e),
        }
    }

    /// Stop listening to navigation events.
    pub fn shutdown(&self) {
        self.navigation.borrow_mut().take();
    }

    pub fn is_listening(&self) -> bool {
        self.navigation.borrow().is_some()
    }

    fn register_navigation_listener(&self) {
        let this = self.this.clone();
        let subscription = self.router.subscribe(move |event| {
            if let Some(controller) = this.upgrade() {
                controller.on_navigation_event(event);
            }
        });
        *self.navigation.borrow_mut() = Some(subscription);
    }

    fn current_token(&self) -> Option<String> {
        self.services.tokens.token().filter(|t| !t.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{MemorySurface, UserAgentDetector};
    use crate::stores::MemoryProfileStore;
    use async_trait::async_trait;
    use portal_shared::{ApiError, ProfileResponse, ViewportDetails};
    use serde_json::{json, Map, Value};
    use std::time::Duration;

    struct FakeConfig {
        result: Result<ConfigPayload, ApiError>,
        calls: Cell<usize>,
    }

    #[async_trait(?Send)]
    impl ConfigSource for FakeConfig {
        async fn fetch_config(&self) -> Result<ConfigPayload, ApiError> {
            self.calls.set(self.calls.get() + 1);
            self.result.clone()
        }
    }

    #[derive(Default)]
    struct FakeTokens {
        token: RefCell<Option<String>>,
    }

    impl TokenSource for FakeTokens {
        fn token(&self) -> Option<String> {
            self.token.borrow().clone()
        }
    }

    struct FakeProfiles {
        result: Result<ProfileResponse, ApiError>,
        calls: Cell<usize>,
    }

    #[async_trait(?Send)]
    impl ProfileSource for FakeProfiles {
        async fn fetch_profile(&self) -> Result<ProfileResponse, ApiError> {
            self.calls.set(self.calls.get() + 1);
            self.result.clone()
        }
    }

    #[derive(Default)]
    struct RecordingReporter {
        errors: RefCell<Vec<ApiError>>,
    }

    impl ErrorReporter for RecordingReporter {
        fn handle_error(&self, error: &ApiError) {
            self.errors.borrow_mut().push(error.clone());
        }
    }

    struct Harness {
        controller: Rc<BootstrapController>,
        router: AppRouter,
        config: Rc<FakeConfig>,
        tokens: Rc<FakeTokens>,
        profiles: Rc<FakeProfiles>,
        store: Rc<MemoryProfileStore>,
        errors: Rc<RecordingReporter>,
        surface: Rc<MemorySurface>,
    }

    fn object(value: Value) -> ConfigPayload {
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    fn ada() -> Result<ProfileResponse, ApiError> {
        Ok(ProfileResponse { fullname: "Ada Lovelace".into(), extra: Map::new() })
    }

    fn harness(
        config: Result<ConfigPayload, ApiError>,
        token: Option<&str>,
        profile: Result<ProfileResponse, ApiError>,
    ) -> Harness {
        let router = AppRouter::new();
        let config = Rc::new(FakeConfig { result: config, calls: Cell::new(0) });
        let tokens = Rc::new(FakeTokens::default());
        *tokens.token.borrow_mut() = token.map(str::to_string);
        let profiles = Rc::new(FakeProfiles { result: profile, calls: Cell::new(0) });
        let store = Rc::new(MemoryProfileStore::default());
        let errors = Rc::new(RecordingReporter::default());
        let surface = Rc::new(MemorySurface::default());

        let controller = BootstrapController::new(
            Rc::new(BootstrapContext::new()),
            router.clone(),
            Collaborators {
                config: config.clone(),
                tokens: tokens.clone(),
                profiles: profiles.clone(),
                store: store.clone(),
                errors: errors.clone(),
                device: Rc::new(UserAgentDetector::new("Mozilla/5.0 (X11; Linux x86_64)")),
                surface: surface.clone(),
            },
        );

        Harness { controller, router, config, tokens, profiles, store, errors, surface }
    }

    fn start(url: &str) -> NavigationEvent {
        NavigationEvent::Start { url: url.to_string() }
    }

    #[test]
    fn redirect_policy() {
        assert_eq!(redirect_for("/auth", true), Some("/main"));
        assert_eq!(redirect_for("/auth", false), None);
        assert_eq!(redirect_for("/settings", false), Some("/auth"));
        assert_eq!(redirect_for("/settings", true), None);
        assert_eq!(redirect_for("/", false), None);
        assert_eq!(redirect_for("/", true), None);
        assert_eq!(redirect_for("/auth?next=/main", true), Some("/main"));
    }

    #[tokio::test]
    async fn initialize_runs_startup_sequence() {
        let h = harness(Ok(object(json!({"title": "Portal"}))), None, ada());

        h.controller.initialize().await;

        assert!(h.controller.is_listening());
        assert_eq!(h.router.listener_count(), 1);
        assert_eq!(h.surface.classes(), vec!["desktop"]);
        assert_eq!(h.config.calls.get(), 1);
        assert!(h.controller.context().is_config_loaded());
    }

    #[tokio::test]
    async fn initialize_twice_does_nothing_more() {
        let h = harness(Ok(Map::new()), None, ada());

        h.controller.initialize().await;
        h.controller.initialize().await;

        assert_eq!(h.config.calls.get(), 1);
        assert_eq!(h.router.listener_count(), 1);
    }

    #[test]
    fn prepare_guards_before_config_arrives() {
        let h = harness(Ok(Map::new()), None, ada());

        assert!(h.controller.prepare());
        assert!(!h.controller.prepare());

        assert_eq!(h.router.transition("/main"), Some("/auth".to_string()));
        assert_eq!(h.config.calls.get(), 0);
        assert!(!h.controller.context().is_config_loaded());
    }

    #[tokio::test]
    async fn config_payload_is_merged_and_marks_loaded() {
        let h = harness(Ok(Map::new()), None, ada());
        let ctx = h.controller.context().clone();
        assert!(!ctx.is_config_loaded());

        h.controller
            .on_config_loaded(object(json!({"apiVersion": 2, "features": {"chat": true}})))
            .await;

        assert!(ctx.is_config_loaded());
        assert_eq!(ctx.config().get("apiVersion"), Some(&json!(2)));
        assert_eq!(ctx.config().get("features"), Some(&json!({"chat": true})));
    }

    struct StalledProfiles;

    #[async_trait(?Send)]
    impl ProfileSource for StalledProfiles {
        async fn fetch_profile(&self) -> Result<ProfileResponse, ApiError> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn readiness_is_published_before_profile_resolves() {
        let tokens = Rc::new(FakeTokens::default());
        *tokens.token.borrow_mut() = Some("tok-1".into());
        let controller = BootstrapController::new(
            Rc::new(BootstrapContext::new()),
            AppRouter::new(),
            Collaborators {
                config: Rc::new(FakeConfig { result: Ok(object(json!({"a": 1}))), calls: Cell::new(0) }),
                tokens,
                profiles: Rc::new(StalledProfiles),
                store: Rc::new(MemoryProfileStore::default()),
                errors: Rc::new(RecordingReporter::default()),
                device: Rc::new(UserAgentDetector::default()),
                surface: Rc::new(MemorySurface::default()),
            },
        );
        let ready = Rc::new(Cell::new(false));
        let flag = ready.clone();
        controller.set_ready_listener(move || flag.set(true));

        let load = tokio::time::timeout(Duration::from_millis(50), controller.load_configuration()).await;

        assert!(load.is_err(), "profile request is still pending");
        assert!(ready.get());
        assert!(controller.context().is_config_loaded());
    }

    #[tokio::test]
    async fn ready_listener_is_not_called_when_config_fails() {
        let h = harness(Err(ApiError::Network("offline".into())), None, ada());
        let ready = Rc::new(Cell::new(false));
        let flag = ready.clone();
        h.controller.set_ready_listener(move || flag.set(true));

        h.controller.initialize().await;

        assert!(!ready.get());
    }

    #[tokio::test]
    async fn profile_is_fetched_once_when_token_present() {
        let h = harness(Ok(Map::new()), Some("tok-1"), ada());

        h.controller.initialize().await;

        assert_eq!(h.profiles.calls.get(), 1);
        assert_eq!(
            h.store.profile(),
            Some(UserProfile { token: Some("tok-1".into()), fullname: "Ada Lovelace".into() })
        );
    }

    #[tokio::test]
    async fn profile_is_not_fetched_without_token() {
        let h = harness(Ok(Map::new()), None, ada());
        h.controller.initialize().await;
        assert_eq!(h.profiles.calls.get(), 0);

        let empty = harness(Ok(Map::new()), Some(""), ada());
        empty.controller.initialize().await;
        assert_eq!(empty.profiles.calls.get(), 0);
    }

    #[tokio::test]
    async fn config_failure_leaves_config_unloaded() {
        let h = harness(Err(ApiError::Network("offline".into())), Some("tok-1"), ada());

        h.controller.initialize().await;

        assert!(!h.controller.context().is_config_loaded());
        assert_eq!(h.profiles.calls.get(), 0);
        assert!(h.errors.errors.borrow().is_empty());
        // The guard is registered before the request, so it still works.
        assert!(h.controller.is_listening());
    }

    #[tokio::test]
    async fn failed_profile_fetch_reports_once_and_clears_store() {
        let failure = ApiError::Http { status: 401, body: String::new() };
        let h = harness(Ok(Map::new()), Some("stale"), Err(failure.clone()));
        h.store.set_profile(UserProfile { token: Some("stale".into()), fullname: "Old".into() });

        h.controller.initialize().await;

        assert_eq!(*h.errors.errors.borrow(), vec![failure]);
        assert_eq!(h.store.profile(), None);
    }

    #[tokio::test]
    async fn signed_in_user_is_sent_from_auth_to_main() {
        let h = harness(Ok(Map::new()), Some("tok-1"), ada());
        h.controller.initialize().await;

        assert_eq!(h.router.transition("/auth"), Some("/main".to_string()));
        assert_eq!(h.router.navigations(), vec!["/main"]);
    }

    #[tokio::test]
    async fn anonymous_user_is_sent_to_auth() {
        let h = harness(Ok(Map::new()), None, ada());
        h.controller.initialize().await;

        h.controller.on_navigation_event(&start("/settings"));

        assert_eq!(h.router.navigations(), vec!["/auth"]);
    }

    #[tokio::test]
    async fn anonymous_user_may_stay_on_root() {
        let h = harness(Ok(Map::new()), None, ada());
        h.controller.initialize().await;

        assert_eq!(h.router.transition("/"), None);
        assert!(h.router.navigations().is_empty());
        assert_eq!(h.controller.context().current_page(), "/");
    }

    #[tokio::test]
    async fn token_is_read_at_navigation_time() {
        let h = harness(Ok(Map::new()), None, ada());
        h.controller.initialize().await;

        *h.tokens.token.borrow_mut() = Some("fresh".into());
        assert_eq!(h.router.transition("/settings"), None);
        assert_eq!(h.controller.context().current_page(), "/settings");
    }

    #[tokio::test]
    async fn shutdown_stops_the_guard() {
        let h = harness(Ok(Map::new()), None, ada());
        h.controller.initialize().await;

        h.controller.shutdown();

        assert_eq!(h.router.listener_count(), 0);
        assert_eq!(h.router.transition("/settings"), None);
        assert!(h.router.navigations().is_empty());
    }

    #[test]
    fn dimension_changes_update_viewport() {
        let h = harness(Ok(Map::new()), None, ada());

        h.controller.on_dimension_changed("WIDTH", 800);
        h.controller.on_dimension_changed("HEIGHT", 600);
        let expected = ViewportDetails { width: Some(800), height: Some(600) };
        assert_eq!(h.controller.context().viewport(), expected);

        h.controller.on_dimension_changed("DEPTH", 1);
        assert_eq!(h.controller.context().viewport(), expected);
    }

    #[test]
    fn classify_device_is_idempotent() {
        let h = harness(Ok(Map::new()), None, ada());
        h.controller.classify_device();
        h.controller.classify_device();
        assert_eq!(h.surface.classes(), vec!["desktop"]);
    }
}
