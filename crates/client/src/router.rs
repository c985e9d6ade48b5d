//! Router facade: navigation lifecycle events plus `navigate`.
//!
//! The Dioxus router has no start/end hooks, so the application shell calls
//! [`AppRouter::transition`] whenever the active route changes. Listeners see
//! `Start`, may redirect with [`AppRouter::navigate`], and only see `End` when
//! nobody redirected.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use portal_shared::NavigationEvent;

type Listener = Rc<dyn Fn(&NavigationEvent)>;

#[derive(Default)]
struct RouterState {
    next_id: Cell<u64>,
    listeners: RefCell<Vec<(u64, Listener)>>,
    pending_redirect: RefCell<Option<String>>,
    history: RefCell<Vec<String>>,
}

#[derive(Clone, Default)]
pub struct AppRouter {
    state: Rc<RouterState>,
}

/// Handle to a registered listener. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes the listener"]
pub struct Subscription {
    id: u64,
    state: Weak<RouterState>,
}

impl Subscription {
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(state) = self.state.upgrade() {
            state.listeners.borrow_mut().retain(|(id, _)| *id != self.id);
        }
    }
}

impl AppRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, listener: impl Fn(&NavigationEvent) + 'static) -> Subscription {
        let id = self.state.next_id.get();
        self.state.next_id.set(id + 1);
        self.state.listeners.borrow_mut().push((id, Rc::new(listener)));
        Subscription { id, state: Rc::downgrade(&self.state) }
    }

    pub fn listener_count(&self) -> usize {
        self.state.listeners.borrow().len()
    }

    /// Deliver an event to every listener registered at call time.
    pub fn emit(&self, event: &NavigationEvent) {
        // Snapshot so listeners can navigate or (un)subscribe while handling.
        let listeners: Vec<Listener> =
            self.state.listeners.borrow().iter().map(|(_, l)| l.clone()).collect();
        for listener in listeners {
            listener(event);
        }
    }

    /// Run one route transition to `url`.
    ///
    /// Returns the redirect target when a listener navigated away during
    /// `Start`; the transition is then abandoned and no `End` is emitted.
    pub fn transition(&self, url: &str) -> Option<String> {
        self.state.pending_redirect.borrow_mut().take();

        self.emit(&NavigationEvent::Start { url: url.to_string() });
        if let Some(redirect) = self.state.pending_redirect.borrow_mut().take() {
            crate::log_debug!("navigation to {} redirected to {}", url, redirect);
            return Some(redirect);
        }

        self.emit(&NavigationEvent::End { url: url.to_string() });
        None
    }

    /// Request navigation to `path`. Inside a transition this supersedes it.
    pub fn navigate(&self, path: &str) {
        self.state.history.borrow_mut().push(path.to_string());
        *self.state.pending_redirect.borrow_mut() = Some(path.to_string());
    }

    /// Every path passed to [`navigate`](Self::navigate), oldest first.
    pub fn navigations(&self) -> Vec<String> {
        self.state.history.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder(router: &AppRouter) -> (Rc<RefCell<Vec<NavigationEvent>>>, Subscription) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let sub = router.subscribe(move |e| sink.borrow_mut().push(e.clone()));
        (seen, sub)
    }

    #[test]
    fn transition_emits_start_then_end() {
        let router = AppRouter::new();
        let (seen, _sub) = recorder(&router);

        assert_eq!(router.transition("/main"), None);
        assert_eq!(
            *seen.borrow(),
            vec![
                NavigationEvent::Start { url: "/main".into() },
                NavigationEvent::End { url: "/main".into() },
            ]
        );
    }

    #[test]
    fn redirect_during_start_suppresses_end() {
        let router = AppRouter::new();
        let (seen, _sub) = recorder(&router);
        let nav = router.clone();
        let _guard = router.subscribe(move |e| {
            if matches!(e, NavigationEvent::Start { url } if url == "/private") {
                nav.navigate("/auth");
            }
        });

        assert_eq!(router.transition("/private"), Some("/auth".to_string()));
        assert_eq!(seen.borrow().len(), 1);
        assert_eq!(router.navigations(), vec!["/auth"]);
    }

    #[test]
    fn dropping_subscription_stops_delivery() {
        let router = AppRouter::new();
        let (seen, sub) = recorder(&router);
        assert_eq!(router.listener_count(), 1);

        sub.unsubscribe();
        assert_eq!(router.listener_count(), 0);
        router.transition("/");
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn stale_redirect_does_not_leak_into_next_transition() {
        let router = AppRouter::new();
        router.navigate("/somewhere");
        assert_eq!(router.transition("/main"), None);
    }
}
