//! Profile store for the signed-in user.

use std::cell::RefCell;

use dioxus::prelude::*;
use portal_shared::UserProfile;

/// Current user's profile
pub static CURRENT_PROFILE: GlobalSignal<Option<UserProfile>> = Signal::global(|| None);

/// Set the current user's profile
pub fn set_current_profile(profile: UserProfile) {
    *CURRENT_PROFILE.write() = Some(profile);
}

/// Clear the current user's profile (on logout or failed fetch)
pub fn clear_current_profile() {
    *CURRENT_PROFILE.write() = None;
}

/// Holder of the signed-in user's profile.
pub trait ProfileStore {
    fn set_profile(&self, profile: UserProfile);
    fn clear(&self);
    fn profile(&self) -> Option<UserProfile>;
}

/// Store backed by [`CURRENT_PROFILE`], so views re-render on change.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignalProfileStore;

impl ProfileStore for SignalProfileStore {
    fn set_profile(&self, profile: UserProfile) {
        set_current_profile(profile);
    }

    fn clear(&self) {
        clear_current_profile();
    }

    fn profile(&self) -> Option<UserProfile> {
        CURRENT_PROFILE.peek().clone()
    }
}

/// Store that lives outside any Dioxus runtime.
#[derive(Debug, Default)]
pub struct MemoryProfileStore {
    current: RefCell<Option<UserProfile>>,
}

impl ProfileStore for MemoryProfileStore {
    fn set_profile(&self, profile: UserProfile) {
        *self.current.borrow_mut() = Some(profile);
    }

    fn clear(&self) {
        self.current.borrow_mut().take();
    }

    fn profile(&self) -> Option<UserProfile> {
        self.current.borrow().clone()
    }
}
