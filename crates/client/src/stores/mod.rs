//! Global stores for application state.

pub mod errors;
pub mod profile;

pub use errors::{clear_last_error, set_last_error, LAST_ERROR};
pub use profile::{
    clear_current_profile, set_current_profile, MemoryProfileStore, ProfileStore,
    SignalProfileStore, CURRENT_PROFILE,
};
