//! UI primitives (Button, Input)

pub mod button;
pub mod input;

pub use button::*;
pub use input::*;
