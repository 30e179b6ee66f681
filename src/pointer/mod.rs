//! Pointer position plumbing
//!
//! The hub is the host-side pointer-move channel; a position source is one
//! consumer's subscription to it.

pub mod hub;
pub mod source;
pub mod types;

pub use hub::{ListenerId, PointerHub, Registration};
pub use source::PositionSource;
pub use types::{MouseMove, PointerCoordinate};
