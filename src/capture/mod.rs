//! Pointer feeds
//!
//! Producers of pointer-move notifications: a live poller for the host
//! cursor and a replayer for recorded traces.

pub mod feed;
pub mod live;
pub mod replay;

#[cfg(target_os = "macos")]
pub mod macos;

#[cfg(target_os = "windows")]
pub mod windows;

pub use feed::PointerFeed;
pub use live::{platform_reader, LivePointerFeed, PositionReader};
pub use replay::ReplayFeed;
