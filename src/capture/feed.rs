//! Pointer feed trait
//!
//! A feed produces pointer-move notifications and pushes them into a
//! [`PointerHub`]. The live poller and the trace replayer both implement it.

use crate::error::TrackerResult;
use crate::pointer::PointerHub;
use async_trait::async_trait;

#[async_trait]
pub trait PointerFeed: Send + Sync {
    /// Feed identifier (e.g., "live", "replay")
    fn id(&self) -> &str;

    /// Start dispatching into `hub`
    async fn start(&mut self, hub: PointerHub) -> TrackerResult<()>;

    /// Stop dispatching. Stopping an idle feed is a no-op.
    async fn stop(&mut self) -> TrackerResult<()>;

    /// Resolve once the feed has nothing more to dispatch.
    ///
    /// Live feeds never run dry.
    async fn finished(&mut self) {
        std::future::pending::<()>().await
    }

    fn is_running(&self) -> bool;
}
