//! Live pointer feed
//!
//! Polls the platform cursor position on a dedicated thread and dispatches a
//! notification whenever the position differs from the last one sent.

use super::feed::PointerFeed;
use crate::error::{TrackerError, TrackerResult};
use crate::pointer::{PointerCoordinate, PointerHub};
use async_trait::async_trait;
use parking_lot::Mutex as ParkingMutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Reads the current cursor position, or `None` if it is unavailable
pub type PositionReader = fn() -> Option<PointerCoordinate>;

/// Cursor reader for the current platform, if there is one
pub fn platform_reader() -> Option<PositionReader> {
    #[cfg(target_os = "macos")]
    {
        Some(super::macos::read_cursor_position as PositionReader)
    }

    #[cfg(target_os = "windows")]
    {
        Some(super::windows::read_cursor_position as PositionReader)
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        None
    }
}

pub struct LivePointerFeed {
    id: String,
    reader: Option<PositionReader>,
    poll_interval: Duration,
    is_running: Arc<AtomicBool>,
    thread_handle: Arc<ParkingMutex<Option<std::thread::JoinHandle<()>>>>,
}

impl LivePointerFeed {
    pub fn new(poll_interval: Duration) -> Self {
        Self::with_reader(platform_reader(), poll_interval)
    }

    pub fn with_reader(reader: Option<PositionReader>, poll_interval: Duration) -> Self {
        Self {
            id: "live".to_string(),
            reader,
            poll_interval,
            is_running: Arc::new(AtomicBool::new(false)),
            thread_handle: Arc::new(ParkingMutex::new(None)),
        }
    }
}

/// Spawn the polling thread
fn start_pointer_polling(
    is_running: Arc<AtomicBool>,
    hub: PointerHub,
    reader: PositionReader,
    poll_interval: Duration,
) -> TrackerResult<std::thread::JoinHandle<()>> {
    let handle = std::thread::Builder::new()
        .name("pointer-poll".to_string())
        .spawn(move || {
            tracing::info!("Pointer polling started (poll_interval={:?})", poll_interval);

            let mut last: Option<PointerCoordinate> = None;
            let mut dispatched = 0usize;

            while is_running.load(Ordering::Relaxed) {
                let loop_start = Instant::now();

                if let Some(position) = reader() {
                    if last != Some(position) {
                        hub.dispatch(position);
                        last = Some(position);
                        dispatched += 1;
                    }
                }

                let elapsed = loop_start.elapsed();
                if elapsed < poll_interval {
                    std::thread::sleep(poll_interval - elapsed);
                }
            }

            tracing::info!("Pointer polling stopped (moves={})", dispatched);
        })
        .map_err(|e| TrackerError::Platform(format!("Failed to spawn poll thread: {}", e)))?;

    Ok(handle)
}

#[async_trait]
impl PointerFeed for LivePointerFeed {
    fn id(&self) -> &str {
        &self.id
    }

    async fn start(&mut self, hub: PointerHub) -> TrackerResult<()> {
        if self.is_running.load(Ordering::SeqCst) {
            return Err(TrackerError::AlreadyRunning(self.id.clone()));
        }

        // No live cursor on this host: the coordinate simply never updates
        let Some(reader) = self.reader else {
            tracing::warn!("No live pointer source on this platform; position stays at default");
            return Ok(());
        };

        self.is_running.store(true, Ordering::SeqCst);

        match start_pointer_polling(self.is_running.clone(), hub, reader, self.poll_interval) {
            Ok(handle) => {
                *self.thread_handle.lock() = Some(handle);
                Ok(())
            }
            Err(e) => {
                self.is_running.store(false, Ordering::SeqCst);
                Err(e)
            }
        }
    }

    async fn stop(&mut self) -> TrackerResult<()> {
        if !self.is_running.load(Ordering::SeqCst) {
            return Ok(());
        }

        self.is_running.store(false, Ordering::SeqCst);

        let handle = self.thread_handle.lock().take();
        if let Some(handle) = handle {
            let _ = handle.join();
        }

        Ok(())
    }

    fn is_running(&self) -> bool {
        self.is_running.load(Ordering::SeqCst)
    }
}

impl Drop for LivePointerFeed {
    fn drop(&mut self) {
        // Let the thread wind down on its own
        self.is_running.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn fixed_position() -> Option<PointerCoordinate> {
        Some(PointerCoordinate::new(5.0, 5.0))
    }

    fn counting_hub() -> (PointerHub, Arc<AtomicUsize>, crate::pointer::Registration) {
        let hub = PointerHub::new();
        let count = Arc::new(AtomicUsize::new(0));
        let sink = count.clone();
        let registration = hub.register(move |_| {
            sink.fetch_add(1, Ordering::SeqCst);
        });
        (hub, count, registration)
    }

    #[tokio::test]
    async fn test_unchanged_position_dispatched_once() {
        let (hub, count, _registration) = counting_hub();
        let mut feed = LivePointerFeed::with_reader(Some(fixed_position as PositionReader), Duration::from_millis(1));

        feed.start(hub).await.unwrap();
        tokio::time::sleep(Duration::from_millis(30)).await;
        feed.stop().await.unwrap();

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(!feed.is_running());
    }

    #[tokio::test]
    async fn test_double_start_rejected() {
        let mut feed = LivePointerFeed::with_reader(Some(fixed_position as PositionReader), Duration::from_millis(1));
        feed.start(PointerHub::new()).await.unwrap();

        let err = feed.start(PointerHub::new()).await.unwrap_err();
        assert!(matches!(err, TrackerError::AlreadyRunning(_)));

        feed.stop().await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_reader_degrades_quietly() {
        let (hub, count, _registration) = counting_hub();
        let mut feed = LivePointerFeed::with_reader(None, Duration::from_millis(1));

        feed.start(hub).await.unwrap();

        assert!(!feed.is_running());
        assert_eq!(count.load(Ordering::SeqCst), 0);
        feed.stop().await.unwrap();
    }
}
