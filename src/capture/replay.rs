//! Replay feed
//!
//! Plays back a recorded `*-mouse-moves.json` trace, dispatching each sample
//! at its recorded offset from the start of playback.

use super::feed::PointerFeed;
use crate::error::{TrackerError, TrackerResult};
use crate::pointer::{MouseMove, PointerCoordinate, PointerHub};
use async_trait::async_trait;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

pub struct ReplayFeed {
    id: String,
    schedule: Arc<Vec<(Duration, PointerCoordinate)>>,
    is_running: Arc<AtomicBool>,
    task: Option<JoinHandle<()>>,
}

impl ReplayFeed {
    /// Build a feed from recorded samples.
    ///
    /// Negative times play immediately; times that do not fit a `Duration`
    /// (NaN, infinite, absurdly large) reject the whole trace.
    pub fn from_moves(moves: Vec<MouseMove>) -> TrackerResult<Self> {
        let mut schedule = moves
            .iter()
            .map(|sample| {
                // `max` would swallow NaN, so clamp by hand
                let time_ms = if sample.process_time_ms < 0.0 {
                    0.0
                } else {
                    sample.process_time_ms
                };
                let offset = Duration::try_from_secs_f64(time_ms / 1000.0)
                    .map_err(|e| {
                        TrackerError::Configuration(format!(
                            "processTimeMs out of range ({}): {}",
                            sample.process_time_ms, e
                        ))
                    })?;
                Ok((offset, sample.coordinate()))
            })
            .collect::<TrackerResult<Vec<_>>>()?;
        schedule.sort_by_key(|(offset, _)| *offset);

        Ok(Self {
            id: "replay".to_string(),
            schedule: Arc::new(schedule),
            is_running: Arc::new(AtomicBool::new(false)),
            task: None,
        })
    }

    /// Load a trace file
    pub fn load(path: &Path) -> TrackerResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let moves: Vec<MouseMove> = serde_json::from_str(&content)?;

        tracing::info!("Loaded {} recorded moves from {}", moves.len(), path.display());
        Self::from_moves(moves)
    }

    pub fn len(&self) -> usize {
        self.schedule.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schedule.is_empty()
    }
}

#[async_trait]
impl PointerFeed for ReplayFeed {
    fn id(&self) -> &str {
        &self.id
    }

    async fn start(&mut self, hub: PointerHub) -> TrackerResult<()> {
        if self.is_running.load(Ordering::SeqCst) {
            return Err(TrackerError::AlreadyRunning(self.id.clone()));
        }

        self.is_running.store(true, Ordering::SeqCst);

        let schedule = self.schedule.clone();
        let running = RunningFlag(self.is_running.clone());

        self.task = Some(tokio::spawn(async move {
            // Cleared on completion, abort and panic alike
            let _running = running;
            let origin = tokio::time::Instant::now();

            for (offset, coordinate) in schedule.iter() {
                tokio::time::sleep_until(origin + *offset).await;
                hub.dispatch(*coordinate);
            }

            tracing::info!("Replay finished ({} moves)", schedule.len());
        }));

        Ok(())
    }

    async fn stop(&mut self) -> TrackerResult<()> {
        if let Some(task) = self.task.take() {
            task.abort();
            let _ = task.await;
        }
        self.is_running.store(false, Ordering::SeqCst);
        Ok(())
    }

    async fn finished(&mut self) {
        match self.task.as_mut() {
            Some(task) => {
                if let Err(e) = task.await {
                    if e.is_panic() {
                        tracing::error!("Replay task panicked");
                    }
                }
                self.task = None;
                self.is_running.store(false, Ordering::SeqCst);
            }
            None => std::future::pending::<()>().await,
        }
    }

    fn is_running(&self) -> bool {
        self.is_running.load(Ordering::SeqCst)
    }
}

struct RunningFlag(Arc<AtomicBool>);

impl Drop for RunningFlag {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl Drop for ReplayFeed {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex as ParkingMutex;
    use std::io::Write;

    fn sample(x: f64, y: f64, time_ms: f64) -> MouseMove {
        MouseMove {
            x,
            y,
            cursor_id: None,
            process_time_ms: time_ms,
        }
    }

    #[tokio::test]
    async fn test_replays_in_time_order() {
        let hub = PointerHub::new();
        let seen = Arc::new(ParkingMutex::new(Vec::new()));
        let sink = seen.clone();
        let _registration = hub.register(move |coordinate| sink.lock().push(coordinate));

        let mut feed = ReplayFeed::from_moves(vec![
            sample(15.0, 25.0, 10.0),
            sample(10.0, 20.0, 0.0),
            sample(15.0, 25.0, 20.0),
        ])
        .unwrap();

        feed.start(hub).await.unwrap();
        feed.finished().await;

        assert_eq!(
            *seen.lock(),
            vec![
                PointerCoordinate::new(10.0, 20.0),
                PointerCoordinate::new(15.0, 25.0),
                PointerCoordinate::new(15.0, 25.0),
            ]
        );
        assert!(!feed.is_running());
    }

    #[tokio::test]
    async fn test_stop_cancels_playback() {
        let hub = PointerHub::new();
        let seen = Arc::new(ParkingMutex::new(Vec::new()));
        let sink = seen.clone();
        let _registration = hub.register(move |coordinate| sink.lock().push(coordinate));

        let mut feed = ReplayFeed::from_moves(vec![sample(1.0, 1.0, 60_000.0)]).unwrap();
        feed.start(hub).await.unwrap();
        feed.stop().await.unwrap();

        assert!(seen.lock().is_empty());
        assert!(!feed.is_running());
    }

    #[test]
    fn test_load_recorded_trace() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"x": 1.0, "y": 2.0, "cursorId": "c", "activeModifiers": [], "processTimeMs": 0.0, "unixTimeMs": 0}},
                {{"x": 3.0, "y": 4.0, "cursorId": "c", "activeModifiers": [], "processTimeMs": 8.3, "unixTimeMs": 8}}
            ]"#
        )
        .unwrap();

        let feed = ReplayFeed::load(file.path()).unwrap();
        assert_eq!(feed.len(), 2);
    }

    #[test]
    fn test_rejects_out_of_range_times() {
        for time_ms in [1e300, f64::NAN, f64::INFINITY] {
            let result = ReplayFeed::from_moves(vec![sample(0.0, 0.0, 0.0), sample(1.0, 1.0, time_ms)]);
            assert!(
                matches!(result, Err(TrackerError::Configuration(_))),
                "time {} should be rejected",
                time_ms
            );
        }
    }

    #[tokio::test]
    async fn test_negative_time_plays_immediately() {
        let hub = PointerHub::new();
        let seen = Arc::new(ParkingMutex::new(Vec::new()));
        let sink = seen.clone();
        let _registration = hub.register(move |coordinate| sink.lock().push(coordinate));

        let mut feed = ReplayFeed::from_moves(vec![sample(2.0, 3.0, -50.0)]).unwrap();
        feed.start(hub).await.unwrap();
        feed.finished().await;

        assert_eq!(*seen.lock(), vec![PointerCoordinate::new(2.0, 3.0)]);
        assert!(!feed.is_running());
    }

    #[tokio::test]
    async fn test_running_flag_cleared_when_task_aborted() {
        let mut feed = ReplayFeed::from_moves(vec![sample(1.0, 1.0, 60_000.0)]).unwrap();
        feed.start(PointerHub::new()).await.unwrap();
        assert!(feed.is_running());

        if let Some(task) = feed.task.take() {
            task.abort();
            let _ = task.await;
        }

        assert!(!feed.is_running());
    }

    #[test]
    fn test_load_rejects_garbage() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{}}").unwrap();

        assert!(matches!(ReplayFeed::load(file.path()), Err(TrackerError::Json(_))));
    }
}
