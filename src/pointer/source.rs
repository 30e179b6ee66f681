//! Position source
//!
//! Subscribes to a [`PointerHub`] and keeps the latest [`PointerCoordinate`]
//! in a `tokio::sync::watch` channel. Consumers read snapshots by value and
//! are told when the coordinate actually changed.

use super::hub::{PointerHub, Registration};
use super::types::PointerCoordinate;
use tokio::sync::watch;

pub struct PositionSource {
    receiver: watch::Receiver<PointerCoordinate>,
    registration: Option<Registration>,
}

impl PositionSource {
    /// Register with the hub, starting from the default coordinate
    pub fn activate(hub: &PointerHub) -> Self {
        let (sender, receiver) = watch::channel(PointerCoordinate::default());

        let registration = hub.register(move |coordinate| {
            // A repeated position is not a change and must not wake consumers
            sender.send_if_modified(|current| {
                if *current == coordinate {
                    false
                } else {
                    *current = coordinate;
                    true
                }
            });
        });

        tracing::debug!("Position source activated (listener={})", registration.id());

        Self {
            receiver,
            registration: Some(registration),
        }
    }

    /// Snapshot of the current coordinate
    pub fn current(&self) -> PointerCoordinate {
        *self.receiver.borrow()
    }

    /// Whether a new coordinate arrived since the last [`take_changed`](Self::take_changed)
    pub fn has_changed(&self) -> bool {
        self.is_active() && self.receiver.has_changed().unwrap_or(false)
    }

    /// Return the coordinate if it changed since last seen, marking it seen
    pub fn take_changed(&mut self) -> Option<PointerCoordinate> {
        if !self.has_changed() {
            return None;
        }
        Some(*self.receiver.borrow_and_update())
    }

    /// Wait for the next coordinate change.
    ///
    /// Returns `None` once the source has been released.
    pub async fn changed(&mut self) -> Option<PointerCoordinate> {
        if !self.is_active() {
            return None;
        }
        self.receiver.changed().await.ok()?;
        Some(*self.receiver.borrow_and_update())
    }

    pub fn is_active(&self) -> bool {
        self.registration.is_some()
    }

    /// Deregister from the hub. Later calls are no-ops.
    pub fn release(&mut self) {
        if let Some(registration) = self.registration.take() {
            tracing::debug!("Position source released (listener={})", registration.id());
            registration.release();
        }
    }
}

impl Drop for PositionSource {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_origin() {
        let hub = PointerHub::new();
        let source = PositionSource::activate(&hub);

        assert_eq!(source.current(), PointerCoordinate::new(0.0, 0.0));
        assert!(!source.has_changed());
    }

    #[test]
    fn test_follows_latest_notification() {
        let hub = PointerHub::new();
        let mut source = PositionSource::activate(&hub);

        hub.dispatch(PointerCoordinate::new(10.0, 20.0));
        hub.dispatch(PointerCoordinate::new(15.0, 25.0));

        assert_eq!(source.take_changed(), Some(PointerCoordinate::new(15.0, 25.0)));
        assert_eq!(source.take_changed(), None);
    }

    #[test]
    fn test_duplicate_is_not_a_change() {
        let hub = PointerHub::new();
        let mut source = PositionSource::activate(&hub);

        hub.dispatch(PointerCoordinate::new(15.0, 25.0));
        assert!(source.take_changed().is_some());

        hub.dispatch(PointerCoordinate::new(15.0, 25.0));
        assert!(!source.has_changed());
        assert_eq!(source.current(), PointerCoordinate::new(15.0, 25.0));
    }

    #[test]
    fn test_release_stops_updates() {
        let hub = PointerHub::new();
        let mut source = PositionSource::activate(&hub);
        hub.dispatch(PointerCoordinate::new(1.0, 1.0));

        source.release();
        hub.dispatch(PointerCoordinate::new(9.0, 9.0));

        assert!(!source.is_active());
        assert_eq!(source.current(), PointerCoordinate::new(1.0, 1.0));
        assert_eq!(source.take_changed(), None);
        assert_eq!(hub.listener_count(), 0);
    }

    #[test]
    fn test_release_then_drop_deregisters_once() {
        let hub = PointerHub::new();
        let mut source = PositionSource::activate(&hub);

        source.release();
        source.release();
        drop(source);

        assert_eq!(hub.released_count(), 1);
    }

    #[tokio::test]
    async fn test_changed_wakes_on_dispatch() {
        let hub = PointerHub::new();
        let mut source = PositionSource::activate(&hub);

        let feeder = hub.clone();
        tokio::spawn(async move {
            feeder.dispatch(PointerCoordinate::new(3.0, 4.0));
        });

        assert_eq!(source.changed().await, Some(PointerCoordinate::new(3.0, 4.0)));
    }

    #[tokio::test]
    async fn test_changed_after_release_is_none() {
        let hub = PointerHub::new();
        let mut source = PositionSource::activate(&hub);
        source.release();

        assert_eq!(source.changed().await, None);
    }
}
