//! Mount lifecycle for the display view
//!
//! Mounting activates a [`PositionSource`] and renders the initial frame.
//! The subscription lives exactly as long as the [`MountedTracker`]: it is
//! released by [`MountedTracker::unmount`], or by drop on any other exit
//! path (error, panic, cancelled task).

use crate::error::TrackerResult;
use crate::pointer::{PointerCoordinate, PointerHub, PositionSource};
use crate::surface::DisplaySurface;
use crate::view::{render, ViewOptions, ViewTree};
use std::future::Future;
use std::time::Duration;
use tokio::time::MissedTickBehavior;

/// Animation frame interval while the surface reports motion (~60Hz)
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// The mouse tracker widget, before it is mounted
#[derive(Debug, Clone, Default)]
pub struct MouseTracker {
    options: ViewOptions,
}

impl MouseTracker {
    pub fn new(options: ViewOptions) -> Self {
        Self { options }
    }

    /// Subscribe to `hub` and present the initial frame on `surface`
    pub fn mount<S: DisplaySurface>(
        &self,
        hub: &PointerHub,
        surface: S,
    ) -> TrackerResult<MountedTracker<S>> {
        let source = PositionSource::activate(hub);
        let initial = source.current();

        let mut mounted = MountedTracker {
            source,
            surface,
            options: self.options,
            view: render(initial, &self.options),
            renders: 0,
        };
        mounted.render_and_present(initial)?;

        tracing::info!("Mouse tracker mounted at {}", initial);
        Ok(mounted)
    }
}

pub struct MountedTracker<S: DisplaySurface> {
    source: PositionSource,
    surface: S,
    options: ViewOptions,
    view: ViewTree,
    renders: usize,
}

impl<S: DisplaySurface> MountedTracker<S> {
    /// Most recently rendered view
    pub fn view(&self) -> &ViewTree {
        &self.view
    }

    pub fn coordinate(&self) -> PointerCoordinate {
        self.view.marker.target()
    }

    /// Number of renders since mount, the initial one included
    pub fn render_count(&self) -> usize {
        self.renders
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    fn render_and_present(&mut self, coordinate: PointerCoordinate) -> TrackerResult<()> {
        self.view = render(coordinate, &self.options);
        self.renders += 1;
        self.surface.present(&self.view)?;

        tracing::trace!("Rendered frame {} at {}", self.renders, coordinate);
        Ok(())
    }

    /// Re-render if the coordinate changed since the last render.
    ///
    /// Returns whether a new frame was presented.
    pub fn refresh(&mut self) -> TrackerResult<bool> {
        match self.source.take_changed() {
            Some(coordinate) => {
                self.render_and_present(coordinate)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Re-render on every change until `shutdown` resolves, then unmount.
    ///
    /// Hands the surface back once the subscription has been released.
    pub async fn run_until<F>(mut self, shutdown: F) -> TrackerResult<S>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        let mut frames = tokio::time::interval(FRAME_INTERVAL);
        frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut animating = false;

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                changed = self.source.changed() => match changed {
                    Some(coordinate) => {
                        self.render_and_present(coordinate)?;
                        animating = true;
                    }
                    None => break,
                },
                _ = frames.tick(), if animating => {
                    animating = self.surface.tick()?;
                }
            }
        }

        Ok(self.unmount())
    }

    /// Release the subscription and hand back the surface
    pub fn unmount(mut self) -> S {
        self.source.release();
        tracing::info!(
            "Mouse tracker unmounted (renders={}, last={})",
            self.renders,
            self.coordinate()
        );
        self.surface
    }
}
