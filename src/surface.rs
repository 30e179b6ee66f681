//! Display surfaces
//!
//! A surface is where rendered [`ViewTree`]s end up. The terminal surface
//! also plays the host's part of animating the marker between frames.

use crate::error::{TrackerError, TrackerResult};
use crate::view::{MarkerMotion, ViewTree};
use std::io::Write;
use std::time::Instant;

/// Receiver of rendered frames
pub trait DisplaySurface {
    /// Show a newly rendered view
    fn present(&mut self, tree: &ViewTree) -> TrackerResult<()>;

    /// Advance any in-flight animation.
    ///
    /// Returns `true` while the surface still has motion to show.
    fn tick(&mut self) -> TrackerResult<bool> {
        Ok(false)
    }
}

impl<S: DisplaySurface + ?Sized> DisplaySurface for Box<S> {
    fn present(&mut self, tree: &ViewTree) -> TrackerResult<()> {
        (**self).present(tree)
    }

    fn tick(&mut self) -> TrackerResult<bool> {
        (**self).tick()
    }
}

/// Single-line terminal readout of the label and the marker's visual position
pub struct TerminalSurface<W: Write> {
    out: W,
    label: String,
    motion: Option<MarkerMotion>,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            label: String::new(),
            motion: None,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn present_at(&mut self, tree: &ViewTree, now: Instant) -> TrackerResult<()> {
        let target = tree.marker.target();
        match self.motion.as_mut() {
            Some(motion) => {
                motion.set_duration(tree.marker.transition());
                motion.retarget(target, now);
            }
            None => {
                self.motion = Some(MarkerMotion::new(target, tree.marker.transition(), now));
            }
        }
        self.label = tree.heading.text.clone();
        self.draw(now)
    }

    pub fn tick_at(&mut self, now: Instant) -> TrackerResult<bool> {
        let animating = self
            .motion
            .as_ref()
            .map(|motion| !motion.is_settled(now))
            .unwrap_or(false);
        if animating {
            self.draw(now)?;
        }
        Ok(animating)
    }

    fn draw(&mut self, now: Instant) -> TrackerResult<()> {
        let Some(motion) = self.motion.as_ref() else {
            return Ok(());
        };
        let visual = motion.sample(now);
        write!(
            self.out,
            "\r{}  \u{25cf} ({:.1}, {:.1})\x1b[K",
            self.label, visual.x, visual.y
        )?;
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write> DisplaySurface for TerminalSurface<W> {
    fn present(&mut self, tree: &ViewTree) -> TrackerResult<()> {
        self.present_at(tree, Instant::now())
    }

    fn tick(&mut self) -> TrackerResult<bool> {
        self.tick_at(Instant::now())
    }
}

/// One JSON document per rendered frame, for hosts that draw the view themselves
pub struct JsonLinesSurface<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesSurface<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> DisplaySurface for JsonLinesSurface<W> {
    fn present(&mut self, tree: &ViewTree) -> TrackerResult<()> {
        serde_json::to_writer(&mut self.out, tree)
            .map_err(|e| TrackerError::Surface(format!("Failed to encode frame: {}", e)))?;
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        Ok(())
    }
}
