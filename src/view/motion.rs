//! Marker motion
//!
//! Samples where the marker visually is while its transform transitions
//! toward the latest target. Interpolation is linear over a fixed duration;
//! a new target picks up from the current visual position rather than
//! jumping back to the previous target.

use crate::pointer::PointerCoordinate;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct MarkerMotion {
    from: PointerCoordinate,
    to: PointerCoordinate,
    started: Instant,
    duration: Duration,
}

impl MarkerMotion {
    /// Create a marker at rest on `position`
    pub fn new(position: PointerCoordinate, duration: Duration, now: Instant) -> Self {
        Self {
            from: position,
            to: position,
            started: now,
            duration,
        }
    }

    pub fn target(&self) -> PointerCoordinate {
        self.to
    }

    pub fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
    }

    /// Start moving toward `target` from wherever the marker is at `now`
    pub fn retarget(&mut self, target: PointerCoordinate, now: Instant) {
        if target == self.to {
            return;
        }
        self.from = self.sample(now);
        self.to = target;
        self.started = now;
    }

    /// Progress of the current transition in `[0, 1]`
    fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Visual position at `now`
    pub fn sample(&self, now: Instant) -> PointerCoordinate {
        let t = self.progress(now);
        PointerCoordinate::new(
            self.from.x + (self.to.x - self.from.x) * t,
            self.from.y + (self.to.y - self.from.y) * t,
        )
    }

    /// Whether the marker has arrived at its target
    pub fn is_settled(&self, now: Instant) -> bool {
        self.from == self.to || self.progress(now) >= 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DURATION: Duration = Duration::from_millis(100);

    fn approx(a: PointerCoordinate, b: PointerCoordinate) -> bool {
        (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
    }

    #[test]
    fn test_at_rest_initially() {
        let now = Instant::now();
        let motion = MarkerMotion::new(PointerCoordinate::new(5.0, 5.0), DURATION, now);

        assert!(motion.is_settled(now));
        assert_eq!(motion.sample(now), PointerCoordinate::new(5.0, 5.0));
    }

    #[test]
    fn test_midpoint_and_arrival() {
        let start = Instant::now();
        let mut motion = MarkerMotion::new(PointerCoordinate::default(), DURATION, start);
        motion.retarget(PointerCoordinate::new(100.0, 200.0), start);

        let half = motion.sample(start + Duration::from_millis(50));
        assert!(approx(half, PointerCoordinate::new(50.0, 100.0)), "{:?}", half);
        assert!(!motion.is_settled(start + Duration::from_millis(50)));

        let end = start + Duration::from_millis(150);
        assert_eq!(motion.sample(end), PointerCoordinate::new(100.0, 200.0));
        assert!(motion.is_settled(end));
    }

    #[test]
    fn test_retarget_starts_from_visual_position() {
        let start = Instant::now();
        let mut motion = MarkerMotion::new(PointerCoordinate::default(), DURATION, start);
        motion.retarget(PointerCoordinate::new(100.0, 0.0), start);

        let mid = start + Duration::from_millis(50);
        motion.retarget(PointerCoordinate::new(100.0, 100.0), mid);

        // No jump at the moment of retargeting
        assert!(approx(motion.sample(mid), PointerCoordinate::new(50.0, 0.0)));

        let quarter = mid + Duration::from_millis(50);
        assert!(approx(motion.sample(quarter), PointerCoordinate::new(75.0, 50.0)));
    }

    #[test]
    fn test_same_target_does_not_restart() {
        let start = Instant::now();
        let mut motion = MarkerMotion::new(PointerCoordinate::default(), DURATION, start);
        motion.retarget(PointerCoordinate::new(10.0, 10.0), start);

        let later = start + Duration::from_millis(80);
        motion.retarget(PointerCoordinate::new(10.0, 10.0), later);

        assert!(motion.is_settled(start + Duration::from_millis(100)));
    }

    #[test]
    fn test_rest_tick_does_not_redraw_until_retargeted() {
        let start = Instant::now();
        let mut motion = MarkerMotion::new(PointerCoordinate::new(3.0, 3.0), DURATION, start);
        assert!(motion.is_settled(start + Duration::from_millis(1)));

        motion.retarget(PointerCoordinate::new(6.0, 3.0), start);
        assert!(!motion.is_settled(start + Duration::from_millis(1)));
    }

    #[test]
    fn test_zero_duration_jumps() {
        let now = Instant::now();
        let mut motion = MarkerMotion::new(PointerCoordinate::default(), Duration::ZERO, now);
        motion.retarget(PointerCoordinate::new(7.0, 9.0), now);

        assert_eq!(motion.sample(now), PointerCoordinate::new(7.0, 9.0));
    }
}
