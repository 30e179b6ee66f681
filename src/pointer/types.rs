use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of the pointer in host pointer units.
///
/// A coordinate is always defined: before the first move notification the
/// default `(0, 0)` is used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PointerCoordinate {
    pub x: f64,
    pub y: f64,
}

impl PointerCoordinate {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for PointerCoordinate {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for PointerCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "X: {}, Y: {}", unsigned_zero(self.x), unsigned_zero(self.y))
    }
}

/// `-0.0` prints as `-0`; hosts print it as `0`
fn unsigned_zero(value: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else {
        value
    }
}

/// A recorded pointer sample, as written to `*-mouse-moves.json` traces.
///
/// Traces may carry extra fields (modifiers, wall-clock time); they are
/// ignored on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MouseMove {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor_id: Option<String>,
    pub process_time_ms: f64,
}

impl MouseMove {
    pub fn coordinate(&self) -> PointerCoordinate {
        PointerCoordinate::new(self.x, self.y)
    }
}
