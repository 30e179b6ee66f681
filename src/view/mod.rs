//! Display view
//!
//! [`render`] is a pure mapping from a [`PointerCoordinate`] to a [`ViewTree`]:
//! a heading that spells out both numbers and a round marker translated to
//! the coordinate. Subscription and lifecycle live in [`crate::tracker`].

pub mod motion;

pub use motion::MarkerMotion;

use crate::pointer::PointerCoordinate;
use serde::Serialize;
use std::time::Duration;

/// Default duration of the marker's transform transition
pub const DEFAULT_TRANSITION: Duration = Duration::from_millis(100);

/// Default marker edge length in pixels
pub const DEFAULT_MARKER_SIZE: f64 = 20.0;

const BACKGROUND: &str = "#111827";
const FOREGROUND: &str = "#ffffff";
const MARKER_COLOR: &str = "#3b82f6";
const HEADING_SIZE_REM: f64 = 1.5;

/// Presentation knobs that do not depend on the coordinate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewOptions {
    pub transition: Duration,
    pub marker_size: f64,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            transition: DEFAULT_TRANSITION,
            marker_size: DEFAULT_MARKER_SIZE,
        }
    }
}

/// Rendered output of the display view
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewTree {
    pub container: Container,
    pub heading: Label,
    pub marker: Marker,
}

/// Full-screen backdrop that centers the heading
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    pub background: &'static str,
    pub foreground: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    pub text: String,
    pub font_size_rem: f64,
}

/// Round dot positioned by an identity translation of the coordinate
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Marker {
    pub translate_x: f64,
    pub translate_y: f64,
    pub size: f64,
    pub color: &'static str,
    pub transition_ms: u64,
}

impl Marker {
    pub fn target(&self) -> PointerCoordinate {
        PointerCoordinate::new(self.translate_x, self.translate_y)
    }

    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }

    /// Value of the CSS `transform` property
    pub fn transform(&self) -> String {
        format!("translate({}px, {}px)", self.translate_x, self.translate_y)
    }

    /// Inline style for the marker element
    pub fn style(&self) -> String {
        format!(
            "position: absolute; width: {size}px; height: {size}px; background-color: {color}; \
             border-radius: 9999px; pointer-events: none; transform: {transform}; \
             transition: transform {secs}s linear",
            size = self.size,
            color = self.color,
            transform = self.transform(),
            secs = self.transition_ms as f64 / 1000.0,
        )
    }
}

/// Render the view for one coordinate snapshot
pub fn render(coordinate: PointerCoordinate, options: &ViewOptions) -> ViewTree {
    ViewTree {
        container: Container {
            background: BACKGROUND,
            foreground: FOREGROUND,
        },
        heading: Label {
            text: format!("Mouse Position: {}", coordinate),
            font_size_rem: HEADING_SIZE_REM,
        },
        marker: Marker {
            translate_x: coordinate.x,
            translate_y: coordinate.y,
            size: options.marker_size,
            color: MARKER_COLOR,
            transition_ms: options.transition.as_millis() as u64,
        },
    }
}

impl ViewTree {
    /// Markup for a web host
    pub fn to_html(&self) -> String {
        format!(
            "<div style=\"height: 100vh; background-color: {bg}; color: {fg}; display: flex; \
             align-items: center; justify-content: center; position: relative\">\
             <h1 style=\"font-size: {font}rem\">{text}</h1>\
             <div style=\"{marker}\"></div></div>",
            bg = self.container.background,
            fg = self.container.foreground,
            font = self.heading.font_size_rem,
            text = escape_html(&self.heading.text),
            marker = self.marker.style(),
        )
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
