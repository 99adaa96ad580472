//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Pointer coordinates (CSS pixels vs. the canvas pixel buffer)
//! - Canvas sizing
//! - Keyboard/button mapping
//! - The host page's session bridge

pub mod bridge;

pub use bridge::{HostBridge, NoBridge, RecordingBridge};

use glam::Vec2;

use crate::consts::{MAX_CSS_WIDTH, VIEWPORT_MARGIN};
use crate::sim::Command;

/// Maps client (CSS) coordinates onto the canvas's logical pixel buffer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasMapping {
    /// Canvas pixel buffer size
    pub logical: Vec2,
    /// Bounding rect origin in client coordinates
    pub origin: Vec2,
    /// Displayed size in CSS pixels
    pub displayed: Vec2,
}

impl CanvasMapping {
    pub fn new(logical: Vec2, origin: Vec2, displayed: Vec2) -> Self {
        Self {
            logical,
            origin,
            displayed,
        }
    }

    /// Convert a client-space point to logical canvas coordinates
    pub fn to_logical(&self, client: Vec2) -> Vec2 {
        let local = client - self.origin;
        // A collapsed element would divide by zero; treat it as unscaled
        let scale = Vec2::new(
            if self.displayed.x > 0.0 { self.logical.x / self.displayed.x } else { 1.0 },
            if self.displayed.y > 0.0 { self.logical.y / self.displayed.y } else { 1.0 },
        );
        local * scale
    }
}

/// CSS size for the canvas: fills the viewport width (capped), keeps the aspect ratio
pub fn fit_canvas(logical: Vec2, viewport_width: f32) -> Vec2 {
    let aspect = logical.x / logical.y;
    let width = (viewport_width - VIEWPORT_MARGIN).min(MAX_CSS_WIDTH).max(1.0);
    Vec2::new(width, (width / aspect).round())
}

/// Keyboard shortcut for a `KeyboardEvent.key` value
pub fn command_for_key(key: &str) -> Option<Command> {
    match key {
        "ArrowLeft" => Some(Command::LaneLeft),
        "ArrowRight" => Some(Command::LaneRight),
        " " => Some(Command::Jump),
        _ => None,
    }
}

/// On-screen control buttons and the command each one sends
pub const BUTTONS: [(&str, Command); 3] = [
    ("leftBtn", Command::LaneLeft),
    ("rightBtn", Command::LaneRight),
    ("jumpBtn", Command::Jump),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_scales_css_to_buffer() {
        // 480x800 buffer shown at 240x400, placed at (10, 20)
        let mapping = CanvasMapping::new(
            Vec2::new(480.0, 800.0),
            Vec2::new(10.0, 20.0),
            Vec2::new(240.0, 400.0),
        );
        assert_eq!(mapping.to_logical(Vec2::new(10.0, 20.0)), Vec2::ZERO);
        assert_eq!(mapping.to_logical(Vec2::new(130.0, 220.0)), Vec2::new(240.0, 400.0));
    }

    #[test]
    fn test_mapping_collapsed_element() {
        let mapping = CanvasMapping::new(Vec2::new(480.0, 800.0), Vec2::ZERO, Vec2::ZERO);
        assert_eq!(mapping.to_logical(Vec2::new(5.0, 7.0)), Vec2::new(5.0, 7.0));
    }

    #[test]
    fn test_fit_canvas() {
        let logical = Vec2::new(480.0, 800.0);
        assert_eq!(fit_canvas(logical, 420.0), Vec2::new(400.0, 667.0));
        // Wide screens cap at 900 css px
        assert_eq!(fit_canvas(logical, 2560.0), Vec2::new(900.0, 1500.0));
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(command_for_key("ArrowLeft"), Some(Command::LaneLeft));
        assert_eq!(command_for_key("ArrowRight"), Some(Command::LaneRight));
        assert_eq!(command_for_key(" "), Some(Command::Jump));
        assert_eq!(command_for_key("Enter"), None);
    }
}
