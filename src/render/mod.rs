//! Overlay rendering module
//!
//! This module contains:
//! - The `Surface` abstraction elements draw onto
//! - Stroke constants shared by every element
//! - Raster rendering using tiny-skia (for hosts and for saving to file)

pub mod geometry;
pub mod image;

use crate::config::{OverlayConfig, ShapeColor};
use crate::domain::Point;

/// Anything an overlay can draw onto
pub trait Surface {
    /// Stroke a straight segment between two pixel positions
    fn stroke_segment(&mut self, start: Point, end: Point, color: ShapeColor, stroke: &StrokeStyle);
}

/// How segments are stroked
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Stroke width in pixels
    pub width: f32,
    pub anti_alias: bool,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            width: geometry::line::THICKNESS,
            anti_alias: false,
        }
    }
}

impl From<&OverlayConfig> for StrokeStyle {
    fn from(config: &OverlayConfig) -> Self {
        Self {
            width: config.stroke_width,
            anti_alias: config.anti_alias,
        }
    }
}
