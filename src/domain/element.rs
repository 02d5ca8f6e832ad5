//! Drawing elements placed on an overlay

use std::fmt;

use super::geometry::Point;
use super::handle::Grab;
use super::line::LineElement;
use crate::error::Result;
use crate::render::{StrokeStyle, Surface};

/// Stable identity of an element within one overlay model
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(u64);

impl ElementId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Unified element type for drawing, hit-testing and persistence
#[derive(Clone, Debug, PartialEq)]
pub enum DrawingElement {
    Line(LineElement),
}

impl DrawingElement {
    /// What a press at `p` would grab, if anything
    pub fn hit_test(&self, p: Point, proximity: f32) -> Option<Grab> {
        match self {
            DrawingElement::Line(line) => line.hit_test_within(p, proximity),
        }
    }

    pub fn apply_grab(&mut self, grab: &Grab, to: Point) {
        match self {
            DrawingElement::Line(line) => line.apply_grab(grab, to),
        }
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, stroke: &StrokeStyle) {
        match self {
            DrawingElement::Line(line) => line.draw(surface, stroke),
        }
    }

    pub fn serialize(&self) -> String {
        match self {
            DrawingElement::Line(line) => line.serialize(),
        }
    }

    /// Parse one persisted element token
    ///
    /// Lines are the only persisted variant, so tokens carry no type tag.
    pub fn deserialize(token: &str) -> Result<Self> {
        Ok(DrawingElement::Line(token.parse()?))
    }

    pub fn as_line(&self) -> Option<&LineElement> {
        match self {
            DrawingElement::Line(line) => Some(line),
        }
    }
}

impl From<LineElement> for DrawingElement {
    fn from(line: LineElement) -> Self {
        DrawingElement::Line(line)
    }
}
