//! Element handles: transient tokens that mediate a single drag gesture
//!
//! A handle is produced by hit-testing an element at press time, moved for
//! every drag event, and dropped at release.

use super::element::{DrawingElement, ElementId};
use super::geometry::Point;
use crate::error::OverlayError;

/// Which end of a line a point handle is bound to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointIndex {
    Start,
    End,
}

impl TryFrom<usize> for PointIndex {
    type Error = OverlayError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        match index {
            0 => Ok(PointIndex::Start),
            1 => Ok(PointIndex::End),
            _ => Err(OverlayError::InvalidPointIndex(index)),
        }
    }
}

/// Geometry of a line captured when its body was grabbed
///
/// Never mutated after creation; every move is computed from this snapshot
/// and the original grab position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BodySnapshot {
    /// Pointer position at grab time
    pub origin: Point,
    /// Line start at grab time
    pub start: Point,
    /// Line end at grab time
    pub end: Point,
}

impl BodySnapshot {
    pub fn new(origin: Point, start: Point, end: Point) -> Self {
        Self { origin, start, end }
    }

    /// Start and end after dragging the grab point to `to`
    ///
    /// Coordinates pushed past the `i32` range stop at its edge.
    pub fn translated(&self, to: Point) -> (Point, Point) {
        let (dx, dy) = to.delta_from(self.origin);
        (self.start.offset(dx, dy), self.end.offset(dx, dy))
    }
}

/// The part of an element a handle holds on to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Grab {
    /// A single endpoint, moved directly to the pointer
    Point(PointIndex),
    /// The whole element, translated with the pointer
    Body(BodySnapshot),
}

impl Grab {
    pub fn is_body(&self) -> bool {
        matches!(self, Grab::Body(_))
    }
}

/// A grab bound to one element of an overlay
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ElementHandle {
    element: ElementId,
    grab: Grab,
}

impl ElementHandle {
    pub fn new(element: ElementId, grab: Grab) -> Self {
        Self { element, grab }
    }

    /// The element this handle manipulates
    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn grab(&self) -> &Grab {
        &self.grab
    }

    /// Move the grabbed part of `target` so that it follows the pointer at `to`
    pub fn move_to(&self, target: &mut DrawingElement, to: Point) {
        target.apply_grab(&self.grab, to);
    }
}
