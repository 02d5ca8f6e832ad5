//! Point and segment math used by hit-testing
//!
//! All coordinates are device pixels relative to the overlay's top-left corner.

use std::fmt;

/// A pixel position on the overlay
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Translate this point by the given offset, clamped to the `i32` range
    pub fn offset(self, dx: i64, dy: i64) -> Point {
        Point {
            x: clamp_coordinate(i64::from(self.x).saturating_add(dx)),
            y: clamp_coordinate(i64::from(self.y).saturating_add(dy)),
        }
    }

    /// Component-wise difference `self - other`
    pub fn delta_from(self, other: Point) -> (i64, i64) {
        (
            i64::from(self.x) - i64::from(other.x),
            i64::from(self.y) - i64::from(other.y),
        )
    }
}

fn clamp_coordinate(v: i64) -> i32 {
    v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Point { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Axis-aligned bounds with inclusive edges
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Bounds {
    /// Smallest bounds containing both points
    pub fn spanning(a: Point, b: Point) -> Self {
        Self {
            left: a.x.min(b.x),
            top: a.y.min(b.y),
            right: a.x.max(b.x),
            bottom: a.y.max(b.y),
        }
    }

    /// Grow the bounds outward on every side, stopping at the `i32` range
    pub fn inflate(&self, margin: i32) -> Bounds {
        Bounds {
            left: self.left.saturating_sub(margin),
            top: self.top.saturating_sub(margin),
            right: self.right.saturating_add(margin),
            bottom: self.bottom.saturating_add(margin),
        }
    }

    /// Check if this rectangle contains a point (edges included)
    pub fn contains_point(&self, p: Point) -> bool {
        p.x >= self.left && p.x <= self.right && p.y >= self.top && p.y <= self.bottom
    }
}

/// Euclidean distance between two points
pub fn distance(p: Point, q: Point) -> f32 {
    let dx = f64::from(p.x) - f64::from(q.x);
    let dy = f64::from(p.y) - f64::from(q.y);
    (dx * dx + dy * dy).sqrt() as f32
}

/// True when `p` lies strictly within `radius` of `q`
#[inline]
pub fn hits_point(p: Point, q: Point, radius: f32) -> bool {
    distance(p, q) < radius
}

/// Signed perpendicular offset of `p` from the infinite line through `a` and `b`
///
/// The line is expressed as `(u, v) · (x, y) = c` with `(u, v)` the unit normal,
/// so the result is in pixels. A zero-length segment is treated as the point `a`
/// and the (unsigned) distance to it is returned instead.
pub fn signed_offset_from_segment(p: Point, a: Point, b: Point) -> f32 {
    let dx = f64::from(b.x) - f64::from(a.x);
    let dy = f64::from(b.y) - f64::from(a.y);
    let length = (dx * dx + dy * dy).sqrt();
    if length == 0.0 {
        return distance(p, a);
    }

    // Perpendicular unit vector
    let u = -dy / length;
    let v = dx / length;

    let line = u * f64::from(a.x) + v * f64::from(a.y);
    let observed = u * f64::from(p.x) + v * f64::from(p.y);
    (observed - line) as f32
}
