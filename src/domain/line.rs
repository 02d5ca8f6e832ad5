//! Straight line segment element
//!
//! Persisted as `start.x,start.y,end.x,end.y`. The color is a display
//! attribute only and is never written out.

use std::fmt;
use std::str::FromStr;

use super::geometry::{self, Bounds, Point};
use super::handle::{BodySnapshot, Grab, PointIndex};
use crate::config::ShapeColor;
use crate::error::{OverlayError, Result};
use crate::render::{StrokeStyle, Surface};

/// Distance in pixels from a line within which a press grabs it
pub const HANDLE_PROXIMITY: f32 = 8.0;

/// Number of coordinates in a persisted line
const COORDINATE_COUNT: usize = 4;

#[derive(Clone, Debug, PartialEq)]
pub struct LineElement {
    start: Point,
    end: Point,
    color: ShapeColor,
}

impl Default for LineElement {
    /// A line collapsed onto the origin
    fn default() -> Self {
        Self::new(Point::ORIGIN, Point::ORIGIN)
    }
}

impl LineElement {
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            start,
            end,
            color: ShapeColor::default(),
        }
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    pub fn color(&self) -> ShapeColor {
        self.color
    }

    pub fn set_color(&mut self, color: ShapeColor) {
        self.color = color;
    }

    /// Set point 0 (start) or 1 (end)
    pub fn set_point(&mut self, index: usize, p: Point) -> Result<()> {
        let which = PointIndex::try_from(index)?;
        self.set_endpoint(which, p);
        Ok(())
    }

    pub fn set_endpoint(&mut self, which: PointIndex, p: Point) {
        match which {
            PointIndex::Start => self.start = p,
            PointIndex::End => self.end = p,
        }
    }

    /// Grab that stretches the end point while the start stays fixed
    pub fn end_grab(&self) -> Grab {
        Grab::Point(PointIndex::End)
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::spanning(self.start, self.end)
    }

    /// Hit-test with the default [`HANDLE_PROXIMITY`]
    pub fn hit_test(&self, p: Point) -> Option<Grab> {
        self.hit_test_within(p, HANDLE_PROXIMITY)
    }

    /// Find what a press at `p` would grab, if anything
    ///
    /// Endpoints win over the body: a press near both the start point and the
    /// segment always yields the start point.
    pub fn hit_test_within(&self, p: Point, proximity: f32) -> Option<Grab> {
        let margin = proximity.ceil() as i32;
        if !self.bounds().inflate(margin).contains_point(p) {
            return None;
        }

        if geometry::hits_point(p, self.start, proximity) {
            return Some(Grab::Point(PointIndex::Start));
        }
        if geometry::hits_point(p, self.end, proximity) {
            return Some(Grab::Point(PointIndex::End));
        }

        // The bounding box test already keeps us within the segment's extent,
        // so proximity to the infinite line is enough here.
        let offset = geometry::signed_offset_from_segment(p, self.start, self.end);
        (offset.abs() < proximity)
            .then(|| Grab::Body(BodySnapshot::new(p, self.start, self.end)))
    }

    /// Move the grabbed part of this line to follow the pointer at `to`
    pub fn apply_grab(&mut self, grab: &Grab, to: Point) {
        match grab {
            Grab::Point(which) => self.set_endpoint(*which, to),
            Grab::Body(snapshot) => {
                let (start, end) = snapshot.translated(to);
                self.start = start;
                self.end = end;
            }
        }
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, stroke: &StrokeStyle) {
        surface.stroke_segment(self.start, self.end, self.color, stroke);
    }

    /// Persisted form of this line's geometry
    pub fn serialize(&self) -> String {
        self.to_string()
    }

    /// Replace this line's geometry from its persisted form
    ///
    /// On error the current geometry is left untouched.
    pub fn deserialize(&mut self, s: &str) -> Result<()> {
        let parsed: LineElement = s.parse()?;
        self.start = parsed.start;
        self.end = parsed.end;
        Ok(())
    }
}

impl fmt::Display for LineElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.start.x, self.start.y, self.end.x, self.end.y
        )
    }
}

impl FromStr for LineElement {
    type Err = OverlayError;

    fn from_str(s: &str) -> Result<Self> {
        let tokens: Vec<&str> = s.split(',').map(str::trim).collect();
        if tokens.len() != COORDINATE_COUNT {
            return Err(OverlayError::WrongTokenCount {
                expected: COORDINATE_COUNT,
                found: tokens.len(),
            });
        }

        let mut coords = [0i32; COORDINATE_COUNT];
        for (slot, token) in coords.iter_mut().zip(&tokens) {
            *slot = token
                .parse()
                .map_err(|source| OverlayError::InvalidCoordinate {
                    token: (*token).to_string(),
                    source,
                })?;
        }

        let [x1, y1, x2, y2] = coords;
        Ok(LineElement::new(Point::new(x1, y1), Point::new(x2, y2)))
    }
}
