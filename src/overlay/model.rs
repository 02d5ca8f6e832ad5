//! The set of elements on an overlay and its persisted string form
//!
//! Persisted state is the serialized form of every element joined with
//! [`ELEMENT_DELIMITER`], e.g. `5,5,10,10;0,0,20,3`.

use crate::config::ShapeColor;
use crate::domain::{DrawingElement, ElementHandle, ElementId, LineElement, Point};
use crate::error::{OverlayError, Result};
use crate::render::{StrokeStyle, Surface};

/// Separator between persisted elements
pub const ELEMENT_DELIMITER: &str = ";";

#[derive(Clone, Debug, PartialEq)]
struct Entry {
    id: ElementId,
    element: DrawingElement,
}

/// Elements owned by one overlay
///
/// Collection order only affects stacking when drawing.
#[derive(Clone, Debug, Default)]
pub struct OverlayModel {
    entries: Vec<Entry>,
    /// Ids are never reused, so a stale handle can't resolve to a newer element
    next_id: u64,
    line_color: ShapeColor,
}

impl OverlayModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Model whose new and restored lines use `color`
    pub fn with_line_color(color: ShapeColor) -> Self {
        Self {
            line_color: color,
            ..Self::default()
        }
    }

    pub fn line_color(&self) -> ShapeColor {
        self.line_color
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ElementId, &DrawingElement)> {
        self.entries.iter().map(|entry| (entry.id, &entry.element))
    }

    pub fn get(&self, id: ElementId) -> Option<&DrawingElement> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| &entry.element)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut DrawingElement> {
        self.entries
            .iter_mut()
            .find(|entry| entry.id == id)
            .map(|entry| &mut entry.element)
    }

    pub fn insert(&mut self, element: impl Into<DrawingElement>) -> ElementId {
        let id = self.allocate_id();
        self.entries.push(Entry {
            id,
            element: element.into(),
        });
        id
    }

    /// Add a line from `start` to `end` in the model's line color
    pub fn add_line(&mut self, start: Point, end: Point) -> ElementId {
        let mut line = LineElement::new(start, end);
        line.set_color(self.line_color);
        self.insert(line)
    }

    pub fn remove(&mut self, id: ElementId) -> Option<DrawingElement> {
        let index = self.entries.iter().position(|entry| entry.id == id)?;
        Some(self.entries.remove(index).element)
    }

    /// Remove every listed element; returns how many were present
    pub fn remove_all(&mut self, ids: &[ElementId]) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| !ids.contains(&entry.id));
        before - self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Handles offered by every element at `p`
    pub fn hit_test_all(&self, p: Point, proximity: f32) -> Vec<ElementHandle> {
        self.entries
            .iter()
            .filter_map(|entry| {
                entry
                    .element
                    .hit_test(p, proximity)
                    .map(|grab| ElementHandle::new(entry.id, grab))
            })
            .collect()
    }

    /// Move the element behind `handle`; false if that element is gone
    pub fn apply_handle(&mut self, handle: &ElementHandle, to: Point) -> bool {
        match self.get_mut(handle.element()) {
            Some(element) => {
                handle.move_to(element, to);
                true
            }
            None => false,
        }
    }

    pub fn draw_all<S: Surface + ?Sized>(&self, surface: &mut S, stroke: &StrokeStyle) {
        for entry in &self.entries {
            entry.element.draw(surface, stroke);
        }
    }

    pub fn serialize(&self) -> String {
        self.entries
            .iter()
            .map(|entry| entry.element.serialize())
            .collect::<Vec<_>>()
            .join(ELEMENT_DELIMITER)
    }

    /// Replace every element with those in `state`
    ///
    /// Empty tokens are skipped. If any token is malformed nothing changes.
    pub fn deserialize(&mut self, state: &str) -> Result<()> {
        let mut elements = Vec::new();
        for (index, token) in tokens(state).enumerate() {
            let element = self.parse_element(token).map_err(|source| {
                OverlayError::MalformedElement {
                    index,
                    source: Box::new(source),
                }
            })?;
            elements.push(element);
        }
        self.replace(elements);
        Ok(())
    }

    /// Replace every element with the well-formed ones in `state`
    ///
    /// Malformed tokens are logged and dropped. Returns how many were dropped.
    pub fn deserialize_lossy(&mut self, state: &str) -> usize {
        let mut skipped = 0;
        let mut elements = Vec::new();
        for (index, token) in tokens(state).enumerate() {
            match self.parse_element(token) {
                Ok(element) => elements.push(element),
                Err(err) => {
                    log::warn!("Skipping malformed element #{} {:?}: {}", index, token, err);
                    skipped += 1;
                }
            }
        }
        self.replace(elements);
        skipped
    }

    fn parse_element(&self, token: &str) -> Result<DrawingElement> {
        let mut element = DrawingElement::deserialize(token)?;
        let DrawingElement::Line(line) = &mut element;
        line.set_color(self.line_color);
        Ok(element)
    }

    fn replace(&mut self, elements: Vec<DrawingElement>) {
        self.entries.clear();
        for element in elements {
            self.insert(element);
        }
    }

    fn allocate_id(&mut self) -> ElementId {
        let id = ElementId::new(self.next_id);
        self.next_id += 1;
        id
    }
}

fn tokens(state: &str) -> impl Iterator<Item = &str> {
    state
        .split(ELEMENT_DELIMITER)
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// String persistence for an overlay's model
pub trait StatePersistence {
    /// Current state in its persisted form
    fn model_state(&self) -> String;
    /// Restore state from its persisted form, replacing the current state
    fn set_model_state(&mut self, state: &str) -> Result<()>;
}

impl StatePersistence for OverlayModel {
    fn model_state(&self) -> String {
        self.serialize()
    }

    fn set_model_state(&mut self, state: &str) -> Result<()> {
        self.deserialize(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Grab, PointIndex};

    #[derive(Default)]
    struct RecordingSurface {
        segments: Vec<(Point, Point)>,
    }

    impl Surface for RecordingSurface {
        fn stroke_segment(&mut self, start: Point, end: Point, _: ShapeColor, _: &StrokeStyle) {
            self.segments.push((start, end));
        }
    }

    fn sample_model() -> OverlayModel {
        let mut model = OverlayModel::new();
        model.add_line(Point::new(5, 5), Point::new(10, 10));
        model.add_line(Point::new(0, 20), Point::new(29, 20));
        model
    }

    fn lines(model: &OverlayModel) -> Vec<(Point, Point)> {
        let mut surface = RecordingSurface::default();
        model.draw_all(&mut surface, &StrokeStyle::default());
        surface.segments
    }

    #[test]
    fn test_serialize() {
        assert_eq!(sample_model().serialize(), "5,5,10,10;0,20,29,20");
        assert_eq!(OverlayModel::new().serialize(), "");
    }

    #[test]
    fn test_round_trip() {
        let model = sample_model();
        let mut restored = OverlayModel::new();
        restored.deserialize(&model.serialize()).unwrap();
        assert_eq!(lines(&restored), lines(&model));
    }

    #[test]
    fn test_deserialize_replaces_collection() {
        let mut model = sample_model();
        model.deserialize("1,1,2,2").unwrap();
        assert_eq!(lines(&model), vec![(Point::new(1, 1), Point::new(2, 2))]);

        model.deserialize("").unwrap();
        assert!(model.is_empty());
    }

    #[test]
    fn test_deserialize_skips_empty_tokens() {
        let mut model = OverlayModel::new();
        model.deserialize(";1,1,2,2;; 3,3,4,4 ;").unwrap();
        assert_eq!(model.len(), 2);
    }

    #[test]
    fn test_deserialize_malformed_leaves_state() {
        let mut model = sample_model();
        let err = model.deserialize("1,1,2,2;1,1,oops,2").unwrap_err();
        assert!(matches!(
            err,
            OverlayError::MalformedElement { index: 1, .. }
        ));
        assert_eq!(model.serialize(), "5,5,10,10;0,20,29,20");
    }

    #[test]
    fn test_deserialize_lossy_skips_bad_tokens() {
        let mut model = sample_model();
        let skipped = model.deserialize_lossy("1,1,2,2;garbage;3,3,4;6,6,7,7");
        assert_eq!(skipped, 2);
        assert_eq!(model.serialize(), "1,1,2,2;6,6,7,7");
    }

    #[test]
    fn test_restored_lines_use_model_color() {
        let green = ShapeColor {
            r: 0.0,
            g: 1.0,
            b: 0.0,
        };
        let mut model = OverlayModel::with_line_color(green);
        model.deserialize("1,1,2,2").unwrap();
        let (_, element) = model.iter().next().unwrap();
        assert_eq!(element.as_line().unwrap().color(), green);
    }

    #[test]
    fn test_hit_test_all_collects_overlapping_elements() {
        let mut model = OverlayModel::new();
        let a = model.add_line(Point::new(0, 0), Point::new(20, 0));
        let b = model.add_line(Point::new(0, 3), Point::new(20, 3));
        model.add_line(Point::new(100, 100), Point::new(120, 100));

        let handles = model.hit_test_all(Point::new(1, 1), 8.0);
        let ids: Vec<_> = handles.iter().map(|h| h.element()).collect();
        assert_eq!(ids, vec![a, b]);
        assert!(
            handles
                .iter()
                .all(|h| *h.grab() == Grab::Point(PointIndex::Start))
        );
    }

    #[test]
    fn test_remove_all_and_ids_not_reused() {
        let mut model = sample_model();
        let ids: Vec<_> = model.iter().map(|(id, _)| id).collect();
        assert_eq!(model.remove_all(&ids), 2);
        assert!(model.is_empty());

        let fresh = model.add_line(Point::ORIGIN, Point::ORIGIN);
        assert!(!ids.contains(&fresh));
    }

    #[test]
    fn test_apply_handle_to_removed_element() {
        let mut model = OverlayModel::new();
        let id = model.add_line(Point::new(0, 0), Point::new(10, 0));
        let handle = ElementHandle::new(id, Grab::Point(PointIndex::End));

        assert!(model.apply_handle(&handle, Point::new(15, 5)));
        assert_eq!(lines(&model), vec![(Point::new(0, 0), Point::new(15, 5))]);

        model.remove(id);
        assert!(!model.apply_handle(&handle, Point::new(1, 1)));
    }

    #[test]
    fn test_state_persistence_trait() {
        let model = sample_model();
        let mut other = OverlayModel::new();
        other.set_model_state(&model.model_state()).unwrap();
        assert_eq!(other.model_state(), model.model_state());
    }
}
