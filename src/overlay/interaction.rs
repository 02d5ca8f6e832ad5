//! Pointer gesture state machine
//!
//! - Primary press grabs every element under the pointer, or starts a new line
//! - Drag moves all grabbed handles and reports `Updating`
//! - Primary release ends the gesture and reports `Updated`
//! - Secondary release deletes every element under the pointer

use super::listeners::{ListenerRegistry, OverlayEvent};
use super::model::OverlayModel;
use crate::domain::{DrawingElement, ElementHandle, LineElement, Point};

/// Pointer button as seen by the overlay
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    /// Draws and drags (usually the left button)
    Primary,
    /// Deletes (usually the right button)
    Secondary,
}

/// Pointer input forwarded by the host
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEvent {
    Press { position: Point, button: PointerButton },
    Drag { position: Point },
    Release { position: Point, button: PointerButton },
}

/// Where the current gesture stands
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum GestureState {
    #[default]
    Idle,
    /// Handles grabbed by a primary press, held until release
    Manipulating(Vec<ElementHandle>),
}

/// Drives an [`OverlayModel`] from pointer events
#[derive(Clone, Debug)]
pub struct Interaction {
    state: GestureState,
    proximity: f32,
}

impl Interaction {
    pub fn new(proximity: f32) -> Self {
        Self {
            state: GestureState::Idle,
            proximity,
        }
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    pub fn is_manipulating(&self) -> bool {
        matches!(self.state, GestureState::Manipulating(_))
    }

    pub fn active_handle_count(&self) -> usize {
        match &self.state {
            GestureState::Idle => 0,
            GestureState::Manipulating(handles) => handles.len(),
        }
    }

    /// Apply one pointer event; returns the notification it fired, if any
    pub fn handle(
        &mut self,
        event: PointerEvent,
        model: &mut OverlayModel,
        listeners: &mut ListenerRegistry,
    ) -> Option<OverlayEvent> {
        let fired = match event {
            PointerEvent::Press { position, button } => {
                self.press(position, button, model);
                None
            }
            PointerEvent::Drag { position } => self.drag(position, model),
            PointerEvent::Release { position, button } => self.release(position, button, model),
        };
        if let Some(event) = fired {
            listeners.notify(event);
        }
        fired
    }

    /// Drop the current gesture without reporting it
    ///
    /// For hosts that lose pointer capture mid-drag.
    pub fn cancel(&mut self) {
        if self.is_manipulating() {
            log::debug!("Gesture cancelled with {} handle(s)", self.active_handle_count());
        }
        self.state = GestureState::Idle;
    }

    fn press(&mut self, position: Point, button: PointerButton, model: &mut OverlayModel) {
        // Deletion is decided at release
        if button != PointerButton::Primary {
            return;
        }

        if self.is_manipulating() {
            log::debug!("Primary press without a release; starting a fresh gesture");
        }

        let mut handles = model.hit_test_all(position, self.proximity);
        if handles.is_empty() {
            let id = model.add_line(position, position);
            log::debug!("Started line {} at {}", id, position);
            let grab = model
                .get(id)
                .and_then(DrawingElement::as_line)
                .map(LineElement::end_grab);
            handles.extend(grab.map(|grab| ElementHandle::new(id, grab)));
        } else {
            log::debug!("Grabbed {} handle(s) at {}", handles.len(), position);
        }
        self.state = GestureState::Manipulating(handles);
    }

    fn drag(&mut self, position: Point, model: &mut OverlayModel) -> Option<OverlayEvent> {
        let GestureState::Manipulating(handles) = &self.state else {
            return None;
        };
        if handles.is_empty() {
            return None;
        }

        log::trace!("Moving {} handle(s) to {}", handles.len(), position);
        for handle in handles {
            if !model.apply_handle(handle, position) {
                log::debug!("Handle for removed element {} ignored", handle.element());
            }
        }
        Some(OverlayEvent::Updating)
    }

    fn release(
        &mut self,
        position: Point,
        button: PointerButton,
        model: &mut OverlayModel,
    ) -> Option<OverlayEvent> {
        match button {
            PointerButton::Primary => {
                let state = std::mem::take(&mut self.state);
                match state {
                    GestureState::Manipulating(handles) if !handles.is_empty() => {
                        log::debug!("Gesture completed at {}", position);
                        Some(OverlayEvent::Updated)
                    }
                    _ => None,
                }
            }
            PointerButton::Secondary => self.delete_at(position, model),
        }
    }

    fn delete_at(&mut self, position: Point, model: &mut OverlayModel) -> Option<OverlayEvent> {
        let doomed: Vec<_> = model
            .hit_test_all(position, self.proximity)
            .iter()
            .map(ElementHandle::element)
            .collect();
        let removed = model.remove_all(&doomed);
        if removed == 0 {
            return None;
        }

        log::debug!("Deleted {} element(s) at {}", removed, position);
        if let GestureState::Manipulating(handles) = &mut self.state {
            handles.retain(|handle| !doomed.contains(&handle.element()));
        }
        Some(OverlayEvent::Updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Grab, PointIndex};

    fn press(x: i32, y: i32) -> PointerEvent {
        PointerEvent::Press {
            position: Point::new(x, y),
            button: PointerButton::Primary,
        }
    }

    fn drag(x: i32, y: i32) -> PointerEvent {
        PointerEvent::Drag {
            position: Point::new(x, y),
        }
    }

    fn release(x: i32, y: i32) -> PointerEvent {
        PointerEvent::Release {
            position: Point::new(x, y),
            button: PointerButton::Primary,
        }
    }

    fn secondary_press(x: i32, y: i32) -> PointerEvent {
        PointerEvent::Press {
            position: Point::new(x, y),
            button: PointerButton::Secondary,
        }
    }

    fn secondary_release(x: i32, y: i32) -> PointerEvent {
        PointerEvent::Release {
            position: Point::new(x, y),
            button: PointerButton::Secondary,
        }
    }

    struct Harness {
        interaction: Interaction,
        model: OverlayModel,
        listeners: ListenerRegistry,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                interaction: Interaction::new(8.0),
                model: OverlayModel::new(),
                listeners: ListenerRegistry::new(),
            }
        }

        fn send(&mut self, event: PointerEvent) -> Option<OverlayEvent> {
            self.interaction
                .handle(event, &mut self.model, &mut self.listeners)
        }

        fn only_line(&self) -> (Point, Point) {
            assert_eq!(self.model.len(), 1);
            let (_, element) = self.model.iter().next().unwrap();
            let line = element.as_line().unwrap();
            (line.start(), line.end())
        }
    }

    #[test]
    fn test_press_on_empty_overlay_starts_line() {
        let mut h = Harness::new();
        assert_eq!(h.send(press(5, 5)), None);

        assert_eq!(h.only_line(), (Point::new(5, 5), Point::new(5, 5)));
        let GestureState::Manipulating(handles) = h.interaction.state() else {
            panic!("expected an active gesture");
        };
        assert_eq!(handles.len(), 1);
        assert_eq!(*handles[0].grab(), Grab::Point(PointIndex::End));
    }

    #[test]
    fn test_draw_gesture() {
        let mut h = Harness::new();
        h.send(press(5, 5));
        assert_eq!(h.send(drag(8, 8)), Some(OverlayEvent::Updating));
        assert_eq!(h.send(drag(10, 10)), Some(OverlayEvent::Updating));
        assert_eq!(h.send(release(10, 10)), Some(OverlayEvent::Updated));

        assert_eq!(h.only_line(), (Point::new(5, 5), Point::new(10, 10)));
        assert_eq!(*h.interaction.state(), GestureState::Idle);
    }

    #[test]
    fn test_drag_endpoint_of_existing_line() {
        let mut h = Harness::new();
        h.model.add_line(Point::new(0, 0), Point::new(50, 0));

        h.send(press(49, 1));
        h.send(drag(60, 30));
        h.send(release(60, 30));

        assert_eq!(h.only_line(), (Point::new(0, 0), Point::new(60, 30)));
    }

    #[test]
    fn test_drag_body_translates_line() {
        let mut h = Harness::new();
        h.model.add_line(Point::new(0, 0), Point::new(50, 0));

        h.send(press(25, 2));
        h.send(drag(30, 10));
        h.send(drag(35, 22));
        h.send(release(35, 22));

        assert_eq!(h.only_line(), (Point::new(10, 20), Point::new(60, 20)));
    }

    #[test]
    fn test_press_grabs_every_overlapping_element() {
        let mut h = Harness::new();
        h.model.add_line(Point::new(0, 0), Point::new(20, 0));
        h.model.add_line(Point::new(0, 0), Point::new(0, 20));

        h.send(press(1, 1));
        assert_eq!(h.interaction.active_handle_count(), 2);
        h.send(drag(5, 5));
        h.send(release(5, 5));

        assert_eq!(h.model.serialize(), "5,5,20,0;5,5,0,20");
    }

    #[test]
    fn test_drag_without_gesture_is_noop() {
        let mut h = Harness::new();
        h.model.add_line(Point::new(0, 0), Point::new(20, 0));

        assert_eq!(h.send(drag(1, 1)), None);
        assert_eq!(h.send(release(1, 1)), None);
        assert_eq!(h.only_line(), (Point::new(0, 0), Point::new(20, 0)));
    }

    #[test]
    fn test_secondary_click_deletes_hit_elements() {
        let mut h = Harness::new();
        h.model.add_line(Point::new(5, 5), Point::new(10, 10));
        h.model.add_line(Point::new(0, 7), Point::new(14, 7));
        h.model.add_line(Point::new(100, 100), Point::new(120, 100));

        assert_eq!(h.send(secondary_press(7, 7)), None);
        assert_eq!(h.model.len(), 3);
        assert_eq!(h.send(secondary_release(7, 7)), Some(OverlayEvent::Updated));

        assert_eq!(h.model.serialize(), "100,100,120,100");
    }

    #[test]
    fn test_secondary_click_on_nothing() {
        let mut h = Harness::new();
        h.model.add_line(Point::new(5, 5), Point::new(10, 10));

        h.send(secondary_press(50, 50));
        assert_eq!(h.send(secondary_release(50, 50)), None);
        assert_eq!(h.model.len(), 1);
    }

    #[test]
    fn test_secondary_press_does_not_start_line() {
        let mut h = Harness::new();
        h.send(secondary_press(3, 3));
        assert!(h.model.is_empty());
        assert!(!h.interaction.is_manipulating());
    }

    #[test]
    fn test_delete_during_drag_drops_stale_handles() {
        let mut h = Harness::new();
        h.send(press(5, 5));
        h.send(drag(20, 20));
        h.send(secondary_release(20, 20));
        assert!(h.model.is_empty());

        assert_eq!(h.send(drag(30, 30)), None);
        assert_eq!(h.send(release(30, 30)), None);
        assert!(h.model.is_empty());
    }

    #[test]
    fn test_cancel_clears_without_notification() {
        let mut h = Harness::new();
        h.send(press(5, 5));
        h.send(drag(10, 10));
        h.interaction.cancel();

        assert!(!h.interaction.is_manipulating());
        assert_eq!(h.send(release(10, 10)), None);
        assert_eq!(h.only_line(), (Point::new(5, 5), Point::new(10, 10)));
    }

    #[test]
    fn test_second_press_starts_fresh_gesture() {
        let mut h = Harness::new();
        h.send(press(5, 5));
        h.send(drag(10, 10));
        // Release lost; the next press far away starts a new line
        h.send(press(100, 100));
        assert_eq!(h.interaction.active_handle_count(), 1);
        h.send(drag(120, 100));

        assert_eq!(h.model.serialize(), "5,5,10,10;100,100,120,100");
    }
}
