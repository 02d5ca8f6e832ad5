//! Interactive drawing overlay
//!
//! This module provides:
//! - The `CanvasOverlay` boundary a host view talks to
//! - `DrawingOverlay`, which lets the user draw, drag and delete lines
//! - The element model, gesture state machine and listener registry behind it

pub mod interaction;
pub mod listeners;
pub mod model;

pub use interaction::{GestureState, Interaction, PointerButton, PointerEvent};
pub use listeners::{ListenerId, ListenerRegistry, OverlayEvent, OverlayListener};
pub use model::{ELEMENT_DELIMITER, OverlayModel, StatePersistence};

use crate::config::OverlayConfig;
use crate::domain::Point;
use crate::error::Result;
use crate::render::{StrokeStyle, Surface};

/// A drawing layer composited above a host canvas
pub trait CanvasOverlay {
    /// Name to show the user when choosing between overlays
    fn name(&self) -> &str;

    /// Draw this overlay; called by the host on every repaint
    fn draw(&self, surface: &mut dyn Surface);

    /// Feed one pointer event; returns the notification it fired, if any
    fn handle_pointer(&mut self, event: PointerEvent) -> Option<OverlayEvent>;

    fn add_listener(&mut self, listener: Box<dyn OverlayListener>) -> ListenerId;

    fn remove_listener(&mut self, id: ListenerId) -> bool;

    /// Converts this overlay's state to and from a string for persistence
    fn state_persistence(&mut self) -> &mut dyn StatePersistence;
}

/// Overlay on which the user draws straight lines
///
/// Primary press on empty space starts a line, primary drag on a line moves
/// an endpoint or the whole line, secondary click deletes lines.
#[derive(Debug)]
pub struct DrawingOverlay {
    config: OverlayConfig,
    stroke: StrokeStyle,
    model: OverlayModel,
    interaction: Interaction,
    listeners: ListenerRegistry,
}

impl Default for DrawingOverlay {
    fn default() -> Self {
        Self::new(OverlayConfig::default())
    }
}

impl DrawingOverlay {
    pub fn new(config: OverlayConfig) -> Self {
        Self {
            stroke: StrokeStyle::from(&config),
            model: OverlayModel::with_line_color(config.line_color),
            interaction: Interaction::new(config.handle_proximity),
            listeners: ListenerRegistry::new(),
            config,
        }
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    pub fn model(&self) -> &OverlayModel {
        &self.model
    }

    pub fn gesture(&self) -> &GestureState {
        self.interaction.state()
    }

    pub fn is_manipulating(&self) -> bool {
        self.interaction.is_manipulating()
    }

    pub fn subscribe(&mut self, listener: impl OverlayListener + 'static) -> ListenerId {
        self.listeners.subscribe(Box::new(listener))
    }

    pub fn press(&mut self, x: i32, y: i32, button: PointerButton) -> Option<OverlayEvent> {
        self.handle_pointer(PointerEvent::Press {
            position: Point::new(x, y),
            button,
        })
    }

    pub fn drag(&mut self, x: i32, y: i32) -> Option<OverlayEvent> {
        self.handle_pointer(PointerEvent::Drag {
            position: Point::new(x, y),
        })
    }

    pub fn release(&mut self, x: i32, y: i32, button: PointerButton) -> Option<OverlayEvent> {
        self.handle_pointer(PointerEvent::Release {
            position: Point::new(x, y),
            button,
        })
    }

    /// Abandon the current gesture without notifying listeners
    pub fn cancel_gesture(&mut self) {
        self.interaction.cancel();
    }

    pub fn serialized_state(&self) -> String {
        self.model.serialize()
    }

    /// Restore persisted state, replacing every element
    ///
    /// On success any gesture in progress is cancelled. On error the overlay
    /// is left exactly as it was.
    pub fn set_serialized_state(&mut self, state: &str) -> Result<()> {
        self.model.deserialize(state)?;
        self.interaction.cancel();
        Ok(())
    }

    /// Restore persisted state, dropping malformed elements
    ///
    /// Returns how many elements were dropped.
    pub fn set_serialized_state_lossy(&mut self, state: &str) -> usize {
        self.interaction.cancel();
        self.model.deserialize_lossy(state)
    }
}

impl CanvasOverlay for DrawingOverlay {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn draw(&self, surface: &mut dyn Surface) {
        self.model.draw_all(surface, &self.stroke);
    }

    fn handle_pointer(&mut self, event: PointerEvent) -> Option<OverlayEvent> {
        self.interaction
            .handle(event, &mut self.model, &mut self.listeners)
    }

    fn add_listener(&mut self, listener: Box<dyn OverlayListener>) -> ListenerId {
        self.listeners.subscribe(listener)
    }

    fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    fn state_persistence(&mut self) -> &mut dyn StatePersistence {
        self
    }
}

impl StatePersistence for DrawingOverlay {
    fn model_state(&self) -> String {
        self.serialized_state()
    }

    fn set_model_state(&mut self, state: &str) -> Result<()> {
        self.set_serialized_state(state)
    }
}
