//! Interactive vector-drawing overlay
//!
//! A layer that sits above a host canvas, lets the user draw, drag and delete
//! line segments with the pointer, and persists the result as a compact string.
//!
//! ```
//! use canvas_overlay::{DrawingOverlay, PointerButton};
//!
//! let mut overlay = DrawingOverlay::default();
//! overlay.press(5, 5, PointerButton::Primary);
//! overlay.drag(10, 10);
//! overlay.release(10, 10, PointerButton::Primary);
//! assert_eq!(overlay.serialized_state(), "5,5,10,10");
//! ```

pub mod config;
pub mod domain;
pub mod error;
pub mod overlay;
pub mod render;

pub use config::{OverlayConfig, ShapeColor};
pub use domain::{DrawingElement, ElementHandle, ElementId, Grab, LineElement, Point, PointIndex};
pub use error::OverlayError;
pub use overlay::{
    CanvasOverlay, DrawingOverlay, ListenerId, OverlayEvent, OverlayListener, PointerButton,
    PointerEvent, StatePersistence,
};
pub use render::{StrokeStyle, Surface};
