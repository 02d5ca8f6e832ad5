//! Pure domain types with minimal dependencies
//!
//! Geometry, drawing elements and the handles used to manipulate them.
//! Nothing here knows about pointer events or listeners.

pub mod element;
pub mod geometry;
pub mod handle;
pub mod line;

pub use element::*;
pub use geometry::*;
pub use handle::*;
pub use line::*;
