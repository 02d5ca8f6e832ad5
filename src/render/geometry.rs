//! Shared stroke constants for element rendering

/// Line geometry constants
pub mod line {
    /// Default line thickness in pixels
    pub const THICKNESS: f32 = 1.0;
    /// Offset that moves integer coordinates onto pixel centers, so a
    /// one-pixel line covers exactly the pixels it passes through
    pub const PIXEL_CENTER: f32 = 0.5;
}

/// Map an integer pixel coordinate to the center of that pixel
#[inline]
pub fn pixel_center(v: i32) -> f32 {
    v as f32 + line::PIXEL_CENTER
}
