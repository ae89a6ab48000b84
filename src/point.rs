//! The shaded screen sample emitted by every rendering pass.

/// A single shaded pixel: integer screen position, view-relative depth, and
/// an RGB color with each channel in [0, 1].
///
/// Points are emitted in object-then-floor, triangle-iteration, scan-order
/// sequence; multiple points may exist for the same coordinate, so a display
/// sink must draw them front-of-list to back-of-list.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadedPoint {
    pub x: i32,
    pub y: i32,
    pub depth: f32,
    pub color: [f32; 3],
}

impl ShadedPoint {
    pub fn new(x: i32, y: i32, depth: f32, color: [f32; 3]) -> Self {
        Self { x, y, depth, color }
    }
}
