//! The orthogonal screen rectangle that all rasterization is clipped to.

/// Screen bounds in object space, with (0, 0) at the center.
///
/// Pixel buffers derived from a viewport are sized `(width + 1) x (height + 1)`
/// and indexed with a `width / 2`, `height / 2` offset so that the object-space
/// origin maps to the buffer center.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
}

impl Viewport {
    pub fn new(left: i32, right: i32, top: i32, bottom: i32) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    /// A viewport of the given dimensions centered on the origin.
    pub fn centered(width: i32, height: i32) -> Self {
        Self::new(-width / 2, width / 2, -height / 2, height / 2)
    }

    pub fn width(&self) -> i32 {
        self.left.abs() + self.right.abs()
    }

    pub fn height(&self) -> i32 {
        self.top.abs() + self.bottom.abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_viewport_dimensions() {
        let viewport = Viewport::centered(640, 480);
        assert_eq!(viewport.left, -320);
        assert_eq!(viewport.right, 320);
        assert_eq!(viewport.width(), 640);
        assert_eq!(viewport.height(), 480);
    }
}
