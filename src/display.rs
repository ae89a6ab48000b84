//! Turning shaded point lists into displayable pixel frames.

use crate::point::ShadedPoint;
use crate::viewport::Viewport;

pub const WINDOW_WIDTH: u32 = 640;
pub const WINDOW_HEIGHT: u32 = 480;

/// Packs an RGB color with channels in [0, 1] into an ARGB8888 pixel.
pub fn pack_color(color: [f32; 3]) -> u32 {
    let r = (color[0] * 255.0) as u32;
    let g = (color[1] * 255.0) as u32;
    let b = (color[2] * 255.0) as u32;
    0xFF00_0000 | (r << 16) | (g << 8) | b
}

/// A `(width + 1) x (height + 1)` grid of RGB colors in object-space screen
/// coordinates, black where nothing was rendered.
pub struct PixelGrid {
    colors: Vec<[f32; 3]>,
    width: i32,
    height: i32,
}

impl PixelGrid {
    /// Rasterizes a point sequence into a grid. Points are applied in
    /// order, so a later point at the same coordinate replaces an earlier
    /// one; the shading pass has already depth-sorted within itself, and
    /// this preserves its ordering contract.
    pub fn from_points(points: &[ShadedPoint], viewport: Viewport) -> Self {
        let width = viewport.width();
        let height = viewport.height();
        let mut colors = vec![[0.0; 3]; ((width + 1) * (height + 1)) as usize];

        for point in points {
            let col = point.x + width / 2;
            let row = point.y + height / 2;
            if col < 0 || col > width || row < 0 || row > height {
                continue;
            }
            colors[(row * (width + 1) + col) as usize] = point.color;
        }

        Self {
            colors,
            width,
            height,
        }
    }

    /// Color at grid cell (`col`, `row`), both zero-based from the bottom
    /// left. Out-of-grid cells read as black.
    pub fn get(&self, col: i32, row: i32) -> [f32; 3] {
        if col < 0 || col > self.width || row < 0 || row > self.height {
            return [0.0; 3];
        }
        self.colors[(row * (self.width + 1) + col) as usize]
    }

    /// Five-sample box blur: each cell becomes the average of itself and
    /// its four axis neighbors, divided by five even at the edges where
    /// missing neighbors contribute black. Softens silhouette staircasing
    /// at the cost of overall brightness near boundaries.
    pub fn box_blur(&self) -> Self {
        let mut colors = vec![[0.0; 3]; self.colors.len()];

        for row in 0..=self.height {
            for col in 0..=self.width {
                let mut blended = [0.0f32; 3];
                for (dc, dr) in [(0, 0), (-1, 0), (1, 0), (0, -1), (0, 1)] {
                    let sample = self.get(col + dc, row + dr);
                    for i in 0..3 {
                        blended[i] += sample[i];
                    }
                }
                for channel in &mut blended {
                    *channel /= 5.0;
                }
                colors[(row * (self.width + 1) + col) as usize] = blended;
            }
        }

        Self {
            colors,
            width: self.width,
            height: self.height,
        }
    }

    /// Flattens the grid into an ARGB frame of exactly `width x height`
    /// pixels with row zero at the top, ready for a streaming texture.
    pub fn to_frame(&self) -> Frame {
        let width = self.width as usize;
        let height = self.height as usize;
        let mut pixels = vec![0u32; width * height];

        for frame_y in 0..height {
            let row = self.height - 1 - frame_y as i32;
            for col in 0..width {
                pixels[frame_y * width + col] = pack_color(self.get(col as i32, row));
            }
        }

        Frame {
            pixels,
            width: width as u32,
            height: height as u32,
        }
    }
}

/// An ARGB8888 pixel buffer sized for the display texture.
pub struct Frame {
    pixels: Vec<u32>,
    width: u32,
    height: u32,
}

impl Frame {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// The pixel buffer as raw bytes for texture upload.
    pub fn as_bytes(&self) -> &[u8] {
        // SAFETY: u32 has no padding and the slice covers exactly
        // pixels.len() * 4 bytes.
        unsafe {
            std::slice::from_raw_parts(
                self.pixels.as_ptr() as *const u8,
                self.pixels.len() * std::mem::size_of::<u32>(),
            )
        }
    }
}
