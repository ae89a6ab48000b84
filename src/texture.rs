//! Decoded texture images, stored in BGR byte order.

use std::path::Path;

/// A decoded 2D pixel grid, treated as read-only sample data.
///
/// Bytes are stored row-major in BGR order, `channels` bytes per pixel and
/// `stride` bytes per row, mirroring the layout the sampling code indexes
/// against.
pub struct Texture {
    data: Vec<u8>,
    width: usize,
    height: usize,
    channels: usize,
    stride: usize,
}

impl Texture {
    /// Loads and decodes an image file (PNG, JPG, etc.).
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, image::ImageError> {
        let img = image::open(path)?.to_rgb8();
        let (width, height) = img.dimensions();

        let mut data = Vec::with_capacity((width * height * 3) as usize);
        for pixel in img.pixels() {
            let [r, g, b] = pixel.0;
            data.push(b);
            data.push(g);
            data.push(r);
        }

        Ok(Self::from_bgr_bytes(data, width as usize, height as usize))
    }

    /// Wraps already-decoded BGR bytes (3 channels, tightly packed rows).
    ///
    /// # Panics
    /// Panics if `data` is not exactly `width * height * 3` bytes.
    pub fn from_bgr_bytes(data: Vec<u8>, width: usize, height: usize) -> Self {
        assert_eq!(data.len(), width * height * 3, "BGR data size mismatch");
        Self {
            data,
            width,
            height,
            channels: 3,
            stride: width * 3,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Bytes per row.
    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Raw BGR bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Samples the pixel at (`column`, `row`), returning RGB channels in
    /// [0, 1]. Coordinates outside the image are clamped to the nearest
    /// edge pixel rather than wrapping or panicking.
    pub fn sample(&self, column: i32, row: i32) -> [f32; 3] {
        let column = column.clamp(0, self.width as i32 - 1) as usize;
        let row = row.clamp(0, self.height as i32 - 1) as usize;

        let index = row * self.stride + column * self.channels;
        let b = self.data[index];
        let g = self.data[index + 1];
        let r = self.data[index + 2];

        [
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// 2x2 image with distinct corner colors, in BGR byte order.
    fn checker() -> Texture {
        Texture::from_bgr_bytes(
            vec![
                0, 0, 255, /* red */ 0, 255, 0, /* green */
                255, 0, 0, /* blue */ 255, 255, 255, /* white */
            ],
            2,
            2,
        )
    }

    #[test]
    fn sample_reads_bgr_as_rgb() {
        let texture = checker();
        assert_eq!(texture.sample(0, 0), [1.0, 0.0, 0.0]);
        assert_eq!(texture.sample(1, 0), [0.0, 1.0, 0.0]);
        assert_eq!(texture.sample(0, 1), [0.0, 0.0, 1.0]);
        assert_eq!(texture.sample(1, 1), [1.0, 1.0, 1.0]);
    }

    #[test]
    fn sample_clamps_out_of_range_coordinates() {
        let texture = checker();
        assert_eq!(texture.sample(-5, 0), texture.sample(0, 0));
        assert_eq!(texture.sample(9, 9), texture.sample(1, 1));
    }

    #[test]
    fn channels_are_normalized() {
        let texture = Texture::from_bgr_bytes(vec![128, 64, 32], 1, 1);
        let [r, g, b] = texture.sample(0, 0);
        assert_relative_eq!(r, 32.0 / 255.0);
        assert_relative_eq!(g, 64.0 / 255.0);
        assert_relative_eq!(b, 128.0 / 255.0);
    }

    #[test]
    fn stride_covers_a_full_row() {
        let texture = checker();
        assert_eq!(texture.stride(), 6);
        assert_eq!(texture.channels(), 3);
    }
}
