//! Per-pixel nearest-surface tracking for visibility and shadows.
//!
//! Under the projection's sign convention, view-relative depth grows toward
//! the viewer, so the buffer keeps the *largest* value written at each pixel.
//! The same structure serves two roles: camera-space visibility during
//! rasterization, and light-space occlusion when built by a [`ShadowPass`].

use crate::geometry;
use crate::math::vec3::Vec3;
use crate::mesh::Mesh;
use crate::viewport::Viewport;

/// Depth value meaning "nothing rendered here yet" (far below any real depth).
const FAR_SENTINEL: f32 = -1000.0;

/// A `(width + 1) x (height + 1)` grid of depths, indexed in object-space
/// screen coordinates with the origin at the buffer center.
pub struct DepthBuffer {
    data: Vec<f32>,
    width: i32,
    height: i32,
}

impl DepthBuffer {
    /// Creates a buffer sized to the viewport, filled with the far sentinel.
    pub fn new(viewport: Viewport) -> Self {
        let width = viewport.width();
        let height = viewport.height();
        Self {
            data: vec![FAR_SENTINEL; ((width + 1) * (height + 1)) as usize],
            width,
            height,
        }
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let col = x + self.width / 2;
        let row = y + self.height / 2;
        if col < 0 || col > self.width || row < 0 || row > self.height {
            return None;
        }
        Some((col * (self.height + 1) + row) as usize)
    }

    /// The stored depth at (x, y), or `None` outside the buffer.
    pub fn get(&self, x: i32, y: i32) -> Option<f32> {
        self.index(x, y).map(|i| self.data[i])
    }

    /// Depth test and write in one step.
    ///
    /// Returns `false` without writing when the stored depth is greater than
    /// `z` (the candidate is occluded) or when (x, y) is outside the buffer;
    /// otherwise stores `z` and returns `true`. Equal depths are overwritten,
    /// so a later triangle at the same depth claims the pixel.
    pub fn test_and_set(&mut self, x: i32, y: i32, z: f32) -> bool {
        match self.index(x, y) {
            Some(i) if self.data[i] > z => false,
            Some(i) => {
                self.data[i] = z;
                true
            }
            None => false,
        }
    }

    /// Lookup for light-space reprojection: the center offset is added to the
    /// floating-point coordinates *before* truncation, matching how shadow
    /// lookups index the buffer. Out-of-range coordinates return `None`.
    pub fn sample_projected(&self, x: f32, y: f32) -> Option<f32> {
        let col = (x + (self.width / 2) as f32) as i32;
        let row = (y + (self.height / 2) as f32) as i32;
        if col < 0 || col > self.width || row < 0 || row > self.height {
            return None;
        }
        Some(self.data[(col * (self.height + 1) + row) as usize])
    }
}

/// Two-phase builder for a light-space shadow-depth buffer.
///
/// Every accumulated mesh is projected from the light's viewpoint and the
/// maximum depth per light-space pixel is kept; the surface nearest the
/// light "blocks" that pixel. One pass is shared across the object and the
/// floor so a single shadow map covers the whole scene:
///
/// ```ignore
/// let mut pass = ShadowPass::begin(viewport);
/// pass.accumulate(&object, light_position);
/// pass.accumulate(&floor, light_position);
/// let shadow_buffer = pass.finish();
/// ```
pub struct ShadowPass {
    buffer: DepthBuffer,
    viewport: Viewport,
}

impl ShadowPass {
    pub fn begin(viewport: Viewport) -> Self {
        Self {
            buffer: DepthBuffer::new(viewport),
            viewport,
        }
    }

    /// Rasterizes `mesh` into the shadow buffer as seen from `light_position`.
    pub fn accumulate(&mut self, mesh: &Mesh, light_position: Vec3) {
        let width = self.viewport.width();
        let height = self.viewport.height();

        for i in 0..mesh.triangle_count() {
            let [v1, v2, v3] = mesh.triangle_vertices(i);

            let p1 = geometry::project(v1, light_position, width, height);
            let p2 = geometry::project(v2, light_position, width, height);
            let p3 = geometry::project(v3, light_position, width, height);

            let (left, right, top, bottom) = geometry::bounding_box(p1, p2, p3, self.viewport);

            for y in top..=bottom {
                for x in left..=right {
                    if !geometry::in_triangle(x, y, p1, p2, p3) {
                        continue;
                    }
                    let [alpha, beta, gamma] = geometry::barycentric(x, y, p1, p2, p3);
                    let z = alpha * p1.z + beta * p2.z + gamma * p3.z;

                    self.buffer.test_and_set(x, y, z);
                }
            }
        }
    }

    pub fn finish(self) -> DepthBuffer {
        self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{Mesh, Triangle};

    fn viewport() -> Viewport {
        Viewport::centered(100, 100)
    }

    #[test]
    fn starts_at_far_sentinel() {
        let buffer = DepthBuffer::new(viewport());
        assert_eq!(buffer.get(0, 0), Some(FAR_SENTINEL));
        assert_eq!(buffer.get(-50, -50), Some(FAR_SENTINEL));
        assert_eq!(buffer.get(50, 50), Some(FAR_SENTINEL));
    }

    #[test]
    fn out_of_bounds_lookup_is_none() {
        let buffer = DepthBuffer::new(viewport());
        assert_eq!(buffer.get(51, 0), None);
        assert_eq!(buffer.get(0, -51), None);
        assert_eq!(buffer.sample_projected(200.0, 0.0), None);
    }

    #[test]
    fn nearer_depth_wins_regardless_of_order() {
        let mut near_first = DepthBuffer::new(viewport());
        assert!(near_first.test_and_set(3, 4, -10.0));
        assert!(!near_first.test_and_set(3, 4, -20.0));
        assert_eq!(near_first.get(3, 4), Some(-10.0));

        let mut far_first = DepthBuffer::new(viewport());
        assert!(far_first.test_and_set(3, 4, -20.0));
        assert!(far_first.test_and_set(3, 4, -10.0));
        assert_eq!(far_first.get(3, 4), Some(-10.0));
    }

    #[test]
    fn equal_depth_is_overwritten() {
        let mut buffer = DepthBuffer::new(viewport());
        assert!(buffer.test_and_set(0, 0, -5.0));
        assert!(buffer.test_and_set(0, 0, -5.0));
    }

    #[test]
    fn sample_projected_truncates_after_offset() {
        let mut buffer = DepthBuffer::new(viewport());
        buffer.test_and_set(-1, 0, -7.0);
        // -0.5 + 50 = 49.5 truncates to column 49, which holds x = -1.
        assert_eq!(buffer.sample_projected(-0.5, 0.0), Some(-7.0));
    }

    #[test]
    fn shadow_pass_keeps_depth_nearest_the_light() {
        // Two stacked triangles; the light looks down the -z axis, and the
        // one at z = -10 is nearer the light (larger view-relative depth)
        // than the one at z = -20.
        let near = [
            Vec3::new(-10.0, -10.0, -10.0),
            Vec3::new(10.0, -10.0, -10.0),
            Vec3::new(0.0, 10.0, -10.0),
        ];
        let far = [
            Vec3::new(-10.0, -10.0, -20.0),
            Vec3::new(10.0, -10.0, -20.0),
            Vec3::new(0.0, 10.0, -20.0),
        ];
        let mesh = Mesh::new(
            near.iter().chain(far.iter()).copied().collect(),
            vec![Triangle::new(0, 1, 2), Triangle::new(3, 4, 5)],
        );

        let light = Vec3::new(0.0, 0.0, 0.0);
        let mut pass = ShadowPass::begin(viewport());
        pass.accumulate(&mesh, light);
        let buffer = pass.finish();

        // The center of both triangles projects near the origin; the stored
        // depth must be the near triangle's.
        let stored = buffer.sample_projected(0.0, 0.0).unwrap();
        assert_eq!(stored, -10.0);
    }
}
