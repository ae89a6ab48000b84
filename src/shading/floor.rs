//! Textured floor rendering, shared by every shading strategy.

use crate::depth::DepthBuffer;
use crate::geometry;
use crate::math::vec3::Vec3;
use crate::mesh::Mesh;
use crate::point::ShadedPoint;
use crate::texture::Texture;
use crate::viewport::Viewport;

/// How much each channel is darkened when a floor pixel is in shadow.
const SHADOW_DARKENING: f32 = 0.5;

/// Rasterizes the floor quad with a texture fitted to the viewport.
///
/// Floor vertices are taken as screen coordinates directly, without
/// perspective projection; the scene setup places the floor in screen
/// range already. Depth is interpolated per pixel so the floor layers
/// correctly against the object through the shared depth buffer.
pub struct FloorRenderer {
    texture: Texture,
}

impl FloorRenderer {
    pub fn new(texture: Texture) -> Self {
        Self { texture }
    }

    pub fn texture(&self) -> &Texture {
        &self.texture
    }

    /// Renders `floor` into `points`, testing against `z_buffer`.
    ///
    /// With a shadow buffer present, each pixel is reprojected to the
    /// light's viewpoint; a pixel is lit when it falls outside the shadow
    /// buffer or is itself the surface nearest the light. Shadowed pixels
    /// keep the texture color darkened by a fixed amount per channel.
    #[allow(clippy::too_many_arguments)]
    pub fn render(
        &self,
        floor: &Mesh,
        viewport: Viewport,
        light_position: Vec3,
        z_buffer: &mut DepthBuffer,
        shadow_buffer: Option<&DepthBuffer>,
        points: &mut Vec<ShadedPoint>,
    ) {
        let width = viewport.width();
        let height = viewport.height();

        for i in 0..floor.triangle_count() {
            let [p1, p2, p3] = floor.triangle_vertices(i);

            let (left, right, top, bottom) = geometry::bounding_box(p1, p2, p3, viewport);

            for y in top..=bottom {
                for x in left..=right {
                    if !geometry::in_triangle(x, y, p1, p2, p3) {
                        continue;
                    }
                    let [alpha, beta, gamma] = geometry::barycentric(x, y, p1, p2, p3);
                    let z = alpha * p1.z + beta * p2.z + gamma * p3.z;

                    if !z_buffer.test_and_set(x, y, z) {
                        continue;
                    }

                    // Fit the screen position to the texture dimensions.
                    let fitted_x = (((x + width / 2) as f32 / width as f32)
                        * self.texture.width() as f32) as i32;
                    let fitted_y = (((y + height / 2) as f32 / height as f32)
                        * self.texture.height() as f32) as i32;

                    let mut color = self.texture.sample(fitted_x, fitted_y);
                    if let Some(shadow_buffer) = shadow_buffer {
                        if self.in_shadow(x, y, z, light_position, viewport, shadow_buffer) {
                            for channel in &mut color {
                                *channel = (*channel - SHADOW_DARKENING).clamp(0.0, 1.0);
                            }
                        }
                    }

                    points.push(ShadedPoint::new(x, y, z, color));
                }
            }
        }
    }

    /// A pixel is shadowed when some recorded surface sits nearer the
    /// light than it does. Falling outside the shadow buffer entirely
    /// means lit.
    fn in_shadow(
        &self,
        x: i32,
        y: i32,
        z: f32,
        light_position: Vec3,
        viewport: Viewport,
        shadow_buffer: &DepthBuffer,
    ) -> bool {
        let projected = geometry::project(
            Vec3::new(x as f32, y as f32, z),
            light_position,
            viewport.width(),
            viewport.height(),
        );

        match shadow_buffer.sample_projected(projected.x, projected.y) {
            Some(stored) => stored > projected.z,
            None => false,
        }
    }
}
