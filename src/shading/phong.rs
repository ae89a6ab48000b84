//! Phong shading: normals blended per pixel, with optional shadows.

use crate::depth::{DepthBuffer, ShadowPass};
use crate::geometry;
use crate::math::vec3::Vec3;
use crate::mesh::Mesh;
use crate::point::ShadedPoint;
use crate::texture::Texture;
use crate::viewport::Viewport;

use super::{FloorRenderer, ShadingParams, ShadingStrategy};

/// Depth slack when testing a pixel against the shadow buffer. Without it,
/// surfaces shadow themselves through quantization of the light-space
/// lookup.
const SHADOW_BIAS: f32 = 10.0;

/// Interpolates vertex normals barycentrically and re-evaluates the full
/// illumination model at every pixel, with per-pixel interpolated depth.
/// The interpolated normal is used as-is, without renormalization.
///
/// The only strategy with shadow support: when enabled, a light-space
/// depth pass over the object and floor precedes rendering, and pixels the
/// light cannot see fall back to their ambient term.
pub struct PhongShading {
    params: ShadingParams,
    floor: FloorRenderer,
}

impl PhongShading {
    pub fn new(floor_texture: Texture) -> Self {
        Self {
            params: ShadingParams::default(),
            floor: FloorRenderer::new(floor_texture),
        }
    }

    /// Whether the light can see the screen-space point (x, y, z). Points
    /// that reproject outside the shadow buffer are treated as lit.
    fn is_lit(
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
            Some(stored) => stored <= projected.z + SHADOW_BIAS,
            None => true,
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn render_object(
        &self,
        object: &Mesh,
        viewport: Viewport,
        light_position: Vec3,
        view_position: Vec3,
        z_buffer: &mut DepthBuffer,
        shadow_buffer: Option<&DepthBuffer>,
        points: &mut Vec<ShadedPoint>,
    ) {
        let width = viewport.width();
        let height = viewport.height();
        let vertex_normals = object.vertex_normals();

        for i in 0..object.triangle_count() {
            let [i1, i2, i3] = object.triangle_indices(i);

            let p1 = geometry::project(object.vertex(i1), view_position, width, height);
            let p2 = geometry::project(object.vertex(i2), view_position, width, height);
            let p3 = geometry::project(object.vertex(i3), view_position, width, height);

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

                    let normal = vertex_normals[i1] * alpha
                        + vertex_normals[i2] * beta
                        + vertex_normals[i3] * gamma;

                    let position = Vec3::new(x as f32, y as f32, z);
                    let light = (light_position - position).normalize();
                    let view = (view_position - position).normalize();

                    let (ambient, diffuse, specular) =
                        self.params.illuminate(normal, light, view);

                    let color = match shadow_buffer {
                        Some(buffer)
                            if !self.is_lit(x, y, z, light_position, viewport, buffer) =>
                        {
                            self.params.ambient_only(ambient)
                        }
                        _ => self.params.combine(ambient, diffuse, specular),
                    };

                    points.push(ShadedPoint::new(x, y, z, color));
                }
            }
        }
    }
}

impl ShadingStrategy for PhongShading {
    fn params(&self) -> &ShadingParams {
        &self.params
    }

    fn params_mut(&mut self) -> &mut ShadingParams {
        &mut self.params
    }

    fn shade(
        &self,
        object: &Mesh,
        floor: &Mesh,
        viewport: Viewport,
        light_position: Vec3,
        view_position: Vec3,
        points: &mut Vec<ShadedPoint>,
        _environment_map: Option<&Texture>,
    ) {
        // One light-space pass covers the whole scene.
        let shadow_buffer = if self.params.shadows() {
            let mut pass = ShadowPass::begin(viewport);
            pass.accumulate(object, light_position);
            pass.accumulate(floor, light_position);
            Some(pass.finish())
        } else {
            None
        };

        let mut z_buffer = DepthBuffer::new(viewport);

        self.render_object(
            object,
            viewport,
            light_position,
            view_position,
            &mut z_buffer,
            shadow_buffer.as_ref(),
            points,
        );
        self.floor.render(
            floor,
            viewport,
            light_position,
            &mut z_buffer,
            shadow_buffer.as_ref(),
            points,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Triangle;

    fn empty_floor() -> Mesh {
        Mesh::new(Vec::new(), Vec::new())
    }

    fn strategy() -> PhongShading {
        PhongShading::new(Texture::from_bgr_bytes(vec![128, 128, 128], 1, 1))
    }

    fn facing_triangle() -> Mesh {
        Mesh::new(
            vec![
                Vec3::new(-30.0, -30.0, -100.0),
                Vec3::new(30.0, -30.0, -100.0),
                Vec3::new(0.0, 30.0, -100.0),
            ],
            vec![Triangle::new(0, 1, 2)],
        )
    }

    #[test]
    fn depth_is_interpolated_per_pixel() {
        let phong = strategy();
        let viewport = Viewport::centered(200, 200);
        let mut points = Vec::new();

        // Tilted triangle: depth varies with y.
        let tilted = Mesh::new(
            vec![
                Vec3::new(-30.0, -30.0, -120.0),
                Vec3::new(30.0, -30.0, -120.0),
                Vec3::new(0.0, 30.0, -80.0),
            ],
            vec![Triangle::new(0, 1, 2)],
        );

        phong.shade(
            &tilted,
            &empty_floor(),
            viewport,
            Vec3::new(75.0, 75.0, 0.0),
            Vec3::new(0.0, 0.0, 0.0),
            &mut points,
            None,
        );

        let depths: Vec<f32> = points.iter().map(|p| p.depth).collect();
        let min = depths.iter().copied().fold(f32::MAX, f32::min);
        let max = depths.iter().copied().fold(f32::MIN, f32::max);
        assert!(max - min > 10.0, "expected a depth gradient, got {min}..{max}");
    }

    #[test]
    fn colors_vary_across_a_curved_surface() {
        // Two triangles sharing an edge at different orientations give the
        // shared vertices blended normals, so per-pixel illumination varies.
        let phong = strategy();
        let viewport = Viewport::centered(200, 200);
        let mesh = Mesh::new(
            vec![
                Vec3::new(-30.0, -30.0, -100.0),
                Vec3::new(30.0, -30.0, -100.0),
                Vec3::new(0.0, 30.0, -100.0),
                Vec3::new(0.0, -60.0, -70.0),
            ],
            vec![Triangle::new(0, 1, 2), Triangle::new(0, 3, 1)],
        );

        let mut points = Vec::new();
        phong.shade(
            &mesh,
            &empty_floor(),
            viewport,
            Vec3::new(75.0, 75.0, 0.0),
            Vec3::new(0.0, 0.0, 0.0),
            &mut points,
            None,
        );

        let reds: Vec<f32> = points.iter().map(|p| p.color[0]).collect();
        let min = reds.iter().copied().fold(f32::MAX, f32::min);
        let max = reds.iter().copied().fold(f32::MIN, f32::max);
        assert!(max > min);
    }

    #[test]
    fn occluded_pixels_fall_back_to_ambient() {
        let mut phong = strategy();
        phong.params_mut().toggle_shadows();
        assert!(phong.params().shadows());

        let viewport = Viewport::centered(200, 200);
        let light_position = Vec3::new(0.0, 0.0, 0.0);
        // A small triangle sits between the light and a large one; both
        // face the light, so unshadowed pixels get diffuse light.
        let mesh = Mesh::new(
            vec![
                Vec3::new(-60.0, -60.0, -100.0),
                Vec3::new(60.0, -60.0, -100.0),
                Vec3::new(0.0, 60.0, -100.0),
                Vec3::new(-2.0, -2.0, -30.0),
                Vec3::new(2.0, -2.0, -30.0),
                Vec3::new(0.0, 2.0, -30.0),
            ],
            vec![Triangle::new(0, 1, 2), Triangle::new(3, 4, 5)],
        );

        let mut points = Vec::new();
        phong.shade(
            &mesh,
            &empty_floor(),
            viewport,
            light_position,
            Vec3::new(0.0, 0.0, 0.0),
            &mut points,
            None,
        );

        let params = ShadingParams::default();
        let ambient = params.k_a() * params.i_a();
        let shadowed = params.ambient_only(ambient);

        // Some pixels of the large triangle are in the small one's shadow,
        // others are lit.
        let ambient_pixels = points.iter().filter(|p| p.color == shadowed).count();
        assert!(ambient_pixels > 0, "no shadowed pixels found");
        assert!(
            points.iter().any(|p| p.color != shadowed),
            "every pixel shadowed"
        );
    }
}
