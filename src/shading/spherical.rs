//! Spherical environment mapping: mirror-reflection lookup into a panorama.

use crate::depth::DepthBuffer;
use crate::geometry;
use crate::math::vec3::Vec3;
use crate::mesh::Mesh;
use crate::point::ShadedPoint;
use crate::texture::Texture;
use crate::viewport::Viewport;

use super::{FloorRenderer, ShadingParams, ShadingStrategy};

/// Colors each pixel by reflecting the light direction about the
/// interpolated normal and sampling the environment map where the
/// reflection lands on the unit sphere.
///
/// Unlike the other strategies, object vertices are taken as screen
/// coordinates directly, without perspective projection. Without an
/// environment map the object is skipped entirely and only the floor is
/// rendered.
pub struct SphericalShading {
    params: ShadingParams,
    floor: FloorRenderer,
}

/// Maps a reflection direction onto the environment image.
///
/// The reflection R of the light about the normal is normalized, then
/// m = sqrt(Rx^2 + Ry^2 + (Rz + 1)^2) scales it onto the sphere-map disc:
/// u = (Rx / 2m + 1/2), v = 1 - (Ry / 2m + 1/2). u selects the column but
/// scales by the image height, v the row scaled by the width, so the map
/// reads transposed relative to its storage.
fn environment_sample(map: &Texture, normal: Vec3, light: Vec3) -> [f32; 3] {
    let reflection = (normal * (2.0 * light.dot(normal)) - light).normalize();

    let m = (reflection.x * reflection.x
        + reflection.y * reflection.y
        + (reflection.z + 1.0) * (reflection.z + 1.0))
        .sqrt();
    let u = ((reflection.x / (2.0 * m) + 0.5) * map.height() as f32) as i32;
    let v = ((1.0 - (reflection.y / (2.0 * m) + 0.5)) * map.width() as f32) as i32;

    map.sample(u, v)
}

impl SphericalShading {
    pub fn new(floor_texture: Texture) -> Self {
        Self {
            params: ShadingParams::default(),
            floor: FloorRenderer::new(floor_texture),
        }
    }

    fn render_object(
        &self,
        object: &Mesh,
        viewport: Viewport,
        light_position: Vec3,
        z_buffer: &mut DepthBuffer,
        points: &mut Vec<ShadedPoint>,
        environment_map: &Texture,
    ) {
        let vertex_normals = object.vertex_normals();

        for i in 0..object.triangle_count() {
            let [i1, i2, i3] = object.triangle_indices(i);

            // Vertices stand in for screen coordinates unprojected.
            let p1 = object.vertex(i1);
            let p2 = object.vertex(i2);
            let p3 = object.vertex(i3);

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

                    let light =
                        (light_position - Vec3::new(x as f32, y as f32, z)).normalize();

                    let color = environment_sample(environment_map, normal, light);
                    points.push(ShadedPoint::new(x, y, z, color));
                }
            }
        }
    }
}

impl ShadingStrategy for SphericalShading {
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
        _view_position: Vec3,
        points: &mut Vec<ShadedPoint>,
        environment_map: Option<&Texture>,
    ) {
        let mut z_buffer = DepthBuffer::new(viewport);

        if let Some(environment_map) = environment_map {
            self.render_object(
                object,
                viewport,
                light_position,
                &mut z_buffer,
                points,
                environment_map,
            );
        }
        self.floor.render(
            floor,
            viewport,
            light_position,
            &mut z_buffer,
            None,
            points,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Triangle;

    fn strategy() -> SphericalShading {
        SphericalShading::new(Texture::from_bgr_bytes(vec![128, 128, 128], 1, 1))
    }

    fn screen_triangle() -> Mesh {
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
    fn environment_sample_reads_the_map_transposed() {
        // 4 columns x 2 rows; every pixel distinct. Stored BGR.
        #[rustfmt::skip]
        let map = Texture::from_bgr_bytes(
            vec![
                0, 0, 10,   0, 0, 20,   0, 0, 30,   0, 0, 40,
                0, 0, 50,   0, 0, 60,   0, 0, 70,   0, 0, 80,
            ],
            4,
            2,
        );

        // L == N gives R == L. With R = (0, 1, 0): m = sqrt(2),
        // u = 0.5 * height = 1, v = (1 - (0.25 * sqrt(2) + 0.5)) * width = 0.
        let color = environment_sample(&map, Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(color, map.sample(1, 0));
        assert_eq!(color[0], 20.0 / 255.0);
    }

    #[test]
    fn straight_back_reflection_hits_the_map_center() {
        let map = Texture::from_bgr_bytes(
            vec![
                0, 0, 0, 0, 0, 0, 0, 0, 0, //
                0, 0, 0, 0, 0, 255, 0, 0, 0, //
                0, 0, 0, 0, 0, 0, 0, 0, 0, //
            ],
            3,
            3,
        );

        // R = (0, 0, 1): m = 2, u = 0.5 * 3 = 1, v = 0.5 * 3 = 1.
        let color = environment_sample(&map, Vec3::new(0.0, 0.0, 1.0), Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(color, [1.0, 0.0, 0.0]);
    }

    #[test]
    fn object_vertices_are_screen_coordinates() {
        let spherical = strategy();
        let viewport = Viewport::centered(200, 200);
        let environment_map = Texture::from_bgr_bytes(vec![255, 255, 255], 1, 1);
        let mut points = Vec::new();

        spherical.shade(
            &screen_triangle(),
            &Mesh::new(Vec::new(), Vec::new()),
            viewport,
            Vec3::new(75.0, 75.0, 0.0),
            Vec3::new(0.0, 0.0, 0.0),
            &mut points,
            Some(&environment_map),
        );

        // Pixels stay within the raw vertex footprint; projection would
        // have magnified the triangle to fill the viewport.
        assert!(!points.is_empty());
        for point in &points {
            assert!((-30..=30).contains(&point.x));
            assert!((-30..=30).contains(&point.y));
            assert_eq!(point.depth, -100.0);
        }
    }

    #[test]
    fn missing_environment_map_skips_the_object() {
        let spherical = strategy();
        let viewport = Viewport::centered(200, 200);
        let mut points = Vec::new();

        spherical.shade(
            &screen_triangle(),
            &Mesh::new(Vec::new(), Vec::new()),
            viewport,
            Vec3::new(75.0, 75.0, 0.0),
            Vec3::new(0.0, 0.0, 0.0),
            &mut points,
            None,
        );

        assert!(points.is_empty());
    }
}
