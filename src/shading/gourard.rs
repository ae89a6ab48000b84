//! Gourard shading: illumination at the vertices, color blended per pixel.

use crate::depth::DepthBuffer;
use crate::geometry;
use crate::math::vec3::Vec3;
use crate::mesh::Mesh;
use crate::point::ShadedPoint;
use crate::texture::Texture;
use crate::viewport::Viewport;

use super::{FloorRenderer, ShadingParams, ShadingStrategy};

/// Evaluates the illumination model once per vertex, against the averaged
/// vertex normal and light/view directions taken from the projected vertex
/// position, then blends the three vertex colors barycentrically across
/// each triangle. Vertex colors are clamped; blends of in-range colors
/// stay in range. Depth is the triangle's centroid depth, as in flat
/// shading.
pub struct GourardShading {
    params: ShadingParams,
    floor: FloorRenderer,
}

impl GourardShading {
    pub fn new(floor_texture: Texture) -> Self {
        Self {
            params: ShadingParams::default(),
            floor: FloorRenderer::new(floor_texture),
        }
    }

    fn vertex_color(&self, normal: Vec3, position: Vec3, light_position: Vec3, view_position: Vec3) -> [f32; 3] {
        let light = (light_position - position).normalize();
        let view = (view_position - position).normalize();

        let (ambient, diffuse, specular) = self.params.illuminate(normal, light, view);
        self.params.combine(ambient, diffuse, specular)
    }

    fn render_object(
        &self,
        object: &Mesh,
        viewport: Viewport,
        light_position: Vec3,
        view_position: Vec3,
        z_buffer: &mut DepthBuffer,
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

            let z = (p1.z + p2.z + p3.z) / 3.0;

            let c1 = self.vertex_color(vertex_normals[i1], p1, light_position, view_position);
            let c2 = self.vertex_color(vertex_normals[i2], p2, light_position, view_position);
            let c3 = self.vertex_color(vertex_normals[i3], p3, light_position, view_position);

            for y in top..=bottom {
                for x in left..=right {
                    if !geometry::in_triangle(x, y, p1, p2, p3) {
                        continue;
                    }
                    if !z_buffer.test_and_set(x, y, z) {
                        continue;
                    }

                    let [alpha, beta, gamma] = geometry::barycentric(x, y, p1, p2, p3);
                    let color = [
                        alpha * c1[0] + beta * c2[0] + gamma * c3[0],
                        alpha * c1[1] + beta * c2[1] + gamma * c3[1],
                        alpha * c1[2] + beta * c2[2] + gamma * c3[2],
                    ];

                    points.push(ShadedPoint::new(x, y, z, color));
                }
            }
        }
    }
}

impl ShadingStrategy for GourardShading {
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
        let mut z_buffer = DepthBuffer::new(viewport);

        self.render_object(
            object,
            viewport,
            light_position,
            view_position,
            &mut z_buffer,
            points,
        );
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
