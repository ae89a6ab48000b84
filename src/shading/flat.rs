//! Flat shading: one illumination sample per triangle.

use crate::depth::DepthBuffer;
use crate::geometry;
use crate::math::vec3::Vec3;
use crate::mesh::Mesh;
use crate::point::ShadedPoint;
use crate::texture::Texture;
use crate::viewport::Viewport;

use super::{FloorRenderer, ShadingParams, ShadingStrategy};

/// Shades each triangle with a single color computed at its projected
/// centroid, using the unprojected surface normal. The whole triangle also
/// shares the centroid's depth, so faces layer as units rather than
/// interpenetrating per pixel.
pub struct FlatShading {
    params: ShadingParams,
    floor: FloorRenderer,
}

impl FlatShading {
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
        view_position: Vec3,
        z_buffer: &mut DepthBuffer,
        points: &mut Vec<ShadedPoint>,
    ) {
        let width = viewport.width();
        let height = viewport.height();

        for i in 0..object.triangle_count() {
            let [v1, v2, v3] = object.triangle_vertices(i);

            // The normal comes from the unprojected triangle; projection
            // would distort it.
            let normal = geometry::surface_normal(v1, v2, v3);

            let p1 = geometry::project(v1, view_position, width, height);
            let p2 = geometry::project(v2, view_position, width, height);
            let p3 = geometry::project(v3, view_position, width, height);

            let (left, right, top, bottom) = geometry::bounding_box(p1, p2, p3, viewport);

            // One lighting sample at the projected centroid covers the
            // whole triangle, depth included.
            let center_x = (p1.x + p2.x + p3.x) / 3.0;
            let center_y = (p1.y + p2.y + p3.y) / 3.0;
            let z = (p1.z + p2.z + p3.z) / 3.0;

            let light = (light_position - Vec3::new(center_x, center_y, z)).normalize();
            let view = (view_position - Vec3::new(center_x, center_y, z)).normalize();

            let (ambient, diffuse, specular) = self.params.illuminate(normal, light, view);
            let color = self.params.combine(ambient, diffuse, specular);

            for y in top..=bottom {
                for x in left..=right {
                    if !geometry::in_triangle(x, y, p1, p2, p3) {
                        continue;
                    }
                    if !z_buffer.test_and_set(x, y, z) {
                        continue;
                    }
                    points.push(ShadedPoint::new(x, y, z, color));
                }
            }
        }
    }
}

impl ShadingStrategy for FlatShading {
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
