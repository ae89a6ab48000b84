//! Projection, surface normals, and the edge-function triangle test.
//!
//! Rasterization is driven by integer edge functions: for an edge from A to B,
//!
//! ```text
//! f(x, y) = (a.y - b.y) * x + (b.x - a.x) * y + a.x * b.y - b.x * a.y
//! ```
//!
//! The barycentric weight of each vertex is the opposite edge's function at
//! the query point divided by the same function at that vertex. A point is
//! inside the triangle (or on its boundary) exactly when all three weights
//! lie in [0, 1]. Boundary pixels on shared edges are claimed by every
//! adjacent triangle; the depth test decides final ownership.

use crate::math::vec3::Vec3;
use crate::viewport::Viewport;

/// Fixed perspective distance used by [`project`].
pub const PROJECTION_DISTANCE: f32 = -2.0;

/// Perspective-projects `point` as seen from `viewpoint`.
///
/// The point is translated into the viewpoint's frame, then x and y are
/// scaled by the perspective divide and half the viewport dimensions. The
/// returned z is the view-relative depth, passed through unchanged.
///
/// A view-relative z of zero divides by zero; the caller must guard against
/// placing vertices exactly at the viewpoint's depth.
pub fn project(point: Vec3, viewpoint: Vec3, width: i32, height: i32) -> Vec3 {
    let x = point.x - viewpoint.x;
    let y = point.y - viewpoint.y;
    let z = point.z - viewpoint.z;

    Vec3::new(
        ((PROJECTION_DISTANCE * x) / z) * (width / 2) as f32,
        ((PROJECTION_DISTANCE * y) / z) * (height / 2) as f32,
        z,
    )
}

/// Normal of the triangle (p1, p2, p3), assuming clockwise vertex order.
///
/// Computed as (p2 - p1) x (p3 - p1), normalized. Reversing the winding
/// flips the sign; a degenerate (zero-area) triangle yields NaN components.
pub fn surface_normal(p1: Vec3, p2: Vec3, p3: Vec3) -> Vec3 {
    let u = p2 - p1;
    let v = p3 - p1;
    u.cross(v).normalize()
}

/// The edge function for edge (a -> b) evaluated at (x, y).
#[inline]
fn edge(ax: i32, ay: i32, bx: i32, by: i32, x: i32, y: i32) -> i32 {
    (ay - by) * x + (bx - ax) * y + ax * by - bx * ay
}

/// Barycentric weights of (x, y) with respect to the projected triangle
/// (p1, p2, p3). Vertex coordinates are truncated to integers before the
/// edge functions are evaluated.
///
/// The weights sum to 1 for any query point; each lies in [0, 1] exactly
/// when the point is inside the triangle.
pub fn barycentric(x: i32, y: i32, p1: Vec3, p2: Vec3, p3: Vec3) -> [f32; 3] {
    let (x0, y0) = (p1.x as i32, p1.y as i32);
    let (x1, y1) = (p2.x as i32, p2.y as i32);
    let (x2, y2) = (p3.x as i32, p3.y as i32);

    // alpha = f_12(x, y) / f_12(x0, y0), and cyclically for beta and gamma.
    let alpha = edge(x1, y1, x2, y2, x, y) as f32 / edge(x1, y1, x2, y2, x0, y0) as f32;
    let beta = edge(x2, y2, x0, y0, x, y) as f32 / edge(x2, y2, x0, y0, x1, y1) as f32;
    let gamma = edge(x0, y0, x1, y1, x, y) as f32 / edge(x0, y0, x1, y1, x2, y2) as f32;

    [alpha, beta, gamma]
}

/// Whether (x, y) lies inside (or on the boundary of) the triangle.
pub fn in_triangle(x: i32, y: i32, p1: Vec3, p2: Vec3, p3: Vec3) -> bool {
    let [alpha, beta, gamma] = barycentric(x, y, p1, p2, p3);

    (0.0..=1.0).contains(&alpha) && (0.0..=1.0).contains(&beta) && (0.0..=1.0).contains(&gamma)
}

/// The triangle's screen-space bounding rectangle, clamped to the viewport.
///
/// Returned as (left, right, top, bottom), inclusive on all sides. Restricts
/// the per-pixel scan to the pixels a triangle could actually cover.
pub fn bounding_box(p1: Vec3, p2: Vec3, p3: Vec3, viewport: Viewport) -> (i32, i32, i32, i32) {
    let left = (p1.x.min(p2.x).min(p3.x) as i32).clamp(viewport.left, viewport.right);
    let right = (p1.x.max(p2.x).max(p3.x) as i32).clamp(viewport.left, viewport.right);
    let top = (p1.y.min(p2.y).min(p3.y) as i32).clamp(viewport.top, viewport.bottom);
    let bottom = (p1.y.max(p2.y).max(p3.y) as i32).clamp(viewport.top, viewport.bottom);

    (left, right, top, bottom)
}
