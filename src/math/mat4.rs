//! 4x4 homogeneous transformation matrices.
//!
//! # Convention
//! - Vectors are **column vectors** on the right: `Mat4 * Vec3`
//! - Translation is stored in the **last column**
//! - Transforms chain **right-to-left**: `A * B * v` applies B first, then A
//! - Rotation and shear constructors take their angle/offset in **degrees**,
//!   matching the mesh-manipulation conventions of the demo driver.

use std::ops::Mul;

use super::vec3::Vec3;

/// 4x4 matrix stored as `data[row][col]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    data: [[f32; 4]; 4],
}

impl Mat4 {
    pub fn new(data: [[f32; 4]; 4]) -> Self {
        Mat4 { data }
    }

    pub fn identity() -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a translation matrix.
    pub fn translation(dx: f32, dy: f32, dz: f32) -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, dx],
            [0.0, 1.0, 0.0, dy],
            [0.0, 0.0, 1.0, dz],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a scale matrix.
    pub fn scaling(sx: f32, sy: f32, sz: f32) -> Self {
        Mat4::new([
            [sx, 0.0, 0.0, 0.0],
            [0.0, sy, 0.0, 0.0],
            [0.0, 0.0, sz, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a rotation matrix around the X axis; `theta` is in degrees.
    pub fn rotation_x(theta: f32) -> Self {
        let c = theta.to_radians().cos();
        let s = theta.to_radians().sin();
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, c, -s, 0.0],
            [0.0, s, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a rotation matrix around the Y axis; `theta` is in degrees.
    pub fn rotation_y(theta: f32) -> Self {
        let c = theta.to_radians().cos();
        let s = theta.to_radians().sin();
        Mat4::new([
            [c, 0.0, s, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [-s, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a rotation matrix around the Z axis; `theta` is in degrees.
    pub fn rotation_z(theta: f32) -> Self {
        let c = theta.to_radians().cos();
        let s = theta.to_radians().sin();
        Mat4::new([
            [c, -s, 0.0, 0.0],
            [s, c, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a shear matrix along the X axis.
    pub fn shear_x(dx: f32) -> Self {
        Mat4::new([
            [1.0, dx, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a shear matrix along the Y axis.
    pub fn shear_y(dy: f32) -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [dy, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Access element at [row][col].
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row][col]
    }
}

/// Matrix multiplication: Mat4 * Mat4.
///
/// `A * B * v` applies B first, then A.
impl Mul<Mat4> for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Self::Output {
        let mut result = [[0.0f32; 4]; 4];

        for row in 0..4 {
            for col in 0..4 {
                result[row][col] = self.data[row][0] * rhs.data[0][col]
                    + self.data[row][1] * rhs.data[1][col]
                    + self.data[row][2] * rhs.data[2][col]
                    + self.data[row][3] * rhs.data[3][col];
            }
        }

        Mat4::new(result)
    }
}

/// Transform a point: Mat4 * Vec3 (column vector with w = 1).
///
/// The result is always divided through by the transformed w component.
impl Mul<Vec3> for Mat4 {
    type Output = Vec3;

    fn mul(self, v: Vec3) -> Self::Output {
        let x =
            self.data[0][0] * v.x + self.data[0][1] * v.y + self.data[0][2] * v.z + self.data[0][3];
        let y =
            self.data[1][0] * v.x + self.data[1][1] * v.y + self.data[1][2] * v.z + self.data[1][3];
        let z =
            self.data[2][0] * v.x + self.data[2][1] * v.y + self.data[2][2] * v.z + self.data[2][3];
        let w =
            self.data[3][0] * v.x + self.data[3][1] * v.y + self.data[3][2] * v.z + self.data[3][3];

        Vec3::new(x / w, y / w, z / w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn identity_leaves_points_unchanged() {
        let p = Vec3::new(1.0, -2.0, 3.0);
        let q = Mat4::identity() * p;
        assert_eq!(p, q);
    }

    #[test]
    fn translation_moves_points() {
        let p = Mat4::translation(5.0, -3.0, 2.0) * Vec3::ZERO;
        assert_eq!(p, Vec3::new(5.0, -3.0, 2.0));
    }

    #[test]
    fn rotation_x_quarter_turn() {
        let p = Mat4::rotation_x(90.0) * Vec3::new(0.0, 1.0, 0.0);
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.z, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn rotation_y_quarter_turn() {
        let p = Mat4::rotation_y(90.0) * Vec3::new(0.0, 0.0, 1.0);
        assert_relative_eq!(p.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.z, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn multiplication_applies_right_hand_side_first() {
        let scale_then_move = Mat4::translation(10.0, 0.0, 0.0) * Mat4::scaling(2.0, 2.0, 2.0);
        let p = scale_then_move * Vec3::new(1.0, 1.0, 1.0);
        assert_relative_eq!(p.x, 12.0, epsilon = 1e-6);
        assert_relative_eq!(p.y, 2.0, epsilon = 1e-6);
        assert_relative_eq!(p.z, 2.0, epsilon = 1e-6);
    }

    #[test]
    fn scaling_is_per_axis() {
        let p = Mat4::scaling(2.0, 3.0, 4.0) * Vec3::new(1.0, 1.0, 1.0);
        assert_eq!(p, Vec3::new(2.0, 3.0, 4.0));
    }
}
