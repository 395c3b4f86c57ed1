use super::Vec3;

/// Euler angles in radians, applied in XYZ order
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Euler {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Euler {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// 4x4 matrix for transformations (column-major for WebGL)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    pub data: [f32; 16],
}

impl Mat4 {
    pub fn identity() -> Self {
        Self {
            data: [
                1.0, 0.0, 0.0, 0.0,
                0.0, 1.0, 0.0, 0.0,
                0.0, 0.0, 1.0, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        let mut m = Self::identity();
        m.data[12] = x;
        m.data[13] = y;
        m.data[14] = z;
        m
    }

    /// Instance transform `T * Rx * Ry * Rz * S` with a uniform scale.
    ///
    /// Written out in closed form since it runs once per instance per frame.
    pub fn compose(position: Vec3, rotation: Euler, scale: f32) -> Self {
        let (a, b) = (rotation.x.cos(), rotation.x.sin());
        let (c, d) = (rotation.y.cos(), rotation.y.sin());
        let (e, f) = (rotation.z.cos(), rotation.z.sin());

        let ae = a * e;
        let af = a * f;
        let be = b * e;
        let bf = b * f;

        Self {
            data: [
                c * e * scale,
                (af + be * d) * scale,
                (bf - ae * d) * scale,
                0.0,
                -c * f * scale,
                (ae - bf * d) * scale,
                (be + af * d) * scale,
                0.0,
                d * scale,
                -b * c * scale,
                a * c * scale,
                0.0,
                position.x,
                position.y,
                position.z,
                1.0,
            ],
        }
    }

    /// Perspective projection matrix
    pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        let f = 1.0 / (fov_y / 2.0).tan();
        let nf = 1.0 / (near - far);

        Self {
            data: [
                f / aspect, 0.0, 0.0, 0.0,
                0.0, f, 0.0, 0.0,
                0.0, 0.0, (far + near) * nf, -1.0,
                0.0, 0.0, 2.0 * far * near * nf, 0.0,
            ],
        }
    }

    /// Look-at view matrix
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let f = (target - eye).normalize();
        let r = f.cross(&up).normalize();
        let u = r.cross(&f);

        Self {
            data: [
                r.x, u.x, -f.x, 0.0,
                r.y, u.y, -f.y, 0.0,
                r.z, u.z, -f.z, 0.0,
                -r.dot(&eye), -u.dot(&eye), f.dot(&eye), 1.0,
            ],
        }
    }

    /// Matrix multiplication
    pub fn mul(&self, other: &Mat4) -> Self {
        let mut result = [0.0f32; 16];

        for row in 0..4 {
            for col in 0..4 {
                let mut sum = 0.0;
                for k in 0..4 {
                    sum += self.data[row + k * 4] * other.data[k + col * 4];
                }
                result[row + col * 4] = sum;
            }
        }

        Self { data: result }
    }

    /// Transform a point (applies translation)
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        Vec3::new(
            self.data[0] * p.x + self.data[4] * p.y + self.data[8] * p.z + self.data[12],
            self.data[1] * p.x + self.data[5] * p.y + self.data[9] * p.z + self.data[13],
            self.data[2] * p.x + self.data[6] * p.y + self.data[10] * p.z + self.data[14],
        )
    }

    /// Translation component
    #[cfg(test)]
    pub fn position(&self) -> Vec3 {
        Vec3::new(self.data[12], self.data[13], self.data[14])
    }

    /// Length of the first basis column (the uniform scale for composed transforms)
    #[cfg(test)]
    pub fn uniform_scale(&self) -> f32 {
        Vec3::new(self.data[0], self.data[1], self.data[2]).length()
    }

    /// Get as slice for WebGL
    pub fn as_slice(&self) -> &[f32; 16] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn assert_mat_eq(a: &Mat4, b: &Mat4) {
        for (x, y) in a.data.iter().zip(b.data.iter()) {
            assert!((x - y).abs() < 1e-5, "{:?} != {:?}", a, b);
        }
    }

    fn scale(s: f32) -> Mat4 {
        let mut m = Mat4::identity();
        m.data[0] = s;
        m.data[5] = s;
        m.data[10] = s;
        m
    }

    fn rotation_x(angle: f32) -> Mat4 {
        let (c, s) = (angle.cos(), angle.sin());
        Mat4 {
            data: [
                1.0, 0.0, 0.0, 0.0,
                0.0, c, s, 0.0,
                0.0, -s, c, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    fn rotation_y(angle: f32) -> Mat4 {
        let (c, s) = (angle.cos(), angle.sin());
        Mat4 {
            data: [
                c, 0.0, -s, 0.0,
                0.0, 1.0, 0.0, 0.0,
                s, 0.0, c, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    fn rotation_z(angle: f32) -> Mat4 {
        let (c, s) = (angle.cos(), angle.sin());
        Mat4 {
            data: [
                c, s, 0.0, 0.0,
                -s, c, 0.0, 0.0,
                0.0, 0.0, 1.0, 0.0,
                0.0, 0.0, 0.0, 1.0,
            ],
        }
    }

    #[test]
    fn test_translation() {
        let m = Mat4::translation(1.0, 2.0, 3.0);
        let result = m.transform_point(Vec3::ZERO);
        assert_eq!(result, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_rotation_z() {
        let m = rotation_z(FRAC_PI_2);
        let result = m.transform_point(Vec3::new(1.0, 0.0, 0.0));
        assert!(result.x.abs() < 0.0001);
        assert!((result.y - 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_matrix_mul() {
        let t = Mat4::translation(1.0, 0.0, 0.0);
        let s = scale(2.0);
        let result = t.mul(&s).transform_point(Vec3::new(1.0, 0.0, 0.0));
        assert!((result.x - 3.0).abs() < 0.0001);
    }

    #[test]
    fn test_compose_matches_product() {
        let position = Vec3::new(1.5, -2.0, 0.25);
        let rotation = Euler::new(0.3, 1.1, -0.7);
        let factor = 1.7;

        let expected = Mat4::translation(position.x, position.y, position.z)
            .mul(&rotation_x(rotation.x))
            .mul(&rotation_y(rotation.y))
            .mul(&rotation_z(rotation.z))
            .mul(&scale(factor));

        assert_mat_eq(&Mat4::compose(position, rotation, factor), &expected);
    }

    #[test]
    fn test_compose_identity_rotation() {
        let m = Mat4::compose(Vec3::new(4.0, 5.0, 6.0), Euler::default(), 1.0);
        assert_mat_eq(&m, &Mat4::translation(4.0, 5.0, 6.0));
        assert_eq!(m.position(), Vec3::new(4.0, 5.0, 6.0));
    }

    #[test]
    fn test_uniform_scale_survives_rotation() {
        let m = Mat4::compose(Vec3::ZERO, Euler::new(2.0, 0.4, 1.3), 0.35);
        assert!((m.uniform_scale() - 0.35).abs() < 1e-5);
    }

    #[test]
    fn test_look_at_origin_ahead() {
        let view = Mat4::look_at(Vec3::new(0.0, 0.0, 25.0), Vec3::ZERO, Vec3::UP);
        let p = view.transform_point(Vec3::ZERO);
        assert!((p.z + 25.0).abs() < 1e-4);
    }
}
