use crate::vec3::Vec3;
use core::ops::{Add, Mul, Sub};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A 3x3 matrix in row-major order: `m[3*row + col]`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Mat3 {
    pub m: [f64; 9],
}

impl Mat3 {
    pub const ZERO: Mat3 = Mat3 { m: [0.0; 9] };
    pub const IDENTITY: Mat3 = Mat3 {
        m: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
    };

    /// A singular-determinant floor is fixed at `1e-6`, scaled by the cube of
    /// the matrix's own characteristic magnitude so uniformly tiny-but-valid
    /// matrices (e.g. a coin's body-frame inertia tensor, entries ~1e-7) are
    /// never mistaken for singular just because the SI units are small.
    const SINGULAR_FACTOR: f64 = 1e-6;

    pub fn from_rows(r0: [f64; 3], r1: [f64; 3], r2: [f64; 3]) -> Self {
        Mat3 {
            m: [r0[0], r0[1], r0[2], r1[0], r1[1], r1[2], r2[0], r2[1], r2[2]],
        }
    }

    pub fn diagonal(x: f64, y: f64, z: f64) -> Self {
        Mat3::from_rows([x, 0.0, 0.0], [0.0, y, 0.0], [0.0, 0.0, z])
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.m[3 * row + col]
    }

    #[inline]
    fn set(&mut self, row: usize, col: usize, v: f64) {
        self.m[3 * row + col] = v;
    }

    pub fn add(self, rhs: Mat3) -> Mat3 {
        let mut out = Mat3::ZERO;
        for i in 0..9 {
            out.m[i] = self.m[i] + rhs.m[i];
        }
        out
    }

    pub fn sub(self, rhs: Mat3) -> Mat3 {
        let mut out = Mat3::ZERO;
        for i in 0..9 {
            out.m[i] = self.m[i] - rhs.m[i];
        }
        out
    }

    pub fn scale(self, k: f64) -> Mat3 {
        let mut out = Mat3::ZERO;
        for i in 0..9 {
            out.m[i] = self.m[i] * k;
        }
        out
    }

    pub fn mul_mat3(self, rhs: Mat3) -> Mat3 {
        let mut out = Mat3::ZERO;
        for row in 0..3 {
            for col in 0..3 {
                let mut acc = 0.0;
                for k in 0..3 {
                    acc += self.get(row, k) * rhs.get(k, col);
                }
                out.set(row, col, acc);
            }
        }
        out
    }

    pub fn mul_vec3(self, v: Vec3) -> Vec3 {
        Vec3 {
            x: self.get(0, 0) * v.x + self.get(0, 1) * v.y + self.get(0, 2) * v.z,
            y: self.get(1, 0) * v.x + self.get(1, 1) * v.y + self.get(1, 2) * v.z,
            z: self.get(2, 0) * v.x + self.get(2, 1) * v.y + self.get(2, 2) * v.z,
        }
    }

    pub fn transpose(self) -> Mat3 {
        Mat3::from_rows(
            [self.get(0, 0), self.get(1, 0), self.get(2, 0)],
            [self.get(0, 1), self.get(1, 1), self.get(2, 1)],
            [self.get(0, 2), self.get(1, 2), self.get(2, 2)],
        )
    }

    pub fn trace(self) -> f64 {
        self.get(0, 0) + self.get(1, 1) + self.get(2, 2)
    }

    pub fn determinant(self) -> f64 {
        let (a, b, c) = (self.get(0, 0), self.get(0, 1), self.get(0, 2));
        let (d, e, f) = (self.get(1, 0), self.get(1, 1), self.get(1, 2));
        let (g, h, i) = (self.get(2, 0), self.get(2, 1), self.get(2, 2));
        a * (e * i - f * h) - b * (d * i - f * g) + c * (d * h - e * g)
    }

    /// Largest absolute entry; used to scale the singularity threshold.
    fn characteristic_scale(&self) -> f64 {
        self.m.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()))
    }

    /// Inverse via the adjugate/determinant formula. Returns `None` when the
    /// determinant is small relative to the matrix's own magnitude — not when
    /// it is merely small in absolute SI terms.
    pub fn inverse(self) -> Option<Mat3> {
        let det = self.determinant();
        let scale = self.characteristic_scale().max(f64::MIN_POSITIVE);
        let threshold = Mat3::SINGULAR_FACTOR * scale.powi(3);
        if det.abs() < threshold {
            return None;
        }

        let (a, b, c) = (self.get(0, 0), self.get(0, 1), self.get(0, 2));
        let (d, e, f) = (self.get(1, 0), self.get(1, 1), self.get(1, 2));
        let (g, h, i) = (self.get(2, 0), self.get(2, 1), self.get(2, 2));

        let inv_det = 1.0 / det;
        let cof = [
            (e * i - f * h),
            -(b * i - c * h),
            (b * f - c * e),
            -(d * i - f * g),
            (a * i - c * g),
            -(a * f - c * d),
            (d * h - e * g),
            -(a * h - b * g),
            (a * e - b * d),
        ];
        // cof is the cofactor matrix; the adjugate is its transpose.
        let adj = Mat3 {
            m: [
                cof[0], cof[3], cof[6], cof[1], cof[4], cof[7], cof[2], cof[5], cof[8],
            ],
        };
        Some(adj.scale(inv_det))
    }

    pub fn skew_symmetric(v: Vec3) -> Mat3 {
        Mat3::from_rows(
            [0.0, -v.z, v.y],
            [v.z, 0.0, -v.x],
            [-v.y, v.x, 0.0],
        )
    }

    pub fn rotation_x(angle_rad: f64) -> Mat3 {
        let (s, c) = angle_rad.sin_cos();
        Mat3::from_rows([1.0, 0.0, 0.0], [0.0, c, -s], [0.0, s, c])
    }

    pub fn rotation_y(angle_rad: f64) -> Mat3 {
        let (s, c) = angle_rad.sin_cos();
        Mat3::from_rows([c, 0.0, s], [0.0, 1.0, 0.0], [-s, 0.0, c])
    }

    pub fn rotation_z(angle_rad: f64) -> Mat3 {
        let (s, c) = angle_rad.sin_cos();
        Mat3::from_rows([c, -s, 0.0], [s, c, 0.0], [0.0, 0.0, 1.0])
    }
}

impl Add for Mat3 {
    type Output = Mat3;
    fn add(self, rhs: Mat3) -> Mat3 {
        self.add(rhs)
    }
}

impl Sub for Mat3 {
    type Output = Mat3;
    fn sub(self, rhs: Mat3) -> Mat3 {
        self.sub(rhs)
    }
}

impl Mul<Mat3> for Mat3 {
    type Output = Mat3;
    fn mul(self, rhs: Mat3) -> Mat3 {
        self.mul_mat3(rhs)
    }
}

impl Mul<Vec3> for Mat3 {
    type Output = Vec3;
    fn mul(self, rhs: Vec3) -> Vec3 {
        self.mul_vec3(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn identity_inverts_to_itself() {
        let inv = Mat3::IDENTITY.inverse().unwrap();
        assert_eq!(inv, Mat3::IDENTITY);
    }

    #[test]
    fn inverts_tiny_physically_valid_diagonal() {
        // Order of magnitude of a coin's body-frame inertia tensor.
        let tensor = Mat3::diagonal(2.1e-7, 4.17e-7, 2.1e-7);
        assert!(tensor.determinant().abs() < 1e-6);
        let inv = tensor.inverse().expect("tiny but well-conditioned matrix must invert");
        let roundtrip = tensor.mul_mat3(inv);
        for i in 0..3 {
            assert_relative_eq!(roundtrip.get(i, i), 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn rejects_truly_singular_matrix() {
        let m = Mat3::from_rows([1.0, 2.0, 3.0], [2.0, 4.0, 6.0], [1.0, 0.0, 1.0]);
        assert!(m.inverse().is_none());
    }

    #[test]
    fn skew_symmetric_cross_product_identity() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        let w = Vec3::new(4.0, 5.0, 6.0);
        let skew = Mat3::skew_symmetric(v);
        let via_matrix = skew.mul_vec3(w);
        let via_cross = v.cross(w);
        assert_relative_eq!(via_matrix.x, via_cross.x, epsilon = 1e-12);
        assert_relative_eq!(via_matrix.y, via_cross.y, epsilon = 1e-12);
        assert_relative_eq!(via_matrix.z, via_cross.z, epsilon = 1e-12);
    }
}
