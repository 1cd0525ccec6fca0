use crate::vec3::Vec3;
use core::ops::{Add, Mul};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A unit-normal-form quaternion `w + xi + yj + zk`. Rotation sinks only ever
/// receive normalized instances.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Quaternion {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Quaternion {
    pub const IDENTITY: Quaternion = Quaternion { w: 1.0, x: 0.0, y: 0.0, z: 0.0 };

    /// Components within this tolerance of zero are snapped to exactly zero
    /// on normalize, to stop `-0.0` from propagating through later products.
    const SNAP_EPS: f64 = 1e-6;

    pub const fn new(w: f64, x: f64, y: f64, z: f64) -> Self {
        Self { w, x, y, z }
    }

    pub fn magnitude_squared(self) -> f64 {
        self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z
    }

    pub fn magnitude(self) -> f64 {
        self.magnitude_squared().sqrt()
    }

    fn snap(v: f64) -> f64 {
        if v.abs() < Quaternion::SNAP_EPS {
            0.0
        } else {
            v
        }
    }

    /// Returns the identity quaternion on a zero (or near-zero) input,
    /// canonicalizes sign so `w >= 0`, and snaps near-zero components to
    /// exact zero.
    pub fn normalize(self) -> Quaternion {
        let mag = self.magnitude();
        if mag < 1e-12 {
            return Quaternion::IDENTITY;
        }
        let inv = 1.0 / mag;
        let mut q = Quaternion {
            w: self.w * inv,
            x: self.x * inv,
            y: self.y * inv,
            z: self.z * inv,
        };
        if q.w < 0.0 {
            q = Quaternion { w: -q.w, x: -q.x, y: -q.y, z: -q.z };
        }
        Quaternion {
            w: Quaternion::snap(q.w),
            x: Quaternion::snap(q.x),
            y: Quaternion::snap(q.y),
            z: Quaternion::snap(q.z),
        }
    }

    pub fn conjugate(self) -> Quaternion {
        Quaternion { w: self.w, x: -self.x, y: -self.y, z: -self.z }
    }

    /// Returns a null-like (all-zero) quaternion when `magnitude² < 1e-6`
    /// rather than dividing by a near-zero denominator.
    pub fn inverse(self) -> Quaternion {
        let mag_sq = self.magnitude_squared();
        if mag_sq < 1e-6 {
            return Quaternion::new(0.0, 0.0, 0.0, 0.0);
        }
        self.conjugate().scale(1.0 / mag_sq)
    }

    pub fn scale(self, k: f64) -> Quaternion {
        Quaternion { w: self.w * k, x: self.x * k, y: self.y * k, z: self.z * k }
    }

    /// Hamilton product `self ⊗ rhs`.
    pub fn hamilton_product(self, rhs: Quaternion) -> Quaternion {
        Quaternion {
            w: self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
            x: self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            y: self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            z: self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
        }
    }

    /// Rotates `v` via the sandwich product `q ⊗ (0,v) ⊗ q*`.
    pub fn rotate_vector(self, v: Vec3) -> Vec3 {
        let qv = Quaternion::new(0.0, v.x, v.y, v.z);
        let r = self.hamilton_product(qv).hamilton_product(self.conjugate());
        Vec3::new(r.x, r.y, r.z)
    }

    /// Builds a rotation quaternion from an axis (normalized internally) and
    /// an angle in radians.
    pub fn from_axis_angle(axis: Vec3, angle_rad: f64) -> Quaternion {
        let n = axis.normalize();
        let half = 0.5 * angle_rad;
        let (s, c) = half.sin_cos();
        Quaternion::new(c, n.x * s, n.y * s, n.z * s)
    }

    /// Recovers `(axis, angle_rad)`. Returns `(Vec3::UP, 0.0)` for the
    /// identity (zero-angle) rotation, where the axis is arbitrary.
    pub fn to_axis_angle(self) -> (Vec3, f64) {
        let q = self.normalize();
        let angle = 2.0 * q.w.clamp(-1.0, 1.0).acos();
        let s = (1.0 - q.w * q.w).max(0.0).sqrt();
        if s < 1e-8 {
            (Vec3::UP, angle)
        } else {
            (Vec3::new(q.x / s, q.y / s, q.z / s), angle)
        }
    }

    /// The quaternion derivative `dq/dt = 1/2 * (0, ω) ⊗ q` for a body
    /// rotating at world-frame angular velocity `omega`.
    pub fn derivative(self, omega: Vec3) -> Quaternion {
        let omega_q = Quaternion::new(0.0, omega.x, omega.y, omega.z);
        omega_q.hamilton_product(self).scale(0.5)
    }

    pub fn is_finite(self) -> bool {
        self.w.is_finite() && self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Add for Quaternion {
    type Output = Quaternion;
    fn add(self, rhs: Quaternion) -> Quaternion {
        Quaternion {
            w: self.w + rhs.w,
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
        }
    }
}

impl Mul for Quaternion {
    type Output = Quaternion;
    fn mul(self, rhs: Quaternion) -> Quaternion {
        self.hamilton_product(rhs)
    }
}

impl Mul<f64> for Quaternion {
    type Output = Quaternion;
    fn mul(self, k: f64) -> Quaternion {
        self.scale(k)
    }
}
