use coinflip_math::{Mat3, Quaternion, Vec3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::BodyError;

/// The fundamental simulation record: center-of-mass position, unit
/// orientation, and world-frame linear/angular velocity.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RigidBodyState {
    /// Center of mass, meters.
    pub position: Vec3,
    /// Unit, canonicalized orientation.
    pub orientation: Quaternion,
    /// Meters/second.
    pub linear_velocity: Vec3,
    /// World-frame radians/second.
    pub angular_velocity: Vec3,
}

impl RigidBodyState {
    pub fn is_finite(&self) -> bool {
        self.position.is_finite()
            && self.orientation.is_finite()
            && self.linear_velocity.is_finite()
            && self.angular_velocity.is_finite()
    }
}

/// Net force and torque accumulated over one force-model evaluation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ForceAccumulator {
    pub force: Vec3,
    pub torque: Vec3,
}

impl ForceAccumulator {
    pub fn add(self, rhs: ForceAccumulator) -> ForceAccumulator {
        ForceAccumulator { force: self.force + rhs.force, torque: self.torque + rhs.torque }
    }
}

/// The RK4 derivative functional's output. Note the last field stores
/// angular *acceleration* (α), not torque — RK4 must average commensurate
/// derivatives of ω, not a mix of torques and accelerations.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StateDerivative {
    pub velocity: Vec3,
    pub force: Vec3,
    pub spin: Quaternion,
    pub angular_acceleration: Vec3,
}

impl StateDerivative {
    pub fn zero() -> Self {
        Self {
            velocity: Vec3::ZERO,
            force: Vec3::ZERO,
            spin: Quaternion::new(0.0, 0.0, 0.0, 0.0),
            angular_acceleration: Vec3::ZERO,
        }
    }

    pub fn add(self, rhs: StateDerivative) -> StateDerivative {
        StateDerivative {
            velocity: self.velocity + rhs.velocity,
            force: self.force + rhs.force,
            spin: self.spin + rhs.spin,
            angular_acceleration: self.angular_acceleration + rhs.angular_acceleration,
        }
    }

    pub fn scale(self, k: f64) -> StateDerivative {
        StateDerivative {
            velocity: self.velocity.scale(k),
            force: self.force.scale(k),
            spin: self.spin.scale(k),
            angular_acceleration: self.angular_acceleration.scale(k),
        }
    }
}

/// A rigid disc: [`RigidBodyState`] plus the body-fixed mass properties
/// needed to integrate it. `inverse_inertia_tensor` is precomputed at
/// construction; construction fails if the inertia tensor is singular.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RigidBody {
    pub state: RigidBodyState,
    pub mass: f64,
    pub radius: f64,
    pub thickness: f64,
    inertia_tensor: Mat3,
    inverse_inertia_tensor: Mat3,
}

impl RigidBody {
    /// Builds a rigid body from an explicit body-frame inertia tensor.
    /// Fails if `inertia_tensor` is singular (see [`Mat3::inverse`]).
    pub fn new(
        state: RigidBodyState,
        mass: f64,
        radius: f64,
        thickness: f64,
        inertia_tensor: Mat3,
    ) -> Result<Self, BodyError> {
        if mass <= 0.0 {
            return Err(BodyError::NonPositiveParameter { field: "mass", value: mass });
        }
        if radius <= 0.0 {
            return Err(BodyError::NonPositiveParameter { field: "radius", value: radius });
        }
        if thickness <= 0.0 {
            return Err(BodyError::NonPositiveParameter { field: "thickness", value: thickness });
        }

        let inverse_inertia_tensor = inertia_tensor.inverse().ok_or(BodyError::SingularInertia {
            determinant: inertia_tensor.determinant(),
        })?;

        Ok(RigidBody { state, mass, radius, thickness, inertia_tensor, inverse_inertia_tensor })
    }

    /// Builds a disc-shaped rigid body (a coin) from a cylinder-about-its-own
    /// axis inertia model: `I_yy = 1/2 m r^2` (the flip/spin axis) and
    /// `I_xx = I_zz = 1/12 m (3r^2 + h^2)`.
    pub fn new_disc(
        state: RigidBodyState,
        mass: f64,
        radius: f64,
        thickness: f64,
    ) -> Result<Self, BodyError> {
        let i_yy = 0.5 * mass * radius * radius;
        let i_xz = (1.0 / 12.0) * mass * (3.0 * radius * radius + thickness * thickness);
        let inertia_tensor = Mat3::diagonal(i_xz, i_yy, i_xz);
        Self::new(state, mass, radius, thickness, inertia_tensor)
    }

    /// Returns a copy of this body with `state` substituted and mass
    /// properties untouched. Used by the integrator to probe RK4's
    /// intermediate predicted states without re-deriving the inertia tensor.
    pub(crate) fn with_state(&self, state: RigidBodyState) -> RigidBody {
        RigidBody { state, ..*self }
    }

    pub fn inertia_tensor(&self) -> Mat3 {
        self.inertia_tensor
    }

    pub fn inverse_inertia_tensor(&self) -> Mat3 {
        self.inverse_inertia_tensor
    }

    /// World-frame inertia tensor `R * I_body * R^T`.
    pub fn inertia_world(&self) -> Mat3 {
        let r = rotation_matrix(self.state.orientation);
        r.mul_mat3(self.inertia_tensor).mul_mat3(r.transpose())
    }

    /// World-frame inverse inertia tensor, via the same similarity transform
    /// applied to the body-frame inverse.
    pub fn inverse_inertia_world(&self) -> Mat3 {
        let r = rotation_matrix(self.state.orientation);
        r.mul_mat3(self.inverse_inertia_tensor).mul_mat3(r.transpose())
    }
}

/// Builds the 3x3 rotation matrix equivalent to a unit quaternion, by
/// rotating the standard basis vectors (keeps `coinflip-math` free of a
/// direct `Quaternion -> Mat3` conversion, since only `coinflip-sim` needs
/// one).
pub fn rotation_matrix(q: Quaternion) -> Mat3 {
    let q = q.normalize();
    let ex = q.rotate_vector(Vec3::RIGHT);
    let ey = q.rotate_vector(Vec3::UP);
    let ez = q.rotate_vector(Vec3::FORWARD);
    Mat3::from_rows(
        [ex.x, ey.x, ez.x],
        [ex.y, ey.y, ez.y],
        [ex.z, ey.z, ez.z],
    )
}
