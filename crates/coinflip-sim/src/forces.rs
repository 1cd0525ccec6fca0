use crate::state::{ForceAccumulator, RigidBody};
use coinflip_math::Vec3;

/// Gravity, quadratic linear drag, and linear angular drag. Calibrated
/// parameters, not correctness properties — see [`ForceModel::default`].
#[derive(Clone, Copy, Debug)]
pub struct ForceModel {
    /// Gravitational acceleration, m/s^2 (positive magnitude; applied as -y).
    pub gravity: f64,
    /// Air density, kg/m^3.
    pub air_density: f64,
    /// Drag coefficient for a tumbling disc, dimensionless.
    pub drag_coefficient: f64,
    /// Linear angular-drag coefficient. The source material ships two
    /// different defaults (`1e-8` and `5e-4`) in adjacent files; this picks
    /// `1e-5` — within the documented "small positive" range and roughly the
    /// geometric middle of the two — and does not average them. See
    /// DESIGN.md.
    pub angular_drag: f64,
}

impl Default for ForceModel {
    fn default() -> Self {
        ForceModel { gravity: 9.81, air_density: 1.2, drag_coefficient: 1.17, angular_drag: 1e-5 }
    }
}

impl ForceModel {
    /// Net force and torque on `body` at its current state. Gravity applies
    /// no torque; angular drag applies no force.
    pub fn evaluate(&self, body: &RigidBody) -> ForceAccumulator {
        let gravity_force = Vec3::new(0.0, -self.gravity * body.mass, 0.0);
        let drag_force = self.linear_drag(body);
        let drag_torque = self.angular_drag(body);

        ForceAccumulator { force: gravity_force + drag_force, torque: drag_torque }
    }

    /// `F_d = -1/2 * rho * C_d * pi * r^2 * |v|^2 * v_hat`. Returns zero
    /// below `|v|^2 < 1e-12` to avoid normalizing a near-zero vector.
    fn linear_drag(&self, body: &RigidBody) -> Vec3 {
        let v = body.state.linear_velocity;
        let speed_sq = v.magnitude_squared();
        if speed_sq < 1e-12 {
            return Vec3::ZERO;
        }
        let area = std::f64::consts::PI * body.radius * body.radius;
        let coefficient = 0.5 * self.air_density * self.drag_coefficient * area * speed_sq;
        v.normalize().scale(-coefficient)
    }

    /// `tau_d = -k * omega`.
    fn angular_drag(&self, body: &RigidBody) -> Vec3 {
        body.state.angular_velocity.scale(-self.angular_drag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::RigidBodyState;
    use coinflip_math::Quaternion;

    fn body_with_velocity(v: Vec3) -> RigidBody {
        let state = RigidBodyState {
            position: Vec3::ZERO,
            orientation: Quaternion::IDENTITY,
            linear_velocity: v,
            angular_velocity: Vec3::ZERO,
        };
        RigidBody::new_disc(state, 0.00567, 0.01213, 0.00175).unwrap()
    }

    #[test]
    fn gravity_applies_no_torque() {
        let model = ForceModel::default();
        let body = body_with_velocity(Vec3::ZERO);
        let f = model.evaluate(&body);
        assert_eq!(f.torque, Vec3::ZERO);
        assert!(f.force.y < 0.0);
    }

    #[test]
    fn zero_velocity_has_zero_drag() {
        let model = ForceModel::default();
        let body = body_with_velocity(Vec3::ZERO);
        let f = model.evaluate(&body);
        // Only gravity remains.
        assert_eq!(f.force, Vec3::new(0.0, -model.gravity * body.mass, 0.0));
    }

    #[test]
    fn drag_opposes_motion() {
        let model = ForceModel::default();
        let body = body_with_velocity(Vec3::new(0.0, -5.0, 0.0));
        let drag = model.linear_drag(&body);
        assert!(drag.y > 0.0, "drag should push back up against downward motion");
    }
}
