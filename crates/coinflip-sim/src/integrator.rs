use crate::forces::ForceModel;
use crate::state::{RigidBody, RigidBodyState, StateDerivative};

/// Advances `body` by `dt` using the classical four-stage Runge-Kutta
/// average `(k1 + 2*k2 + 2*k3 + k4) / 6` of the derivative functional
/// defined in [`derivative`]. Intermediate predicted states used to evaluate
/// k2..k4 are renormalized before being fed back into force/inertia
/// evaluation — skipping this renormalization is a known source of energy
/// drift.
///
/// Deterministic: identical `(body, dt, forces)` tuples produce
/// byte-identical output within the same binary. No guarantee is made
/// across different binaries or CPUs.
pub fn integrate_step(body: &mut RigidBody, dt: f64, forces: &ForceModel) {
    let s = body.state;

    let k1 = derivative(body, s, forces);
    let s2 = advance(s, k1, dt * 0.5, body.mass);
    let k2 = derivative(body, s2, forces);
    let s3 = advance(s, k2, dt * 0.5, body.mass);
    let k3 = derivative(body, s3, forces);
    let s4 = advance(s, k3, dt, body.mass);
    let k4 = derivative(body, s4, forces);

    let mean = k1.add(k2.scale(2.0)).add(k3.scale(2.0)).add(k4).scale(1.0 / 6.0);
    body.state = advance(s, mean, dt, body.mass);
}

/// Evaluates the derivative functional at predicted state `state`, holding
/// `body`'s mass properties fixed.
fn derivative(body: &RigidBody, state: RigidBodyState, forces: &ForceModel) -> StateDerivative {
    let probe = body.with_state(state);
    let accum = forces.evaluate(&probe);

    let inertia_world = probe.inertia_world();
    let inverse_inertia_world = probe.inverse_inertia_world();

    // Euler's rotational equation: I*wdot = tau_ext - w x (I*w).
    let angular_momentum = inertia_world.mul_vec3(state.angular_velocity);
    let gyroscopic = state.angular_velocity.cross(angular_momentum);
    let angular_acceleration = inverse_inertia_world.mul_vec3(accum.torque - gyroscopic);

    StateDerivative {
        velocity: state.linear_velocity,
        force: accum.force,
        spin: state.orientation.derivative(state.angular_velocity),
        angular_acceleration,
    }
}

/// Applies the linear advance rule shared by RK4's intermediate previews and
/// its final combination step: `position += h*velocity`,
/// `linearVelocity += h*force/m`, `orientation = normalize(orientation +
/// h*spin)`, `angularVelocity += h*angularAcceleration`.
fn advance(state: RigidBodyState, deriv: StateDerivative, h: f64, mass: f64) -> RigidBodyState {
    RigidBodyState {
        position: state.position + deriv.velocity.scale(h),
        orientation: (state.orientation + deriv.spin.scale(h)).normalize(),
        linear_velocity: state.linear_velocity + deriv.force.scale(h / mass),
        angular_velocity: state.angular_velocity + deriv.angular_acceleration.scale(h),
    }
}
