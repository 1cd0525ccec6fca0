use crate::state::RigidBody;

/// Declares a body at rest once its linear speed, angular speed, and height
/// all fall within threshold for `consecutive_required` consecutive steps.
///
/// The ground band suppresses a false "stable at apex" reading when linear
/// velocity briefly nulls at the top of the flight. It is parameterized as
/// `max(0.01, 2*radius)` rather than a fixed `0.01` m, because a coin whose
/// radius exceeds that band could never satisfy `position.y < y_ground_band`
/// at rest — see DESIGN.md.
#[derive(Clone, Copy, Debug)]
pub struct StabilityDetector {
    pub velocity_threshold: f64,
    pub angular_velocity_threshold: f64,
    pub ground_band: f64,
    pub consecutive_required: u32,
}

impl StabilityDetector {
    pub fn for_radius(radius: f64) -> Self {
        StabilityDetector {
            velocity_threshold: 0.01,
            angular_velocity_threshold: 0.1,
            ground_band: (2.0 * radius).max(0.01),
            consecutive_required: 10,
        }
    }

    pub fn is_stable_step(&self, body: &RigidBody) -> bool {
        body.state.linear_velocity.magnitude() <= self.velocity_threshold
            && body.state.angular_velocity.magnitude() <= self.angular_velocity_threshold
            && body.state.position.y < self.ground_band
    }
}

/// Tracks consecutive stable steps and reports settlement once
/// `consecutive_required` is reached.
#[derive(Clone, Copy, Debug, Default)]
pub struct StabilityTracker {
    consecutive_stable: u32,
}

impl StabilityTracker {
    pub fn observe(&mut self, detector: &StabilityDetector, body: &RigidBody) -> bool {
        if detector.is_stable_step(body) {
            self.consecutive_stable += 1;
        } else {
            self.consecutive_stable = 0;
        }
        self.consecutive_stable >= detector.consecutive_required
    }

    pub fn reset(&mut self) {
        self.consecutive_stable = 0;
    }
}
