use crate::state::RigidBody;
use coinflip_math::Vec3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which face of the coin is uppermost once it has settled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Face {
    Heads,
    Tails,
    Edge,
}

/// Classifies a settled body's resting face from `orientation.rotate_vector(UP) . world_up`.
/// Values within `edge_tolerance` of zero are reported `Edge`; above it,
/// `Heads`; below its negation, `Tails`.
#[derive(Clone, Copy, Debug)]
pub struct FaceEvaluator {
    pub edge_tolerance: f64,
}

impl Default for FaceEvaluator {
    fn default() -> Self {
        FaceEvaluator { edge_tolerance: 0.1 }
    }
}

impl FaceEvaluator {
    pub fn classify(&self, body: &RigidBody) -> Face {
        let face_normal = body.state.orientation.rotate_vector(Vec3::UP);
        let alignment = face_normal.dot(Vec3::UP);

        if alignment > self.edge_tolerance {
            Face::Heads
        } else if alignment < -self.edge_tolerance {
            Face::Tails
        } else {
            Face::Edge
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::RigidBodyState;
    use coinflip_math::Quaternion;

    fn body_at(orientation: Quaternion) -> RigidBody {
        let state = RigidBodyState {
            position: Vec3::ZERO,
            orientation,
            linear_velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
        };
        RigidBody::new_disc(state, 0.00567, 0.01213, 0.00175).unwrap()
    }

    #[test]
    fn identity_orientation_is_heads() {
        let evaluator = FaceEvaluator::default();
        assert_eq!(evaluator.classify(&body_at(Quaternion::IDENTITY)), Face::Heads);
    }

    #[test]
    fn flipped_180_about_x_is_tails() {
        let evaluator = FaceEvaluator::default();
        let q = Quaternion::from_axis_angle(Vec3::RIGHT, std::f64::consts::PI);
        assert_eq!(evaluator.classify(&body_at(q)), Face::Tails);
    }

    #[test]
    fn quarter_turn_about_x_is_edge() {
        let evaluator = FaceEvaluator::default();
        let q = Quaternion::from_axis_angle(Vec3::RIGHT, std::f64::consts::FRAC_PI_2);
        assert_eq!(evaluator.classify(&body_at(q)), Face::Edge);
    }

    #[test]
    fn boundary_just_inside_tolerance_is_still_a_face() {
        let evaluator = FaceEvaluator::default();
        // alignment = cos(angle); pick an angle whose cosine clears 0.1 by a margin.
        let angle = (0.3f64).acos();
        let q = Quaternion::from_axis_angle(Vec3::RIGHT, angle);
        assert_eq!(evaluator.classify(&body_at(q)), Face::Heads);
    }
}
