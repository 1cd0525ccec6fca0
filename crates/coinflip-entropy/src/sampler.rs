use crate::reader::EntropyReader;
use coinflip_math::{Quaternion, Vec3};
use coinflip_sim::RigidBodyState;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Means/standard-deviations that shape a sampled launch, plus the fixed
/// starting position/orientation/spin-axis the sample perturbs around.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LaunchParameters {
    pub impulse_mean: f64,
    pub impulse_std_dev: f64,
    pub spin_mean: f64,
    pub spin_std_dev: f64,
    pub axis_perturbation_std_dev: f64,
    pub ideal_spin_axis: Vec3,
    pub initial_position: Vec3,
    pub initial_orientation: Quaternion,
}

impl Default for LaunchParameters {
    fn default() -> Self {
        LaunchParameters {
            impulse_mean: 3.0,
            impulse_std_dev: 0.3,
            spin_mean: 25.0,
            spin_std_dev: 3.0,
            axis_perturbation_std_dev: 0.05,
            ideal_spin_axis: Vec3::RIGHT,
            initial_position: Vec3::new(0.0, 1.0, 0.0),
            initial_orientation: Quaternion::IDENTITY,
        }
    }
}

/// Draws a [`RigidBodyState`] from `reader` given `params`. Deterministic:
/// identical entropy bytes and identical `params` always sample the same
/// state.
pub fn sample_initial(reader: &mut EntropyReader, params: &LaunchParameters) -> RigidBodyState {
    let impulse = reader.next_gaussian(params.impulse_mean, params.impulse_std_dev);
    let linear_velocity = Vec3::new(0.0, impulse, 0.0);

    let spin_magnitude = reader.next_gaussian(params.spin_mean, params.spin_std_dev);

    let perturb = Vec3::new(
        reader.next_gaussian(0.0, params.axis_perturbation_std_dev),
        reader.next_gaussian(0.0, params.axis_perturbation_std_dev),
        reader.next_gaussian(0.0, params.axis_perturbation_std_dev),
    );
    let axis = (params.ideal_spin_axis.normalize() + perturb).normalize();
    let angular_velocity = axis.scale(spin_magnitude);

    RigidBodyState {
        position: params.initial_position,
        orientation: params.initial_orientation,
        linear_velocity,
        angular_velocity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mixer::{expand, mix};

    #[test]
    fn same_bytes_and_params_sample_the_same_state() {
        let seed = mix(&[b"sampler-determinism"]);
        let bytes = expand(&seed, 64);
        let params = LaunchParameters::default();

        let mut r1 = EntropyReader::new(&bytes);
        let mut r2 = EntropyReader::new(&bytes);
        let s1 = sample_initial(&mut r1, &params);
        let s2 = sample_initial(&mut r2, &params);

        assert_eq!(s1, s2);
    }

    #[test]
    fn linear_velocity_is_purely_vertical() {
        let seed = mix(&[b"sampler-vertical"]);
        let bytes = expand(&seed, 64);
        let params = LaunchParameters::default();
        let mut r = EntropyReader::new(&bytes);

        let state = sample_initial(&mut r, &params);
        assert_eq!(state.linear_velocity.x, 0.0);
        assert_eq!(state.linear_velocity.z, 0.0);
    }

    #[test]
    fn axis_perturbation_keeps_angular_velocity_near_ideal_axis() {
        let seed = mix(&[b"sampler-axis"]);
        let bytes = expand(&seed, 64);
        let params = LaunchParameters { axis_perturbation_std_dev: 0.01, ..LaunchParameters::default() };
        let mut r = EntropyReader::new(&bytes);

        let state = sample_initial(&mut r, &params);
        let axis = state.angular_velocity.normalize();
        let alignment = axis.dot(params.ideal_spin_axis.normalize());
        assert!(alignment > 0.95, "axis drifted too far: alignment {alignment}");
    }

    #[test]
    fn position_and_orientation_pass_through_unchanged() {
        let seed = mix(&[b"sampler-passthrough"]);
        let bytes = expand(&seed, 64);
        let params = LaunchParameters::default();
        let mut r = EntropyReader::new(&bytes);

        let state = sample_initial(&mut r, &params);
        assert_eq!(state.position, params.initial_position);
        assert_eq!(state.orientation, params.initial_orientation);
    }
}
