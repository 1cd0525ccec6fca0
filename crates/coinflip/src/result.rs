use coinflip_math::{Quaternion, Vec3};
use coinflip_sim::RigidBodyState;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The only two outcomes externally observable from `flip_coin`. `EDGE` is a
/// retry trigger inside the controller, never a value this type can hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Outcome {
    Heads,
    Tails,
}

/// Per-attempt bookkeeping surfaced alongside the outcome.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FlipStats {
    pub simulation_time_ms: f64,
    pub entropy_bits_used: u64,
    pub bounce_count: u32,
    pub retry_count: u32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FlipResult {
    pub outcome: Outcome,
    pub stats: FlipStats,
}

/// Individually-overridable fields for `debug_flip_coin`'s `initial_conditions`
/// input. `None` leaves the sampled value in place.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InitialConditionsOverride {
    pub position: Option<Vec3>,
    pub orientation: Option<Quaternion>,
    pub linear_velocity: Option<Vec3>,
    pub angular_velocity: Option<Vec3>,
}

impl InitialConditionsOverride {
    pub(crate) fn apply(&self, mut state: RigidBodyState) -> RigidBodyState {
        if let Some(position) = self.position {
            state.position = position;
        }
        if let Some(orientation) = self.orientation {
            state.orientation = orientation;
        }
        if let Some(linear_velocity) = self.linear_velocity {
            state.linear_velocity = linear_velocity;
        }
        if let Some(angular_velocity) = self.angular_velocity {
            state.angular_velocity = angular_velocity;
        }
        state
    }
}

/// Extra fields `debug_flip_coin` exposes beyond [`FlipResult`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DebugFlipResult {
    pub outcome: Outcome,
    pub stats: FlipStats,
    pub seed: Vec<u8>,
    pub initial_conditions: RigidBodyState,
    pub trajectory: Option<Vec<RigidBodyState>>,
}
