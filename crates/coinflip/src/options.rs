use coinflip_entropy::LaunchParameters;
use coinflip_math::Vec3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How much entropy the collaborator is asked to collect. A hint, not a
/// guarantee — see [`crate::entropy::EntropySource`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EntropyLevel {
    Fast,
    Standard,
    High,
    Paranoid,
}

impl Default for EntropyLevel {
    fn default() -> Self {
        EntropyLevel::Standard
    }
}

/// Physical parameters of the coin itself, SI units.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CoinConfig {
    pub mass: f64,
    pub radius: f64,
    pub thickness: f64,
}

impl Default for CoinConfig {
    fn default() -> Self {
        CoinConfig { mass: 0.00567, radius: 0.01213, thickness: 0.00175 }
    }
}

/// Toss shape. Each range is `[min, max]`; an absent field falls back to its
/// own default mean/std rather than to a range-derived one. A supplied range
/// maps to `mean = (min+max)/2`, `std_dev = (max-min)/4`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TossProfile {
    pub linear_velocity_range: Option<(f64, f64)>,
    pub angular_velocity_range: Option<(f64, f64)>,
    pub height_range: Option<(f64, f64)>,
}

fn range_to_mean_std(range: (f64, f64)) -> (f64, f64) {
    let (min, max) = range;
    ((min + max) / 2.0, (max - min) / 4.0)
}

impl TossProfile {
    /// Maps this profile onto the sampler's [`LaunchParameters`], falling
    /// back to the default impulse `N(5.0, 0.5)`, angular speed `N(120, 20)`
    /// about `+x`, and a fixed 1.0 m height for any field left unset.
    pub fn to_launch_parameters(&self) -> LaunchParameters {
        let default = LaunchParameters::default();

        let (impulse_mean, impulse_std_dev) = match self.linear_velocity_range {
            Some(range) => range_to_mean_std(range),
            None => (5.0, 0.5),
        };
        let (spin_mean, spin_std_dev) = match self.angular_velocity_range {
            Some(range) => range_to_mean_std(range),
            None => (120.0, 20.0),
        };
        let height = match self.height_range {
            Some(range) => range_to_mean_std(range).0,
            None => 1.0,
        };

        LaunchParameters {
            impulse_mean,
            impulse_std_dev,
            spin_mean,
            spin_std_dev,
            initial_position: Vec3::new(0.0, height, 0.0),
            ..default
        }
    }
}

/// Top-level knobs for [`crate::flip_coin`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FlipOptions {
    pub entropy_level: EntropyLevel,
    pub coin_config: CoinConfig,
    pub toss_profile: TossProfile,
    pub timeout_ms: u64,
    pub max_edge_retries: u32,
}

impl Default for FlipOptions {
    fn default() -> Self {
        FlipOptions {
            entropy_level: EntropyLevel::default(),
            coin_config: CoinConfig::default(),
            toss_profile: TossProfile::default(),
            timeout_ms: 10_000,
            max_edge_retries: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_toss_profile_uses_documented_defaults() {
        let params = TossProfile::default().to_launch_parameters();
        assert_eq!(params.impulse_mean, 5.0);
        assert_eq!(params.impulse_std_dev, 0.5);
        assert_eq!(params.spin_mean, 120.0);
        assert_eq!(params.spin_std_dev, 20.0);
        assert_eq!(params.initial_position, Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(params.ideal_spin_axis, Vec3::RIGHT);
    }

    #[test]
    fn supplied_range_maps_to_quarter_span_std_dev() {
        let profile = TossProfile { linear_velocity_range: Some((4.0, 6.0)), ..Default::default() };
        let params = profile.to_launch_parameters();
        assert_eq!(params.impulse_mean, 5.0);
        assert_eq!(params.impulse_std_dev, 0.5);
    }
}
