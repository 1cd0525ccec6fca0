use coinflip::{
    debug_flip_coin, flip_coin, CoinConfig, DebugOptions, FlipOptions, InitialConditionsOverride,
    Outcome, OsEntropySource, TossProfile,
};
use coinflip_math::{Quaternion, Vec3};

fn free_fall_options(orientation: Quaternion, record_trajectory: bool) -> (FlipOptions, DebugOptions) {
    let options = FlipOptions { timeout_ms: 2000, ..FlipOptions::default() };
    let debug = DebugOptions {
        seed: Some(b"deterministic-free-fall-seed".to_vec()),
        initial_conditions: Some(InitialConditionsOverride {
            position: Some(Vec3::new(0.0, 0.05, 0.0)),
            orientation: Some(orientation),
            linear_velocity: Some(Vec3::ZERO),
            angular_velocity: Some(Vec3::ZERO),
        }),
        record_trajectory,
    };
    (options, debug)
}

#[test]
fn identity_free_fall_lands_heads() {
    let (options, debug) = free_fall_options(Quaternion::IDENTITY, true);
    let result = debug_flip_coin(&options, &debug, &OsEntropySource).expect("should settle");

    assert_eq!(result.outcome, Outcome::Heads);
    assert!(result.stats.bounce_count >= 1);

    let final_state = result.trajectory.as_ref().and_then(|t| t.last()).expect("trajectory recorded");
    let half_thickness = options.coin_config.thickness / 2.0;
    assert!(
        (final_state.position.y - half_thickness).abs() < 5e-4,
        "final y {} far from half-thickness {half_thickness}",
        final_state.position.y
    );
}

#[test]
fn flipped_free_fall_lands_tails() {
    let orientation = Quaternion::from_axis_angle(Vec3::RIGHT, std::f64::consts::PI);
    let (options, debug) = free_fall_options(orientation, false);
    let result = debug_flip_coin(&options, &debug, &OsEntropySource).expect("should settle");

    assert_eq!(result.outcome, Outcome::Tails);
}

#[test]
fn edge_start_free_fall_eventually_settles_via_retry() {
    // `flip_coin` samples its own initial conditions from fresh entropy each
    // retry, so an edge *start* cannot be forced through its public API —
    // only `debug_flip_coin` accepts an override, and it surfaces EDGE as an
    // error rather than retrying. This drives that same retry behavior
    // explicitly: repeated debug attempts from an edge-prone orientation,
    // each with fresh seed, standing in for the loop `flip_coin` runs
    // internally.
    let orientation = Quaternion::from_axis_angle(Vec3::RIGHT, std::f64::consts::FRAC_PI_2);
    let options = FlipOptions { timeout_ms: 2000, ..FlipOptions::default() };

    let mut settled = false;
    for attempt in 0..8 {
        let debug = DebugOptions {
            seed: Some(format!("edge-retry-seed-{attempt}").into_bytes()),
            initial_conditions: Some(InitialConditionsOverride {
                position: Some(Vec3::new(0.0, 0.05, 0.0)),
                orientation: Some(orientation),
                linear_velocity: Some(Vec3::ZERO),
                angular_velocity: Some(Vec3::ZERO),
            }),
            record_trajectory: false,
        };
        match debug_flip_coin(&options, &debug, &OsEntropySource) {
            Ok(result) => {
                assert!(matches!(result.outcome, Outcome::Heads | Outcome::Tails));
                settled = true;
                break;
            }
            Err(coinflip::FlipError::EdgeRetryExhausted { .. }) => continue,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
    assert!(settled, "coin never left EDGE across retries");
}

#[test]
fn debug_replay_with_explicit_seed_is_deterministic() {
    let options = FlipOptions::default();
    let debug = DebugOptions { seed: None, initial_conditions: None, record_trajectory: false };

    let first = debug_flip_coin(&options, &debug, &OsEntropySource).expect("first run settles");
    let replay_debug = DebugOptions {
        seed: Some(first.seed.clone()),
        initial_conditions: None,
        record_trajectory: false,
    };
    let second =
        debug_flip_coin(&options, &replay_debug, &OsEntropySource).expect("replay settles");

    assert_eq!(first.initial_conditions, second.initial_conditions);
    assert_eq!(first.stats.bounce_count, second.stats.bounce_count);
    assert_eq!(first.outcome, second.outcome);
}

#[test]
fn distribution_is_fair_over_many_flips() {
    // Spec property Q12: over 1000 flips with default options, heads fraction
    // falls in [0.36, 0.64] (95% CI under a fair null). Errors are not
    // swallowed — an EdgeRetryExhausted or SimulationTimeout here is itself a
    // fairness-relevant failure, not noise to filter out.
    let options = FlipOptions { coin_config: CoinConfig::default(), ..FlipOptions::default() };
    let mut heads = 0;
    let mut tails = 0;
    let trials = 1000;
    for _ in 0..trials {
        match flip_coin(&options, &OsEntropySource) {
            Ok(result) => match result.outcome {
                Outcome::Heads => heads += 1,
                Outcome::Tails => tails += 1,
            },
            Err(e) => panic!("flip {} of {trials} failed: {e}", heads + tails + 1),
        }
    }
    let heads_fraction = heads as f64 / trials as f64;
    assert!(
        (0.36..=0.64).contains(&heads_fraction),
        "heads fraction {heads_fraction} (heads={heads} tails={tails}) outside [0.36, 0.64]"
    );
}

#[test]
fn custom_toss_profile_is_honored_without_panicking() {
    let options = FlipOptions {
        toss_profile: TossProfile {
            linear_velocity_range: Some((4.0, 6.0)),
            angular_velocity_range: Some((100.0, 140.0)),
            height_range: Some((0.8, 1.2)),
        },
        timeout_ms: 3000,
        ..FlipOptions::default()
    };
    let result = flip_coin(&options, &OsEntropySource);
    assert!(result.is_ok() || matches!(result, Err(coinflip::FlipError::EdgeRetryExhausted { .. })));
}
