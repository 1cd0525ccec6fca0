use std::time::Instant;

use coinflip_entropy::{expand, mix, sample_initial, EntropyReader};
use coinflip_sim::{
    integrate_step, CollisionDetector, CollisionResponder, Face, FaceEvaluator, ForceModel,
    RigidBody, RigidBodyState, StabilityDetector, StabilityTracker,
};

use crate::entropy::EntropySource;
use crate::error::FlipError;
use crate::options::FlipOptions;
use crate::result::{DebugFlipResult, FlipResult, FlipStats, InitialConditionsOverride, Outcome};

/// Mandatory fixed timestep. The integrator's error analysis and the
/// collision/stability tolerances all assume 10 kHz stepping; this is not a
/// tunable default, it is the only value the rest of the contract is
/// verified against.
pub const DT: f64 = 1e-4;

const NEAR_GROUND_DAMPING: f64 = 0.8;
const SAMPLER_BYTE_BUDGET: usize = 256;

/// Runs `flipCoin`: collects entropy, tosses, integrates, and retries on
/// `EDGE` until either a face settles or `max_edge_retries` is exhausted.
pub fn flip_coin(options: &FlipOptions, source: &dyn EntropySource) -> Result<FlipResult, FlipError> {
    for attempt in 0..=options.max_edge_retries {
        let entropy = source.collect(options.entropy_level)?;
        let bytes = expand(&mix(&[entropy.bytes.as_slice()]), SAMPLER_BYTE_BUDGET);

        let launch_params = options.toss_profile.to_launch_parameters();
        let mut reader = EntropyReader::new(&bytes);
        let state = sample_initial(&mut reader, &launch_params);

        let attempt_outcome = run_attempt(&state, options, None)?;

        match attempt_outcome.face {
            Face::Edge => continue,
            Face::Heads | Face::Tails => {
                return Ok(FlipResult {
                    outcome: to_outcome(attempt_outcome.face),
                    stats: FlipStats {
                        simulation_time_ms: attempt_outcome.sim_time_ms,
                        entropy_bits_used: entropy.stats.total_bits,
                        bounce_count: attempt_outcome.bounce_count,
                        retry_count: attempt,
                    },
                });
            }
        }
    }
    Err(FlipError::EdgeRetryExhausted { max_retries: options.max_edge_retries })
}

/// Optional inputs to `debugFlipCoin`: an explicit seed bypassing the
/// collaborator, per-field initial-condition overrides, and a trajectory
/// recording flag.
#[derive(Clone, Debug, Default)]
pub struct DebugOptions {
    pub seed: Option<Vec<u8>>,
    pub initial_conditions: Option<InitialConditionsOverride>,
    pub record_trajectory: bool,
}

/// Runs a single, non-retrying attempt. Unlike `flip_coin`, `EDGE` surfaces
/// here as an error rather than triggering a retry — debug runs reproduce
/// exactly one attempt.
pub fn debug_flip_coin(
    options: &FlipOptions,
    debug: &DebugOptions,
    source: &dyn EntropySource,
) -> Result<DebugFlipResult, FlipError> {
    let (seed, entropy_bits_used) = match &debug.seed {
        Some(seed) => (seed.clone(), (seed.len() * 8) as u64),
        None => {
            let entropy = source.collect(options.entropy_level)?;
            (entropy.bytes, entropy.stats.total_bits)
        }
    };

    let bytes = expand(&mix(&[seed.as_slice()]), SAMPLER_BYTE_BUDGET);
    let launch_params = options.toss_profile.to_launch_parameters();
    let mut reader = EntropyReader::new(&bytes);
    let mut state = sample_initial(&mut reader, &launch_params);
    if let Some(overrides) = &debug.initial_conditions {
        state = overrides.apply(state);
    }
    let initial_conditions = state;

    let attempt_outcome = run_attempt(&state, options, debug.record_trajectory.then_some(()))?;

    match attempt_outcome.face {
        Face::Edge => Err(FlipError::EdgeRetryExhausted { max_retries: 0 }),
        Face::Heads | Face::Tails => Ok(DebugFlipResult {
            outcome: to_outcome(attempt_outcome.face),
            stats: FlipStats {
                simulation_time_ms: attempt_outcome.sim_time_ms,
                entropy_bits_used,
                bounce_count: attempt_outcome.bounce_count,
                retry_count: 0,
            },
            seed,
            initial_conditions,
            trajectory: attempt_outcome.trajectory,
        }),
    }
}

struct AttemptOutcome {
    face: Face,
    bounce_count: u32,
    sim_time_ms: f64,
    trajectory: Option<Vec<RigidBodyState>>,
}

/// Integrates one toss from `state` to settlement (or wall-clock timeout),
/// applying near-ground damping, collision response, and stability tracking
/// every step.
fn run_attempt(
    state: &RigidBodyState,
    options: &FlipOptions,
    record_trajectory: Option<()>,
) -> Result<AttemptOutcome, FlipError> {
    let coin = &options.coin_config;
    let mut body = RigidBody::new_disc(*state, coin.mass, coin.radius, coin.thickness)?;

    let forces = ForceModel::default();
    let collision_detector = CollisionDetector::default();
    let collision_responder = CollisionResponder::default();
    let stability_detector = StabilityDetector::for_radius(coin.radius);
    let face_evaluator = FaceEvaluator::default();
    let mut stability_tracker = StabilityTracker::default();

    let mut bounce_count = 0u32;
    let mut steps = 0u64;
    let mut trajectory = record_trajectory.map(|_| Vec::new());

    let start = Instant::now();
    let timeout_ms = options.timeout_ms;

    let settled = loop {
        if start.elapsed().as_millis() as u64 >= timeout_ms {
            break false;
        }

        integrate_step(&mut body, DT, &forces);
        steps += 1;

        if body.state.position.y < coin.radius {
            body.state.linear_velocity = body.state.linear_velocity.scale(NEAR_GROUND_DAMPING);
            body.state.angular_velocity = body.state.angular_velocity.scale(NEAR_GROUND_DAMPING);
        }

        let collision = collision_detector.detect(&body);
        collision_responder.respond(&mut body, &collision);
        if collision.colliding {
            bounce_count += 1;
        }

        if let Some(traj) = trajectory.as_mut() {
            traj.push(body.state);
        }

        if stability_tracker.observe(&stability_detector, &body) {
            break true;
        }
    };

    let elapsed_ms = start.elapsed().as_millis() as u64;
    if !settled {
        return Err(FlipError::SimulationTimeout { timeout_ms, elapsed_ms });
    }

    let face = face_evaluator.classify(&body);
    let sim_time_ms = steps as f64 * DT * 1000.0;

    Ok(AttemptOutcome { face, bounce_count, sim_time_ms, trajectory })
}

fn to_outcome(face: Face) -> Outcome {
    match face {
        Face::Heads => Outcome::Heads,
        Face::Tails => Outcome::Tails,
        Face::Edge => unreachable!("EDGE is filtered before outcome conversion"),
    }
}
