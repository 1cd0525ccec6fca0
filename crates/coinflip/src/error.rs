use thiserror::Error;

/// Every way `flip_coin`/`debug_flip_coin` can fail. None of these variants
/// are raised by a panic; the kernel never fabricates an outcome in place of
/// an error.
#[derive(Debug, Error)]
pub enum FlipError {
    #[error("simulation did not settle within {timeout_ms}ms (elapsed {elapsed_ms}ms)")]
    SimulationTimeout { timeout_ms: u64, elapsed_ms: u64 },

    #[error("coin settled on its edge in all {max_retries} attempts")]
    EdgeRetryExhausted { max_retries: u32 },

    #[error("entropy collaborator failed: {reason}")]
    EntropyCollectionFailed { reason: String },

    #[error(transparent)]
    InvalidBody(#[from] coinflip_sim::BodyError),
}
