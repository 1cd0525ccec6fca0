use crate::error::FlipError;
use crate::options::EntropyLevel;
use rand::RngCore;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Bookkeeping the collaborator reports back about a single collection.
/// The kernel reads these fields and tolerates anything in `sources_used`
/// without interpreting it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EntropyStats {
    pub total_bits: u64,
    pub collection_time_ms: u64,
    pub sources_used: Vec<String>,
    pub level: EntropyLevel,
}

/// Raw bytes plus provenance from one collaborator call.
#[derive(Clone, Debug, PartialEq)]
pub struct CollectedEntropy {
    pub bytes: Vec<u8>,
    pub stats: EntropyStats,
}

/// The kernel's external randomness collaborator. Modeled as a blocking call
/// rather than an `async fn`: the only cooperative-suspension point the
/// controller needs is between attempts, and a synchronous trait object is
/// sufficient to sit at that boundary without pulling a runtime into the
/// numerics crates. Implementors may block on their own I/O internally.
pub trait EntropySource {
    fn collect(&self, level: EntropyLevel) -> Result<CollectedEntropy, FlipError>;
}

fn byte_budget(level: EntropyLevel) -> usize {
    match level {
        EntropyLevel::Fast => 16,
        EntropyLevel::Standard => 32,
        EntropyLevel::High => 64,
        EntropyLevel::Paranoid => 128,
    }
}

/// Default collaborator: pulls raw bytes from the OS CSPRNG.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsEntropySource;

impl EntropySource for OsEntropySource {
    fn collect(&self, level: EntropyLevel) -> Result<CollectedEntropy, FlipError> {
        let len = byte_budget(level);
        let mut bytes = vec![0u8; len];
        rand::rngs::OsRng.fill_bytes(&mut bytes);

        Ok(CollectedEntropy {
            bytes,
            stats: EntropyStats {
                total_bits: (len * 8) as u64,
                collection_time_ms: 0,
                sources_used: vec!["os_csprng".to_string()],
                level,
            },
        })
    }
}
