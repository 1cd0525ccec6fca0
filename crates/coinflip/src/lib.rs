//! Entropy-seeded, physically-based coin flip: sample a toss, integrate it
//! against gravity/drag/collision until it settles, and classify the
//! resting face.
//!
//! ```no_run
//! use coinflip::{flip_coin, FlipOptions, OsEntropySource};
//!
//! let result = flip_coin(&FlipOptions::default(), &OsEntropySource).unwrap();
//! println!("{:?}", result.outcome);
//! ```

pub mod controller;
pub mod entropy;
pub mod error;
pub mod options;
pub mod result;

pub use controller::{debug_flip_coin, flip_coin, DebugOptions, DT};
pub use entropy::{CollectedEntropy, EntropySource, EntropyStats, OsEntropySource};
pub use error::FlipError;
pub use options::{CoinConfig, EntropyLevel, FlipOptions, TossProfile};
pub use result::{DebugFlipResult, FlipResult, FlipStats, InitialConditionsOverride, Outcome};
