//! Rigid-body state, force model, RK4 integrator, ground collision, and the
//! settle/classify pair that turn a trajectory into a coin-flip outcome.

pub mod collision;
pub mod error;
pub mod face;
pub mod forces;
pub mod integrator;
pub mod stability;
pub mod state;

pub use collision::{CollisionDetector, CollisionResponder, CollisionResult};
pub use error::BodyError;
pub use face::{Face, FaceEvaluator};
pub use forces::ForceModel;
pub use integrator::integrate_step;
pub use stability::{StabilityDetector, StabilityTracker};
pub use state::{ForceAccumulator, RigidBody, RigidBodyState, StateDerivative};
