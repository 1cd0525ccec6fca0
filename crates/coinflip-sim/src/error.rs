use thiserror::Error;

/// Errors raised while constructing a [`crate::RigidBody`].
///
/// Grounded on the `PhysicsError` pattern used across the pack's rigid-body
/// crates: named variants carrying structured context rather than opaque
/// strings.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BodyError {
    #[error("inertia tensor is singular (determinant {determinant:e}); cannot invert")]
    SingularInertia { determinant: f64 },

    #[error("{field} must be positive, got {value}")]
    NonPositiveParameter { field: &'static str, value: f64 },
}
