//! coinflip-math
//!
//! Immutable value types shared by the coin-flip simulation workspace:
//! `Vec3`, `Mat3`, and `Quaternion`. Every operation returns a fresh value —
//! there is no aliasing and no shared mutable math state.

mod mat3;
mod quaternion;
mod vec3;

pub use mat3::Mat3;
pub use quaternion::Quaternion;
pub use vec3::Vec3;
