//! Math utilities and types
//!
//! Provides the vector types used by the 2D and 3D indexes.

pub use nalgebra::{Vector2, Vector3};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// Math utility functions
pub mod utils {
    /// Square a value
    pub fn squared(value: f32) -> f32 {
        value * value
    }

    /// Linear interpolation
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }
}
