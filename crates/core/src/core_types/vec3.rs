//! Vector type aliases for points, directions and texture coordinates.

use nalgebra::{Vector2, Vector3};

/// 3D vector type for vertex positions, offsets and velocities.
///
/// This is a simple alias for `nalgebra::Vector3<f32>`, used throughout
/// the generators (y-up, local shape frame) and the particle pool.
pub type Vec3 = Vector3<f32>;

/// 2D vector type for `(u, v)` texture coordinates.
pub type Vec2 = Vector2<f32>;
