//! Core types and utilities

pub mod color;
pub mod vec3;

pub use color::Color;
pub use vec3::{Vec2, Vec3};
