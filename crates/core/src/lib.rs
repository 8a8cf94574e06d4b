//! Snowscape Core Library
//!
//! Procedural meshes and a fixed-size particle system for small real-time
//! scenes. Everything produced here is plain vertex data ready to upload to a
//! GPU buffer; windowing, shaders and drawing are left to the caller.
//!
//! ## Modules
//!
//! - [`geometry`]: circles, rings, cylinders and cones, pipes, hemispheres,
//!   spheres, capsules, boxes and tessellated planes, with optional UVs
//! - [`particles`]: a respawning particle pool kept in one interleaved
//!   `x, y, z, r, g, b, a` float buffer
//! - [`animation`]: timed state sequences for simple choreography
//! - [`scene`]: assembles a configured winter scene from the pieces above

// Core types and utilities
pub mod core_types;

pub mod animation;
pub mod geometry;
pub mod particles;
pub mod scene;

// Re-export core types
pub use core_types::{Color, Vec2, Vec3};

// Re-export mesh and particle types
pub use geometry::{GeometryError, MeshBuffer, PipeMesh, ShapeMesh, Topology};
pub use particles::{EmitterConfig, ParticleError, ParticlePool, PoolStats};

// Re-export sequencing and scene types
pub use animation::{AnimationError, Frame, Timeline};
pub use scene::{build_scene, build_scene_seeded, SceneAssets, SceneConfig, SceneError};
