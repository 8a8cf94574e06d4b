//! Point-particle emitter for snow and spark effects
//!
//! A [`ParticlePool`] owns a fixed number of particles for its whole life:
//! particles are never created or destroyed after construction, only respawned
//! in place when their lifetime runs out. The pool is single-owner and is
//! updated synchronously once per frame with the measured frame delta.

pub mod config;
pub mod pool;

pub use config::{EmitterConfig, ParticleError};
pub use pool::{
    Particle, ParticleMut, ParticlePool, PoolStats, DOWNWARD_JITTER_DIVISOR, FLOATS_PER_PARTICLE,
};
