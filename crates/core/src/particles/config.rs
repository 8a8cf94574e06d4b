//! Emitter parameters and their validation

use crate::core_types::{Color, Vec3};
use serde::{Deserialize, Serialize};

/// Construction parameters of a [`ParticlePool`](super::ParticlePool)
///
/// `origin` and `velocity` are only the initial values: every
/// [`update`](super::ParticlePool::update) replaces them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmitterConfig {
    /// Fixed pool size
    pub count: usize,
    /// Tint shared by every particle
    pub color: Color,
    /// Center of the spawn volume
    pub origin: Vec3,
    /// Velocity given to spawned particles (units/s)
    pub velocity: Vec3,
    /// Shortest lifetime (s), must be > 0
    pub min_life: f32,
    /// Longest lifetime (s), must be >= `min_life`
    pub max_life: f32,
    /// Half-width of the spawn volume along x and z
    pub amplitude: f32,
}

impl EmitterConfig {
    pub fn new(
        count: usize,
        color: Color,
        origin: Vec3,
        velocity: Vec3,
        min_life: f32,
        max_life: f32,
        amplitude: f32,
    ) -> Self {
        Self {
            count,
            color,
            origin,
            velocity,
            min_life,
            max_life,
            amplitude,
        }
    }

    /// Slow, wide curtain of white flakes falling from `origin`
    pub fn snowfall(origin: Vec3) -> Self {
        Self {
            count: 2000,
            color: Color::WHITE,
            origin,
            velocity: Vec3::new(0.0, -0.6, 0.0),
            min_life: 4.0,
            max_life: 8.0,
            amplitude: 6.0,
        }
    }

    /// Short-lived warm sparks rising from a tight spot
    pub fn sparks(origin: Vec3) -> Self {
        Self {
            count: 300,
            color: Color::new(1.0, 0.75, 0.3),
            origin,
            velocity: Vec3::new(0.0, 1.5, 0.0),
            min_life: 0.3,
            max_life: 1.2,
            amplitude: 0.2,
        }
    }

    /// Check the lifetime range and spawn amplitude
    ///
    /// # Errors
    ///
    /// [`ParticleError`] describing the first invalid parameter.
    pub fn validate(&self) -> Result<(), ParticleError> {
        if !(self.min_life.is_finite() && self.min_life > 0.0) {
            return Err(ParticleError::NonPositiveLife {
                min_life: self.min_life,
            });
        }
        if !(self.max_life.is_finite() && self.max_life >= self.min_life) {
            return Err(ParticleError::InvertedLifeRange {
                min_life: self.min_life,
                max_life: self.max_life,
            });
        }
        if !(self.amplitude.is_finite() && self.amplitude >= 0.0) {
            return Err(ParticleError::InvalidAmplitude {
                amplitude: self.amplitude,
            });
        }
        Ok(())
    }
}

/// Errors that can occur when building a particle pool
#[derive(Debug, Clone, PartialEq)]
pub enum ParticleError {
    /// Minimum lifetime is zero, negative or not finite
    NonPositiveLife { min_life: f32 },
    /// Maximum lifetime is below the minimum (or not finite)
    InvertedLifeRange { min_life: f32, max_life: f32 },
    /// Spawn amplitude is negative or not finite
    InvalidAmplitude { amplitude: f32 },
}

impl std::fmt::Display for ParticleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParticleError::NonPositiveLife { min_life } => {
                write!(f, "minimum particle life must be positive, got {min_life}")
            }
            ParticleError::InvertedLifeRange { min_life, max_life } => write!(
                f,
                "maximum particle life {max_life} is below minimum {min_life}"
            ),
            ParticleError::InvalidAmplitude { amplitude } => {
                write!(f, "spawn amplitude must be non-negative, got {amplitude}")
            }
        }
    }
}

impl std::error::Error for ParticleError {}
