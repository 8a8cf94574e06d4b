//! Fixed-size particle pool backed by one interleaved vertex buffer
//!
//! Each particle occupies seven consecutive floats `x, y, z, r, g, b, a` in
//! [`ParticlePool::buffer`], so the buffer can be uploaded to the GPU as-is and
//! drawn as a point list. Lifetime and velocity live beside the buffer in a
//! parallel state vector. Particle views are built from the particle's chunk
//! of the buffer plus its state entry; writes through a view land directly in
//! the shared buffer.
//!
//! # Update rule
//!
//! Every call to [`ParticlePool::update`] subtracts `dt` from each particle's
//! remaining life. Expired particles (life ≤ 0) respawn around the new origin
//! with the new velocity, a fresh lifetime and full alpha; live ones move by
//! `velocity · dt` and fade to `alpha = life / initial_life`.

use super::config::{EmitterConfig, ParticleError};
use crate::core_types::{Color, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Floats per particle in the interleaved buffer
pub const FLOATS_PER_PARTICLE: usize = 7;

const COLOR_OFFSET: usize = 3;
const ALPHA_OFFSET: usize = 6;

/// Spawn points drop at most `amplitude / 2.5` below the origin and never rise
/// above it, which keeps fresh flakes just under the emitter.
pub const DOWNWARD_JITTER_DIVISOR: f32 = 2.5;

/// Per-particle simulation state kept outside the vertex buffer
#[derive(Debug, Clone, Copy, PartialEq)]
struct ParticleState {
    /// Remaining life (s)
    life: f32,
    /// Life drawn at the last spawn (s)
    initial_life: f32,
    velocity: Vec3,
}

/// Aggregate view of a pool, for logging and reports
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PoolStats {
    pub count: usize,
    /// Mean alpha over all particles, 0 for an empty pool
    pub mean_alpha: f32,
    /// Particles respawned by the most recent update
    pub respawned_last_update: usize,
    /// Respawns since the pool was created
    pub total_respawns: u64,
}

/// Fixed pool of point particles
///
/// The random source is a type parameter so tests and replays can use a seeded
/// generator; [`ParticlePool::new`] uses an OS-seeded [`StdRng`].
///
/// # Example
///
/// ```
/// use snowscape_core::{Color, EmitterConfig, ParticlePool, Vec3};
///
/// let config = EmitterConfig::new(
///     1,
///     Color::WHITE,
///     Vec3::zeros(),
///     Vec3::new(0.0, -1.0, 0.0),
///     1.0,
///     1.0,
///     0.0,
/// );
/// let mut pool = ParticlePool::with_seed(config, 7).unwrap();
///
/// pool.update(0.5, Vec3::zeros(), Vec3::new(0.0, -1.0, 0.0));
/// let particle = pool.particle(0).unwrap();
/// assert_eq!(particle.position(), Vec3::new(0.0, -0.5, 0.0));
/// assert_eq!(particle.alpha(), 0.5);
/// ```
#[derive(Debug, Clone)]
pub struct ParticlePool<R = StdRng> {
    buffer: Vec<f32>,
    states: Vec<ParticleState>,
    config: EmitterConfig,
    rng: R,
    respawned_last_update: usize,
    total_respawns: u64,
}

impl ParticlePool<StdRng> {
    /// Create a pool seeded from the operating system
    ///
    /// # Errors
    ///
    /// [`ParticleError`] when `config` fails [`EmitterConfig::validate`].
    pub fn new(config: EmitterConfig) -> Result<Self, ParticleError> {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Create a reproducible pool
    ///
    /// # Errors
    ///
    /// [`ParticleError`] when `config` fails [`EmitterConfig::validate`].
    pub fn with_seed(config: EmitterConfig, seed: u64) -> Result<Self, ParticleError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> ParticlePool<R> {
    /// Create a pool drawing lifetimes and spawn jitter from `rng`
    ///
    /// Every particle starts at a jittered position around `config.origin`
    /// with `config.velocity`, a lifetime in `[min_life, max_life]` and alpha 1.
    ///
    /// # Errors
    ///
    /// [`ParticleError`] when `config` fails [`EmitterConfig::validate`].
    pub fn with_rng(config: EmitterConfig, mut rng: R) -> Result<Self, ParticleError> {
        config.validate()?;

        let mut buffer = vec![0.0; config.count * FLOATS_PER_PARTICLE];
        let mut states = Vec::with_capacity(config.count);
        for slot in buffer.chunks_exact_mut(FLOATS_PER_PARTICLE) {
            let life = draw_life(&mut rng, &config);
            let position = jittered_spawn(&mut rng, config.origin, config.amplitude);
            slot[..3].copy_from_slice(position.as_slice());
            slot[COLOR_OFFSET..ALPHA_OFFSET].copy_from_slice(&config.color.to_array());
            slot[ALPHA_OFFSET] = 1.0;
            states.push(ParticleState {
                life,
                initial_life: life,
                velocity: config.velocity,
            });
        }

        debug!(
            "Particle pool created: {} particles, life {:.2}..{:.2}s, amplitude {:.2}",
            config.count, config.min_life, config.max_life, config.amplitude
        );

        Ok(Self {
            buffer,
            states,
            config,
            rng,
            respawned_last_update: 0,
            total_respawns: 0,
        })
    }

    /// Advance every particle by `dt` seconds
    ///
    /// `origin` and `velocity` become the emitter's current values and apply to
    /// particles that respawn during this call. Negative `dt` is treated as 0.
    pub fn update(&mut self, dt: f32, origin: Vec3, velocity: Vec3) {
        let dt = if dt > 0.0 { dt } else { 0.0 };
        self.config.origin = origin;
        self.config.velocity = velocity;

        let mut respawned = 0;
        for (slot, state) in self
            .buffer
            .chunks_exact_mut(FLOATS_PER_PARTICLE)
            .zip(self.states.iter_mut())
        {
            let mut particle = ParticleMut { slot, state };
            particle.state.life -= dt;
            if particle.state.life <= 0.0 {
                let life = draw_life(&mut self.rng, &self.config);
                let position = jittered_spawn(&mut self.rng, origin, self.config.amplitude);
                particle.respawn(position, velocity, life);
                respawned += 1;
            } else {
                particle.integrate(dt);
            }
        }

        self.respawned_last_update = respawned;
        self.total_respawns += respawned as u64;
        trace!("Particle update: dt={:.4}s, respawned={}", dt, respawned);
    }

    /// [`update`](Self::update) with the emitter's current origin and velocity
    pub fn step(&mut self, dt: f32) {
        self.update(dt, self.config.origin, self.config.velocity);
    }
}

impl<R> ParticlePool<R> {
    /// Interleaved `x, y, z, r, g, b, a` floats, rewritten in place by every
    /// update; re-upload it each frame
    pub fn buffer(&self) -> &[f32] {
        &self.buffer
    }

    /// Byte view of [`buffer`](Self::buffer) for vertex-buffer upload
    #[cfg(feature = "gpu")]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.buffer)
    }

    /// Number of particles (fixed at creation)
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Current emitter parameters
    pub fn config(&self) -> &EmitterConfig {
        &self.config
    }

    pub fn particle(&self, index: usize) -> Option<Particle<'_>> {
        let state = self.states.get(index)?;
        let start = index * FLOATS_PER_PARTICLE;
        Some(Particle {
            index,
            slot: &self.buffer[start..start + FLOATS_PER_PARTICLE],
            state,
        })
    }

    pub fn particle_mut(&mut self, index: usize) -> Option<ParticleMut<'_>> {
        let state = self.states.get_mut(index)?;
        let start = index * FLOATS_PER_PARTICLE;
        Some(ParticleMut {
            slot: &mut self.buffer[start..start + FLOATS_PER_PARTICLE],
            state,
        })
    }

    /// Particles in index order
    pub fn iter(&self) -> impl Iterator<Item = Particle<'_>> + '_ {
        self.buffer
            .chunks_exact(FLOATS_PER_PARTICLE)
            .zip(&self.states)
            .enumerate()
            .map(|(index, (slot, state))| Particle { index, slot, state })
    }

    pub fn stats(&self) -> PoolStats {
        let mean_alpha = if self.states.is_empty() {
            0.0
        } else {
            self.iter().map(|p| p.alpha()).sum::<f32>() / self.states.len() as f32
        };
        PoolStats {
            count: self.states.len(),
            mean_alpha,
            respawned_last_update: self.respawned_last_update,
            total_respawns: self.total_respawns,
        }
    }
}

/// Read-only view of one particle
#[derive(Debug, Clone, Copy)]
pub struct Particle<'a> {
    index: usize,
    slot: &'a [f32],
    state: &'a ParticleState,
}

impl Particle<'_> {
    /// Stable position of this particle in the pool
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn position(&self) -> Vec3 {
        Vec3::new(self.slot[0], self.slot[1], self.slot[2])
    }

    pub fn color(&self) -> Color {
        Color::new(
            self.slot[COLOR_OFFSET],
            self.slot[COLOR_OFFSET + 1],
            self.slot[COLOR_OFFSET + 2],
        )
    }

    pub fn alpha(&self) -> f32 {
        self.slot[ALPHA_OFFSET]
    }

    /// Remaining life (s)
    pub fn life(&self) -> f32 {
        self.state.life
    }

    /// Life drawn at the last spawn (s)
    pub fn initial_life(&self) -> f32 {
        self.state.initial_life
    }

    pub fn velocity(&self) -> Vec3 {
        self.state.velocity
    }
}

/// Mutable view of one particle; writes go straight into the pool buffer
#[derive(Debug)]
pub struct ParticleMut<'a> {
    slot: &'a mut [f32],
    state: &'a mut ParticleState,
}

impl ParticleMut<'_> {
    pub fn position(&self) -> Vec3 {
        Vec3::new(self.slot[0], self.slot[1], self.slot[2])
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.slot[..3].copy_from_slice(position.as_slice());
    }

    pub fn velocity(&self) -> Vec3 {
        self.state.velocity
    }

    pub fn set_velocity(&mut self, velocity: Vec3) {
        self.state.velocity = velocity;
    }

    pub fn set_color(&mut self, color: Color) {
        self.slot[COLOR_OFFSET..ALPHA_OFFSET].copy_from_slice(&color.to_array());
    }

    pub fn alpha(&self) -> f32 {
        self.slot[ALPHA_OFFSET]
    }

    pub fn life(&self) -> f32 {
        self.state.life
    }

    fn integrate(&mut self, dt: f32) {
        let position = self.position() + self.state.velocity * dt;
        self.set_position(position);
        self.slot[ALPHA_OFFSET] = self.state.life / self.state.initial_life;
    }

    fn respawn(&mut self, position: Vec3, velocity: Vec3, life: f32) {
        self.set_position(position);
        self.state.velocity = velocity;
        self.state.life = life;
        self.state.initial_life = life;
        self.slot[ALPHA_OFFSET] = 1.0;
    }
}

/// Uniform lifetime in `[min_life, max_life]`
fn draw_life<R: Rng>(rng: &mut R, config: &EmitterConfig) -> f32 {
    config.min_life + rng.random::<f32>() * (config.max_life - config.min_life)
}

/// Spawn point in the box `±amplitude` on x/z and `[-amplitude / 2.5, 0]` on y
fn jittered_spawn<R: Rng>(rng: &mut R, origin: Vec3, amplitude: f32) -> Vec3 {
    let x = origin.x + rng.random::<f32>() * 2.0 * amplitude - amplitude;
    let y = origin.y - rng.random::<f32>() * amplitude / DOWNWARD_JITTER_DIVISOR;
    let z = origin.z + rng.random::<f32>() * 2.0 * amplitude - amplitude;
    Vec3::new(x, y, z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn single(velocity: Vec3) -> EmitterConfig {
        EmitterConfig::new(1, Color::WHITE, Vec3::zeros(), velocity, 1.0, 1.0, 0.0)
    }

    #[test]
    fn test_create_fills_buffer() {
        let config = EmitterConfig::new(
            10,
            Color::new(0.1, 0.2, 0.3),
            Vec3::new(0.0, 5.0, 0.0),
            Vec3::zeros(),
            1.0,
            2.0,
            1.0,
        );
        let pool = ParticlePool::with_seed(config, 1).unwrap();
        assert_eq!(pool.len(), 10);
        assert_eq!(pool.buffer().len(), 10 * FLOATS_PER_PARTICLE);
        for p in pool.iter() {
            assert_eq!(p.color(), Color::new(0.1, 0.2, 0.3));
            assert_eq!(p.alpha(), 1.0);
            assert_eq!(p.life(), p.initial_life());
            assert!((1.0..=2.0).contains(&p.life()));
        }
    }

    #[test]
    fn test_spawn_jitter_stays_below_origin() {
        let origin = Vec3::new(1.0, 10.0, -1.0);
        let mut config = EmitterConfig::snowfall(origin);
        config.count = 500;
        config.amplitude = 2.5;
        let pool = ParticlePool::with_seed(config, 99).unwrap();
        for p in pool.iter() {
            let pos = p.position();
            assert!(pos.y <= 10.0 && pos.y >= 10.0 - 1.0, "y = {}", pos.y);
            assert!((pos.x - 1.0).abs() <= 2.5);
            assert!((pos.z + 1.0).abs() <= 2.5);
        }
    }

    #[test]
    fn test_integrate_then_respawn() {
        let velocity = Vec3::new(0.0, -1.0, 0.0);
        let mut pool = ParticlePool::with_seed(single(velocity), 3).unwrap();
        let p = pool.particle(0).unwrap();
        assert_eq!(p.position(), Vec3::zeros());
        assert_eq!((p.life(), p.alpha()), (1.0, 1.0));

        pool.update(0.5, Vec3::zeros(), velocity);
        let p = pool.particle(0).unwrap();
        assert_eq!(p.position(), Vec3::new(0.0, -0.5, 0.0));
        assert_eq!((p.life(), p.alpha()), (0.5, 0.5));

        pool.update(0.6, Vec3::zeros(), velocity);
        let p = pool.particle(0).unwrap();
        assert_eq!(p.position(), Vec3::zeros());
        assert_eq!((p.life(), p.alpha()), (1.0, 1.0));
        assert_eq!(pool.stats().respawned_last_update, 1);
    }

    #[test]
    fn test_respawn_takes_new_origin_and_velocity() {
        let mut pool = ParticlePool::with_seed(single(Vec3::zeros()), 3).unwrap();
        let origin = Vec3::new(4.0, 2.0, 0.0);
        let velocity = Vec3::new(1.0, 0.0, 0.0);
        pool.update(1.5, origin, velocity);

        let p = pool.particle(0).unwrap();
        assert_eq!(p.position(), origin);
        assert_eq!(p.velocity(), velocity);
        assert_eq!(pool.config().origin, origin);

        pool.step(0.25);
        assert_relative_eq!(pool.particle(0).unwrap().position().x, 4.25);
    }

    #[test]
    fn test_negative_dt_is_ignored() {
        let mut pool = ParticlePool::with_seed(single(Vec3::y()), 3).unwrap();
        pool.step(-1.0);
        let p = pool.particle(0).unwrap();
        assert_eq!(p.life(), 1.0);
        assert_eq!(p.position(), Vec3::zeros());
    }

    #[test]
    fn test_zero_dt_keeps_state() {
        let mut pool = ParticlePool::with_seed(single(Vec3::new(0.0, -1.0, 0.0)), 3).unwrap();
        pool.step(0.25);
        let before = pool.buffer().to_vec();

        pool.step(0.0);
        pool.update(0.0, Vec3::new(9.0, 9.0, 9.0), Vec3::x());
        assert_eq!(pool.buffer(), before.as_slice());
        let p = pool.particle(0).unwrap();
        assert_eq!(p.life(), 0.75);
        assert_eq!(p.position(), Vec3::new(0.0, -0.25, 0.0));
        assert_eq!(p.alpha(), p.life() / p.initial_life());
        assert_eq!(pool.stats().respawned_last_update, 0);
        assert_eq!(pool.stats().total_respawns, 0);
    }

    #[test]
    fn test_set_velocity_steers_next_step() {
        let mut pool = ParticlePool::with_seed(single(Vec3::zeros()), 3).unwrap();
        {
            let mut p = pool.particle_mut(0).unwrap();
            p.set_velocity(p.velocity() + Vec3::new(1.0, 0.0, 0.0));
            assert_eq!(p.velocity(), Vec3::x());
        }
        pool.step(0.25);
        let p = pool.particle(0).unwrap();
        assert_relative_eq!(p.position().x, 0.25);
        // Emitter velocity is untouched until the next respawn
        assert_eq!(pool.config().velocity, Vec3::zeros());
    }

    #[test]
    fn test_mutable_view_writes_buffer() {
        let mut pool = ParticlePool::with_seed(single(Vec3::zeros()), 3).unwrap();
        {
            let mut p = pool.particle_mut(0).unwrap();
            p.set_position(Vec3::new(1.0, 2.0, 3.0));
            p.set_color(Color::new(0.5, 0.5, 0.5));
        }
        assert_eq!(pool.buffer(), &[1.0, 2.0, 3.0, 0.5, 0.5, 0.5, 1.0]);
        assert!(pool.particle_mut(1).is_none());
    }

    #[test]
    fn test_empty_pool() {
        let mut config = single(Vec3::zeros());
        config.count = 0;
        let mut pool = ParticlePool::with_seed(config, 0).unwrap();
        pool.step(1.0);
        assert!(pool.is_empty());
        assert!(pool.buffer().is_empty());
        assert_eq!(pool.stats().mean_alpha, 0.0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = single(Vec3::zeros());
        config.max_life = 0.5;
        assert!(ParticlePool::with_seed(config, 0).is_err());
    }

    #[cfg(feature = "gpu")]
    #[test]
    fn test_byte_view_matches_buffer() {
        let pool = ParticlePool::with_seed(EmitterConfig::sparks(Vec3::zeros()), 5).unwrap();
        assert_eq!(pool.as_bytes().len(), pool.buffer().len() * 4);
    }
}
