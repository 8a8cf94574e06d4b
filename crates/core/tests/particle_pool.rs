//! Particle pool behavior over many frames
use approx::assert_relative_eq;
use snowscape_core::particles::FLOATS_PER_PARTICLE;
use snowscape_core::{Color, EmitterConfig, ParticlePool, Vec3};

/// Route library logs to the test harness; `RUST_LOG=trace` shows per-update output
fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn snow(count: usize) -> EmitterConfig {
    EmitterConfig::new(
        count,
        Color::WHITE,
        Vec3::new(0.0, 10.0, 0.0),
        Vec3::new(0.0, -1.0, 0.0),
        1.0,
        3.0,
        4.0,
    )
}

#[test]
fn test_same_seed_same_buffer() {
    init_logging();
    let mut a = ParticlePool::with_seed(snow(200), 42).unwrap();
    let mut b = ParticlePool::with_seed(snow(200), 42).unwrap();
    for _ in 0..120 {
        a.step(1.0 / 30.0);
        b.step(1.0 / 30.0);
    }
    assert_eq!(a.buffer(), b.buffer());
    assert_eq!(a.stats(), b.stats());
}

#[test]
fn test_life_and_alpha_stay_in_range() {
    init_logging();
    let config = snow(300);
    let mut pool = ParticlePool::with_seed(config.clone(), 9).unwrap();
    for frame in 0..400 {
        // Uneven frame times, including a stalled frame
        let dt = if frame % 50 == 0 { 0.5 } else { 0.016 };
        pool.step(dt);
        for particle in pool.iter() {
            assert!(particle.life() > 0.0);
            assert!(particle.life() <= particle.initial_life());
            assert!(particle.initial_life() >= config.min_life);
            assert!(particle.initial_life() <= config.max_life);
            assert!((0.0..=1.0).contains(&particle.alpha()));
        }
    }
    assert_eq!(pool.len(), 300);
    assert_eq!(pool.buffer().len(), 300 * FLOATS_PER_PARTICLE);
    assert!(pool.stats().total_respawns > 0);
}

#[test]
fn test_respawns_follow_moving_emitter() {
    let mut pool = ParticlePool::with_seed(snow(100), 5).unwrap();
    let origin = Vec3::new(50.0, 20.0, -50.0);
    let velocity = Vec3::new(1.0, 0.0, 0.0);

    // Longer than max_life: every particle has respawned at least once
    pool.update(3.5, origin, velocity);
    for particle in pool.iter() {
        let p = particle.position();
        assert!((p.x - origin.x).abs() <= 4.0);
        assert!((p.z - origin.z).abs() <= 4.0);
        assert!(p.y <= origin.y && p.y >= origin.y - 4.0 / 2.5);
        assert_eq!(particle.velocity(), velocity);
        assert_relative_eq!(particle.alpha(), 1.0);
    }
    assert_eq!(pool.stats().respawned_last_update, 100);
    assert_eq!(pool.config().origin, origin);
}

#[test]
fn test_fixed_life_scenario() {
    // One particle, fixed one-second life, falling at 1 unit/s from the origin
    let config = EmitterConfig::new(
        1,
        Color::new(0.2, 0.4, 0.6),
        Vec3::zeros(),
        Vec3::new(0.0, -1.0, 0.0),
        1.0,
        1.0,
        0.0,
    );
    let mut pool = ParticlePool::with_seed(config, 1).unwrap();
    let down = Vec3::new(0.0, -1.0, 0.0);

    pool.update(0.25, Vec3::zeros(), down);
    pool.update(0.25, Vec3::zeros(), down);
    let buffer = pool.buffer();
    assert_relative_eq!(buffer[1], -0.5);
    assert_relative_eq!(buffer[3], 0.2);
    assert_relative_eq!(buffer[6], 0.5);

    // Expires on the next full second and comes back at the emitter
    pool.update(0.5, Vec3::new(1.0, 2.0, 3.0), down);
    let particle = pool.particle(0).unwrap();
    assert_eq!(particle.position(), Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(particle.alpha(), 1.0);
    assert_eq!(particle.color(), Color::new(0.2, 0.4, 0.6));
}
