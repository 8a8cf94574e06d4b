use clap::Parser;
use snowscape_core::particles::FLOATS_PER_PARTICLE;
use snowscape_core::scene::TreeAssets;
use snowscape_core::{
    build_scene, build_scene_seeded, Color, EmitterConfig, ParticlePool, SceneAssets,
    SceneConfig, ShapeMesh, Vec3,
};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// Headless snowscape run: builds the winter scene and steps it frame by frame
#[derive(Parser, Debug)]
#[command(name = "snowscape-demo")]
#[command(about = "Procedural winter scene demo without a window", long_about = None)]
struct Args {
    /// Number of frames to simulate
    #[arg(short, long, default_value_t = 600)]
    frames: u32,

    /// Frame time in seconds
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Seed for the particle generators (random when omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Angular segments for round shapes
    #[arg(long, default_value_t = 16)]
    segments: u32,

    /// Snow particle count
    #[arg(short, long, default_value_t = 2000)]
    particles: usize,

    /// Print a report row every N frames
    #[arg(short, long, default_value_t = 60)]
    report_every: u32,

    /// Add a spark emitter orbiting the first light
    #[arg(long)]
    sparks: bool,

    /// Enable debug logging (`RUST_LOG` overrides)
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    println!("=== Snowscape Demo ===\n");

    let mut config = SceneConfig::winter_night();
    config.segments = args.segments;
    config.snow.count = args.particles;

    let built = match args.seed {
        Some(seed) => build_scene_seeded(&config, seed),
        None => build_scene(&config),
    };
    let mut scene = match built {
        Ok(scene) => scene,
        Err(e) => {
            eprintln!("Failed to build scene: {e}");
            std::process::exit(1);
        }
    };

    print_mesh_summary(&scene);

    let mut sparks = if args.sparks {
        spark_pool(&config, args.seed)
    } else {
        None
    };

    let report_every = args.report_every.max(1);
    println!("Running {} frames at dt={:.4}s...\n", args.frames, args.dt);
    println!("  Frame | Time(s) | Act   | Mean alpha | Respawned | Total respawns");
    println!("--------|---------|-------|------------|-----------|---------------");

    let mut time = 0.0_f32;
    for frame in 1..=args.frames {
        time += args.dt;
        let act = scene.update(args.dt);

        if let Some(pool) = sparks.as_mut() {
            // Orbit the first light so respawns follow a moving origin
            let center = scene.lights.first().map_or(Vec3::zeros(), |l| l.position);
            let origin = center + Vec3::new(time.cos(), 0.0, time.sin());
            let velocity = pool.config().velocity;
            pool.update(args.dt, origin, velocity);
            cool_sparks(pool, args.dt);
        }

        if frame % report_every == 0 {
            let stats = scene.snow.stats();
            let act = act.map_or_else(|| "-".to_string(), |a| format!("{a:?}"));
            println!(
                "{:7} | {:7.2} | {:5} | {:10.3} | {:9} | {:14}",
                frame,
                time,
                act,
                stats.mean_alpha,
                stats.respawned_last_update,
                stats.total_respawns
            );
        }
    }

    let stats = scene.snow.stats();
    println!("\n=== Run Complete ===");
    println!("Simulated time: {:.2}s", time);
    println!("Choreography clock: {:.2}s", scene.choreography.clock());
    println!(
        "Snow buffer: {} particles, {} floats",
        stats.count,
        scene.snow.buffer().len()
    );
    println!("Snow respawns: {}", stats.total_respawns);
    if let Some(pool) = &sparks {
        let spark_stats = pool.stats();
        println!(
            "Spark respawns: {} (mean alpha {:.3})",
            spark_stats.total_respawns, spark_stats.mean_alpha
        );
    }
    info!("Demo finished after {} frames", args.frames);
}

fn print_mesh_summary(scene: &SceneAssets) {
    let trees: usize = scene.trees.iter().map(TreeAssets::vertex_count).sum();
    let markers: usize = scene.light_markers.iter().map(ShapeMesh::vertex_count).sum();

    println!("Mesh          | Vertices");
    println!("--------------|---------");
    println!("Ground        | {:8}", scene.ground.len());
    println!("Carpet        | {:8}", scene.carpet.len());
    println!("Trees ({:2})    | {:8}", scene.trees.len(), trees);
    println!("Snowman       | {:8}", scene.snowman.vertex_count());
    println!("Light markers | {:8}", markers);
    println!("Total static  | {:8}", scene.static_vertex_count());
    println!(
        "Particles     | {:8} ({} floats each)\n",
        scene.snow.len(),
        FLOATS_PER_PARTICLE
    );
    debug!(
        "Background ({:.2}, {:.2}, {:.2}), {} lights",
        scene.background.r,
        scene.background.g,
        scene.background.b,
        scene.lights.len()
    );
}

/// Wind pushes live sparks along +x and fading sparks shift from yellow to red
fn cool_sparks(pool: &mut ParticlePool, dt: f32) {
    let wind = Vec3::new(0.4, 0.0, 0.0) * dt;
    for i in 0..pool.len() {
        if let Some(mut spark) = pool.particle_mut(i) {
            spark.set_velocity(spark.velocity() + wind);
            let heat = spark.alpha();
            spark.set_color(Color::new(1.0, 0.3 + 0.45 * heat, 0.1 + 0.2 * heat));
        }
    }
}

fn spark_pool(config: &SceneConfig, seed: Option<u64>) -> Option<ParticlePool> {
    let origin = config.lights.first().map_or(Vec3::zeros(), |l| l.position);
    let emitter = EmitterConfig::sparks(origin);
    let pool = match seed {
        Some(seed) => ParticlePool::with_seed(emitter, seed.wrapping_add(1)),
        None => ParticlePool::new(emitter),
    };
    match pool {
        Ok(pool) => Some(pool),
        Err(e) => {
            warn!("Spark emitter disabled: {e}");
            None
        }
    }
}
