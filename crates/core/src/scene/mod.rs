//! Scene assembly
//!
//! Turns a [`SceneConfig`] into world-space meshes, a snow particle pool and
//! the snowman's choreography. All state lives in the returned
//! [`SceneAssets`]; a render loop only reads buffers and calls
//! [`SceneAssets::update`] once per frame.

pub mod config;

pub use config::{GroundConfig, PointLight, SceneConfig, SnowmanAct, SnowmanConfig, TreeConfig};

use crate::animation::{AnimationError, Timeline};
use crate::core_types::{Color, Vec3};
use crate::geometry::{
    capsule, circle, cylinder, hemisphere, pipe, ring, sphere, textured_cuboid, textured_plane,
    GeometryError, MeshBuffer, PipeMesh, ShapeMesh,
};
use crate::particles::{ParticleError, ParticlePool};
use tracing::{debug, info};

/// Fraction of a body sphere's diameter the next sphere sits above its base
const BODY_STACKING: f32 = 0.85;

/// Radius of the marker spheres drawn at light positions
const LIGHT_MARKER_RADIUS: f32 = 0.15;

/// Snowdrift radius relative to the trunk radius
const DRIFT_SCALE: f32 = 2.5;

/// Meshes of one tree, in world space
#[derive(Debug, Clone)]
pub struct TreeAssets {
    pub trunk: ShapeMesh,
    pub crown: ShapeMesh,
    pub drift: ShapeMesh,
}

impl TreeAssets {
    pub fn vertex_count(&self) -> usize {
        self.trunk.vertex_count() + self.crown.vertex_count() + self.drift.vertex_count()
    }
}

/// Meshes of the snowman, in world space
#[derive(Debug, Clone)]
pub struct SnowmanAssets {
    /// Body spheres from the ground up, head last
    pub body: Vec<ShapeMesh>,
    /// Scarf around the neck, absent for a single-sphere snowman
    pub scarf: Option<PipeMesh>,
    pub arms: [ShapeMesh; 2],
    pub hat: ShapeMesh,
    pub brim: MeshBuffer,
    pub nose: MeshBuffer,
    /// Center of the head, the pivot for choreography transforms
    pub head_center: Vec3,
}

impl SnowmanAssets {
    pub fn vertex_count(&self) -> usize {
        self.body.iter().map(ShapeMesh::vertex_count).sum::<usize>()
            + self.scarf.as_ref().map_or(0, PipeMesh::vertex_count)
            + self.arms.iter().map(ShapeMesh::vertex_count).sum::<usize>()
            + self.hat.vertex_count()
            + self.brim.len()
            + self.nose.len()
    }
}

/// Everything needed to draw and animate a scene
#[derive(Debug, Clone)]
pub struct SceneAssets {
    pub background: Color,
    pub lights: Vec<PointLight>,
    pub ground: MeshBuffer,
    /// Snow carpet under the snowman
    pub carpet: MeshBuffer,
    pub trees: Vec<TreeAssets>,
    pub snowman: SnowmanAssets,
    pub light_markers: Vec<ShapeMesh>,
    pub snow: ParticlePool,
    pub choreography: Timeline<SnowmanAct>,
}

impl SceneAssets {
    /// Step the snow and the choreography by `dt` seconds
    ///
    /// Returns the snowman's act during this frame, or `None` when the
    /// choreography is empty.
    pub fn update(&mut self, dt: f32) -> Option<SnowmanAct> {
        self.snow.step(dt);
        self.choreography.advance(dt).map(|frame| *frame.state)
    }

    /// Points across every static mesh (particles excluded)
    pub fn static_vertex_count(&self) -> usize {
        self.ground.len()
            + self.carpet.len()
            + self.trees.iter().map(TreeAssets::vertex_count).sum::<usize>()
            + self.snowman.vertex_count()
            + self
                .light_markers
                .iter()
                .map(ShapeMesh::vertex_count)
                .sum::<usize>()
    }
}

/// Build a scene whose snow is seeded from the operating system
///
/// # Errors
///
/// [`SceneError`] when any shape, the emitter or the choreography is invalid.
pub fn build_scene(config: &SceneConfig) -> Result<SceneAssets, SceneError> {
    let snow = ParticlePool::new(config.snow.clone())?;
    assemble(config, snow)
}

/// Build a reproducible scene
///
/// # Errors
///
/// Same as [`build_scene`].
pub fn build_scene_seeded(config: &SceneConfig, seed: u64) -> Result<SceneAssets, SceneError> {
    let snow = ParticlePool::with_seed(config.snow.clone(), seed)?;
    assemble(config, snow)
}

fn assemble(config: &SceneConfig, snow: ParticlePool) -> Result<SceneAssets, SceneError> {
    let segments = config.segments;

    let ground = textured_plane(
        config.ground.depth,
        config.ground.width,
        config.ground.cell_size,
    )?;

    let trees = config
        .trees
        .iter()
        .map(|tree| build_tree(tree, segments))
        .collect::<Result<Vec<_>, _>>()?;

    let carpet = textured_cuboid(config.snowman.carpet, Vec3::new(1.0, 1.0, 1.0))?
        .translated(config.snowman.position);
    let snowman = build_snowman(&config.snowman, segments)?;

    let light_markers = config
        .lights
        .iter()
        .map(|light| {
            let base = light.position - Vec3::new(0.0, LIGHT_MARKER_RADIUS, 0.0);
            sphere(LIGHT_MARKER_RADIUS, segments).map(|marker| marker.translated(base))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut choreography = Timeline::new();
    for &(act, seconds) in &config.choreography {
        choreography.push(act, seconds)?;
    }
    choreography.set_looping(true);

    let assets = SceneAssets {
        background: config.background,
        lights: config.lights.clone(),
        ground,
        carpet,
        trees,
        snowman,
        light_markers,
        snow,
        choreography,
    };

    info!(
        "Scene built: {} trees, {} lights, {} static vertices, {} particles",
        assets.trees.len(),
        assets.lights.len(),
        assets.static_vertex_count(),
        assets.snow.len()
    );
    Ok(assets)
}

fn build_tree(tree: &TreeConfig, segments: u32) -> Result<TreeAssets, GeometryError> {
    let trunk = cylinder(tree.trunk_height, tree.trunk_radius, tree.trunk_radius, segments)?;
    let crown = cylinder(tree.crown_height, tree.crown_radius, 0.0, segments)?;
    let drift = hemisphere(tree.trunk_radius * DRIFT_SCALE, segments)?;

    let crown_base = tree.position + Vec3::new(0.0, tree.trunk_height, 0.0);
    Ok(TreeAssets {
        trunk: trunk.translated(tree.position),
        crown: crown.translated(crown_base),
        drift: drift.translated(tree.position),
    })
}

fn build_snowman(snowman: &SnowmanConfig, segments: u32) -> Result<SnowmanAssets, SceneError> {
    let (&head_radius, torso) = snowman
        .body_radii
        .split_last()
        .ok_or(SceneError::EmptySnowman)?;

    let origin = snowman.position;
    let mut base_y = snowman.carpet.y;
    let mut bases = Vec::with_capacity(snowman.body_radii.len());
    let mut body = Vec::with_capacity(snowman.body_radii.len());
    for &radius in &snowman.body_radii {
        let mesh = sphere(radius, segments)?;
        body.push(mesh.translated(origin + Vec3::new(0.0, base_y, 0.0)));
        bases.push(base_y);
        base_y += 2.0 * radius * BODY_STACKING;
    }

    let head_base = bases[torso.len()];
    let head_center = origin + Vec3::new(0.0, head_base + head_radius, 0.0);

    let scarf = if torso.is_empty() {
        None
    } else {
        let scarf = pipe(head_radius * 0.4, head_radius * 0.8, head_radius, segments)?;
        Some(scarf.translated(origin + Vec3::new(0.0, head_base, 0.0)))
    };

    // Arms hang from the sides of the sphere below the head
    let torso_index = torso.len().saturating_sub(1);
    let torso_radius = snowman.body_radii[torso_index];
    let torso_center = bases[torso_index] + torso_radius;
    let arm = capsule(
        snowman.arm_length,
        snowman.arm_radius,
        snowman.arm_radius,
        segments,
    )?;
    let arm_y = torso_center - snowman.arm_length / 2.0;
    let arm_x = torso_radius + snowman.arm_radius;
    let arms = [
        arm.translated(origin + Vec3::new(-arm_x, arm_y, 0.0)),
        arm.translated(origin + Vec3::new(arm_x, arm_y, 0.0)),
    ];

    let hat_base = origin + Vec3::new(0.0, head_base + 1.8 * head_radius, 0.0);
    let hat = cylinder(
        snowman.hat_height,
        snowman.hat_radius,
        snowman.hat_radius,
        segments,
    )?
    .translated(hat_base);
    let brim = ring(snowman.hat_radius, snowman.brim_radius, segments)?.translated(hat_base);

    let nose = circle(snowman.nose_radius, segments)?
        .translated(head_center + Vec3::new(0.0, 0.0, head_radius));

    debug!(
        "Snowman: {} body spheres, head at ({:.2}, {:.2}, {:.2})",
        body.len(),
        head_center.x,
        head_center.y,
        head_center.z
    );

    Ok(SnowmanAssets {
        body,
        scarf,
        arms,
        hat,
        brim,
        nose,
        head_center,
    })
}

/// Errors that can occur while building a scene
#[derive(Debug, Clone, PartialEq)]
pub enum SceneError {
    Geometry(GeometryError),
    Particles(ParticleError),
    Animation(AnimationError),
    /// Snowman configured without any body sphere
    EmptySnowman,
}

impl std::fmt::Display for SceneError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneError::Geometry(e) => write!(f, "invalid scene geometry: {e}"),
            SceneError::Particles(e) => write!(f, "invalid snow emitter: {e}"),
            SceneError::Animation(e) => write!(f, "invalid choreography: {e}"),
            SceneError::EmptySnowman => write!(f, "snowman needs at least one body sphere"),
        }
    }
}

impl std::error::Error for SceneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SceneError::Geometry(e) => Some(e),
            SceneError::Particles(e) => Some(e),
            SceneError::Animation(e) => Some(e),
            SceneError::EmptySnowman => None,
        }
    }
}

impl From<GeometryError> for SceneError {
    fn from(e: GeometryError) -> Self {
        SceneError::Geometry(e)
    }
}

impl From<ParticleError> for SceneError {
    fn from(e: ParticleError) -> Self {
        SceneError::Particles(e)
    }
}

impl From<AnimationError> for SceneError {
    fn from(e: AnimationError) -> Self {
        SceneError::Animation(e)
    }
}
