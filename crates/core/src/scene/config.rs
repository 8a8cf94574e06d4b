//! Scene description values and presets

use crate::core_types::{Color, Vec3};
use crate::particles::EmitterConfig;
use serde::{Deserialize, Serialize};

/// Tessellated ground
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundConfig {
    /// Extent along x
    pub width: f32,
    /// Extent along z
    pub depth: f32,
    pub cell_size: f32,
}

/// Pine tree: trunk cylinder, cone crown, snowdrift at the base
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeConfig {
    pub position: Vec3,
    pub trunk_height: f32,
    pub trunk_radius: f32,
    pub crown_height: f32,
    pub crown_radius: f32,
}

impl TreeConfig {
    /// Tree of the default pine proportions at `position`
    pub fn pine(position: Vec3) -> Self {
        Self {
            position,
            trunk_height: 1.2,
            trunk_radius: 0.2,
            crown_height: 3.0,
            crown_radius: 1.2,
        }
    }
}

/// Snowman standing on a snow carpet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnowmanConfig {
    pub position: Vec3,
    /// Body sphere radii from the ground up; the last one is the head
    pub body_radii: Vec<f32>,
    pub hat_height: f32,
    pub hat_radius: f32,
    pub brim_radius: f32,
    pub nose_radius: f32,
    pub arm_length: f32,
    pub arm_radius: f32,
    /// Box the snowman stands on (width, height, depth)
    pub carpet: Vec3,
}

impl Default for SnowmanConfig {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            body_radii: vec![0.6, 0.45, 0.3],
            hat_height: 0.35,
            hat_radius: 0.22,
            brim_radius: 0.35,
            nose_radius: 0.05,
            arm_length: 0.9,
            arm_radius: 0.05,
            carpet: Vec3::new(1.5, 0.1, 1.5),
        }
    }
}

/// What the snowman is doing during a choreography step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SnowmanAct {
    Idle,
    Wave,
    Hop,
    Spin,
}

/// Point light: position and color only, attenuation is a shader concern
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointLight {
    pub position: Vec3,
    pub color: Color,
}

/// Everything a scene needs, owned by the scene rather than shared globally
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    /// Angular segments for every round shape
    pub segments: u32,
    pub background: Color,
    pub ground: GroundConfig,
    pub trees: Vec<TreeConfig>,
    pub snowman: SnowmanConfig,
    pub lights: Vec<PointLight>,
    pub snow: EmitterConfig,
    /// `(act, seconds)` pairs played in order, looping
    pub choreography: Vec<(SnowmanAct, f32)>,
}

impl SceneConfig {
    /// Moonlit clearing with four pines, a snowman and steady snowfall
    pub fn winter_night() -> Self {
        Self {
            segments: 16,
            background: Color::new(0.05, 0.07, 0.15),
            ground: GroundConfig {
                width: 20.0,
                depth: 20.0,
                cell_size: 1.0,
            },
            trees: vec![
                TreeConfig::pine(Vec3::new(-5.0, 0.0, -4.0)),
                TreeConfig::pine(Vec3::new(4.0, 0.0, -6.0)),
                TreeConfig::pine(Vec3::new(-7.0, 0.0, 3.0)),
                TreeConfig::pine(Vec3::new(6.0, 0.0, 2.0)),
            ],
            snowman: SnowmanConfig::default(),
            lights: vec![
                PointLight {
                    position: Vec3::new(5.0, 8.0, 0.0),
                    color: Color::new(1.0, 0.95, 0.75),
                },
                PointLight {
                    position: Vec3::new(-5.0, 8.0, 0.0),
                    color: Color::new(0.6, 0.7, 1.0),
                },
            ],
            snow: EmitterConfig::snowfall(Vec3::new(0.0, 10.0, 0.0)),
            choreography: vec![
                (SnowmanAct::Idle, 2.0),
                (SnowmanAct::Wave, 1.5),
                (SnowmanAct::Hop, 1.0),
                (SnowmanAct::Spin, 2.0),
            ],
        }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self::winter_night()
    }
}
