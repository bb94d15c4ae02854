use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::components::projectile::{ProjectileParams, Species};
use crate::components::structure::{ObstacleParams, TargetParams};
use crate::core::impulse::MAX_DRAG_DISTANCE;
use crate::systems::destruction::DestructionThresholds;

/// Tuning for a game session.
///
/// Every field has a default; a JSON document only needs the keys it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60). One step per frame.
    pub fixed_dt: f32,
    /// World width in game units.
    pub world_width: f32,
    /// World height in game units.
    pub world_height: f32,
    /// Gravity vector. Y points down, so positive Y pulls toward the ground.
    pub gravity: Vec2,
    /// Height of the ground segment above the bottom edge of the world.
    pub ground_inset: f32,
    /// Friction coefficient of the ground segment.
    pub ground_friction: f32,
    /// Longest accepted slingshot drag.
    pub max_drag_distance: f32,
    /// Impact impulse bands.
    pub destruction: DestructionThresholds,
    pub standard: ProjectileParams,
    pub boost: ProjectileParams,
    pub split: ProjectileParams,
    /// Boost impulse as a multiple of current speed.
    pub boost_factor: f32,
    /// Heading offsets (degrees) of the three split children.
    pub split_offsets_deg: [f32; 3],
    pub target: TargetParams,
    pub column: ObstacleParams,
    pub beam: ObstacleParams,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            world_width: 1800.0,
            world_height: 800.0,
            gravity: Vec2::new(0.0, 900.0),
            ground_inset: 15.0,
            ground_friction: 10.0,
            max_drag_distance: MAX_DRAG_DISTANCE,
            destruction: DestructionThresholds::default(),
            standard: ProjectileParams::default(),
            boost: ProjectileParams::default(),
            split: ProjectileParams::default(),
            boost_factor: 2.0,
            split_offsets_deg: [20.0, -10.0, -40.0],
            target: TargetParams::default(),
            column: ObstacleParams::column(),
            beam: ObstacleParams::beam(),
        }
    }
}

impl GameConfig {
    /// Parse a config from a JSON string. Missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Y coordinate of the ground segment.
    pub fn ground_y(&self) -> f32 {
        self.world_height - self.ground_inset
    }

    /// Default launch parameters for a species.
    pub fn params_for(&self, species: Species) -> ProjectileParams {
        match species {
            Species::Standard => self.standard,
            Species::Boost => self.boost,
            Species::Split => self.split,
        }
    }

    /// Split offsets in radians.
    pub fn split_offsets(&self) -> [f32; 3] {
        self.split_offsets_deg.map(f32::to_radians)
    }
}
