//! Targets, obstacles and static scenery.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::types::EntityId;
use crate::components::entity::{Entity, EntityKind};
use crate::core::physics::{BodyDesc, ColliderDesc, ColliderMaterial, PhysicsWorld};
use crate::error::{ensure_positive, EntityError};

/// Physical parameters of a target ("pig").
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetParams {
    pub mass: f32,
    pub radius: f32,
    pub elasticity: f32,
    pub friction: f32,
    pub collision_layer: u32,
}

impl Default for TargetParams {
    fn default() -> Self {
        Self {
            mass: 2.0,
            radius: 12.0,
            elasticity: 0.8,
            friction: 0.4,
            collision_layer: 0,
        }
    }
}

/// Physical parameters of a box-shaped obstacle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObstacleParams {
    pub mass: f32,
    pub width: f32,
    pub height: f32,
    pub elasticity: f32,
    pub friction: f32,
    pub collision_layer: u32,
}

impl Default for ObstacleParams {
    fn default() -> Self {
        Self::column()
    }
}

impl ObstacleParams {
    /// Upright post.
    pub fn column() -> Self {
        Self {
            mass: 2.0,
            width: 20.0,
            height: 80.0,
            elasticity: 0.8,
            friction: 1.0,
            collision_layer: 0,
        }
    }

    /// Horizontal plank laid across columns.
    pub fn beam() -> Self {
        Self {
            width: 100.0,
            height: 20.0,
            ..Self::column()
        }
    }
}

/// Build a round target at `position` and register it with the world.
pub fn create_target(
    physics: &mut PhysicsWorld,
    id: EntityId,
    position: Vec2,
    params: TargetParams,
) -> Result<Entity, EntityError> {
    ensure_positive("mass", params.mass)?;
    ensure_positive("radius", params.radius)?;

    let desc = BodyDesc::dynamic(ColliderDesc::Ball { radius: params.radius })
        .with_position(position);
    let material = ColliderMaterial {
        restitution: params.elasticity,
        friction: params.friction,
        mass: params.mass,
        collision_layer: params.collision_layer,
    };
    let body = physics.create_body(id, &desc, material);

    Ok(Entity::new(id, EntityKind::Target)
        .with_pos(position)
        .with_size(Vec2::splat(params.radius * 2.0))
        .with_body(body))
}

/// Build a box obstacle centred on `position` and register it with the world.
pub fn create_obstacle(
    physics: &mut PhysicsWorld,
    id: EntityId,
    position: Vec2,
    params: ObstacleParams,
) -> Result<Entity, EntityError> {
    ensure_positive("mass", params.mass)?;
    ensure_positive("width", params.width)?;
    ensure_positive("height", params.height)?;

    let desc = BodyDesc::dynamic(ColliderDesc::Cuboid {
        half_width: params.width / 2.0,
        half_height: params.height / 2.0,
    })
    .with_position(position);
    let material = ColliderMaterial {
        restitution: params.elasticity,
        friction: params.friction,
        mass: params.mass,
        collision_layer: params.collision_layer,
    };
    let body = physics.create_body(id, &desc, material);

    Ok(Entity::new(id, EntityKind::Obstacle)
        .with_pos(position)
        .with_size(Vec2::new(params.width, params.height))
        .with_body(body))
}

/// Scenery that is drawn but never simulated.
pub fn create_static_obstacle(id: EntityId, position: Vec2, size: Vec2) -> Entity {
    Entity::new(id, EntityKind::StaticObstacle)
        .with_pos(position)
        .with_size(size)
}
