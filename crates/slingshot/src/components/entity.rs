use glam::Vec2;
use crate::api::types::EntityId;
use crate::components::projectile::ProjectileState;
use crate::core::physics::{PhysicsBody, PhysicsWorld};

/// What an entity is, and the per-kind state it carries.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityKind {
    /// A launched bird. Never destroyed by impacts.
    Projectile(ProjectileState),
    /// A destructible goal ("pig").
    Target,
    /// A destructible structural piece (column, beam).
    Obstacle,
    /// Scenery with no physics body. Never synced, never destroyed.
    StaticObstacle,
}

/// Anything the game tracks: a bird, a pig, a block or a piece of scenery.
/// The kind carries what differs between them.
#[derive(Debug, Clone)]
pub struct Entity {
    /// Unique identifier.
    pub id: EntityId,
    /// Entity kind and kind-specific state.
    pub kind: EntityKind,
    /// Position in world space (visual transform).
    pub pos: Vec2,
    /// Rotation in radians (visual transform).
    pub rotation: f32,
    /// World-space extent: diameter for round entities, box size otherwise.
    pub size: Vec2,
    /// Physics body. `None` only for static scenery.
    pub body: Option<PhysicsBody>,
}

impl Entity {
    /// Create a new entity with the given ID at the origin.
    pub fn new(id: EntityId, kind: EntityKind) -> Self {
        Self {
            id,
            kind,
            pos: Vec2::ZERO,
            rotation: 0.0,
            size: Vec2::ONE,
            body: None,
        }
    }

    // -- Builder pattern --

    pub fn with_pos(mut self, pos: Vec2) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_size(mut self, size: Vec2) -> Self {
        self.size = size;
        self
    }

    pub fn with_body(mut self, body: PhysicsBody) -> Self {
        self.body = Some(body);
        self
    }

    // -- Kind queries --

    pub fn is_projectile(&self) -> bool {
        matches!(self.kind, EntityKind::Projectile(_))
    }

    pub fn is_target(&self) -> bool {
        matches!(self.kind, EntityKind::Target)
    }

    pub fn is_obstacle(&self) -> bool {
        matches!(self.kind, EntityKind::Obstacle)
    }

    pub fn is_static(&self) -> bool {
        matches!(self.kind, EntityKind::StaticObstacle)
    }

    /// Targets and obstacles break on hard impacts; nothing else does.
    pub fn is_destructible(&self) -> bool {
        matches!(self.kind, EntityKind::Target | EntityKind::Obstacle)
    }

    pub fn projectile(&self) -> Option<&ProjectileState> {
        match &self.kind {
            EntityKind::Projectile(state) => Some(state),
            _ => None,
        }
    }

    pub fn projectile_mut(&mut self) -> Option<&mut ProjectileState> {
        match &mut self.kind {
            EntityKind::Projectile(state) => Some(state),
            _ => None,
        }
    }

    /// Copy position and rotation from the physics body into the visual
    /// transform. Read-only on the physics side; run it after the step.
    pub fn update(&mut self, physics: &PhysicsWorld) {
        if let Some(body) = &self.body {
            if physics.contains(body) {
                let (pos, rot) = physics.body_position(body);
                self.pos = pos;
                self.rotation = rot;
            }
        }
    }
}
