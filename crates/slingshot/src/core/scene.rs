use crate::api::types::EntityId;
use crate::components::entity::Entity;

/// Entity tracking list using a flat Vec, kept in spawn order.
/// The whole list is what the renderer draws; projectile, target and
/// obstacle lists are filtered views over it.
pub struct Scene {
    entities: Vec<Entity>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            entities: Vec::with_capacity(256),
        }
    }

    /// Add an entity to the scene.
    pub fn spawn(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    /// Remove an entity by ID. Returns the removed entity if found.
    /// Remaining entities keep their relative order.
    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        let idx = self.entities.iter().position(|e| e.id == id)?;
        Some(self.entities.remove(idx))
    }

    /// Whether an entity with this ID is tracked.
    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.iter().any(|e| e.id == id)
    }

    /// Get a reference to an entity by ID.
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// Get a mutable reference to an entity by ID.
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    /// Iterate over all entities.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Iterate over all entities mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    /// Live projectiles.
    pub fn projectiles(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| e.is_projectile())
    }

    /// Live targets.
    pub fn targets(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| e.is_target())
    }

    /// Live destructible obstacles.
    pub fn obstacles(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| e.is_obstacle())
    }

    /// Static scenery.
    pub fn statics(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(|e| e.is_static())
    }

    /// IDs of all live projectiles, in spawn order.
    pub fn projectile_ids(&self) -> Vec<EntityId> {
        self.projectiles().map(|e| e.id).collect()
    }

    /// Number of entities in the scene.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
