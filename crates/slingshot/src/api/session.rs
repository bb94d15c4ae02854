use glam::Vec2;

use crate::api::config::GameConfig;
use crate::api::types::EntityId;
use crate::components::projectile::{
    create_projectile, create_projectile_moving, ProjectileParams, Species,
};
use crate::components::structure::{
    create_obstacle, create_static_obstacle, create_target, ObstacleParams, TargetParams,
};
use crate::core::impulse::{clamp_drag_to, compute_impulse_with_limit, ImpulseVector};
use crate::core::physics::{ContactImpulse, PhysicsWorld};
use crate::core::scene::Scene;
use crate::error::EntityError;
use crate::input::slingshot::SlingCommand;
use crate::renderer::instance::RenderBuffer;
use crate::systems::ability::{self, AbilityOutcome, Activation, SplitPlan};
use crate::systems::destruction::{resolve_contacts, DestructionReport};
use crate::systems::render;

/// One game session: the world, everything in it, and the tuning.
///
/// Created at session start and dropped at session end. Every entity is
/// registered through here so the scene and the physics world stay in step.
pub struct Session {
    pub config: GameConfig,
    pub scene: Scene,
    pub physics: PhysicsWorld,
    contacts: Vec<ContactImpulse>,
    next_id: u32,
}

impl Session {
    /// Build the world from `config` and install the ground segment across
    /// the full width.
    pub fn new(config: GameConfig) -> Self {
        let mut physics = PhysicsWorld::new(config.gravity);
        let ground_y = config.ground_y();
        physics.set_ground(
            Vec2::new(0.0, ground_y),
            Vec2::new(config.world_width, ground_y),
            config.ground_friction,
        );
        Self {
            config,
            scene: Scene::new(),
            physics,
            contacts: Vec::new(),
            next_id: 1,
        }
    }

    /// Generate the next unique entity ID. IDs start at 1; 0 marks the ground.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    // -- Spawning --

    /// Launch a projectile from a drag gesture. The drag is clamped to
    /// `max_drag_distance` and the projectile appears at the clamped end.
    pub fn launch(
        &mut self,
        start: Vec2,
        end: Vec2,
        species: Species,
    ) -> Result<EntityId, EntityError> {
        let max = self.config.max_drag_distance;
        let end = clamp_drag_to(start, end, max);
        let impulse = compute_impulse_with_limit(start, end, max);
        let params = self.config.params_for(species);
        let id = self.spawn_projectile(species, impulse, end, params)?;
        log::info!(
            "Launched {} {:?}: magnitude {:.1}, angle {:.3}",
            species,
            id,
            impulse.magnitude,
            impulse.angle
        );
        Ok(id)
    }

    /// Same as [`Session::launch`], with the species given by name.
    pub fn launch_named(
        &mut self,
        start: Vec2,
        end: Vec2,
        species: &str,
    ) -> Result<EntityId, EntityError> {
        let species = species.parse::<Species>()?;
        self.launch(start, end, species)
    }

    pub fn spawn_projectile(
        &mut self,
        species: Species,
        impulse: ImpulseVector,
        position: Vec2,
        params: ProjectileParams,
    ) -> Result<EntityId, EntityError> {
        let id = self.next_id();
        let entity = create_projectile(&mut self.physics, id, species, impulse, position, params)?;
        self.scene.spawn(entity);
        Ok(id)
    }

    pub fn spawn_target(
        &mut self,
        position: Vec2,
        params: TargetParams,
    ) -> Result<EntityId, EntityError> {
        let id = self.next_id();
        let entity = create_target(&mut self.physics, id, position, params)?;
        self.scene.spawn(entity);
        Ok(id)
    }

    pub fn spawn_obstacle(
        &mut self,
        position: Vec2,
        params: ObstacleParams,
    ) -> Result<EntityId, EntityError> {
        let id = self.next_id();
        let entity = create_obstacle(&mut self.physics, id, position, params)?;
        self.scene.spawn(entity);
        Ok(id)
    }

    /// Drawn-only scenery; nothing is registered with the physics world.
    pub fn spawn_static(&mut self, position: Vec2, size: Vec2) -> EntityId {
        let id = self.next_id();
        self.scene.spawn(create_static_obstacle(id, position, size));
        id
    }

    /// Remove an entity and its body. Returns `false` if it was already gone.
    pub fn despawn(&mut self, id: EntityId) -> bool {
        match self.scene.despawn(id) {
            Some(entity) => {
                if let Some(body) = &entity.body {
                    self.physics.remove_body(body);
                }
                true
            }
            None => false,
        }
    }

    // -- Abilities --

    /// Trigger the ability of one projectile.
    ///
    /// Unknown IDs, non-projectiles and spent abilities give
    /// `AbilityOutcome::None`. A split replaces the parent with three
    /// standard children.
    pub fn activate(&mut self, id: EntityId) -> Result<AbilityOutcome, EntityError> {
        let boost_factor = self.config.boost_factor;
        let offsets = self.config.split_offsets();
        let Some(entity) = self.scene.get_mut(id) else {
            return Ok(AbilityOutcome::None);
        };
        match ability::activate(entity, &mut self.physics, boost_factor, offsets) {
            Activation::Nothing => Ok(AbilityOutcome::None),
            Activation::Boosted(impulse) => Ok(AbilityOutcome::Boosted { impulse }),
            Activation::Split(plan) => self.split(id, plan),
        }
    }

    /// Broadcast activation to every projectile alive right now.
    /// Children created by a split during the broadcast are not activated.
    pub fn activate_all(&mut self) -> Vec<AbilityOutcome> {
        let mut outcomes = Vec::new();
        for id in self.scene.projectile_ids() {
            match self.activate(id) {
                Ok(AbilityOutcome::None) => {}
                Ok(outcome) => outcomes.push(outcome),
                Err(err) => log::warn!("Activation of {:?} failed: {}", id, err),
            }
        }
        outcomes
    }

    fn split(&mut self, parent: EntityId, plan: SplitPlan) -> Result<AbilityOutcome, EntityError> {
        // All children share the params, so one check covers all three.
        plan.params.validate()?;

        let mut children = Vec::with_capacity(plan.velocities.len());
        for velocity in plan.velocities {
            let id = self.next_id();
            let child = create_projectile_moving(
                &mut self.physics,
                id,
                Species::Standard,
                velocity,
                plan.position,
                plan.params,
            )?;
            self.scene.spawn(child);
            children.push(id);
        }
        self.despawn(parent);
        log::info!("Split {:?} into {:?}", parent, children);
        Ok(AbilityOutcome::Split { parent, children })
    }

    // -- Frame --

    /// Advance the world by one fixed step, then apply the destruction
    /// policy to the contacts that step resolved.
    pub fn step(&mut self) -> DestructionReport {
        self.contacts.clear();
        self.physics.step_into(self.config.fixed_dt, &mut self.contacts);
        resolve_contacts(
            &self.contacts,
            &self.config.destruction,
            &mut self.scene,
            &mut self.physics,
        )
    }

    /// Copy body transforms into every entity.
    pub fn update(&mut self) {
        for entity in self.scene.iter_mut() {
            entity.update(&self.physics);
        }
    }

    /// One frame: step, then sync transforms.
    pub fn tick(&mut self) -> DestructionReport {
        let report = self.step();
        self.update();
        report
    }

    /// Contacts resolved by the most recent step.
    pub fn contacts(&self) -> &[ContactImpulse] {
        &self.contacts
    }

    /// Execute a command produced by the slingshot controller.
    pub fn apply(&mut self, command: SlingCommand) -> Result<(), EntityError> {
        match command {
            SlingCommand::Launch { start, end, species } => {
                self.launch(start, end, species)?;
            }
            SlingCommand::Activate => {
                self.activate_all();
            }
        }
        Ok(())
    }

    pub fn build_render_buffer(&self, buffer: &mut RenderBuffer) {
        render::build_render_buffer(self.scene.iter(), buffer);
    }

    // -- Counts --

    pub fn projectile_count(&self) -> usize {
        self.scene.projectiles().count()
    }

    pub fn target_count(&self) -> usize {
        self.scene.targets().count()
    }

    pub fn obstacle_count(&self) -> usize {
        self.scene.obstacles().count()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}
