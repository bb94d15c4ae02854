use glam::Vec2;
use rapier2d::prelude::*;
use std::sync::{Mutex, PoisonError};

use crate::api::types::EntityId;

// ---------------------------------------------------------------------------
// glam ↔ nalgebra conversion
// ---------------------------------------------------------------------------

fn vec2_to_na(v: Vec2) -> Vector<Real> {
    Vector::new(v.x, v.y)
}

fn na_to_vec2(v: &Vector<Real>) -> Vec2 {
    Vec2::new(v.x, v.y)
}

fn na_iso_to_pos_rot(iso: &Isometry<Real>) -> (Vec2, f32) {
    let pos = Vec2::new(iso.translation.x, iso.translation.y);
    let rot = iso.rotation.angle();
    (pos, rot)
}

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Shape description for a collider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColliderDesc {
    Ball { radius: f32 },
    Cuboid { half_width: f32, half_height: f32 },
    /// Line segment in the body's local frame. Used for the ground.
    Segment { a: Vec2, b: Vec2 },
}

impl ColliderDesc {
    fn build_collider(&self) -> ColliderBuilder {
        match *self {
            ColliderDesc::Ball { radius } => ColliderBuilder::ball(radius),
            ColliderDesc::Cuboid { half_width, half_height } => {
                ColliderBuilder::cuboid(half_width, half_height)
            }
            ColliderDesc::Segment { a, b } => {
                ColliderBuilder::segment(Point::new(a.x, a.y), Point::new(b.x, b.y))
            }
        }
    }
}

/// Physical material properties for a collider.
///
/// Mass is given directly; rapier derives the moment of inertia from the
/// collider shape (disc for balls, box for cuboids).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColliderMaterial {
    pub restitution: f32,
    pub friction: f32,
    pub mass: f32,
    /// Free-form layer tag kept on the collider. It does not filter contacts.
    pub collision_layer: u32,
}

impl Default for ColliderMaterial {
    fn default() -> Self {
        Self {
            restitution: 0.8,
            friction: 1.0,
            mass: 1.0,
            collision_layer: 0,
        }
    }
}

/// Builder for describing a dynamic body before creation.
///
/// Everything the game simulates moves; scenery that never moves is either
/// the ground segment or drawn without a body.
#[derive(Debug, Clone)]
pub struct BodyDesc {
    pub position: Vec2,
    pub rotation: f32,
    pub velocity: Vec2,
    pub ccd: bool,
    pub collider: ColliderDesc,
}

impl BodyDesc {
    /// Create a dynamic body description with the given collider shape.
    pub fn dynamic(collider: ColliderDesc) -> Self {
        Self {
            position: Vec2::ZERO,
            rotation: 0.0,
            velocity: Vec2::ZERO,
            ccd: false,
            collider,
        }
    }

    pub fn with_position(mut self, pos: Vec2) -> Self {
        self.position = pos;
        self
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.velocity = vel;
        self
    }

    pub fn with_ccd(mut self, enabled: bool) -> Self {
        self.ccd = enabled;
        self
    }
}

/// Handle pair stored on an Entity, referencing Rapier internals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhysicsBody {
    pub body_handle: RigidBodyHandle,
    pub collider_handle: ColliderHandle,
}

/// Total impulse the solver applied to one contact pair during a step.
///
/// `entity_a` / `entity_b` are `None` for shapes that are not entities
/// (the ground).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactImpulse {
    pub entity_a: Option<EntityId>,
    pub entity_b: Option<EntityId>,
    pub impulse: Vec2,
    pub magnitude: f32,
}

impl ContactImpulse {
    /// Build a contact record from two participants and a total impulse.
    pub fn new(entity_a: Option<EntityId>, entity_b: Option<EntityId>, impulse: Vec2) -> Self {
        Self {
            entity_a,
            entity_b,
            impulse,
            magnitude: impulse.length(),
        }
    }

    /// Entities participating in this contact.
    pub fn entities(&self) -> impl Iterator<Item = EntityId> {
        self.entity_a.into_iter().chain(self.entity_b)
    }
}

// ---------------------------------------------------------------------------
// Contact force collector
// ---------------------------------------------------------------------------

/// Raw post-solve record: the two colliders and their summed impulse.
struct RawContact {
    collider1: ColliderHandle,
    collider2: ColliderHandle,
    impulse: Vector<Real>,
}

struct ContactCollector {
    contacts: Mutex<Vec<RawContact>>,
}

impl ContactCollector {
    fn new() -> Self {
        Self {
            contacts: Mutex::new(Vec::new()),
        }
    }

    fn drain_contacts(&self) -> Vec<RawContact> {
        std::mem::take(&mut *self.contacts.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl EventHandler for ContactCollector {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _event: CollisionEvent,
        _contact_pair: Option<&ContactPair>,
    ) {
        // Start/stop events carry no impulse; destruction only looks at forces.
    }

    fn handle_contact_force_event(
        &self,
        _dt: f32,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        contact_pair: &ContactPair,
        _total_force_magnitude: f32,
    ) {
        self.contacts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RawContact {
                collider1: contact_pair.collider1,
                collider2: contact_pair.collider2,
                impulse: contact_pair.total_impulse(),
            });
    }
}

// ---------------------------------------------------------------------------
// PhysicsWorld
// ---------------------------------------------------------------------------

/// The simulation space: gravity, the ground and every dynamic body.
///
/// Sole owner of body and collider lifetime: every dynamic entity registers
/// here at creation and deregisters on removal.
pub struct PhysicsWorld {
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
    event_collector: ContactCollector,
    ground: Option<PhysicsBody>,
}

impl PhysicsWorld {
    /// Create a new physics world with the given gravity vector.
    /// Y points down, so use positive Y for downward gravity
    /// (e.g., `Vec2::new(0.0, 900.0)`).
    pub fn new(gravity: Vec2) -> Self {
        Self {
            gravity: vec2_to_na(gravity),
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            event_collector: ContactCollector::new(),
            ground: None,
        }
    }

    /// The global gravity vector.
    pub fn gravity(&self) -> Vec2 {
        na_to_vec2(&self.gravity)
    }

    /// Install the static ground segment from `from` to `to`.
    /// Replaces any previously installed ground.
    pub fn set_ground(&mut self, from: Vec2, to: Vec2, friction: f32) -> PhysicsBody {
        if let Some(old) = self.ground.take() {
            self.remove_body(&old);
        }
        let rb = RigidBodyBuilder::fixed().build();
        let body_handle = self.bodies.insert(rb);
        let collider = ColliderDesc::Segment { a: from, b: to }
            .build_collider()
            .friction(friction)
            .restitution(0.0)
            .build();
        let collider_handle =
            self.colliders
                .insert_with_parent(collider, body_handle, &mut self.bodies);
        let ground = PhysicsBody {
            body_handle,
            collider_handle,
        };
        self.ground = Some(ground);
        ground
    }

    /// The ground body, if one is installed.
    pub fn ground(&self) -> Option<PhysicsBody> {
        self.ground
    }

    /// Create a rigid body + collider and return handles.
    /// The EntityId is stored in the body's `user_data` for contact lookups.
    pub fn create_body(
        &mut self,
        entity_id: EntityId,
        desc: &BodyDesc,
        material: ColliderMaterial,
    ) -> PhysicsBody {
        let rb = RigidBodyBuilder::dynamic()
            .translation(vec2_to_na(desc.position))
            .rotation(desc.rotation)
            .linvel(vec2_to_na(desc.velocity))
            .ccd_enabled(desc.ccd)
            .user_data(entity_id.0 as u128)
            .build();

        let body_handle = self.bodies.insert(rb);

        let collider = desc
            .collider
            .build_collider()
            .restitution(material.restitution)
            .friction(material.friction)
            .mass(material.mass)
            .user_data(material.collision_layer as u128)
            .active_events(ActiveEvents::CONTACT_FORCE_EVENTS)
            .build();

        let collider_handle =
            self.colliders
                .insert_with_parent(collider, body_handle, &mut self.bodies);

        PhysicsBody {
            body_handle,
            collider_handle,
        }
    }

    /// Remove a body and all its colliders from the simulation.
    /// Returns `false` when the body was already gone.
    pub fn remove_body(&mut self, body: &PhysicsBody) -> bool {
        self.bodies
            .remove(
                body.body_handle,
                &mut self.island_manager,
                &mut self.colliders,
                &mut self.impulse_joints,
                &mut self.multibody_joints,
                true,
            )
            .is_some()
    }

    /// Whether both the body and its collider are still registered.
    pub fn contains(&self, body: &PhysicsBody) -> bool {
        self.bodies.contains(body.body_handle) && self.colliders.contains(body.collider_handle)
    }

    /// Advance the simulation by exactly `dt` and collect the contact
    /// impulses resolved during that step into the provided Vec.
    pub fn step_into(&mut self, dt: f32, contacts: &mut Vec<ContactImpulse>) {
        self.integration_parameters.dt = dt;
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &self.event_collector,
        );

        // Resolve collider handles → body handles → entity IDs
        for raw in self.event_collector.drain_contacts() {
            contacts.push(ContactImpulse::new(
                self.collider_to_entity(raw.collider1),
                self.collider_to_entity(raw.collider2),
                na_to_vec2(&raw.impulse),
            ));
        }
    }

    /// Apply an instantaneous impulse to a body at its centre of mass.
    pub fn apply_impulse(&mut self, body: &PhysicsBody, impulse: Vec2) {
        if let Some(rb) = self.bodies.get_mut(body.body_handle) {
            rb.apply_impulse(vec2_to_na(impulse), true);
        }
    }

    /// Get the current linear velocity of a body.
    pub fn velocity(&self, body: &PhysicsBody) -> Vec2 {
        self.bodies
            .get(body.body_handle)
            .map(|rb| na_to_vec2(rb.linvel()))
            .unwrap_or(Vec2::ZERO)
    }

    /// Get the current position and rotation of a body.
    pub fn body_position(&self, body: &PhysicsBody) -> (Vec2, f32) {
        self.bodies
            .get(body.body_handle)
            .map(|rb| na_iso_to_pos_rot(rb.position()))
            .unwrap_or((Vec2::ZERO, 0.0))
    }

    /// Mass of the body as computed from its colliders.
    pub fn mass(&self, body: &PhysicsBody) -> f32 {
        self.bodies
            .get(body.body_handle)
            .map(|rb| rb.mass())
            .unwrap_or(0.0)
    }

    /// Layer tag stored on the body's collider.
    pub fn collision_layer(&self, body: &PhysicsBody) -> Option<u32> {
        self.colliders
            .get(body.collider_handle)
            .map(|c| c.user_data as u32)
    }

    /// Number of rigid bodies in the simulation (ground included).
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Number of colliders in the simulation (ground included).
    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }

    /// Query the collider shape of a physics body.
    /// Returns `None` if the collider no longer exists or has an unsupported shape.
    pub fn collider_shape(&self, body: &PhysicsBody) -> Option<ColliderDesc> {
        let collider = self.colliders.get(body.collider_handle)?;
        let shape = collider.shape();
        if let Some(ball) = shape.as_ball() {
            Some(ColliderDesc::Ball { radius: ball.radius })
        } else if let Some(cuboid) = shape.as_cuboid() {
            Some(ColliderDesc::Cuboid {
                half_width: cuboid.half_extents.x,
                half_height: cuboid.half_extents.y,
            })
        } else if let Some(segment) = shape.as_segment() {
            Some(ColliderDesc::Segment {
                a: Vec2::new(segment.a.x, segment.a.y),
                b: Vec2::new(segment.b.x, segment.b.y),
            })
        } else {
            None
        }
    }

    // -- private helpers --

    fn collider_to_entity(&self, collider_handle: ColliderHandle) -> Option<EntityId> {
        let collider = self.colliders.get(collider_handle)?;
        let body_handle = collider.parent()?;
        let body = self.bodies.get(body_handle)?;
        match body.user_data as u32 {
            0 => None,
            id => Some(EntityId(id)),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
