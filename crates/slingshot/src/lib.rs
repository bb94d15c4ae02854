pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod input;
pub mod error;

// Re-export key types at crate root for convenience
pub use api::config::GameConfig;
pub use api::session::Session;
pub use api::types::EntityId;
pub use components::entity::{Entity, EntityKind};
pub use components::projectile::{AbilityState, ProjectileParams, ProjectileState, Species};
pub use components::structure::{ObstacleParams, TargetParams};
pub use core::impulse::{clamp_drag, compute_impulse, ImpulseVector, MAX_DRAG_DISTANCE};
pub use core::physics::{
    PhysicsWorld, PhysicsBody, BodyDesc, ColliderDesc, ColliderMaterial, ContactImpulse,
};
pub use core::scene::Scene;
pub use error::EntityError;
pub use input::queue::{InputEvent, InputQueue, PointerButton};
pub use input::slingshot::{SlingCommand, Slingshot};
pub use renderer::instance::{RenderBuffer, RenderInstance};
pub use systems::ability::AbilityOutcome;
pub use systems::destruction::{DestructionReport, DestructionThresholds, ImpactClass};
