//! Projectile ("bird") species, launch parameters and creation.

use std::fmt;
use std::str::FromStr;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::types::EntityId;
use crate::components::entity::{Entity, EntityKind};
use crate::core::impulse::ImpulseVector;
use crate::core::physics::{BodyDesc, ColliderDesc, ColliderMaterial, PhysicsWorld};
use crate::error::{ensure_non_negative, ensure_positive, EntityError};

/// Projectile species. Selects what `activate` does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Species {
    /// No ability.
    Standard,
    /// One extra push along the current heading.
    Boost,
    /// Splits into three standard projectiles.
    Split,
}

impl Species {
    pub const ALL: [Species; 3] = [Species::Standard, Species::Boost, Species::Split];

    pub fn name(self) -> &'static str {
        match self {
            Species::Standard => "Standard",
            Species::Boost => "Boost",
            Species::Split => "Split",
        }
    }

    /// Ability state a freshly created projectile starts in.
    /// Standard has nothing to trigger, so it is born spent.
    pub fn initial_ability(self) -> AbilityState {
        match self {
            Species::Standard => AbilityState::Activated,
            Species::Boost | Species::Split => AbilityState::Idle,
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Species {
    type Err = EntityError;

    /// Accepts species names and the bird colours players know them by.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" | "red" => Ok(Species::Standard),
            "boost" | "yellow" => Ok(Species::Boost),
            "split" | "blue" => Ok(Species::Split),
            _ => Err(EntityError::UnknownSpecies(s.to_string())),
        }
    }
}

/// One-shot ability state: `Idle` → `Activated`, never back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbilityState {
    Idle,
    Activated,
}

impl AbilityState {
    pub fn is_activated(self) -> bool {
        self == AbilityState::Activated
    }
}

/// Launch-time physical parameters of a projectile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileParams {
    pub mass: f32,
    pub radius: f32,
    /// Upper bound on the raw drag magnitude.
    pub max_impulse: f32,
    /// Scale from drag units to simulation impulse units.
    pub power_multiplier: f32,
    pub elasticity: f32,
    pub friction: f32,
    pub collision_layer: u32,
}

impl Default for ProjectileParams {
    fn default() -> Self {
        Self {
            mass: 5.0,
            radius: 12.0,
            max_impulse: 100.0,
            power_multiplier: 50.0,
            elasticity: 0.8,
            friction: 1.0,
            collision_layer: 0,
        }
    }
}

impl ProjectileParams {
    pub fn validate(&self) -> Result<(), EntityError> {
        ensure_positive("mass", self.mass)?;
        ensure_positive("radius", self.radius)?;
        ensure_non_negative("max_impulse", self.max_impulse)?;
        ensure_non_negative("power_multiplier", self.power_multiplier)?;
        Ok(())
    }

    /// Largest impulse a launch can ever apply.
    pub fn max_launch_impulse(&self) -> f32 {
        self.max_impulse * self.power_multiplier
    }

    /// Impulse applied at launch: the drag magnitude capped at
    /// `max_impulse`, scaled by `power_multiplier`, along the launch angle.
    pub fn launch_impulse(&self, impulse: ImpulseVector) -> Vec2 {
        let magnitude = impulse.magnitude.min(self.max_impulse).max(0.0) * self.power_multiplier;
        impulse.direction() * magnitude
    }

    pub(crate) fn material(&self) -> ColliderMaterial {
        ColliderMaterial {
            restitution: self.elasticity,
            friction: self.friction,
            mass: self.mass,
            collision_layer: self.collision_layer,
        }
    }
}

/// Per-projectile state carried on the entity.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectileState {
    pub species: Species,
    pub params: ProjectileParams,
    pub ability: AbilityState,
}

impl ProjectileState {
    pub fn new(species: Species, params: ProjectileParams) -> Self {
        Self {
            species,
            params,
            ability: species.initial_ability(),
        }
    }

    /// Flip `Idle` → `Activated`. Returns `true` only for the call that
    /// performed the transition.
    pub fn trigger(&mut self) -> bool {
        match self.ability {
            AbilityState::Idle => {
                self.ability = AbilityState::Activated;
                true
            }
            AbilityState::Activated => false,
        }
    }
}

/// Build a projectile body at `position`, register it with the world and
/// return the entity. Nothing is registered when the parameters are invalid.
pub fn create_projectile(
    physics: &mut PhysicsWorld,
    id: EntityId,
    species: Species,
    impulse: ImpulseVector,
    position: Vec2,
    params: ProjectileParams,
) -> Result<Entity, EntityError> {
    params.validate()?;

    // A body at rest that takes an impulse J through its centre of mass
    // leaves with velocity J / m.
    let velocity = params.launch_impulse(impulse) / params.mass;
    create_projectile_moving(physics, id, species, velocity, position, params)
}

/// Build a projectile that is already moving at `velocity`, bypassing the
/// launch impulse. Split children are created this way.
pub fn create_projectile_moving(
    physics: &mut PhysicsWorld,
    id: EntityId,
    species: Species,
    velocity: Vec2,
    position: Vec2,
    params: ProjectileParams,
) -> Result<Entity, EntityError> {
    params.validate()?;

    let desc = BodyDesc::dynamic(ColliderDesc::Ball { radius: params.radius })
        .with_position(position)
        .with_velocity(velocity)
        .with_ccd(true);
    let body = physics.create_body(id, &desc, params.material());

    Ok(Entity::new(id, EntityKind::Projectile(ProjectileState::new(species, params)))
        .with_pos(position)
        .with_size(Vec2::splat(params.radius * 2.0))
        .with_body(body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn species_from_names_and_colours() {
        assert_eq!("Standard".parse::<Species>(), Ok(Species::Standard));
        assert_eq!("red".parse::<Species>(), Ok(Species::Standard));
        assert_eq!(" Yellow ".parse::<Species>(), Ok(Species::Boost));
        assert_eq!("BLUE".parse::<Species>(), Ok(Species::Split));
        assert_eq!("split".parse::<Species>(), Ok(Species::Split));
        assert!(matches!("green".parse::<Species>(), Err(EntityError::UnknownSpecies(_))));
    }

    #[test]
    fn standard_is_born_activated() {
        assert!(Species::Standard.initial_ability().is_activated());
        assert!(!Species::Boost.initial_ability().is_activated());
        assert!(!Species::Split.initial_ability().is_activated());
    }

    #[test]
    fn trigger_fires_once() {
        let mut state = ProjectileState::new(Species::Boost, ProjectileParams::default());
        assert!(state.trigger());
        assert!(!state.trigger());
        assert_eq!(state.ability, AbilityState::Activated);

        let mut standard = ProjectileState::new(Species::Standard, ProjectileParams::default());
        assert!(!standard.trigger());
    }

    #[test]
    fn launch_impulse_never_exceeds_cap() {
        let params = ProjectileParams::default();
        for magnitude in [0.0, 10.0, 99.0, 100.0, 101.0, 5_000.0, 1e9] {
            let j = params.launch_impulse(ImpulseVector::new(magnitude, 0.7));
            assert!(
                j.length() <= params.max_launch_impulse() * 1.0001,
                "m={} |j|={}",
                magnitude,
                j.length()
            );
        }
        let full = params.launch_impulse(ImpulseVector::new(250.0, 0.0));
        assert!((full.x - 5_000.0).abs() < 1e-2);
    }

    #[test]
    fn launch_impulse_follows_angle() {
        let params = ProjectileParams::default();
        let j = params.launch_impulse(ImpulseVector::new(40.0, -FRAC_PI_2));
        assert!(j.x.abs() < 1e-3);
        assert!((j.y + 2_000.0).abs() < 1e-2);
    }

    #[test]
    fn create_registers_body_with_launch_velocity() {
        let mut physics = PhysicsWorld::new(Vec2::ZERO);
        let params = ProjectileParams::default();
        let entity = create_projectile(
            &mut physics,
            EntityId(1),
            Species::Split,
            ImpulseVector::new(60.0, 0.0),
            Vec2::new(100.0, 300.0),
            params,
        )
        .expect("valid params");

        let body = entity.body.expect("projectile has a body");
        assert!(physics.contains(&body));
        // 60 * 50 / 5
        let vel = physics.velocity(&body);
        assert!((vel.x - 600.0).abs() < 1e-2, "vel = {:?}", vel);
        assert!(vel.y.abs() < 1e-3);
        assert_eq!(entity.pos, Vec2::new(100.0, 300.0));
        assert_eq!(entity.size, Vec2::splat(24.0));
        assert_eq!(entity.projectile().map(|p| p.ability), Some(AbilityState::Idle));
    }

    #[test]
    fn invalid_params_register_nothing() {
        let mut physics = PhysicsWorld::new(Vec2::ZERO);
        for params in [
            ProjectileParams { mass: 0.0, ..ProjectileParams::default() },
            ProjectileParams { radius: -3.0, ..ProjectileParams::default() },
            ProjectileParams { max_impulse: f32::NAN, ..ProjectileParams::default() },
        ] {
            let result = create_projectile(
                &mut physics,
                EntityId(1),
                Species::Standard,
                ImpulseVector::new(10.0, 0.0),
                Vec2::ZERO,
                params,
            );
            assert!(matches!(result, Err(EntityError::InvalidParameters { .. })));
        }
        assert_eq!(physics.body_count(), 0);
    }

    #[test]
    fn moving_projectile_keeps_given_velocity() {
        let mut physics = PhysicsWorld::new(Vec2::ZERO);
        let params = ProjectileParams { max_impulse: 300.0, ..ProjectileParams::default() };
        let entity = create_projectile_moving(
            &mut physics,
            EntityId(4),
            Species::Standard,
            Vec2::new(0.0, -300.0),
            Vec2::new(50.0, 50.0),
            params,
        )
        .expect("valid params");
        let vel = physics.velocity(&entity.body.expect("projectile has a body"));
        assert!((vel - Vec2::new(0.0, -300.0)).length() < 1e-3, "vel = {:?}", vel);
        assert_eq!(entity.projectile().map(|p| p.params), Some(params));

        let bad = ProjectileParams { radius: 0.0, ..params };
        let result = create_projectile_moving(
            &mut physics,
            EntityId(5),
            Species::Standard,
            Vec2::X,
            Vec2::ZERO,
            bad,
        );
        assert!(result.is_err());
        assert_eq!(physics.body_count(), 1);
    }
}
