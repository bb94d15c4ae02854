//! One-shot projectile abilities.
//!
//! Each projectile fires its ability at most once (`Idle` → `Activated`).
//! Boost pushes along the current heading; Split hands back a plan for
//! three standard children which the session spawns, then drops the parent.

use glam::Vec2;

use crate::api::types::EntityId;
use crate::components::entity::Entity;
use crate::components::projectile::{ProjectileParams, Species};
use crate::core::physics::PhysicsWorld;

/// What an activation did, as seen by the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum AbilityOutcome {
    /// No effect: no ability, already used, not a projectile, or gone.
    None,
    /// Boost applied this impulse.
    Boosted { impulse: Vec2 },
    /// The parent was replaced by these children.
    Split { parent: EntityId, children: Vec<EntityId> },
}

/// Children a split projectile turns into.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitPlan {
    pub position: Vec2,
    pub velocities: [Vec2; 3],
    pub params: ProjectileParams,
}

/// Result of running the state machine on one entity.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Activation {
    Nothing,
    Boosted(Vec2),
    Split(SplitPlan),
}

/// Direction of travel in radians. Falls back to the body rotation when
/// the body is not moving.
pub fn heading(velocity: Vec2, rotation: f32) -> f32 {
    if velocity.length_squared() > f32::EPSILON {
        velocity.y.atan2(velocity.x)
    } else {
        rotation
    }
}

/// Boost impulse: `boost_factor × speed` along the current heading.
pub fn boost_impulse(velocity: Vec2, rotation: f32, boost_factor: f32) -> Vec2 {
    Vec2::from_angle(heading(velocity, rotation)) * (boost_factor * velocity.length())
}

/// Velocity of each split child: the parent velocity rotated by each offset.
/// Every child keeps the full parent speed.
pub fn split_velocities(velocity: Vec2, offsets: [f32; 3]) -> [Vec2; 3] {
    offsets.map(|offset| Vec2::from_angle(offset).rotate(velocity))
}

/// Parameters of a split child moving at `speed`: the parent's, with the
/// launch cap raised to that speed. Children get their velocity set
/// directly, so the power multiplier is carried over untouched.
pub fn child_params(parent: &ProjectileParams, speed: f32) -> ProjectileParams {
    ProjectileParams {
        max_impulse: speed,
        ..*parent
    }
}

/// Run the ability state machine for one entity.
///
/// Boost is applied to the body here. Split only flips the state and
/// returns the plan; spawning and removal belong to the owner of the
/// tracking lists.
pub(crate) fn activate(
    entity: &mut Entity,
    physics: &mut PhysicsWorld,
    boost_factor: f32,
    split_offsets: [f32; 3],
) -> Activation {
    let id = entity.id;
    let Some(body) = entity.body else {
        return Activation::Nothing;
    };
    let Some(state) = entity.projectile_mut() else {
        return Activation::Nothing;
    };
    if !state.trigger() {
        return Activation::Nothing;
    }
    let (species, params) = (state.species, state.params);

    let velocity = physics.velocity(&body);
    let (position, rotation) = physics.body_position(&body);
    match species {
        Species::Standard => Activation::Nothing,
        Species::Boost => {
            let impulse = boost_impulse(velocity, rotation, boost_factor);
            physics.apply_impulse(&body, impulse);
            log::info!("Boost {:?}: impulse {:?}", id, impulse);
            Activation::Boosted(impulse)
        }
        Species::Split => Activation::Split(SplitPlan {
            position,
            velocities: split_velocities(velocity, split_offsets),
            params: child_params(&params, velocity.length()),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::entity::EntityKind;
    use crate::components::projectile::{create_projectile, AbilityState};
    use crate::core::impulse::ImpulseVector;
    use std::f32::consts::FRAC_PI_2;

    const OFFSETS_DEG: [f32; 3] = [20.0, -10.0, -40.0];

    fn offsets() -> [f32; 3] {
        OFFSETS_DEG.map(f32::to_radians)
    }

    fn launched(physics: &mut PhysicsWorld, species: Species, magnitude: f32) -> Entity {
        let entity = create_projectile(
            physics,
            EntityId(1),
            species,
            ImpulseVector::new(magnitude, 0.0),
            Vec2::new(200.0, 200.0),
            ProjectileParams::default(),
        )
        .unwrap();
        let mut contacts = Vec::new();
        physics.step_into(1.0 / 60.0, &mut contacts);
        entity
    }

    fn angle_between(a: Vec2, b: Vec2) -> f32 {
        let d = b.y.atan2(b.x) - a.y.atan2(a.x);
        (d + std::f32::consts::PI).rem_euclid(std::f32::consts::TAU) - std::f32::consts::PI
    }

    #[test]
    fn heading_follows_velocity() {
        assert!((heading(Vec2::new(0.0, -3.0), 1.0) + FRAC_PI_2).abs() < 1e-6);
        assert_eq!(heading(Vec2::ZERO, 0.4), 0.4);
    }

    #[test]
    fn boost_impulse_scales_with_speed() {
        let j = boost_impulse(Vec2::new(0.0, 50.0), 0.0, 2.0);
        assert!(j.x.abs() < 1e-4);
        assert!((j.y - 100.0).abs() < 1e-3);
        assert_eq!(boost_impulse(Vec2::ZERO, 0.0, 2.0), Vec2::ZERO);
    }

    #[test]
    fn split_children_fan_out_at_full_speed() {
        let v = Vec2::new(300.0, 0.0);
        let children = split_velocities(v, offsets());
        for (child, deg) in children.iter().zip(OFFSETS_DEG) {
            assert!((child.length() - 300.0).abs() < 1e-2);
            assert!((angle_between(v, *child) - deg.to_radians()).abs() < 1e-4);
        }
    }

    #[test]
    fn child_params_only_raise_the_cap() {
        let parent = ProjectileParams::default();
        let params = child_params(&parent, 420.0);
        assert_eq!(params.max_impulse, 420.0);
        assert_eq!(params.power_multiplier, parent.power_multiplier);
        assert_eq!(params.mass, parent.mass);
        assert_eq!(params.radius, parent.radius);
    }

    #[test]
    fn boost_applies_once() {
        let mut physics = PhysicsWorld::new(Vec2::ZERO);
        let mut bird = launched(&mut physics, Species::Boost, 20.0);
        let body = bird.body.unwrap();
        let v0 = physics.velocity(&body);
        assert!((v0.x - 200.0).abs() < 1e-2, "v0 = {:?}", v0);

        let first = activate(&mut bird, &mut physics, 2.0, offsets());
        match first {
            Activation::Boosted(j) => assert!((j.x - 400.0).abs() < 1e-2),
            other => panic!("expected boost, got {:?}", other),
        }
        let v1 = physics.velocity(&body);
        // Δv = 2 × 200 / 5
        assert!((v1.x - 280.0).abs() < 1e-1, "v1 = {:?}", v1);
        assert!(v1.y.abs() < 1e-3);

        assert_eq!(activate(&mut bird, &mut physics, 2.0, offsets()), Activation::Nothing);
        assert_eq!(physics.velocity(&body), v1);
        assert_eq!(bird.projectile().unwrap().ability, AbilityState::Activated);
    }

    #[test]
    fn standard_activation_changes_nothing() {
        let mut physics = PhysicsWorld::new(Vec2::ZERO);
        let mut bird = launched(&mut physics, Species::Standard, 30.0);
        let body = bird.body.unwrap();
        let before = physics.velocity(&body);
        assert_eq!(activate(&mut bird, &mut physics, 2.0, offsets()), Activation::Nothing);
        assert_eq!(physics.velocity(&body), before);
    }

    #[test]
    fn split_returns_plan_once() {
        let mut physics = PhysicsWorld::new(Vec2::ZERO);
        let mut bird = launched(&mut physics, Species::Split, 30.0);
        let plan = match activate(&mut bird, &mut physics, 2.0, offsets()) {
            Activation::Split(plan) => plan,
            other => panic!("expected split, got {:?}", other),
        };
        assert!((plan.params.max_impulse - 300.0).abs() < 1e-1);
        assert!((plan.position.y - 200.0).abs() < 1e-3);
        assert_eq!(activate(&mut bird, &mut physics, 2.0, offsets()), Activation::Nothing);
    }

    #[test]
    fn non_projectiles_ignore_activation() {
        let mut physics = PhysicsWorld::new(Vec2::ZERO);
        let mut pig = Entity::new(EntityId(5), EntityKind::Target);
        assert_eq!(activate(&mut pig, &mut physics, 2.0, offsets()), Activation::Nothing);
    }
}
