//! Impact-driven destruction.
//!
//! Runs over the contacts resolved by one physics step. Removals are
//! collected first and applied in a second pass, so a shape that shows up
//! in several contacts of the same step is removed once.

use serde::{Deserialize, Serialize};

use crate::api::types::EntityId;
use crate::core::physics::{ContactImpulse, PhysicsWorld};
use crate::core::scene::Scene;

/// Impulse magnitudes separating the three impact bands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DestructionThresholds {
    /// Below this an impact is ignored.
    pub lower: f32,
    /// Above this an impact breaks every target/obstacle it touches.
    pub upper: f32,
}

impl Default for DestructionThresholds {
    fn default() -> Self {
        Self {
            lower: 100.0,
            upper: 1200.0,
        }
    }
}

/// Outcome band of a single contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImpactClass {
    /// `magnitude < lower`.
    Ignored,
    /// `lower <= magnitude <= upper`. Logged only.
    Informational,
    /// `magnitude > upper`.
    Destructive,
}

impl DestructionThresholds {
    pub fn classify(&self, magnitude: f32) -> ImpactClass {
        if magnitude < self.lower {
            ImpactClass::Ignored
        } else if magnitude > self.upper {
            ImpactClass::Destructive
        } else {
            ImpactClass::Informational
        }
    }
}

/// What one destruction pass did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DestructionReport {
    /// Entities removed, in removal order.
    pub removed: Vec<EntityId>,
    /// Contacts that landed in the informational band.
    pub informational: usize,
    /// Contacts above the upper threshold.
    pub destructive: usize,
}

impl DestructionReport {
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty()
    }

    pub fn merge(&mut self, other: DestructionReport) {
        self.removed.extend(other.removed);
        self.informational += other.informational;
        self.destructive += other.destructive;
    }
}

/// Apply the destruction policy to the contacts of one step.
///
/// Projectiles and static scenery are never removed. Contacts naming
/// entities that are already gone are skipped.
pub fn resolve_contacts(
    contacts: &[ContactImpulse],
    thresholds: &DestructionThresholds,
    scene: &mut Scene,
    physics: &mut PhysicsWorld,
) -> DestructionReport {
    let mut report = DestructionReport::default();
    let mut doomed: Vec<EntityId> = Vec::new();

    for contact in contacts {
        match thresholds.classify(contact.magnitude) {
            ImpactClass::Ignored => {}
            ImpactClass::Informational => {
                log::debug!(
                    "Impact {:.1} between {:?} and {:?}",
                    contact.magnitude,
                    contact.entity_a,
                    contact.entity_b
                );
                report.informational += 1;
            }
            ImpactClass::Destructive => {
                log::debug!(
                    "Destructive impact {:.1} between {:?} and {:?}",
                    contact.magnitude,
                    contact.entity_a,
                    contact.entity_b
                );
                report.destructive += 1;
                for id in contact.entities() {
                    let breakable = scene.get(id).is_some_and(|e| e.is_destructible());
                    if breakable && !doomed.contains(&id) {
                        doomed.push(id);
                    }
                }
            }
        }
    }

    for id in doomed {
        if let Some(entity) = scene.despawn(id) {
            if let Some(body) = &entity.body {
                physics.remove_body(body);
            }
            log::info!("{:?} {:?} destroyed", entity.kind, id);
            report.removed.push(id);
        }
    }

    report
}
