use crate::components::entity::{Entity, EntityKind};
use crate::components::projectile::Species;
use crate::renderer::instance::{RenderBuffer, RenderInstance};

fn instance_for(entity: &Entity) -> RenderInstance {
    let (kind, species) = match &entity.kind {
        EntityKind::StaticObstacle => (RenderInstance::KIND_STATIC, 0.0),
        EntityKind::Obstacle => (RenderInstance::KIND_OBSTACLE, 0.0),
        EntityKind::Target => (RenderInstance::KIND_TARGET, 0.0),
        EntityKind::Projectile(state) => (
            RenderInstance::KIND_PROJECTILE,
            match state.species {
                Species::Standard => RenderInstance::SPECIES_STANDARD,
                Species::Boost => RenderInstance::SPECIES_BOOST,
                Species::Split => RenderInstance::SPECIES_SPLIT,
            },
        ),
    };
    RenderInstance {
        x: entity.pos.x,
        y: entity.pos.y,
        rotation: entity.rotation,
        width: entity.size.x,
        height: entity.size.y,
        kind,
        species,
        entity_id: entity.id.0 as f32,
    }
}

/// Build the render buffer from a set of entities.
/// Static scenery goes first, then everything that moves; `static_split`
/// marks the boundary.
pub fn build_render_buffer<'a>(
    entities: impl Iterator<Item = &'a Entity>,
    buffer: &mut RenderBuffer,
) {
    buffer.clear();

    let mut dynamic_instances: Vec<RenderInstance> = Vec::new();
    for entity in entities {
        let instance = instance_for(entity);
        if entity.is_static() {
            buffer.push(instance);
        } else {
            dynamic_instances.push(instance);
        }
    }

    buffer.set_static_split(buffer.instance_count());
    for inst in dynamic_instances {
        buffer.push(inst);
    }
}
