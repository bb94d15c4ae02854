use bytemuck::{Pod, Zeroable};

/// Per-instance render data handed to the external renderer.
/// 8 floats = 32 bytes stride.
///
/// `kind` and `species` are small integer codes stored as floats so the
/// whole buffer can be uploaded as one flat `f32` slice.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct RenderInstance {
    /// X position in world space.
    pub x: f32,
    /// Y position in world space.
    pub y: f32,
    /// Rotation in radians.
    pub rotation: f32,
    /// World-space width in game units.
    pub width: f32,
    /// World-space height in game units.
    pub height: f32,
    /// Entity kind code (see `KIND_*`).
    pub kind: f32,
    /// Projectile species code (see `SPECIES_*`), 0 for non-projectiles.
    pub species: f32,
    /// Entity id, for renderers that keep per-entity state.
    pub entity_id: f32,
}

impl RenderInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub const KIND_STATIC: f32 = 0.0;
    pub const KIND_OBSTACLE: f32 = 1.0;
    pub const KIND_TARGET: f32 = 2.0;
    pub const KIND_PROJECTILE: f32 = 3.0;

    pub const SPECIES_STANDARD: f32 = 1.0;
    pub const SPECIES_BOOST: f32 = 2.0;
    pub const SPECIES_SPLIT: f32 = 3.0;
}

/// Render buffer containing all live entity instances.
pub struct RenderBuffer {
    /// Instances ordered static scenery first, then dynamic entities.
    pub instances: Vec<RenderInstance>,
    /// Index where static scenery ends and dynamic entities begin.
    pub static_split: u32,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self {
            instances: Vec::with_capacity(512),
            static_split: 0,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
        self.static_split = 0;
    }

    pub fn push(&mut self, instance: RenderInstance) {
        self.instances.push(instance);
    }

    pub fn set_static_split(&mut self, split: u32) {
        self.static_split = split;
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Flat float view of the instance data.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_instance_is_8_floats() {
        assert_eq!(std::mem::size_of::<RenderInstance>(), RenderInstance::STRIDE_BYTES);
        assert_eq!(RenderInstance::FLOATS, 8);
    }

    #[test]
    fn render_buffer_push_and_count() {
        let mut buf = RenderBuffer::new();
        buf.push(RenderInstance::default());
        buf.push(RenderInstance { x: 3.0, ..RenderInstance::default() });
        assert_eq!(buf.instance_count(), 2);
        assert_eq!(buf.as_floats().len(), 16);
        assert_eq!(buf.as_floats()[8], 3.0);
        buf.clear();
        assert_eq!(buf.instance_count(), 0);
    }
}
