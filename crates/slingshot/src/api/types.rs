/// Unique identifier for an entity in the scene.
///
/// Ids start at 1; the value 0 is never handed out so a zeroed body
/// `user_data` cannot alias a live entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);
