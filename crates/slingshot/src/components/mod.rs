pub mod entity;
pub mod projectile;
pub mod structure;
