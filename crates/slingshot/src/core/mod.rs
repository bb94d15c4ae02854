pub mod impulse;
pub mod physics;
pub mod scene;
