pub mod ability;
pub mod destruction;
pub mod render;
