pub mod queue;
pub mod slingshot;
