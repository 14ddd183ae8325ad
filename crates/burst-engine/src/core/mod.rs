pub mod fields;
pub mod physics;
pub mod session;
