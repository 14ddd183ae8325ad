pub mod drag;
pub mod launch;
pub mod rng;
pub mod spawn;
pub mod sweep;
