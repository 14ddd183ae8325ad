pub mod api;
pub mod assets;
pub mod components;
pub mod core;
pub mod input;
pub mod renderer;
pub mod systems;

// Re-export key types at crate root for convenience
pub use crate::api::controller::{BurstController, DEFAULT_BURST_COUNT};
pub use crate::api::types::ParticleId;
pub use crate::assets::manifest::{ImageDescriptor, ImageManifest};
pub use crate::assets::registry::{ImageId, ImageRef, ImageRegistry};
pub use crate::components::particle::{Particle, BURST_TAG};
pub use crate::core::fields::{
    FieldId, FieldKind, FieldRegistry, ForceField, WallEdge, TETHER_EASE,
};
pub use crate::core::physics::{
    BodyDesc, BodyType, ColliderDesc, ColliderMaterial, PhysicsBody, PhysicsWorld,
};
pub use crate::core::session::{ParticleFields, SessionConfig, SimulationSession, SurfaceBounds};
pub use crate::input::queue::{InputEvent, InputQueue};
pub use crate::renderer::instance::{ParticleInstance, SnapshotBuffer};
pub use crate::systems::drag::DragManager;
pub use crate::systems::launch::{
    launch_direction, launch_direction_jittered, partition_width, X_END, X_START,
};
pub use crate::systems::rng::Rng;
pub use crate::systems::spawn::{spawn_batch, PARTICLE_SCALE};
pub use crate::systems::sweep::sweep_retired;
