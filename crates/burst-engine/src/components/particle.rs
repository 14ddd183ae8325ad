use glam::Vec2;

use crate::api::types::ParticleId;
use crate::assets::registry::ImageRef;
use crate::core::physics::PhysicsBody;

/// Tag marking a particle as burst-managed. The drag manager only tethers
/// particles carrying this tag.
pub const BURST_TAG: &str = "burst";

/// Fat particle struct — a visual entity subject to the session's force
/// fields. The particle never owns its force fields; the session's field
/// registry does. Auxiliary handles live in the session's side table, keyed
/// by `id`.
#[derive(Debug, Clone)]
pub struct Particle {
    /// Unique identifier, assigned by the session at spawn.
    pub id: ParticleId,
    /// String tag for filtering (burst-managed particles use BURST_TAG).
    pub tag: String,
    /// Position in surface space (Y down), synced from physics each step.
    pub pos: Vec2,
    /// Rotation in radians, synced from physics each step.
    pub rotation: f32,
    /// Rendered size in surface units.
    pub size: Vec2,
    /// Which bitmap renders this particle.
    pub image: ImageRef,
    /// Physics body (None until spawned into a session).
    pub(crate) body: Option<PhysicsBody>,
}

impl Particle {
    /// Create a new particle rendered with the given image, at the origin.
    pub fn new(image: ImageRef) -> Self {
        Self {
            id: ParticleId::default(),
            tag: String::new(),
            pos: Vec2::ZERO,
            rotation: 0.0,
            size: Vec2::ONE,
            image,
            body: None,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_pos(mut self, pos: Vec2) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_size(mut self, size: Vec2) -> Self {
        self.size = size;
        self
    }

    /// Whether this particle is burst-managed.
    pub fn is_burst(&self) -> bool {
        self.tag == BURST_TAG
    }
}
