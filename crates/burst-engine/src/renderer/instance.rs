use bytemuck::{Pod, Zeroable};

use crate::core::session::SimulationSession;

/// Per-particle render data for the host renderer. 8 floats per instance.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct ParticleInstance {
    /// X position in surface space.
    pub x: f32,
    /// Y position in surface space.
    pub y: f32,
    /// Rotation in radians.
    pub rotation: f32,
    /// Rendered width in surface units.
    pub width: f32,
    /// Rendered height in surface units.
    pub height: f32,
    /// Source image id (index into the manifest).
    pub image: f32,
    /// Opacity (0.0 = invisible, 1.0 = opaque).
    pub alpha: f32,
    pub _pad: f32,
}

impl ParticleInstance {
    pub const FLOATS: usize = 8;
}

/// Snapshot of everything currently displayed, rebuilt from the session's
/// live-particle list each frame. Because the buffer is regenerated rather
/// than patched, a retired particle disappears from display with no extra
/// bookkeeping.
pub struct SnapshotBuffer {
    instances: Vec<ParticleInstance>,
}

impl SnapshotBuffer {
    pub fn new() -> Self {
        Self {
            instances: Vec::with_capacity(128),
        }
    }

    /// Rebuild the snapshot from the session's live particles.
    pub fn write(&mut self, session: &SimulationSession) {
        self.instances.clear();
        for p in session.live_particles() {
            self.instances.push(ParticleInstance {
                x: p.pos.x,
                y: p.pos.y,
                rotation: p.rotation,
                width: p.size.x,
                height: p.size.y,
                image: p.image.id.0 as f32,
                alpha: 1.0,
                _pad: 0.0,
            });
        }
    }

    pub fn instances(&self) -> &[ParticleInstance] {
        &self.instances
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }
}

impl Default for SnapshotBuffer {
    fn default() -> Self {
        Self::new()
    }
}
