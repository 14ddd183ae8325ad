use glam::Vec2;

use crate::assets::registry::ImageRef;
use crate::components::particle::{Particle, BURST_TAG};

/// Particles render at 10% of the source image's native size.
pub const PARTICLE_SCALE: f32 = 0.1;

/// Build a batch of `count` burst particles centered at `center`, each scaled
/// to 10% of the image's native size and tagged as burst-managed.
///
/// Pure construction: nothing here touches the simulation. The batch is
/// attached to a session via `SimulationSession::spawn`.
pub fn spawn_batch(count: usize, image: &ImageRef, center: Vec2) -> Vec<Particle> {
    (0..count)
        .map(|_| {
            Particle::new(image.clone())
                .with_tag(BURST_TAG)
                .with_pos(center)
                .with_size(image.native_size * PARTICLE_SCALE)
        })
        .collect()
}
