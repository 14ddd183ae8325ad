use crate::api::types::ParticleId;
use crate::core::session::SimulationSession;

/// Retire every particle that has left the visible region, releasing all of
/// its per-particle force fields before the particle itself is discarded.
///
/// Invoked by `SimulationSession::step` after integration. The threshold is
/// strict: a particle sitting exactly on the bottom edge is still visible,
/// one unit below it is not. Retirement order within a step is unspecified.
///
/// Returns the number of particles retired.
pub fn sweep_retired(session: &mut SimulationSession) -> usize {
    let height = session.bounds.height;
    let retired: Vec<ParticleId> = session
        .particles
        .iter()
        .filter(|p| p.pos.y > height)
        .map(|p| p.id)
        .collect();
    for id in &retired {
        retire(session, *id);
    }
    retired.len()
}

/// Tear down one particle: release its impulse and tether fields, drop it
/// from every persistent field's member set, remove its body, and discard it.
/// After this no field in the registry references the particle.
fn retire(session: &mut SimulationSession, id: ParticleId) {
    let Some(aux) = session.aux.remove(&id) else {
        return;
    };
    if let Some(impulse) = aux.impulse {
        session.fields.unregister(impulse);
    }
    if let Some(tether) = aux.tether {
        session.fields.unregister(tether);
    }
    session.fields.remove_member(session.pull_field, id);
    for wall in &session.wall_fields {
        session.fields.remove_member(*wall, id);
    }
    if let Some(index) = session.particles.iter().position(|p| p.id == id) {
        let particle = session.particles.swap_remove(index);
        if let Some(body) = &particle.body {
            session.physics.remove_body(body);
        }
    }
    log::debug!("retired particle {:?}", id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::registry::{ImageId, ImageRef};
    use crate::core::session::{SessionConfig, SurfaceBounds};
    use crate::systems::drag::DragManager;
    use crate::systems::spawn::spawn_batch;
    use glam::Vec2;

    fn image() -> ImageRef {
        ImageRef {
            id: ImageId(0),
            native_size: Vec2::new(100.0, 100.0),
        }
    }

    fn quiet_session() -> SimulationSession {
        SimulationSession::new(
            SurfaceBounds {
                width: 400.0,
                height: 800.0,
            },
            SessionConfig {
                pull_accel: Vec2::ZERO,
                impulse_magnitude: 0.0,
                launch_jitter: false,
                ..SessionConfig::default()
            },
        )
    }

    #[test]
    fn particle_below_bottom_edge_is_fully_retired() {
        let mut session = quiet_session();
        let origin = Vec2::new(200.0, 400.0);
        let ids = session.spawn(spawn_batch(3, &image(), origin), origin);

        session.teleport_particle(ids[1], Vec2::new(200.0, 801.0));
        let retired = sweep_retired(&mut session);

        assert_eq!(retired, 1);
        assert_eq!(session.live_particle_count(), 2);
        assert!(session.particle(ids[1]).is_none());
        assert!(session.aux_fields(ids[1]).is_none());
        assert_eq!(session.fields().fields_referencing(ids[1]), 0);
        // 3 persistent + 2 surviving impulses
        assert_eq!(session.field_count(), 5);
        // the survivors keep their associations
        assert_eq!(session.fields().fields_referencing(ids[0]), 4);
        assert_eq!(session.fields().fields_referencing(ids[2]), 4);
    }

    #[test]
    fn particle_exactly_on_bottom_edge_stays() {
        let mut session = quiet_session();
        let origin = Vec2::new(200.0, 400.0);
        let ids = session.spawn(spawn_batch(1, &image(), origin), origin);

        session.teleport_particle(ids[0], Vec2::new(200.0, 800.0));
        assert_eq!(sweep_retired(&mut session), 0);
        assert_eq!(session.live_particle_count(), 1);

        session.teleport_particle(ids[0], Vec2::new(200.0, 801.0));
        assert_eq!(sweep_retired(&mut session), 1);
        assert_eq!(session.live_particle_count(), 0);
    }

    #[test]
    fn retirement_releases_a_live_tether() {
        let mut session = quiet_session();
        let origin = Vec2::new(200.0, 400.0);
        let ids = session.spawn(spawn_batch(1, &image(), origin), origin);

        let mut drag = DragManager::new();
        drag.sample(&mut session, Vec2::new(300.0, 300.0));
        // pull + 2 walls + impulse + tether
        assert_eq!(session.field_count(), 5);

        session.teleport_particle(ids[0], Vec2::new(200.0, 900.0));
        assert_eq!(sweep_retired(&mut session), 1);

        assert_eq!(session.field_count(), 3);
        assert_eq!(session.fields().fields_referencing(ids[0]), 0);
    }

    #[test]
    fn burst_eventually_retires_through_stepping() {
        let mut session = SimulationSession::new(
            SurfaceBounds {
                width: 400.0,
                height: 300.0,
            },
            SessionConfig::default(),
        );
        let origin = Vec2::new(200.0, 150.0);
        session.spawn(spawn_batch(6, &image(), origin), origin);
        assert_eq!(session.field_count(), 9);

        let mut steps = 0;
        while session.live_particle_count() > 0 && steps < 2000 {
            session.step();
            steps += 1;
        }

        assert_eq!(session.live_particle_count(), 0, "after {} steps", steps);
        // Only the persistent fields remain: no leaked impulses or tethers
        assert_eq!(session.field_count(), 3);
        // walls are the only bodies left
        assert_eq!(session.body_count(), 2);
    }
}
