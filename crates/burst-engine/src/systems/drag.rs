use glam::Vec2;

use crate::core::fields::FieldKind;
use crate::core::session::SimulationSession;

/// Manages the transient drag-follow tethers between the pointer and all
/// live burst particles.
///
/// Tethers are scoped to a single gesture: created on the first move sample,
/// retargeted (never duplicated) on every subsequent sample, and released on
/// pointer up. A tether's rest length starts at the particle's current
/// distance from the anchor and is eased toward zero by the session's step.
pub struct DragManager {
    anchor: Option<Vec2>,
}

impl DragManager {
    pub fn new() -> Self {
        Self { anchor: None }
    }

    /// Whether a gesture is currently holding tethers.
    pub fn is_active(&self) -> bool {
        self.anchor.is_some()
    }

    /// The latest pointer location, if a gesture is active.
    pub fn anchor(&self) -> Option<Vec2> {
        self.anchor
    }

    /// Feed one pointer-move sample. Retargets every existing tether to the
    /// new location and tethers any burst particle that lacks one.
    pub fn sample(&mut self, session: &mut SimulationSession, point: Vec2) {
        self.anchor = Some(point);

        let mut created = 0usize;
        for i in 0..session.particles.len() {
            if !session.particles[i].is_burst() {
                continue;
            }
            let id = session.particles[i].id;
            let Some(aux) = session.aux.get_mut(&id) else {
                continue;
            };
            if let Some(tether) = aux.tether {
                // Already tethered: move the anchor, keep the rest length.
                if let Some(field) = session.fields.get_mut(tether) {
                    if let FieldKind::Tether { anchor, .. } = &mut field.kind {
                        *anchor = point;
                    }
                }
            } else {
                let length = (session.particles[i].pos - point).length();
                let tether = session.fields.register(FieldKind::Tether {
                    anchor: point,
                    length,
                });
                session.fields.add_member(tether, id);
                aux.tether = Some(tether);
                created += 1;
            }
        }
        if created > 0 {
            log::debug!("tethered {} particles to ({}, {})", created, point.x, point.y);
        }
    }

    /// End the gesture: release every tether from the simulation and clear
    /// the recorded handles.
    pub fn release(&mut self, session: &mut SimulationSession) {
        self.anchor = None;
        let mut released = 0usize;
        for aux in session.aux.values_mut() {
            if let Some(tether) = aux.tether.take() {
                session.fields.unregister(tether);
                released += 1;
            }
        }
        if released > 0 {
            log::debug!("released {} tethers", released);
        }
    }
}

impl Default for DragManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::registry::{ImageId, ImageRef};
    use crate::core::session::{SessionConfig, SurfaceBounds};
    use crate::systems::spawn::spawn_batch;

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

    fn tether_state(session: &SimulationSession, id: crate::ParticleId) -> (Vec2, f32) {
        let tether = session.aux_fields(id).unwrap().tether.unwrap();
        match session.fields().get(tether).unwrap().kind {
            FieldKind::Tether { anchor, length } => (anchor, length),
            ref other => panic!("expected tether, got {:?}", other),
        }
    }

    #[test]
    fn first_sample_tethers_every_live_particle() {
        let mut session = quiet_session();
        let origin = Vec2::new(200.0, 400.0);
        let ids = session.spawn(spawn_batch(3, &image(), origin), origin);

        let mut drag = DragManager::new();
        let point = Vec2::new(260.0, 320.0);
        drag.sample(&mut session, point);

        assert!(drag.is_active());
        assert_eq!(drag.anchor(), Some(point));
        // 3 persistent + 3 impulses + 3 tethers
        assert_eq!(session.field_count(), 9);
        for id in &ids {
            let (anchor, length) = tether_state(&session, *id);
            assert_eq!(anchor, point);
            assert!((length - (origin - point).length()).abs() < 1e-4);
        }
    }

    #[test]
    fn second_sample_retargets_instead_of_duplicating() {
        let mut session = quiet_session();
        let origin = Vec2::new(200.0, 400.0);
        let ids = session.spawn(spawn_batch(2, &image(), origin), origin);

        let mut drag = DragManager::new();
        drag.sample(&mut session, Vec2::new(250.0, 350.0));
        let first: Vec<_> = ids
            .iter()
            .map(|id| session.aux_fields(*id).unwrap().tether.unwrap())
            .collect();
        let count_after_first = session.field_count();

        let point = Vec2::new(120.0, 500.0);
        drag.sample(&mut session, point);

        assert_eq!(session.field_count(), count_after_first);
        for (id, old) in ids.iter().zip(first) {
            let aux = session.aux_fields(*id).unwrap();
            assert_eq!(aux.tether.unwrap(), old, "tether handle must be stable");
            let (anchor, _) = tether_state(&session, *id);
            assert_eq!(anchor, point);
        }
    }

    #[test]
    fn release_removes_every_tether() {
        let mut session = quiet_session();
        let origin = Vec2::new(200.0, 400.0);
        let ids = session.spawn(spawn_batch(3, &image(), origin), origin);

        let mut drag = DragManager::new();
        drag.sample(&mut session, Vec2::new(100.0, 100.0));
        assert_eq!(session.field_count(), 9);

        drag.release(&mut session);
        assert!(!drag.is_active());
        assert_eq!(drag.anchor(), None);
        assert_eq!(session.field_count(), 6);
        for id in &ids {
            assert!(session.aux_fields(*id).unwrap().tether.is_none());
            // pull + 2 walls + impulse remain
            assert_eq!(session.fields().fields_referencing(*id), 4);
        }
    }

    #[test]
    fn particles_spawned_mid_gesture_get_tethered_on_next_sample() {
        let mut session = quiet_session();
        let origin = Vec2::new(200.0, 400.0);
        session.spawn(spawn_batch(1, &image(), origin), origin);

        let mut drag = DragManager::new();
        drag.sample(&mut session, Vec2::new(150.0, 150.0));

        let late = session.spawn(spawn_batch(1, &image(), origin), origin);
        assert!(session.aux_fields(late[0]).unwrap().tether.is_none());

        drag.sample(&mut session, Vec2::new(160.0, 150.0));
        assert!(session.aux_fields(late[0]).unwrap().tether.is_some());
    }

    #[test]
    fn step_eases_rest_length_geometrically() {
        let mut session = quiet_session();
        let origin = Vec2::new(200.0, 400.0);
        let ids = session.spawn(spawn_batch(1, &image(), origin), origin);

        let mut drag = DragManager::new();
        drag.sample(&mut session, Vec2::new(200.0, 200.0));
        let (_, before) = tether_state(&session, ids[0]);
        assert!((before - 200.0).abs() < 1e-4);

        session.step();
        let (_, after) = tether_state(&session, ids[0]);
        assert!((after - before / 1.01).abs() < 1e-3);
    }

    #[test]
    fn tether_pulls_particle_toward_anchor() {
        let mut session = SimulationSession::new(
            SurfaceBounds {
                width: 1000.0,
                height: 1000.0,
            },
            SessionConfig {
                pull_accel: Vec2::ZERO,
                impulse_magnitude: 0.0,
                launch_jitter: false,
                tether_stiffness: 50.0,
                ..SessionConfig::default()
            },
        );
        let origin = Vec2::new(100.0, 500.0);
        let ids = session.spawn(spawn_batch(1, &image(), origin), origin);

        let mut drag = DragManager::new();
        drag.sample(&mut session, Vec2::new(600.0, 500.0));

        for _ in 0..120 {
            session.step();
        }
        let p = session.particle(ids[0]).expect("still live");
        assert!(
            p.pos.x > origin.x + 10.0,
            "should have moved toward the anchor: x={}",
            p.pos.x
        );
    }
}
