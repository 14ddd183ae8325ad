use std::collections::HashMap;

use glam::Vec2;

use crate::api::types::ParticleId;
use crate::components::particle::Particle;
use crate::core::fields::{FieldId, FieldKind, FieldRegistry, WallEdge, TETHER_EASE};
use crate::core::physics::{BodyDesc, ColliderDesc, ColliderMaterial, PhysicsWorld};
use crate::systems::launch::{launch_direction, launch_direction_jittered};
use crate::systems::rng::Rng;
use crate::systems::sweep::sweep_retired;

/// Visible region of the display surface. Origin at the top-left, Y down.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceBounds {
    pub width: f32,
    pub height: f32,
}

/// Tuning knobs for a simulation session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Constant pull acceleration applied to every live particle (Y down).
    pub pull_accel: Vec2,
    /// Launch impulse strength, as a velocity change along the launch
    /// direction (scaled by body mass internally, so burst speed does not
    /// depend on particle size).
    pub impulse_magnitude: f32,
    /// Tether spring acceleration per unit of overshoot beyond rest length.
    pub tether_stiffness: f32,
    /// Tether velocity damping while attached.
    pub tether_damping: f32,
    /// Whether launch directions get random jitter. Disable for
    /// deterministic, symmetric bursts.
    pub launch_jitter: bool,
    /// Also wall off the bottom edge, trapping particles on screen instead
    /// of letting them fall out and retire.
    pub confine_bottom: bool,
    /// Thickness of the boundary-wall colliders.
    pub wall_thickness: f32,
    /// Seed for the launch-jitter rng.
    pub rng_seed: u64,
    /// Fixed timestep in seconds.
    pub dt: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            pull_accel: Vec2::new(0.0, 1000.0),
            impulse_magnitude: 350.0,
            tether_stiffness: 30.0,
            tether_damping: 4.0,
            launch_jitter: true,
            confine_bottom: false,
            wall_thickness: 20.0,
            rng_seed: 42,
            dt: 1.0 / 60.0,
        }
    }
}

/// Per-particle auxiliary field handles — the explicit side table replacing
/// host-managed associated objects. At most one impulse and one tether per
/// particle at any time.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParticleFields {
    pub impulse: Option<FieldId>,
    pub tether: Option<FieldId>,
}

/// Owns the physics world, the force-field registry, the live-particle list
/// and the auxiliary-handle side table.
///
/// Single-threaded and run-to-completion: input samples and step ticks are
/// the only two callers, and neither reenters the other.
pub struct SimulationSession {
    pub(crate) bounds: SurfaceBounds,
    pub(crate) config: SessionConfig,
    pub(crate) physics: PhysicsWorld,
    pub(crate) fields: FieldRegistry,
    pub(crate) particles: Vec<Particle>,
    pub(crate) aux: HashMap<ParticleId, ParticleFields>,
    pub(crate) pull_field: FieldId,
    pub(crate) wall_fields: Vec<FieldId>,
    next_particle_id: u32,
    rng: Rng,
}

impl SimulationSession {
    /// Create a session bound to the given surface. Registers the constant
    /// pull field and the boundary walls exactly once; all three (or four,
    /// with `confine_bottom`) persist for the session's entire lifetime.
    ///
    /// Zero-area bounds are accepted: the walls degenerate to coincident
    /// segments and nothing corrects for it.
    pub fn new(bounds: SurfaceBounds, config: SessionConfig) -> Self {
        // World gravity stays zero: the pull field applies acceleration
        // explicitly so that field membership is what makes particles fall.
        let mut physics = PhysicsWorld::new(Vec2::ZERO);
        physics.set_dt(config.dt);

        let mut fields = FieldRegistry::new();
        let pull_field = fields.register(FieldKind::Pull {
            accel: config.pull_accel,
        });

        let mut edges = vec![WallEdge::Left, WallEdge::Right];
        if config.confine_bottom {
            edges.push(WallEdge::Bottom);
        }
        let t = config.wall_thickness;
        let mut wall_fields = Vec::with_capacity(edges.len());
        for edge in edges {
            let (center, half_width, half_height) = match edge {
                WallEdge::Left => (
                    Vec2::new(-t / 2.0, bounds.height / 2.0),
                    t / 2.0,
                    bounds.height / 2.0,
                ),
                WallEdge::Right => (
                    Vec2::new(bounds.width + t / 2.0, bounds.height / 2.0),
                    t / 2.0,
                    bounds.height / 2.0,
                ),
                WallEdge::Bottom => (
                    Vec2::new(bounds.width / 2.0, bounds.height + t / 2.0),
                    bounds.width / 2.0 + t,
                    t / 2.0,
                ),
            };
            physics.create_body(
                &BodyDesc::fixed(ColliderDesc::Cuboid {
                    half_width,
                    half_height,
                })
                .with_position(center),
                ColliderMaterial::default(),
            );
            wall_fields.push(fields.register(FieldKind::Wall { edge }));
        }

        log::info!(
            "session initialized: {}x{} surface, {} boundary walls",
            bounds.width,
            bounds.height,
            wall_fields.len()
        );

        Self {
            bounds,
            rng: Rng::new(config.rng_seed),
            config,
            physics,
            fields,
            particles: Vec::with_capacity(64),
            aux: HashMap::new(),
            pull_field,
            wall_fields,
            next_particle_id: 1,
        }
    }

    /// Spawn a batch of particles at `origin`. Each particle gets a dynamic
    /// body, joins the pull and wall fields, and receives a one-shot launch
    /// impulse field directed by the partition generator. Returns the ids.
    ///
    /// An empty batch is a no-op (the launch generator is undefined for a
    /// burst of zero).
    pub fn spawn(&mut self, particles: Vec<Particle>, origin: Vec2) -> Vec<ParticleId> {
        if particles.is_empty() {
            return Vec::new();
        }
        let n = particles.len();
        let mut ids = Vec::with_capacity(n);
        for (i, mut particle) in particles.into_iter().enumerate() {
            let id = self.next_particle_id();
            particle.id = id;
            particle.pos = origin;

            let body = self.physics.create_body(
                &BodyDesc::dynamic(ColliderDesc::Cuboid {
                    half_width: particle.size.x / 2.0,
                    half_height: particle.size.y / 2.0,
                })
                .with_position(origin),
                ColliderMaterial::default(),
            );
            particle.body = Some(body);

            self.fields.add_member(self.pull_field, id);
            for wall in &self.wall_fields {
                self.fields.add_member(*wall, id);
            }

            let direction = if self.config.launch_jitter {
                launch_direction_jittered(i, n, &mut self.rng)
            } else {
                launch_direction(i, n)
            };
            let mass = self.physics.mass(&body);
            let impulse = self.fields.register(FieldKind::Impulse {
                direction,
                magnitude: self.config.impulse_magnitude * mass,
                fired: false,
            });
            self.fields.add_member(impulse, id);

            self.aux.insert(
                id,
                ParticleFields {
                    impulse: Some(impulse),
                    tether: None,
                },
            );
            ids.push(id);
            self.particles.push(particle);
        }
        log::debug!(
            "spawned burst of {} at ({}, {})",
            n,
            origin.x,
            origin.y
        );
        ids
    }

    /// Advance the simulation by one step: apply every field to its members,
    /// integrate, sync positions back to particles, then retire everything
    /// that fell below the visible region.
    pub fn step(&mut self) {
        // Rapier accumulates user forces, so clear last frame's first.
        for particle in &self.particles {
            if let Some(body) = &particle.body {
                self.physics.reset_forces(body);
            }
        }

        let stiffness = self.config.tether_stiffness;
        let damping = self.config.tether_damping;
        for (_, field) in self.fields.iter_mut() {
            match &mut field.kind {
                FieldKind::Pull { accel } => {
                    let accel = *accel;
                    for member in &field.members {
                        if let Some(body) =
                            self.particles.iter().find(|p| p.id == *member).and_then(|p| p.body)
                        {
                            let mass = self.physics.mass(&body);
                            self.physics.apply_force(&body, accel * mass);
                        }
                    }
                }
                FieldKind::Impulse {
                    direction,
                    magnitude,
                    fired,
                } => {
                    if !*fired {
                        for member in &field.members {
                            if let Some(body) = self
                                .particles
                                .iter()
                                .find(|p| p.id == *member)
                                .and_then(|p| p.body)
                            {
                                self.physics.apply_impulse(&body, *direction * *magnitude);
                            }
                        }
                        *fired = true;
                    }
                }
                FieldKind::Tether { anchor, length } => {
                    for member in &field.members {
                        if let Some(body) = self
                            .particles
                            .iter()
                            .find(|p| p.id == *member)
                            .and_then(|p| p.body)
                        {
                            let (pos, _) = self.physics.body_position(&body);
                            let to_anchor = *anchor - pos;
                            let dist = to_anchor.length();
                            if dist > *length && dist > f32::EPSILON {
                                let dir = to_anchor / dist;
                                let mass = self.physics.mass(&body);
                                let vel = self.physics.velocity(&body);
                                let force =
                                    (dir * ((dist - *length) * stiffness) - vel * damping) * mass;
                                self.physics.apply_force(&body, force);
                            }
                        }
                    }
                    // Geometric ease toward the anchor.
                    *length /= TETHER_EASE;
                }
                FieldKind::Wall { .. } => {}
            }
        }

        self.physics.step();

        for particle in &mut self.particles {
            if let Some(body) = &particle.body {
                let (pos, rotation) = self.physics.body_position(body);
                particle.pos = pos;
                particle.rotation = rotation;
            }
        }

        sweep_retired(self);
    }

    /// Teleport a particle, keeping its velocity. Mostly useful for scripted
    /// scenarios and tests.
    pub fn teleport_particle(&mut self, id: ParticleId, pos: Vec2) {
        if let Some(particle) = self.particles.iter_mut().find(|p| p.id == id) {
            particle.pos = pos;
            if let Some(body) = &particle.body {
                self.physics.set_position(body, pos);
            }
        }
    }

    /// Current linear velocity of a particle (zero if unknown).
    pub fn particle_velocity(&self, id: ParticleId) -> Vec2 {
        self.particles
            .iter()
            .find(|p| p.id == id)
            .and_then(|p| p.body.as_ref())
            .map(|body| self.physics.velocity(body))
            .unwrap_or(Vec2::ZERO)
    }

    // -- Registry inspection --

    pub fn bounds(&self) -> SurfaceBounds {
        self.bounds
    }

    /// All currently displayed particles.
    pub fn live_particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn live_particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn particle(&self, id: ParticleId) -> Option<&Particle> {
        self.particles.iter().find(|p| p.id == id)
    }

    /// The auxiliary field handles recorded for a particle, if it is live.
    pub fn aux_fields(&self, id: ParticleId) -> Option<ParticleFields> {
        self.aux.get(&id).copied()
    }

    /// Read access to the force-field registry.
    pub fn fields(&self) -> &FieldRegistry {
        &self.fields
    }

    /// Total registered field count (persistent + per-particle).
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Number of rigid bodies in the physics world (particles + walls).
    pub fn body_count(&self) -> usize {
        self.physics.body_count()
    }

    /// Handle of the session-lifetime constant-pull field.
    pub fn pull_field(&self) -> FieldId {
        self.pull_field
    }

    /// Handles of the session-lifetime boundary-wall fields.
    pub fn wall_fields(&self) -> &[FieldId] {
        &self.wall_fields
    }

    fn next_particle_id(&mut self) -> ParticleId {
        let id = ParticleId(self.next_particle_id);
        self.next_particle_id += 1;
        id
    }
}
