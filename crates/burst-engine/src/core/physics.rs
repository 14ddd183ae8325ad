use glam::Vec2;
use rapier2d::na;
use rapier2d::prelude::*;

// ---------------------------------------------------------------------------
// Conversion helpers (private) — glam ↔ nalgebra
// ---------------------------------------------------------------------------

fn vec2_to_na(v: Vec2) -> na::Vector2<f32> {
    na::Vector2::new(v.x, v.y)
}

fn na_to_vec2(v: &na::Vector2<f32>) -> Vec2 {
    Vec2::new(v.x, v.y)
}

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// The kind of rigid body. Particles are dynamic; boundary walls are fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyType {
    Dynamic,
    Fixed,
}

impl BodyType {
    fn to_rapier(self) -> RigidBodyType {
        match self {
            BodyType::Dynamic => RigidBodyType::Dynamic,
            BodyType::Fixed => RigidBodyType::Fixed,
        }
    }
}

/// Shape description for a collider.
#[derive(Debug, Clone, Copy)]
pub enum ColliderDesc {
    Ball { radius: f32 },
    Cuboid { half_width: f32, half_height: f32 },
}

impl ColliderDesc {
    fn build_collider(&self) -> ColliderBuilder {
        match *self {
            ColliderDesc::Ball { radius } => ColliderBuilder::ball(radius),
            ColliderDesc::Cuboid {
                half_width,
                half_height,
            } => ColliderBuilder::cuboid(half_width, half_height),
        }
    }
}

/// Physical material properties for a collider.
#[derive(Debug, Clone, Copy)]
pub struct ColliderMaterial {
    pub restitution: f32,
    pub friction: f32,
    pub density: f32,
}

impl Default for ColliderMaterial {
    fn default() -> Self {
        Self {
            restitution: 0.3,
            friction: 0.5,
            density: 1.0,
        }
    }
}

/// Builder for describing a rigid body before creation.
#[derive(Debug, Clone)]
pub struct BodyDesc {
    pub body_type: BodyType,
    pub position: Vec2,
    pub velocity: Vec2,
    pub collider: ColliderDesc,
}

impl BodyDesc {
    /// Create a dynamic body description with the given collider shape.
    pub fn dynamic(collider: ColliderDesc) -> Self {
        Self {
            body_type: BodyType::Dynamic,
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            collider,
        }
    }

    /// Create a fixed (static) body description with the given collider shape.
    pub fn fixed(collider: ColliderDesc) -> Self {
        Self {
            body_type: BodyType::Fixed,
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            collider,
        }
    }

    pub fn with_position(mut self, pos: Vec2) -> Self {
        self.position = pos;
        self
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.velocity = vel;
        self
    }
}

/// Handle pair referencing Rapier internals, stored on a Particle.
#[derive(Debug, Clone, Copy)]
pub struct PhysicsBody {
    pub body_handle: RigidBodyHandle,
    pub collider_handle: ColliderHandle,
}

// ---------------------------------------------------------------------------
// PhysicsWorld
// ---------------------------------------------------------------------------

/// Wraps all Rapier2D boilerplate into a single, easy-to-use struct.
///
/// The session drives all acceleration through explicit force fields, so it
/// constructs the world with zero global gravity; the gravity parameter is
/// kept for tests and non-field uses.
pub struct PhysicsWorld {
    gravity: na::Vector2<f32>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
}

impl PhysicsWorld {
    /// Create a new physics world with the given gravity vector.
    /// Y-down coordinate system: positive Y is downward.
    pub fn new(gravity: Vec2) -> Self {
        Self {
            gravity: vec2_to_na(gravity),
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
        }
    }

    /// Set the integration timestep.
    pub fn set_dt(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;
    }

    /// Create a rigid body + collider and return handles.
    pub fn create_body(&mut self, desc: &BodyDesc, material: ColliderMaterial) -> PhysicsBody {
        let rb = RigidBodyBuilder::new(desc.body_type.to_rapier())
            .translation(vec2_to_na(desc.position))
            .linvel(vec2_to_na(desc.velocity))
            .build();

        let body_handle = self.bodies.insert(rb);

        let collider = desc
            .collider
            .build_collider()
            .restitution(material.restitution)
            .friction(material.friction)
            .density(material.density)
            .build();

        let collider_handle =
            self.colliders
                .insert_with_parent(collider, body_handle, &mut self.bodies);

        PhysicsBody {
            body_handle,
            collider_handle,
        }
    }

    /// Remove a body and all its colliders from the simulation.
    pub fn remove_body(&mut self, body: &PhysicsBody) {
        self.bodies.remove(
            body.body_handle,
            &mut self.island_manager,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
    }

    /// Step the simulation by one fixed timestep.
    pub fn step(&mut self) {
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );
    }

    /// Apply a force to a body. Rapier accumulates user forces across steps,
    /// so callers pair this with `reset_forces` each frame.
    pub fn apply_force(&mut self, body: &PhysicsBody, force: Vec2) {
        if let Some(rb) = self.bodies.get_mut(body.body_handle) {
            rb.add_force(vec2_to_na(force), true);
        }
    }

    /// Clear the accumulated user forces on a body.
    pub fn reset_forces(&mut self, body: &PhysicsBody) {
        if let Some(rb) = self.bodies.get_mut(body.body_handle) {
            rb.reset_forces(true);
        }
    }

    /// Apply an instantaneous impulse to a body.
    pub fn apply_impulse(&mut self, body: &PhysicsBody, impulse: Vec2) {
        if let Some(rb) = self.bodies.get_mut(body.body_handle) {
            rb.apply_impulse(vec2_to_na(impulse), true);
        }
    }

    /// Get the current linear velocity of a body.
    pub fn velocity(&self, body: &PhysicsBody) -> Vec2 {
        self.bodies
            .get(body.body_handle)
            .map(|rb| na_to_vec2(rb.linvel()))
            .unwrap_or(Vec2::ZERO)
    }

    /// Get the current position and rotation of a body.
    pub fn body_position(&self, body: &PhysicsBody) -> (Vec2, f32) {
        self.bodies
            .get(body.body_handle)
            .map(|rb| {
                let iso = rb.position();
                (
                    Vec2::new(iso.translation.x, iso.translation.y),
                    iso.rotation.angle(),
                )
            })
            .unwrap_or((Vec2::ZERO, 0.0))
    }

    /// Teleport a body to a new position, keeping its velocity.
    pub fn set_position(&mut self, body: &PhysicsBody, pos: Vec2) {
        if let Some(rb) = self.bodies.get_mut(body.body_handle) {
            rb.set_translation(vec2_to_na(pos), true);
        }
    }

    /// Mass of a body (colliders' density × area).
    pub fn mass(&self, body: &PhysicsBody) -> f32 {
        self.bodies
            .get(body.body_handle)
            .map(|rb| rb.mass())
            .unwrap_or(0.0)
    }

    /// Number of rigid bodies in the simulation.
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
