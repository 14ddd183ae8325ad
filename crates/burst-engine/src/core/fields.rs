use std::collections::HashMap;

use glam::Vec2;

use crate::api::types::ParticleId;

/// Divisor applied to a tether's rest length on every simulation step.
/// Produces a gradual pull-toward-anchor ease instead of an instant snap.
pub const TETHER_EASE: f32 = 1.01;

/// Handle to a registered force field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldId(pub u32);

/// Which edge of the surface a boundary wall guards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallEdge {
    Left,
    Right,
    Bottom,
}

/// The effect a force field applies to its member particles.
#[derive(Debug, Clone)]
pub enum FieldKind {
    /// Constant downward pull, applied as force = mass × accel each step.
    Pull { accel: Vec2 },
    /// Boundary wall. The static collider does the physical stopping;
    /// the member set is registry state released at retirement.
    Wall { edge: WallEdge },
    /// One-shot launch impulse. Fires on the first step after registration,
    /// then stays registered but inert until released.
    Impulse {
        direction: Vec2,
        magnitude: f32,
        fired: bool,
    },
    /// Drag-follow tether toward an anchor. The rest length shrinks by
    /// TETHER_EASE every step, easing the particle toward the anchor.
    Tether { anchor: Vec2, length: f32 },
}

/// A registered force field and the particles it currently applies to.
#[derive(Debug, Clone)]
pub struct ForceField {
    pub kind: FieldKind,
    pub members: Vec<ParticleId>,
}

/// Registry of all live force fields, owned by the session.
///
/// This replaces the original pattern of attaching behavior handles to
/// foreign display objects: particles are plain ids here, and every field a
/// particle is subject to can be found (and released) through this registry.
pub struct FieldRegistry {
    fields: HashMap<FieldId, ForceField>,
    next_id: u32,
}

impl FieldRegistry {
    pub fn new() -> Self {
        Self {
            fields: HashMap::new(),
            next_id: 1,
        }
    }

    /// Register a new field with no members. Returns its handle.
    pub fn register(&mut self, kind: FieldKind) -> FieldId {
        let id = FieldId(self.next_id);
        self.next_id += 1;
        self.fields.insert(
            id,
            ForceField {
                kind,
                members: Vec::new(),
            },
        );
        id
    }

    /// Remove a field from the registry. Returns the removed field if found.
    pub fn unregister(&mut self, id: FieldId) -> Option<ForceField> {
        self.fields.remove(&id)
    }

    pub fn get(&self, id: FieldId) -> Option<&ForceField> {
        self.fields.get(&id)
    }

    pub fn get_mut(&mut self, id: FieldId) -> Option<&mut ForceField> {
        self.fields.get_mut(&id)
    }

    /// Add a particle to a field's member set. No-op if the field is gone or
    /// the particle is already a member.
    pub fn add_member(&mut self, id: FieldId, particle: ParticleId) {
        if let Some(field) = self.fields.get_mut(&id) {
            if !field.members.contains(&particle) {
                field.members.push(particle);
            }
        }
    }

    /// Remove a particle from a field's member set. No-op if absent.
    pub fn remove_member(&mut self, id: FieldId, particle: ParticleId) {
        if let Some(field) = self.fields.get_mut(&id) {
            field.members.retain(|m| *m != particle);
        }
    }

    /// Whether a particle is in a field's member set.
    pub fn is_member(&self, id: FieldId, particle: ParticleId) -> bool {
        self.fields
            .get(&id)
            .map(|f| f.members.contains(&particle))
            .unwrap_or(false)
    }

    /// Number of fields whose member set references the particle.
    /// A retired particle must be referenced by zero fields.
    pub fn fields_referencing(&self, particle: ParticleId) -> usize {
        self.fields
            .values()
            .filter(|f| f.members.contains(&particle))
            .count()
    }

    /// Total registered field count.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldId, &ForceField)> {
        self.fields.iter().map(|(id, f)| (*id, f))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (FieldId, &mut ForceField)> {
        self.fields.iter_mut().map(|(id, f)| (*id, f))
    }
}

impl Default for FieldRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_and_unregister() {
        let mut reg = FieldRegistry::new();
        let id = reg.register(FieldKind::Pull {
            accel: Vec2::new(0.0, 1000.0),
        });
        assert_eq!(reg.len(), 1);
        assert!(reg.get(id).is_some());
        let removed = reg.unregister(id).unwrap();
        assert!(matches!(removed.kind, FieldKind::Pull { .. }));
        assert!(reg.is_empty());
    }

    #[test]
    fn membership_is_deduplicated() {
        let mut reg = FieldRegistry::new();
        let id = reg.register(FieldKind::Wall {
            edge: WallEdge::Left,
        });
        let p = ParticleId(7);
        reg.add_member(id, p);
        reg.add_member(id, p);
        assert_eq!(reg.get(id).unwrap().members.len(), 1);
        reg.remove_member(id, p);
        assert!(!reg.is_member(id, p));
    }

    #[test]
    fn fields_referencing_counts_all_fields() {
        let mut reg = FieldRegistry::new();
        let pull = reg.register(FieldKind::Pull { accel: Vec2::ZERO });
        let wall = reg.register(FieldKind::Wall {
            edge: WallEdge::Right,
        });
        let p = ParticleId(1);
        reg.add_member(pull, p);
        reg.add_member(wall, p);
        assert_eq!(reg.fields_referencing(p), 2);
        reg.remove_member(pull, p);
        assert_eq!(reg.fields_referencing(p), 1);
    }

    #[test]
    fn operations_on_missing_field_are_noops() {
        let mut reg = FieldRegistry::new();
        let ghost = FieldId(99);
        reg.add_member(ghost, ParticleId(1));
        reg.remove_member(ghost, ParticleId(1));
        assert!(!reg.is_member(ghost, ParticleId(1)));
        assert!(reg.unregister(ghost).is_none());
    }
}
