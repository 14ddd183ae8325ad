/// Unique identifier for a particle living in a simulation session.
///
/// Assigned by the session at spawn time and stable until the particle is
/// retired. Field membership and the auxiliary-handle side table are keyed
/// by this id, never by pointer identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ParticleId(pub u32);
