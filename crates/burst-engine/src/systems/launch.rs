use glam::Vec2;

use crate::systems::rng::Rng;

/// Left edge of the horizontal launch range.
pub const X_START: f32 = -0.75;
/// Right edge of the horizontal launch range.
pub const X_END: f32 = 0.75;

/// Width of one partition segment for a burst of `n` particles.
/// The range is split into `2n` segments so adjacent indices can be
/// interleaved to opposite sides of center.
pub fn partition_width(n: usize) -> f32 {
    debug_assert!(n > 0, "partition_width requires a non-empty burst");
    (X_END - X_START) / (2.0 * n as f32)
}

/// Deterministic launch direction for particle `i` of a burst of `n`.
///
/// Even indices walk forward from the left edge, odd indices walk backward
/// from the right edge, so consecutive particles fly to opposite sides and
/// the burst reads wider than a simple left-to-right sweep. The vertical
/// component is exactly -1 (upward, Y-down coordinates).
pub fn launch_direction(i: usize, n: usize) -> Vec2 {
    debug_assert!(n > 0, "launch_direction requires a non-empty burst");
    debug_assert!(i < n, "particle index {} out of burst of {}", i, n);
    let distance = partition_width(n);
    let x = if i % 2 == 0 {
        X_START + distance * i as f32
    } else {
        X_END - distance * i as f32
    };
    Vec2::new(x, -1.0)
}

/// Launch direction with controlled randomness, so a burst doesn't look
/// mechanically symmetric. Horizontal jitter stays within half a partition
/// segment of the deterministic value; the vertical component is uniform in
/// [-1, 0].
pub fn launch_direction_jittered(i: usize, n: usize, rng: &mut Rng) -> Vec2 {
    let base = launch_direction(i, n);
    let half = partition_width(n) / 2.0;
    let x = base.x + rng.next_range(-half, half);
    let y = rng.next_range(-1.0, 0.0);
    Vec2::new(x, y)
}
