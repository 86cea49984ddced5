use crate::core::Ring;
use rand::Rng;

/// Advance the ring by one Nagel-Schreckenberg timestep.
///
/// The update is simultaneous across particles and runs in two explicit
/// passes:
///
/// 1. **Velocity pass**. For every particle `i`, against the pre-step
///    position snapshot only (positions are untouched in this pass, so the
///    successor's position read here is always pre-step state):
///    - accelerate: `v = min(v + 1, v_max)`;
///    - keep distance: `v = min(v, gap)`, where `gap` counts the empty
///      cells to the cyclic successor; this cap is what makes passing and
///      overlap impossible, for every `v_max` and every `p_slow`;
///    - random slowdown: with probability `p_slow`, `v = max(v - 1, 0)`.
/// 2. **Position pass**. Only after every velocity is final, each
///    particle moves by its velocity, modulo the ring size.
///
/// Returns the sum of the post-update velocities, i.e. the number of
/// cell-advances performed this step; the caller accumulates these into a
/// flow estimate. An empty ring is a no-op returning 0.
///
/// One uniform draw in `[0, 1)` is consumed per particle per step,
/// whatever `p_slow` is, so a fixed seed fixes the whole trajectory.
pub fn step<R: Rng + ?Sized>(ring: &mut Ring, v_max: u32, p_slow: f64, rng: &mut R) -> u64 {
    if ring.is_empty() {
        return 0;
    }
    let cells = ring.cells();
    let n = ring.len();

    // Phase 1: velocities, reading only pre-step positions.
    for i in 0..n {
        let gap = ring.gap_ahead(i);
        let p = &mut ring.particles_mut()[i];
        let mut v = (p.velocity + 1).min(v_max);
        v = v.min(gap);
        if rng.random::<f64>() < p_slow {
            v = v.saturating_sub(1);
        }
        p.velocity = v;
    }

    // Phase 2: commit every position at once.
    let mut motion: u64 = 0;
    for p in ring.particles_mut() {
        p.advance(cells);
        motion += u64::from(p.velocity);
    }
    motion
}
