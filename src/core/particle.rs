/// A vehicle on the ring, occupying exactly one cell.
///
/// Fields:
/// - `position`: cell index in `[0, N)` where `N` is the ring size
/// - `velocity`: cells advanced per step, in `[0, v_max]`
///
/// Both bounds are contextual (they depend on the ring the particle lives
/// on), so they are owned and enforced by [`Ring`](crate::core::Ring);
/// a `Particle` by itself is plain data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Particle {
    /// Occupied cell index.
    pub position: u32,
    /// Current speed in cells per step.
    pub velocity: u32,
}

impl Particle {
    /// Create a particle at `position` with the given `velocity`.
    #[inline]
    pub fn new(position: u32, velocity: u32) -> Self {
        Self { position, velocity }
    }

    /// Create a stopped particle at `position` (the initial state of
    /// every vehicle at simulation start).
    #[inline]
    pub fn at_rest(position: u32) -> Self {
        Self::new(position, 0)
    }

    /// Move the particle by its current velocity on a ring of `cells`
    /// cells, wrapping around the periodic boundary.
    #[inline]
    pub fn advance(&mut self, cells: u32) {
        // Widened so `position + velocity` cannot wrap near u32::MAX.
        self.position = ((u64::from(self.position) + u64::from(self.velocity))
            % u64::from(cells)) as u32;
    }
}
