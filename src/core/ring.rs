use crate::core::Particle;
use crate::error::{Error, Result};
use rand::seq::index;
use rand::Rng;

/// Periodic 1-D track holding the ordered set of vehicles.
///
/// The particle sequence is kept in cyclic track order: at construction it
/// is sorted by ascending position, and after a particle wraps past cell
/// `N-1` the sequence becomes a rotation of the ascending order. The
/// successor of the last particle is the first. Invariants owned here:
///
/// - all positions are distinct integers in `[0, N)`;
/// - sequence order equals cyclic position order (the step engine never
///   lets a particle pass or land on its successor);
/// - the particle count is fixed for the life of the ring.
#[derive(Debug, Clone)]
pub struct Ring {
    cells: u32,
    particles: Vec<Particle>,
}

impl Ring {
    /// Populate a ring of `cells` cells at the given vehicle density.
    ///
    /// Places `n = floor(density * cells)` stopped particles on distinct
    /// cells drawn uniformly without replacement, sorted ascending.
    /// `density = 0` yields a valid empty ring; `density = 1` fills every
    /// cell.
    ///
    /// Errors:
    /// - `Error::InvalidParam` if `cells` is zero.
    /// - `Error::InvalidDensity` if `density` is NaN or outside `[0, 1]`.
    pub fn with_density<R: Rng + ?Sized>(density: f64, cells: u32, rng: &mut R) -> Result<Self> {
        if cells == 0 {
            return Err(Error::InvalidParam("ring size must be > 0".into()));
        }
        if !density.is_finite() || !(0.0..=1.0).contains(&density) {
            return Err(Error::InvalidDensity(format!(
                "density must be within [0, 1], got {density}"
            )));
        }

        let n = (density * f64::from(cells)).floor() as usize;
        let mut occupied = index::sample(rng, cells as usize, n).into_vec();
        occupied.sort_unstable();

        let particles = occupied
            .into_iter()
            .map(|cell| Particle::at_rest(cell as u32))
            .collect();

        Ok(Self { cells, particles })
    }

    /// Build a ring from explicit particle positions, all stopped.
    ///
    /// Positions must be strictly ascending and within `[0, cells)`; this
    /// is the canonical (unrotated) form of the ordering invariant, and
    /// strict ascent also rules out duplicates.
    ///
    /// Errors:
    /// - `Error::InvalidParam` if `cells` is zero, a position is out of
    ///   range, or the sequence is not strictly ascending.
    pub fn from_positions(cells: u32, positions: &[u32]) -> Result<Self> {
        if cells == 0 {
            return Err(Error::InvalidParam("ring size must be > 0".into()));
        }
        for (i, &pos) in positions.iter().enumerate() {
            if pos >= cells {
                return Err(Error::InvalidParam(format!(
                    "position {pos} is outside the ring of {cells} cells"
                )));
            }
            if i > 0 && positions[i - 1] >= pos {
                return Err(Error::InvalidParam(format!(
                    "positions must be strictly ascending, got {} before {pos}",
                    positions[i - 1]
                )));
            }
        }

        let particles = positions.iter().map(|&p| Particle::at_rest(p)).collect();
        Ok(Self { cells, particles })
    }

    /// Ring size `N` in cells.
    #[inline]
    pub fn cells(&self) -> u32 {
        self.cells
    }

    /// Number of particles on the ring.
    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// True when the ring carries no particles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// The particles in cyclic track order.
    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Positions in sequence order, as a fresh vector.
    pub fn positions(&self) -> Vec<u32> {
        self.particles.iter().map(|p| p.position).collect()
    }

    /// Velocities in sequence order, as a fresh vector.
    pub fn velocities(&self) -> Vec<u32> {
        self.particles.iter().map(|p| p.velocity).collect()
    }

    /// Number of empty cells strictly between particle `i` and its cyclic
    /// successor, computed modulo the ring size.
    ///
    /// For a single particle the successor is itself and the gap is the
    /// whole rest of the ring, `N - 1`.
    ///
    /// Panics if `i` is out of bounds or the ring is empty.
    #[inline]
    pub fn gap_ahead(&self, i: usize) -> u32 {
        let cur = u64::from(self.particles[i].position);
        let next = u64::from(self.particles[(i + 1) % self.particles.len()].position);
        let cells = u64::from(self.cells);
        // Widened so `next + cells` cannot wrap even for rings near u32::MAX.
        ((next + cells - cur - 1) % cells) as u32
    }

    /// Check the ordering invariant: positions are pairwise distinct and the
    /// sequence is a rotation of their ascending order (at most one descent
    /// around the cycle).
    pub fn is_ordered(&self) -> bool {
        let n = self.particles.len();
        if n < 2 {
            return true;
        }
        let mut descents = 0usize;
        for i in 0..n {
            let cur = self.particles[i].position;
            let next = self.particles[(i + 1) % n].position;
            if cur == next {
                return false;
            }
            if next < cur {
                descents += 1;
            }
        }
        descents <= 1
    }

    pub(crate) fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }
}
