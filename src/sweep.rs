//! Flow-vs-density sweeps over independent simulation runs.
//!
//! Runs are embarrassingly parallel: every density point owns its own
//! ring and its own seeded RNG, so Rayon may schedule them freely without
//! any shared mutable state. Plotting the resulting curve is a
//! collaborator's job.

use crate::core::{simulate, Params};
use crate::error::Result;
use rayon::prelude::*;

/// One point of a flow-vs-density curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowPoint {
    /// Vehicle density of the run.
    pub density: f64,
    /// Time-and-site-averaged flow measured at that density.
    pub flow: f64,
}

/// Evaluate the averaged flow at every density in `densities`, in
/// parallel, holding all other parameters of `params` fixed.
///
/// Point `i` runs with seed `base_seed + i`; `seed_from_u64` mixes the
/// seed, so consecutive values still give decorrelated streams, and a
/// fixed `base_seed` reproduces the whole curve. Results come back in
/// input order.
///
/// Errors: the first invalid density (or other invalid parameter)
/// aborts the sweep, as for a single run.
pub fn sweep_densities(
    params: &Params,
    densities: &[f64],
    base_seed: u64,
) -> Result<Vec<FlowPoint>> {
    densities
        .par_iter()
        .enumerate()
        .map(|(i, &density)| {
            let point = Params {
                density,
                ..params.clone()
            };
            let flow = simulate(&point, Some(base_seed.wrapping_add(i as u64)))?;
            Ok(FlowPoint { density, flow })
        })
        .collect()
}

/// Evenly spaced densities spanning `[0, 1]` inclusive, the usual domain
/// of a fundamental-diagram sweep.
pub fn density_grid(points: usize) -> Vec<f64> {
    match points {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => (0..points)
            .map(|i| i as f64 / (points - 1) as f64)
            .collect(),
    }
}
