//! Nagel-Schreckenberg ring-road traffic simulation.
//!
//! Discrete vehicles live on a one-dimensional periodic track of `N`
//! cells and advance under the stochastic NS rule: accelerate by one up
//! to `v_max`, never move further than the gap to the vehicle ahead, and brake
//! randomly with probability `p_slow`. The crate owns exactly the
//! simulation core: ring state, step engine, run driver, flow
//! aggregation and sampling hooks. Rendering, video assembly and theory
//! comparison are external collaborators (see the `python` feature and
//! `python/flow_vs_density.py`).
//!
//! # Example
//!
//! ```
//! use nasch::{simulate, Params};
//!
//! let params = Params {
//!     density: 0.2,
//!     v_max: 5,
//!     p_slow: 0.3,
//!     steps: 500,
//!     ..Params::default()
//! };
//! let flow = simulate(&params, Some(42))?;
//! assert!(flow > 0.0 && flow <= 1.0);
//! # Ok::<(), nasch::Error>(())
//! ```

pub mod core;
pub mod error;
pub mod sweep;

#[cfg(feature = "python")]
mod python;

pub use crate::core::{
    simulate, simulate_with, FrameRecorder, NoopObserver, Observer, Params, Particle, Ring,
    Simulation,
};
pub use crate::error::{Error, Result};
pub use crate::sweep::{density_grid, sweep_densities, FlowPoint};
