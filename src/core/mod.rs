//! Core simulation types for the Nagel-Schreckenberg automaton.
//!
//! Dependency order is strict: [`particle`] and [`ring`] hold state,
//! [`step`] is the per-timestep transition rule over a ring, and [`sim`]
//! drives the rule for a whole run while feeding [`observe`] hooks.

pub mod observe;
pub mod particle;
pub mod ring;
pub mod sim;
pub mod step;

pub use observe::{FrameRecorder, NoopObserver, Observer};
pub use particle::Particle;
pub use ring::Ring;
pub use sim::{simulate, simulate_with, Params, Simulation};
pub use step::step;
