use crate::core::observe::{NoopObserver, Observer};
use crate::core::step as engine;
use crate::core::Ring;
use crate::error::{Error, Result};
use rand::{rng, rngs::StdRng, Rng, SeedableRng};

/// Parameters of one simulation run.
///
/// Everything a run depends on travels in this struct, so concurrent
/// simulations stay independent and individually testable.
#[derive(Debug, Clone)]
pub struct Params {
    /// Fraction of cells occupied by vehicles, in `[0, 1]`.
    pub density: f64,

    /// Maximum velocity in cells per step.
    pub v_max: u32,

    /// Probability of a random slowdown per vehicle per step, in `[0, 1]`.
    pub p_slow: f64,

    /// Number of timesteps to run (> 0).
    pub steps: u64,

    /// Ring size `N` in cells (> 0).
    pub cells: u32,

    /// Upper bound on the number of sampled frames per run (> 0).
    pub frames: u32,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            density: 0.5,
            v_max: 1,
            p_slow: 0.5,
            steps: 100,
            cells: 100,
            frames: 100,
        }
    }
}

impl Params {
    /// Validate every parameter eagerly, before any state exists.
    ///
    /// Out-of-range values are rejected, never clamped.
    ///
    /// Errors:
    /// - `Error::InvalidDensity` if `density` is NaN or outside `[0, 1]`.
    /// - `Error::InvalidParam` if `p_slow` is NaN or outside `[0, 1]`, or
    ///   `cells` or `frames` is zero.
    /// - `Error::InvalidStepCount` if `steps` is zero.
    pub fn validate(&self) -> Result<()> {
        if !self.density.is_finite() || !(0.0..=1.0).contains(&self.density) {
            return Err(Error::InvalidDensity(format!(
                "density must be within [0, 1], got {}",
                self.density
            )));
        }
        if !self.p_slow.is_finite() || !(0.0..=1.0).contains(&self.p_slow) {
            return Err(Error::InvalidParam(format!(
                "slowdown probability must be within [0, 1], got {}",
                self.p_slow
            )));
        }
        if self.cells == 0 {
            return Err(Error::InvalidParam("ring size must be > 0".into()));
        }
        if self.frames == 0 {
            return Err(Error::InvalidParam("frame count must be > 0".into()));
        }
        if self.steps == 0 {
            return Err(Error::InvalidStepCount("steps must be > 0".into()));
        }
        Ok(())
    }

    /// Sampling stride in steps: `ceil(steps / frames)`.
    ///
    /// Sampling at step indices divisible by this stride yields at most
    /// `frames` evenly spaced frames and avoids the float-modulo cadence
    /// of naive `t / F` sampling.
    #[inline]
    pub fn frame_stride(&self) -> u64 {
        self.steps.div_ceil(u64::from(self.frames))
    }
}

/// Discrete-time driver for the Nagel-Schreckenberg automaton.
///
/// Owns the ring and the run's RNG for its whole lifetime; the step
/// engine borrows both, one timestep at a time. Nothing here is shared
/// between runs, which keeps parallel parameter sweeps trivially safe.
#[derive(Debug)]
pub struct Simulation {
    params: Params,
    ring: Ring,
    rng: StdRng,
    steps_done: u64,
    motion_total: u64,
    last_motion: u64,
}

impl Simulation {
    /// Create a simulation from validated parameters and an optional RNG
    /// seed (`None` draws a seed from entropy; pass `Some` for
    /// reproducible runs).
    ///
    /// Fails fast on the first invalid parameter; no partially
    /// initialized state escapes.
    pub fn new(params: Params, seed: Option<u64>) -> Result<Self> {
        params.validate()?;

        let mut rng: StdRng = match seed {
            Some(s) => SeedableRng::seed_from_u64(s),
            None => SeedableRng::seed_from_u64(rng().random()),
        };

        let ring = Ring::with_density(params.density, params.cells, &mut rng)?;

        Ok(Self {
            params,
            ring,
            rng,
            steps_done: 0,
            motion_total: 0,
            last_motion: 0,
        })
    }

    /// Advance by one timestep and return the step's velocity sum.
    ///
    /// `instantaneous_flow` divides the same number by the ring size, for
    /// collaborators that want a per-step throughput signal.
    pub fn step(&mut self) -> u64 {
        let motion = engine::step(
            &mut self.ring,
            self.params.v_max,
            self.params.p_slow,
            &mut self.rng,
        );
        self.steps_done += 1;
        self.motion_total += motion;
        self.last_motion = motion;
        motion
    }

    /// Run the configured number of steps, sampling frames into `observer`,
    /// and return the time-and-site-averaged flow over exactly those steps.
    ///
    /// At every step index `i` divisible by [`Params::frame_stride`] the
    /// observer receives the pre-step configuration as frame `i / stride`;
    /// frame 0 is therefore always the configuration before the first
    /// update. A second `run` call performs `steps` further updates and
    /// numbers its frames from 0 again.
    pub fn run<O: Observer + ?Sized>(&mut self, observer: &mut O) -> f64 {
        let steps = self.params.steps;
        let stride = self.params.frame_stride();
        let mut total: u64 = 0;

        for i in 0..steps {
            if i % stride == 0 {
                let positions = self.ring.positions();
                observer.on_frame(&positions, (i / stride) as u32);
            }
            total += self.step();
        }

        total as f64 / (f64::from(self.params.cells) * steps as f64)
    }

    /// The run's parameters.
    #[inline]
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Read access to the ring state.
    #[inline]
    pub fn ring(&self) -> &Ring {
        &self.ring
    }

    /// Number of vehicles on the ring.
    #[inline]
    pub fn num_particles(&self) -> usize {
        self.ring.len()
    }

    /// Current positions in sequence order.
    pub fn positions(&self) -> Vec<u32> {
        self.ring.positions()
    }

    /// Current velocities in sequence order.
    pub fn velocities(&self) -> Vec<u32> {
        self.ring.velocities()
    }

    /// Timesteps performed so far, across all `step`/`run` calls.
    #[inline]
    pub fn step_count(&self) -> u64 {
        self.steps_done
    }

    /// Time-and-site-averaged flow over every step performed so far, or
    /// 0 before the first step.
    pub fn flow(&self) -> f64 {
        if self.steps_done == 0 {
            return 0.0;
        }
        self.motion_total as f64 / (f64::from(self.params.cells) * self.steps_done as f64)
    }

    /// Flow of the most recent step alone: its velocity sum per site.
    pub fn instantaneous_flow(&self) -> f64 {
        self.last_motion as f64 / f64::from(self.params.cells)
    }
}

/// One-shot run: initialize from `params`, perform `params.steps` updates
/// and return the averaged flow. The entry point for sweeps and for the
/// Python surface.
pub fn simulate(params: &Params, seed: Option<u64>) -> Result<f64> {
    simulate_with(params, seed, &mut NoopObserver)
}

/// One-shot run with a sampling hook attached.
pub fn simulate_with<O: Observer + ?Sized>(
    params: &Params,
    seed: Option<u64>,
    observer: &mut O,
) -> Result<f64> {
    let mut sim = Simulation::new(params.clone(), seed)?;
    Ok(sim.run(observer))
}
