//! Python surface for the simulation core.
//!
//! The Python side is the analysis collaborator: it gets parameters in,
//! flow numbers and position frames out, and owns every plotting and
//! video concern itself. Built only with the `python` cargo feature
//! (maturin enables it when producing wheels).

use numpy::ndarray::Array2;
use numpy::{IntoPyArray, PyArray1, PyArray2};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::core::{simulate as run_once, FrameRecorder, NoopObserver, Params, Simulation};
use crate::sweep::sweep_densities;

fn py_err<E: ToString>(e: E) -> PyErr {
    PyValueError::new_err(e.to_string())
}

fn params_from_args(
    density: f64,
    v_max: u32,
    p_slow: f64,
    steps: u64,
    cells: u32,
    frames: u32,
) -> Params {
    Params {
        density,
        v_max,
        p_slow,
        steps,
        cells,
        frames,
    }
}

/// Nagel-Schreckenberg ring-road simulation.
///
/// Python-facing wrapper around the Rust simulation core:
/// - __new__(density, v_max=1, p_slow=0.5, steps=100, cells=100, frames=100, seed=None)
/// - run() -> float (averaged flow over `steps` updates)
/// - run_sampled() -> (float, np.ndarray of shape (F, n), dtype=uint32)
/// - step() -> int (velocity sum of one update)
/// - get_positions() / get_velocities() -> np.ndarray, shape (n,)
#[pyclass]
pub struct NaschSim {
    sim: Simulation,
}

#[pymethods]
impl NaschSim {
    /// Initialize a ring-road simulation.
    ///
    /// Parameters
    /// - density: fraction of occupied cells, in [0, 1]
    /// - v_max: maximum velocity in cells per step (int, >= 0)
    /// - p_slow: random slowdown probability, in [0, 1]
    /// - steps: timesteps per run() call (int, > 0)
    /// - cells: ring size N (int, > 0)
    /// - frames: upper bound on sampled frames per run (int, > 0)
    /// - seed: RNG seed (int) for reproducibility; None for nondeterministic
    ///
    /// Errors: raises ValueError on invalid parameters.
    #[new]
    #[pyo3(signature = (density, v_max=1, p_slow=0.5, steps=100, cells=100, frames=100, seed=None))]
    fn new(
        density: f64,
        v_max: u32,
        p_slow: f64,
        steps: u64,
        cells: u32,
        frames: u32,
        seed: Option<u64>,
    ) -> PyResult<Self> {
        let params = params_from_args(density, v_max, p_slow, steps, cells, frames);
        let sim = Simulation::new(params, seed).map_err(py_err)?;
        Ok(Self { sim })
    }

    /// Run the configured number of steps and return the averaged flow
    /// (releases the GIL during computation).
    fn run(&mut self, py: Python<'_>) -> f64 {
        py.detach(|| self.sim.run(&mut NoopObserver))
    }

    /// Run the configured number of steps while recording sampled frames.
    ///
    /// Returns (flow, frames) where frames is a (num_frames, n) uint32
    /// array; row k holds the particle positions of frame k.
    fn run_sampled<'py>(&mut self, py: Python<'py>) -> PyResult<(f64, Py<PyArray2<u32>>)> {
        let (flow, rec) = py.detach(|| {
            let mut rec = FrameRecorder::new();
            let flow = self.sim.run(&mut rec);
            (flow, rec)
        });

        let n = self.sim.num_particles();
        let mut arr = Array2::<u32>::zeros((rec.frames.len(), n));
        for (row, (_, positions)) in rec.frames.iter().enumerate() {
            for (col, &pos) in positions.iter().enumerate() {
                arr[[row, col]] = pos;
            }
        }
        Ok((flow, arr.into_pyarray(py).unbind()))
    }

    /// Advance by a single timestep; returns the step's velocity sum.
    fn step(&mut self) -> u64 {
        self.sim.step()
    }

    /// Return positions as a NumPy array of shape (n,), dtype=uint32.
    fn get_positions<'py>(&self, py: Python<'py>) -> Py<PyArray1<u32>> {
        self.sim.positions().into_pyarray(py).unbind()
    }

    /// Return velocities as a NumPy array of shape (n,), dtype=uint32.
    fn get_velocities<'py>(&self, py: Python<'py>) -> Py<PyArray1<u32>> {
        self.sim.velocities().into_pyarray(py).unbind()
    }

    /// Averaged flow over every step performed so far.
    fn flow(&self) -> f64 {
        self.sim.flow()
    }

    /// Velocity sum of the most recent step, per site.
    fn instantaneous_flow(&self) -> f64 {
        self.sim.instantaneous_flow()
    }

    /// Timesteps performed so far.
    fn step_count(&self) -> u64 {
        self.sim.step_count()
    }

    /// Number of vehicles on the ring.
    fn num_particles(&self) -> usize {
        self.sim.num_particles()
    }
}

/// One-shot simulation: build, run, return the averaged flow.
#[pyfunction]
#[pyo3(signature = (density, v_max=1, p_slow=0.5, steps=100, cells=100, seed=None))]
fn simulate(
    py: Python<'_>,
    density: f64,
    v_max: u32,
    p_slow: f64,
    steps: u64,
    cells: u32,
    seed: Option<u64>,
) -> PyResult<f64> {
    let params = params_from_args(density, v_max, p_slow, steps, cells, 1);
    py.detach(|| run_once(&params, seed)).map_err(py_err)
}

/// Averaged flow at each density, computed in parallel with one
/// independently seeded run per point. Returns a float64 array aligned
/// with `densities`.
#[pyfunction]
#[pyo3(signature = (densities, v_max=1, p_slow=0.5, steps=100, cells=100, seed=0))]
fn sweep<'py>(
    py: Python<'py>,
    densities: Vec<f64>,
    v_max: u32,
    p_slow: f64,
    steps: u64,
    cells: u32,
    seed: u64,
) -> PyResult<Py<PyArray1<f64>>> {
    let params = params_from_args(0.0, v_max, p_slow, steps, cells, 1);
    let points = py
        .detach(|| sweep_densities(&params, &densities, seed))
        .map_err(py_err)?;
    let flows: Vec<f64> = points.into_iter().map(|p| p.flow).collect();
    Ok(flows.into_pyarray(py).unbind())
}

/// The nasch Python module entry point.
#[pymodule]
fn nasch(_py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<NaschSim>()?;
    m.add_function(wrap_pyfunction!(simulate, m)?)?;
    m.add_function(wrap_pyfunction!(sweep, m)?)?;
    Ok(())
}
