use nasch::core::{step, Params, Ring, Simulation};
use nasch::error::{Error, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Closed-form flow for the v_max = 1 model (exact in the steady state),
/// kept here on the analysis side: the core supports arbitrary v_max and
/// carries no theory.
fn predicted_flow(c: f64, p: f64) -> f64 {
    0.5 * (1.0 - (1.0 - 4.0 * (1.0 - p) * c * (1.0 - c)).sqrt())
}

/// c = 0: an empty ring flows nothing, for any speed limit or slowdown.
#[test]
fn empty_ring_has_exactly_zero_flow() -> Result<()> {
    for p_slow in [0.0, 0.5, 1.0] {
        let params = Params {
            density: 0.0,
            v_max: 5,
            p_slow,
            steps: 100,
            ..Params::default()
        };
        assert_eq!(nasch::simulate(&params, Some(1))?, 0.0);
    }
    Ok(())
}

/// c = 1: every cell occupied, every gap zero, nothing ever moves.
#[test]
fn full_ring_has_exactly_zero_flow() -> Result<()> {
    let params = Params {
        density: 1.0,
        v_max: 5,
        p_slow: 0.2,
        steps: 200,
        ..Params::default()
    };
    let mut sim = Simulation::new(params, Some(44))?;
    for _ in 0..200 {
        assert_eq!(sim.step(), 0, "a jammed ring must not move");
    }
    assert_eq!(sim.flow(), 0.0);
    Ok(())
}

/// t = 0 must be rejected up front, never silently produce NaN.
#[test]
fn zero_steps_is_an_error() {
    let params = Params {
        steps: 0,
        ..Params::default()
    };
    let err = Simulation::new(params.clone(), Some(1)).unwrap_err();
    assert!(matches!(err, Error::InvalidStepCount(_)), "got {err}");
    let err = nasch::simulate(&params, Some(1)).unwrap_err();
    assert!(matches!(err, Error::InvalidStepCount(_)), "got {err}");
}

/// All parameter validation happens before any stepping: each bad value
/// maps to its own error kind.
#[test]
fn driver_rejects_invalid_parameters() {
    let check = |params: Params, want_density: bool| {
        let err = nasch::simulate(&params, Some(1)).unwrap_err();
        if want_density {
            assert!(matches!(err, Error::InvalidDensity(_)), "got {err}");
        } else {
            assert!(matches!(err, Error::InvalidParam(_)), "got {err}");
        }
    };
    check(
        Params {
            density: -0.2,
            ..Params::default()
        },
        true,
    );
    check(
        Params {
            density: 1.01,
            ..Params::default()
        },
        true,
    );
    check(
        Params {
            p_slow: 1.7,
            ..Params::default()
        },
        false,
    );
    check(
        Params {
            cells: 0,
            ..Params::default()
        },
        false,
    );
}

/// Wraparound gap arithmetic on a two-vehicle ring: the successor of the
/// particle at cell 8 is the particle at cell 2, three empty cells away
/// (9, 0, 1) - never a negative number.
#[test]
fn wraparound_gap_on_two_particle_ring() -> Result<()> {
    let mut ring = Ring::from_positions(10, &[2, 8])?;
    assert_eq!(ring.gap_ahead(0), 5);
    assert_eq!(ring.gap_ahead(1), 3);

    // One deterministic step with a huge speed limit: both accelerate to
    // 1 (from rest), well under their gaps, and order is preserved.
    let mut rng = StdRng::seed_from_u64(9);
    let motion = step(&mut ring, 10, 0.0, &mut rng);
    assert_eq!(motion, 2);
    assert_eq!(ring.positions(), vec![3, 9]);
    assert!(ring.is_ordered());
    Ok(())
}

/// Deterministic v_max = 1 dynamics at the critical density relax to the
/// free-flow fixed point: flow over 1000 steps lands within sampling
/// tolerance of the closed form, trial after trial.
#[test]
fn deterministic_v1_flow_matches_theory() -> Result<()> {
    let params = Params {
        density: 0.5,
        v_max: 1,
        p_slow: 0.0,
        steps: 1000,
        cells: 100,
        ..Params::default()
    };
    let want = predicted_flow(0.5, 0.0);
    assert!((want - 0.5).abs() < 1e-12, "sanity: theory gives 1/2 here");

    for seed in [1, 2, 3] {
        let flow = nasch::simulate(&params, Some(seed))?;
        assert!(
            (flow - want).abs() < 0.05,
            "seed {seed}: flow {flow} too far from predicted {want}"
        );
    }
    Ok(())
}

/// Stochastic v_max = 1 flow agrees with the same closed form away from
/// the deterministic limit (the formula is exact for v_max = 1).
#[test]
fn stochastic_v1_flow_matches_theory() -> Result<()> {
    let params = Params {
        density: 0.3,
        v_max: 1,
        p_slow: 0.5,
        steps: 2000,
        cells: 100,
        ..Params::default()
    };
    let want = predicted_flow(0.3, 0.5);

    for seed in [11, 22, 33] {
        let flow = nasch::simulate(&params, Some(seed))?;
        assert!(
            (flow - want).abs() < 0.05,
            "seed {seed}: flow {flow} too far from predicted {want}"
        );
    }
    Ok(())
}

/// Low density, generous speed limit, no noise: after a short transient
/// every vehicle cruises at v_max, so flow approaches n * v_max / N.
/// The closed form above does not apply here; this exercises arbitrary
/// v_max support.
#[test]
fn free_flow_at_high_v_max() -> Result<()> {
    let params = Params {
        density: 0.03,
        v_max: 5,
        p_slow: 0.0,
        steps: 500,
        cells: 100,
        ..Params::default()
    };
    let want = 3.0 * 5.0 / 100.0;
    let flow = nasch::simulate(&params, Some(7))?;
    assert!(
        (flow - want).abs() < 0.02,
        "free-flow regime should carry {want}, got {flow}"
    );
    Ok(())
}

/// Sweep smoke test: the fundamental diagram vanishes at both ends and
/// carries positive flow in between.
#[test]
fn density_sweep_has_sane_endpoints() -> Result<()> {
    let params = Params {
        v_max: 2,
        p_slow: 0.3,
        steps: 300,
        ..Params::default()
    };
    let grid = nasch::density_grid(9);
    let points = nasch::sweep_densities(&params, &grid, 4242)?;

    assert_eq!(points.len(), 9);
    assert_eq!(points[0].flow, 0.0);
    assert_eq!(points[8].flow, 0.0);
    for point in &points[1..8] {
        assert!(
            point.flow > 0.0 && point.flow < 1.0,
            "interior density {} produced flow {}",
            point.density,
            point.flow
        );
    }
    Ok(())
}
