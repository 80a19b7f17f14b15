//! End-to-end dam break on the reference 1000-cell grid.

use shallow_water_fv::{
    Grid, ShallowWater, run,
    boundary::BoundaryType,
    initialization::InitialConditionType,
    spatial_disc::{GlobalLaxFriedrichs, LocalLaxFriedrichs},
    temporal_disc::{CflTimeStep, LaggedCflTimeStep},
};

#[test]
fn test_dam_break_global_lax_friedrichs() {
    let physics = ShallowWater::default();
    let grid = Grid::new(1000).unwrap();
    let stop_time = 50.0;
    let cfl = 0.5;

    let outcome = run(
        stop_time,
        grid,
        CflTimeStep::new(cfl, physics),
        GlobalLaxFriedrichs::new(physics),
        BoundaryType::Outflow,
        &InitialConditionType::BreakingDam,
    )
    .unwrap();

    // the fastest signal of the dam break never exceeds the still-water
    // speed of the deep side, so this bounds every step taken
    let max_dt = cfl * grid.dx / (physics.g * 2.0_f64).sqrt();
    assert!(outcome.steps_taken > 0);
    assert!(outcome.elapsed_time >= stop_time);
    assert!(outcome.elapsed_time < stop_time + max_dt);

    let qs = outcome.solutions;
    for x in 1..=grid.ncells {
        assert!(qs[x].h > 0.0, "cell {x} has depth {}", qs[x].h);
    }
    // the initial unit jump at the dam is smeared over many cells
    let max_jump = (1..grid.ncells)
        .map(|x| (qs[x + 1].h - qs[x].h).abs())
        .fold(0.0, f64::max);
    assert!(max_jump < 0.5, "largest jump between cells {max_jump}");
    let transition_cells = (1..=grid.ncells)
        .filter(|&x| qs[x].h > 1.0 + 1e-3 && qs[x].h < 2.0 - 1e-3)
        .count();
    assert!(transition_cells > 100, "{transition_cells} cells in transition");
    // far field still untouched
    assert!((qs[1].h - 2.0).abs() < 1e-6);
    assert!((qs[grid.ncells].h - 1.0).abs() < 1e-6);
    // water flows from the deep side to the shallow side
    assert!(qs[grid.ncells / 2].hu > 0.1);
}

#[test]
fn test_dam_break_local_lax_friedrichs_is_sharper() {
    let physics = ShallowWater::default();
    let grid = Grid::new(400).unwrap();
    let stop_time = 40.0;
    let width_of_front = |flux_is_local: bool| {
        let outcome = if flux_is_local {
            run(
                stop_time,
                grid,
                CflTimeStep::new(0.5, physics),
                LocalLaxFriedrichs::new(physics),
                BoundaryType::Outflow,
                &InitialConditionType::BreakingDam,
            )
        } else {
            run(
                stop_time,
                grid,
                CflTimeStep::new(0.5, physics),
                GlobalLaxFriedrichs::new(physics),
                BoundaryType::Outflow,
                &InitialConditionType::BreakingDam,
            )
        }
        .unwrap();
        // cells strictly between the two undisturbed states
        outcome
            .solutions
            .iter()
            .skip(1)
            .take(grid.ncells)
            .filter(|q| q.h > 1.0 + 1e-3 && q.h < 2.0 - 1e-3)
            .count()
    };
    let local = width_of_front(true);
    let global = width_of_front(false);
    assert!(local > 0);
    assert!(local < global, "local {local} cells, global {global} cells");
}

#[test]
fn test_dam_break_lagged_cfl() {
    let physics = ShallowWater::default();
    let grid = Grid::new(500).unwrap();
    let outcome = run(
        25.0,
        grid,
        LaggedCflTimeStep::new(0.01, 0.5, physics),
        GlobalLaxFriedrichs::new(physics),
        BoundaryType::Reflecting,
        &InitialConditionType::BreakingDam,
    )
    .unwrap();
    assert!(outcome.elapsed_time >= 25.0);
    assert!(outcome.solutions.iter().all(|q| q.h.is_finite() && q.h > 0.0));
}
