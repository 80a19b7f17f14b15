use ndarray::{Array1, ArrayView1};
use ndarray_stats::QuantileExt;
use tracing::{debug, info, trace, warn};

use crate::{
    boundary::{BoundaryCondition, BoundaryConditions},
    error::SolverError,
    initialization::{InitialCondition, InitialConditionType},
    spatial_disc::{FluxKernel, FluxScheme},
    state::{self, State, StateArray},
    temporal_disc::{TimeStepScheme, TimeStepStrategy},
};

pub const DEFAULT_DOMAIN_LENGTH: f64 = 1000.0;

/// Uniform 1D grid of `ncells` interior cells.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Grid {
    pub ncells: usize,
    pub domain_length: f64,
    pub dx: f64,
}

impl Grid {
    pub fn new(ncells: usize) -> Result<Self, SolverError> {
        Self::with_length(ncells, DEFAULT_DOMAIN_LENGTH)
    }
    pub fn with_length(ncells: usize, domain_length: f64) -> Result<Self, SolverError> {
        if ncells == 0 {
            return Err(SolverError::invalid_parameter("ncells must be at least 1"));
        }
        if !(domain_length.is_finite() && domain_length > 0.0) {
            return Err(SolverError::invalid_parameter(format!(
                "domain_length must be positive, got {domain_length}"
            )));
        }
        Ok(Self {
            ncells,
            domain_length,
            dx: domain_length / ncells as f64,
        })
    }
    /// Physical centre of cell `x`, with the interior covering `[0, domain_length]`.
    pub fn cell_centre(&self, x: usize) -> f64 {
        (x as f64 - 0.5) * self.dx
    }
}

pub struct FlowParameters {
    pub gravity: f64,
}

pub struct SolverParameters {
    pub stop_time: f64,
    pub grid: Grid,
    pub max_steps: Option<usize>,
    pub time_step: TimeStepScheme,
    pub flux: FluxScheme,
    pub boundary: BoundaryConditions,
    pub initial_condition: InitialConditionType,
    pub output_interval: Option<usize>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SimulationClock {
    pub current_time: f64,
    pub timesteps_taken: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolverStatus {
    Running,
    Stopped,
}

#[derive(Debug)]
pub struct RunOutcome {
    /// Final ghost-inclusive state array.
    pub solutions: StateArray,
    pub elapsed_time: f64,
    pub steps_taken: usize,
}

/// Explicit finite-volume time marching.
///
/// Each step refreshes the ghost cells, asks the time step strategy for `dt`,
/// fills both flux arrays and only then updates the interior with
/// `q[x] -= dt / dx * (fr[x] + fl[x - 1])`. Steps are never retried: a
/// negative depth shows up as NaN in the following steps.
pub struct Solver<T, F, B>
where
    T: TimeStepStrategy,
    F: FluxKernel,
    B: BoundaryCondition,
{
    pub grid: Grid,
    pub stop_time: f64,
    pub max_steps: Option<usize>,
    pub clock: SimulationClock,
    pub status: SolverStatus,
    solutions: StateArray,
    fl: Array1<State>,
    fr: Array1<State>,
    time_step: T,
    flux_kernel: F,
    boundary: B,
}

impl<T, F, B> Solver<T, F, B>
where
    T: TimeStepStrategy,
    F: FluxKernel,
    B: BoundaryCondition,
{
    pub fn new<I: InitialCondition>(
        stop_time: f64,
        grid: Grid,
        time_step: T,
        flux_kernel: F,
        boundary: B,
        initial_condition: &I,
    ) -> Result<Self, SolverError> {
        let solutions = initial_condition.generate(grid.ncells);
        if solutions.len() != grid.ncells + 2 {
            return Err(SolverError::invalid_parameter(format!(
                "initial condition produced {} cells, expected {}",
                solutions.len(),
                grid.ncells + 2
            )));
        }
        let status = if 0.0 < stop_time {
            SolverStatus::Running
        } else {
            SolverStatus::Stopped
        };
        Ok(Self {
            grid,
            stop_time,
            max_steps: None,
            clock: SimulationClock::default(),
            status,
            solutions,
            fl: Array1::from_elem(grid.ncells + 2, State::zero()),
            fr: Array1::from_elem(grid.ncells + 2, State::zero()),
            time_step,
            flux_kernel,
            boundary,
        })
    }
    pub fn with_max_steps(mut self, max_steps: Option<usize>) -> Self {
        self.max_steps = max_steps;
        self.update_status();
        self
    }
    pub fn solutions(&self) -> ArrayView1<State> {
        self.solutions.view()
    }
    fn update_status(&mut self) {
        let out_of_time = !(self.clock.current_time < self.stop_time);
        let out_of_steps = self
            .max_steps
            .is_some_and(|max_steps| self.clock.timesteps_taken >= max_steps);
        if out_of_time || out_of_steps {
            self.status = SolverStatus::Stopped;
        }
    }
    /// Advances one step and returns the `dt` it used.
    pub fn step(&mut self) -> Result<f64, SolverError> {
        let ncells = self.grid.ncells;
        let dx = self.grid.dx;
        self.boundary.apply(self.solutions.view_mut());
        let dt = self.time_step.compute_time_step(self.solutions.view(), dx);
        if dt <= 0.0 {
            return Err(SolverError::NonPositiveTimeStep {
                dt,
                step: self.clock.timesteps_taken,
            });
        }
        self.flux_kernel.compute_fluxes(
            self.solutions.view(),
            dt,
            dx,
            ncells,
            self.fl.view_mut(),
            self.fr.view_mut(),
        );
        let ratio = dt / dx;
        for x in 1..=ncells {
            let update = ratio * (self.fr[x] + self.fl[x - 1]);
            self.solutions[x] -= update;
        }
        self.clock.current_time += dt;
        self.clock.timesteps_taken += 1;
        debug!(
            step = self.clock.timesteps_taken,
            time = self.clock.current_time,
            dt,
            "advanced"
        );
        self.update_status();
        Ok(dt)
    }
    pub fn run(self) -> Result<RunOutcome, SolverError> {
        self.run_with(|_, _| {})
    }
    /// Runs to completion, handing the clock and state to `observer` after
    /// every step.
    pub fn run_with(
        mut self,
        mut observer: impl FnMut(&SimulationClock, ArrayView1<State>),
    ) -> Result<RunOutcome, SolverError> {
        info!(
            ncells = self.grid.ncells,
            dx = self.grid.dx,
            stop_time = self.stop_time,
            time_step = self.time_step.name(),
            flux = self.flux_kernel.name(),
            boundary = self.boundary.name(),
            "starting run"
        );
        while self.status == SolverStatus::Running {
            self.step()?;
            observer(&self.clock, self.solutions.view());
        }
        self.log_summary();
        Ok(RunOutcome {
            solutions: self.solutions,
            elapsed_time: self.clock.current_time,
            steps_taken: self.clock.timesteps_taken,
        })
    }
    fn log_summary(&self) {
        let heights = state::heights(self.solutions.view());
        let mass = state::total_mass(self.solutions.view(), self.grid.dx);
        match heights.min_skipnan() {
            &min_height if min_height <= 0.0 => {
                warn!(min_height, "non-positive depth in final state")
            }
            &min_height => trace!(min_height, "final depth range"),
        }
        if heights.iter().any(|h| h.is_nan()) {
            warn!("final state contains NaN depths");
        }
        info!(
            time = self.clock.current_time,
            steps = self.clock.timesteps_taken,
            mass,
            "run finished"
        );
    }
}

/// Runs a full simulation from `initial_condition` until `stop_time`.
pub fn run<T, F, B, I>(
    stop_time: f64,
    grid: Grid,
    time_step: T,
    flux_kernel: F,
    boundary: B,
    initial_condition: &I,
) -> Result<RunOutcome, SolverError>
where
    T: TimeStepStrategy,
    F: FluxKernel,
    B: BoundaryCondition,
    I: InitialCondition,
{
    Solver::new(stop_time, grid, time_step, flux_kernel, boundary, initial_condition)?.run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        boundary::BoundaryType,
        initialization::{breaking_dam, gaussian_bump},
        physics::ShallowWater,
        spatial_disc::{GlobalLaxFriedrichs, LocalLaxFriedrichs},
        temporal_disc::{CflTimeStep, ConstantTimeStep, LaggedCflTimeStep},
    };
    use approx::assert_relative_eq;

    #[test]
    fn test_grid_validation() {
        let grid = Grid::new(1000).unwrap();
        assert_eq!(grid.dx, 1.0);
        assert!(matches!(Grid::new(0), Err(SolverError::InvalidParameter(_))));
        assert!(Grid::with_length(10, -1.0).is_err());
        assert!(Grid::with_length(10, f64::NAN).is_err());
    }

    #[test]
    fn test_uniform_state_is_steady() {
        let grid = Grid::with_length(20, 20.0).unwrap();
        let ic = |ncells: usize| Array1::from_elem(ncells + 2, State::new(1.5, 0.75));
        let outcome = run(
            1.0,
            grid,
            ConstantTimeStep::new(0.1),
            LocalLaxFriedrichs::default(),
            BoundaryType::Periodic,
            &ic,
        )
        .unwrap();
        for q in outcome.solutions.iter() {
            assert_relative_eq!(q.h, 1.5, epsilon = 1e-12);
            assert_relative_eq!(q.hu, 0.75, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_periodic_dam_conserves_mass() {
        let physics = ShallowWater::default();
        let grid = Grid::new(200).unwrap();
        for kernel in [FluxScheme::GlobalLaxFriedrichs, FluxScheme::LocalLaxFriedrichs] {
            let solver = Solver::new(
                20.0,
                grid,
                CflTimeStep::new(0.5, physics),
                kernel.build(physics),
                BoundaryType::Periodic,
                &breaking_dam,
            )
            .unwrap();
            let initial_mass = state::total_mass(solver.solutions(), grid.dx);
            let mut masses = Vec::new();
            let outcome = solver
                .run_with(|_, qs| masses.push(state::total_mass(qs, grid.dx)))
                .unwrap();
            assert!(outcome.steps_taken > 10);
            assert_eq!(masses.len(), outcome.steps_taken);
            for mass in masses {
                assert_relative_eq!(mass, initial_mass, max_relative = 1e-12);
            }
        }
    }

    #[test]
    fn test_periodic_ring_conserves_momentum() {
        let physics = ShallowWater::default();
        let grid = Grid::new(100).unwrap();
        let ic = |ncells: usize| {
            let mut qs = gaussian_bump(ncells);
            for q in qs.iter_mut() {
                q.hu = 0.3 * q.h;
            }
            qs
        };
        let solver = Solver::new(
            10.0,
            grid,
            CflTimeStep::new(0.8, physics),
            LocalLaxFriedrichs::new(physics),
            BoundaryType::Periodic,
            &ic,
        )
        .unwrap();
        let initial_momentum = state::total_momentum(solver.solutions(), grid.dx);
        let outcome = solver.run().unwrap();
        let final_momentum = state::total_momentum(outcome.solutions.view(), grid.dx);
        assert_relative_eq!(final_momentum, initial_momentum, max_relative = 1e-10);
    }

    #[test]
    fn test_reflecting_walls_keep_symmetry() {
        let physics = ShallowWater::default();
        let ncells = 100;
        let grid = Grid::new(ncells).unwrap();
        let mut solver = Solver::new(
            30.0,
            grid,
            CflTimeStep::new(0.5, physics),
            LocalLaxFriedrichs::new(physics),
            BoundaryType::Reflecting,
            &InitialConditionType::GaussianBump,
        )
        .unwrap();
        while solver.status == SolverStatus::Running {
            solver.step().unwrap();
            let qs = solver.solutions();
            for x in 1..=ncells {
                let mirror = qs[ncells + 1 - x];
                assert_relative_eq!(qs[x].h, mirror.h, epsilon = 1e-10);
                assert_relative_eq!(qs[x].hu, -mirror.hu, epsilon = 1e-10);
            }
        }
        assert!(solver.clock.timesteps_taken > 0);
        // the bump has started moving
        let qs = solver.solutions();
        assert!(qs.iter().any(|q| q.hu.abs() > 1e-3));
    }

    #[test]
    fn test_non_positive_time_step_fails_fast() {
        let grid = Grid::new(10).unwrap();
        for dt in [0.0, -1.0] {
            let result = run(
                1.0,
                grid,
                ConstantTimeStep::new(dt),
                GlobalLaxFriedrichs::default(),
                BoundaryType::Outflow,
                &InitialConditionType::BreakingDam,
            );
            assert!(matches!(
                result,
                Err(SolverError::NonPositiveTimeStep { step: 0, .. })
            ));
        }
    }

    #[test]
    fn test_max_steps_stops_early() {
        let grid = Grid::new(50).unwrap();
        let solver = Solver::new(
            1.0e6,
            grid,
            ConstantTimeStep::new(0.01),
            LocalLaxFriedrichs::default(),
            BoundaryType::Outflow,
            &InitialConditionType::BreakingDam,
        )
        .unwrap()
        .with_max_steps(Some(7));
        let outcome = solver.run().unwrap();
        assert_eq!(outcome.steps_taken, 7);
        assert_relative_eq!(outcome.elapsed_time, 0.07, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_stop_time_takes_no_steps() {
        let grid = Grid::new(10).unwrap();
        let outcome = run(
            0.0,
            grid,
            ConstantTimeStep::new(0.1),
            LocalLaxFriedrichs::default(),
            BoundaryType::Outflow,
            &InitialConditionType::GaussianBump,
        )
        .unwrap();
        assert_eq!(outcome.steps_taken, 0);
        assert_eq!(outcome.elapsed_time, 0.0);
        assert_eq!(outcome.solutions, gaussian_bump(10));
    }

    #[test]
    fn test_lagged_step_first_uses_dt0() {
        let physics = ShallowWater::default();
        let grid = Grid::new(40).unwrap();
        let mut solver = Solver::new(
            100.0,
            grid,
            LaggedCflTimeStep::new(1.0e-3, 0.5, physics),
            GlobalLaxFriedrichs::new(physics),
            BoundaryType::Outflow,
            &InitialConditionType::BreakingDam,
        )
        .unwrap();
        let expected_second = 0.5 * grid.dx / physics.max_wavespeed(solver.solutions());
        assert_eq!(solver.step().unwrap(), 1.0e-3);
        assert_relative_eq!(solver.step().unwrap(), expected_second, max_relative = 1e-12);
    }

    #[test]
    fn test_negative_depth_propagates_as_nan() {
        let grid = Grid::new(10).unwrap();
        let ic = |ncells: usize| {
            let mut qs = breaking_dam(ncells);
            qs[5].h = -1.0;
            qs
        };
        let mut solver = Solver::new(
            1.0,
            grid,
            ConstantTimeStep::new(0.1),
            LocalLaxFriedrichs::default(),
            BoundaryType::Outflow,
            &ic,
        )
        .unwrap();
        solver.step().unwrap();
        assert!(solver.solutions().iter().any(|q| q.h.is_nan()));
    }
}
