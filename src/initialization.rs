use std::path::Path;

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::{
    error::SolverError,
    io::param_parser::SolverParamParser,
    physics::ShallowWater,
    solver::{FlowParameters, Grid, SolverParameters},
    state::{State, StateArray},
};

/// Produces the ghost-inclusive initial state for `ncells` interior cells.
pub trait InitialCondition {
    fn generate(&self, ncells: usize) -> StateArray;
}

impl<F: Fn(usize) -> StateArray> InitialCondition for F {
    fn generate(&self, ncells: usize) -> StateArray {
        self(ncells)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitialConditionType {
    GaussianBump,
    BreakingDam,
}

impl InitialCondition for InitialConditionType {
    fn generate(&self, ncells: usize) -> StateArray {
        match self {
            InitialConditionType::GaussianBump => gaussian_bump(ncells),
            InitialConditionType::BreakingDam => breaking_dam(ncells),
        }
    }
}

// cell `x` is centred at `x - 1/2` in cell units, so the interior spans [0, ncells]
fn cell_centre(x: usize) -> f64 {
    x as f64 - 0.5
}

fn still_water_from(ncells: usize, height: impl Fn(f64, f64) -> f64) -> StateArray {
    let mid = 0.5 * ncells as f64;
    Array1::from_shape_fn(ncells + 2, |x| State::new(height(cell_centre(x), mid), 0.0))
}

/// `h = exp(-((mid - x) / (ncells / 10))^2) + 1`, at rest.
pub fn gaussian_bump(ncells: usize) -> StateArray {
    let width = ncells as f64 / 10.0;
    still_water_from(ncells, |x, mid| (-((mid - x) / width).powi(2)).exp() + 1.0)
}

/// Riemann problem at rest: `h = 2` left of the midpoint, `h = 1` elsewhere.
pub fn breaking_dam(ncells: usize) -> StateArray {
    still_water_from(ncells, |x, mid| if x < mid { 2.0 } else { 1.0 })
}

pub fn initialize_params_by_file(
    file_path: impl AsRef<Path>,
) -> Result<(FlowParameters, SolverParameters), SolverError> {
    let parser = SolverParamParser::parse(file_path)?;
    initialize_params(parser)
}

pub fn initialize_params(
    parser: SolverParamParser,
) -> Result<(FlowParameters, SolverParameters), SolverError> {
    if !(parser.gravity.is_finite() && parser.gravity > 0.0) {
        return Err(SolverError::InvalidParameter(format!(
            "gravity must be positive, got {}",
            parser.gravity
        )));
    }
    if !(parser.stop_time.is_finite() && parser.stop_time >= 0.0) {
        return Err(SolverError::InvalidParameter(format!(
            "stop_time must be non-negative, got {}",
            parser.stop_time
        )));
    }
    let grid = Grid::with_length(parser.ncells, parser.domain_length)?;
    let flow_params = FlowParameters {
        gravity: parser.gravity,
    };
    let solver_params = SolverParameters {
        stop_time: parser.stop_time,
        grid,
        max_steps: parser.max_steps,
        time_step: parser.time_step,
        flux: parser.flux,
        boundary: parser.boundary,
        initial_condition: parser.initial_condition,
        output_interval: parser.output_interval,
    };
    Ok((flow_params, solver_params))
}

pub fn initialize_physics(flow_params: &FlowParameters) -> ShallowWater {
    ShallowWater::new(flow_params.gravity)
}
