use std::{fs, path::Path};

use serde::Deserialize;

use crate::{
    boundary::BoundaryConditions, error::SolverError, initialization::InitialConditionType,
    physics::DEFAULT_GRAVITY, solver::DEFAULT_DOMAIN_LENGTH, spatial_disc::FluxScheme,
    temporal_disc::TimeStepScheme,
};

fn default_domain_length() -> f64 {
    DEFAULT_DOMAIN_LENGTH
}
fn default_gravity() -> f64 {
    DEFAULT_GRAVITY
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct SolverParamParser {
    pub stop_time: f64,
    pub ncells: usize,
    #[serde(default = "default_domain_length")]
    pub domain_length: f64,
    #[serde(default = "default_gravity")]
    pub gravity: f64,
    pub time_step: TimeStepScheme,
    pub flux: FluxScheme,
    pub boundary: BoundaryConditions,
    pub initial_condition: InitialConditionType,
    #[serde(default)]
    pub max_steps: Option<usize>,
    #[serde(default)]
    pub output_interval: Option<usize>,
}

impl SolverParamParser {
    pub fn parse(file_path: impl AsRef<Path>) -> Result<Self, SolverError> {
        let file_content = fs::read_to_string(file_path)?;
        Self::from_json(&file_content)
    }
    pub fn from_json(json: &str) -> Result<Self, SolverError> {
        let param: SolverParamParser = serde_json::from_str(json)?;
        Ok(param)
    }
}
