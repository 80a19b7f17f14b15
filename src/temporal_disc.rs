use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};

use crate::{physics::ShallowWater, state::State};

/// Picks the step size for the next update.
///
/// Strategies may keep state between calls, so the solver calls this exactly
/// once per step.
pub trait TimeStepStrategy {
    fn compute_time_step(&mut self, qs: ArrayView1<State>, dx: f64) -> f64;
    fn name(&self) -> &'static str;
}

impl<T: TimeStepStrategy + ?Sized> TimeStepStrategy for Box<T> {
    fn compute_time_step(&mut self, qs: ArrayView1<State>, dx: f64) -> f64 {
        (**self).compute_time_step(qs, dx)
    }
    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// `cfl * dx / max wavespeed`.
pub fn cfl_time_step(qs: ArrayView1<State>, dx: f64, cfl: f64, physics: &ShallowWater) -> f64 {
    cfl * dx / physics.max_wavespeed(qs)
}

/// Fixed step size. Stability is up to the caller.
#[derive(Clone, Copy, Debug)]
pub struct ConstantTimeStep {
    pub dt: f64,
}

impl ConstantTimeStep {
    pub fn new(dt: f64) -> Self {
        Self { dt }
    }
}

impl TimeStepStrategy for ConstantTimeStep {
    fn compute_time_step(&mut self, _qs: ArrayView1<State>, _dx: f64) -> f64 {
        self.dt
    }
    fn name(&self) -> &'static str {
        "constant"
    }
}

/// CFL step recomputed from the current state on every call. The scheme is
/// stable for `cfl < 1`; larger values are not rejected.
#[derive(Clone, Copy, Debug)]
pub struct CflTimeStep {
    pub cfl: f64,
    pub physics: ShallowWater,
}

impl CflTimeStep {
    pub fn new(cfl: f64, physics: ShallowWater) -> Self {
        Self { cfl, physics }
    }
}

impl TimeStepStrategy for CflTimeStep {
    fn compute_time_step(&mut self, qs: ArrayView1<State>, dx: f64) -> f64 {
        cfl_time_step(qs, dx, self.cfl, &self.physics)
    }
    fn name(&self) -> &'static str {
        "cfl"
    }
}

/// CFL step lagged by one call.
///
/// Each call hands out the step estimated on the previous call and then
/// stores the estimate for the state it was given. The first call returns
/// `dt0`. With the global Lax-Friedrichs kernel this means `a = dx / dt` is
/// built from the state one step behind.
#[derive(Clone, Copy, Debug)]
pub struct LaggedCflTimeStep {
    stored_dt: f64,
    pub cfl: f64,
    pub physics: ShallowWater,
}

impl LaggedCflTimeStep {
    pub fn new(dt0: f64, cfl: f64, physics: ShallowWater) -> Self {
        Self {
            stored_dt: dt0,
            cfl,
            physics,
        }
    }
    pub fn stored_dt(&self) -> f64 {
        self.stored_dt
    }
    pub fn advance(&mut self, qs: ArrayView1<State>, dx: f64) -> f64 {
        let dt = self.stored_dt;
        self.stored_dt = cfl_time_step(qs, dx, self.cfl, &self.physics);
        dt
    }
}

impl TimeStepStrategy for LaggedCflTimeStep {
    fn compute_time_step(&mut self, qs: ArrayView1<State>, dx: f64) -> f64 {
        self.advance(qs, dx)
    }
    fn name(&self) -> &'static str {
        "lagged cfl"
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TimeStepScheme {
    Constant { dt: f64 },
    Cfl { cfl: f64 },
    LaggedCfl { dt0: f64, cfl: f64 },
}

impl TimeStepScheme {
    pub fn build(self, physics: ShallowWater) -> Box<dyn TimeStepStrategy> {
        match self {
            TimeStepScheme::Constant { dt } => Box::new(ConstantTimeStep::new(dt)),
            TimeStepScheme::Cfl { cfl } => Box::new(CflTimeStep::new(cfl, physics)),
            TimeStepScheme::LaggedCfl { dt0, cfl } => {
                Box::new(LaggedCflTimeStep::new(dt0, cfl, physics))
            }
        }
    }
}
