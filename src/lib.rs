//! One-dimensional finite-volume solver for the shallow water equations.
//!
//! The solver marches `(h, hu)` cell averages with an explicit
//! Lax-Friedrichs-type update. Flux kernel, time step rule, boundary
//! condition and initial condition are picked once before the run starts.

pub mod boundary;
pub mod error;
pub mod initialization;
pub mod io;
pub mod physics;
pub mod solver;
pub mod spatial_disc;
pub mod state;
pub mod temporal_disc;

pub use error::SolverError;
pub use physics::ShallowWater;
pub use solver::{Grid, RunOutcome, SimulationClock, Solver, run};
pub use state::{State, StateArray};
