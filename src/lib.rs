//! Cellular Automata Simulator
//!
//! Deterministic evolution of Conway's Game of Life and of the elementary
//! one-dimensional rules 30 and 110 on fixed-size grids.

pub mod automaton;
pub mod config;
pub mod error;
pub mod simulation;
pub mod utils;

pub use automaton::{Grid, RuleSpec, Transition, TransitionRule};
pub use config::Settings;
pub use error::{AutomatonError, AutomatonResult};
pub use simulation::{History, Run, Simulation};

use anyhow::Result;

/// Main entry point: build the configured simulation and run it to completion
pub fn simulate(settings: &Settings) -> Result<Run> {
    settings.validate()?;
    let simulation = Simulation::from_settings(settings)?;
    Ok(simulation.run()?)
}
