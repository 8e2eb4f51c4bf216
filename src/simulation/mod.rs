//! Simulation runs: evolution driver, history and run metadata

pub mod analysis;
pub mod driver;
pub mod history;

pub use analysis::HistoryAnalysis;
pub use driver::{deadline, run, run_with, Evolution};
pub use history::History;

use crate::automaton::{
    generate_preset, load_grid_from_file, seeded_rng, Dimensionality, Grid, Preset, RuleSpec, Transition,
    TransitionRule,
};
use crate::config::Settings;
use crate::error::AutomatonResult;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::ops::ControlFlow;
use std::time::Duration;

/// Labels describing a run, handed to the presentation layer alongside the history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunMetadata {
    pub rule: RuleSpec,
    pub dimensionality: Dimensionality,
    /// Preset name, or the initial-state file stem
    pub preset: String,
    pub width: usize,
    pub height: usize,
    pub steps: usize,
    pub seed: Option<u64>,
}

impl RunMetadata {
    /// Name for exported files, e.g. `2d_game_of_life_chaos_100`
    pub fn label(&self) -> String {
        format!(
            "{}_{}_{}_{}",
            self.dimensionality.tag(),
            self.rule.name(),
            self.preset,
            self.steps
        )
    }
}

/// A finished run
#[derive(Debug, Clone, Serialize)]
pub struct Run {
    pub metadata: RunMetadata,
    pub history: History,
    pub cancelled: bool,
}

impl Run {
    /// Population, extinction and cycle summary of the recorded history
    pub fn analysis(&self) -> HistoryAnalysis {
        HistoryAnalysis::analyze(&self.history)
    }
}

/// A configured simulation: resolved rule, initial grid and step count
#[derive(Debug, Clone)]
pub struct Simulation {
    rule: TransitionRule,
    initial: Grid,
    metadata: RunMetadata,
    timeout: Option<Duration>,
}

impl Simulation {
    /// Build a simulation whose initial state comes from a named preset.
    ///
    /// The random preset without a seed draws one and records it in the
    /// metadata, so any run can be replayed. The other presets are
    /// deterministic and record no seed.
    pub fn new(
        rule: RuleSpec,
        preset: &str,
        size: usize,
        steps: usize,
        seed: Option<u64>,
    ) -> AutomatonResult<Self> {
        let transition = rule.resolve()?;
        let dimensionality = rule.dimensionality();
        let parsed = Preset::parse(preset, dimensionality)?;
        let seed = match parsed {
            Preset::Random => Some(seed.unwrap_or_else(rand::random::<u64>)),
            _ => None,
        };
        let initial = generate_preset(dimensionality, size, parsed, &mut seeded_rng(seed))?;

        let metadata = RunMetadata {
            rule,
            dimensionality,
            preset: preset.to_string(),
            width: initial.width(),
            height: initial.height(),
            steps,
            seed,
        };

        Ok(Self {
            rule: transition,
            initial,
            metadata,
            timeout: None,
        })
    }

    /// Build a simulation from an explicit initial grid
    pub fn with_initial_grid(rule: RuleSpec, initial: Grid, name: &str, steps: usize) -> AutomatonResult<Self> {
        let transition = rule.resolve()?;
        transition.check_shape(&initial)?;

        let metadata = RunMetadata {
            rule,
            dimensionality: rule.dimensionality(),
            preset: name.to_string(),
            width: initial.width(),
            height: initial.height(),
            steps,
            seed: None,
        };

        Ok(Self {
            rule: transition,
            initial,
            metadata,
            timeout: None,
        })
    }

    /// Build a simulation from validated settings
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let sim = &settings.simulation;

        let simulation = match &settings.input.initial_state_file {
            Some(path) => {
                let initial = load_grid_from_file(path)?;
                let name = path
                    .file_stem()
                    .and_then(|stem| stem.to_str())
                    .unwrap_or("file");
                Self::with_initial_grid(sim.rule, initial, name, sim.steps)
                    .with_context(|| format!("Initial state {} does not fit rule {}", path.display(), sim.rule))?
            }
            None => Self::new(sim.rule, &sim.preset, sim.grid_size, sim.steps, sim.seed)
                .context("Failed to build initial state")?,
        };

        Ok(match sim.timeout_seconds {
            Some(seconds) => simulation.with_timeout(Duration::from_secs(seconds)),
            None => simulation,
        })
    }

    /// Stop runs that take longer than `limit`; checked between steps
    pub fn with_timeout(mut self, limit: Duration) -> Self {
        self.timeout = Some(limit);
        self
    }

    pub fn initial(&self) -> &Grid {
        &self.initial
    }

    pub fn rule(&self) -> &TransitionRule {
        &self.rule
    }

    pub fn metadata(&self) -> &RunMetadata {
        &self.metadata
    }

    /// Evolve the initial grid, stopping early if the timeout elapses
    pub fn run(&self) -> AutomatonResult<Run> {
        self.run_with(|_, _| ControlFlow::Continue(()))
    }

    /// Run, reporting each new state to `observer`, which may stop the run
    pub fn run_with<F>(&self, mut observer: F) -> AutomatonResult<Run>
    where
        F: FnMut(usize, &Grid) -> ControlFlow<()>,
    {
        let steps = self.metadata.steps;
        let evolution = match self.timeout {
            Some(limit) => {
                let mut expired = deadline(limit);
                run_with(self.initial.clone(), &self.rule, steps, |step, grid| {
                    if expired(step, grid).is_break() {
                        return ControlFlow::Break(());
                    }
                    observer(step, grid)
                })?
            }
            None => run_with(self.initial.clone(), &self.rule, steps, observer)?,
        };

        Ok(Run {
            metadata: self.metadata.clone(),
            history: evolution.history,
            cancelled: evolution.cancelled,
        })
    }
}
