//! Configuration settings for the cellular automata simulator

use crate::automaton::{Preset, RuleSpec};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub input: InputConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Side length of 2D grids, length of 1D rows
    pub grid_size: usize,
    pub steps: usize,
    pub rule: RuleSpec,
    pub preset: String,
    #[serde(default)]
    pub seed: Option<u64>,
    /// Stop the run once this much time has passed
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputConfig {
    /// Text grid used instead of the preset
    #[serde(default)]
    pub initial_state_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub save: bool,
    pub output_directory: PathBuf,
    /// Delay between frames when animating in the terminal
    pub interval_ms: u64,
    pub animate: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
    Visual,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig {
                grid_size: 60,
                steps: 100,
                rule: RuleSpec::GameOfLife,
                preset: "chaos".to_string(),
                seed: None,
                timeout_seconds: None,
            },
            input: InputConfig::default(),
            output: OutputConfig {
                format: OutputFormat::Text,
                save: false,
                output_directory: PathBuf::from("output/runs"),
                interval_ms: 200,
                animate: false,
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        let sim = &self.simulation;

        sim.rule.resolve().context("Invalid rule")?;

        match &self.input.initial_state_file {
            Some(path) => {
                if !path.exists() {
                    anyhow::bail!("Initial state file does not exist: {}", path.display());
                }
            }
            None => {
                if sim.grid_size == 0 {
                    anyhow::bail!("Grid size must be positive");
                }
                let dimensionality = sim.rule.dimensionality();
                Preset::parse(&sim.preset, dimensionality).with_context(|| {
                    format!("Invalid preset (expected one of {:?})", Preset::names(dimensionality))
                })?;
            }
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(grid_size) = cli_overrides.grid_size {
            self.simulation.grid_size = grid_size;
        }
        if let Some(steps) = cli_overrides.steps {
            self.simulation.steps = steps;
        }
        if let Some(rule) = cli_overrides.rule {
            self.simulation.rule = rule;
        }
        if let Some(ref preset) = cli_overrides.preset {
            self.simulation.preset = preset.clone();
        }
        if let Some(seed) = cli_overrides.seed {
            self.simulation.seed = Some(seed);
        }
        if let Some(ref initial_file) = cli_overrides.initial_file {
            self.input.initial_state_file = Some(initial_file.clone());
        }
        if let Some(ref output_dir) = cli_overrides.output_dir {
            self.output.output_directory = output_dir.clone();
        }
        if let Some(format) = cli_overrides.format {
            self.output.format = format;
        }
        if let Some(interval_ms) = cli_overrides.interval_ms {
            self.output.interval_ms = interval_ms;
        }
        if cli_overrides.save {
            self.output.save = true;
        }
        if cli_overrides.animate {
            self.output.animate = true;
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub grid_size: Option<usize>,
    pub steps: Option<usize>,
    pub rule: Option<RuleSpec>,
    pub preset: Option<String>,
    pub seed: Option<u64>,
    pub initial_file: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub interval_ms: Option<u64>,
    pub save: bool,
    pub animate: bool,
}
