//! Command line front end for the cellular automata simulator

use anyhow::{Context, Result};
use cellular_automata::{
    automaton::{create_example_grids, rules::SUPPORTED_RULES, Dimensionality, ElementaryRule, RuleSpec},
    config::{CliOverrides, OutputFormat, Settings},
    simulation::Simulation,
    utils::{ColorOutput, ProgressIndicator, RunFormatter},
};
use clap::{Parser, Subcommand};
use std::ops::ControlFlow;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Grids wider than this are not echoed to the terminal after a run
const MAX_PRINTED_WIDTH: usize = 120;

#[derive(Parser)]
#[command(name = "cellular_automata")]
#[command(about = "Game of Life and elementary cellular automata simulator")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation
    Run {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Grid size: side of a 2D grid or length of a 1D row (overrides config)
        #[arg(short = 'n', long)]
        size: Option<usize>,

        /// Number of steps (overrides config)
        #[arg(short, long)]
        steps: Option<usize>,

        /// Rule: game_of_life, 30 or 110 (overrides config)
        #[arg(short, long)]
        rule: Option<RuleSpec>,

        /// Initial state preset: random, T, chaos (2D) or random, center (1D)
        #[arg(short, long)]
        preset: Option<String>,

        /// Seed for the random preset
        #[arg(long)]
        seed: Option<u64>,

        /// Initial state file, replaces the preset
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output directory (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format used when saving
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Delay between animation frames in milliseconds
        #[arg(long)]
        interval: Option<u64>,

        /// Save the run to the output directory
        #[arg(long)]
        save: bool,

        /// Animate the run in the terminal
        #[arg(short, long)]
        animate: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Create example configuration and initial state files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },

    /// Print the lookup tables of the supported elementary rules
    Rules,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config, size, steps, rule, preset, seed, input, output,
            format, interval, save, animate, verbose,
        } => {
            let overrides = CliOverrides {
                grid_size: size,
                steps,
                rule,
                preset,
                seed,
                initial_file: input,
                output_dir: output,
                format,
                interval_ms: interval,
                save,
                animate,
            };
            run_command(config, overrides, verbose)
        }
        Commands::Setup { directory, force } => setup_command(directory, force),
        Commands::Rules => rules_command(),
    }
}

fn run_command(config_path: PathBuf, overrides: CliOverrides, verbose: bool) -> Result<()> {
    let mut settings = if config_path.exists() {
        Settings::from_file(&config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?
    } else {
        println!("{}", ColorOutput::warning(&format!(
            "Config file {} not found, using defaults", config_path.display()
        )));
        Settings::default()
    };
    settings.merge_with_cli(&overrides);

    if verbose {
        println!("Configuration:");
        println!("  Rule: {}", settings.simulation.rule);
        println!("  Preset: {}", settings.simulation.preset);
        println!("  Grid size: {}", settings.simulation.grid_size);
        println!("  Steps: {}", settings.simulation.steps);
        if let Some(ref path) = settings.input.initial_state_file {
            println!("  Initial state file: {}", path.display());
        }
        println!("  Output dir: {}", settings.output.output_directory.display());
        println!();
    }

    if let Err(e) = settings.validate() {
        println!("{}", ColorOutput::error(&format!("❌ Invalid configuration: {:#}", e)));
        return Err(e.context("Configuration validation failed"));
    }

    let simulation = Simulation::from_settings(&settings).context("Failed to set up simulation")?;
    println!("{}", ColorOutput::info(&format!("▶ Running {}", simulation.metadata().label())));

    let start_time = Instant::now();
    let steps = settings.simulation.steps;
    let run = if settings.output.animate {
        let interval = Duration::from_millis(settings.output.interval_ms);
        print!("{}", RunFormatter::format_frame(simulation.initial(), 0, steps));
        simulation.run_with(|step, grid| {
            std::thread::sleep(interval);
            print!("{}", RunFormatter::format_frame(grid, step, steps));
            ControlFlow::Continue(())
        })?
    } else {
        let mut progress = ProgressIndicator::new(steps);
        let run = simulation.run_with(|step, _| {
            progress.update(step);
            ControlFlow::Continue(())
        })?;
        progress.finish();
        run
    };
    let total_time = start_time.elapsed();

    if run.cancelled {
        println!("{}", ColorOutput::warning(&format!(
            "⏱ Stopped after {} of {} steps (timeout)", run.history.steps(), steps
        )));
    } else {
        println!("{}", ColorOutput::success(&format!(
            "✅ {} steps in {:.3}s", run.history.steps(), total_time.as_secs_f64()
        )));
    }

    let analysis = run.analysis();
    println!("\n{}", RunFormatter::format_run_summary(&run, &analysis));

    if run.history.latest().width() <= MAX_PRINTED_WIDTH && !settings.output.animate {
        if run.metadata.dimensionality == Dimensionality::OneD {
            println!("Space-time diagram:");
            println!("{}", RunFormatter::format_spacetime(&run)?);
        } else {
            println!("Final state:");
            println!("{}", RunFormatter::format_grid_compact(run.history.latest()));
        }
    }

    if settings.output.save {
        println!("{}", ColorOutput::info("💾 Saving run..."));
        let written = RunFormatter::save_run(&run, &settings.output.output_directory, settings.output.format)
            .context("Failed to save run")?;
        for path in written {
            println!("Saved: {}", path.display());
        }
    }

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("🛠️  Setting up project structure..."));

    let config_dir = directory.join("config");
    let input_dir = directory.join("input/initial_states");
    let output_dir = directory.join("output/runs");

    for dir in [&config_dir, &input_dir, &output_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default()
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    create_example_grids(&input_dir).context("Failed to create example grids")?;
    println!("Created example initial states in: {}", input_dir.display());

    let examples_dir = config_dir.join("examples");
    std::fs::create_dir_all(&examples_dir)?;

    for rule_number in SUPPORTED_RULES {
        let mut config = Settings::default();
        config.simulation.rule = RuleSpec::Elementary { rule_number: u32::from(*rule_number) };
        config.simulation.preset = "center".to_string();
        config.simulation.grid_size = 61;
        config.simulation.steps = 30;
        config.to_file(&examples_dir.join(format!("rule_{}.yaml", rule_number)))?;
    }

    let mut glider = Settings::default();
    glider.simulation.steps = 20;
    glider.input.initial_state_file = Some(PathBuf::from("input/initial_states/glider.txt"));
    glider.to_file(&examples_dir.join("glider.yaml"))?;

    let mut random = Settings::default();
    random.simulation.preset = "random".to_string();
    random.simulation.seed = Some(42);
    random.to_file(&examples_dir.join("random.yaml"))?;

    println!("Created example configurations in: {}", examples_dir.display());

    println!("\n{}", ColorOutput::success("✅ Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit configuration files in {}", config_dir.display());
    println!("2. Add your initial states to {}", input_dir.display());
    println!("3. Run: cargo run -- run --config config/default.yaml");

    Ok(())
}

fn rules_command() -> Result<()> {
    let patterns = ElementaryRule::patterns();

    println!("{:<28} {}", "current pattern", patterns.join(" "));
    for &number in SUPPORTED_RULES {
        let rule = ElementaryRule::new(u32::from(number))?;
        let live = rule.live_patterns();
        let outputs: Vec<String> = patterns
            .iter()
            .map(|pattern| format!(" {} ", u8::from(live.contains(pattern))))
            .collect();
        println!("{:<28} {}", format!("new center cell, rule {}", number), outputs.join(" "));
    }

    Ok(())
}
