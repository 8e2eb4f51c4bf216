//! Display and output formatting utilities

use crate::automaton::io::grid_to_string;
use crate::automaton::Grid;
use crate::config::OutputFormat;
use crate::simulation::{HistoryAnalysis, Run, RunMetadata};
use anyhow::{Context, Result};
use itertools::Itertools;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Format runs for display and export
pub struct RunFormatter;

/// JSON export document
#[derive(Debug, Serialize)]
struct RunExport<'a> {
    metadata: &'a RunMetadata,
    cancelled: bool,
    analysis: HistoryAnalysis,
    history: &'a crate::simulation::History,
}

impl RunFormatter {
    /// Format a grid in compact form
    pub fn format_grid_compact(grid: &Grid) -> String {
        let mut output = grid
            .cells()
            .chunks(grid.width())
            .map(|row| {
                row.iter()
                    .map(|&alive| if alive { '█' } else { '·' })
                    .collect::<String>()
            })
            .join("\n");
        output.push('\n');
        output
    }

    /// Format a grid with coordinates
    pub fn format_grid_with_coords(grid: &Grid) -> String {
        let mut output = String::new();

        output.push_str("   ");
        for x in 0..grid.width() {
            output.push_str(&format!("{:2}", x % 10));
        }
        output.push('\n');

        for y in 0..grid.height() {
            output.push_str(&format!("{:2} ", y));
            for x in 0..grid.width() {
                output.push_str(if grid.get(y, x) { "██" } else { "··" });
            }
            output.push('\n');
        }

        output
    }

    /// One terminal frame of an animation
    pub fn format_frame(grid: &Grid, step: usize, total: usize) -> String {
        format!(
            "\x1b[2J\x1b[HStep {}/{}  (living: {})\n{}",
            step,
            total,
            grid.living_count(),
            Self::format_grid_compact(grid)
        )
    }

    /// Short description of a run and its analysis
    pub fn format_run_summary(run: &Run, analysis: &HistoryAnalysis) -> String {
        let metadata = &run.metadata;
        let mut output = String::new();

        output.push_str(&format!("=== Run {} ===\n", metadata.label()));
        output.push_str(&format!("Rule: {} ({})\n", metadata.rule, metadata.dimensionality));
        output.push_str(&format!("Initial state: {}\n", metadata.preset));
        output.push_str(&format!("Grid: {}x{}\n", metadata.height, metadata.width));
        if let Some(seed) = metadata.seed {
            output.push_str(&format!("Seed: {}\n", seed));
        }
        output.push_str(&format!(
            "Steps: {} of {}{}\n",
            run.history.steps(),
            metadata.steps,
            if run.cancelled { " (stopped early)" } else { "" }
        ));
        output.push_str(&format!(
            "Living cells: {} → {} (peak {})\n",
            analysis.population.first().copied().unwrap_or(0),
            analysis.population.last().copied().unwrap_or(0),
            analysis.peak_population()
        ));

        if let Some(step) = analysis.extinct_at {
            output.push_str(&format!("Type: Extinct at step {}\n", step));
        } else if analysis.is_still_life() {
            output.push_str(&format!(
                "Type: Still life from step {}\n",
                analysis.cycle_start.unwrap_or(0)
            ));
        } else if let (true, Some(period), Some(start)) =
            (analysis.is_oscillator(), analysis.period, analysis.cycle_start)
        {
            output.push_str(&format!("Type: Oscillator (period {}) from step {}\n", period, start));
        } else {
            output.push_str("Type: No repetition observed\n");
        }

        output
    }

    /// Render a one-dimensional run as a space-time diagram, one row per step
    pub fn format_spacetime(run: &Run) -> Result<String> {
        let diagram = run.history.to_spacetime()?;
        Ok(Self::format_grid_compact(&diagram))
    }

    /// Save a run to `output_dir` in the requested format, returning the files written
    pub fn save_run<P: AsRef<Path>>(run: &Run, output_dir: P, format: OutputFormat) -> Result<Vec<PathBuf>> {
        let output_dir = output_dir.as_ref();
        std::fs::create_dir_all(output_dir)
            .with_context(|| format!("Failed to create directory: {}", output_dir.display()))?;

        let label = run.metadata.label();
        let mut written = Vec::new();

        match format {
            OutputFormat::Text => {
                let path = output_dir.join(format!("{}.txt", label));
                let content = run
                    .history
                    .iter()
                    .enumerate()
                    .map(|(step, grid)| format!("# step {}\n{}", step, grid_to_string(grid)))
                    .join("\n");
                std::fs::write(&path, content)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                written.push(path);
            }
            OutputFormat::Json => {
                let path = output_dir.join(format!("{}.json", label));
                let export = RunExport {
                    metadata: &run.metadata,
                    cancelled: run.cancelled,
                    analysis: run.analysis(),
                    history: &run.history,
                };
                let json = serde_json::to_string_pretty(&export).context("Failed to serialize run")?;
                std::fs::write(&path, json)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                written.push(path);
            }
            OutputFormat::Visual => {
                let path = output_dir.join(format!("{}_visual.txt", label));
                std::fs::write(&path, Self::create_visual_evolution(run))
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                written.push(path);
            }
        }

        // 1D runs also get their space-time diagram
        if run.history.initial().is_row() {
            let path = output_dir.join(format!("{}_history.txt", label));
            let diagram = run.history.to_spacetime()?;
            std::fs::write(&path, grid_to_string(&diagram))
                .with_context(|| format!("Failed to write {}", path.display()))?;
            written.push(path);
        }

        Ok(written)
    }

    fn create_visual_evolution(run: &Run) -> String {
        let mut output = String::new();

        output.push_str(&format!("Visual Evolution - {}\n", run.metadata.label()));
        output.push_str(&"=".repeat(50));
        output.push('\n');

        for (step, grid) in run.history.iter().enumerate() {
            output.push_str(&format!("\nStep {} (Living: {}):\n", step, grid.living_count()));
            output.push_str(&Self::format_grid_with_coords(grid));
        }

        output.push('\n');
        output.push_str(&Self::format_run_summary(run, &run.analysis()));
        output
    }
}

/// Progress indicator for long-running operations
pub struct ProgressIndicator {
    total: usize,
    current: usize,
    last_update: std::time::Instant,
    start_time: std::time::Instant,
}

impl ProgressIndicator {
    /// Progress bar over `total` steps
    pub fn new(total: usize) -> Self {
        let now = std::time::Instant::now();
        Self {
            total,
            current: 0,
            last_update: now,
            start_time: now,
        }
    }

    /// Update progress and redraw at most every 100ms
    pub fn update(&mut self, current: usize) {
        self.current = current;
        let now = std::time::Instant::now();

        if now.duration_since(self.last_update).as_millis() > 100 {
            self.display();
            self.last_update = now;
        }
    }

    pub fn display(&self) {
        let percentage = if self.total > 0 {
            (self.current as f64 / self.total as f64) * 100.0
        } else {
            0.0
        };

        let elapsed = self.start_time.elapsed();
        let eta = if self.current > 0 {
            let rate = self.current as f64 / elapsed.as_secs_f64();
            let remaining = self.total.saturating_sub(self.current) as f64 / rate;
            format!("ETA: {:.1}s", remaining)
        } else {
            "ETA: --".to_string()
        };

        print!("\rStep: {}/{} ({:.1}%) - {}", self.current, self.total, percentage, eta);
        std::io::Write::flush(&mut std::io::stdout()).ok();
    }

    pub fn finish(&self) {
        println!(
            "\rCompleted: {}/{} - Total time: {:.1}s",
            self.current,
            self.total,
            self.start_time.elapsed().as_secs_f64()
        );
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err() && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::RuleSpec;
    use crate::simulation::Simulation;
    use tempfile::tempdir;

    fn rule_30_run() -> Run {
        Simulation::new(RuleSpec::Elementary { rule_number: 30 }, "center", 9, 3, None)
            .unwrap()
            .run()
            .unwrap()
    }

    #[test]
    fn test_grid_formatting() {
        let grid = Grid::from_rows(vec![vec![1, 0, 1], vec![0, 1, 0]]).unwrap();

        assert_eq!(RunFormatter::format_grid_compact(&grid), "█·█\n·█·\n");

        let with_coords = RunFormatter::format_grid_with_coords(&grid);
        assert!(with_coords.contains(" 0 1 2"));
        assert!(with_coords.contains(" 1 ··██··"));
    }

    #[test]
    fn test_spacetime_formatting() {
        let diagram = RunFormatter::format_spacetime(&rule_30_run()).unwrap();
        let lines: Vec<&str> = diagram.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "····█····");
        assert_eq!(lines[1], "···███···");
    }

    #[test]
    fn test_run_summary() {
        let run = rule_30_run();
        let summary = RunFormatter::format_run_summary(&run, &run.analysis());
        assert!(summary.contains("1d_rule_30_center_3"));
        assert!(summary.contains("Steps: 3 of 3"));
    }

    #[test]
    fn test_save_run_formats() {
        let temp_dir = tempdir().unwrap();
        let run = rule_30_run();

        let text = RunFormatter::save_run(&run, temp_dir.path(), OutputFormat::Text).unwrap();
        assert_eq!(text.len(), 2);
        let content = std::fs::read_to_string(&text[0]).unwrap();
        assert!(content.starts_with("# step 0\n000010000\n"));
        let diagram = std::fs::read_to_string(&text[1]).unwrap();
        assert_eq!(diagram.lines().count(), 4);

        let json = RunFormatter::save_run(&run, temp_dir.path(), OutputFormat::Json).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&json[0]).unwrap()).unwrap();
        assert_eq!(value["metadata"]["preset"], "center");
        assert_eq!(value["history"].as_array().unwrap().len(), 4);
        assert_eq!(value["analysis"]["population"][1], 3);

        let visual = RunFormatter::save_run(&run, temp_dir.path(), OutputFormat::Visual).unwrap();
        assert!(visual[0].to_string_lossy().ends_with("_visual.txt"));
    }

    #[test]
    fn test_progress_indicator() {
        let mut progress = ProgressIndicator::new(100);
        progress.update(50);
        assert_eq!(progress.current, 50);
        assert_eq!(progress.total, 100);
    }

    #[test]
    fn test_color_output() {
        let colored = ColorOutput::colored("test", Color::Red);
        assert!(colored.contains("test"));
        assert!(ColorOutput::success("OK").contains("OK"));
        assert!(ColorOutput::error("failed").contains("failed"));
    }
}
