//! Summary statistics over a run's history

use super::History;
use crate::automaton::Grid;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// What happened over the course of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryAnalysis {
    /// Living cells at each step
    pub population: Vec<usize>,
    /// First step with no living cells
    pub extinct_at: Option<usize>,
    /// First step whose state reappears later in the history
    pub cycle_start: Option<usize>,
    /// Distance between the first repeated pair of states
    pub period: Option<usize>,
    /// Living-cell fraction of the last state
    pub final_density: f64,
}

impl HistoryAnalysis {
    /// Summarize populations and detect the first repeated state
    pub fn analyze(history: &History) -> Self {
        let population: Vec<usize> = history.iter().map(Grid::living_count).collect();
        let extinct_at = population.iter().position(|&count| count == 0);
        let (cycle_start, period) = match Self::first_repeat(history) {
            Some((start, period)) => (Some(start), Some(period)),
            None => (None, None),
        };

        Self {
            population,
            extinct_at,
            cycle_start,
            period,
            final_density: history.latest().density(),
        }
    }

    /// Earliest `(i, j - i)` with `history[i] == history[j]`, scanning `j` forwards
    fn first_repeat(history: &History) -> Option<(usize, usize)> {
        let mut seen: HashMap<&Grid, usize> = HashMap::new();
        for (step, grid) in history.iter().enumerate() {
            if let Some(&first) = seen.get(grid) {
                return Some((first, step - first));
            }
            seen.insert(grid, step);
        }
        None
    }

    /// The run settled into a state that maps to itself
    pub fn is_still_life(&self) -> bool {
        self.period == Some(1)
    }

    /// The run settled into a cycle longer than one step
    pub fn is_oscillator(&self) -> bool {
        self.period.is_some_and(|period| period > 1)
    }

    pub fn peak_population(&self) -> usize {
        self.population.iter().copied().max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::GameOfLife;
    use crate::simulation::driver::run;

    #[test]
    fn test_blinker_is_period_two() {
        let grid = Grid::from_rows(vec![
            vec![0, 0, 0, 0, 0],
            vec![0, 0, 0, 0, 0],
            vec![0, 1, 1, 1, 0],
            vec![0, 0, 0, 0, 0],
            vec![0, 0, 0, 0, 0],
        ])
        .unwrap();
        let analysis = HistoryAnalysis::analyze(&run(grid, &GameOfLife, 6).unwrap());

        assert_eq!(analysis.population, vec![3; 7]);
        assert_eq!(analysis.cycle_start, Some(0));
        assert_eq!(analysis.period, Some(2));
        assert!(analysis.is_oscillator());
        assert!(!analysis.is_still_life());
        assert_eq!(analysis.extinct_at, None);
    }

    #[test]
    fn test_lonely_cell_dies_out() {
        let grid = Grid::from_rows(vec![vec![0, 0, 0], vec![0, 1, 0], vec![0, 0, 0]]).unwrap();
        let analysis = HistoryAnalysis::analyze(&run(grid, &GameOfLife, 3).unwrap());

        assert_eq!(analysis.population, vec![1, 0, 0, 0]);
        assert_eq!(analysis.extinct_at, Some(1));
        // The empty grid maps to itself
        assert_eq!(analysis.cycle_start, Some(1));
        assert!(analysis.is_still_life());
        assert_eq!(analysis.peak_population(), 1);
        assert_eq!(analysis.final_density, 0.0);
    }

    #[test]
    fn test_no_repeat_in_short_history() {
        let grid = Grid::from_rows(vec![vec![0, 0, 0], vec![0, 1, 0], vec![0, 0, 0]]).unwrap();
        let analysis = HistoryAnalysis::analyze(&History::new(grid));
        assert_eq!(analysis.period, None);
        assert_eq!(analysis.cycle_start, None);
    }
}
