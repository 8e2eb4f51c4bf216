//! Ordered record of the states produced by a run

use crate::automaton::Grid;
use crate::error::{AutomatonError, AutomatonResult};
use serde::Serialize;
use std::ops::Index;

/// Append-only sequence of grid snapshots.
///
/// Index 0 is the initial state and index `k` the state after `k`
/// transitions. Only the evolution driver appends; everyone else gets
/// shared references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct History {
    states: Vec<Grid>,
}

impl History {
    /// Start a history from its initial state
    pub fn new(initial: Grid) -> Self {
        Self { states: vec![initial] }
    }

    pub(crate) fn push(&mut self, grid: Grid) {
        self.states.push(grid);
    }

    /// State before any transition
    pub fn initial(&self) -> &Grid {
        &self.states[0]
    }

    /// Most recent state
    pub fn latest(&self) -> &Grid {
        // never empty: constructed with the initial state
        &self.states[self.states.len() - 1]
    }

    /// State after `step` transitions
    pub fn get(&self, step: usize) -> Option<&Grid> {
        self.states.get(step)
    }

    /// Number of snapshots, including the initial state
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Number of transitions applied
    pub fn steps(&self) -> usize {
        self.states.len() - 1
    }

    /// Iterate over states in step order
    pub fn iter(&self) -> std::slice::Iter<'_, Grid> {
        self.states.iter()
    }

    /// Stack a one-dimensional history into a space-time diagram, one row per step.
    pub fn to_spacetime(&self) -> AutomatonResult<Grid> {
        let width = self.initial().width();
        let mut cells = Vec::with_capacity(width * self.states.len());
        for grid in &self.states {
            if !grid.is_row() || grid.width() != width {
                return Err(AutomatonError::DimensionMismatch {
                    expected: format!("1x{} row", width),
                    actual: format!("{}x{} grid", grid.height(), grid.width()),
                });
            }
            cells.extend_from_slice(grid.cells());
        }
        Ok(Grid::from_raw(width, self.states.len(), cells))
    }
}

impl Index<usize> for History {
    type Output = Grid;

    fn index(&self, step: usize) -> &Grid {
        &self.states[step]
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a Grid;
    type IntoIter = std::slice::Iter<'a, Grid>;

    fn into_iter(self) -> Self::IntoIter {
        self.states.iter()
    }
}
