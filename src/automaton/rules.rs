//! Transition rules: Conway's Game of Life and elementary 1D lookup-table rules

use super::Grid;
use crate::error::{AutomatonError, AutomatonResult};
use itertools::Itertools;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Elementary rule numbers this implementation accepts
pub const SUPPORTED_RULES: &[u8] = &[30, 110];

/// Whether an automaton evolves a single row or a full plane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimensionality {
    #[serde(rename = "1d")]
    OneD,
    #[serde(rename = "2d")]
    TwoD,
}

impl Dimensionality {
    /// Short lowercase tag used in labels and file names
    pub fn tag(self) -> &'static str {
        match self {
            Dimensionality::OneD => "1d",
            Dimensionality::TwoD => "2d",
        }
    }
}

impl fmt::Display for Dimensionality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimensionality::OneD => write!(f, "1D"),
            Dimensionality::TwoD => write!(f, "2D"),
        }
    }
}

/// A pure state transition from one grid to the next.
pub trait Transition {
    /// Dimensionality of the grids this rule evolves
    fn dimensionality(&self) -> Dimensionality;

    /// Fail fast when a grid cannot be evolved by this rule
    fn check_shape(&self, grid: &Grid) -> AutomatonResult<()> {
        if self.dimensionality() == Dimensionality::OneD && !grid.is_row() {
            return Err(AutomatonError::DimensionMismatch {
                expected: format!("1x{} row", grid.width()),
                actual: format!("{}x{} grid", grid.height(), grid.width()),
            });
        }
        Ok(())
    }

    /// Compute the next state. The input is never modified.
    fn step(&self, grid: &Grid) -> AutomatonResult<Grid>;
}

/// Conway's Game of Life with a dead, non-wrapping border
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameOfLife;

impl GameOfLife {
    /// Evolve the grid one generation forward.
    ///
    /// Every cell reads its neighborhood from `current`, so no cell ever sees
    /// a value computed in the same pass.
    pub fn evolve(current: &Grid) -> Grid {
        let width = current.width();
        let next_cells: Vec<bool> = (0..current.height())
            .into_par_iter()
            .flat_map_iter(|row| {
                (0..width).map(move |col| {
                    Self::should_be_alive(current.get(row, col), current.count_neighbors(row, col))
                })
            })
            .collect();

        Grid::from_raw(width, current.height(), next_cells)
    }

    /// Check if a cell should be alive in the next generation given its current state and neighbor count
    pub fn should_be_alive(current_state: bool, neighbor_count: u8) -> bool {
        match (current_state, neighbor_count) {
            (false, 3) => true,
            (true, count) => count == 2 || count == 3,
            (false, _) => false,
        }
    }
}

impl Transition for GameOfLife {
    fn dimensionality(&self) -> Dimensionality {
        Dimensionality::TwoD
    }

    fn step(&self, grid: &Grid) -> AutomatonResult<Grid> {
        Ok(Self::evolve(grid))
    }
}

/// Wolfram elementary rule over the (left, center, right) neighborhood.
///
/// Entry `k` of the table is the next state of a cell whose neighborhood
/// reads `k` in binary, left cell as the most significant bit. The table is
/// therefore just the bits of the rule number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementaryRule {
    number: u8,
    table: [bool; 8],
}

impl ElementaryRule {
    /// Build the lookup table for a Wolfram rule number; only rules 30 and 110 are accepted
    pub fn new(rule_number: u32) -> AutomatonResult<Self> {
        let number = u8::try_from(rule_number)
            .ok()
            .filter(|number| SUPPORTED_RULES.contains(number))
            .ok_or(AutomatonError::InvalidRuleNumber {
                rule_number,
                supported: SUPPORTED_RULES,
            })?;

        let mut table = [false; 8];
        for (pattern, entry) in table.iter_mut().enumerate() {
            *entry = (number >> pattern) & 1 == 1;
        }
        Ok(Self { number, table })
    }

    /// Wolfram rule number
    pub fn number(&self) -> u8 {
        self.number
    }

    /// Next state of the center cell
    #[inline]
    pub fn apply(&self, left: bool, center: bool, right: bool) -> bool {
        let pattern = (usize::from(left) << 2) | (usize::from(center) << 1) | usize::from(right);
        self.table[pattern]
    }

    /// All eight neighborhoods as `"lcr"` bit strings, from `111` down to `000`
    pub fn patterns() -> Vec<String> {
        (0..8usize).rev().map(|pattern| format!("{:03b}", pattern)).collect()
    }

    /// The neighborhoods that produce a live cell, in the same order as [`Self::patterns`]
    pub fn live_patterns(&self) -> Vec<String> {
        (0..8usize)
            .rev()
            .filter(|&pattern| self.table[pattern])
            .map(|pattern| format!("{:03b}", pattern))
            .collect()
    }

    /// Evolve a single row. The first and last cells have an incomplete
    /// neighborhood and are carried over unchanged.
    pub fn evolve_row(&self, row: &[bool]) -> Vec<bool> {
        let mut next = row.to_vec();
        for (offset, (left, center, right)) in row.iter().copied().tuple_windows().enumerate() {
            next[offset + 1] = self.apply(left, center, right);
        }
        next
    }
}

impl Transition for ElementaryRule {
    fn dimensionality(&self) -> Dimensionality {
        Dimensionality::OneD
    }

    fn step(&self, grid: &Grid) -> AutomatonResult<Grid> {
        self.check_shape(grid)?;
        let next = self.evolve_row(grid.cells());
        Ok(Grid::from_raw(grid.width(), 1, next))
    }
}

/// Serializable identity of a transition rule
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuleSpec {
    #[default]
    GameOfLife,
    Elementary { rule_number: u32 },
}

impl RuleSpec {
    /// Shape of grid the resolved rule operates on
    pub fn dimensionality(&self) -> Dimensionality {
        match self {
            RuleSpec::GameOfLife => Dimensionality::TwoD,
            RuleSpec::Elementary { .. } => Dimensionality::OneD,
        }
    }

    /// Resolve to an executable rule, validating the rule number
    pub fn resolve(&self) -> AutomatonResult<TransitionRule> {
        match *self {
            RuleSpec::GameOfLife => Ok(TransitionRule::GameOfLife(GameOfLife)),
            RuleSpec::Elementary { rule_number } => {
                ElementaryRule::new(rule_number).map(TransitionRule::Elementary)
            }
        }
    }

    /// Name used in labels, e.g. `game_of_life` or `rule_30`
    pub fn name(&self) -> String {
        match self {
            RuleSpec::GameOfLife => "game_of_life".to_string(),
            RuleSpec::Elementary { rule_number } => format!("rule_{}", rule_number),
        }
    }
}

impl fmt::Display for RuleSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for RuleSpec {
    type Err = String;

    /// Accepts `game_of_life`/`life`/`gol`, or a rule number as `30`, `rule30` or `rule_30`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "game_of_life" | "life" | "gol" => return Ok(RuleSpec::GameOfLife),
            _ => {}
        }

        let digits = normalized
            .strip_prefix("rule")
            .map(|rest| rest.trim_start_matches(['_', '-']))
            .unwrap_or(&normalized);
        digits
            .parse::<u32>()
            .map(|rule_number| RuleSpec::Elementary { rule_number })
            .map_err(|_| format!("Unknown rule '{}': expected game_of_life or a rule number", s))
    }
}

/// A resolved rule, dispatching on the variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionRule {
    GameOfLife(GameOfLife),
    Elementary(ElementaryRule),
}

impl TransitionRule {
    /// Serializable identity of this rule
    pub fn spec(&self) -> RuleSpec {
        match self {
            TransitionRule::GameOfLife(_) => RuleSpec::GameOfLife,
            TransitionRule::Elementary(rule) => RuleSpec::Elementary {
                rule_number: u32::from(rule.number()),
            },
        }
    }
}

impl Transition for TransitionRule {
    fn dimensionality(&self) -> Dimensionality {
        match self {
            TransitionRule::GameOfLife(rule) => rule.dimensionality(),
            TransitionRule::Elementary(rule) => rule.dimensionality(),
        }
    }

    fn step(&self, grid: &Grid) -> AutomatonResult<Grid> {
        match self {
            TransitionRule::GameOfLife(rule) => rule.step(grid),
            TransitionRule::Elementary(rule) => rule.step(grid),
        }
    }
}
