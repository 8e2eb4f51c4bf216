//! Cellular automaton core: grid state, generators and transition rules

pub mod generators;
pub mod grid;
pub mod io;
pub mod rules;

pub use generators::{generate, generate_preset, seeded_rng, Preset};
pub use grid::Grid;
pub use io::{create_example_grids, load_grid_from_file, save_grid_to_file};
pub use rules::{Dimensionality, ElementaryRule, GameOfLife, RuleSpec, Transition, TransitionRule};
