//! End-to-end evolution scenarios through the public API

use cellular_automata::automaton::{generate, seeded_rng, Dimensionality, GameOfLife, RuleSpec};
use cellular_automata::simulation::{run, Simulation};
use cellular_automata::{simulate, AutomatonError, Grid, Settings};

fn row(bits: &str) -> Grid {
    Grid::from_row(bits.bytes().map(|b| b - b'0').collect()).unwrap()
}

#[test]
fn blinker_has_period_two() {
    let horizontal = Grid::from_rows(vec![
        vec![0, 0, 0, 0, 0],
        vec![0, 0, 0, 0, 0],
        vec![0, 1, 1, 1, 0],
        vec![0, 0, 0, 0, 0],
        vec![0, 0, 0, 0, 0],
    ])
    .unwrap();
    let vertical = Grid::from_rows(vec![
        vec![0, 0, 0, 0, 0],
        vec![0, 0, 1, 0, 0],
        vec![0, 0, 1, 0, 0],
        vec![0, 0, 1, 0, 0],
        vec![0, 0, 0, 0, 0],
    ])
    .unwrap();

    let history = run(horizontal.clone(), &GameOfLife, 2).unwrap();
    assert_eq!(history[1], vertical);
    assert_eq!(history[2], horizontal);
}

#[test]
fn rule_30_single_step() {
    let rule = RuleSpec::Elementary { rule_number: 30 }.resolve().unwrap();
    let history = run(row("0001000"), &rule, 1).unwrap();
    assert_eq!(history[1], row("0011100"));
}

#[test]
fn elementary_rules_keep_edges() {
    for rule_number in [30, 110] {
        let rule = RuleSpec::Elementary { rule_number }.resolve().unwrap();
        for initial in [row("0000100000"), row("1010110101"), row("1111111111")] {
            let history = run(initial.clone(), &rule, 25).unwrap();
            for grid in &history {
                assert_eq!(grid.get(0, 0), initial.get(0, 0));
                assert_eq!(grid.get(0, 9), initial.get(0, 9));
            }
        }
    }
}

#[test]
fn empty_plane_stays_empty() {
    let history = run(Grid::new(9, 9).unwrap(), &GameOfLife, 30).unwrap();
    assert!(history.iter().all(Grid::is_empty));
}

#[test]
fn majority_rule_preserves_dimensions() {
    let initial = generate(Dimensionality::TwoD, 17, "random", &mut seeded_rng(Some(11))).unwrap();
    let history = run(initial, &GameOfLife, 10).unwrap();
    assert!(history.iter().all(|grid| grid.shape() == (17, 17)));
}

#[test]
fn deterministic_presets_repeat() {
    let cases = [
        (RuleSpec::GameOfLife, "T"),
        (RuleSpec::GameOfLife, "chaos"),
        (RuleSpec::Elementary { rule_number: 30 }, "center"),
        (RuleSpec::Elementary { rule_number: 110 }, "center"),
    ];
    for (rule, preset) in cases {
        let first = Simulation::new(rule, preset, 21, 15, None).unwrap().run().unwrap();
        let second = Simulation::new(rule, preset, 21, 15, None).unwrap().run().unwrap();
        assert_eq!(first.history, second.history, "{} {}", rule, preset);
        assert_eq!(first.history.len(), 16);
    }
}

#[test]
fn invalid_preset_and_rule_number() {
    assert!(matches!(
        generate(Dimensionality::TwoD, 10, "foo", &mut seeded_rng(None)),
        Err(AutomatonError::InvalidPreset { .. })
    ));
    assert!(matches!(
        RuleSpec::Elementary { rule_number: 42 }.resolve(),
        Err(AutomatonError::InvalidRuleNumber { rule_number: 42, .. })
    ));
}

#[test]
fn zero_steps_keeps_only_initial() {
    let initial = row("0101");
    let rule = RuleSpec::Elementary { rule_number: 110 }.resolve().unwrap();
    let history = run(initial.clone(), &rule, 0).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history.initial(), &initial);
}

#[test]
fn simulate_from_default_settings() {
    let mut settings = Settings::default();
    settings.simulation.grid_size = 12;
    settings.simulation.steps = 8;

    let run = simulate(&settings).unwrap();
    assert_eq!(run.history.len(), 9);
    assert_eq!(run.metadata.label(), "2d_game_of_life_chaos_8");
    assert_eq!(run.history.initial().living_count(), 5);
}
