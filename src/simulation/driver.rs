//! Evolution driver: repeatedly applies a transition rule and records every state

use super::History;
use crate::automaton::{Grid, Transition};
use crate::error::AutomatonResult;
use std::ops::ControlFlow;
use std::time::{Duration, Instant};

/// Outcome of a run that may have been stopped between steps
#[derive(Debug, Clone)]
pub struct Evolution {
    pub history: History,
    pub steps_requested: usize,
    /// Set when the observer stopped the run before the last step
    pub cancelled: bool,
}

/// Evolve `initial` for `steps` transitions.
///
/// The returned history holds `steps + 1` states, the initial one first.
pub fn run<T: Transition + ?Sized>(initial: Grid, rule: &T, steps: usize) -> AutomatonResult<History> {
    run_with(initial, rule, steps, |_, _| ControlFlow::Continue(())).map(|evolution| evolution.history)
}

/// Evolve `initial`, calling `observer` with the step index and new state after every transition.
///
/// Returning `ControlFlow::Break` from the observer ends the run early; the
/// history then holds every state computed so far.
pub fn run_with<T, F>(initial: Grid, rule: &T, steps: usize, mut observer: F) -> AutomatonResult<Evolution>
where
    T: Transition + ?Sized,
    F: FnMut(usize, &Grid) -> ControlFlow<()>,
{
    rule.check_shape(&initial)?;

    let mut history = History::new(initial);
    for step in 1..=steps {
        let next = rule.step(history.latest())?;
        history.push(next);

        if observer(step, history.latest()).is_break() {
            return Ok(Evolution {
                history,
                steps_requested: steps,
                cancelled: step < steps,
            });
        }
    }

    Ok(Evolution {
        history,
        steps_requested: steps,
        cancelled: false,
    })
}

/// Observer that stops a run once `limit` has elapsed since it was created
pub fn deadline(limit: Duration) -> impl FnMut(usize, &Grid) -> ControlFlow<()> {
    let start = Instant::now();
    move |_: usize, _: &Grid| {
        if start.elapsed() >= limit {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::{ElementaryRule, GameOfLife, RuleSpec};
    use crate::error::AutomatonError;

    fn blinker() -> Grid {
        Grid::from_rows(vec![
            vec![0, 0, 0, 0, 0],
            vec![0, 0, 0, 0, 0],
            vec![0, 1, 1, 1, 0],
            vec![0, 0, 0, 0, 0],
            vec![0, 0, 0, 0, 0],
        ])
        .unwrap()
    }

    #[test]
    fn test_zero_steps_returns_initial_only() {
        let history = run(blinker(), &GameOfLife, 0).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history.initial(), &blinker());
    }

    #[test]
    fn test_history_length_and_order() {
        let history = run(blinker(), &GameOfLife, 4).unwrap();
        assert_eq!(history.len(), 5);
        for (k, grid) in history.iter().enumerate() {
            let expected_horizontal = k % 2 == 0;
            assert_eq!(grid == &blinker(), expected_horizontal, "step {}", k);
        }
    }

    #[test]
    fn test_runs_through_resolved_rule() {
        let rule = RuleSpec::Elementary { rule_number: 30 }.resolve().unwrap();
        let initial = Grid::from_row(vec![0, 0, 0, 1, 0, 0, 0]).unwrap();
        let history = run(initial, &rule, 2).unwrap();
        assert_eq!(history[1].to_rows(), vec![vec![0, 0, 1, 1, 1, 0, 0]]);
        assert_eq!(history[2].to_rows(), vec![vec![0, 1, 1, 0, 0, 1, 0]]);
    }

    #[test]
    fn test_shape_mismatch_fails_before_stepping() {
        let rule = ElementaryRule::new(110).unwrap();
        let result = run(Grid::new(4, 4).unwrap(), &rule, 0);
        assert!(matches!(result, Err(AutomatonError::DimensionMismatch { .. })));
    }

    #[test]
    fn test_observer_can_stop_early() {
        let mut seen = Vec::new();
        let evolution = run_with(blinker(), &GameOfLife, 10, |step, grid| {
            seen.push((step, grid.living_count()));
            if step == 3 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        })
        .unwrap();

        assert!(evolution.cancelled);
        assert_eq!(evolution.steps_requested, 10);
        assert_eq!(evolution.history.len(), 4);
        assert_eq!(seen, vec![(1, 3), (2, 3), (3, 3)]);
    }

    #[test]
    fn test_cancelled_only_before_last_step() {
        let evolution = run_with(blinker(), &GameOfLife, 2, |_, _| ControlFlow::Break(())).unwrap();
        assert!(evolution.cancelled);
        assert_eq!(evolution.history.len(), 2);

        let evolution = run_with(blinker(), &GameOfLife, 1, |_, _| ControlFlow::Break(())).unwrap();
        assert!(!evolution.cancelled);
    }

    #[test]
    fn test_expired_deadline_stops_after_first_step() {
        let evolution = run_with(blinker(), &GameOfLife, 50, deadline(Duration::ZERO)).unwrap();
        assert!(evolution.cancelled);
        assert_eq!(evolution.history.len(), 2);
    }
}
