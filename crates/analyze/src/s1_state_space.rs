//! S1 — Complete State Space analysis.
//!
//! Enumerates the declared states, the transition relation and the
//! terminal states. Also captures transition targets that are not declared
//! as states, which can only happen in a hand-edited lifecycle export.

use crate::model::LifecycleModel;
use autorenta_core::BookingState;
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Serialize)]
pub struct S1Result {
    pub declared_states: Vec<BookingState>,
    pub initial_state: BookingState,
    pub transitions: Vec<(BookingState, BookingState)>,
    pub terminal_states: Vec<BookingState>,
    pub state_count: usize,
    /// Transition targets missing from `declared_states`.
    pub undeclared_targets: BTreeSet<BookingState>,
}

/// S1 — Enumerate the complete state space of the lifecycle.
pub fn analyze_state_space(model: &LifecycleModel) -> S1Result {
    let transitions: Vec<(BookingState, BookingState)> =
        model.transitions.iter().map(|t| (t.from, t.to)).collect();

    let terminal_states = model
        .states
        .iter()
        .copied()
        .filter(|s| model.is_terminal(*s))
        .collect();

    let declared: BTreeSet<BookingState> = model.states.iter().copied().collect();
    let undeclared_targets = model
        .transitions
        .iter()
        .map(|t| t.to)
        .filter(|to| !declared.contains(to))
        .collect();

    S1Result {
        declared_states: model.states.clone(),
        initial_state: model.initial,
        state_count: model.states.len(),
        transitions,
        terminal_states,
        undeclared_targets,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Transition;
    use std::collections::BTreeMap;

    #[test]
    fn booking_lifecycle_state_space() {
        let result = analyze_state_space(&LifecycleModel::booking());
        assert_eq!(result.state_count, 13);
        assert_eq!(result.initial_state, BookingState::Draft);
        assert_eq!(
            result.terminal_states,
            vec![BookingState::Completed, BookingState::Cancelled]
        );
        assert!(result
            .transitions
            .contains(&(BookingState::Active, BookingState::Returned)));
        assert!(result.undeclared_targets.is_empty());
    }

    #[test]
    fn undeclared_target_is_captured() {
        let model = LifecycleModel {
            states: vec![BookingState::Draft],
            initial: BookingState::Draft,
            transitions: vec![Transition {
                from: BookingState::Draft,
                to: BookingState::Cancelled,
            }],
            actions: BTreeMap::new(),
        };
        let result = analyze_state_space(&model);
        assert_eq!(
            result.undeclared_targets.into_iter().collect::<Vec<_>>(),
            vec![BookingState::Cancelled]
        );
        assert!(result.terminal_states.is_empty());
    }
}
