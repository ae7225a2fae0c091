//! S2 — Reachable States analysis.
//!
//! Derives the set of states reachable from the initial state via the
//! transition relation using BFS, and reports dead states (declared but
//! unreachable). A second backwards BFS from the terminal states finds
//! trapped states: reachable, but with no path to any terminal state.

use crate::model::LifecycleModel;
use autorenta_core::BookingState;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap, VecDeque};

#[derive(Debug, Clone, Serialize)]
pub struct S2Result {
    pub initial_state: BookingState,
    pub reachable_states: BTreeSet<BookingState>,
    pub unreachable_states: BTreeSet<BookingState>,
    /// States from which no terminal state can be reached.
    pub trapped_states: BTreeSet<BookingState>,
}

fn bfs(
    start: impl IntoIterator<Item = BookingState>,
    adjacency: &HashMap<BookingState, Vec<BookingState>>,
) -> BTreeSet<BookingState> {
    let mut visited = BTreeSet::new();
    let mut queue = VecDeque::new();

    for s in start {
        if visited.insert(s) {
            queue.push_back(s);
        }
    }

    while let Some(state) = queue.pop_front() {
        if let Some(neighbors) = adjacency.get(&state) {
            for &next in neighbors {
                if visited.insert(next) {
                    queue.push_back(next);
                }
            }
        }
    }
    visited
}

/// S2 — Derive reachable states via BFS from the initial state.
pub fn analyze_reachability(model: &LifecycleModel) -> S2Result {
    // Build adjacency lists: forward and reversed
    let mut forward: HashMap<BookingState, Vec<BookingState>> = HashMap::new();
    let mut backward: HashMap<BookingState, Vec<BookingState>> = HashMap::new();
    for t in &model.transitions {
        forward.entry(t.from).or_default().push(t.to);
        backward.entry(t.to).or_default().push(t.from);
    }

    let reachable = bfs([model.initial], &forward);

    let declared: BTreeSet<BookingState> = model.states.iter().copied().collect();
    let unreachable: BTreeSet<BookingState> = declared.difference(&reachable).copied().collect();

    let terminals = model.states.iter().copied().filter(|s| model.is_terminal(*s));
    let can_finish = bfs(terminals, &backward);
    let trapped = reachable.difference(&can_finish).copied().collect();

    S2Result {
        initial_state: model.initial,
        reachable_states: reachable,
        unreachable_states: unreachable,
        trapped_states: trapped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Transition;
    use std::collections::BTreeMap;

    fn model(states: Vec<BookingState>, edges: &[(BookingState, BookingState)]) -> LifecycleModel {
        LifecycleModel {
            states,
            initial: BookingState::Draft,
            transitions: edges
                .iter()
                .map(|&(from, to)| Transition { from, to })
                .collect(),
            actions: BTreeMap::new(),
        }
    }

    #[test]
    fn every_booking_state_is_reachable_and_can_finish() {
        let result = analyze_reachability(&LifecycleModel::booking());
        assert_eq!(result.reachable_states.len(), 13);
        assert!(result.unreachable_states.is_empty());
        assert!(result.trapped_states.is_empty());
    }

    #[test]
    fn disconnected_state_is_unreachable() {
        use BookingState::*;
        let m = model(
            vec![Draft, PendingPayment, Cancelled, Disputed],
            &[(Draft, PendingPayment), (PendingPayment, Cancelled)],
        );
        let result = analyze_reachability(&m);
        assert_eq!(
            result.unreachable_states.into_iter().collect::<Vec<_>>(),
            vec![Disputed]
        );
    }

    #[test]
    fn cycle_without_exit_is_trapped() {
        use BookingState::*;
        let m = model(
            vec![Draft, Active, Returned, Cancelled],
            &[
                (Draft, Active),
                (Draft, Cancelled),
                (Active, Returned),
                (Returned, Active),
            ],
        );
        let result = analyze_reachability(&m);
        assert_eq!(
            result.trapped_states.into_iter().collect::<Vec<_>>(),
            vec![Active, Returned]
        );
    }
}
