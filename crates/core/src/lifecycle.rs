//! Serializable export of the lifecycle tables.
//!
//! UI clients fetch this once and render badges, progress bars and buttons
//! from it instead of hard-coding the tables.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::actions::{available_actions, Action, Role};
use crate::state::BookingState;
use crate::timeline::timeline_step_index;
use crate::transitions::{is_terminal_state, next_states};

/// Everything known about one state.
#[derive(Debug, Clone, Serialize)]
pub struct StateEntry {
    pub state: BookingState,
    pub label: &'static str,
    pub terminal: bool,
    pub legacy: bool,
    pub timeline_index: Option<u8>,
    pub next_states: Vec<BookingState>,
    /// Keyed by role; roles with no actions are omitted.
    pub actions: BTreeMap<Role, Vec<Action>>,
}

/// The full set of lifecycle tables.
#[derive(Debug, Clone, Serialize)]
pub struct BookingLifecycle {
    pub initial: BookingState,
    pub states: Vec<StateEntry>,
}

impl BookingLifecycle {
    pub fn build() -> Self {
        let states = BookingState::ALL
            .iter()
            .map(|&state| StateEntry {
                state,
                label: state.label(),
                terminal: is_terminal_state(state),
                legacy: state.is_legacy(),
                timeline_index: timeline_step_index(state),
                next_states: next_states(state).to_vec(),
                actions: Role::ALL
                    .iter()
                    .filter_map(|&role| {
                        let actions = available_actions(state, role);
                        (!actions.is_empty()).then(|| (role, actions.to_vec()))
                    })
                    .collect(),
            })
            .collect();

        BookingLifecycle {
            initial: BookingState::Draft,
            states,
        }
    }

    pub fn entry(&self, state: BookingState) -> Option<&StateEntry> {
        self.states.iter().find(|e| e.state == state)
    }

    pub fn to_json(&self) -> serde_json::Value {
        // Serialization cannot fail: every field is a plain value and the
        // only map is keyed by `Role`, a unit enum that serializes as a string.
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
