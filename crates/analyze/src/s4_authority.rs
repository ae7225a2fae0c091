//! S4 — Authority Topology analysis.
//!
//! For every role and state, derives the actions the role can take. A
//! non-terminal state in which neither party can act is a stall: the
//! booking can only leave it through a back-office job. Terminal states
//! that still offer actions are reported too.

use crate::model::LifecycleModel;
use autorenta_core::{Action, BookingState, Role};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize)]
pub struct S4Result {
    /// role -> state -> actions. States without actions are omitted.
    pub role_authority: BTreeMap<Role, BTreeMap<BookingState, Vec<Action>>>,
    /// Non-terminal states where no role has an action.
    pub stalled_states: Vec<BookingState>,
    /// Terminal states that still offer actions.
    pub acting_terminal_states: Vec<BookingState>,
    /// States where exactly one role can act, with that role.
    pub single_party_states: BTreeMap<BookingState, Role>,
    pub total_authority_entries: usize,
}

/// S4 — Derive the authority topology of the lifecycle.
pub fn analyze_authority(model: &LifecycleModel) -> S4Result {
    let mut role_authority: BTreeMap<Role, BTreeMap<BookingState, Vec<Action>>> = BTreeMap::new();
    let mut stalled_states = Vec::new();
    let mut acting_terminal_states = Vec::new();
    let mut single_party_states = BTreeMap::new();
    let mut total_authority_entries = 0;

    for &state in &model.states {
        let acting: Vec<Role> = Role::ALL
            .iter()
            .copied()
            .filter(|&role| !model.actions_for(state, role).is_empty())
            .collect();

        for &role in &acting {
            let actions = model.actions_for(state, role).to_vec();
            total_authority_entries += actions.len();
            role_authority
                .entry(role)
                .or_default()
                .insert(state, actions);
        }

        let terminal = model.is_terminal(state);
        match (acting.as_slice(), terminal) {
            ([], false) => stalled_states.push(state),
            ([_, ..], true) => acting_terminal_states.push(state),
            ([only], false) => {
                single_party_states.insert(state, *only);
            }
            _ => {}
        }
    }

    S4Result {
        role_authority,
        stalled_states,
        acting_terminal_states,
        single_party_states,
        total_authority_entries,
    }
}
