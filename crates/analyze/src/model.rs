//! LifecycleModel: the tables an analysis runs over.
//!
//! Built either from the compiled-in booking tables or from a lifecycle
//! export (`autorenta lifecycle` output), so an edited table can be checked
//! before it ships.

use std::collections::BTreeMap;

use autorenta_core::{
    available_actions, next_states, Action, BookingLifecycle, BookingState, Role,
};
use serde::{Deserialize, Serialize};

/// Errors from loading a lifecycle export.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// The export JSON is not shaped like a lifecycle export.
    #[error("invalid lifecycle export: {0}")]
    InvalidExport(String),

    #[error("unknown role '{role}' in actions of {state}")]
    UnknownRole { state: BookingState, role: String },

    #[error("unknown analysis '{0}' (expected s1, s2, s3 or s4)")]
    UnknownAnalysis(String),
}

/// A directed edge of the transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub from: BookingState,
    pub to: BookingState,
}

/// Lifecycle tables in analyzable form.
#[derive(Debug, Clone, Serialize)]
pub struct LifecycleModel {
    pub states: Vec<BookingState>,
    pub initial: BookingState,
    pub transitions: Vec<Transition>,
    pub actions: BTreeMap<BookingState, BTreeMap<Role, Vec<Action>>>,
}

#[derive(Deserialize)]
struct ExportedLifecycle {
    initial: BookingState,
    states: Vec<ExportedState>,
}

#[derive(Deserialize)]
struct ExportedState {
    state: BookingState,
    #[serde(default)]
    next_states: Vec<BookingState>,
    #[serde(default)]
    actions: BTreeMap<String, Vec<Action>>,
}

impl LifecycleModel {
    /// The tables compiled into `autorenta-core`.
    pub fn booking() -> Self {
        let states = BookingState::ALL.to_vec();
        let transitions = states
            .iter()
            .flat_map(|&from| {
                next_states(from)
                    .iter()
                    .map(move |&to| Transition { from, to })
            })
            .collect();
        let actions = states
            .iter()
            .map(|&state| {
                let by_role = Role::ALL
                    .iter()
                    .map(|&role| (role, available_actions(state, role).to_vec()))
                    .filter(|(_, actions)| !actions.is_empty())
                    .collect();
                (state, by_role)
            })
            .collect();

        LifecycleModel {
            states,
            initial: BookingState::Draft,
            transitions,
            actions,
        }
    }

    /// Load a model from a lifecycle export.
    pub fn from_export(export: &serde_json::Value) -> Result<Self, AnalysisError> {
        let parsed: ExportedLifecycle = serde_json::from_value(export.clone())
            .map_err(|e| AnalysisError::InvalidExport(e.to_string()))?;

        let mut states = Vec::with_capacity(parsed.states.len());
        let mut transitions = Vec::new();
        let mut actions = BTreeMap::new();

        for entry in parsed.states {
            states.push(entry.state);
            transitions.extend(entry.next_states.iter().map(|&to| Transition {
                from: entry.state,
                to,
            }));

            let mut by_role = BTreeMap::new();
            for (role, list) in entry.actions {
                let role: Role = role.parse().map_err(|_| AnalysisError::UnknownRole {
                    state: entry.state,
                    role: role.clone(),
                })?;
                if !list.is_empty() {
                    by_role.insert(role, list);
                }
            }
            actions.insert(entry.state, by_role);
        }

        Ok(LifecycleModel {
            states,
            initial: parsed.initial,
            transitions,
            actions,
        })
    }

    pub fn successors(&self, state: BookingState) -> impl Iterator<Item = BookingState> + '_ {
        self.transitions
            .iter()
            .filter(move |t| t.from == state)
            .map(|t| t.to)
    }

    pub fn is_terminal(&self, state: BookingState) -> bool {
        self.successors(state).next().is_none()
    }

    pub fn actions_for(&self, state: BookingState, role: Role) -> &[Action] {
        self.actions
            .get(&state)
            .and_then(|by_role| by_role.get(&role))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

impl From<&BookingLifecycle> for LifecycleModel {
    fn from(lifecycle: &BookingLifecycle) -> Self {
        LifecycleModel {
            states: lifecycle.states.iter().map(|e| e.state).collect(),
            initial: lifecycle.initial,
            transitions: lifecycle
                .states
                .iter()
                .flat_map(|e| {
                    e.next_states
                        .iter()
                        .map(move |&to| Transition { from: e.state, to })
                })
                .collect(),
            actions: lifecycle
                .states
                .iter()
                .map(|e| (e.state, e.actions.clone()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booking_model_mirrors_core_tables() {
        let model = LifecycleModel::booking();
        assert_eq!(model.states.len(), 13);
        assert_eq!(model.initial, BookingState::Draft);
        assert!(model.is_terminal(BookingState::Completed));
        assert!(!model.is_terminal(BookingState::Active));
        assert_eq!(
            model.actions_for(BookingState::Confirmed, Role::Owner),
            &[Action::CheckIn]
        );
        assert!(model.actions_for(BookingState::Completed, Role::Renter).is_empty());
    }

    #[test]
    fn export_round_trips_into_the_same_model() {
        let export = BookingLifecycle::build().to_json();
        let loaded = LifecycleModel::from_export(&export).unwrap();
        let built = LifecycleModel::booking();
        assert_eq!(loaded.states, built.states);
        assert_eq!(loaded.transitions, built.transitions);
        assert_eq!(loaded.actions, built.actions);
    }

    #[test]
    fn from_lifecycle_matches_booking() {
        let model = LifecycleModel::from(&BookingLifecycle::build());
        assert_eq!(model.transitions, LifecycleModel::booking().transitions);
    }

    #[test]
    fn export_with_unknown_role_is_rejected() {
        let export = serde_json::json!({
            "initial": "DRAFT",
            "states": [
                { "state": "DRAFT", "next_states": [], "actions": { "admin": ["cancel"] } }
            ]
        });
        let err = LifecycleModel::from_export(&export).unwrap_err();
        assert!(matches!(err, AnalysisError::UnknownRole { .. }));
    }

    #[test]
    fn export_with_unknown_state_is_rejected() {
        let export = serde_json::json!({
            "initial": "DRAFT",
            "states": [{ "state": "SHIPPED" }]
        });
        assert!(matches!(
            LifecycleModel::from_export(&export),
            Err(AnalysisError::InvalidExport(_))
        ));
    }
}
