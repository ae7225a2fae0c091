//! autorenta-core: the booking lifecycle of the AutoRenta marketplace.
//!
//! Maps a persisted booking snapshot to one canonical [`BookingState`] and
//! answers the questions UI and orchestration code ask about it: which
//! transitions are legal, which actions each party has, where the booking
//! sits on the progress bar. Everything here is pure: no I/O, no mutation,
//! safe to call concurrently and on every render.
//!
//! # Public API
//!
//! - [`derive_state()`] / [`derive()`] -- snapshot to state (total, never fails)
//! - [`can_transition()`], [`next_states()`], [`is_terminal_state()`]
//! - [`available_actions()`], [`requires_action_from()`], [`pending_message()`]
//! - [`timeline_step_index()`]
//! - [`BookingLifecycle`] -- serializable export of all of the above tables
//! - [`BookingStatus`] -- the persisted status column and its own transition rules

pub mod actions;
pub mod booking;
pub mod derive;
pub mod error;
pub mod lifecycle;
pub mod state;
pub mod status;
pub mod timeline;
pub mod transitions;

// ── Convenience re-exports ───────────────────────────────────────────

pub use actions::{
    available_actions, available_actions_for, pending_message, requires_action_from, Action, Role,
};
pub use booking::Booking;
pub use derive::{derive, derive_state, Derivation, DerivationRule, DERIVATION_RULES};
pub use error::{ParseError, StatusTransitionError};
pub use lifecycle::{BookingLifecycle, StateEntry};
pub use state::BookingState;
pub use status::{status_display, validate_status_transition, BookingStatus, StatusDisplay, Tone};
pub use timeline::{timeline_step_index, TIMELINE_LAST_STEP};
pub use transitions::{can_transition, is_terminal_state, next_states, transition_edges};
