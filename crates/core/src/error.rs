/// Errors raised when turning free text into lifecycle vocabulary.
///
/// Derivation itself never fails; these only surface at the edges where
/// callers hand in state, role, action or status names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unknown booking state: {0}")]
    UnknownState(String),

    #[error("unknown role: {0} (expected owner or renter)")]
    UnknownRole(String),

    #[error("unknown action: {0}")]
    UnknownAction(String),

    #[error("unknown booking status: {0}")]
    UnknownStatus(String),
}

/// A rejected change of the persisted `status` column.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot change status from \"{from}\" to \"{to}\"; allowed transitions: {allowed}")]
pub struct StatusTransitionError {
    pub from: String,
    pub to: String,
    /// Comma-separated allowed targets, or `none` for terminal statuses.
    pub allowed: String,
}
