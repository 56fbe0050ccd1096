use reqwest::StatusCode;
use shared::domain::ContactId;
use thiserror::Error;

/// Failure taxonomy for [`ContactStore`](crate::ContactStore) operations.
///
/// `Transport` and `Status` are both network failures and are treated
/// identically by callers; the split exists only so logs can tell a refused
/// connection apart from a server-side rejection. `UnknownContact` is a
/// precondition violation and signals a defect in the caller.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("contact request failed in transport: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("contact endpoint returned status {0}")]
    Status(StatusCode),
    #[error("no cached contact with id {0}; refusing to build a partial update")]
    UnknownContact(ContactId),
}

impl StoreError {
    pub fn is_network_failure(&self) -> bool {
        matches!(self, StoreError::Transport(_) | StoreError::Status(_))
    }
}
