//! Error taxonomy for core operations.

use std::io;

use thiserror::Error;

use cyclesync_types::{PartnerId, UserId, ValidationError};

use crate::engine::CycleError;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Cycle(#[from] CycleError),
    #[error("no partner with id {0}")]
    PartnerNotFound(PartnerId),
    #[error("no account for user {0}")]
    UserNotFound(UserId),
    #[error("account storage failed: {0}")]
    Storage(#[from] io::Error),
    #[error("failed to serialize account snapshot: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl CoreError {
    /// Input was rejected before anything ran.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, CoreError::Validation(_) | CoreError::Cycle(_))
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CoreError::PartnerNotFound(_) | CoreError::UserNotFound(_)
        )
    }
}
