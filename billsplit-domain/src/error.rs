use crate::model::{ItemId, ParticipantId};
use thiserror::Error;

/// Field-level rejection of user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },
    #[error("color must be #RRGGBB (got {0:?})")]
    InvalidColor(String),
    #[error("quantity must be at least 1")]
    ZeroQuantity,
    #[error("{field} must not be negative")]
    Negative { field: &'static str },
    #[error("{field} must not exceed 1000000000000")]
    TooLarge { field: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BillEditError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("participant {0} already exists")]
    DuplicateParticipant(ParticipantId),
    #[error("participant {0} not found")]
    UnknownParticipant(ParticipantId),
    #[error("item {0} already exists")]
    DuplicateItem(ItemId),
    #[error("item {0} not found")]
    UnknownItem(ItemId),
}
