use thiserror::Error;

use crate::utils::dp_cache::DepthLimitExceeded;

/// Everything that can go wrong turning a row into an arrangement count.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArrangementError {
    #[error("invalid spring {0:?}, expected '.', '#' or '?'")]
    InvalidSpring(char),
    #[error("group {position} has length 0, group lengths must be positive")]
    ZeroGroup { position: usize },
    #[error("invalid group length {0:?}")]
    InvalidGroup(String),
    #[error("row {0:?} has no group list")]
    MissingGroups(String),
    #[error("arrangement count does not fit in 64 bits")]
    Overflow,
    #[error(transparent)]
    DepthLimit(#[from] DepthLimitExceeded),
}
