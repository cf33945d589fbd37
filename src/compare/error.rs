//! Comparative testing error types

use crate::summary::SummaryError;
use thiserror::Error;

/// Errors raised by [`annotate`](super::annotate)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompareError {
    /// Between-group tests need exactly one grouping variable
    #[error("Comparative tests need exactly one group field, found {groups}")]
    UnsupportedDesign { groups: usize },

    /// Field validation against the raw dataset failed
    #[error(transparent)]
    Summary(#[from] SummaryError),
}
