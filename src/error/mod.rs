use thiserror::Error;

use crate::compare::CompareError;
use crate::data::DataError;
use crate::formula::FormulaError;
use crate::summary::SummaryError;

#[derive(Error, Debug)]
pub enum LongplotError {
    #[error("Error in the formula: {0}")]
    FormulaError(#[from] FormulaError),
    #[error("Error in the dataset: {0}")]
    DataError(#[from] DataError),
    #[error("Error computing the summary: {0}")]
    SummaryError(#[from] SummaryError),
    #[error("Error in the group comparison: {0}")]
    CompareError(#[from] CompareError),
    #[error("Error serializing the analysis: {0}")]
    JsonError(#[from] serde_json::Error),
}
