//! Summary statistics for longitudinal plots
//!
//! `longplot` turns clustered, long-format observations (one row per subject
//! per timepoint) into the per-timepoint table a line or box plot is drawn
//! from: a center and an uncertainty band for the observed outcome and for
//! each subject's change from baseline, optionally with between-group tests.
//!
//! The variables are named with a small formula language,
//! `outcome ~ time | group1 + group2 ~ facet1`; see [`formula`].
//!
//! ```rust
//! use longplot::prelude::*;
//!
//! let data = Dataset::builder()
//!     .categorical("id", ["1", "1", "1", "2", "2", "2", "3", "3", "3"])
//!     .numeric("day", [0.0, 7.0, 14.0, 0.0, 7.0, 14.0, 0.0, 7.0, 14.0])
//!     .numeric("score", [9.0, 12.0, 15.0, 10.0, 13.0, 16.0, 11.0, 14.0, 17.0])
//!     .build()
//!     .unwrap();
//!
//! let analysis = analyze(&data, "score ~ day", "id", 0, &AnalysisOptions::default()).unwrap();
//! let centers: Vec<f64> = analysis.rows.iter().map(|r| r.row.observed.center).collect();
//! assert_eq!(centers, vec![10.0, 13.0, 16.0]);
//! ```

pub mod analysis;
pub mod compare;
pub mod data;
pub mod error;
pub mod formula;
pub mod summary;

pub use crate::analysis::{analyze, Analysis, AnalysisOptions};
pub use crate::compare::annotate;
pub use crate::formula::{parse, FormulaSpec};
pub use crate::summary::compute;
pub use error::LongplotError;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::analysis::{analyze, Analysis, AnalysisOptions};
    pub use crate::compare::{annotate, AnnotatedRow, Significance, TestKind};
    pub use crate::data::{build_dataset, Column, DataRow, Dataset, TimeValue};
    pub use crate::error::LongplotError;
    pub use crate::formula::{parse, FormulaSpec};
    pub use crate::summary::{compute, SummaryOptions, SummaryRow, SummaryStatistic, ViewStats};
}
