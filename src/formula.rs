//! Formula parsing for longitudinal plots
//!
//! A formula names the variables that drive a summary:
//!
//! ```text
//! OUTCOME ~ TIME [ | GROUP1 [+ GROUP2 ...] ] [ ~ FACET1 [+ FACET2 ...] ]
//! ```
//!
//! The parser only decomposes the text. Whether the named fields exist in a
//! dataset is checked later by [`crate::summary::compute`], which has the data.
//!
//! # Example
//!
//! ```rust
//! use longplot::formula::parse;
//!
//! let spec = parse("AVAL ~ AVISIT | TRT01A ~ PARAMCD").unwrap();
//! assert_eq!(spec.outcome(), "AVAL");
//! assert_eq!(spec.time(), "AVISIT");
//! assert_eq!(spec.groups(), &["TRT01A".to_string()]);
//! assert_eq!(spec.facets(), &["PARAMCD".to_string()]);
//! ```

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// Errors raised while parsing a formula
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormulaError {
    /// The formula text does not follow the grammar
    #[error("Malformed formula '{spec}': {reason}")]
    Malformed { spec: String, reason: String },
}

impl FormulaError {
    fn malformed(spec: &str, reason: impl Into<String>) -> Self {
        FormulaError::Malformed {
            spec: spec.to_string(),
            reason: reason.into(),
        }
    }
}

/// The variables referenced by a formula
///
/// Created once per plotting call and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormulaSpec {
    outcome: String,
    time: String,
    groups: Vec<String>,
    facets: Vec<String>,
}

impl FormulaSpec {
    /// Outcome (y-axis) field
    pub fn outcome(&self) -> &str {
        &self.outcome
    }

    /// Time (x-axis) field
    pub fn time(&self) -> &str {
        &self.time
    }

    /// Grouping fields, in formula order
    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    /// Facet fields, in formula order
    pub fn facets(&self) -> &[String] {
        &self.facets
    }

    /// Every referenced field: outcome, time, groups, then facets
    pub fn fields(&self) -> Vec<&str> {
        let mut fields = vec![self.outcome.as_str(), self.time.as_str()];
        fields.extend(self.groups.iter().map(String::as_str));
        fields.extend(self.facets.iter().map(String::as_str));
        fields
    }
}

impl FromStr for FormulaSpec {
    type Err = FormulaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

impl fmt::Display for FormulaSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ~ {}", self.outcome, self.time)?;
        if !self.groups.is_empty() {
            write!(f, " | {}", self.groups.join(" + "))?;
        }
        if !self.facets.is_empty() {
            write!(f, " ~ {}", self.facets.join(" + "))?;
        }
        Ok(())
    }
}

/// Parse a formula into a [`FormulaSpec`]
///
/// # Errors
///
/// Returns [`FormulaError::Malformed`] when the text has no `~`, when the
/// outcome or time token is empty after trimming, when a `+` list contains an
/// empty token, or when more than two `~` are present.
pub fn parse(spec_text: &str) -> Result<FormulaSpec, FormulaError> {
    let (outcome, rest) = spec_text
        .split_once('~')
        .ok_or_else(|| FormulaError::malformed(spec_text, "expected '~' after the outcome"))?;

    let outcome = outcome.trim();
    if outcome.is_empty() {
        return Err(FormulaError::malformed(spec_text, "outcome is empty"));
    }

    let (time, groups, facets) = match rest.split_once('|') {
        Some((time, grouping)) => {
            // The facet clause belongs to the grouping part
            let (groups, facets) = match grouping.split_once('~') {
                Some((groups, facets)) => (groups, Some(facets)),
                None => (grouping, None),
            };
            (time, Some(groups), facets)
        }
        None => match rest.split_once('~') {
            Some((time, facets)) => (time, None, Some(facets)),
            None => (rest, None, None),
        },
    };

    let time = time.trim();
    if time.is_empty() {
        return Err(FormulaError::malformed(spec_text, "time is empty"));
    }
    if time.contains('~') || facets.is_some_and(|f| f.contains('~')) {
        return Err(FormulaError::malformed(spec_text, "too many '~'"));
    }
    if time.contains('+') {
        return Err(FormulaError::malformed(
            spec_text,
            "time must name a single field",
        ));
    }

    let groups = match groups {
        Some(groups) => split_terms(spec_text, groups, "group")?,
        None => Vec::new(),
    };
    let facets = match facets {
        Some(facets) => split_terms(spec_text, facets, "facet")?,
        None => Vec::new(),
    };

    Ok(FormulaSpec {
        outcome: outcome.to_string(),
        time: time.to_string(),
        groups,
        facets,
    })
}

fn split_terms(spec_text: &str, clause: &str, kind: &str) -> Result<Vec<String>, FormulaError> {
    if clause.trim().is_empty() {
        return Err(FormulaError::malformed(
            spec_text,
            format!("{kind} clause is empty"),
        ));
    }
    clause
        .split('+')
        .map(str::trim)
        .map(|term| {
            if term.is_empty() {
                Err(FormulaError::malformed(
                    spec_text,
                    format!("empty {kind} term"),
                ))
            } else {
                Ok(term.to_string())
            }
        })
        .collect()
}
