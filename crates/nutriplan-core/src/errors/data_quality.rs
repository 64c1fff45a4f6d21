//! Recoverable data-quality corrections and the result wrapper that carries them.

use serde::{Deserialize, Serialize};

use super::error_code::{self, NutriplanErrorCode};

/// A correction applied to an adequacy value during sanitization.
/// Never fatal: the corrected value is used and the issue is reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
pub enum DataQualityIssue {
    #[error("{region}/{nutrient}: {original} looks like a unit-entry error, rescaled to {corrected}")]
    UnitEntry {
        region: String,
        nutrient: String,
        original: f64,
        corrected: f64,
    },

    #[error("{region}/{nutrient}: {original} exceeds 100%, capped")]
    AboveRange {
        region: String,
        nutrient: String,
        original: f64,
    },

    #[error("{region}/{nutrient}: negative value {original} set to 0")]
    Negative {
        region: String,
        nutrient: String,
        original: f64,
    },

    #[error("{region}/{nutrient}: missing, filled with {filled}")]
    Missing {
        region: String,
        nutrient: String,
        filled: f64,
    },

    #[error("{region}: no adequacy data, average taken as {filled}")]
    NoAdequacyData { region: String, filled: f64 },
}

impl DataQualityIssue {
    pub fn region(&self) -> &str {
        match self {
            Self::UnitEntry { region, .. }
            | Self::AboveRange { region, .. }
            | Self::Negative { region, .. }
            | Self::Missing { region, .. }
            | Self::NoAdequacyData { region, .. } => region,
        }
    }
}

impl NutriplanErrorCode for DataQualityIssue {
    fn error_code(&self) -> &'static str {
        error_code::DATA_QUALITY
    }
}

/// Result that accumulates non-fatal data-quality issues alongside the data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Checked<T> {
    /// The corrected data.
    pub data: T,
    /// Corrections applied while producing `data`.
    pub issues: Vec<DataQualityIssue>,
}

impl<T> Checked<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            issues: Vec::new(),
        }
    }

    pub fn add_issue(&mut self, issue: DataQualityIssue) {
        self.issues.push(issue);
    }

    /// Returns true if no correction was needed.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn issue_count(&self) -> usize {
        self.issues.len()
    }

    /// Transform the data, keeping the accumulated issues.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Checked<U> {
        Checked {
            data: f(self.data),
            issues: self.issues,
        }
    }
}
