use crate::{epidemic::SirdParams, prelude::Real};
use std::io;
use thiserror::Error;

/// Errors raised while loading data, configuring or running a calibration.
///
/// Every failure is deterministic: the same input always produces the same
/// error, so there is nothing to retry.
#[derive(Debug, Error)]
pub enum SirdError {
    /// Input table lacks one of the required columns.
    #[error("missing column `{0}`")]
    MissingColumn(&'static str),

    /// A field could not be coerced to the expected type or holds a value
    /// that is not a valid count.
    #[error("parse error at line {line}: {message}")]
    Parse { line: u64, message: String },

    /// Two sequences that must be aligned day by day have different lengths.
    #[error("length mismatch: expected {expected} values, found {found}")]
    LengthMismatch { expected: usize, found: usize },

    /// A rate, state component or integration setting is outside its domain.
    #[error("invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: Real,
        reason: &'static str,
    },

    /// The computation produced NaN or infinity.
    #[error("non-finite value in {0}")]
    NonFinite(&'static str),

    /// Evaluation of a grid candidate failed.
    #[error("candidate {params}: {source}")]
    Candidate {
        params: SirdParams,
        source: Box<SirdError>,
    },

    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl SirdError {
    pub(crate) fn invalid(name: &'static str, value: Real, reason: &'static str) -> Self {
        SirdError::InvalidParameter {
            name,
            value,
            reason,
        }
    }

    pub(crate) fn for_candidate(self, params: SirdParams) -> Self {
        SirdError::Candidate {
            params,
            source: Box::new(self),
        }
    }
}

pub type Result<T> = std::result::Result<T, SirdError>;
