//! Error types and policies for processing several inputs.
//!
//! The readers in this crate pass `std::io::Error` through untouched. This
//! module is the layer above them that attaches path context:
//! - `ErrorPolicy`: Controls whether to fail fast or accumulate errors
//! - `Stage`: Indicates where an error occurred for a given input
//! - `SingleIoError`: A single I/O error with its path
//! - `AggregateError`: A collection of errors when using `Accumulate` policy

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Stop at the first error encountered
    #[default]
    FastFail,
    /// Keep going and return all errors together
    Accumulate,
}

impl FromStr for ErrorPolicy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fast_fail" | "fastfail" | "fast-fail" => Ok(ErrorPolicy::FastFail),
            "accumulate" => Ok(ErrorPolicy::Accumulate),
            _ => Err(UnknownPolicy(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown error policy: {0}")]
pub struct UnknownPolicy(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Error while opening the input
    Open,
    /// Error while reading or handling an open input
    Read,
    Close,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Open => write!(f, "Open"),
            Stage::Read => write!(f, "Read"),
            Stage::Close => write!(f, "Close"),
        }
    }
}

#[derive(Debug)]
pub struct SingleIoError {
    /// Stage where the error occurred
    pub stage: Stage,
    /// Path of the input ("-" for stdin)
    pub target: String,
    /// The underlying error
    pub error: std::io::Error,
}

impl SingleIoError {
    pub fn new(stage: Stage, target: impl Into<String>, error: std::io::Error) -> Self {
        Self {
            stage,
            target: target.into(),
            error,
        }
    }

    /// Shorthand for checking the underlying error kind.
    pub fn kind(&self) -> std::io::ErrorKind {
        self.error.kind()
    }
}

impl fmt::Display for SingleIoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.stage, self.target, self.error)
    }
}

impl std::error::Error for SingleIoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// An aggregate of multiple I/O errors.
///
/// Under `ErrorPolicy::FastFail` it holds exactly one error.
#[derive(Debug, Error)]
pub struct AggregateError {
    /// Collection of individual errors
    pub errors: Vec<SingleIoError>,
}

impl fmt::Display for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "I/O encountered {} error(s):", self.errors.len())?;
        for (i, e) in self.errors.iter().enumerate() {
            writeln!(f, "  #{}: {}", i + 1, e)?;
        }
        Ok(())
    }
}

impl AggregateError {
    /// Create a new aggregate error with a single error.
    pub fn single(error: SingleIoError) -> Self {
        Self {
            errors: vec![error],
        }
    }

    /// Check if there are no errors.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get the number of errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Paths that failed, in the order they failed.
    pub fn targets(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.target.as_str()).collect()
    }
}

impl From<SingleIoError> for AggregateError {
    fn from(error: SingleIoError) -> Self {
        Self::single(error)
    }
}

#[cfg(feature = "miette")]
mod miette_impl;

#[cfg(feature = "miette")]
pub use miette_impl::*;
