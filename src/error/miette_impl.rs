//! Miette integration for pretty error reporting.

use miette::{Diagnostic, Severity};
use thiserror::Error;

use super::{AggregateError, SingleIoError, Stage};

/// A diagnostic wrapper for input errors compatible with miette.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
pub struct IoDiagnostic {
    /// The error message
    pub message: String,

    #[source]
    /// The underlying error source
    pub source: Option<std::io::Error>,

    #[help]
    /// Help text for the user
    pub help: Option<String>,

    #[diagnostic(severity)]
    /// Severity level
    pub severity: Severity,
}

fn help_for(e: &SingleIoError) -> String {
    match (e.stage, e.kind()) {
        (Stage::Open, std::io::ErrorKind::NotFound) => format!("check that '{}' exists", e.target),
        (Stage::Open, std::io::ErrorKind::PermissionDenied) => {
            format!("check the permissions on '{}'", e.target)
        }
        _ => "check your input paths".into(),
    }
}

impl From<SingleIoError> for IoDiagnostic {
    fn from(e: SingleIoError) -> Self {
        IoDiagnostic {
            message: format!("[{}] on '{}'", e.stage, e.target),
            help: Some(help_for(&e)),
            source: Some(e.error),
            severity: Severity::Error,
        }
    }
}

impl From<AggregateError> for IoDiagnostic {
    fn from(agg: AggregateError) -> Self {
        let more = agg.len().saturating_sub(1);
        match agg.errors.into_iter().next() {
            Some(e) => {
                let mut diag = IoDiagnostic::from(e);
                if more > 0 {
                    diag.message = format!("{} (and {more} more)", diag.message);
                }
                diag
            }
            None => IoDiagnostic {
                message: "Unknown I/O error".into(),
                source: None,
                help: None,
                severity: Severity::Error,
            },
        }
    }
}

impl From<AggregateError> for miette::Report {
    fn from(agg: AggregateError) -> Self {
        miette::Report::new(IoDiagnostic::from(agg))
    }
}
