//! The error taxonomy of this crate.
//!
//! Errors fall in three families with very different handling policies:
//! * [`SourceUnavailable`] aborts a run before any board mutation,
//! * [`TransportError`] is recovered per-operation during an apply,
//! * [`ConfigError`] is fatal at startup, before anything else runs.

use std::path::PathBuf;

use thiserror::Error;

/// A failed call to the remote task-board service.
///
/// During [`apply`](crate::reconciler::apply), these are recorded and the run continues;
/// the board is eventually-consistent external state and partial application beats
/// leaving it blocked.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP request to the board service failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("board service answered HTTP {status}: {message}")]
    UnexpectedStatus { status: u16, message: String },

    #[error("no list named {0:?} on the board")]
    ListNotFound(String),

    #[error("invalid board API URL: {0}")]
    BadUrl(#[from] url::ParseError),

    /// Used by mocked boards in tests
    #[error("{0}")]
    Other(String),
}

/// The target-title source could not be read.
///
/// This is always fatal for the run that encounters it: reconciling against a partial
/// or empty-by-accident target set would delete every legitimate in-progress task.
#[derive(Debug, Error)]
pub enum SourceUnavailable {
    #[error("unable to read template file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("template file {path:?} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Used by mocked sources in tests
    #[error("{0}")]
    Other(String),
}

/// Missing or invalid startup configuration. Reported before any reconciliation attempt.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),
}

/// A day-level update operation failed outright.
#[derive(Debug, Error)]
pub enum UpdateError {
    #[error(transparent)]
    Source(#[from] SourceUnavailable),

    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Every planned operation failed during the apply step.
    /// Partial success is reported as success (with errors in the report), but a run
    /// that changed nothing it meant to change is surfaced to the operator.
    #[error("all {0} planned board operations failed")]
    AllOperationsFailed(usize),
}
