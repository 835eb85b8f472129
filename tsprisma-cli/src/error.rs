//! CLI error types and result alias.

// These warnings are false positives - the fields are used by derive macros
#![allow(unused_assignments)]

use miette::Diagnostic;
use thiserror::Error;
use tsprisma_resolver::ResolveError;

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types
#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    /// IO error
    #[error("IO error: {0}")]
    #[diagnostic(code(tsprisma::cli::io))]
    Io(#[from] std::io::Error),

    /// A declaration file could not be read
    #[error("failed to read {path}")]
    #[diagnostic(code(tsprisma::cli::read))]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Resolution of a declaration file failed
    #[error("failed to resolve includes for {path}")]
    #[diagnostic(code(tsprisma::cli::resolve))]
    Resolve {
        path: String,
        #[source]
        #[diagnostic_source]
        source: ResolveError,
    },

    /// Configuration error
    #[error("Configuration error")]
    #[diagnostic(code(tsprisma::cli::config))]
    Config {
        #[source]
        #[diagnostic_source]
        source: ResolveError,
    },

    /// JSON output error
    #[error("JSON error: {0}")]
    #[diagnostic(code(tsprisma::cli::json))]
    Json(#[from] serde_json::Error),

    /// A background task failed
    #[error("Task error: {0}")]
    #[diagnostic(code(tsprisma::cli::task))]
    Task(String),
}

impl From<tokio::task::JoinError> for CliError {
    fn from(err: tokio::task::JoinError) -> Self {
        CliError::Task(err.to_string())
    }
}

#[cfg(test)]
#[allow(unused_assignments)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_resolve_error_keeps_source() {
        let err = CliError::Resolve {
            path: "index.d.ts".to_string(),
            source: ResolveError::missing_entry_point("TSPrismaModels", &[]),
        };

        assert_eq!(err.to_string(), "failed to resolve includes for index.d.ts");
        let source = err.source().map(ToString::to_string).unwrap_or_default();
        assert!(source.contains("TSPrismaModels"));
    }

    #[test]
    fn test_error_codes() {
        let err = CliError::Task("cancelled".to_string());
        let code = err.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("tsprisma::cli::task"));
    }
}
