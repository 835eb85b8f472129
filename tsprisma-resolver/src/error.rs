//! Error types for include resolution.

// These warnings are false positives - the fields are used by derive macros
#![allow(unused_assignments)]

use miette::Diagnostic;
use thiserror::Error;
use tsprisma_decl::DeclError;

/// Result type for resolver operations.
pub type ResolveResult<T> = Result<T, ResolveError>;

/// Errors that abort a resolution run.
///
/// Unknown references and unions that do not reduce to a single candidate
/// are not errors: they resolve to "no further nesting".
#[derive(Error, Debug, Diagnostic)]
pub enum ResolveError {
    /// The all-models table alias is not registered.
    #[error("entry point `{name}` was not found in any designated namespace")]
    #[diagnostic(
        code(tsprisma::resolver::missing_entry_point),
        help("the declarations must contain `type {name} = {{ Model: {{ Operation: Args }} }}` inside one of: {namespaces}")
    )]
    MissingEntryPoint { name: String, namespaces: String },

    /// The declaration text could not be parsed.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] DeclError),

    /// Invalid configuration value.
    #[error("configuration error: {message}")]
    #[diagnostic(code(tsprisma::resolver::config_error))]
    Config { message: String },

    /// TOML parsing error.
    #[error("failed to parse TOML")]
    #[diagnostic(code(tsprisma::resolver::toml_error))]
    Toml {
        #[source]
        source: toml::de::Error,
    },

    /// Error reading a file.
    #[error("failed to read file: {path}")]
    #[diagnostic(code(tsprisma::resolver::io_error))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl ResolveError {
    /// Create a missing entry point error.
    pub fn missing_entry_point(name: impl Into<String>, namespaces: &[String]) -> Self {
        Self::MissingEntryPoint {
            name: name.into(),
            namespaces: namespaces.join(", "),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Check if this error means the input had no entry point.
    pub fn is_missing_entry_point(&self) -> bool {
        matches!(self, Self::MissingEntryPoint { .. })
    }
}
