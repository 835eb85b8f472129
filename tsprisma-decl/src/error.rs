//! Error types for declaration parsing.

// These warnings are false positives - the fields are used by derive macros
#![allow(unused_assignments)]

use miette::Diagnostic;
use thiserror::Error;

/// Result type for declaration parsing.
pub type DeclResult<T> = Result<T, DeclError>;

/// Errors that can occur while parsing declaration text.
#[derive(Error, Debug, Diagnostic)]
pub enum DeclError {
    /// Error reading a file.
    #[error("failed to read file: {path}")]
    #[diagnostic(code(tsprisma::decl::io_error))]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The text is not a declaration file the grammar accepts.
    #[error("syntax error in declarations: {message}")]
    #[diagnostic(code(tsprisma::decl::syntax_error))]
    SyntaxError {
        #[source_code]
        src: String,
        #[label("error here")]
        span: miette::SourceSpan,
        message: String,
    },

    /// The parse tree did not have the shape the AST builder expects.
    #[error("malformed parse tree: expected {expected} at {start}..{end}")]
    #[diagnostic(code(tsprisma::decl::malformed_tree))]
    MalformedTree {
        expected: String,
        start: usize,
        end: usize,
    },
}

impl DeclError {
    /// Create a syntax error with source location.
    pub fn syntax(
        src: impl Into<String>,
        offset: usize,
        len: usize,
        message: impl Into<String>,
    ) -> Self {
        Self::SyntaxError {
            src: src.into(),
            span: (offset, len).into(),
            message: message.into(),
        }
    }

    /// Build a syntax error from a pest failure, keeping its position.
    pub fn from_pest<R: pest::RuleType>(src: &str, err: pest::error::Error<R>) -> Self {
        let (offset, len) = match err.location {
            pest::error::InputLocation::Pos(pos) => (pos, 0),
            pest::error::InputLocation::Span((start, end)) => (start, end - start),
        };
        Self::syntax(src, offset, len, err.variant.message().into_owned())
    }

    /// Create a malformed tree error for a node covering `span`.
    pub fn malformed(expected: impl Into<String>, span: crate::ast::Span) -> Self {
        Self::MalformedTree {
            expected: expected.into(),
            start: span.start,
            end: span.end,
        }
    }
}

#[cfg(test)]
#[allow(unused_assignments)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error() {
        let err = DeclError::syntax("type A = ;", 9, 1, "expected type");

        match err {
            DeclError::SyntaxError { src, span, message } => {
                assert_eq!(src, "type A = ;");
                assert_eq!(span.offset(), 9);
                assert_eq!(span.len(), 1);
                assert_eq!(message, "expected type");
            }
            _ => panic!("Expected SyntaxError"),
        }
    }

    #[test]
    fn test_syntax_error_display() {
        let err = DeclError::syntax("}", 0, 1, "unexpected `}`");
        assert_eq!(
            err.to_string(),
            "syntax error in declarations: unexpected `}`"
        );
    }

    #[test]
    fn test_io_error_display() {
        let err = DeclError::IoError {
            path: "index.d.ts".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(err.to_string(), "failed to read file: index.d.ts");
    }

    #[test]
    fn test_error_codes() {
        use miette::Diagnostic;

        let err = DeclError::syntax("", 0, 0, "empty");
        let code = err.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("tsprisma::decl::syntax_error"));
    }
}
