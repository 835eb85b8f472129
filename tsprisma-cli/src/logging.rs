//! Logging setup for the `tsprisma` binary.
//!
//! # Environment Variables
//!
//! - `TSPRISMA_DEBUG=true` / `1` / `yes` - Enable debug logging
//! - `TSPRISMA_LOG_LEVEL=trace|debug|info|warn|error` - Set a specific level
//! - `TSPRISMA_LOG_FORMAT=json|pretty|compact` - Output format (default: json)
//!
//! Logs go to stderr so that JSON written to stdout stays pipeable.

use std::env;
use std::sync::Once;

static INIT: Once = Once::new();

/// Environment variable enabling debug logging.
pub const DEBUG_VAR: &str = "TSPRISMA_DEBUG";
/// Environment variable selecting the log level.
pub const LEVEL_VAR: &str = "TSPRISMA_LOG_LEVEL";
/// Environment variable selecting the log format.
pub const FORMAT_VAR: &str = "TSPRISMA_LOG_FORMAT";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per event.
    Json,
    /// Multi-line human readable output.
    Pretty,
    /// Single-line human readable output.
    Compact,
}

/// Resolved logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    /// Level directive applied to the tsprisma crates, or `None` when
    /// logging stays off.
    pub level: Option<&'static str>,
    /// Output format.
    pub format: LogFormat,
}

impl LogSettings {
    /// Read settings from the process environment.
    pub fn from_env(verbose: bool) -> Self {
        Self::from_lookup(verbose, |key| env::var(key).ok())
    }

    /// Read settings through `lookup`.
    ///
    /// `verbose` acts like `TSPRISMA_DEBUG=true`.
    pub fn from_lookup(verbose: bool, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let debug = verbose
            || lookup(DEBUG_VAR)
                .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"))
                .unwrap_or(false);

        let level = match lookup(LEVEL_VAR).map(|v| v.to_lowercase()) {
            Some(level) => Some(match level.as_str() {
                "trace" => "trace",
                "debug" => "debug",
                "info" => "info",
                "warn" => "warn",
                "error" => "error",
                _ if debug => "debug",
                _ => "warn",
            }),
            None if debug => Some("debug"),
            None => None,
        };

        let format = lookup(FORMAT_VAR)
            .map(|f| match f.to_lowercase().as_str() {
                "pretty" => LogFormat::Pretty,
                "compact" => LogFormat::Compact,
                _ => LogFormat::Json,
            })
            .unwrap_or(LogFormat::Json);

        Self { level, format }
    }

    /// The `EnvFilter` directive for these settings.
    pub fn directive(&self) -> Option<String> {
        self.level.map(|level| {
            format!("tsprisma={level},tsprisma_decl={level},tsprisma_resolver={level},tsprisma_cli={level}")
        })
    }
}

/// Initialize logging. Subsequent calls are no-ops.
pub fn init(verbose: bool) {
    INIT.call_once(|| {
        let settings = LogSettings::from_env(verbose);
        let Some(directive) = settings.directive() else {
            return;
        };

        use tracing_subscriber::{EnvFilter, fmt, prelude::*};

        let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("warn"));
        let registry = tracing_subscriber::registry().with(filter);

        match settings.format {
            LogFormat::Json => registry
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init(),
            LogFormat::Compact => registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init(),
            LogFormat::Pretty => registry
                .with(fmt::layer().pretty().with_writer(std::io::stderr))
                .init(),
        }

        tracing::info!(
            level = ?settings.level,
            format = ?settings.format,
            "TS Prisma logging initialized"
        );
    });
}
