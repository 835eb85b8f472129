//! Configuration file parsing for `tsprisma.toml`.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ResolveError, ResolveResult};

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "tsprisma.toml";

/// Resolver configuration.
///
/// ```toml
/// namespaces = ["TSPrisma", "Prisma"]
/// entry_point = "TSPrismaModels"
///
/// [output]
/// lowercase_models = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ResolverConfig {
    /// Namespaces whose aliases are registered.
    #[serde(default = "default_namespaces")]
    pub namespaces: Vec<String>,

    /// Name of the alias mapping every model to its operations.
    #[serde(default = "default_entry_point")]
    pub entry_point: String,

    /// Key normalisation of the resolved table.
    #[serde(default)]
    pub output: OutputConfig,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            namespaces: default_namespaces(),
            entry_point: default_entry_point(),
            output: OutputConfig::default(),
        }
    }
}

impl ResolverConfig {
    /// Load configuration from a file path.
    pub fn from_file(path: impl AsRef<Path>) -> ResolveResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ResolveError::Io {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> ResolveResult<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| ResolveError::Toml { source: e })?;
        config.validate()?;
        Ok(config)
    }

    /// Check values serde cannot reject on its own.
    pub fn validate(&self) -> ResolveResult<()> {
        if self.entry_point.trim().is_empty() {
            return Err(ResolveError::config("entry_point must not be empty"));
        }
        if self.namespaces.is_empty() {
            return Err(ResolveError::config(
                "at least one namespace must be designated",
            ));
        }
        if let Some(bad) = self.namespaces.iter().find(|ns| ns.contains('.')) {
            return Err(ResolveError::config(format!(
                "namespace `{bad}` must be a single identifier, not a dotted path"
            )));
        }
        Ok(())
    }

    /// Check if `name` is one of the designated namespaces.
    pub fn is_designated(&self, name: &str) -> bool {
        self.namespaces.iter().any(|ns| ns == name)
    }

    /// Set the designated namespaces.
    pub fn with_namespaces<I, S>(mut self, namespaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.namespaces = namespaces.into_iter().map(Into::into).collect();
        self
    }

    /// Set the entry point alias.
    pub fn with_entry_point(mut self, name: impl Into<String>) -> Self {
        self.entry_point = name.into();
        self
    }

    /// Lower-case the first character of model and operation keys.
    pub fn with_lowercase_keys(mut self, models: bool, operations: bool) -> Self {
        self.output.lowercase_models = models;
        self.output.lowercase_operations = operations;
        self
    }
}

fn default_namespaces() -> Vec<String> {
    vec!["TSPrisma".to_string(), "Prisma".to_string()]
}

fn default_entry_point() -> String {
    "TSPrismaModels".to_string()
}

/// Output key normalisation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Lower-case the first character of model names (`User` -> `user`).
    #[serde(default)]
    pub lowercase_models: bool,

    /// Lower-case the first character of operation names.
    #[serde(default)]
    pub lowercase_operations: bool,
}

#[cfg(test)]
#[allow(unused_assignments)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = ResolverConfig::default();
        assert_eq!(config.namespaces, vec!["TSPrisma", "Prisma"]);
        assert_eq!(config.entry_point, "TSPrismaModels");
        assert!(!config.output.lowercase_models);
        assert!(!config.output.lowercase_operations);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = ResolverConfig::from_str("").unwrap();
        assert_eq!(config, ResolverConfig::default());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
            namespaces = ["Models"]
            entry_point = "AllModels"

            [output]
            lowercase_models = true
        "#;

        let config = ResolverConfig::from_str(toml).unwrap();
        assert_eq!(config.namespaces, vec!["Models"]);
        assert_eq!(config.entry_point, "AllModels");
        assert!(config.output.lowercase_models);
        assert!(!config.output.lowercase_operations);
        assert!(config.is_designated("Models"));
        assert!(!config.is_designated("Prisma"));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = ResolverConfig::from_str("entrypoint = \"X\"");
        assert!(matches!(result, Err(ResolveError::Toml { .. })));
    }

    #[test]
    fn test_validation_errors() {
        let result = ResolverConfig::from_str("entry_point = \"  \"");
        assert!(matches!(result, Err(ResolveError::Config { .. })));

        let result = ResolverConfig::from_str("namespaces = []");
        assert!(matches!(result, Err(ResolveError::Config { .. })));

        let result = ResolverConfig::from_str("namespaces = [\"A.B\"]");
        assert!(matches!(result, Err(ResolveError::Config { .. })));
    }

    #[test]
    fn test_builders() {
        let config = ResolverConfig::default()
            .with_namespaces(["Db"])
            .with_entry_point("DbModels")
            .with_lowercase_keys(true, true);

        assert_eq!(config.namespaces, vec!["Db"]);
        assert_eq!(config.entry_point, "DbModels");
        assert!(config.output.lowercase_models);
        assert!(config.output.lowercase_operations);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "entry_point = \"Table\"").unwrap();

        let config = ResolverConfig::from_file(file.path()).unwrap();
        assert_eq!(config.entry_point, "Table");
    }

    #[test]
    fn test_from_missing_file() {
        let result = ResolverConfig::from_file("/nonexistent/tsprisma.toml");
        assert!(matches!(result, Err(ResolveError::Io { .. })));
    }
}
