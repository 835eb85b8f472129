//! CLI configuration handling.

use std::path::{Path, PathBuf};

use tsprisma_resolver::{CONFIG_FILE_NAME, ResolverConfig};

use crate::error::{CliError, CliResult};

/// Load the resolver configuration.
///
/// An explicit path must exist. Without one, `tsprisma.toml` in the current
/// directory is used when present, and the defaults otherwise.
pub fn load(explicit: Option<&Path>) -> CliResult<ResolverConfig> {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => find_in(&std::env::current_dir()?),
    };

    match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "Loading configuration");
            ResolverConfig::from_file(&path).map_err(|source| CliError::Config { source })
        }
        None => Ok(ResolverConfig::default()),
    }
}

/// The configuration file in `dir`, if there is one.
pub fn find_in(dir: &Path) -> Option<PathBuf> {
    let candidate = dir.join(CONFIG_FILE_NAME);
    candidate.is_file().then_some(candidate)
}
