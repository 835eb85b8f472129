//! `tsprisma includes` command - Resolve include tables.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tsprisma_resolver::{IncludeTable, ResolverConfig, generate_includes_with};

use crate::cli::IncludesArgs;
use crate::config;
use crate::error::{CliError, CliResult};
use crate::output::{self, kv, success};

/// Run the includes command
pub async fn run(args: IncludesArgs) -> CliResult<()> {
    let mut config = config::load(args.config.as_deref())?;
    if args.lowercase {
        config = config.with_lowercase_keys(true, true);
    }
    let config = Arc::new(config);

    // One registry per file; files resolve on the blocking pool.
    let tasks: Vec<_> = args
        .files
        .iter()
        .cloned()
        .map(|path| {
            let config = Arc::clone(&config);
            tokio::task::spawn_blocking(move || {
                let table = resolve_file(&path, &config)?;
                Ok::<_, CliError>((path, table))
            })
        })
        .collect();

    let mut tables = Vec::with_capacity(tasks.len());
    for task in tasks {
        tables.push(task.await??);
    }

    let value = render(&tables);
    let mut rendered = if args.compact {
        serde_json::to_string(&value)?
    } else {
        serde_json::to_string_pretty(&value)?
    };
    rendered.push('\n');

    match args.output {
        Some(path) => {
            tokio::fs::write(&path, rendered).await?;

            success(&format!("Wrote {}", path.display()));
            for (file, table) in &tables {
                kv(
                    &file.display().to_string(),
                    &format!(
                        "{} models, {} operations",
                        table.len(),
                        table.iter().count()
                    ),
                );
            }
            output::newline();
        }
        None => print!("{rendered}"),
    }

    Ok(())
}

/// Read and resolve a single declaration file.
pub fn resolve_file(path: &Path, config: &ResolverConfig) -> CliResult<IncludeTable> {
    let text = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.display().to_string(),
        source,
    })?;

    generate_includes_with(&text, config).map_err(|source| CliError::Resolve {
        path: path.display().to_string(),
        source,
    })
}

/// The JSON document for the resolved tables.
///
/// A single table is printed as is; several are keyed by their file path.
pub fn render(tables: &[(PathBuf, IncludeTable)]) -> serde_json::Value {
    match tables {
        [(_, table)] => table.to_json(),
        _ => serde_json::Value::Object(
            tables
                .iter()
                .map(|(path, table)| (path.display().to_string(), table.to_json()))
                .collect(),
        ),
    }
}
