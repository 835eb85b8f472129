//! `tsprisma aliases` command - List the aliases visible to the resolver.

use tsprisma_decl::parse_declarations;
use tsprisma_resolver::AliasRegistry;

use crate::cli::AliasesArgs;
use crate::config;
use crate::error::{CliError, CliResult};
use crate::output::{self, kv, list_item, style_name, success, warn};

/// Run the aliases command
pub async fn run(args: AliasesArgs) -> CliResult<()> {
    let config = config::load(args.config.as_deref())?;
    let path = args.file.display().to_string();

    let text = tokio::fs::read_to_string(&args.file)
        .await
        .map_err(|source| CliError::Read {
            path: path.clone(),
            source,
        })?;
    let file = parse_declarations(&text).map_err(|e| CliError::Resolve {
        path: path.clone(),
        source: e.into(),
    })?;
    let registry = AliasRegistry::register(&file, &config);

    output::header("Registered Aliases");
    kv("File", &path);
    kv("Namespaces", &config.namespaces.join(", "));
    kv("Skipped statements", &file.skipped_count().to_string());
    output::newline();

    for (name, entry) in registry.iter() {
        let members = entry.object().map(|o| o.len()).unwrap_or_default();
        list_item(&format!(
            "{} {}",
            style_name(name),
            output_detail(&entry.namespace.name(), members)
        ));
    }

    output::newline();
    if registry.contains(&config.entry_point) {
        success(&format!(
            "{} aliases, entry point `{}` found",
            registry.len(),
            config.entry_point
        ));
    } else {
        warn(&format!(
            "{} aliases, entry point `{}` not found",
            registry.len(),
            config.entry_point
        ));
    }

    Ok(())
}

fn output_detail(namespace: &str, members: usize) -> String {
    let noun = if members == 1 { "member" } else { "members" };
    format!("({namespace}, {members} {noun})")
}
