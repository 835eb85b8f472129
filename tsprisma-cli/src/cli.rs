//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// TS Prisma - default relation includes from Prisma type declarations
#[derive(Parser, Debug)]
#[command(name = "tsprisma")]
#[command(version)]
#[command(
    about = "TS Prisma - default relation includes from Prisma type declarations",
    long_about = None
)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log resolution details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve the include table of one or more declaration files
    Includes(IncludesArgs),

    /// List the aliases the resolver can see in a declaration file
    Aliases(AliasesArgs),

    /// Display version information
    Version,
}

// =============================================================================
// Includes Command
// =============================================================================

/// Arguments for the `includes` command
#[derive(Args, Debug)]
pub struct IncludesArgs {
    /// Declaration files (`index.d.ts`) to resolve
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Path to a `tsprisma.toml` configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Lower-case the first character of model and operation names
    #[arg(long)]
    pub lowercase: bool,

    /// Print JSON on a single line
    #[arg(long)]
    pub compact: bool,

    /// Write the table to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

// =============================================================================
// Aliases Command
// =============================================================================

/// Arguments for the `aliases` command
#[derive(Args, Debug)]
pub struct AliasesArgs {
    /// Declaration file to inspect
    pub file: PathBuf,

    /// Path to a `tsprisma.toml` configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}
