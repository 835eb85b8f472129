//! TS Prisma CLI - Command-line interface for the include resolver.

use clap::Parser;

use tsprisma_cli::cli::{Cli, Command};
use tsprisma_cli::commands;
use tsprisma_cli::error::CliResult;
use tsprisma_cli::logging;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("{:?}", miette::Report::new(e));
        std::process::exit(1);
    }
}

async fn run() -> CliResult<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Command::Includes(args) => commands::includes::run(args).await,
        Command::Aliases(args) => commands::aliases::run(args).await,
        Command::Version => commands::version::run().await,
    }
}
