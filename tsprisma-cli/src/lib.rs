//! TS Prisma CLI - Command-line interface for the include resolver.
//!
//! This crate provides the `tsprisma` tool, which resolves the default
//! include table of generated Prisma declaration files and inspects the
//! aliases the resolver sees.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
