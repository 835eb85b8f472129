//! # tsprisma-resolver
//!
//! Resolves the default relation includes of every model and query
//! operation from Prisma's generated type declarations.
//!
//! This crate provides:
//! - An alias registry over the `TSPrisma` / `Prisma` namespaces
//! - A schema builder that follows `include` wrappers, relation references
//!   and nested object shapes, with bounded recursion
//! - A filter reducing the built schema to `true` / `{ include: ... }` values
//! - Configuration parsing for `tsprisma.toml`
//!
//! ## Example
//!
//! ```rust
//! use tsprisma_resolver::generate_includes;
//!
//! let table = generate_includes(r#"
//!     export namespace TSPrisma {
//!         export type UserArgs = { include?: UserInclude | null };
//!         export type UserInclude = { posts?: boolean | PostArgs };
//!         export type PostArgs = { select?: { id?: boolean } };
//!         export type TSPrismaModels = { User: { FindFirst: UserArgs } };
//!     }
//! "#).unwrap();
//!
//! let args = table.include_args("user", "findFirst").unwrap();
//! assert_eq!(args.to_string(), r#"{"include":{"posts":true}}"#);
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod filter;
pub mod generate;
pub mod registry;
pub mod schema;

pub use builder::SchemaBuilder;
pub use config::{CONFIG_FILE_NAME, OutputConfig, ResolverConfig};
pub use error::{ResolveError, ResolveResult};
pub use filter::{IncludeStructure, IncludeValue, filter_node, filter_schema};
pub use generate::{
    IncludeTable, generate_includes, generate_includes_from_ast, generate_includes_with,
};
pub use registry::{AliasRegistry, RegisteredAlias};
pub use schema::{INCLUDE_KEY, ParentPath, SchemaNode, SchemaTree};
