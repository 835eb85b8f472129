//! # TS Prisma
//!
//! Default relation includes for Prisma queries, resolved from the type
//! declarations the Prisma client generator emits.
//!
//! TS Prisma provides:
//! - A parser for the declaration subset Prisma's argument types use
//! - A resolver producing, per model and operation, the `include` tree a
//!   query should default to
//! - Configuration through `tsprisma.toml`
//!
//! ## Quick Start
//!
//! ```rust
//! use tsprisma::prelude::*;
//!
//! fn main() -> Result<(), ResolveError> {
//!     let table = generate_includes(r#"
//!         export namespace TSPrisma {
//!             export type UserFindFirstArgs = { include?: UserInclude | null };
//!             export type UserInclude = { posts?: boolean | PostFindManyArgs };
//!             export type PostFindManyArgs = { include?: PostInclude | null };
//!             export type PostInclude = { author?: boolean | UserFindFirstArgs };
//!             export type TSPrismaModels = { User: { FindFirst: UserFindFirstArgs } };
//!         }
//!     "#)?;
//!
//!     let args = table.include_args("user", "findFirst");
//!     assert_eq!(
//!         args.map(|a| a.to_string()).as_deref(),
//!         Some(r#"{"include":{"posts":{"include":{"author":true}}}}"#)
//!     );
//!     Ok(())
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// Declaration parsing and AST types.
pub mod decl {
    pub use tsprisma_decl::*;
}

/// Include resolution.
pub mod resolver {
    pub use tsprisma_resolver::*;
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::decl::{SourceFile, parse_declarations, parse_declarations_file};
    pub use crate::resolver::{
        IncludeStructure, IncludeTable, IncludeValue, ResolveError, ResolveResult,
        ResolverConfig, generate_includes, generate_includes_from_ast, generate_includes_with,
    };
}

// Re-export key types at the crate root
pub use resolver::{IncludeTable, ResolveError, ResolverConfig, generate_includes};
