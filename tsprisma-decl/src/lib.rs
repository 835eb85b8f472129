//! # tsprisma-decl
//!
//! Parser and AST for structural type declarations.
//!
//! This crate provides:
//! - A pest grammar for namespaces, type aliases and the type vocabulary
//!   Prisma's generated argument types are written in
//! - Abstract Syntax Tree (AST) types with a tagged variant per type shape
//! - Best-effort skipping of statements the vocabulary does not describe
//!
//! ## Example
//!
//! ```rust
//! use tsprisma_decl::{parse_declarations, TypeNode};
//!
//! let file = parse_declarations(r#"
//!     export namespace TSPrisma {
//!         export type UserInclude = { posts?: boolean | PostFindManyArgs };
//!     }
//! "#).unwrap();
//!
//! let ns = file.namespaces().next().unwrap();
//! let include = ns.type_aliases().next().unwrap().object().unwrap();
//! assert!(matches!(include.members[0].ty, TypeNode::Union(_)));
//! ```

pub mod ast;
pub mod error;
pub mod parser;

pub use ast::*;
pub use error::{DeclError, DeclResult};
pub use parser::{parse_declarations, parse_declarations_file};
