//! Abstract Syntax Tree (AST) types for parsed declaration files.
//!
//! This module contains all the types that represent a parsed declaration file.

mod declaration;
mod type_node;
mod types;

pub use declaration::*;
pub use type_node::*;
pub use types::*;
