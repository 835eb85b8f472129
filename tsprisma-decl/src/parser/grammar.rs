//! Pest grammar parser for declaration files.

use pest_derive::Parser;

/// The declaration parser.
#[derive(Parser)]
#[grammar = "parser/declarations.pest"]
pub struct DeclarationParser;
