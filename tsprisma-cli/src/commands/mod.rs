//! CLI command implementations.

pub mod aliases;
pub mod includes;
pub mod version;
