//! TypeScript frontend for literal extraction.
//!
//! Uses tree-sitter for parsing TypeScript, then lowers the first statement
//! into the kind-tagged tree that `rhizome_tessera_ir::extract` walks.

mod lower;

pub use lower::{extract_source, parse_statement, SyntaxError};
