//! Canonical values and literal extraction for Tessera.
//!
//! A snippet's first statement arrives as a kind-tagged [`Statement`] tree
//! (produced by a frontend such as the TypeScript one). [`extract`] walks it
//! and returns the canonical [`Value`]: a parameter descriptor for functions,
//! the converted literal for object initializers.

mod extract;
mod syntax;
mod value;

pub use extract::{describe_params, expression_value, extract, member_path, UNKNOWN_KEY};
pub use syntax::{Expr, Literal, Pattern, Property, PropertyPattern, Statement};
pub use value::{Map, REF_KEY, Value, ValueError};
