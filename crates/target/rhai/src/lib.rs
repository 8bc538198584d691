//! Rhai literal target for Tessera.
//!
//! Renders values as Rhai source text: object maps as `#{ ... }` with sorted
//! keys, arrays as `[ ... ]`, nulls as a configurable token (`()` by default),
//! followed by a configurable suffix (`;` by default).

mod host;
mod options;
mod stringify;

pub use host::{HostValue, SharedArray, SharedObject};
pub use options::StringifyOptions;
pub use stringify::{stringify, Stringifier, StringifyError};
