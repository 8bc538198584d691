//! Value to Rhai literal text.

use crate::{HostValue, StringifyOptions};
use rhizome_tessera_ir::Value;
use std::collections::HashSet;
use thiserror::Error;
use tracing::trace;

const INDENT: &str = "  ";

#[derive(Debug, Error)]
pub enum StringifyError {
    #[error("circular reference detected")]
    CircularReference,

    #[error("string encoding failed: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("invalid options: {0}")]
    Config(String),
}

/// Render a value with the given options.
pub fn stringify(value: &Value, options: &StringifyOptions) -> Result<String, StringifyError> {
    Stringifier::new(options.clone()).stringify(value)
}

/// A configured renderer, reusable across values.
#[derive(Debug, Clone, Default)]
pub struct Stringifier {
    options: StringifyOptions,
}

impl Stringifier {
    pub fn new(options: StringifyOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &StringifyOptions {
        &self.options
    }

    pub fn stringify(&self, value: &Value) -> Result<String, StringifyError> {
        self.stringify_host(&HostValue::from(value))
    }

    /// Render a host graph. Fails with [`StringifyError::CircularReference`]
    /// if a node is reached again while it is still being rendered; nodes
    /// shared between siblings are rendered once per occurrence.
    pub fn stringify_host(&self, value: &HostValue) -> Result<String, StringifyError> {
        trace!(quotes = self.options.quotes, "stringify");
        let mut walk = Walk {
            options: &self.options,
            ancestors: HashSet::new(),
        };
        let mut code = walk.render(value, 0)?;
        code.push_str(&self.options.suffix);
        Ok(code)
    }
}

/// Per-call traversal state.
struct Walk<'a> {
    options: &'a StringifyOptions,
    /// Identities of the composites on the current path from the root.
    ancestors: HashSet<usize>,
}

impl Walk<'_> {
    fn render(&mut self, value: &HostValue, indent: usize) -> Result<String, StringifyError> {
        match value {
            HostValue::Undefined | HostValue::Null | HostValue::Unknown => {
                Ok(self.options.none.clone())
            }
            HostValue::Bool(b) => Ok(b.to_string()),
            HostValue::Number(n) => Ok(self.number(*n)),
            HostValue::BigInt(n) => Ok(n.to_string()),
            HostValue::String(s) => quote(s),
            HostValue::Symbol(description) => {
                quote(&format!("Symbol({})", description.as_deref().unwrap_or("")))
            }
            HostValue::Function => quote("[Function]"),
            // resolved by the script that embeds the literal
            HostValue::Ref(path) => Ok(path.clone()),
            HostValue::Array(items) => {
                let id = self.enter(value)?;
                let items = items.borrow();
                let rendered = items
                    .iter()
                    .map(|item| self.render(item, indent + 1))
                    .collect::<Result<Vec<_>, _>>()?;
                self.ancestors.remove(&id);
                Ok(layout("[", "]", &rendered, indent))
            }
            HostValue::Object(entries) => {
                let id = self.enter(value)?;
                let entries = entries.borrow();
                let mut keys: Vec<&String> = entries.keys().collect();
                keys.sort();

                let mut rendered = Vec::with_capacity(keys.len());
                for key in keys {
                    let item = self.render(&entries[key.as_str()], indent + 1)?;
                    rendered.push(format!("{}: {}", self.key(key)?, item));
                }
                self.ancestors.remove(&id);
                Ok(layout("#{", "}", &rendered, indent))
            }
        }
    }

    fn enter(&mut self, value: &HostValue) -> Result<usize, StringifyError> {
        let id = value.identity().unwrap_or_default();
        if !self.ancestors.insert(id) {
            return Err(StringifyError::CircularReference);
        }
        Ok(id)
    }

    fn key(&self, key: &str) -> Result<String, StringifyError> {
        if self.options.quotes {
            quote(key)
        } else {
            Ok(key.to_string())
        }
    }

    fn number(&self, n: f64) -> String {
        if !n.is_finite() {
            // Rhai has no literal for NaN or the infinities
            self.options.none.clone()
        } else if n == 0.0 {
            "0".to_string()
        } else {
            n.to_string()
        }
    }
}

fn quote(s: &str) -> Result<String, StringifyError> {
    Ok(serde_json::to_string(s)?)
}

fn layout(open: &str, close: &str, items: &[String], indent: usize) -> String {
    if items.is_empty() {
        return format!("{}{}", open, close);
    }
    let inner = INDENT.repeat(indent + 1);
    let outer = INDENT.repeat(indent);
    format!(
        "{}\n{}{}\n{}{}",
        open,
        inner,
        items.join(&format!(",\n{}", inner)),
        outer,
        close
    )
}
