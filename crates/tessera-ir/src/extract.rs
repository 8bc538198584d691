//! Literal extraction: syntax tree to canonical value.

use crate::syntax::{Expr, Literal, Pattern, PropertyPattern, Statement};
use crate::value::{Map, Value};
use tracing::debug;

/// Key for the first pattern the walk cannot interpret. Later ones get
/// `[unknown:2]`, `[unknown:3]`, ...
pub const UNKNOWN_KEY: &str = "[unknown]";

/// Extract the value declared by a snippet's first statement.
///
/// Recognized shapes, in order:
/// 1. function declaration: parameter descriptor
/// 2. variable declaration initialized with a function or arrow: parameter descriptor
/// 3. variable declaration initialized with an object literal: the literal
/// 4. expression statement holding a function or arrow: parameter descriptor
/// 5. expression statement holding an object literal: the literal
///
/// Anything else returns `None`.
pub fn extract(statement: &Statement) -> Option<Value> {
    match statement {
        Statement::Function { params } => Some(describe_params(params)),
        Statement::VariableDeclaration { init: Some(expr) }
        | Statement::ExpressionStatement { expression: expr } => match expr {
            Expr::Function { params } => Some(describe_params(params)),
            Expr::ObjectLiteral { .. } => Some(expression_value(expr)),
            other => {
                debug!(kind = expr_kind(other), "initializer is neither function nor object");
                None
            }
        },
        Statement::VariableDeclaration { init: None } => None,
        Statement::Unsupported { node } => {
            debug!(kind = %node, "unsupported top-level statement");
            None
        }
    }
}

/// Build the parameter descriptor for a parameter list.
///
/// Keys follow declaration order. Names without a default map to `Null`,
/// rest captures to `"...name": Null`. Defaults attached to a nested
/// destructuring pattern are dropped and only the pattern is walked.
pub fn describe_params(params: &[Pattern]) -> Value {
    let mut descriptor = Descriptor::default();
    for param in params {
        descriptor.walk(param);
    }
    Value::Object(descriptor.entries)
}

#[derive(Default)]
struct Descriptor {
    entries: Map,
    unknown: usize,
}

impl Descriptor {
    fn walk(&mut self, pattern: &Pattern) {
        match pattern {
            Pattern::Identifier { name } => self.bind(name.clone(), Value::Null),
            Pattern::AssignmentPattern { left, right } => match left.as_ref() {
                Pattern::Identifier { name } => self.bind(name.clone(), expression_value(right)),
                nested => self.walk(nested),
            },
            Pattern::ObjectPattern { properties } => {
                for property in properties {
                    match property {
                        PropertyPattern::RestElement { argument } => self.rest(argument),
                        PropertyPattern::Property {
                            key,
                            value: Pattern::Identifier { .. },
                        } => self.bind(key.clone(), Value::Null),
                        PropertyPattern::Property { value, .. } => self.walk(value),
                    }
                }
            }
            Pattern::ArrayPattern { elements } => {
                for element in elements.iter().flatten() {
                    self.walk(element);
                }
            }
            Pattern::RestElement { argument } => self.rest(argument),
            Pattern::Unsupported { node } => self.unknown(node),
        }
    }

    fn rest(&mut self, argument: &Pattern) {
        match argument {
            Pattern::Identifier { name } => self.bind(format!("...{}", name), Value::Null),
            other => self.unknown(other.kind()),
        }
    }

    fn unknown(&mut self, kind: &str) {
        self.unknown += 1;
        let key = if self.unknown == 1 {
            UNKNOWN_KEY.to_string()
        } else {
            format!("[unknown:{}]", self.unknown)
        };
        debug!(kind, key = %key, "unrecognized parameter pattern");
        self.bind(key, Value::Unknown);
    }

    fn bind(&mut self, key: String, value: Value) {
        self.entries.insert(key, value);
    }
}

/// Convert a default or initializer expression to a value.
///
/// A lone identifier becomes the string of its name while a dotted chain of
/// simple names becomes a `Ref`. Chains with any other segment, and every
/// expression kind not listed here, become `Null`.
pub fn expression_value(expr: &Expr) -> Value {
    match expr {
        Expr::Literal { value } => match value {
            Literal::Bool(b) => Value::Bool(*b),
            Literal::Number(n) => Value::Number(*n),
            Literal::String(s) => Value::String(s.clone()),
        },
        Expr::ArrayLiteral { elements } => Value::Array(
            elements
                .iter()
                .map(|element| element.as_ref().map_or(Value::Null, expression_value))
                .collect(),
        ),
        Expr::ObjectLiteral { properties } => Value::Object(
            properties
                .iter()
                .map(|property| (property.key.clone(), expression_value(&property.value)))
                .collect(),
        ),
        Expr::MemberExpression { .. } => member_path(expr).map_or(Value::Null, Value::Ref),
        Expr::Identifier { name } => Value::String(name.clone()),
        Expr::Function { .. } | Expr::Other { .. } => Value::Null,
    }
}

/// Dotted path of a member chain, or `None` if any segment is not a simple name.
pub fn member_path(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Identifier { name } => Some(name.clone()),
        Expr::MemberExpression {
            object,
            property: Some(property),
        } => member_path(object).map(|path| format!("{}.{}", path, property)),
        _ => None,
    }
}

fn expr_kind(expr: &Expr) -> &str {
    match expr {
        Expr::Function { .. } => "function",
        Expr::Literal { .. } => "literal",
        Expr::Identifier { .. } => "identifier",
        Expr::MemberExpression { .. } => "member_expression",
        Expr::ArrayLiteral { .. } => "array_literal",
        Expr::ObjectLiteral { .. } => "object_literal",
        Expr::Other { node } => node,
    }
}
