//! Tree-sitter based lowering of TypeScript snippets.

use rhizome_tessera_ir::{Expr, Pattern, Property, PropertyPattern, Statement, Value, extract};
use thiserror::Error;
use tracing::debug;
use tree_sitter::{Node, Parser, Tree};

#[derive(Debug, Error)]
pub enum SyntaxError {
    #[error("parse error: {0}")]
    Parse(String),

    #[error("language error: {0}")]
    Language(String),
}

/// Parse TypeScript source and lower its first statement.
///
/// Comments and empty statements before it are skipped. Returns `Ok(None)`
/// when the snippet contains no statement at all.
pub fn parse_statement(source: &str) -> Result<Option<Statement>, SyntaxError> {
    let mut parser = Parser::new();
    let language = tree_sitter_typescript::LANGUAGE_TYPESCRIPT;
    parser
        .set_language(&language.into())
        .map_err(|err| SyntaxError::Language(err.to_string()))?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| SyntaxError::Parse("failed to parse".into()))?;

    let ctx = LowerContext::new(source);
    ctx.lower_program(&tree)
}

/// Parse a snippet and extract its value in one step.
///
/// `Ok(None)` means the snippet parsed but does not declare a function or
/// an object.
pub fn extract_source(source: &str) -> Result<Option<Value>, SyntaxError> {
    Ok(parse_statement(source)?.and_then(|statement| extract(&statement)))
}

struct LowerContext<'a> {
    source: &'a str,
}

impl<'a> LowerContext<'a> {
    fn new(source: &'a str) -> Self {
        Self { source }
    }

    fn node_text(&self, node: Node) -> &str {
        node.utf8_text(self.source.as_bytes()).unwrap_or("")
    }

    fn first_named<'t>(&self, node: Node<'t>) -> Option<Node<'t>> {
        let mut cursor = node.walk();
        let first = node
            .named_children(&mut cursor)
            .find(|child| child.kind() != "comment");
        first
    }

    fn lower_program(&self, tree: &Tree) -> Result<Option<Statement>, SyntaxError> {
        let root = tree.root_node();

        if root.has_error() {
            return Err(SyntaxError::Parse("syntax error in source".into()));
        }

        let mut cursor = root.walk();
        let first = root.named_children(&mut cursor).find(|child| {
            !matches!(
                child.kind(),
                "comment" | "empty_statement" | "hash_bang_line"
            )
        });

        Ok(first.map(|node| self.lower_statement(node)))
    }

    fn lower_statement(&self, node: Node) -> Statement {
        match node.kind() {
            "function_declaration" | "generator_function_declaration" => Statement::Function {
                params: self.lower_params(node),
            },
            "lexical_declaration" | "variable_declaration" => {
                let mut cursor = node.walk();
                let declarator = node
                    .named_children(&mut cursor)
                    .find(|child| child.kind() == "variable_declarator");
                let init = declarator
                    .and_then(|declarator| declarator.child_by_field_name("value"))
                    .map(|value| self.lower_expr(value));
                Statement::VariableDeclaration { init }
            }
            "expression_statement" => match self.first_named(node) {
                Some(expression) => Statement::ExpressionStatement {
                    expression: self.lower_expr(expression),
                },
                None => Statement::Unsupported {
                    node: node.kind().to_string(),
                },
            },
            kind => {
                debug!(kind, "statement lowered as unsupported");
                Statement::Unsupported {
                    node: kind.to_string(),
                }
            }
        }
    }

    // Parameters

    fn lower_params(&self, function: Node) -> Vec<Pattern> {
        // x => ...
        if let Some(parameter) = function.child_by_field_name("parameter") {
            return vec![self.lower_pattern(parameter)];
        }

        let Some(parameters) = function.child_by_field_name("parameters") else {
            return Vec::new();
        };

        let mut cursor = parameters.walk();
        parameters
            .named_children(&mut cursor)
            .filter(|child| child.kind() != "comment")
            .map(|child| self.lower_parameter(child))
            .collect()
    }

    fn lower_parameter(&self, node: Node) -> Pattern {
        match node.kind() {
            // TypeScript wraps each parameter: pattern, optional type, optional default
            "required_parameter" | "optional_parameter" => {
                let Some(pattern) = node.child_by_field_name("pattern") else {
                    return self.unsupported_pattern(node);
                };
                let target = self.lower_pattern(pattern);
                match node.child_by_field_name("value") {
                    Some(value) => target.with_default(self.lower_expr(value)),
                    None => target,
                }
            }
            _ => self.lower_pattern(node),
        }
    }

    fn lower_pattern(&self, node: Node) -> Pattern {
        match node.kind() {
            "identifier" | "shorthand_property_identifier_pattern" => {
                Pattern::ident(self.node_text(node))
            }
            "assignment_pattern" | "object_assignment_pattern" => {
                match (
                    node.child_by_field_name("left"),
                    node.child_by_field_name("right"),
                ) {
                    (Some(left), Some(right)) => {
                        self.lower_pattern(left).with_default(self.lower_expr(right))
                    }
                    _ => self.unsupported_pattern(node),
                }
            }
            "object_pattern" => Pattern::ObjectPattern {
                properties: self.lower_property_patterns(node),
            },
            "array_pattern" => Pattern::ArrayPattern {
                elements: self.lower_sequence(node, |child| self.lower_pattern(child)),
            },
            "rest_pattern" => match self.first_named(node) {
                Some(argument) => Pattern::rest(self.lower_pattern(argument)),
                None => self.unsupported_pattern(node),
            },
            _ => self.unsupported_pattern(node),
        }
    }

    fn unsupported_pattern(&self, node: Node) -> Pattern {
        Pattern::Unsupported {
            node: node.kind().to_string(),
        }
    }

    fn lower_property_patterns(&self, node: Node) -> Vec<PropertyPattern> {
        let mut properties = Vec::new();
        let mut cursor = node.walk();

        for child in node.named_children(&mut cursor) {
            match child.kind() {
                // { a }
                "shorthand_property_identifier_pattern" => {
                    let name = self.node_text(child);
                    properties.push(PropertyPattern::Property {
                        key: name.to_string(),
                        value: Pattern::ident(name),
                    });
                }
                // { a = 1 }
                "object_assignment_pattern" => {
                    let key = child
                        .child_by_field_name("left")
                        .map(|left| self.node_text(left).to_string())
                        .unwrap_or_default();
                    properties.push(PropertyPattern::Property {
                        key,
                        value: self.lower_pattern(child),
                    });
                }
                // { a: b }, { a: { b } }, { a: b = 1 }
                "pair_pattern" => {
                    let key = child
                        .child_by_field_name("key")
                        .map(|key| self.property_key(key))
                        .unwrap_or_default();
                    let value = match child.child_by_field_name("value") {
                        Some(value) => self.lower_pattern(value),
                        None => self.unsupported_pattern(child),
                    };
                    properties.push(PropertyPattern::Property { key, value });
                }
                "rest_pattern" => {
                    let argument = match self.first_named(child) {
                        Some(argument) => self.lower_pattern(argument),
                        None => self.unsupported_pattern(child),
                    };
                    properties.push(PropertyPattern::RestElement { argument });
                }
                "comment" => {}
                _ => properties.push(PropertyPattern::Property {
                    key: self.node_text(child).to_string(),
                    value: self.unsupported_pattern(child),
                }),
            }
        }

        properties
    }

    /// Walk the elements of an array literal or array pattern, recovering
    /// elided positions from the comma layout (tree-sitter has no hole node).
    fn lower_sequence<T>(&self, node: Node, mut lower: impl FnMut(Node) -> T) -> Vec<Option<T>> {
        let mut elements = Vec::new();
        let mut filled = false;
        let mut cursor = node.walk();

        for child in node.children(&mut cursor) {
            match child.kind() {
                "[" | "]" | "comment" => {}
                "," => {
                    if !filled {
                        elements.push(None);
                    }
                    filled = false;
                }
                _ => {
                    elements.push(Some(lower(child)));
                    filled = true;
                }
            }
        }

        elements
    }

    // Expressions

    fn lower_expr(&self, node: Node) -> Expr {
        match node.kind() {
            "parenthesized_expression" => match self.first_named(node) {
                Some(inner) => self.lower_expr(inner),
                None => self.other(node),
            },
            "function_expression" | "function" | "generator_function" | "arrow_function" => {
                Expr::Function {
                    params: self.lower_params(node),
                }
            }
            "string" => Expr::string(self.string_value(node)),
            "number" => match parse_number(self.node_text(node)) {
                Some(value) => Expr::number(value),
                None => self.other(node),
            },
            "true" => Expr::bool(true),
            "false" => Expr::bool(false),
            // `undefined` is an ordinary identifier in the host language
            "identifier" | "undefined" => Expr::ident(self.node_text(node)),
            "member_expression" => self.lower_member(node),
            "subscript_expression" => match node.child_by_field_name("object") {
                Some(object) => Expr::MemberExpression {
                    object: Box::new(self.lower_expr(object)),
                    property: None,
                },
                None => self.other(node),
            },
            "array" => Expr::ArrayLiteral {
                elements: self.lower_sequence(node, |child| self.lower_expr(child)),
            },
            "object" => self.lower_object(node),
            _ => self.other(node),
        }
    }

    fn other(&self, node: Node) -> Expr {
        Expr::Other {
            node: node.kind().to_string(),
        }
    }

    fn lower_member(&self, node: Node) -> Expr {
        let Some(object) = node.child_by_field_name("object") else {
            return self.other(node);
        };

        // a?.b is not a plain access; #private names are not simple names either
        let optional = node.child_by_field_name("optional_chain").is_some();
        let property = node
            .child_by_field_name("property")
            .filter(|property| !optional && property.kind() == "property_identifier")
            .map(|property| self.node_text(property).to_string());

        Expr::MemberExpression {
            object: Box::new(self.lower_expr(object)),
            property,
        }
    }

    fn lower_object(&self, node: Node) -> Expr {
        let mut properties = Vec::new();
        let mut cursor = node.walk();

        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "pair" => {
                    let (Some(key), Some(value)) = (
                        child.child_by_field_name("key"),
                        child.child_by_field_name("value"),
                    ) else {
                        continue;
                    };
                    properties.push(Property {
                        key: self.property_key(key),
                        value: self.lower_expr(value),
                    });
                }
                // { foo } is { foo: foo }
                "shorthand_property_identifier" => {
                    let name = self.node_text(child);
                    properties.push(Property {
                        key: name.to_string(),
                        value: Expr::ident(name),
                    });
                }
                "method_definition" => {
                    if let Some(name) = child.child_by_field_name("name") {
                        properties.push(Property {
                            key: self.property_key(name),
                            value: self.other(child),
                        });
                    }
                }
                // spread_element has no key of its own
                _ => {}
            }
        }

        Expr::ObjectLiteral { properties }
    }

    fn property_key(&self, key: Node) -> String {
        match key.kind() {
            "string" => self.string_value(key),
            // { 0x10: 1 } has the key "16"
            "number" => {
                let text = self.node_text(key);
                parse_number(text).map_or_else(|| text.to_string(), number_key)
            }
            "computed_property_name" => match self.first_named(key) {
                Some(inner) if inner.kind() == "string" => self.string_value(inner),
                Some(inner) => self.node_text(inner).to_string(),
                None => self.node_text(key).to_string(),
            },
            _ => self.node_text(key).to_string(),
        }
    }

    fn string_value(&self, node: Node) -> String {
        let mut value = String::new();
        let mut cursor = node.walk();

        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "string_fragment" => value.push_str(self.node_text(child)),
                "escape_sequence" => unescape_into(self.node_text(child), &mut value),
                _ => {}
            }
        }

        value
    }
}

/// Numeric literal text to `f64`. BigInt literals (`10n`) are not numbers here.
fn parse_number(text: &str) -> Option<f64> {
    let clean = text.replace('_', "");
    if clean.ends_with('n') {
        return None;
    }

    let radix = match clean.get(..2) {
        Some("0x" | "0X") => 16,
        Some("0o" | "0O") => 8,
        Some("0b" | "0B") => 2,
        _ => return clean.parse().ok(),
    };
    u64::from_str_radix(&clean[2..], radix)
        .ok()
        .map(|n| n as f64)
}

/// Property-name form of a numeric key: integral values drop the fraction.
fn number_key(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e21 {
        format!("{:.0}", n)
    } else {
        n.to_string()
    }
}

/// Append the character an escape sequence stands for. Sequences that do not
/// decode to a valid character are kept verbatim.
fn unescape_into(sequence: &str, out: &mut String) {
    let body = sequence.strip_prefix('\\').unwrap_or(sequence);
    let mut chars = body.chars();
    let Some(first) = chars.next() else {
        return;
    };
    let rest = chars.as_str();

    match first {
        'n' => out.push('\n'),
        't' => out.push('\t'),
        'r' => out.push('\r'),
        'b' => out.push('\u{8}'),
        'f' => out.push('\u{c}'),
        'v' => out.push('\u{b}'),
        // line continuation
        '\n' | '\r' | '\u{2028}' | '\u{2029}' => {}
        'x' => push_code_point(u32::from_str_radix(rest, 16).ok(), sequence, out),
        'u' => {
            let hex = rest.trim_start_matches('{').trim_end_matches('}');
            push_code_point(u32::from_str_radix(hex, 16).ok(), sequence, out)
        }
        '0'..='7' => push_code_point(u32::from_str_radix(body, 8).ok(), sequence, out),
        other => out.push(other),
    }
}

fn push_code_point(code: Option<u32>, raw: &str, out: &mut String) {
    match code.and_then(char::from_u32) {
        Some(c) => out.push(c),
        None => out.push_str(raw),
    }
}
