//! Kind-tagged syntax tree for a snippet's first statement.
//!
//! Only the shapes the extractor understands are modelled; a frontend lowers
//! everything else into the `Unsupported`/`Other` variants. The JSON form
//! carries a `kind` tag per node, e.g.
//! `{"kind":"identifier","name":"last"}`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Statement {
    /// Function declaration (named or generator).
    Function { params: Vec<Pattern> },
    /// `let`/`const`/`var` declaration; the first declarator's initializer.
    VariableDeclaration { init: Option<Expr> },
    ExpressionStatement { expression: Expr },
    /// Class, import, export, control flow and so on.
    Unsupported { node: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Pattern {
    Identifier {
        name: String,
    },
    AssignmentPattern {
        left: Box<Pattern>,
        right: Expr,
    },
    ObjectPattern {
        properties: Vec<PropertyPattern>,
    },
    /// `None` marks an elided position (`[a, , b]`).
    ArrayPattern {
        elements: Vec<Option<Pattern>>,
    },
    RestElement {
        argument: Box<Pattern>,
    },
    Unsupported {
        node: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PropertyPattern {
    /// `{ key }`, `{ key: value }` or `{ key = default }`.
    Property { key: String, value: Pattern },
    RestElement { argument: Pattern },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Expr {
    /// Function expression or arrow function.
    Function {
        params: Vec<Pattern>,
    },
    Literal {
        value: Literal,
    },
    Identifier {
        name: String,
    },
    /// `property` is `None` when the accessed member is not a simple name
    /// (computed access, optional chaining, private names).
    MemberExpression {
        object: Box<Expr>,
        property: Option<String>,
    },
    /// `None` marks a hole (`[1, , 2]`).
    ArrayLiteral {
        elements: Vec<Option<Expr>>,
    },
    ObjectLiteral {
        properties: Vec<Property>,
    },
    Other {
        node: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    Bool(bool),
    Number(f64),
    String(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub key: String,
    pub value: Expr,
}

impl Pattern {
    pub fn ident(name: impl Into<String>) -> Self {
        Pattern::Identifier { name: name.into() }
    }

    pub fn with_default(self, right: Expr) -> Self {
        Pattern::AssignmentPattern {
            left: Box::new(self),
            right,
        }
    }

    pub fn rest(argument: Pattern) -> Self {
        Pattern::RestElement {
            argument: Box::new(argument),
        }
    }

    /// Node kind as it appears in the tagged JSON form.
    pub fn kind(&self) -> &str {
        match self {
            Pattern::Identifier { .. } => "identifier",
            Pattern::AssignmentPattern { .. } => "assignment_pattern",
            Pattern::ObjectPattern { .. } => "object_pattern",
            Pattern::ArrayPattern { .. } => "array_pattern",
            Pattern::RestElement { .. } => "rest_element",
            Pattern::Unsupported { node } => node,
        }
    }
}

impl Expr {
    pub fn ident(name: impl Into<String>) -> Self {
        Expr::Identifier { name: name.into() }
    }

    pub fn string(value: impl Into<String>) -> Self {
        Expr::Literal {
            value: Literal::String(value.into()),
        }
    }

    pub fn number(value: impl Into<f64>) -> Self {
        Expr::Literal {
            value: Literal::Number(value.into()),
        }
    }

    pub fn bool(value: bool) -> Self {
        Expr::Literal {
            value: Literal::Bool(value),
        }
    }

    /// Member chain from a dotted path; `"a.b.c"` nests as `(a.b).c`.
    pub fn member(path: &str) -> Self {
        let mut segments = path.split('.');
        let root = Expr::ident(segments.next().unwrap_or_default());
        segments.fold(root, |object, property| Expr::MemberExpression {
            object: Box::new(object),
            property: Some(property.to_string()),
        })
    }

    pub fn object<K: Into<String>>(properties: impl IntoIterator<Item = (K, Expr)>) -> Self {
        Expr::ObjectLiteral {
            properties: properties
                .into_iter()
                .map(|(key, value)| Property {
                    key: key.into(),
                    value,
                })
                .collect(),
        }
    }

    pub fn array(elements: impl IntoIterator<Item = Expr>) -> Self {
        Expr::ArrayLiteral {
            elements: elements.into_iter().map(Some).collect(),
        }
    }
}
