//! Binding expression AST
//!
//! The compiler treats these as opaque `from` payloads; the runtime
//! evaluates them.

use serde::{Deserialize, Serialize};

/// Primitive literal value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    Undefined,
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "$kind")]
pub enum Expression {
    /// `$this` (ancestor 0) or `$parent` chains
    AccessThis { ancestor: u32 },
    AccessScope { name: String, ancestor: u32 },
    AccessMember { object: Box<Expression>, name: String },
    AccessKeyed { object: Box<Expression>, key: Box<Expression> },
    CallScope { name: String, args: Vec<Expression>, ancestor: u32 },
    CallMember { object: Box<Expression>, name: String, args: Vec<Expression> },
    CallFunction { func: Box<Expression>, args: Vec<Expression> },
    PrimitiveLiteral { value: Literal },
    ArrayLiteral { elements: Vec<Expression> },
    ObjectLiteral { keys: Vec<String>, values: Vec<Expression> },
    Unary { operation: String, expression: Box<Expression> },
    Binary { operation: String, left: Box<Expression>, right: Box<Expression> },
    Conditional { condition: Box<Expression>, yes: Box<Expression>, no: Box<Expression> },
    Assign { target: Box<Expression>, value: Box<Expression> },
    ValueConverter { expression: Box<Expression>, name: String, args: Vec<Expression> },
    BindingBehavior { expression: Box<Expression>, name: String, args: Vec<Expression> },
    /// `parts.len() == expressions.len() + 1`
    Interpolation { parts: Vec<String>, expressions: Vec<Expression> },
    ForOfStatement { declaration: Box<Expression>, iterable: Box<Expression> },
    BindingIdentifier { name: String },
    ArrayBindingPattern { elements: Vec<Expression> },
    ObjectBindingPattern { keys: Vec<String>, values: Vec<Expression> },
}

impl Expression {
    pub fn scope(name: impl Into<String>) -> Self {
        Expression::AccessScope {
            name: name.into(),
            ancestor: 0,
        }
    }

    pub fn string(value: impl Into<String>) -> Self {
        Expression::PrimitiveLiteral {
            value: Literal::String(value.into()),
        }
    }

    pub fn number(value: f64) -> Self {
        Expression::PrimitiveLiteral {
            value: Literal::Number(value),
        }
    }

    pub fn identifier(name: impl Into<String>) -> Self {
        Expression::BindingIdentifier { name: name.into() }
    }

    pub fn for_of(declaration: Expression, iterable: Expression) -> Self {
        Expression::ForOfStatement {
            declaration: Box::new(declaration),
            iterable: Box::new(iterable),
        }
    }

    pub fn interpolation(parts: Vec<&str>, expressions: Vec<Expression>) -> Self {
        Expression::Interpolation {
            parts: parts.into_iter().map(String::from).collect(),
            expressions,
        }
    }

    /// Targets an assignment may write to
    pub fn is_assignable(&self) -> bool {
        matches!(
            self,
            Expression::AccessScope { .. } | Expression::AccessMember { .. } | Expression::AccessKeyed { .. }
        )
    }
}

impl std::fmt::Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&super::serializer::serialize(self))
    }
}
