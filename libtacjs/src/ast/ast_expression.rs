// Copyright 2025 Neil Henderson, Blue Tarp Media.
//
//! The `ast_expression` module defines [AstExpression].

use super::{AstBinaryOp, AstLiteral, AstUnaryOp};

/// An expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AstExpression {
    Literal(AstLiteral),
    Identifier(String),
    Unary { op: AstUnaryOp, expr: Box<AstExpression> },
    Binary { op: AstBinaryOp, left: Box<AstExpression>, right: Box<AstExpression> },
    Assignment { name: String, value: Box<AstExpression> },
    Call { name: String, args: Vec<AstExpression> },
}

impl AstExpression {
    /// Creates an integer literal expression.
    pub fn int(value: i64) -> Self {
        AstExpression::Literal(AstLiteral::Int(value))
    }

    /// Creates a floating-point literal expression.
    pub fn float(value: f64) -> Self {
        AstExpression::Literal(AstLiteral::Float(value))
    }

    /// Creates a boolean literal expression.
    pub fn bool(value: bool) -> Self {
        AstExpression::Literal(AstLiteral::Bool(value))
    }

    /// Creates a string literal expression.
    pub fn string<S: Into<String>>(value: S) -> Self {
        AstExpression::Literal(AstLiteral::String(value.into()))
    }

    /// Creates an identifier expression.
    pub fn ident<S: Into<String>>(name: S) -> Self {
        AstExpression::Identifier(name.into())
    }

    /// Creates a unary operation.
    pub fn unary(op: AstUnaryOp, expr: AstExpression) -> Self {
        AstExpression::Unary { op, expr: Box::new(expr) }
    }

    /// Creates a binary operation.
    pub fn binary(op: AstBinaryOp, left: AstExpression, right: AstExpression) -> Self {
        AstExpression::Binary { op, left: Box::new(left), right: Box::new(right) }
    }

    /// Creates an assignment to the named variable.
    pub fn assign<S: Into<String>>(name: S, value: AstExpression) -> Self {
        AstExpression::Assignment { name: name.into(), value: Box::new(value) }
    }

    /// Creates a call to the named function.
    pub fn call<S: Into<String>>(name: S, args: Vec<AstExpression>) -> Self {
        AstExpression::Call { name: name.into(), args }
    }

    /// Is the expression a literal?
    pub fn is_literal(&self) -> bool {
        matches!(self, AstExpression::Literal(_))
    }
}
