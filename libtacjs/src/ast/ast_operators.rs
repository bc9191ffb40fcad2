// Copyright 2025 Neil Henderson, Blue Tarp Media.
//
//! The `ast_operators` module defines the `AstUnaryOp` and `AstBinaryOp` types.

use std::fmt;

use crate::core::TypeTag;

/// Unary operators.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AstUnaryOp {
    Negate,
    LogicalNot,
}

/// Binary operators.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AstBinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    EqualTo,
    NotEqualTo,
    LessThan,
    LessThanOrEqualTo,
    GreaterThan,
    GreaterThanOrEqualTo,
    LogicalAnd,
    LogicalOr,
}

/// Families or groups of binary operators.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AstBinaryOpFamily {
    Arithmetic,
    Relational,
    Equality,
    Logical,
}

impl AstBinaryOp {
    /// The family that the operator belongs to.
    pub fn family(&self) -> AstBinaryOpFamily {
        match self {
            AstBinaryOp::Add | AstBinaryOp::Subtract | AstBinaryOp::Multiply | AstBinaryOp::Divide => {
                AstBinaryOpFamily::Arithmetic
            }

            AstBinaryOp::LessThan
            | AstBinaryOp::LessThanOrEqualTo
            | AstBinaryOp::GreaterThan
            | AstBinaryOp::GreaterThanOrEqualTo => AstBinaryOpFamily::Relational,

            AstBinaryOp::EqualTo | AstBinaryOp::NotEqualTo => AstBinaryOpFamily::Equality,

            AstBinaryOp::LogicalAnd | AstBinaryOp::LogicalOr => AstBinaryOpFamily::Logical,
        }
    }

    /// The type produced by applying the operator to operands of the given types, or `None` if the operator is not
    /// defined for those types.
    ///
    /// Arithmetic yields `Float` if either operand is `Float`, except division which always yields `Float`.
    pub fn result_type(&self, left: TypeTag, right: TypeTag) -> Option<TypeTag> {
        let both_numeric = left.is_numeric() && right.is_numeric();

        match self.family() {
            AstBinaryOpFamily::Arithmetic if both_numeric => {
                if *self == AstBinaryOp::Divide {
                    Some(TypeTag::Float)
                } else {
                    Some(TypeTag::common_numeric_type(left, right))
                }
            }

            AstBinaryOpFamily::Relational if both_numeric => Some(TypeTag::Bool),

            AstBinaryOpFamily::Equality => {
                let comparable = both_numeric
                    || (left == TypeTag::Bool && right == TypeTag::Bool)
                    || (left == TypeTag::String && right == TypeTag::String);

                comparable.then_some(TypeTag::Bool)
            }

            AstBinaryOpFamily::Logical if left == TypeTag::Bool && right == TypeTag::Bool => Some(TypeTag::Bool),

            _ => None,
        }
    }
}

impl AstUnaryOp {
    /// The type produced by applying the operator to an operand of the given type, or `None` if the operator is not
    /// defined for that type.
    pub fn result_type(&self, operand: TypeTag) -> Option<TypeTag> {
        match self {
            AstUnaryOp::Negate if operand.is_numeric() => Some(operand),
            AstUnaryOp::LogicalNot if operand == TypeTag::Bool => Some(TypeTag::Bool),
            _ => None,
        }
    }
}

impl fmt::Display for AstUnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AstUnaryOp::Negate => write!(f, "-"),
            AstUnaryOp::LogicalNot => write!(f, "!"),
        }
    }
}

impl fmt::Display for AstBinaryOp {
    #[rustfmt::skip]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AstBinaryOp::Add                  => write!(f, "+"),
            AstBinaryOp::Subtract             => write!(f, "-"),
            AstBinaryOp::Multiply             => write!(f, "*"),
            AstBinaryOp::Divide               => write!(f, "/"),
            AstBinaryOp::EqualTo              => write!(f, "=="),
            AstBinaryOp::NotEqualTo           => write!(f, "!="),
            AstBinaryOp::LessThan             => write!(f, "<"),
            AstBinaryOp::LessThanOrEqualTo    => write!(f, "<="),
            AstBinaryOp::GreaterThan          => write!(f, ">"),
            AstBinaryOp::GreaterThanOrEqualTo => write!(f, ">="),
            AstBinaryOp::LogicalAnd           => write!(f, "&&"),
            AstBinaryOp::LogicalOr            => write!(f, "||"),
        }
    }
}
