// Copyright 2025 Neil Henderson, Blue Tarp Media.
//
//! The `ast_literals` module defines [AstLiteral].

use std::fmt;

use crate::core::TypeTag;

/// A literal constant value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AstLiteral {
    Int(i64),
    Float(f64),
    Bool(bool),
    String(String),
}

impl AstLiteral {
    /// The type of the literal.
    pub fn type_tag(&self) -> TypeTag {
        match self {
            AstLiteral::Int(_) => TypeTag::Int,
            AstLiteral::Float(_) => TypeTag::Float,
            AstLiteral::Bool(_) => TypeTag::Bool,
            AstLiteral::String(_) => TypeTag::String,
        }
    }
}

impl fmt::Display for AstLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AstLiteral::Int(value) => write!(f, "{value}"),
            AstLiteral::Float(value) => write!(f, "{value:?}"),
            AstLiteral::Bool(value) => write!(f, "{value}"),
            AstLiteral::String(value) => write!(f, "{value:?}"),
        }
    }
}
