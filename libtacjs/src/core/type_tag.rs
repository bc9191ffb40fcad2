// Copyright 2025 Neil Henderson, Blue Tarp Media.
//
//! The `type_tag` module defines [TypeTag], the type of every value in the language.

use std::fmt;

/// The type of a value, variable, function parameter or function return.
///
/// `Invalid` is never written in source code. Semantic analysis returns it for an expression that failed to type
/// check, so that the failure is reported once where it happened and enclosing expressions stay quiet.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TypeTag {
    Int,
    Float,
    Bool,
    String,
    Void,
    Invalid,
}

impl TypeTag {
    /// Is this type `Int` or `Float`?
    pub fn is_numeric(&self) -> bool {
        matches!(self, TypeTag::Int | TypeTag::Float)
    }

    /// Is this the error-propagation marker?
    pub fn is_invalid(&self) -> bool {
        matches!(self, TypeTag::Invalid)
    }

    /// Is this type `Void`?
    pub fn is_void(&self) -> bool {
        matches!(self, TypeTag::Void)
    }

    /// Can a value of this type be stored in a variable?
    pub fn is_storable(&self) -> bool {
        !matches!(self, TypeTag::Void | TypeTag::Invalid)
    }

    /// Can a value of this type be assigned to a destination of type `target` without an explicit conversion?
    ///
    /// The types must be identical, or the value must widen from `Int` to `Float`.
    pub fn widens_to(&self, target: TypeTag) -> bool {
        *self == target || (*self == TypeTag::Int && target == TypeTag::Float)
    }

    /// Gets the common type of two numeric operands: `Float` if either operand is `Float`, otherwise `Int`.
    pub fn common_numeric_type(a: TypeTag, b: TypeTag) -> TypeTag {
        debug_assert!(a.is_numeric() && b.is_numeric());

        if a == TypeTag::Float || b == TypeTag::Float { TypeTag::Float } else { TypeTag::Int }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTag::Int => write!(f, "int"),
            TypeTag::Float => write!(f, "float"),
            TypeTag::Bool => write!(f, "bool"),
            TypeTag::String => write!(f, "string"),
            TypeTag::Void => write!(f, "void"),
            TypeTag::Invalid => write!(f, "<invalid>"),
        }
    }
}
