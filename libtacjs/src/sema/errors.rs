// Copyright 2025 Neil Henderson, Blue Tarp Media.
//
//! The `errors` module defines [SemanticError].

use thiserror::Error;

use crate::ast::{AstBinaryOp, AstUnaryOp};
use crate::core::TypeTag;

/// An error found during semantic analysis.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SemanticError {
    #[error("Use of undeclared identifier '{name}'")]
    UndeclaredIdentifier { name: String },

    #[error("Assignment to undeclared variable '{name}'")]
    UndeclaredAssignmentTarget { name: String },

    #[error("Redefinition of variable '{name}' in the same scope")]
    Redeclaration { name: String },

    #[error("Variable '{name}' cannot be declared 'void'")]
    VoidVariable { name: String },

    #[error("Cannot initialize variable '{name}' of type '{declared}' with a value of type '{found}'")]
    DeclarationTypeMismatch { name: String, declared: TypeTag, found: TypeTag },

    #[error("Cannot assign a value of type '{found}' to variable '{name}' of type '{expected}'")]
    AssignmentTypeMismatch { name: String, expected: TypeTag, found: TypeTag },

    #[error("Condition of '{construct}' statement must be 'bool' but has type '{found}'")]
    ConditionNotBool { construct: &'static str, found: TypeTag },

    #[error("Function '{function}' returns '{expected}' but the return statement has type '{found}'")]
    ReturnTypeMismatch { function: String, expected: TypeTag, found: TypeTag },

    #[error("Invalid operands to binary expression ('{left}' {op} '{right}')")]
    InvalidOperands { op: AstBinaryOp, left: TypeTag, right: TypeTag },

    #[error("Invalid operand to unary expression ({op}'{operand}')")]
    InvalidUnaryOperand { op: AstUnaryOp, operand: TypeTag },

    #[error("Call to undeclared function '{name}'")]
    UndeclaredFunction { name: String },

    #[error("Function '{name}' expects {expected} argument(s) but {found} were given")]
    ArityMismatch { name: String, expected: usize, found: usize },

    #[error("Argument {position} of call to '{name}' has type '{found}' but the parameter has type '{expected}'")]
    ArgumentTypeMismatch { name: String, position: usize, expected: TypeTag, found: TypeTag },

    #[error("Redefinition of function '{name}'")]
    FunctionRedefinition { name: String },

    #[error("Function '{name}' can only be declared at the top level")]
    NestedFunction { name: String },

    #[error("Redefinition of parameter '{name}' in function '{function}'")]
    DuplicateParameter { function: String, name: String },

    #[error("The name '{name}' is reserved for the program's entry function")]
    ReservedFunctionName { name: String },

    #[error("Return statement outside of a function")]
    ReturnOutsideFunction,
}
