// Copyright 2025 Neil Henderson, Blue Tarp Media.
//
//! The `ast_statement` module defines [AstStatement] and the declaration types it contains.

use crate::core::TypeTag;

use super::AstExpression;

/// A block of statements which introduces a new lexical scope.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AstBlock(pub Vec<AstStatement>);

/// A statement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AstStatement {
    Expression(AstExpression),
    Block(AstBlock),
    Declaration(AstVariableDeclaration),
    If {
        condition: AstExpression,
        then_stmt: Box<AstStatement>,
        else_stmt: Option<Box<AstStatement>>,
    },
    While {
        condition: AstExpression,
        body: Box<AstStatement>,
    },
    For {
        init: Option<Box<AstStatement>>,
        condition: Option<AstExpression>,
        step: Option<Box<AstStatement>>,
        body: Box<AstStatement>,
    },
    Return(Option<AstExpression>),
    Function(AstFunction),
}

/// A variable declaration with an optional initializer.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AstVariableDeclaration {
    pub name: String,
    pub declared_type: TypeTag,
    pub init: Option<AstExpression>,
}

/// A function parameter.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AstParameter {
    pub name: String,
    pub param_type: TypeTag,
}

/// A function declaration and its definition.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AstFunction {
    pub name: String,
    pub return_type: TypeTag,
    pub params: Vec<AstParameter>,
    pub body: AstBlock,
}

impl AstFunction {
    /// The function's parameter types, in declaration order.
    pub fn param_types(&self) -> Vec<TypeTag> {
        self.params.iter().map(|param| param.param_type).collect()
    }
}

impl AstParameter {
    /// Creates a parameter.
    pub fn new<S: Into<String>>(name: S, param_type: TypeTag) -> Self {
        Self { name: name.into(), param_type }
    }
}

impl AstStatement {
    /// Creates an expression statement.
    pub fn expr(expr: AstExpression) -> Self {
        AstStatement::Expression(expr)
    }

    /// Creates a block statement.
    pub fn block(stmts: Vec<AstStatement>) -> Self {
        AstStatement::Block(AstBlock(stmts))
    }

    /// Creates a variable declaration.
    pub fn declare<S: Into<String>>(name: S, declared_type: TypeTag, init: Option<AstExpression>) -> Self {
        AstStatement::Declaration(AstVariableDeclaration { name: name.into(), declared_type, init })
    }

    /// Creates an `if` statement with an optional `else` statement.
    pub fn if_else(condition: AstExpression, then_stmt: AstStatement, else_stmt: Option<AstStatement>) -> Self {
        AstStatement::If { condition, then_stmt: Box::new(then_stmt), else_stmt: else_stmt.map(Box::new) }
    }

    /// Creates a `while` statement.
    pub fn while_loop(condition: AstExpression, body: AstStatement) -> Self {
        AstStatement::While { condition, body: Box::new(body) }
    }

    /// Creates a `for` statement.
    pub fn for_loop(
        init: Option<AstStatement>,
        condition: Option<AstExpression>,
        step: Option<AstStatement>,
        body: AstStatement,
    ) -> Self {
        AstStatement::For { init: init.map(Box::new), condition, step: step.map(Box::new), body: Box::new(body) }
    }

    /// Creates a `return` statement.
    pub fn ret(expr: Option<AstExpression>) -> Self {
        AstStatement::Return(expr)
    }

    /// Creates a function declaration.
    pub fn function<S: Into<String>>(
        name: S,
        return_type: TypeTag,
        params: Vec<AstParameter>,
        body: Vec<AstStatement>,
    ) -> Self {
        AstStatement::Function(AstFunction { name: name.into(), return_type, params, body: AstBlock(body) })
    }
}
