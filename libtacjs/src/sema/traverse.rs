// Copyright 2025 Neil Henderson, Blue Tarp Media.
//
//! The `traverse` module defines recursive functions which traverse the syntax tree and type check it.
//!
//! Functions beginning with `typecheck_` infer and return the `TypeTag` of an expression. Functions beginning with
//! `check_` only perform validation. Errors are recorded in the [Analyzer] and traversal always continues.

use log::trace;

use crate::ast::{AstBlock, AstExpression, AstFunction, AstRoot, AstStatement, AstVariableDeclaration};
use crate::core::{ENTRY_FUNCTION_NAME, TypeTag};

use super::analyzer::Analyzer;
use super::errors::SemanticError;
use super::function_table::{FunctionOrigin, FunctionSignature};

/// Traverses the tree and type checks every statement.
pub fn typecheck_root(tree: &AstRoot, an: &mut Analyzer) {
    if an.options().prescan_function_signatures {
        prescan_function_signatures(tree, an);
    }

    // Top-level statements form the body of the entry function, so they get their own scope above the global one.
    an.scopes.push_new();

    for stmt in &tree.0 {
        match stmt {
            AstStatement::Function(function) => check_function_declaration(function, an),
            _ => check_statement(stmt, an),
        }
    }

    an.scopes.pop();
}

/// Registers the signature of every top-level function that is not already registered.
fn prescan_function_signatures(tree: &AstRoot, an: &mut Analyzer) {
    for function in tree.functions() {
        if function.name == ENTRY_FUNCTION_NAME || an.functions.contains(&function.name) {
            continue;
        }

        an.functions.register(FunctionSignature {
            name: function.name.clone(),
            param_types: function.param_types(),
            return_type: function.return_type,
            origin: FunctionOrigin::Prescan,
        });
    }
}

/// Registers a top-level function's signature and checks its body.
fn check_function_declaration(function: &AstFunction, an: &mut Analyzer) {
    let name = &function.name;

    if name == ENTRY_FUNCTION_NAME {
        an.report(SemanticError::ReservedFunctionName { name: name.clone() });
    } else {
        match an.functions.get(name).map(|signature| signature.origin) {
            Some(FunctionOrigin::Host | FunctionOrigin::Defined) => {
                an.report(SemanticError::FunctionRedefinition { name: name.clone() });
            }

            Some(FunctionOrigin::Prescan) | None => {
                // Registered before the body is checked so that the function can call itself.
                an.functions.register(FunctionSignature {
                    name: name.clone(),
                    param_types: function.param_types(),
                    return_type: function.return_type,
                    origin: FunctionOrigin::Defined,
                });
            }
        }
    }

    check_function_body(function, an);
}

/// Checks a function's parameters and body.
///
/// The parameters are declared in the same scope as the outermost block of the body.
fn check_function_body(function: &AstFunction, an: &mut Analyzer) {
    trace!("Checking function '{}'", function.name);

    an.begin_function(&function.name, function.return_type);

    for param in &function.params {
        if an.scopes.lookup_local(&param.name).is_some() {
            an.report(SemanticError::DuplicateParameter { function: function.name.clone(), name: param.name.clone() });
            continue;
        }

        let param_type = if param.param_type.is_void() {
            an.report(SemanticError::VoidVariable { name: param.name.clone() });
            TypeTag::Invalid
        } else {
            param.param_type
        };

        an.scopes.insert(&param.name, param_type, None);
    }

    check_block_items(&function.body, an);

    an.end_function();
}

/// Checks the statements of a block in the current scope.
fn check_block_items(block: &AstBlock, an: &mut Analyzer) {
    for stmt in &block.0 {
        check_statement(stmt, an);
    }
}

/// Checks a statement which is the body of an `if` arm or a loop. It gets its own scope even when it is not a block.
fn check_nested_statement(stmt: &AstStatement, an: &mut Analyzer) {
    if matches!(stmt, AstStatement::Block(_)) {
        check_statement(stmt, an);
    } else {
        an.scopes.push_new();
        check_statement(stmt, an);
        an.scopes.pop();
    }
}

/// Checks a statement.
fn check_statement(stmt: &AstStatement, an: &mut Analyzer) {
    match stmt {
        AstStatement::Expression(expr) => {
            _ = typecheck_expression(expr, an);
        }

        AstStatement::Block(block) => {
            an.scopes.push_new();
            check_block_items(block, an);
            an.scopes.pop();
        }

        AstStatement::Declaration(decl) => check_variable_declaration(decl, an),

        AstStatement::If { condition, then_stmt, else_stmt } => {
            check_condition(condition, "if", an);
            check_nested_statement(then_stmt, an);

            if let Some(else_stmt) = else_stmt {
                check_nested_statement(else_stmt, an);
            }
        }

        AstStatement::While { condition, body } => {
            check_condition(condition, "while", an);
            check_nested_statement(body, an);
        }

        AstStatement::For { init, condition, step, body } => {
            an.scopes.push_new();

            if let Some(init) = init {
                check_statement(init, an);
            }

            if let Some(condition) = condition {
                check_condition(condition, "for", an);
            }

            if let Some(step) = step {
                check_statement(step, an);
            }

            check_nested_statement(body, an);

            an.scopes.pop();
        }

        AstStatement::Return(expr) => check_return(expr.as_ref(), an),

        AstStatement::Function(function) => {
            an.report(SemanticError::NestedFunction { name: function.name.clone() });

            // Still check the body for errors, but the function is never registered.
            check_function_body(function, an);
        }
    }
}

/// Checks a variable declaration and declares the variable in the current scope.
fn check_variable_declaration(decl: &AstVariableDeclaration, an: &mut Analyzer) {
    // The initializer is checked before the variable is declared, so it cannot refer to the variable itself.
    let init_type = decl.init.as_ref().map(|init| typecheck_expression(init, an));

    if an.scopes.lookup_local(&decl.name).is_some() {
        an.report(SemanticError::Redeclaration { name: decl.name.clone() });
        return;
    }

    let declared = decl.declared_type;

    if declared.is_void() {
        an.report(SemanticError::VoidVariable { name: decl.name.clone() });
        an.scopes.insert(&decl.name, TypeTag::Invalid, None);
        return;
    }

    if let Some(found) = init_type
        && !found.is_invalid()
        && found != declared
        && !(found.is_numeric() && declared.is_numeric())
    {
        an.report(SemanticError::DeclarationTypeMismatch { name: decl.name.clone(), declared, found });
    }

    an.scopes.insert(&decl.name, declared, None);
}

/// Checks that the condition of an `if`, `while` or `for` statement is a `bool`.
fn check_condition(condition: &AstExpression, construct: &'static str, an: &mut Analyzer) {
    let found = typecheck_expression(condition, an);

    if !found.is_invalid() && found != TypeTag::Bool {
        an.report(SemanticError::ConditionNotBool { construct, found });
    }
}

/// Checks a return statement against the return type of the enclosing function.
fn check_return(expr: Option<&AstExpression>, an: &mut Analyzer) {
    let found = match expr {
        Some(expr) => typecheck_expression(expr, an),
        None => TypeTag::Void,
    };

    let Some(function) = an.current_function().cloned() else {
        an.report(SemanticError::ReturnOutsideFunction);
        return;
    };

    let expected = function.return_type;

    if !found.is_invalid() && !expected.is_invalid() && !found.widens_to(expected) {
        an.report(SemanticError::ReturnTypeMismatch { function: function.name, expected, found });
    }
}

/// Type checks an expression and returns its type, or `TypeTag::Invalid` if it (or a sub-expression) has an error.
pub fn typecheck_expression(expr: &AstExpression, an: &mut Analyzer) -> TypeTag {
    match expr {
        AstExpression::Literal(literal) => literal.type_tag(),

        AstExpression::Identifier(name) => {
            let symbol_type = an.scopes.lookup_chain(name).map(|symbol| symbol.symbol_type);

            symbol_type.unwrap_or_else(|| {
                an.report(SemanticError::UndeclaredIdentifier { name: name.clone() });
                TypeTag::Invalid
            })
        }

        AstExpression::Unary { op, expr } => {
            let operand = typecheck_expression(expr, an);
            if operand.is_invalid() {
                return TypeTag::Invalid;
            }

            op.result_type(operand).unwrap_or_else(|| {
                an.report(SemanticError::InvalidUnaryOperand { op: *op, operand });
                TypeTag::Invalid
            })
        }

        AstExpression::Binary { op, left, right } => {
            let left = typecheck_expression(left, an);
            let right = typecheck_expression(right, an);
            if left.is_invalid() || right.is_invalid() {
                return TypeTag::Invalid;
            }

            op.result_type(left, right).unwrap_or_else(|| {
                an.report(SemanticError::InvalidOperands { op: *op, left, right });
                TypeTag::Invalid
            })
        }

        AstExpression::Assignment { name, value } => typecheck_assignment(name, value, an),

        AstExpression::Call { name, args } => typecheck_call(name, args, an),
    }
}

/// Type checks an assignment, which has the type of its target.
fn typecheck_assignment(name: &str, value: &AstExpression, an: &mut Analyzer) -> TypeTag {
    let found = typecheck_expression(value, an);

    // The value's error has already been reported.
    if found.is_invalid() {
        return TypeTag::Invalid;
    }

    let Some(expected) = an.scopes.lookup_chain(name).map(|symbol| symbol.symbol_type) else {
        an.report(SemanticError::UndeclaredAssignmentTarget { name: name.to_string() });
        return TypeTag::Invalid;
    };

    if expected.is_invalid() {
        return TypeTag::Invalid;
    }

    if !found.widens_to(expected) {
        an.report(SemanticError::AssignmentTypeMismatch { name: name.to_string(), expected, found });
        return TypeTag::Invalid;
    }

    expected
}

/// Type checks a function call, which has the callee's return type.
///
/// The arguments are always checked, even if the callee is unknown.
fn typecheck_call(name: &str, args: &[AstExpression], an: &mut Analyzer) -> TypeTag {
    let arg_types: Vec<TypeTag> = args.iter().map(|arg| typecheck_expression(arg, an)).collect();

    let Some(signature) = an.functions.get(name).cloned() else {
        an.report(SemanticError::UndeclaredFunction { name: name.to_string() });
        return TypeTag::Invalid;
    };

    if signature.param_types.len() != arg_types.len() {
        an.report(SemanticError::ArityMismatch {
            name: name.to_string(),
            expected: signature.param_types.len(),
            found: arg_types.len(),
        });
        return TypeTag::Invalid;
    }

    let mut is_err = false;

    for (index, (&found, &expected)) in arg_types.iter().zip(&signature.param_types).enumerate() {
        if found.is_invalid() {
            is_err = true;
        } else if !found.widens_to(expected) {
            let position = index + 1;
            an.report(SemanticError::ArgumentTypeMismatch { name: name.to_string(), position, expected, found });
            is_err = true;
        }
    }

    if is_err { TypeTag::Invalid } else { signature.return_type }
}
