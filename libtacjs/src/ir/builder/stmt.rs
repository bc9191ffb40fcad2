// Copyright 2025 Neil Henderson, Blue Tarp Media.
//
//! The `stmt` module defines functions to lower statements into IR.

use crate::ICE;
use crate::ast::{AstBlock, AstExpression, AstStatement, AstVariableDeclaration};

use super::super::IrOperand;
use super::expr;
use super::{BuildResult, IrBuilder};

/// Lowers a statement.
pub(super) fn lower_statement(builder: &mut IrBuilder, stmt: &AstStatement) -> BuildResult<()> {
    match stmt {
        AstStatement::Expression(expr) => {
            _ = expr::lower_expression(builder, expr)?;
        }

        AstStatement::Block(block) => lower_block(builder, block)?,

        AstStatement::Declaration(decl) => lower_declaration(builder, decl)?,

        AstStatement::If { condition, then_stmt, else_stmt } => {
            lower_if(builder, condition, then_stmt, else_stmt.as_deref())?;
        }

        AstStatement::While { condition, body } => lower_while(builder, condition, body)?,

        AstStatement::For { init, condition, step, body } => {
            lower_for(builder, init.as_deref(), condition.as_ref(), step.as_deref(), body)?;
        }

        AstStatement::Return(expr) => lower_return(builder, expr.as_ref())?,

        AstStatement::Function(function) => {
            ICE!("Nested function '{}' should have been rejected by semantic analysis", function.name);
        }
    }

    Ok(())
}

/// Lowers a block in its own lexical depth.
fn lower_block(builder: &mut IrBuilder, block: &AstBlock) -> BuildResult<()> {
    builder.bindings.push_frame();

    for stmt in &block.0 {
        lower_statement(builder, stmt)?;
    }

    builder.bindings.pop_frame();
    Ok(())
}

/// Lowers the body of an `if` arm or a loop, which has its own lexical depth even when it is not a block.
fn lower_nested_statement(builder: &mut IrBuilder, stmt: &AstStatement) -> BuildResult<()> {
    if matches!(stmt, AstStatement::Block(_)) {
        return lower_statement(builder, stmt);
    }

    builder.bindings.push_frame();
    lower_statement(builder, stmt)?;
    builder.bindings.pop_frame();
    Ok(())
}

/// Binds the declared name in the current lexical depth. The initializer is converted to the declared type.
fn lower_declaration(builder: &mut IrBuilder, decl: &AstVariableDeclaration) -> BuildResult<()> {
    let temp = match &decl.init {
        Some(init) => {
            let (temp, ty) = expr::lower_value(builder, init)?;
            let temp = expr::convert_value(builder, temp, ty, decl.declared_type);
            builder.take_temp(temp)
        }

        None => builder.function.new_temp(),
    };

    builder.declare_variable(&decl.name, decl.declared_type, temp);
    Ok(())
}

/// Lowers an `if` statement:
///
/// ```text
///     brfalse condition, Lelse
///     <then>
///     br Lend
/// Lelse:
///     <else>
/// Lend:
/// ```
fn lower_if(
    builder: &mut IrBuilder,
    condition: &AstExpression,
    then_stmt: &AstStatement,
    else_stmt: Option<&AstStatement>,
) -> BuildResult<()> {
    let (condition, _) = expr::lower_value(builder, condition)?;

    let else_label = builder.function.new_label();
    let end_label = builder.function.new_label();

    builder.function.emit_brfalse(IrOperand::Temporary(condition), else_label);

    let bindings = builder.bindings.snapshot();

    lower_nested_statement(builder, then_stmt)?;
    builder.bindings.restore(bindings.clone());

    builder.function.emit_br(end_label);
    builder.function.emit_label(else_label);

    if let Some(else_stmt) = else_stmt {
        lower_nested_statement(builder, else_stmt)?;
        builder.bindings.restore(bindings);
    }

    builder.function.emit_label(end_label);
    Ok(())
}

/// Lowers a `while` statement:
///
/// ```text
/// Lcond:
///     brfalse condition, Lend
/// Lbody:
///     <body>
///     br Lcond
/// Lend:
/// ```
fn lower_while(builder: &mut IrBuilder, condition: &AstExpression, body: &AstStatement) -> BuildResult<()> {
    lower_loop(builder, Some(condition), body, None)
}

/// Lowers a `for` statement. The initializer runs once in the loop's own lexical depth, then the loop behaves like
/// `while (condition) { body; step; }`.
fn lower_for(
    builder: &mut IrBuilder,
    init: Option<&AstStatement>,
    condition: Option<&AstExpression>,
    step: Option<&AstStatement>,
    body: &AstStatement,
) -> BuildResult<()> {
    builder.bindings.push_frame();

    if let Some(init) = init {
        lower_statement(builder, init)?;
    }

    lower_loop(builder, condition, body, step)?;

    builder.bindings.pop_frame();
    Ok(())
}

/// Lowers a loop. Without a condition the loop has no exit branch.
fn lower_loop(
    builder: &mut IrBuilder,
    condition: Option<&AstExpression>,
    body: &AstStatement,
    step: Option<&AstStatement>,
) -> BuildResult<()> {
    let cond_label = builder.function.new_label();
    let body_label = builder.function.new_label();
    let end_label = builder.function.new_label();

    builder.function.emit_label(cond_label);

    if let Some(condition) = condition {
        let (condition, _) = expr::lower_value(builder, condition)?;
        builder.function.emit_brfalse(IrOperand::Temporary(condition), end_label);
    }

    builder.function.emit_label(body_label);

    let bindings = builder.bindings.snapshot();

    lower_nested_statement(builder, body)?;

    if let Some(step) = step {
        lower_statement(builder, step)?;
    }

    builder.bindings.restore(bindings);

    builder.function.emit_br(cond_label);
    builder.function.emit_label(end_label);
    Ok(())
}

/// Lowers a `return` statement. The value is converted to the function's return type.
fn lower_return(builder: &mut IrBuilder, expr: Option<&AstExpression>) -> BuildResult<()> {
    let return_type = builder.function.return_type;

    match expr {
        // A void function may return the result of a void call.
        Some(expr) if return_type.is_void() => {
            _ = expr::lower_expression(builder, expr)?;
            builder.function.emit_ret(None);
        }

        Some(expr) => {
            let (temp, ty) = expr::lower_value(builder, expr)?;
            let temp = expr::convert_value(builder, temp, ty, return_type);
            builder.function.emit_ret(Some(IrOperand::Temporary(temp)));
        }

        None => builder.function.emit_ret(None),
    }

    Ok(())
}
