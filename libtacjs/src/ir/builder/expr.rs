// Copyright 2025 Neil Henderson, Blue Tarp Media.
//
//! The `expr` module defines functions to lower expressions into IR.

use crate::ICE;
use crate::ast::{AstBinaryOp, AstExpression, AstLiteral, AstUnaryOp};
use crate::core::TypeTag;

use super::super::{IrBinaryOp, IrOperand, TempId};
use super::{BuildResult, IrBuilder, Lowered};

/// Lowers an expression.
pub(super) fn lower_expression(builder: &mut IrBuilder, expr: &AstExpression) -> BuildResult<Lowered> {
    match expr {
        AstExpression::Literal(literal) => Ok(lower_literal(builder, literal)),

        AstExpression::Identifier(name) => {
            let binding = builder.resolve_variable(name);
            Ok(Lowered { temp: Some(binding.temp), ty: binding.ty })
        }

        AstExpression::Unary { op, expr } => lower_unary(builder, *op, expr),

        AstExpression::Binary { op: AstBinaryOp::LogicalAnd, left, right } => lower_logical_and(builder, left, right),

        AstExpression::Binary { op: AstBinaryOp::LogicalOr, left, right } => lower_logical_or(builder, left, right),

        AstExpression::Binary { op, left, right } => lower_binary(builder, *op, left, right),

        AstExpression::Assignment { name, value } => lower_assignment(builder, name, value),

        AstExpression::Call { name, args } => lower_call(builder, name, args),
    }
}

/// Lowers an expression which must produce a value.
pub(super) fn lower_value(builder: &mut IrBuilder, expr: &AstExpression) -> BuildResult<(TempId, TypeTag)> {
    let lowered = lower_expression(builder, expr)?;

    let Some(temp) = lowered.temp else {
        ICE!("Expression of type '{}' used as a value in function '{}'", lowered.ty, builder.function.name);
    };

    Ok((temp, lowered.ty))
}

/// Converts a value to the `target` type, emitting a `Cast` if the types differ.
pub(super) fn convert_value(builder: &mut IrBuilder, temp: TempId, from: TypeTag, target: TypeTag) -> TempId {
    if from == target || !from.is_storable() || !target.is_storable() {
        return temp;
    }

    builder.function.emit_cast(IrOperand::Temporary(temp), target)
}

fn lower_literal(builder: &mut IrBuilder, literal: &AstLiteral) -> Lowered {
    let temp = builder.function.emit_mov(IrOperand::from(literal));
    Lowered { temp: Some(temp), ty: literal.type_tag() }
}

/// Negation lowers to `0 - v` and logical not to `v == false`.
fn lower_unary(builder: &mut IrBuilder, op: AstUnaryOp, expr: &AstExpression) -> BuildResult<Lowered> {
    let (src, ty) = lower_value(builder, expr)?;
    let src = IrOperand::Temporary(src);

    let lowered = match op {
        AstUnaryOp::Negate => {
            let temp = builder.function.emit_binary(IrBinaryOp::Sub, IrOperand::zero(ty), src);
            Lowered { temp: Some(temp), ty }
        }

        AstUnaryOp::LogicalNot => {
            let temp = builder.function.emit_binary(IrBinaryOp::Eq, src, IrOperand::BoolLit(false));
            Lowered { temp: Some(temp), ty: TypeTag::Bool }
        }
    };

    Ok(lowered)
}

fn lower_binary(
    builder: &mut IrBuilder,
    op: AstBinaryOp,
    left: &AstExpression,
    right: &AstExpression,
) -> BuildResult<Lowered> {
    let Some(ir_op) = IrBinaryOp::from_ast(op) else {
        ICE!("Operator '{op}' has no IR instruction");
    };

    let (lhs, left_type) = lower_value(builder, left)?;

    // The left value must not change if the right operand assigns to its variable.
    let lhs = if contains_assignment(right) { builder.take_temp(lhs) } else { lhs };

    let (rhs, right_type) = lower_value(builder, right)?;

    let ty = op.result_type(left_type, right_type).unwrap_or(TypeTag::Invalid);
    let temp = builder.function.emit_binary(ir_op, IrOperand::Temporary(lhs), IrOperand::Temporary(rhs));

    Ok(Lowered { temp: Some(temp), ty })
}

/// Lowers `left && right` with short-circuit control flow:
///
/// ```text
///     brfalse left, Lfalse
///     result = mov right
///     br Lend
/// Lfalse:
///     result = mov false
/// Lend:
/// ```
fn lower_logical_and(builder: &mut IrBuilder, left: &AstExpression, right: &AstExpression) -> BuildResult<Lowered> {
    let (lhs, _) = lower_value(builder, left)?;

    let false_label = builder.function.new_label();
    let end_label = builder.function.new_label();
    let result = builder.function.new_temp();

    builder.function.emit_brfalse(IrOperand::Temporary(lhs), false_label);

    let bindings = builder.bindings.snapshot();
    let (rhs, _) = lower_value(builder, right)?;
    builder.bindings.restore(bindings);

    builder.function.emit_mov_to(result, IrOperand::Temporary(rhs));
    builder.function.emit_br(end_label);

    builder.function.emit_label(false_label);
    builder.function.emit_mov_to(result, IrOperand::BoolLit(false));

    builder.function.emit_label(end_label);

    Ok(Lowered { temp: Some(result), ty: TypeTag::Bool })
}

/// Lowers `left || right` with short-circuit control flow:
///
/// ```text
///     brfalse left, Lrhs
///     result = mov true
///     br Lend
/// Lrhs:
///     result = mov right
/// Lend:
/// ```
fn lower_logical_or(builder: &mut IrBuilder, left: &AstExpression, right: &AstExpression) -> BuildResult<Lowered> {
    let (lhs, _) = lower_value(builder, left)?;

    let rhs_label = builder.function.new_label();
    let end_label = builder.function.new_label();
    let result = builder.function.new_temp();

    builder.function.emit_brfalse(IrOperand::Temporary(lhs), rhs_label);
    builder.function.emit_mov_to(result, IrOperand::BoolLit(true));
    builder.function.emit_br(end_label);

    builder.function.emit_label(rhs_label);

    let bindings = builder.bindings.snapshot();
    let (rhs, _) = lower_value(builder, right)?;
    builder.bindings.restore(bindings);

    builder.function.emit_mov_to(result, IrOperand::Temporary(rhs));

    builder.function.emit_label(end_label);

    Ok(Lowered { temp: Some(result), ty: TypeTag::Bool })
}

fn lower_assignment(builder: &mut IrBuilder, name: &str, value: &AstExpression) -> BuildResult<Lowered> {
    let (temp, ty) = lower_value(builder, value)?;

    let binding = builder.resolve_variable(name);

    let temp = convert_value(builder, temp, ty, binding.ty);
    let temp = builder.take_temp(temp);
    builder.assign_variable(&binding, name, temp);

    let ty = if binding.ty.is_invalid() { ty } else { binding.ty };
    Ok(Lowered { temp: Some(temp), ty })
}

/// Arguments are lowered left to right and converted to their parameter types.
fn lower_call(builder: &mut IrBuilder, callee: &str, args: &[AstExpression]) -> BuildResult<Lowered> {
    let signature = builder.signature(callee)?;

    let mut arg_temps = Vec::with_capacity(args.len());

    for (index, arg) in args.iter().enumerate() {
        let (temp, ty) = lower_value(builder, arg)?;

        let param_type = signature.param_types.get(index).copied().unwrap_or(ty);
        let temp = convert_value(builder, temp, ty, param_type);

        let later_args = &args[index + 1..];
        let temp = if later_args.iter().any(contains_assignment) { builder.take_temp(temp) } else { temp };

        arg_temps.push(temp);
    }

    let temp = builder.function.emit_call(callee, arg_temps, signature.return_type);

    Ok(Lowered { temp, ty: signature.return_type })
}

/// Does the expression assign to a variable?
fn contains_assignment(expr: &AstExpression) -> bool {
    match expr {
        AstExpression::Literal(_) | AstExpression::Identifier(_) => false,
        AstExpression::Unary { expr, .. } => contains_assignment(expr),
        AstExpression::Binary { left, right, .. } => contains_assignment(left) || contains_assignment(right),
        AstExpression::Assignment { .. } => true,
        AstExpression::Call { args, .. } => args.iter().any(contains_assignment),
    }
}
