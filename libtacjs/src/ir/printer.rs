// Copyright 2025 Neil Henderson, Blue Tarp Media.
//
//! The `printer` module renders the IR as text.
//!
//! ```text
//! func add(int, int) -> int {
//!   .local a -> t0
//!   .local b -> t1
//!   t2 = add t0, t1
//!   ret t2
//! }
//! ```

use std::fmt;

use super::{IrBinaryOp, IrFunction, IrInstruction, IrOpcode, IrOperand, IrProgram};

impl fmt::Display for IrOpcode {
    #[rustfmt::skip]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mnemonic = match self {
            IrOpcode::Label   => "label",
            IrOpcode::Br      => "br",
            IrOpcode::BrFalse => "brfalse",
            IrOpcode::Mov     => "mov",
            IrOpcode::Cast    => "cast",
            IrOpcode::Add     => "add",
            IrOpcode::Sub     => "sub",
            IrOpcode::Mul     => "mul",
            IrOpcode::Div     => "div",
            IrOpcode::Lt      => "lt",
            IrOpcode::Le      => "le",
            IrOpcode::Gt      => "gt",
            IrOpcode::Ge      => "ge",
            IrOpcode::Eq      => "eq",
            IrOpcode::Ne      => "ne",
            IrOpcode::Call    => "call",
            IrOpcode::Ret     => "ret",
        };

        write!(f, "{mnemonic}")
    }
}

impl fmt::Display for IrBinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.opcode())
    }
}

impl fmt::Display for IrOperand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IrOperand::None => write!(f, "_"),
            IrOperand::Temporary(temp) => write!(f, "{temp}"),
            IrOperand::IntLit(value) => write!(f, "{value}"),
            IrOperand::FloatLit(value) => write!(f, "{value:?}"),
            IrOperand::BoolLit(value) => write!(f, "{value}"),
            IrOperand::StringLit(value) => write!(f, "{value:?}"),
            IrOperand::LabelRef(label) => write!(f, "{label}"),
        }
    }
}

impl fmt::Display for IrInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IrInstruction::Label { id } => write!(f, "{id}:"),
            IrInstruction::Br { target } => write!(f, "br {target}"),
            IrInstruction::BrFalse { condition, target } => write!(f, "brfalse {condition}, {target}"),
            IrInstruction::Mov { dst, src } => write!(f, "{dst} = mov {src}"),
            IrInstruction::Cast { dst, src, to } => write!(f, "{dst} = cast {src} : {to}"),
            IrInstruction::Binary { op, dst, lhs, rhs } => write!(f, "{dst} = {op} {lhs}, {rhs}"),

            IrInstruction::Call { dst, callee, args, return_type } => {
                if let Some(dst) = dst {
                    write!(f, "{dst} = ")?;
                }

                let args: Vec<String> = args.iter().map(|arg| arg.to_string()).collect();
                write!(f, "call {callee}({}) -> {return_type}", args.join(", "))
            }

            IrInstruction::Ret { value: Some(value) } => write!(f, "ret {value}"),
            IrInstruction::Ret { value: None } => write!(f, "ret"),
        }
    }
}

impl fmt::Display for IrFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params: Vec<String> = self.param_types.iter().map(|ty| ty.to_string()).collect();
        writeln!(f, "func {}({}) -> {} {{", self.name, params.join(", "), self.return_type)?;

        for (name, temp) in &self.locals {
            writeln!(f, "  .local {name} -> {temp}")?;
        }

        for (name, temp) in &self.globals {
            writeln!(f, "  .global {name} -> {temp}")?;
        }

        for instr in &self.instructions {
            writeln!(f, "  {instr}")?;
        }

        write!(f, "}}")
    }
}

impl fmt::Display for IrProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, function) in self.functions.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{function}")?;
        }

        Ok(())
    }
}
