// Copyright 2025 Neil Henderson, Blue Tarp Media.
//
//! The `render` module renders operands and non-branching instructions of one function as JavaScript text.

use std::fmt::Write;

use indexmap::IndexMap;

use crate::ICE;
use crate::core::TypeTag;
use crate::ir::{IrBinaryOp, IrFunction, IrInstruction, IrOperand, LabelId, TempId};

use super::super::CodegenError;
use super::names::{FunctionNames, ProgramNames};

/// What the generator knows about the function it is writing.
pub struct FunctionContext<'a> {
    pub function: &'a IrFunction,
    pub names: FunctionNames,
    pub program: &'a ProgramNames,
    cases: IndexMap<LabelId, usize>,
}

impl<'a> FunctionContext<'a> {
    pub fn new(function: &'a IrFunction, program: &'a ProgramNames) -> Self {
        let mut cases = IndexMap::new();

        // Case 0 is the function entry, so labels are numbered from 1 in the order they appear.
        for instr in &function.instructions {
            if let IrInstruction::Label { id } = instr {
                let next_case = cases.len() + 1;
                cases.entry(*id).or_insert(next_case);
            }
        }

        Self { function, names: FunctionNames::new(function, program), program, cases }
    }

    /// Does the function need a dispatch loop?
    pub fn has_labels(&self) -> bool {
        !self.cases.is_empty()
    }

    /// The number of the `switch` case which starts at the label.
    pub fn case_index(&self, label: LabelId) -> Result<usize, CodegenError> {
        self.cases.get(&label).copied().ok_or_else(|| self.unresolved_label(label))
    }

    pub fn unresolved_label(&self, label: LabelId) -> CodegenError {
        CodegenError::UnresolvedLabel { function: self.function.name.clone(), label }
    }

    /// Renders an operand as a JavaScript expression.
    pub fn operand(&self, operand: &IrOperand) -> Result<String, CodegenError> {
        let text = match operand {
            IrOperand::None => "undefined".to_string(),
            IrOperand::Temporary(temp) => self.names.render(*temp),
            IrOperand::IntLit(value) => value.to_string(),
            IrOperand::FloatLit(value) => render_float(*value),
            IrOperand::BoolLit(value) => value.to_string(),
            IrOperand::StringLit(value) => render_string(value),
            IrOperand::LabelRef(label) => self.case_index(*label)?.to_string(),
        };

        Ok(text)
    }

    /// Renders the value computed by a `Mov`, `Cast`, `Binary` or `Call` instruction.
    pub fn expression(&self, instr: &IrInstruction) -> Result<String, CodegenError> {
        match instr {
            IrInstruction::Mov { src, .. } => self.operand(src),

            IrInstruction::Cast { src, to, .. } => {
                let value = self.operand(src)?;

                match to {
                    TypeTag::Int => Ok(format!("Math.trunc(Number({value}))")),
                    TypeTag::Float => Ok(format!("Number({value})")),
                    TypeTag::Bool => Ok(format!("Boolean({value})")),
                    TypeTag::String => Ok(format!("String({value})")),
                    TypeTag::Void | TypeTag::Invalid => {
                        Err(CodegenError::UnsupportedCast { function: self.function.name.clone(), to: *to })
                    }
                }
            }

            IrInstruction::Binary { op, lhs, rhs, .. } => {
                Ok(format!("{} {} {}", self.operand(lhs)?, binary_operator(*op), self.operand(rhs)?))
            }

            IrInstruction::Call { callee, args, .. } => {
                let args: Vec<String> = args.iter().map(|arg| self.names.render(*arg)).collect();
                Ok(format!("{}({})", self.program.function(callee), args.join(", ")))
            }

            _ => ICE!("Cannot render '{instr}' as an expression"),
        }
    }

    /// Renders a statement which stores the expression in the destination, or evaluates it for its side effects.
    pub fn assignment(&self, dst: Option<TempId>, expression: &str) -> String {
        match dst {
            Some(dst) => format!("{} = {expression};", self.names.render(dst)),
            None => format!("{expression};"),
        }
    }

    /// Renders a `return` statement.
    pub fn return_statement(&self, value: Option<&IrOperand>) -> Result<String, CodegenError> {
        match value {
            Some(value) => Ok(format!("return {};", self.operand(value)?)),
            None => Ok("return;".to_string()),
        }
    }
}

#[rustfmt::skip]
fn binary_operator(op: IrBinaryOp) -> &'static str {
    match op {
        IrBinaryOp::Add => "+",
        IrBinaryOp::Sub => "-",
        IrBinaryOp::Mul => "*",
        IrBinaryOp::Div => "/",
        IrBinaryOp::Lt  => "<",
        IrBinaryOp::Le  => "<=",
        IrBinaryOp::Gt  => ">",
        IrBinaryOp::Ge  => ">=",
        IrBinaryOp::Eq  => "===",
        IrBinaryOp::Ne  => "!==",
    }
}

/// Renders a float so that it stays a valid JavaScript number literal. Finite values keep their decimal point.
pub fn render_float(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "Infinity".to_string() } else { "-Infinity".to_string() }
    } else {
        format!("{value:?}")
    }
}

/// Renders a string as a double-quoted JavaScript string literal.
pub fn render_string(value: &str) -> String {
    let mut literal = String::with_capacity(value.len() + 2);
    literal.push('"');

    for ch in value.chars() {
        match ch {
            '"' => literal.push_str("\\\""),
            '\\' => literal.push_str("\\\\"),
            '\n' => literal.push_str("\\n"),
            '\r' => literal.push_str("\\r"),
            '\t' => literal.push_str("\\t"),
            ch if ch.is_control() || ch == '\u{2028}' || ch == '\u{2029}' => {
                let _ = write!(literal, "\\u{:04x}", ch as u32);
            }
            ch => literal.push(ch),
        }
    }

    literal.push('"');
    literal
}
