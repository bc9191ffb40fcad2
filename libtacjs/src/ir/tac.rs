// Copyright 2025 Neil Henderson, Blue Tarp Media.
//
//! The `tac` module defines the types of the three-address code intermediate representation (IR) and the primitives
//! which append instructions to a function.

use std::collections::HashSet;
use std::fmt;

use log::trace;

use crate::ast::{AstBinaryOp, AstLiteral};
use crate::core::TypeTag;

use super::BuildError;

/// A temporary, local to one function. Temporaries are allocated densely starting at `t0`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TempId(pub u32);

/// A label, local to one function. Labels are allocated densely starting at `L0`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LabelId(pub u32);

impl fmt::Display for TempId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

impl fmt::Display for LabelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.0)
    }
}

/// An instruction operand.
#[derive(Debug, Clone, PartialEq)]
pub enum IrOperand {
    None,
    Temporary(TempId),
    IntLit(i64),
    FloatLit(f64),
    BoolLit(bool),
    StringLit(String),
    LabelRef(LabelId),
}

impl IrOperand {
    /// The temporary referenced by the operand, if any.
    pub fn as_temp(&self) -> Option<TempId> {
        match self {
            IrOperand::Temporary(temp) => Some(*temp),
            _ => None,
        }
    }

    /// The zero value of a numeric type.
    pub fn zero(ty: TypeTag) -> IrOperand {
        match ty {
            TypeTag::Float => IrOperand::FloatLit(0.0),
            _ => IrOperand::IntLit(0),
        }
    }
}

impl From<&AstLiteral> for IrOperand {
    fn from(literal: &AstLiteral) -> Self {
        match literal {
            AstLiteral::Int(value) => IrOperand::IntLit(*value),
            AstLiteral::Float(value) => IrOperand::FloatLit(*value),
            AstLiteral::Bool(value) => IrOperand::BoolLit(*value),
            AstLiteral::String(value) => IrOperand::StringLit(value.clone()),
        }
    }
}

impl From<TempId> for IrOperand {
    fn from(temp: TempId) -> Self {
        IrOperand::Temporary(temp)
    }
}

/// Every IR opcode.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum IrOpcode {
    Label,
    Br,
    BrFalse,
    Mov,
    Cast,
    Add,
    Sub,
    Mul,
    Div,
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
    Call,
    Ret,
}

/// The opcodes of binary arithmetic and comparison instructions.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum IrBinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
}

impl IrBinaryOp {
    /// The IR operator for a syntax tree operator. Logical operators have none; they lower to control flow.
    #[rustfmt::skip]
    pub fn from_ast(op: AstBinaryOp) -> Option<Self> {
        match op {
            AstBinaryOp::Add                  => Some(IrBinaryOp::Add),
            AstBinaryOp::Subtract             => Some(IrBinaryOp::Sub),
            AstBinaryOp::Multiply             => Some(IrBinaryOp::Mul),
            AstBinaryOp::Divide               => Some(IrBinaryOp::Div),
            AstBinaryOp::LessThan             => Some(IrBinaryOp::Lt),
            AstBinaryOp::LessThanOrEqualTo    => Some(IrBinaryOp::Le),
            AstBinaryOp::GreaterThan          => Some(IrBinaryOp::Gt),
            AstBinaryOp::GreaterThanOrEqualTo => Some(IrBinaryOp::Ge),
            AstBinaryOp::EqualTo              => Some(IrBinaryOp::Eq),
            AstBinaryOp::NotEqualTo           => Some(IrBinaryOp::Ne),
            AstBinaryOp::LogicalAnd           => None,
            AstBinaryOp::LogicalOr            => None,
        }
    }

    /// The opcode of the instruction.
    #[rustfmt::skip]
    pub fn opcode(&self) -> IrOpcode {
        match self {
            IrBinaryOp::Add => IrOpcode::Add,
            IrBinaryOp::Sub => IrOpcode::Sub,
            IrBinaryOp::Mul => IrOpcode::Mul,
            IrBinaryOp::Div => IrOpcode::Div,
            IrBinaryOp::Lt  => IrOpcode::Lt,
            IrBinaryOp::Le  => IrOpcode::Le,
            IrBinaryOp::Gt  => IrOpcode::Gt,
            IrBinaryOp::Ge  => IrOpcode::Ge,
            IrBinaryOp::Eq  => IrOpcode::Eq,
            IrBinaryOp::Ne  => IrOpcode::Ne,
        }
    }

    /// Does the operator compare its operands?
    pub fn is_comparison(&self) -> bool {
        !matches!(self, IrBinaryOp::Add | IrBinaryOp::Sub | IrBinaryOp::Mul | IrBinaryOp::Div)
    }
}

/// An IR instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum IrInstruction {
    Label {
        id: LabelId,
    },
    Br {
        target: LabelId,
    },
    BrFalse {
        condition: IrOperand,
        target: LabelId,
    },
    Mov {
        dst: TempId,
        src: IrOperand,
    },
    Cast {
        dst: TempId,
        src: IrOperand,
        to: TypeTag,
    },
    Binary {
        op: IrBinaryOp,
        dst: TempId,
        lhs: IrOperand,
        rhs: IrOperand,
    },
    Call {
        dst: Option<TempId>, // None when the callee returns void
        callee: String,
        args: Vec<TempId>,
        return_type: TypeTag,
    },
    Ret {
        value: Option<IrOperand>,
    },
}

impl IrInstruction {
    /// The instruction's opcode.
    pub fn opcode(&self) -> IrOpcode {
        match self {
            IrInstruction::Label { .. } => IrOpcode::Label,
            IrInstruction::Br { .. } => IrOpcode::Br,
            IrInstruction::BrFalse { .. } => IrOpcode::BrFalse,
            IrInstruction::Mov { .. } => IrOpcode::Mov,
            IrInstruction::Cast { .. } => IrOpcode::Cast,
            IrInstruction::Binary { op, .. } => op.opcode(),
            IrInstruction::Call { .. } => IrOpcode::Call,
            IrInstruction::Ret { .. } => IrOpcode::Ret,
        }
    }

    /// The temporary written by the instruction, if any.
    pub fn dst(&self) -> Option<TempId> {
        match self {
            IrInstruction::Mov { dst, .. } | IrInstruction::Cast { dst, .. } | IrInstruction::Binary { dst, .. } => {
                Some(*dst)
            }
            IrInstruction::Call { dst, .. } => *dst,
            _ => None,
        }
    }

    /// The label the instruction may branch to, if any.
    pub fn branch_target(&self) -> Option<LabelId> {
        match self {
            IrInstruction::Br { target } | IrInstruction::BrFalse { target, .. } => Some(*target),
            _ => None,
        }
    }

    /// Does control never continue to the next instruction?
    pub fn is_terminator(&self) -> bool {
        matches!(self, IrInstruction::Br { .. } | IrInstruction::Ret { .. })
    }
}

/// The IR for one function.
#[derive(Debug, Clone, PartialEq)]
pub struct IrFunction {
    pub name: String,
    pub return_type: TypeTag,
    pub param_types: Vec<TypeTag>,
    pub instructions: Vec<IrInstruction>,

    /// Readable names of the temporaries which hold a variable's value, in the order they were recorded. A name may
    /// appear more than once: every temporary of one variable has the same name.
    pub locals: Vec<(String, TempId)>,

    /// Names which are not declared in the function and refer to values provided by the host environment.
    pub globals: Vec<(String, TempId)>,

    next_temp: u32,
    next_label: u32,
}

impl IrFunction {
    /// Creates an empty function. Its parameters are the temporaries `t0..tN`.
    pub fn new<S: Into<String>>(name: S, return_type: TypeTag, param_types: Vec<TypeTag>) -> Self {
        let next_temp = param_types.len() as u32;

        Self {
            name: name.into(),
            return_type,
            param_types,
            instructions: Vec::new(),
            locals: Vec::new(),
            globals: Vec::new(),
            next_temp,
            next_label: 0,
        }
    }

    /// The temporaries which hold the function's parameters.
    pub fn param_temps(&self) -> impl Iterator<Item = TempId> + use<> {
        (0..self.param_types.len() as u32).map(TempId)
    }

    /// Is the temporary one of the function's parameters?
    pub fn is_param(&self, temp: TempId) -> bool {
        (temp.0 as usize) < self.param_types.len()
    }

    /// Allocates a new temporary.
    pub fn new_temp(&mut self) -> TempId {
        let temp = TempId(self.next_temp);
        self.next_temp += 1;
        temp
    }

    /// Allocates a new label.
    pub fn new_label(&mut self) -> LabelId {
        let label = LabelId(self.next_label);
        self.next_label += 1;
        label
    }

    /// The number of temporaries allocated so far, including parameters.
    pub fn temp_count(&self) -> u32 {
        self.next_temp
    }

    /// The number of labels allocated so far.
    pub fn label_count(&self) -> u32 {
        self.next_label
    }

    /// Appends an instruction.
    pub fn emit(&mut self, instruction: IrInstruction) {
        trace!("{}: {instruction}", self.name);
        self.instructions.push(instruction);
    }

    /// Appends a `Label` instruction.
    pub fn emit_label(&mut self, id: LabelId) {
        self.emit(IrInstruction::Label { id });
    }

    /// Appends an unconditional branch.
    pub fn emit_br(&mut self, target: LabelId) {
        self.emit(IrInstruction::Br { target });
    }

    /// Appends a branch which is taken when the condition is false.
    pub fn emit_brfalse(&mut self, condition: IrOperand, target: LabelId) {
        self.emit(IrInstruction::BrFalse { condition, target });
    }

    /// Appends a `Mov` into a new temporary and returns it.
    pub fn emit_mov(&mut self, src: IrOperand) -> TempId {
        let dst = self.new_temp();
        self.emit(IrInstruction::Mov { dst, src });
        dst
    }

    /// Appends a `Mov` into an existing temporary.
    pub fn emit_mov_to(&mut self, dst: TempId, src: IrOperand) {
        self.emit(IrInstruction::Mov { dst, src });
    }

    /// Appends a `Cast` into a new temporary and returns it.
    pub fn emit_cast(&mut self, src: IrOperand, to: TypeTag) -> TempId {
        let dst = self.new_temp();
        self.emit(IrInstruction::Cast { dst, src, to });
        dst
    }

    /// Appends a binary instruction into a new temporary and returns it.
    pub fn emit_binary(&mut self, op: IrBinaryOp, lhs: IrOperand, rhs: IrOperand) -> TempId {
        let dst = self.new_temp();
        self.emit(IrInstruction::Binary { op, dst, lhs, rhs });
        dst
    }

    /// Appends a `Call`. A destination temporary is allocated and returned only if the return type is not `Void`.
    pub fn emit_call(&mut self, callee: &str, args: Vec<TempId>, return_type: TypeTag) -> Option<TempId> {
        let dst = if return_type.is_void() { None } else { Some(self.new_temp()) };
        self.emit(IrInstruction::Call { dst, callee: callee.to_string(), args, return_type });
        dst
    }

    /// Appends a `Ret`, with or without a value.
    pub fn emit_ret(&mut self, value: Option<IrOperand>) {
        self.emit(IrInstruction::Ret { value });
    }

    /// Records that the temporary holds a value of the named local variable.
    pub fn record_local(&mut self, name: &str, temp: TempId) {
        self.locals.push((name.to_string(), temp));
    }

    /// Records that the temporary holds a value of the named host global.
    pub fn record_global(&mut self, name: &str, temp: TempId) {
        self.globals.push((name.to_string(), temp));
    }

    /// The readable name of a temporary, if it holds a variable's value.
    pub fn readable_name(&self, temp: TempId) -> Option<&str> {
        self.locals.iter().chain(&self.globals).find(|(_, t)| *t == temp).map(|(name, _)| name.as_str())
    }

    /// Does the function contain any `Label` instruction?
    pub fn has_labels(&self) -> bool {
        self.instructions.iter().any(|instr| matches!(instr, IrInstruction::Label { .. }))
    }

    /// Is the last instruction a `Ret`?
    pub fn ends_with_ret(&self) -> bool {
        matches!(self.instructions.last(), Some(IrInstruction::Ret { .. }))
    }

    /// Verifies that every label is defined exactly once and that every branch targets a defined label.
    pub fn verify_labels(&self) -> Result<(), BuildError> {
        let mut defined = HashSet::new();

        for instr in &self.instructions {
            if let IrInstruction::Label { id } = instr
                && !defined.insert(*id)
            {
                return Err(BuildError::DuplicateLabel { function: self.name.clone(), label: *id });
            }
        }

        let mut targets = self.instructions.iter().filter_map(IrInstruction::branch_target);

        match targets.find(|target| !defined.contains(target)) {
            Some(label) => Err(BuildError::UnresolvedLabel { function: self.name.clone(), label }),
            None => Ok(()),
        }
    }
}

/// The IR for a whole program: its functions, in program order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IrProgram {
    pub functions: Vec<IrFunction>,
}

impl IrProgram {
    /// Gets the named function.
    pub fn function(&self, name: &str) -> Option<&IrFunction> {
        self.functions.iter().find(|function| function.name == name)
    }

    /// Gets the program's entry function, if it has one.
    pub fn entry(&self) -> Option<&IrFunction> {
        self.function(crate::core::ENTRY_FUNCTION_NAME)
    }
}
