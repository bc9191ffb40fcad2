// Copyright 2025 Neil Henderson, Blue Tarp Media.
//
//! The `dispatch` module writes the body of a function with labels as a loop around a `switch` statement.
//!
//! The program counter, usually `pc`, holds the number of the case to run next. Case 0 is the function entry and each
//! label starts a new case. A branch stores the target case in the program counter and breaks out of the `switch`, so
//! the loop dispatches again.

use std::io::Write;

use log::trace;

use crate::ir::IrInstruction;

use super::super::CodegenError;
use super::render::FunctionContext;
use super::writer::JsWriter;

/// Writes the body of a function whose instructions contain at least one label.
pub fn write_body<W: Write>(context: &FunctionContext, writer: &mut JsWriter<W>) -> Result<(), CodegenError> {
    let function = context.function;

    let declarations = context.names.body_declarations(function);
    if !declarations.is_empty() {
        let names: Vec<&str> = declarations.iter().map(String::as_str).collect();
        writer.writeln(&format!("let {};", names.join(", ")))?;
    }

    let pc = context.program.program_counter();

    writer.writeln(&format!("let {pc} = 0;"))?;
    writer.writeln("while (true) {")?;
    writer.indent();
    writer.writeln(&format!("switch ({pc}) {{"))?;
    writer.indent();
    writer.writeln("case 0:")?;
    writer.indent();

    // Is the previous written instruction a `Br` or `Ret`?
    let mut terminated = false;

    for instr in &function.instructions {
        match instr {
            IrInstruction::Label { id } => {
                let case = context.case_index(*id)?;

                if !terminated {
                    write_jump(writer, pc, case)?;
                }

                writer.dedent();
                writer.writeln(&format!("case {case}:"))?;
                writer.indent();

                terminated = false;
            }

            _ if terminated => trace!("{}: skipping unreachable '{instr}'", function.name),

            IrInstruction::Br { target } => {
                write_jump(writer, pc, context.case_index(*target)?)?;
                terminated = true;
            }

            IrInstruction::BrFalse { condition, target } => {
                let condition = context.operand(condition)?;
                let case = context.case_index(*target)?;

                writer.writeln(&format!("if (!{condition}) {{ {pc} = {case}; break; }}"))?;
            }

            IrInstruction::Ret { value } => {
                writer.writeln(&context.return_statement(value.as_ref())?)?;
                terminated = true;
            }

            _ => {
                let expression = context.expression(instr)?;
                writer.writeln(&context.assignment(instr.dst(), &expression))?;
            }
        }
    }

    if !terminated {
        writer.writeln("return;")?;
    }

    writer.dedent();
    writer.dedent();
    writer.writeln("}")?;
    writer.dedent();
    writer.writeln("}")?;

    Ok(())
}

fn write_jump<W: Write>(writer: &mut JsWriter<W>, pc: &str, case: usize) -> Result<(), CodegenError> {
    writer.writeln(&format!("{pc} = {case};"))?;
    writer.writeln("break;")?;
    Ok(())
}
