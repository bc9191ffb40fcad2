// Copyright 2025 Neil Henderson, Blue Tarp Media.
//
//! The `sequential` module writes the body of a function without labels as straight-line code.

use std::collections::HashSet;
use std::io::Write;

use crate::ir::IrInstruction;

use super::super::CodegenError;
use super::render::FunctionContext;
use super::writer::JsWriter;

/// Writes the body of a function whose instructions contain no labels.
///
/// Each name is declared with `let` where it is first written. Locals which are never written are declared at the
/// top of the body. A trailing `return;` is omitted.
pub fn write_body<W: Write>(context: &FunctionContext, writer: &mut JsWriter<W>) -> Result<(), CodegenError> {
    let function = context.function;
    let names = &context.names;

    let written: HashSet<String> =
        function.instructions.iter().filter_map(IrInstruction::dst).map(|temp| names.render(temp)).collect();

    let mut declared = HashSet::new();

    for name in names.body_declarations(function) {
        if !written.contains(&name) {
            writer.writeln(&format!("let {name};"))?;
            declared.insert(name);
        }
    }

    let last_index = function.instructions.len().saturating_sub(1);

    for (index, instr) in function.instructions.iter().enumerate() {
        match instr {
            IrInstruction::Ret { value: None } if index == last_index => (),

            IrInstruction::Ret { value } => writer.writeln(&context.return_statement(value.as_ref())?)?,

            IrInstruction::Br { target } | IrInstruction::BrFalse { target, .. } => {
                return Err(context.unresolved_label(*target));
            }

            _ => {
                let expression = context.expression(instr)?;

                let statement = match instr.dst() {
                    Some(dst) => {
                        let name = names.render(dst);
                        let is_first_write = !names.is_predeclared(&name) && declared.insert(name.clone());

                        if is_first_write {
                            format!("let {name} = {expression};")
                        } else {
                            format!("{name} = {expression};")
                        }
                    }
                    None => context.assignment(None, &expression),
                };

                writer.writeln(&statement)?;
            }
        }
    }

    Ok(())
}
