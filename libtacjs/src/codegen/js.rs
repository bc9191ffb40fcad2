// Copyright 2025 Neil Henderson, Blue Tarp Media.
//
//! The `js` module writes an IR program as JavaScript source.

mod dispatch;
mod names;
mod render;
mod sequential;
mod writer;

use std::io::Write;

use log::{debug, warn};

use crate::core::ENTRY_FUNCTION_NAME;
use crate::ir::{IrFunction, IrProgram};

use super::{CodegenError, CodegenOptions};
use names::ProgramNames;
use render::FunctionContext;

pub use writer::JsWriter;

const HEADER: &str = "// Generated from IR";

/// Writes every function of the program, followed by a call to the entry function.
pub fn write_program<W: Write>(
    program: &IrProgram,
    writer: &mut JsWriter<W>,
    options: &CodegenOptions,
) -> Result<(), CodegenError> {
    let entry = program.entry();

    if entry.is_none() {
        if options.require_entry {
            return Err(CodegenError::MissingEntryFunction);
        }

        warn!("Program has no '{ENTRY_FUNCTION_NAME}' function; the output will not call it");
    }

    let program_names = ProgramNames::new(program)?;

    if options.emit_header {
        writer.writeln(HEADER)?;
        writer.blank_line()?;
    }

    for function in &program.functions {
        write_function(function, &program_names, writer)?;
        writer.blank_line()?;
    }

    if let Some(entry) = entry {
        writer.writeln(&format!("{}();", program_names.function(&entry.name)))?;
    }

    Ok(())
}

fn write_function<W: Write>(
    function: &IrFunction,
    program_names: &ProgramNames,
    writer: &mut JsWriter<W>,
) -> Result<(), CodegenError> {
    let context = FunctionContext::new(function, program_names);

    let mode = if context.has_labels() { "dispatch" } else { "sequential" };
    debug!("Writing function '{}' in {mode} mode", function.name);

    let name = program_names.function(&function.name);
    writer.writeln(&format!("function {name}({}) {{", context.names.parameter_list(function)))?;
    writer.indent();

    if context.has_labels() {
        dispatch::write_body(&context, writer)?;
    } else {
        sequential::write_body(&context, writer)?;
    }

    writer.dedent();
    writer.writeln("}")?;

    Ok(())
}
