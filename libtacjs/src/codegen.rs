// Copyright 2025 Neil Henderson, Blue Tarp Media.
//
//! The `codegen` module generates JavaScript from an [IrProgram].
//!
//! Each IR function becomes a JavaScript function. A function without labels is written as straight-line code. A
//! function with labels is written as a dispatch loop: a `switch` on a program counter inside an infinite loop, with
//! one case per label, so that branches become assignments to the program counter.
//!
//! Generation only reads the IR, and the same program always produces the same text.

mod js;


use std::io::{self, Write};

use log::debug;
use thiserror::Error;

use crate::core::TypeTag;
use crate::ir::{IrProgram, LabelId};

/// Options that control code generation.
#[derive(Debug, Copy, Clone)]
pub struct CodegenOptions {
    /// The number of spaces per indentation level.
    pub indent_width: usize,

    /// Writes a comment at the top of the output.
    pub emit_header: bool,

    /// Fails with [CodegenError::MissingEntryFunction] when the program has no `_entry` function. Otherwise the
    /// trailing call to the entry function is omitted.
    pub require_entry: bool,
}

impl Default for CodegenOptions {
    fn default() -> Self {
        Self { indent_width: 4, emit_header: true, require_entry: true }
    }
}

/// An error during code generation.
#[derive(Debug, Error)]
pub enum CodegenError {
    #[error("Cannot cast to '{to}' in function '{function}'")]
    UnsupportedCast { function: String, to: TypeTag },

    #[error("Branch to undefined label '{label}' in function '{function}'")]
    UnresolvedLabel { function: String, label: LabelId },

    #[error("Host name '{name}' is a JavaScript keyword")]
    ReservedHostName { name: String },

    #[error("Program has no entry function")]
    MissingEntryFunction,

    #[error("Cannot write JavaScript: {0}")]
    Io(#[from] io::Error),
}

/// Generates JavaScript for the program and writes it to `sink`. Nothing is written if generation fails.
pub fn generate<W: Write>(program: &IrProgram, mut sink: W, options: &CodegenOptions) -> Result<(), CodegenError> {
    debug!("Generating JavaScript for {} function(s)", program.functions.len());

    let mut writer = js::JsWriter::new(Vec::new(), options.indent_width);
    js::write_program(program, &mut writer, options)?;
    let buffer = writer.finish()?;

    sink.write_all(&buffer)?;
    sink.flush()?;

    Ok(())
}

/// Generates JavaScript for the program and returns it as a string.
pub fn generate_to_string(program: &IrProgram, options: &CodegenOptions) -> Result<String, CodegenError> {
    let mut buffer = Vec::new();
    generate(program, &mut buffer, options)?;

    String::from_utf8(buffer).map_err(|error| CodegenError::Io(io::Error::new(io::ErrorKind::InvalidData, error)))
}
