// Copyright 2025 Neil Henderson, Blue Tarp Media.
//
//! The `writer` module defines [JsWriter], a buffered, indenting writer for JavaScript source lines.

use std::io::{BufWriter, IntoInnerError, Result, Write};

/// Writes JavaScript one line at a time at the current indentation level.
pub struct JsWriter<W: Write> {
    writer: BufWriter<W>,
    indent: String,
    level: usize,
}

impl<W: Write> JsWriter<W> {
    /// Creates a writer which indents with `indent_width` spaces per level.
    pub fn new(sink: W, indent_width: usize) -> Self {
        Self { writer: BufWriter::new(sink), indent: " ".repeat(indent_width), level: 0 }
    }

    /// Writes a line at the current indentation level.
    pub fn writeln(&mut self, line: &str) -> Result<()> {
        for _ in 0..self.level {
            self.writer.write_all(self.indent.as_bytes())?;
        }

        writeln!(self.writer, "{line}")
    }

    /// Writes an empty line.
    pub fn blank_line(&mut self) -> Result<()> {
        writeln!(self.writer)
    }

    /// Increases the indentation level.
    pub fn indent(&mut self) {
        self.level += 1;
    }

    /// Decreases the indentation level.
    pub fn dedent(&mut self) {
        self.level = self.level.saturating_sub(1);
    }

    /// Flushes buffered output and returns the sink.
    pub fn finish(self) -> Result<W> {
        self.writer.into_inner().map_err(IntoInnerError::into_error)
    }
}
