// Copyright 2025 Neil Henderson, Blue Tarp Media.
//
//! The `driver` module defines `Driver`, which is the tacjs compiler driver type.

use std::io::Write;

use log::debug;

use crate::ast::AstRoot;
use crate::codegen;
use crate::ir::{IrBuilder, IrProgram};
use crate::sema::{Analyzer, Scope};

use super::diagnostics::{self, Diagnostic, DiagnosticKind};
use super::options::DriverOptions;
use super::{DriverError, DriverOutput};

/// The tacjs compiler driver.
///
/// The compiler driver runs semantic analysis, IR building and JavaScript code generation over a syntax tree, and
/// records a diagnostic for every problem it finds. Modify the [DriverOptions] to control the driver's behavior.
///
/// # Examples
///
/// ```
/// # use libtacjs::ast::{AstExpression, AstRoot, AstStatement};
/// # use libtacjs::compiler_driver::{Driver, DriverOptions, DriverOutput};
/// # use libtacjs::sema::Scope;
/// # use libtacjs::TypeTag;
/// let tree = AstRoot(vec![AstStatement::declare("x", TypeTag::Int, Some(AstExpression::int(1)))]);
/// let mut global_scope = Scope::new();
///
/// let mut driver = Driver::new(DriverOptions::default());
/// match driver.run(&tree, &mut global_scope) {
///     Ok(DriverOutput::JavaScript(js)) => assert!(js.contains("let x = 1;")),
///     _ => driver.print_diagnostics(),
/// }
/// ```
pub struct Driver {
    // Options that control the driver.
    options: DriverOptions,

    // Diagnostics emitted during the last run.
    errors: Vec<Diagnostic>,
    warnings: Vec<Diagnostic>,
}

impl Driver {
    /// Creates a new compiler driver with the given options.
    pub fn new(options: DriverOptions) -> Self {
        Self { options, errors: Vec::new(), warnings: Vec::new() }
    }

    /// The compiler driver's options.
    pub fn options(&self) -> &DriverOptions {
        &self.options
    }

    /// Runs the compiler pipeline over the tree.
    ///
    /// `global_scope` holds the host-provided globals; it is visible to every function. Diagnostics from a previous
    /// run are discarded.
    pub fn run(&mut self, tree: &AstRoot, global_scope: &mut Scope) -> Result<DriverOutput, DriverError> {
        self.errors.clear();
        self.warnings.clear();

        debug!("Running semantic analysis");

        let functions = {
            let mut analyzer = Analyzer::with_options(global_scope, self.options.analyzer);

            for signature in &self.options.host_functions {
                analyzer.declare_function(signature.clone());
            }

            let error_count = analyzer.check(tree);

            for error in analyzer.errors() {
                self.add_diagnostic(Diagnostic::error(error.to_string()));
            }

            if error_count > 0 {
                return Err(DriverError::SemanticErrors(error_count));
            }

            analyzer.into_function_table()
        };

        if self.options.validate {
            return Ok(DriverOutput::Validated);
        }

        debug!("Building IR");

        let program = IrBuilder::new(&functions).with_global_scope(global_scope).build_program(tree);
        let program = program.inspect_err(|error| self.add_diagnostic(Diagnostic::error(error.to_string())))?;

        self.warn_about_host_global_writes(&program);

        if self.options.print_ir {
            return Ok(DriverOutput::Ir(program.to_string()));
        }

        debug!("Generating JavaScript");

        let js = codegen::generate_to_string(&program, &self.options.codegen);
        let js = js.inspect_err(|error| self.add_diagnostic(Diagnostic::error(error.to_string())))?;

        Ok(DriverOutput::JavaScript(js))
    }

    /// Records a warning for every host global which the program assigns.
    fn warn_about_host_global_writes(&mut self, program: &IrProgram) {
        for function in &program.functions {
            let written = function.instructions.iter().filter_map(|instr| instr.dst());

            for temp in written {
                if let Some((name, _)) = function.globals.iter().find(|(_, global)| *global == temp) {
                    let message = format!("Assignment to host global '{name}' in function '{}'", function.name);
                    self.add_diagnostic(Diagnostic::warning(message));
                }
            }
        }
    }

    /// Adds a diagnostic (error or warning).
    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        match diagnostic.kind() {
            DiagnosticKind::Error => self.errors.push(diagnostic),
            DiagnosticKind::Warning => self.warnings.push(diagnostic),
        }
    }

    /// Are there any error diagnostics?
    pub fn has_error_diagnostics(&self) -> bool {
        !self.errors.is_empty()
    }

    /// The number of error diagnostics.
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// The number of warning diagnostics.
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// All diagnostics, with errors before warnings.
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.errors.iter().chain(&self.warnings)
    }

    /// Prints all diagnostics to `stderr`, with any errors printed first before any warnings.
    pub fn print_diagnostics(&self) {
        _ = self.write_diagnostics(std::io::stderr());
    }

    /// Writes all diagnostics to the given `buffer`, with any errors printed first before any warnings.
    ///
    /// You probably want `print_diagnostics` instead of this function, unless you deliberately want to print
    /// diagnostics into a buffer.
    pub fn write_diagnostics(&self, buffer: impl Write) -> std::io::Result<()> {
        diagnostics::write_diagnostics(buffer, &self.errors, &self.warnings)
    }
}
