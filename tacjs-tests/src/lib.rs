// Copyright 2025 Neil Henderson, Blue Tarp Media.

//! Helpers for the tacjs integration tests.
//!
//! A test fixture is a JSON file holding a syntax tree (in the `serde` form of [AstRoot]) together with the host
//! environment it runs in: host globals, host functions, and analyzer options. A fixture may also give JavaScript
//! for its host environment and the output the program prints, so that the generated code can be executed.

use std::fs::File;
use std::io::BufReader;

use serde::Deserialize;

use libtacjs::TypeTag;
use libtacjs::ast::AstRoot;
use libtacjs::compiler_driver::{Driver, DriverError, DriverOptions, DriverOutput};
use libtacjs::sema::{FunctionSignature, Scope};

/// A syntax tree fixture.
#[derive(Debug, Deserialize)]
pub struct Fixture {
    /// Globals provided by the host environment.
    #[serde(default)]
    pub globals: Vec<FixtureGlobal>,

    /// Functions provided by the host environment.
    #[serde(default)]
    pub host_functions: Vec<FixtureHostFunction>,

    /// Registers all function signatures before checking any statement.
    #[serde(default)]
    pub prescan: bool,

    /// For an invalid program, the exact number of semantic errors expected.
    #[serde(default)]
    pub expected_errors: Option<usize>,

    /// For a valid program, what the generated JavaScript prints when it runs.
    #[serde(default)]
    pub expected_output: Option<String>,

    /// The program's top-level statements.
    pub program: AstRoot,
}

/// A host global.
#[derive(Debug, Deserialize)]
pub struct FixtureGlobal {
    pub name: String,

    #[serde(rename = "type")]
    pub ty: TypeTag,

    /// The global's initial value when the program runs.
    #[serde(default)]
    pub value: Option<serde_json::Value>,
}

/// A host function signature.
#[derive(Debug, Deserialize)]
pub struct FixtureHostFunction {
    pub name: String,

    #[serde(default)]
    pub params: Vec<TypeTag>,

    pub return_type: TypeTag,

    /// The JavaScript definition of the function when the program runs.
    #[serde(default)]
    pub js: Option<String>,
}

impl Fixture {
    /// Loads a fixture from a JSON file.
    pub fn load(filename: &str) -> Self {
        let reader = BufReader::new(File::open(filename).expect("Cannot open fixture file"));
        serde_json::from_reader(reader).unwrap_or_else(|e| panic!("Invalid fixture '{filename}': {e}"))
    }

    /// Parses a fixture from JSON text.
    pub fn from_json(json: &str) -> Self {
        serde_json::from_str(json).unwrap_or_else(|e| panic!("Invalid fixture: {e}"))
    }

    /// Creates the global scope holding the fixture's host globals.
    pub fn global_scope(&self) -> Scope {
        let mut scope = Scope::new();

        for global in &self.globals {
            scope.insert(&global.name, global.ty, None);
        }

        scope
    }

    /// Creates driver options which declare the fixture's host functions.
    pub fn driver_options(&self) -> DriverOptions {
        let mut options = DriverOptions::default();
        options.analyzer.prescan_function_signatures = self.prescan;

        options.host_functions = self
            .host_functions
            .iter()
            .map(|function| FunctionSignature::host(&function.name, function.params.clone(), function.return_type))
            .collect();

        options
    }

    /// JavaScript which defines the fixture's host environment, to run before the generated code.
    pub fn host_prelude(&self) -> String {
        let mut prelude = String::new();

        for global in &self.globals {
            if let Some(value) = &global.value {
                prelude.push_str(&format!("let {} = {value};\n", global.name));
            }
        }

        for function in &self.host_functions {
            if let Some(js) = &function.js {
                prelude.push_str(js);
                prelude.push('\n');
            }
        }

        prelude
    }

    /// Runs the compiler driver over the fixture's program.
    pub fn run(&self, options: DriverOptions) -> (Driver, Result<DriverOutput, DriverError>) {
        let mut global_scope = self.global_scope();

        let mut driver = Driver::new(options);
        let result = driver.run(&self.program, &mut global_scope);
        (driver, result)
    }
}
