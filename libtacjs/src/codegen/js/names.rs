// Copyright 2025 Neil Henderson, Blue Tarp Media.
//
//! The `names` module decides how each temporary of a function is spelled in JavaScript.

use std::collections::{HashMap, HashSet};

use indexmap::IndexSet;

use crate::ir::{IrFunction, IrInstruction, IrProgram, TempId};

use super::super::CodegenError;

/// The usual name of the program counter variable in dispatch mode.
pub const PROGRAM_COUNTER: &str = "pc";

/// The program counter's name when the host already defines `pc`. Source names never start with `$`.
const HOST_SAFE_PROGRAM_COUNTER: &str = "$pc";

/// JavaScript reserved words. These can never be used as identifiers.
#[rustfmt::skip]
const KEYWORDS: &[&str] = &[
    "await", "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete", "do",
    "else", "enum", "export", "extends", "false", "finally", "for", "function", "if", "implements", "import",
    "in", "instanceof", "interface", "let", "new", "null", "package", "private", "protected", "public", "return",
    "static", "super", "switch", "this", "throw", "true", "try", "typeof", "var", "void", "while", "with",
    "yield",
];

/// Strict-mode and global names which the generated code relies on and must not shadow.
#[rustfmt::skip]
const BUILTINS: &[&str] = &[
    "arguments", "eval", "undefined", "Infinity", "NaN", "Math", "Number", "Boolean", "String",
];

/// Is the name a JavaScript keyword?
pub fn is_keyword(name: &str) -> bool {
    KEYWORDS.contains(&name)
}

/// Is the name a JavaScript reserved word, or a global which the generated code relies on?
pub fn is_reserved_word(name: &str) -> bool {
    is_keyword(name) || BUILTINS.contains(&name)
}

/// Does the name look like an unnamed temporary, `t` followed by digits?
pub fn is_temp_pattern(name: &str) -> bool {
    name.strip_prefix('t').is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

/// Would the name clash with a reserved word or with a name the generator invents?
fn needs_renaming(name: &str) -> bool {
    is_reserved_word(name) || name == PROGRAM_COUNTER || is_temp_pattern(name)
}

/// The names shared by every function of the program: function names, and the names the host defines.
#[derive(Debug)]
pub struct ProgramNames {
    /// Every function name the program defines, as written in the source.
    functions: HashSet<String>,

    /// The JavaScript names of the functions the program defines, when they differ from the source.
    renamed_functions: HashMap<String, String>,

    /// The host functions and host globals, which keep their exact spelling.
    host: HashSet<String>,

    program_counter: &'static str,
}

impl ProgramNames {
    /// Collects the program's function and host names. Fails if a host name is a JavaScript keyword, since the host
    /// cannot define it and the generator cannot rename it.
    pub fn new(program: &IrProgram) -> Result<Self, CodegenError> {
        let defined: HashSet<&str> = program.functions.iter().map(|function| function.name.as_str()).collect();

        let instructions = program.functions.iter().flat_map(|function| &function.instructions);
        let called = instructions.filter_map(|instr| match instr {
            IrInstruction::Call { callee, .. } => Some(callee.as_str()),
            _ => None,
        });

        let mut host = HashSet::new();
        for name in called.filter(|callee| !defined.contains(callee)) {
            host.insert(name.to_string());
        }
        for function in &program.functions {
            host.extend(function.globals.iter().map(|(name, _)| name.clone()));
        }

        if let Some(name) = host.iter().filter(|name| is_keyword(name)).min() {
            return Err(CodegenError::ReservedHostName { name: name.clone() });
        }

        // A defined function which would clash gets a `$fn` suffix, which no renamed local can produce.
        let renamed_functions = defined
            .iter()
            .filter(|name| needs_renaming(name) || host.contains(**name))
            .map(|name| (name.to_string(), format!("{name}$fn")))
            .collect();

        let functions = program.functions.iter().map(|function| function.name.clone()).collect();

        let program_counter = if host.contains(PROGRAM_COUNTER) { HOST_SAFE_PROGRAM_COUNTER } else { PROGRAM_COUNTER };

        Ok(Self { functions, renamed_functions, host, program_counter })
    }

    /// The JavaScript name of a function the program defines or calls.
    pub fn function(&self, name: &str) -> String {
        self.renamed_functions.get(name).cloned().unwrap_or_else(|| name.to_string())
    }

    /// The name of the program counter variable in dispatch mode.
    pub fn program_counter(&self) -> &'static str {
        self.program_counter
    }

    /// Does a local with this name clash with a function or a host name?
    fn clashes_with_local(&self, name: &str) -> bool {
        self.functions.contains(name) || self.host.contains(name)
    }
}

/// The rendered names of one function's temporaries.
#[derive(Debug)]
pub struct FunctionNames {
    names: HashMap<TempId, String>,
    params: HashSet<String>,
    globals: HashSet<String>,
    host: HashSet<String>,
}

impl FunctionNames {
    /// Decides the names for the function's temporaries.
    pub fn new(function: &IrFunction, program: &ProgramNames) -> Self {
        let globals: HashSet<String> = function.globals.iter().map(|(name, _)| name.clone()).collect();

        let mut names = HashMap::new();

        for (name, temp) in &function.locals {
            let must_rename = needs_renaming(name) || program.clashes_with_local(name);
            let rendered = if must_rename { format!("{name}$") } else { name.clone() };
            names.entry(*temp).or_insert(rendered);
        }

        // Host globals keep their exact spelling since the environment defines them.
        for (name, temp) in &function.globals {
            names.entry(*temp).or_insert_with(|| name.clone());
        }

        let mut function_names = Self { names, params: HashSet::new(), globals, host: program.host.clone() };
        function_names.params = function.param_temps().map(|temp| function_names.render(temp)).collect();
        function_names
    }

    /// The JavaScript name of the temporary. An unnamed temporary is spelled `tN`, or `$tN` when the host defines
    /// `tN`.
    pub fn render(&self, temp: TempId) -> String {
        match self.names.get(&temp) {
            Some(name) => name.clone(),
            None => {
                let name = temp.to_string();
                if self.host.contains(&name) { format!("${name}") } else { name }
            }
        }
    }
    /// Is the name declared outside the function body, as a parameter or by the host?
    pub fn is_predeclared(&self, name: &str) -> bool {
        self.params.contains(name) || self.globals.contains(name)
    }

    /// The names which the function body must declare, in order of first write. Named locals which are never
    /// written come last.
    pub fn body_declarations(&self, function: &IrFunction) -> IndexSet<String> {
        let written = function.instructions.iter().filter_map(|instr| instr.dst());
        let named = function.locals.iter().map(|(_, temp)| *temp);

        written.chain(named).map(|temp| self.render(temp)).filter(|name| !self.is_predeclared(name)).collect()
    }

    /// The parameter list of the function's signature.
    pub fn parameter_list(&self, function: &IrFunction) -> String {
        function.param_temps().map(|temp| self.render(temp)).collect::<Vec<_>>().join(", ")
    }
}
