// Copyright 2025 Neil Henderson, Blue Tarp Media.

//! Integration tests that compile well-formed syntax trees to JavaScript.
//!
//! A fixture may sit next to a `.js` file with the same stem, holding the expected JavaScript, and a `.ir` file
//! holding the expected printed IR. Both must match exactly. A fixture with an `expected_output` field is also run
//! with `node`, and what it prints must match.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::OnceLock;

use libtacjs::compiler_driver::DriverOutput;
use log::warn;
use tacjs_tests::Fixture;

// Include the generated test case functions.
include!(concat!(env!("OUT_DIR"), "/generated_valid_program_tests.rs"));

/// Runs the fixture and verifies that the driver generates JavaScript without error diagnostics.
fn compile_fixture_and_expect_success(fixture_filename: &str) {
    let _ = env_logger::builder().is_test(true).try_init();

    let fixture = Fixture::load(fixture_filename);
    let mut options = fixture.driver_options();

    let run_validate_only = std::env::var("TACJS_VALIDATE_ONLY").is_ok();
    if run_validate_only {
        options.validate = true;
    }

    let (driver, result) = fixture.run(options.clone());

    if driver.has_error_diagnostics() {
        driver.print_diagnostics();
    }

    let output = result.unwrap_or_else(|e| panic!("'{fixture_filename}' should compile: {e}"));
    if run_validate_only {
        assert_eq!(output, DriverOutput::Validated);
        return;
    }

    let DriverOutput::JavaScript(js) = output else {
        panic!("Expected JavaScript output");
    };

    assert!(js.ends_with("_entry();\n"), "{js}");

    let expected_js = Path::new(fixture_filename).with_extension("js");
    if expected_js.exists() {
        let expected = std::fs::read_to_string(&expected_js).expect("Cannot read expected JavaScript");
        assert_eq!(js, expected);
    }

    if let Some(expected_output) = &fixture.expected_output {
        match run_with_node(&fixture, &js) {
            Some(stdout) => assert_eq!(&stdout, expected_output, "{js}"),
            None => warn!("Skipping execution of '{fixture_filename}': node is not installed"),
        }
    }

    let expected_ir = Path::new(fixture_filename).with_extension("ir");
    if expected_ir.exists() {
        options.print_ir = true;
        let (_, result) = fixture.run(options);

        let Ok(DriverOutput::Ir(ir)) = result else {
            panic!("Expected IR output");
        };

        let expected = std::fs::read_to_string(&expected_ir).expect("Cannot read expected IR");
        assert_eq!(ir, expected);
    }
}

/// Is `node` installed? Checked once per test run.
fn node_is_available() -> bool {
    static AVAILABLE: OnceLock<bool> = OnceLock::new();

    *AVAILABLE.get_or_init(|| Command::new("node").arg("--version").output().is_ok_and(|out| out.status.success()))
}

/// Runs the generated JavaScript, after the fixture's host prelude, and returns what it prints. Returns `None` if
/// `node` is not installed.
fn run_with_node(fixture: &Fixture, js: &str) -> Option<String> {
    if !node_is_available() {
        return None;
    }

    let mut node = Command::new("node")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to start node");

    let script = format!("{}{js}", fixture.host_prelude());
    let mut stdin = node.stdin.take().expect("node should have a stdin pipe");
    stdin.write_all(script.as_bytes()).expect("failed to write the script to node");
    drop(stdin);

    let output = node.wait_with_output().expect("failed to run node");
    assert!(output.status.success(), "node failed:\n{}\n{script}", String::from_utf8_lossy(&output.stderr));

    Some(String::from_utf8(output.stdout).expect("node output should be UTF-8"))
}
