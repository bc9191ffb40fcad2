// Copyright 2025 Neil Henderson, Blue Tarp Media.

//! Integration tests that expect semantic analysis to report errors for ill-formed syntax trees.

use libtacjs::compiler_driver::DriverError;
use tacjs_tests::Fixture;

// Include the generated test case functions.
include!(concat!(env!("OUT_DIR"), "/generated_invalid_program_tests.rs"));

/// Runs the fixture and verifies that semantic analysis fails with error diagnostics, and that no later stage ran.
fn compile_fixture_and_expect_diagnostics(fixture_filename: &str) {
    let _ = env_logger::builder().is_test(true).try_init();

    let fixture = Fixture::load(fixture_filename);
    let (driver, result) = fixture.run(fixture.driver_options());

    assert!(matches!(result, Err(DriverError::SemanticErrors(count)) if count == driver.error_count()));
    assert!(driver.has_error_diagnostics());

    if let Some(expected) = fixture.expected_errors {
        assert_eq!(driver.error_count(), expected, "{:?}", driver.diagnostics().collect::<Vec<_>>());
    }
}
