// Copyright 2025 Neil Henderson, Blue Tarp Media.

//! Build script to generate integration test cases based on files in the `tests/valid` and `tests/invalid` directories.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use glob::glob;

const INVALID_TEST_CASES_FILENAME: &str = "generated_invalid_program_tests.rs";
const VALID_TEST_CASES_FILENAME: &str = "generated_valid_program_tests.rs";

fn main() {
    generate_tests("invalid", INVALID_TEST_CASES_FILENAME, "compile_fixture_and_expect_diagnostics");
    generate_tests("valid", VALID_TEST_CASES_FILENAME, "compile_fixture_and_expect_success");

    // We want cargo to rerun our build.rs script if any of the integration test files change.
    println!("cargo:rerun-if-changed=tests");
}

/// Generates one test function per JSON fixture underneath the given directory. Each test calls `runner` with the
/// fixture's path.
fn generate_tests(directory: &str, generated_rs_filename: &str, runner: &str) {
    let out_dir = std::env::var("OUT_DIR").unwrap(); // Set by cargo when running `cargo test`
    let generated_rs_filename = Path::new(&out_dir).join(generated_rs_filename);
    let mut writer = BufWriter::new(File::create(generated_rs_filename).expect("Failed to create file"));

    let tests_dir_path = get_tests_directory_path(directory);

    for entry in glob(&format!("{tests_dir_path}/**/*.json")).expect("Failed to read glob pattern") {
        match entry {
            Ok(fixture_path) => {
                let test_case_name = make_test_case_name(&tests_dir_path, &fixture_path);
                let fixture_filename = fixture_path.into_os_string().into_string().expect("Invalid path");

                let test_case_code = &format!(
                    r#"
                        #[test]
                        #[allow(non_snake_case)]
                        fn {test_case_name}() {{
                            {runner}("{fixture_filename}");
                        }}
                    "#
                );

                let res = writer.write_all(test_case_code.as_bytes());
                assert!(res.is_ok());
            }
            Err(e) => println!("{:?}", e),
        }
    }
}

fn make_test_case_name(root_dir_path: &str, fixture_path: &Path) -> String {
    let root = Path::new(root_dir_path);
    let rel = match fixture_path.strip_prefix(root) {
        Ok(r) => r,
        Err(_) => fixture_path,
    };

    // Replace '/' with '_'
    let name = rel.with_extension("").iter().map(|s| s.to_string_lossy()).collect::<Vec<_>>().join("_");

    name.replace('-', "_")
}

fn get_tests_directory_path(directory: &str) -> String {
    let mut resource_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")); // Only set when using `cargo ...`
    resource_path.push("tests/");
    resource_path.push(directory);
    resource_path.into_os_string().into_string().expect("Invalid path")
}
