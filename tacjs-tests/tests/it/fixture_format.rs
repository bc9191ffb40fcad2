// Copyright 2025 Neil Henderson, Blue Tarp Media.

//! Tests of the JSON fixture format itself.

use indoc::indoc;

use libtacjs::TypeTag;
use libtacjs::ast::{AstBinaryOp, AstExpression as Expr, AstParameter, AstRoot, AstStatement as Stmt};
use tacjs_tests::Fixture;

#[test]
fn fixture_json_matches_tree() {
    let fixture = Fixture::from_json(indoc! {r#"
        {
            "globals": [{ "name": "limit", "type": "Int" }],
            "host_functions": [{ "name": "print", "params": ["String"], "return_type": "Void" }],
            "program": [
                {
                    "Function": {
                        "name": "add",
                        "return_type": "Int",
                        "params": [{ "name": "a", "param_type": "Int" }, { "name": "b", "param_type": "Int" }],
                        "body": [
                            {
                                "Return": {
                                    "Binary": {
                                        "op": "Add",
                                        "left": { "Identifier": "a" },
                                        "right": { "Identifier": "b" }
                                    }
                                }
                            }
                        ]
                    }
                },
                { "Declaration": { "name": "x", "declared_type": "Int" } },
                {
                    "If": {
                        "condition": { "Literal": { "Bool": true } },
                        "then_stmt": { "Expression": { "Call": { "name": "print", "args": [{ "Literal": { "String": "hi" } }] } } }
                    }
                }
            ]
        }
    "#});

    let expected = AstRoot(vec![
        Stmt::function(
            "add",
            TypeTag::Int,
            vec![AstParameter::new("a", TypeTag::Int), AstParameter::new("b", TypeTag::Int)],
            vec![Stmt::ret(Some(Expr::binary(AstBinaryOp::Add, Expr::ident("a"), Expr::ident("b"))))],
        ),
        Stmt::declare("x", TypeTag::Int, None),
        Stmt::if_else(Expr::bool(true), Stmt::expr(Expr::call("print", vec![Expr::string("hi")])), None),
    ]);

    assert_eq!(fixture.program, expected);
    assert!(!fixture.prescan);
    assert_eq!(fixture.expected_errors, None);

    let scope = fixture.global_scope();
    assert_eq!(scope.lookup_local("limit").map(|symbol| symbol.symbol_type), Some(TypeTag::Int));

    let options = fixture.driver_options();
    assert_eq!(options.host_functions.len(), 1);
    assert_eq!(options.host_functions[0].param_types, vec![TypeTag::String]);
}

#[test]
fn fixture_runs_through_driver() {
    let fixture = Fixture::from_json(indoc! {r#"
        {
            "program": [
                { "Declaration": { "name": "x", "declared_type": "Float", "init": { "Literal": { "Int": 2 } } } }
            ]
        }
    "#});

    let (driver, result) = fixture.run(fixture.driver_options());

    assert_eq!(driver.error_count(), 0);
    let js = match result {
        Ok(libtacjs::compiler_driver::DriverOutput::JavaScript(js)) => js,
        other => panic!("Expected JavaScript output, got {other:?}"),
    };
    assert!(js.contains("let t0 = 2;\n    let x = Number(t0);\n"), "{js}");
}

#[test]
fn host_prelude_defines_globals_and_functions() {
    let fixture = Fixture::from_json(indoc! {r#"
        {
            "globals": [
                { "name": "limit", "type": "Int", "value": 5 },
                { "name": "label", "type": "String", "value": "a\"b" },
                { "name": "unset", "type": "Bool" }
            ],
            "host_functions": [
                { "name": "show", "params": ["Int"], "return_type": "Void", "js": "function show(v) { console.log(v); }" },
                { "name": "print", "params": ["String"], "return_type": "Void" }
            ],
            "expected_output": "5\n",
            "program": []
        }
    "#});

    assert_eq!(fixture.expected_output.as_deref(), Some("5\n"));
    assert_eq!(
        fixture.host_prelude(),
        "let limit = 5;\nlet label = \"a\\\"b\";\nfunction show(v) { console.log(v); }\n"
    );
}
