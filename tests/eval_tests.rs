//! End-to-end evaluation guards over the built-in Boa evaluator.

#![cfg(feature = "builtin-eval-js")]

use serde_json::json;

use xguard::{
    check_syntax, debug_code, handle_range_error, handle_type_error, safe_eval, BoaEvaluator,
    BoaEvaluatorConfig, ExpressionEvaluator, FailureKind,
};

fn boa() -> BoaEvaluator {
    BoaEvaluator::new(BoaEvaluatorConfig::default())
}

// ---- check_syntax ----

#[test]
fn test_check_syntax_valid_function() {
    assert_eq!(
        check_syntax(&boa(), "function test() { console.log('Hello'); }"),
        "No syntax errors found."
    );
}

#[test]
fn test_check_syntax_reports_syntax_error() {
    let report = check_syntax(&boa(), "function test( { return 1; }");
    assert!(report.starts_with("Syntax Error: "), "got: {report}");
}

#[test]
fn test_check_syntax_reports_runtime_failure_as_other() {
    let report = check_syntax(&boa(), "notDefinedAnywhere()");
    assert!(report.starts_with("Other error: "), "got: {report}");
    assert!(report.contains("notDefinedAnywhere"));
}

// ---- safe_eval ----

#[test]
fn test_safe_eval_returns_value() {
    assert_eq!(safe_eval(&boa(), "[1, 2].map(x => x * 2)"), Some(json!([2, 4])));
}

#[test]
fn test_safe_eval_swallows_every_kind() {
    let evaluator = boa();
    assert_eq!(safe_eval(&evaluator, "let = ;"), None);
    assert_eq!(safe_eval(&evaluator, "null.foo"), None);
    assert_eq!(safe_eval(&evaluator, "missing + 1"), None);
    assert_eq!(safe_eval(&evaluator, "throw 'plain'"), None);
}

// ---- debug_code ----

#[test]
fn test_debug_code_success() {
    assert_eq!(
        debug_code(&boa(), "({ total: 3 + 4 })"),
        Some(json!({ "total": 7 }))
    );
}

#[test]
fn test_debug_code_failure_yields_none() {
    assert_eq!(debug_code(&boa(), "throw new RangeError('too far')"), None);
}

#[test]
fn test_debug_code_releases_span_between_calls() {
    let evaluator = boa();
    assert_eq!(debug_code(&evaluator, "undefinedThing"), None);
    assert_eq!(debug_code(&evaluator, "1 + 1"), Some(json!(2)));
}

// ---- call guards around script evaluation ----

#[test]
fn test_type_guard_absorbs_script_type_error() {
    let evaluator = boa();
    let outcome = handle_type_error(|| evaluator.evaluate("null.foo")).unwrap();
    assert_eq!(outcome, None);
}

#[test]
fn test_type_guard_resignals_range_error() {
    let evaluator = boa();
    let failure = handle_type_error(|| evaluator.evaluate("new Array(-1)")).unwrap_err();
    assert_eq!(failure.kind, FailureKind::Range);
}

#[test]
fn test_range_guard_absorbs_script_range_error() {
    let evaluator = boa();
    let outcome = handle_range_error(|| evaluator.evaluate("new Array(-1)")).unwrap();
    assert_eq!(outcome, None);
}

#[test]
fn test_range_guard_passes_success_through() {
    let evaluator = boa();
    let outcome = handle_range_error(|| evaluator.evaluate("'ok'")).unwrap();
    assert_eq!(outcome, Some(json!("ok")));
}
