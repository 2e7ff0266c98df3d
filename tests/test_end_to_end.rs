//! End-to-end evaluation of whole conditional expressions

#[path = "common/mod.rs"]
mod common;
use common::*;

use shcond::{Evaluator, TestError, WordPart};
use std::fs;

/// -f PATH && 3 -lt 5
fn file_and_compare(path: &str) -> TestExpr {
    TestExpr::binary(
        BinaryOperator::LogicalAnd,
        unary(UnaryOperator::RegularFile, path),
        binary(BinaryOperator::NumLt, "3", "5"),
    )
}

#[test]
fn test_file_and_numeric_in_memory() {
    let mut host = MemoryHost::new();
    host.add_dir("/tmp").add_file("/tmp/x", "");
    assert_eq!(eval(&mut host, &file_and_compare("/tmp/x")), "1");

    host.remove("/tmp/x");
    assert_eq!(eval(&mut host, &file_and_compare("/tmp/x")), "");
}

#[test]
fn test_file_and_numeric_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let x = dir.path().join("x");
    let mut host = os_host(dir.path());

    fs::write(&x, "").unwrap();
    assert_eq!(eval(&mut host, &file_and_compare(x.to_str().unwrap())), "1");

    fs::remove_file(&x).unwrap();
    assert_eq!(eval(&mut host, &file_and_compare(x.to_str().unwrap())), "");
}

#[test]
fn test_quoted_string_against_glob() {
    let mut host = MemoryHost::new();
    let matches = |host: &mut MemoryHost, pattern: &str| {
        let expr = TestExpr::binary(
            BinaryOperator::GlobMatch,
            TestExpr::word(Word::new(vec![WordPart::DoubleQuoted(vec![WordPart::Literal(
                "abc".into(),
            )])])),
            TestExpr::lit(pattern),
        );
        eval(host, &expr)
    };
    assert_eq!(matches(&mut host, "a?c"), "1");
    assert_eq!(matches(&mut host, "a?d"), "");
}

#[test]
fn test_regex_error_sets_status_in_os_host() {
    let mut host = os_host(std::path::Path::new("/"));
    let expr = binary(BinaryOperator::RegexMatch, "abc", "[unterminated");
    let status = Evaluator::new(&mut host).run_test_clause(&expr).unwrap();
    assert_eq!(status, 2);
    assert_eq!(host.exit_status(), 2);
}

#[test]
fn test_variable_set_then_bound_empty() {
    let mut host = os_host(std::path::Path::new("/"));
    let expr = unary(UnaryOperator::VariableSet, "FRESH_VAR");
    assert_eq!(eval(&mut host, &expr), "");
    host.vars_mut().set_scalar("FRESH_VAR", "");
    assert_eq!(eval(&mut host, &expr), "1");
}

#[test]
fn test_errexit_option_follows_host() {
    let mut host = os_host(std::path::Path::new("/"));
    let expr = unary(UnaryOperator::OptionSet, "errexit");
    assert_eq!(eval(&mut host, &expr), "");
    host.set_errexit(true);
    assert_eq!(eval(&mut host, &expr), "1");
}

#[test]
fn test_unsupported_operator_reaches_fatal_channel() {
    let mut host = os_host(std::path::Path::new("/"));
    let err = evaluate(&mut host, &unary(UnaryOperator::ModifiedSinceRead, "/")).unwrap_err();
    assert_eq!(err, TestError::UnsupportedUnary(UnaryOperator::ModifiedSinceRead));
    assert_eq!(host.fatal(), Some(&err));
}

#[test]
fn test_config_file_drives_host() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("marker"), "").unwrap();
    let config = HostConfig::from_toml_str(&format!(
        "dir = {:?}\nerrexit = true\n[variables]\nTARGET = \"marker\"\n",
        dir.path().to_str().unwrap()
    ))
    .unwrap();
    let mut host = OsHost::from_config(config);

    let expr = TestExpr::binary(
        BinaryOperator::LogicalAnd,
        TestExpr::unary(UnaryOperator::RegularFile, TestExpr::word(Word::param("TARGET"))),
        unary(UnaryOperator::OptionSet, "errexit"),
    );
    assert_eq!(eval(&mut host, &expr), "1");
}
