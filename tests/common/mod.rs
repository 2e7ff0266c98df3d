//! Common test utilities for shcond integration tests

use std::path::Path;

pub use shcond::{
    evaluate, BinaryOperator, HostConfig, HostContext, MemoryHost, OsHost, TestExpr,
    UnaryOperator, Word,
};

/// Host rooted at `dir`, with an empty variable table
#[allow(dead_code)]
pub fn os_host(dir: &Path) -> OsHost {
    OsHost::from_config(HostConfig {
        dir: dir.to_path_buf(),
        ..HostConfig::default()
    })
}

#[allow(dead_code)]
pub fn unary(op: UnaryOperator, x: &str) -> TestExpr {
    TestExpr::unary(op, TestExpr::lit(x))
}

#[allow(dead_code)]
pub fn binary(op: BinaryOperator, x: &str, y: &str) -> TestExpr {
    TestExpr::binary(op, TestExpr::lit(x), TestExpr::lit(y))
}

/// Evaluate and return the truth string, panicking on a fatal error
#[allow(dead_code)]
pub fn eval<H: HostContext>(host: &mut H, expr: &TestExpr) -> String {
    evaluate(host, expr).expect("evaluation aborted")
}
