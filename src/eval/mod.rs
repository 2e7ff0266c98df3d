//! Evaluator for conditional expressions
//!
//! Reduces a [`TestExpr`] to a truth string: `""` is false, `"1"` is true.
//! Evaluation is split three ways:
//!
//! 1. **The tree walk here**: words expand, parens recurse, `==`/`!=` take
//!    a pattern on the right, everything else evaluates both sides first.
//! 2. **`binary.rs`**: operators over two already-expanded strings.
//! 3. **`unary.rs`**: operators over one string, mostly filesystem probes.
//!
//! `&&` and `||` are not short-circuiting at this layer: both operands are
//! always evaluated before they are combined.

mod binary;
mod unary;

use crate::ast::{BinaryOperator, TestExpr, UnaryOperator};
use crate::host::HostContext;
use crate::pattern::glob_match;
use thiserror::Error;

/// The true truth string
pub const TRUE: &str = "1";
/// The false truth string
pub const FALSE: &str = "";

/// Canonical truth string for a boolean
pub fn truth(b: bool) -> String {
    let s = if b { TRUE } else { FALSE };
    s.to_string()
}

/// Exit status of `test` / `[` for an evaluated truth string
pub fn exit_status_for(value: &str) -> i32 {
    if value.is_empty() { 1 } else { 0 }
}

/// Defects in the tree handed to the evaluator. Each aborts the evaluation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TestError {
    #[error("unhandled unary test op: {0}")]
    UnsupportedUnary(UnaryOperator),
    #[error("left operand of {0} must be a word")]
    NonWordOperand(BinaryOperator),
}

/// Walks a test expression against a borrowed host
pub struct Evaluator<'h, H: HostContext + ?Sized> {
    pub(crate) host: &'h mut H,
}

impl<'h, H: HostContext + ?Sized> Evaluator<'h, H> {
    pub fn new(host: &'h mut H) -> Self {
        Evaluator { host }
    }

    /// Evaluate `expr` to its truth string
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn evaluate(&mut self, expr: &TestExpr) -> Result<String, TestError> {
        self.eval_expr(expr)
    }

    /// Run a `[[ ... ]]` clause: the exit status becomes 0 when the
    /// expression holds and 1 when it does not, unless evaluation already
    /// signaled a failure (an invalid regex leaves 2 in place).
    pub fn run_test_clause(&mut self, expr: &TestExpr) -> Result<i32, TestError> {
        self.host.set_exit_status(0);
        let value = self.evaluate(expr)?;
        if value.is_empty() && self.host.exit_status() == 0 {
            self.host.set_exit_status(1);
        }
        Ok(self.host.exit_status())
    }

    fn eval_expr(&mut self, expr: &TestExpr) -> Result<String, TestError> {
        match expr {
            TestExpr::Word(word) => Ok(self.host.expand_word(word)),
            TestExpr::Paren(inner) => self.eval_expr(inner),
            TestExpr::Binary { op, left, right } if op.is_glob() => {
                self.glob_test(*op, left, right)
            }
            TestExpr::Binary { op, left, right } => {
                let x = self.eval_expr(left)?;
                let y = self.eval_expr(right)?;
                Ok(truth(self.binary_test(*op, &x, &y)))
            }
            TestExpr::Unary { op, operand } => {
                let x = self.eval_expr(operand)?;
                Ok(truth(self.unary_test(*op, &x)?))
            }
        }
    }

    /// `==` / `!=`: the left side is expanded as a plain word, the right as a
    /// pattern. Neither is evaluated as a sub-expression.
    fn glob_test(
        &mut self,
        op: BinaryOperator,
        left: &TestExpr,
        right: &TestExpr,
    ) -> Result<String, TestError> {
        let (TestExpr::Word(lw), TestExpr::Word(rw)) = (left, right) else {
            let err = TestError::NonWordOperand(op);
            self.host.report_fatal(&err);
            return Err(err);
        };
        let text = self.host.expand_word(lw);
        let pat = self.host.expand_pattern(rw);
        let matched = glob_match(&pat, &text);
        tracing::debug!(%op, text = %text, pattern = %pat, matched, "glob test");
        Ok(truth(matched == (op == BinaryOperator::GlobMatch)))
    }
}

/// Evaluate `expr` against `host` in one call
pub fn evaluate<H: HostContext + ?Sized>(host: &mut H, expr: &TestExpr) -> Result<String, TestError> {
    Evaluator::new(host).evaluate(expr)
}
