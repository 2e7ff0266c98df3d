use super::Evaluator;
use crate::ast::BinaryOperator;
use crate::host::HostContext;
use crate::mode::FileInfo;
use crate::numeric::atoi;
use regex::Regex;

impl<'h, H: HostContext + ?Sized> Evaluator<'h, H> {
    /// Apply a binary operator to two expanded operands.
    ///
    /// `==` and `!=` are normally handled by the tree walk. If one reaches
    /// this point it falls through to the `>` comparison, as unknown
    /// operators always have.
    pub fn binary_test(&mut self, op: BinaryOperator, x: &str, y: &str) -> bool {
        tracing::debug!(%op, x, y, "binary test");
        match op {
            BinaryOperator::RegexMatch => match Regex::new(y) {
                Ok(re) => re.is_match(x),
                Err(e) => {
                    tracing::warn!(pattern = y, error = %e, "invalid regex in =~");
                    self.host.set_exit_status(2);
                    false
                }
            },
            BinaryOperator::Newer => match self.stat_pair(x, y) {
                Some((a, b)) => a.modified > b.modified,
                None => false,
            },
            BinaryOperator::Older => match self.stat_pair(x, y) {
                Some((a, b)) => a.modified < b.modified,
                None => false,
            },
            BinaryOperator::SameFile => match self.stat_pair(x, y) {
                Some((a, b)) => a.same_file(&b),
                None => false,
            },
            BinaryOperator::NumEq => atoi(x) == atoi(y),
            BinaryOperator::NumNe => atoi(x) != atoi(y),
            BinaryOperator::NumLe => atoi(x) <= atoi(y),
            BinaryOperator::NumGe => atoi(x) >= atoi(y),
            BinaryOperator::NumLt => atoi(x) < atoi(y),
            BinaryOperator::NumGt => atoi(x) > atoi(y),
            BinaryOperator::LogicalAnd => !x.is_empty() && !y.is_empty(),
            BinaryOperator::LogicalOr => !x.is_empty() || !y.is_empty(),
            BinaryOperator::LexBefore => x.as_bytes() < y.as_bytes(),
            BinaryOperator::LexAfter
            | BinaryOperator::GlobMatch
            | BinaryOperator::GlobNoMatch => x.as_bytes() > y.as_bytes(),
        }
    }

    /// Dereferencing probe of both operands; `None` if either is missing
    fn stat_pair(&self, x: &str, y: &str) -> Option<(FileInfo, FileInfo)> {
        let (a, b) = (self.stat(x), self.stat(y));
        Some((a?, b?))
    }

    pub(crate) fn stat(&self, name: &str) -> Option<FileInfo> {
        self.host.stat(&self.host.resolve_path(name)).ok()
    }
}
