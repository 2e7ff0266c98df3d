use super::{Evaluator, TestError};
use crate::ast::UnaryOperator;
use crate::host::{Access, HostContext, ShellOption};
use crate::mode::FileMode;
use crate::numeric::atoi;

impl<'h, H: HostContext + ?Sized> Evaluator<'h, H> {
    /// Apply a unary operator to an expanded operand.
    ///
    /// `-G`, `-O` and `-N` are recognized but not implemented; they are
    /// reported through the host's fatal channel and abort the evaluation.
    pub fn unary_test(&mut self, op: UnaryOperator, x: &str) -> Result<bool, TestError> {
        tracing::debug!(%op, x, "unary test");
        let result = match op {
            UnaryOperator::Exists => self.stat(x).is_some(),
            UnaryOperator::RegularFile => self.stat_mode(x, FileMode::is_regular),
            UnaryOperator::Directory => self.stat_mode(x, FileMode::is_dir),
            UnaryOperator::CharDevice => self.stat_mode(x, FileMode::is_char_device),
            UnaryOperator::BlockDevice => self.stat_mode(x, FileMode::is_block_device),
            UnaryOperator::NamedPipe => self.stat_mode(x, FileMode::is_fifo),
            UnaryOperator::Socket => self.stat_mode(x, FileMode::is_socket),
            UnaryOperator::Symlink => {
                let path = self.host.resolve_path(x);
                self.host
                    .lstat(&path)
                    .map(|info| info.mode.is_symlink())
                    .unwrap_or(false)
            }
            UnaryOperator::Sticky => self.stat_mode(x, FileMode::is_sticky),
            UnaryOperator::SetUid => self.stat_mode(x, FileMode::is_setuid),
            UnaryOperator::SetGid => self.stat_mode(x, FileMode::is_setgid),
            UnaryOperator::Readable => self.can_open(x, Access::ReadOnly),
            UnaryOperator::Writable => self.can_open(x, Access::WriteOnly),
            UnaryOperator::Executable => {
                let path = self.host.resolve_path(x);
                self.host.look_path(&path).is_some()
            }
            UnaryOperator::NonEmptyFile => self.stat(x).map(|info| info.len > 0).unwrap_or(false),
            UnaryOperator::TerminalFd => self.host.is_terminal(atoi(x)),
            UnaryOperator::EmptyString => x.is_empty(),
            UnaryOperator::NonEmptyString => !x.is_empty(),
            UnaryOperator::OptionSet => ShellOption::from_name(x)
                .map(|opt| self.host.option_enabled(opt))
                .unwrap_or(false),
            UnaryOperator::VariableSet => self.host.lookup_var(x).is_some(),
            UnaryOperator::IsNameref => self
                .host
                .lookup_var(x)
                .map(|var| var.is_nameref())
                .unwrap_or(false),
            UnaryOperator::LogicalNot => x.is_empty(),
            UnaryOperator::GroupOwner
            | UnaryOperator::UserOwner
            | UnaryOperator::ModifiedSinceRead => {
                let err = TestError::UnsupportedUnary(op);
                self.host.report_fatal(&err);
                return Err(err);
            }
        };
        Ok(result)
    }

    fn stat_mode(&self, x: &str, pred: fn(FileMode) -> bool) -> bool {
        self.stat(x).map(|info| pred(info.mode)).unwrap_or(false)
    }

    /// Open and immediately release; success is all that counts
    fn can_open(&mut self, x: &str, access: Access) -> bool {
        let path = self.host.resolve_path(x);
        match self.host.open_probe(&path, access) {
            Ok(handle) => {
                drop(handle);
                true
            }
            Err(_) => false,
        }
    }
}
