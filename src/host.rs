//! Host interface for the conditional evaluator
//!
//! Everything a test operator needs from the surrounding interpreter goes
//! through [`HostContext`]: the filesystem as seen from the shell's working
//! directory, the variable table, the exit status and the fatal-error
//! channel. [`OsHost`](crate::OsHost) talks to the real system and
//! [`MemoryHost`](crate::MemoryHost) keeps everything in memory.

use std::io;
use std::path::{Path, PathBuf};

use crate::ast::Word;
use crate::eval::TestError;
use crate::mode::FileInfo;
use crate::vars::Variable;
use crate::word;

/// How a readability/writability probe opens the file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    ReadOnly,
    WriteOnly,
}

/// Shell options that `-o` can query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellOption {
    /// `set -e`: stop when a command fails
    ErrExit,
}

impl ShellOption {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "errexit" => Some(ShellOption::ErrExit),
            _ => None,
        }
    }
}

/// Capabilities the evaluator borrows from the interpreter
pub trait HostContext {
    /// Handle returned by [`open_probe`](Self::open_probe); dropping it
    /// releases the file.
    type Probe;

    /// Resolve `path` against the shell's working directory. Absolute paths
    /// and the empty string are returned unchanged.
    fn resolve_path(&self, path: &str) -> PathBuf;

    /// Metadata, following symlinks
    fn stat(&self, path: &Path) -> io::Result<FileInfo>;

    /// Metadata of the link itself
    fn lstat(&self, path: &Path) -> io::Result<FileInfo>;

    /// Open `path` with the given access, subject to permission checks
    fn open_probe(&mut self, path: &Path, access: Access) -> io::Result<Self::Probe>;

    /// Command lookup; `Some` with the resolved file when it is runnable
    fn look_path(&mut self, path: &Path) -> Option<PathBuf>;

    /// Whether the descriptor is attached to a terminal
    fn is_terminal(&self, fd: i64) -> bool;

    /// Raw binding for `name`, namerefs not followed
    fn lookup_var(&self, name: &str) -> Option<&Variable>;

    /// The `errexit` flag
    fn stop_on_error(&self) -> bool;

    fn exit_status(&self) -> i32;

    fn set_exit_status(&mut self, status: i32);

    /// Report a defect that aborts the current evaluation
    fn report_fatal(&mut self, err: &TestError);

    fn option_enabled(&self, option: ShellOption) -> bool {
        match option {
            ShellOption::ErrExit => self.stop_on_error(),
        }
    }

    fn expand_word(&self, w: &Word) -> String {
        word::expand_word(w, |name| self.lookup_var(name))
    }

    fn expand_pattern(&self, w: &Word) -> String {
        word::expand_pattern(w, |name| self.lookup_var(name))
    }
}

/// Join a relative path onto `dir`. The empty string stays empty so that it
/// never names the working directory itself: `-e ""` is false as in bash,
/// where a plain `dir.join("")` would make it true.
pub fn join_relative(dir: &Path, path: &str) -> PathBuf {
    let p = Path::new(path);
    if path.is_empty() || p.is_absolute() {
        p.to_path_buf()
    } else {
        dir.join(p)
    }
}
