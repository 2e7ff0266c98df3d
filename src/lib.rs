//! shcond - conditional expressions for POSIX/bash-compatible shells
//!
//! # Overview
//!
//! shcond evaluates the expression trees behind `test`, `[ ... ]` and
//! `[[ ... ]]`. The host interpreter parses the expression and hands over a
//! [`TestExpr`] together with a [`HostContext`] giving access to its working
//! directory, variables and exit status. The result is a truth string:
//!
//! ```text
//! ""   false
//! "1"  true
//! ```
//!
//! # Core Concepts
//!
//! ## Operators
//!
//! ```text
//! # File predicates go through the host
//! -f path   -d path   -L path   -r path   -x path   -s path
//!
//! # Numbers compare as integers, garbage reads as 0
//! 3 -lt 5   abc -eq 0
//!
//! # == and != take a glob on the right, =~ a regex
//! file.txt == *.txt   abc =~ ^a
//!
//! # && and || see both operands, already evaluated
//! -f /tmp/x && 3 -lt 5
//! ```
//!
//! ## Failures
//!
//! Missing files and unparsable numbers are just false. An invalid regex is
//! false and sets exit status 2. Operators that are recognized but not
//! implemented (`-G`, `-O`, `-N`) are reported to the host as fatal and
//! abort the evaluation with a [`TestError`].
//!
//! # Example
//!
//! ```rust
//! use shcond::{evaluate, BinaryOperator, MemoryHost, TestExpr};
//!
//! let mut host = MemoryHost::new();
//! let expr = TestExpr::binary(BinaryOperator::GlobMatch, TestExpr::lit("abc"), TestExpr::lit("a?c"));
//! assert_eq!(evaluate(&mut host, &expr).unwrap(), "1");
//! ```

pub mod ast;
pub mod config;
pub mod eval;
pub mod host;
pub mod memory;
pub mod mode;
pub mod numeric;
pub mod os_host;
pub mod pattern;
pub mod resolver;
pub mod vars;
pub mod word;

// Re-export commonly used items
pub use ast::{BinaryOperator, TestExpr, UnaryOperator, Word, WordPart};
pub use config::{ConfigError, HostConfig};
pub use eval::{evaluate, exit_status_for, truth, Evaluator, TestError, FALSE, TRUE};
pub use host::{Access, HostContext, ShellOption};
pub use memory::MemoryHost;
pub use mode::{FileInfo, FileMode};
pub use numeric::atoi;
pub use os_host::OsHost;
pub use vars::{Variable, Variables};
