//! AST for conditional expressions
//!
//! The tree is produced by the host's parser for both `[[ ... ]]` clauses and
//! the `test` / `[` argument form. The evaluator only ever borrows it.

use std::fmt;

/// One piece of an unexpanded shell word
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordPart {
    /// Unquoted literal text
    Literal(String),
    /// Text inside '...'
    SingleQuoted(String),
    /// Parts inside "..."
    DoubleQuoted(Vec<WordPart>),
    /// A parameter reference ($VAR or ${VAR})
    Param(String),
}

/// An unexpanded shell word, as handed over by the parser
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Word {
    pub parts: Vec<WordPart>,
}

impl Word {
    pub fn new(parts: Vec<WordPart>) -> Self {
        Word { parts }
    }

    /// A word made of a single unquoted literal
    pub fn literal(text: impl Into<String>) -> Self {
        Word::new(vec![WordPart::Literal(text.into())])
    }

    /// A word made of a single '...' part
    pub fn quoted(text: impl Into<String>) -> Self {
        Word::new(vec![WordPart::SingleQuoted(text.into())])
    }

    /// A word made of a single $NAME reference
    pub fn param(name: impl Into<String>) -> Self {
        Word::new(vec![WordPart::Param(name.into())])
    }
}

/// A conditional expression tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestExpr {
    /// A lone word; its expansion is the value
    Word(Word),
    /// ( expr ) - grouping only
    Paren(Box<TestExpr>),
    /// x OP y
    Binary {
        op: BinaryOperator,
        left: Box<TestExpr>,
        right: Box<TestExpr>,
    },
    /// OP x
    Unary {
        op: UnaryOperator,
        operand: Box<TestExpr>,
    },
}

impl TestExpr {
    pub fn word(word: Word) -> Self {
        TestExpr::Word(word)
    }

    /// Shorthand for a lone unquoted literal word
    pub fn lit(text: impl Into<String>) -> Self {
        TestExpr::Word(Word::literal(text))
    }

    pub fn paren(inner: TestExpr) -> Self {
        TestExpr::Paren(Box::new(inner))
    }

    pub fn binary(op: BinaryOperator, left: TestExpr, right: TestExpr) -> Self {
        TestExpr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn unary(op: UnaryOperator, operand: TestExpr) -> Self {
        TestExpr::Unary {
            op,
            operand: Box::new(operand),
        }
    }
}

/// Binary test operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    RegexMatch,  // =~
    GlobMatch,   // == (also =)
    GlobNoMatch, // !=
    Newer,       // -nt
    Older,       // -ot
    SameFile,    // -ef
    NumEq,       // -eq
    NumNe,       // -ne
    NumLe,       // -le
    NumGe,       // -ge
    NumLt,       // -lt
    NumGt,       // -gt
    LogicalAnd,  // &&
    LogicalOr,   // ||
    LexBefore,   // <
    LexAfter,    // >
}

impl BinaryOperator {
    /// Map a shell token to its operator. `=` and `-a`/`-o` are accepted as
    /// the `test` spellings of `==`, `&&` and `||`.
    pub fn from_token(token: &str) -> Option<Self> {
        let op = match token {
            "=~" => BinaryOperator::RegexMatch,
            "==" | "=" => BinaryOperator::GlobMatch,
            "!=" => BinaryOperator::GlobNoMatch,
            "-nt" => BinaryOperator::Newer,
            "-ot" => BinaryOperator::Older,
            "-ef" => BinaryOperator::SameFile,
            "-eq" => BinaryOperator::NumEq,
            "-ne" => BinaryOperator::NumNe,
            "-le" => BinaryOperator::NumLe,
            "-ge" => BinaryOperator::NumGe,
            "-lt" => BinaryOperator::NumLt,
            "-gt" => BinaryOperator::NumGt,
            "&&" | "-a" => BinaryOperator::LogicalAnd,
            "||" | "-o" => BinaryOperator::LogicalOr,
            "<" => BinaryOperator::LexBefore,
            ">" => BinaryOperator::LexAfter,
            _ => return None,
        };
        Some(op)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOperator::RegexMatch => "=~",
            BinaryOperator::GlobMatch => "==",
            BinaryOperator::GlobNoMatch => "!=",
            BinaryOperator::Newer => "-nt",
            BinaryOperator::Older => "-ot",
            BinaryOperator::SameFile => "-ef",
            BinaryOperator::NumEq => "-eq",
            BinaryOperator::NumNe => "-ne",
            BinaryOperator::NumLe => "-le",
            BinaryOperator::NumGe => "-ge",
            BinaryOperator::NumLt => "-lt",
            BinaryOperator::NumGt => "-gt",
            BinaryOperator::LogicalAnd => "&&",
            BinaryOperator::LogicalOr => "||",
            BinaryOperator::LexBefore => "<",
            BinaryOperator::LexAfter => ">",
        }
    }

    /// Operators whose right side is a pattern rather than a sub-expression
    pub fn is_glob(self) -> bool {
        matches!(self, BinaryOperator::GlobMatch | BinaryOperator::GlobNoMatch)
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unary test operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    Exists,            // -e (also -a)
    RegularFile,       // -f
    Directory,         // -d
    CharDevice,        // -c
    BlockDevice,       // -b
    NamedPipe,         // -p
    Socket,            // -S
    Symlink,           // -L (also -h)
    Sticky,            // -k
    SetUid,            // -u
    SetGid,            // -g
    GroupOwner,        // -G
    UserOwner,         // -O
    ModifiedSinceRead, // -N
    Readable,          // -r
    Writable,          // -w
    Executable,        // -x
    NonEmptyFile,      // -s
    TerminalFd,        // -t
    EmptyString,       // -z
    NonEmptyString,    // -n
    OptionSet,         // -o
    VariableSet,       // -v
    IsNameref,         // -R
    LogicalNot,        // !
}

impl UnaryOperator {
    pub fn from_token(token: &str) -> Option<Self> {
        let op = match token {
            "-e" | "-a" => UnaryOperator::Exists,
            "-f" => UnaryOperator::RegularFile,
            "-d" => UnaryOperator::Directory,
            "-c" => UnaryOperator::CharDevice,
            "-b" => UnaryOperator::BlockDevice,
            "-p" => UnaryOperator::NamedPipe,
            "-S" => UnaryOperator::Socket,
            "-L" | "-h" => UnaryOperator::Symlink,
            "-k" => UnaryOperator::Sticky,
            "-u" => UnaryOperator::SetUid,
            "-g" => UnaryOperator::SetGid,
            "-G" => UnaryOperator::GroupOwner,
            "-O" => UnaryOperator::UserOwner,
            "-N" => UnaryOperator::ModifiedSinceRead,
            "-r" => UnaryOperator::Readable,
            "-w" => UnaryOperator::Writable,
            "-x" => UnaryOperator::Executable,
            "-s" => UnaryOperator::NonEmptyFile,
            "-t" => UnaryOperator::TerminalFd,
            "-z" => UnaryOperator::EmptyString,
            "-n" => UnaryOperator::NonEmptyString,
            "-o" => UnaryOperator::OptionSet,
            "-v" => UnaryOperator::VariableSet,
            "-R" => UnaryOperator::IsNameref,
            "!" => UnaryOperator::LogicalNot,
            _ => return None,
        };
        Some(op)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            UnaryOperator::Exists => "-e",
            UnaryOperator::RegularFile => "-f",
            UnaryOperator::Directory => "-d",
            UnaryOperator::CharDevice => "-c",
            UnaryOperator::BlockDevice => "-b",
            UnaryOperator::NamedPipe => "-p",
            UnaryOperator::Socket => "-S",
            UnaryOperator::Symlink => "-L",
            UnaryOperator::Sticky => "-k",
            UnaryOperator::SetUid => "-u",
            UnaryOperator::SetGid => "-g",
            UnaryOperator::GroupOwner => "-G",
            UnaryOperator::UserOwner => "-O",
            UnaryOperator::ModifiedSinceRead => "-N",
            UnaryOperator::Readable => "-r",
            UnaryOperator::Writable => "-w",
            UnaryOperator::Executable => "-x",
            UnaryOperator::NonEmptyFile => "-s",
            UnaryOperator::TerminalFd => "-t",
            UnaryOperator::EmptyString => "-z",
            UnaryOperator::NonEmptyString => "-n",
            UnaryOperator::OptionSet => "-o",
            UnaryOperator::VariableSet => "-v",
            UnaryOperator::IsNameref => "-R",
            UnaryOperator::LogicalNot => "!",
        }
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
