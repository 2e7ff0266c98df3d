//! Glob matching for `==` and `!=` inside `[[ ]]`

use glob::{MatchOptions, Pattern};

/// Shell matching: `*` and `?` cross `/`, leading dots are not special
const SHELL_MATCH: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// Where the rewrite pass is relative to a bracket class
#[derive(Clone, Copy, PartialEq)]
enum Scan {
    Outside,
    /// Just after the opening `[`
    ClassStart,
    /// Just after `[!`; a `]` here is still a member
    ClassNegated,
    InClass,
}

/// Compile a shell pattern.
///
/// Two rewrites happen first. Runs of `*` collapse to one, since the glob
/// crate only accepts `**` as a whole path component and the shell treats
/// `a**b` like `a*b`. A `^` opening a bracket class becomes `!`, the only
/// negation the glob crate knows.
pub fn compile(pattern: &str) -> Result<Pattern, glob::PatternError> {
    let mut rewritten = String::with_capacity(pattern.len());
    let mut scan = Scan::Outside;
    for c in pattern.chars() {
        scan = match (scan, c) {
            (Scan::Outside, '*') if rewritten.ends_with('*') => continue,
            (Scan::Outside, '[') => Scan::ClassStart,
            (Scan::Outside, _) => Scan::Outside,
            (Scan::ClassStart, '^' | '!') => {
                rewritten.push('!');
                scan = Scan::ClassNegated;
                continue;
            }
            (Scan::ClassStart | Scan::ClassNegated, _) => Scan::InClass,
            (Scan::InClass, ']') => Scan::Outside,
            (Scan::InClass, _) => Scan::InClass,
        };
        rewritten.push(c);
    }
    Pattern::new(&rewritten)
}

/// Whether `text` matches the whole of `pattern`. A pattern that does not
/// compile (such as an unclosed `[`) is compared literally.
pub fn glob_match(pattern: &str, text: &str) -> bool {
    match compile(pattern) {
        Ok(p) => p.matches_with(text, SHELL_MATCH),
        Err(e) => {
            tracing::debug!(pattern, error = %e, "pattern did not compile, comparing literally");
            pattern == text
        }
    }
}

/// Quote text so every character matches itself
pub fn escape(text: &str) -> String {
    Pattern::escape(text)
}
