//! Default word expansion for test operands
//!
//! Only the subset a conditional needs: literal text, quoted text and
//! parameter references. Hosts with a full expander override
//! [`HostContext::expand_word`](crate::host::HostContext::expand_word).

use crate::ast::{Word, WordPart};
use crate::pattern;
use crate::vars::{scalar_value, Variable};

/// Expand a word to the plain string it stands for. Unbound parameters
/// expand to nothing.
pub fn expand_word<'a, F>(word: &Word, lookup: F) -> String
where
    F: Fn(&str) -> Option<&'a Variable>,
{
    let mut out = String::new();
    push_parts(&mut out, &word.parts, &lookup, false, false);
    out
}

/// Expand a word used as the right side of `==` / `!=`. Quoted text is
/// escaped so it only matches itself; unquoted text and unquoted parameter
/// values keep their pattern meaning.
pub fn expand_pattern<'a, F>(word: &Word, lookup: F) -> String
where
    F: Fn(&str) -> Option<&'a Variable>,
{
    let mut out = String::new();
    push_parts(&mut out, &word.parts, &lookup, true, false);
    out
}

fn push_parts<'a, F>(out: &mut String, parts: &[WordPart], lookup: &F, pattern: bool, quoted: bool)
where
    F: Fn(&str) -> Option<&'a Variable>,
{
    for part in parts {
        match part {
            WordPart::Literal(text) => push_text(out, text, pattern && quoted),
            WordPart::SingleQuoted(text) => push_text(out, text, pattern),
            WordPart::DoubleQuoted(inner) => push_parts(out, inner, lookup, pattern, true),
            WordPart::Param(name) => {
                let value = scalar_value(name, lookup).unwrap_or_default();
                push_text(out, &value, pattern && quoted);
            }
        }
    }
}

fn push_text(out: &mut String, text: &str, escape: bool) {
    if escape {
        out.push_str(&pattern::escape(text));
    } else {
        out.push_str(text);
    }
}
