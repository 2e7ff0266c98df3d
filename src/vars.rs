//! Shell variable table
//!
//! Holds the bindings that `-v`, `-R` and parameter expansion look at:
//! - plain scalars (`x=1`)
//! - indexed and associative arrays
//! - namerefs (`declare -n ref=target`)

use std::collections::{BTreeMap, HashMap};

/// Maximum nameref hops before a chain is treated as unbound
pub const MAX_NAMEREF_DEPTH: usize = 8;

/// A variable binding
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Variable {
    Scalar(String),
    Indexed(Vec<String>),
    Associative(BTreeMap<String, String>),
    /// Alias for another variable, by name
    NameRef(String),
}

impl Variable {
    pub fn is_nameref(&self) -> bool {
        matches!(self, Variable::NameRef(_))
    }
}

/// Name to binding map with nameref-aware reads
#[derive(Debug, Clone, Default)]
pub struct Variables {
    table: HashMap<String, Variable>,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw binding for `name`, without following namerefs
    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.table.get(name)
    }

    pub fn set(&mut self, name: impl Into<String>, var: Variable) {
        self.table.insert(name.into(), var);
    }

    pub fn set_scalar(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.set(name, Variable::Scalar(value.into()));
    }

    pub fn declare_nameref(&mut self, name: impl Into<String>, target: impl Into<String>) {
        self.set(name, Variable::NameRef(target.into()));
    }

    pub fn unset(&mut self, name: &str) -> Option<Variable> {
        self.table.remove(name)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Variables {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut vars = Variables::new();
        for (k, v) in iter {
            vars.set_scalar(k, v);
        }
        vars
    }
}

/// Follow namerefs from `name` and return the value it has in a scalar
/// context. Arrays yield their element 0; unbound names and cycles yield
/// `None`.
pub fn scalar_value<'a, F>(name: &str, lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<&'a Variable>,
{
    let mut current = name.to_string();
    for _ in 0..=MAX_NAMEREF_DEPTH {
        match lookup(&current)? {
            Variable::Scalar(s) => return Some(s.clone()),
            Variable::Indexed(items) => return Some(items.first().cloned().unwrap_or_default()),
            Variable::Associative(map) => return Some(map.get("0").cloned().unwrap_or_default()),
            Variable::NameRef(target) => current = target.clone(),
        }
    }
    None
}
