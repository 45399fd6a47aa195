//! Per-call parameter environment.
//!
//! # Responsibility
//! - Hold the ordered name → value mapping for exactly one call.
//!
//! # Invariants
//! - Built fresh per invocation and discarded after the call returns or
//!   fails; never shared across calls or threads.
//! - Names are unique within one call; a repeated insert replaces the
//!   previous value instead of shadowing it.

use crate::model::value::Value;

/// Ordered mapping from declared parameter name to call argument.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamEnv {
    entries: Vec<(String, Value)>,
}

impl ParamEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces one named argument.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        match self.entries.iter_mut().find(|(entry, _)| *entry == name) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Returns one argument by declared parameter name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(entry, _)| entry == name)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, Value)> for ParamEnv {
    fn from_iter<I: IntoIterator<Item = (S, Value)>>(iter: I) -> Self {
        let mut env = Self::new();
        for (name, value) in iter {
            env.insert(name, value);
        }
        env
    }
}
