// src/env.rs

use std::collections::HashMap;

use crate::error::{EvalError, ValidationError, ValidationReason};

/// Variable bindings identifiers are resolved against.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    vars: HashMap<String, i64>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an environment from ordered `(name, value)` text pairs, as
    /// entered in a variables form. The first bad pair is reported.
    pub fn from_pairs<N, V>(pairs: &[(N, V)]) -> Result<Self, ValidationError>
    where
        N: AsRef<str>,
        V: AsRef<str>,
    {
        let mut env = Environment::new();
        for (name, value) in pairs {
            let (name, value) = (name.as_ref().trim(), value.as_ref().trim());
            let invalid = |reason| ValidationError {
                name: name.to_string(),
                value: value.to_string(),
                reason,
            };
            if name.is_empty() {
                return Err(invalid(ValidationReason::EmptyName));
            }
            let parsed = parse_integer(value).ok_or_else(|| invalid(ValidationReason::NotNumeric))?;
            if env.vars.insert(name.to_string(), parsed).is_some() {
                return Err(invalid(ValidationReason::DuplicateName));
            }
        }
        log::debug!("environment holds {} variables", env.vars.len());
        Ok(env)
    }

    pub fn insert(&mut self, name: &str, value: i64) {
        self.vars.insert(name.to_string(), value);
    }

    pub fn get(&self, name: &str) -> Option<i64> {
        self.vars.get(name).copied()
    }

    pub fn lookup(&self, name: &str) -> Result<i64, EvalError> {
        self.get(name).ok_or_else(|| EvalError::UnboundVariable(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl<'a> FromIterator<(&'a str, i64)> for Environment {
    fn from_iter<I: IntoIterator<Item = (&'a str, i64)>>(iter: I) -> Self {
        let mut env = Environment::new();
        for (name, value) in iter {
            env.insert(name, value);
        }
        env
    }
}

// Optional sign followed by ASCII digits only.
fn parse_integer(s: &str) -> Option<i64> {
    let digits = s.strip_prefix(['-', '+']).unwrap_or(s);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
