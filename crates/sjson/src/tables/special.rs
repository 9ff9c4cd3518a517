/*
 * special.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Sentinel strings and flag expressions in table cells.

use crate::value::{Value, ValueKind};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// `BASE|FLAG|...` with upper-case segments only.
static FLAG_EXPRESSION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Z0-9_]*(\|[A-Z0-9_]*)+$").expect("flag expression pattern is valid")
});

const CONSTANTS: &[(&str, f64)] = &[
    ("FLT_MAX", f64::INFINITY),
    ("MINUS_FLT_MAX", f64::NEG_INFINITY),
];

const FLAGS: &[(&str, u32)] = &[
    ("NORMAL", 0),
    ("HYDRO", 1),
    ("ANISOTROPIC", 2),
    ("BOUNDED", 4),
    ("PRESSURED", 8),
    ("SUPPORT", 16),
    ("LBEAM", 32),
    ("NONCOLLIDABLE", 64),
    ("BROKEN", 128),
];

/// Lookup tables used to replace special strings with numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecialValues {
    constants: HashMap<String, f64>,
    flags: HashMap<String, u32>,
}

impl Default for SpecialValues {
    fn default() -> Self {
        Self {
            constants: CONSTANTS.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
            flags: FLAGS.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
        }
    }
}

impl SpecialValues {
    /// Tables with no entries; every value passes through.
    pub fn empty() -> Self {
        Self {
            constants: HashMap::new(),
            flags: HashMap::new(),
        }
    }

    pub fn with_constant(mut self, name: impl Into<String>, value: f64) -> Self {
        self.constants.insert(name.into(), value);
        self
    }

    pub fn with_flag(mut self, name: impl Into<String>, bit: u32) -> Self {
        self.flags.insert(name.into(), bit);
        self
    }

    /// Number a string stands for, if it is a sentinel or flag expression.
    ///
    /// Unknown flag names contribute nothing.
    pub fn resolve(&self, text: &str) -> Option<f64> {
        if let Some(constant) = self.constants.get(text) {
            return Some(*constant);
        }
        if !FLAG_EXPRESSION.is_match(text) {
            return None;
        }
        let bits = text
            .split('|')
            .filter_map(|flag| self.flags.get(flag))
            .fold(0u32, |acc, bit| acc | bit);
        Some(f64::from(bits))
    }

    /// Replace special strings in place, descending into containers.
    pub fn substitute(&self, value: &mut Value) {
        match &mut value.kind {
            ValueKind::String(text) => {
                if let Some(n) = self.resolve(text) {
                    value.kind = ValueKind::Number(n);
                }
            }
            ValueKind::Array(items) => {
                for item in items {
                    self.substitute(item);
                }
            }
            ValueKind::Object(object) => {
                for item in object.entries.values_mut() {
                    self.substitute(item);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinels() {
        let special = SpecialValues::default();
        assert_eq!(special.resolve("FLT_MAX"), Some(f64::INFINITY));
        assert_eq!(special.resolve("MINUS_FLT_MAX"), Some(f64::NEG_INFINITY));
    }

    #[test]
    fn test_flag_expressions() {
        let special = SpecialValues::default();
        assert_eq!(special.resolve("NORMAL|HYDRO"), Some(1.0));
        assert_eq!(special.resolve("BOUNDED|SUPPORT|LBEAM"), Some(52.0));
        assert_eq!(special.resolve("NORMAL|NOT_A_FLAG"), Some(0.0));
    }

    #[test]
    fn test_plain_strings_pass_through() {
        let special = SpecialValues::default();
        assert_eq!(special.resolve("NORMAL"), None);
        assert_eq!(special.resolve("a|b"), None);
        assert_eq!(special.resolve("n1"), None);
    }

    #[test]
    fn test_substitute_nested() {
        let special = SpecialValues::default();
        let mut value = Value::array(vec![Value::string("FLT_MAX"), Value::string("x")]);
        special.substitute(&mut value);
        assert_eq!(
            value,
            Value::array(vec![Value::number(f64::INFINITY), Value::string("x")])
        );
    }
}
