use std::collections::HashMap;

use log::debug;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::suggest::Suggestion;

static NUMERIC_PREFIX: Lazy<regex::Regex> = Lazy::new(|| {
    regex::Regex::new(r"\A[+-]?(?:Infinity|(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?)")
        .expect("numeric prefix pattern is valid")
});

/// Name to value mapping used to resolve tags.
///
/// Names are case-sensitive. A name that is not in the table resolves to `0`
/// instead of failing, so a formula referencing a variable that has not
/// loaded yet still evaluates.
///
/// # Examples
///
/// ```
/// use tag_formula::VariableTable;
///
/// let mut vars = VariableTable::new();
/// vars.insert("rate", 0.2);
///
/// assert_eq!(vars.get("rate"), 0.2);
/// assert_eq!(vars.get("Rate"), 0.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariableTable {
    values: HashMap<String, f64>,
}

impl VariableTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from a suggestion dataset.
    ///
    /// When two suggestions share a name, the later one wins.
    pub fn from_suggestions<'a>(suggestions: impl IntoIterator<Item = &'a Suggestion>) -> Self {
        suggestions
            .into_iter()
            .map(|s| (s.name.clone(), s.value))
            .collect()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: f64) -> Option<f64> {
        self.values.insert(name.into(), value)
    }

    /// Value for `name`, or `0` when the name is unknown.
    pub fn get(&self, name: &str) -> f64 {
        match self.values.get(name) {
            Some(value) => *value,
            None => {
                debug!("variable {:?} is not defined, using 0", name);
                0.0
            }
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl FromIterator<(String, f64)> for VariableTable {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        VariableTable {
            values: iter.into_iter().collect(),
        }
    }
}

impl Extend<(String, f64)> for VariableTable {
    fn extend<I: IntoIterator<Item = (String, f64)>>(&mut self, iter: I) {
        self.values.extend(iter);
    }
}

/// Reads the leading decimal number of `text`, ignoring leading whitespace.
///
/// Trailing garbage is ignored (`"12.5kg"` is `12.5`). Text without a numeric
/// prefix yields `0`.
pub fn parse_float_prefix(text: &str) -> f64 {
    let trimmed = text.trim_start();
    let Some(m) = NUMERIC_PREFIX.find(trimmed) else {
        return 0.0;
    };

    let value = match m.as_str() {
        "Infinity" | "+Infinity" => f64::INFINITY,
        "-Infinity" => f64::NEG_INFINITY,
        digits => digits.parse::<f64>().unwrap_or(0.0),
    };

    if value.is_nan() { 0.0 } else { value }
}

/// Interprets a loosely typed JSON payload as a number.
///
/// Numbers are taken as is, strings go through [`parse_float_prefix`], and
/// every other JSON type is `0`.
pub fn parse_numeric(value: &serde_json::Value) -> f64 {
    match value {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(0.0),
        serde_json::Value::String(s) => parse_float_prefix(s),
        _ => 0.0,
    }
}
