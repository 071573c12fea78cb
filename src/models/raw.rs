// Payload-shape helpers for the external API
//
// The backend is loose about types: numeric fields arrive as numbers or
// strings depending on how the form stored them, and endpoints answer with
// either a bare object or a one-element array.

use serde::{Deserialize, Serialize};

/// A numeric-like field as the backend sends it: number, string, or null.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawNum {
    Num(f64),
    Text(String),
    #[default]
    Missing,
}

impl RawNum {
    /// Parse into a number if possible. Unparseable text counts as missing.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            RawNum::Num(n) => Some(*n),
            RawNum::Text(s) => s.trim().parse::<f64>().ok(),
            RawNum::Missing => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, RawNum::Missing)
    }

    /// True for the values the display formatters blank out before parsing:
    /// null, the number zero, and the empty string. Note `Text("0")` is NOT
    /// falsy; it parses and formats like any other number.
    pub fn is_falsy(&self) -> bool {
        match self {
            RawNum::Num(n) => *n == 0.0,
            RawNum::Text(s) => s.is_empty(),
            RawNum::Missing => true,
        }
    }

    /// Pass-through display of the raw value, "" when missing. Whole numbers
    /// print without a fractional part.
    pub fn display(&self) -> String {
        match self {
            RawNum::Num(n) => {
                if n.fract() == 0.0 && n.abs() < 9.0e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{}", n)
                }
            }
            RawNum::Text(s) => s.clone(),
            RawNum::Missing => String::new(),
        }
    }
}

impl From<f64> for RawNum {
    fn from(n: f64) -> Self {
        RawNum::Num(n)
    }
}

impl From<i64> for RawNum {
    fn from(n: i64) -> Self {
        RawNum::Num(n as f64)
    }
}

impl From<&str> for RawNum {
    fn from(s: &str) -> Self {
        RawNum::Text(s.to_string())
    }
}

/// An endpoint payload that may be a single record or an array of records.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}
