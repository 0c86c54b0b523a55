//! Numeric token helpers shared by the three scanners.

use crate::scan::ScanError;
use regex::Regex;
use serde::{Deserialize, Serialize};

// Leading digits/dots, then any unit letters directly after them.
const DURATION_RE: &str = r"([0-9.]+)([a-zA-Z]*)";

/// Splits `"12.5s"` into `("12.5", "s")`.
#[derive(Debug, Clone)]
pub struct DurationTokenizer {
    re: Regex,
}

impl DurationTokenizer {
    pub fn new() -> Result<Self, ScanError> {
        Ok(Self {
            re: Regex::new(DURATION_RE)?,
        })
    }

    /// Returns `(magnitude, unit)`. A token without any digit run is returned
    /// whole with an empty unit; the caller's float parse then rejects it.
    pub fn split<'a>(&self, token: &'a str) -> (&'a str, &'a str) {
        match self.re.captures(token) {
            Some(caps) => {
                let magnitude = caps.get(1).map_or(token, |m| m.as_str());
                let unit = caps.get(2).map_or("", |m| m.as_str());
                (magnitude, unit)
            }
            None => (token, ""),
        }
    }
}

/// Drop `,` thousands separators.
pub fn strip_thousands(text: &str) -> String {
    text.replace(',', "")
}

pub fn parse_float(lno: usize, field: &str, text: &str) -> Result<f64, ScanError> {
    let clean = strip_thousands(text);
    clean.parse::<f64>().map_err(|source| ScanError::InvalidFloat {
        lno,
        field: field.to_string(),
        text: text.to_string(),
        source,
    })
}

/// Record counts: separators stripped, fractional part truncated.
pub fn parse_count(lno: usize, field: &str, text: &str) -> Result<i64, ScanError> {
    let clean = strip_thousands(text);
    let whole = clean.split('.').next().unwrap_or_default();
    whole.parse::<i64>().map_err(|source| ScanError::InvalidInteger {
        lno,
        field: field.to_string(),
        text: text.to_string(),
        source,
    })
}

/// A counter value, typed by the first conversion that succeeds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl MetricValue {
    /// Integer, then float, then raw text. Separators are stripped first.
    pub fn parse(token: &str) -> Self {
        let clean = strip_thousands(token);
        if let Ok(i) = clean.parse::<i64>() {
            return Self::Integer(i);
        }
        if let Ok(f) = clean.parse::<f64>() {
            return Self::Float(f);
        }
        Self::Text(clean)
    }
}
