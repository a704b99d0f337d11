//! Operand values and standard-mode number formatting.

use serde::{Deserialize, Serialize};

/// A calculator operand.
///
/// Programmer mode works on `Int`, standard mode on `Float`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Float(f64),
}

impl Value {
    /// Integer view. Floats are floored and saturate at the i64 range.
    pub fn as_int(self) -> i64 {
        match self {
            Value::Int(v) => v,
            Value::Float(f) if f.is_nan() => 0,
            Value::Float(f) => f.floor() as i64,
        }
    }

    /// Floating-point view.
    pub fn as_float(self) -> f64 {
        match self {
            Value::Int(v) => v as f64,
            Value::Float(f) => f,
        }
    }
}

/// Format a standard-mode result.
///
/// Whole numbers print without a fraction and negative zero prints as "0".
pub fn format_standard(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value.is_sign_positive() {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else if value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    }
}

/// Parse standard-mode display text, falling back to 0.
pub fn parse_standard(text: &str) -> f64 {
    let cleaned: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    cleaned.parse::<f64>().unwrap_or(0.0)
}
