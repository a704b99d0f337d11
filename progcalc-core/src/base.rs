//! Base conversion between canonical integers and display strings.
//!
//! Non-decimal bases render negative values as their 32-bit unsigned
//! two's-complement pattern, and group digits from the least significant
//! end (4 for HEX/BIN, 3 for OCT). Decimal keeps the full signed value and
//! is never grouped.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CalcError;

/// Numeric base used by programmer mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Base {
    Bin,
    Oct,
    #[default]
    Dec,
    Hex,
}

impl Base {
    /// All bases, in the order the base views are listed.
    pub const ALL: [Base; 4] = [Base::Hex, Base::Dec, Base::Oct, Base::Bin];

    /// Radix of this base.
    pub fn radix(self) -> u32 {
        match self {
            Base::Bin => 2,
            Base::Oct => 8,
            Base::Dec => 10,
            Base::Hex => 16,
        }
    }

    /// Digit group size used for display, `None` for decimal.
    pub fn group_size(self) -> Option<usize> {
        match self {
            Base::Bin | Base::Hex => Some(4),
            Base::Oct => Some(3),
            Base::Dec => None,
        }
    }

    /// Largest decimal digit key (0-9) accepted in this base.
    ///
    /// HEX letters go through a separate entry path.
    pub fn max_digit(self) -> u8 {
        match self {
            Base::Bin => 1,
            Base::Oct => 7,
            Base::Dec | Base::Hex => 9,
        }
    }

    /// Check whether a decimal digit key is valid in this base.
    pub fn accepts_digit(self, digit: u8) -> bool {
        digit <= self.max_digit()
    }

    /// Short upper-case label ("HEX", "DEC", ...).
    pub fn label(self) -> &'static str {
        match self {
            Base::Bin => "BIN",
            Base::Oct => "OCT",
            Base::Dec => "DEC",
            Base::Hex => "HEX",
        }
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Base {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "BIN" => Ok(Base::Bin),
            "OCT" => Ok(Base::Oct),
            "DEC" => Ok(Base::Dec),
            "HEX" => Ok(Base::Hex),
            _ => Err(CalcError::UnknownKey(s.to_string())),
        }
    }
}

/// Render a value in the given base, grouped for display.
pub fn to_display_string(value: i64, base: Base) -> String {
    let Some(group) = base.group_size() else {
        return value.to_string();
    };

    // Negative values show their 32-bit register pattern.
    let bits = if value < 0 {
        (value as u64) & 0xFFFF_FFFF
    } else {
        value as u64
    };

    let digits = match base {
        Base::Bin => format!("{:b}", bits),
        Base::Oct => format!("{:o}", bits),
        _ => format!("{:X}", bits),
    };

    group_digits(&digits, group)
}

/// Insert a space between groups of `size` digits, counted from the right.
fn group_digits(digits: &str, size: usize) -> String {
    let chars: Vec<char> = digits.chars().collect();
    let mut out = String::with_capacity(chars.len() + chars.len() / size);

    for (i, &c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % size == 0 {
            out.push(' ');
        }
        out.push(c);
    }

    out
}

/// Parse display text under the given base.
///
/// Whitespace is stripped, then an optional sign and the longest run of
/// digits valid for the radix are read. Anything that follows is ignored.
/// Text without a leading digit yields 0; overflow saturates.
pub fn parse_display(text: &str, base: Base) -> i64 {
    let cleaned: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    parse_prefix(&cleaned, base.radix())
}

fn parse_prefix(s: &str, radix: u32) -> i64 {
    let (negative, digits) = if let Some(rest) = s.strip_prefix('-') {
        (true, rest)
    } else {
        (false, s.strip_prefix('+').unwrap_or(s))
    };

    let mut value: i64 = 0;
    for c in digits.chars() {
        let Some(d) = c.to_digit(radix) else {
            break;
        };
        let next = value.checked_mul(radix as i64).and_then(|v| {
            if negative {
                v.checked_sub(d as i64)
            } else {
                v.checked_add(d as i64)
            }
        });
        match next {
            Some(v) => value = v,
            None => return if negative { i64::MIN } else { i64::MAX },
        }
    }

    value
}

/// Read-only renderings of one value in every base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseViews {
    pub hex: String,
    pub dec: String,
    pub oct: String,
    pub bin: String,
}

impl BaseViews {
    /// Render `value` in all four bases.
    pub fn from_value(value: i64) -> Self {
        Self {
            hex: to_display_string(value, Base::Hex),
            dec: to_display_string(value, Base::Dec),
            oct: to_display_string(value, Base::Oct),
            bin: to_display_string(value, Base::Bin),
        }
    }

    /// Get the rendering for one base.
    pub fn get(&self, base: Base) -> &str {
        match base {
            Base::Hex => &self.hex,
            Base::Dec => &self.dec,
            Base::Oct => &self.oct,
            Base::Bin => &self.bin,
        }
    }
}
