//! Input events and key scripts.
//!
//! A key script is a whitespace-separated list of tokens. Keywords map to
//! single events (`+`, `AND`, `=`, `CLR`, `HEX`, `PROG`, ...); any other
//! token is read as a run of keys, one event per character:
//!
//! ```text
//! PROG DEC 12 AND 10 =
//! HEX ff << 4 =
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::base::Base;
use crate::error::{CalcError, CalcResult};
use crate::operator::Operator;
use crate::state::Mode;

/// A single key press delivered to the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Decimal digit key, 0-9.
    Digit(u8),
    /// Hex letter key, A-F.
    HexDigit(char),
    Operator(Operator),
    Equals,
    Clear,
    DecimalPoint,
    Base(Base),
    Mode(Mode),
}

impl InputEvent {
    /// Map a single key character to its event.
    pub fn from_key(key: char) -> CalcResult<Self> {
        match key {
            '0'..='9' => Ok(InputEvent::Digit(key as u8 - b'0')),
            'a'..='f' | 'A'..='F' => Ok(InputEvent::HexDigit(key.to_ascii_uppercase())),
            '.' => Ok(InputEvent::DecimalPoint),
            _ => Err(CalcError::InvalidDigit(key)),
        }
    }
}

impl fmt::Display for InputEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputEvent::Digit(d) => write!(f, "{}", d),
            InputEvent::HexDigit(c) => write!(f, "{}", c),
            InputEvent::Operator(op) => write!(f, "{}", op),
            InputEvent::Equals => f.write_str("="),
            InputEvent::Clear => f.write_str("CLR"),
            InputEvent::DecimalPoint => f.write_str("."),
            InputEvent::Base(base) => write!(f, "{}", base),
            InputEvent::Mode(Mode::Standard) => f.write_str("STD"),
            InputEvent::Mode(Mode::Programmer) => f.write_str("PROG"),
        }
    }
}

/// Look up a keyword token (case-insensitive).
fn keyword(token: &str) -> Option<InputEvent> {
    let event = match token.to_ascii_uppercase().as_str() {
        "+" => InputEvent::Operator(Operator::Add),
        "-" => InputEvent::Operator(Operator::Subtract),
        "*" | "X" | "×" => InputEvent::Operator(Operator::Multiply),
        "/" | "÷" => InputEvent::Operator(Operator::Divide),
        "AND" => InputEvent::Operator(Operator::And),
        "OR" => InputEvent::Operator(Operator::Or),
        "XOR" => InputEvent::Operator(Operator::Xor),
        "NOT" => InputEvent::Operator(Operator::Not),
        "<<" => InputEvent::Operator(Operator::ShiftLeft),
        ">>" => InputEvent::Operator(Operator::ShiftRight),
        "=" => InputEvent::Equals,
        "CLR" => InputEvent::Clear,
        "." => InputEvent::DecimalPoint,
        "BIN" => InputEvent::Base(Base::Bin),
        "OCT" => InputEvent::Base(Base::Oct),
        "DEC" => InputEvent::Base(Base::Dec),
        "HEX" => InputEvent::Base(Base::Hex),
        "STD" => InputEvent::Mode(Mode::Standard),
        "PROG" => InputEvent::Mode(Mode::Programmer),
        _ => return None,
    };
    Some(event)
}

/// Parse a key script into events.
pub fn parse_script(script: &str) -> CalcResult<Vec<InputEvent>> {
    let mut events = Vec::new();

    for token in script.split_whitespace() {
        if let Some(event) = keyword(token) {
            events.push(event);
            continue;
        }
        for key in token.chars() {
            events.push(InputEvent::from_key(key)?);
        }
    }

    Ok(events)
}
