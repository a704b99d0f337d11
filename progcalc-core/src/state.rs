//! Calculator state and its transitions.
//!
//! `CalculatorState` is a plain value. Every input produces a new state via
//! one of the `apply_*` methods, leaving the old one untouched:
//!
//! - digits and the decimal point edit the display
//! - operators either store the left operand or fold the pending operation
//!   into it (strict left-to-right, no precedence)
//! - equals resolves the pending operation and returns to idle
//! - base changes re-render the display without touching the pending
//!   operation

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::base::{parse_display, to_display_string, Base, BaseViews};
use crate::error::CalcError;
use crate::event::InputEvent;
use crate::operator::{evaluate, Operator};
use crate::value::{format_standard, parse_standard, Value};

/// Calculator mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Standard,
    Programmer,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Standard => f.write_str("standard"),
            Mode::Programmer => f.write_str("programmer"),
        }
    }
}

impl FromStr for Mode {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "std" | "standard" => Ok(Mode::Standard),
            "prog" | "programmer" => Ok(Mode::Programmer),
            _ => Err(CalcError::UnknownKey(s.to_string())),
        }
    }
}

/// Complete calculator state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorState {
    mode: Mode,
    base: Base,
    /// Display text exactly as shown.
    display: String,
    /// Left operand waiting for the pending operator.
    previous_value: Option<Value>,
    pending_operator: Option<Operator>,
    /// Next digit starts a new number instead of extending the display.
    awaiting_operand: bool,
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self::new(Mode::default(), Base::default())
    }
}

impl CalculatorState {
    /// Create a zeroed state.
    pub fn new(mode: Mode, base: Base) -> Self {
        Self {
            mode,
            base,
            display: "0".to_string(),
            previous_value: None,
            pending_operator: None,
            awaiting_operand: false,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn base(&self) -> Base {
        self.base
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn previous_value(&self) -> Option<Value> {
        self.previous_value
    }

    pub fn pending_operator(&self) -> Option<Operator> {
        self.pending_operator
    }

    pub fn awaiting_operand(&self) -> bool {
        self.awaiting_operand
    }

    /// Value of the display under the current mode and base.
    pub fn current_value(&self) -> Value {
        match self.mode {
            Mode::Standard => Value::Float(parse_standard(&self.display)),
            Mode::Programmer => Value::Int(parse_display(&self.display, self.base)),
        }
    }

    /// HEX/DEC/OCT/BIN renderings of the display, programmer mode only.
    pub fn views(&self) -> Option<BaseViews> {
        match self.mode {
            Mode::Programmer => Some(BaseViews::from_value(parse_display(
                &self.display,
                self.base,
            ))),
            Mode::Standard => None,
        }
    }

    /// Apply one input event.
    #[must_use]
    pub fn apply(&self, event: &InputEvent) -> Self {
        match *event {
            InputEvent::Digit(d) => self.apply_digit(d),
            InputEvent::HexDigit(c) => self.apply_hex_digit(c),
            InputEvent::DecimalPoint => self.apply_decimal_point(),
            InputEvent::Operator(op) => self.apply_operator(op),
            InputEvent::Equals => self.apply_equals(),
            InputEvent::Clear => self.apply_clear(),
            InputEvent::Base(base) => self.apply_base_change(base),
            InputEvent::Mode(mode) => self.apply_mode_change(mode),
        }
    }

    /// Enter a decimal digit key (0-9).
    ///
    /// In programmer mode, digits beyond the base's range are ignored.
    #[must_use]
    pub fn apply_digit(&self, digit: u8) -> Self {
        if digit > 9 {
            return self.clone();
        }
        if self.mode == Mode::Programmer && !self.base.accepts_digit(digit) {
            return self.clone();
        }
        self.enter_key(char::from(b'0' + digit))
    }

    /// Enter a hex letter (A-F). Only accepted in programmer mode with HEX.
    #[must_use]
    pub fn apply_hex_digit(&self, letter: char) -> Self {
        let upper = letter.to_ascii_uppercase();
        if !matches!(upper, 'A'..='F') || self.mode != Mode::Programmer || self.base != Base::Hex
        {
            return self.clone();
        }
        self.enter_key(upper)
    }

    fn enter_key(&self, key: char) -> Self {
        let mut next = self.clone();

        if self.awaiting_operand {
            next.display = key.to_string();
            next.awaiting_operand = false;
            return next;
        }

        let cleaned: String = self.display.chars().filter(|c| !c.is_whitespace()).collect();
        let appended = if cleaned == "0" {
            key.to_string()
        } else {
            format!("{}{}", cleaned, key)
        };

        next.display = match self.mode {
            // Re-render so grouping follows every keystroke
            Mode::Programmer => to_display_string(parse_display(&appended, self.base), self.base),
            Mode::Standard => appended,
        };
        next
    }

    /// Enter the decimal point. Ignored in programmer mode.
    #[must_use]
    pub fn apply_decimal_point(&self) -> Self {
        let mut next = self.clone();
        if self.mode == Mode::Programmer {
            return next;
        }

        if self.awaiting_operand {
            next.display = "0.".to_string();
            next.awaiting_operand = false;
        } else if !self.display.contains('.') {
            next.display.push('.');
        }
        next
    }

    /// Reset to zero, keeping mode and base.
    #[must_use]
    pub fn apply_clear(&self) -> Self {
        Self::new(self.mode, self.base)
    }

    /// Switch the active base.
    ///
    /// In programmer mode the display is re-read under the old base and
    /// re-rendered under the new one. The pending operation is kept.
    #[must_use]
    pub fn apply_base_change(&self, base: Base) -> Self {
        let mut next = self.clone();
        if self.mode == Mode::Programmer {
            let value = parse_display(&self.display, self.base);
            next.display = to_display_string(value, base);
        }
        next.base = base;
        next
    }

    /// Switch mode. The display is not re-validated.
    #[must_use]
    pub fn apply_mode_change(&self, mode: Mode) -> Self {
        let mut next = self.clone();
        next.mode = mode;
        next
    }

    /// Press an operator key.
    ///
    /// NOT applies immediately. Binary operators first fold any pending
    /// operation into the left operand, then become the pending operator.
    /// Bitwise operators are ignored outside programmer mode.
    #[must_use]
    pub fn apply_operator(&self, op: Operator) -> Self {
        if op.is_bitwise() && self.mode != Mode::Programmer {
            return self.clone();
        }

        let mut next = self.clone();
        let current = self.current_value();

        if op == Operator::Not {
            let result = Value::Int(!current.as_int());
            next.display = self.render(result);
            next.previous_value = Some(result);
            next.pending_operator = None;
            next.awaiting_operand = false;
            return next;
        }

        match (self.previous_value, self.pending_operator) {
            (None, _) => next.previous_value = Some(current),
            (Some(previous), Some(pending)) => {
                let result = evaluate(pending, previous, current, self.mode);
                next.display = self.render(result);
                next.previous_value = Some(result);
            }
            // Left operand left behind by NOT
            (Some(_), None) => {}
        }

        next.pending_operator = Some(op);
        next.awaiting_operand = true;
        next
    }

    /// Press equals: resolve the pending operation and return to idle.
    #[must_use]
    pub fn apply_equals(&self) -> Self {
        let mut next = self.clone();
        if let (Some(previous), Some(pending)) = (self.previous_value, self.pending_operator) {
            let result = evaluate(pending, previous, self.current_value(), self.mode);
            next.display = self.render(result);
        }
        next.previous_value = None;
        next.pending_operator = None;
        next.awaiting_operand = false;
        next
    }

    fn render(&self, value: Value) -> String {
        match self.mode {
            Mode::Standard => format_standard(value.as_float()),
            Mode::Programmer => to_display_string(value.as_int(), self.base),
        }
    }
}
