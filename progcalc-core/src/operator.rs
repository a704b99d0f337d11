//! Arithmetic and bitwise operators.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::state::Mode;
use crate::value::Value;

/// Calculator operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    And,
    Or,
    Xor,
    /// Unary complement, applied as soon as it is pressed.
    Not,
    ShiftLeft,
    ShiftRight,
}

impl Operator {
    /// Key label for this operator.
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "×",
            Operator::Divide => "÷",
            Operator::And => "AND",
            Operator::Or => "OR",
            Operator::Xor => "XOR",
            Operator::Not => "NOT",
            Operator::ShiftLeft => "<<",
            Operator::ShiftRight => ">>",
        }
    }

    /// Bitwise operators are only available in programmer mode.
    pub fn is_bitwise(self) -> bool {
        !matches!(
            self,
            Operator::Add | Operator::Subtract | Operator::Multiply | Operator::Divide
        )
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Apply a binary operator to two operands.
///
/// Standard-mode arithmetic runs on floats. Everything else runs on i64.
/// Division by zero yields 0.
pub fn evaluate(op: Operator, lhs: Value, rhs: Value, mode: Mode) -> Value {
    if mode == Mode::Standard && !op.is_bitwise() {
        return Value::Float(apply_float(op, lhs.as_float(), rhs.as_float()));
    }
    Value::Int(apply_int(op, lhs.as_int(), rhs.as_int()))
}

fn apply_float(op: Operator, lhs: f64, rhs: f64) -> f64 {
    match op {
        Operator::Add => lhs + rhs,
        Operator::Subtract => lhs - rhs,
        Operator::Multiply => lhs * rhs,
        Operator::Divide if rhs == 0.0 => 0.0,
        Operator::Divide => lhs / rhs,
        _ => apply_int(op, lhs as i64, rhs as i64) as f64,
    }
}

fn apply_int(op: Operator, lhs: i64, rhs: i64) -> i64 {
    match op {
        Operator::Add => lhs.wrapping_add(rhs),
        Operator::Subtract => lhs.wrapping_sub(rhs),
        Operator::Multiply => lhs.wrapping_mul(rhs),
        Operator::Divide => floor_div(lhs, rhs),
        Operator::And => lhs & rhs,
        Operator::Or => lhs | rhs,
        Operator::Xor => lhs ^ rhs,
        Operator::Not => !rhs,
        Operator::ShiftLeft => lhs << shift_amount(rhs),
        Operator::ShiftRight => lhs >> shift_amount(rhs),
    }
}

/// Shift amounts are clamped to [0, 63].
fn shift_amount(rhs: i64) -> u32 {
    rhs.clamp(0, 63) as u32
}

/// Integer division rounding toward negative infinity; 0 for a zero divisor.
fn floor_div(lhs: i64, rhs: i64) -> i64 {
    if rhs == 0 {
        return 0;
    }
    let q = lhs.wrapping_div(rhs);
    if lhs.wrapping_rem(rhs) != 0 && ((lhs < 0) != (rhs < 0)) {
        q - 1
    } else {
        q
    }
}
