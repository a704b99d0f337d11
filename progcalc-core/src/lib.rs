//! Standard and programmer calculator engine.
//!
//! This crate provides the core components of a four-function calculator
//! with a programmer mode:
//! - Base conversion (BIN/OCT/DEC/HEX) with grouped display
//! - Per-base digit validation
//! - Chained arithmetic and bitwise evaluation through a single pending
//!   operator (strict left-to-right, no precedence)
//!
//! # Architecture
//!
//! - `CalculatorState`: immutable state with pure `apply_*` transitions
//! - `InputEvent`: key presses, also readable from textual key scripts
//! - `Calculator`: session wrapper that owns a state and logs transitions

pub mod base;
pub mod config;
pub mod error;
pub mod event;
pub mod operator;
pub mod session;
pub mod state;
pub mod value;

pub use base::{parse_display, to_display_string, Base, BaseViews};
pub use config::{load_config, CalcConfig};
pub use error::{CalcError, CalcResult};
pub use event::{parse_script, InputEvent};
pub use operator::Operator;
pub use session::{Calculator, Snapshot};
pub use state::{CalculatorState, Mode};
pub use value::Value;
