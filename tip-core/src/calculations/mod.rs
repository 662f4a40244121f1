//! Tip calculation modules.
//!
//! Turning the raw "cost of service" text into a display string happens in
//! three steps: [`amount`] parses the text, [`tip`] applies the percentage, and
//! the currency formatter in [`crate::models`] renders the result.

pub mod amount;
pub mod common;
pub mod tip;

pub use amount::{ParseAmountError, parse_amount, try_parse_amount};
pub use tip::{
    CalculatorConfigError, DEFAULT_TIP_PERCENT, TipCalculator, TipCalculatorConfig, TipResult,
    compute, tip_amount,
};
