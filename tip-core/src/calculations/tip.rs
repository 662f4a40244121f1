//! Tip calculation.
//!
//! A tip is derived from the raw "cost of service" text in three steps:
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Parse the text as a decimal number; anything unparsable is a cost of `0.0` |
//! | 2    | Tip = (tip percent / 100) × cost, in `f64` with no intermediate rounding |
//! | 3    | Render the tip with the active locale's currency format |
//!
//! Every step is total: there is no input text for which a tip cannot be
//! displayed. See [`CurrencyFormat::format`] for how out-of-range amounts are
//! rendered.
//!
//! # Example
//!
//! ```
//! use tip_core::TipCalculator;
//!
//! let calculator = TipCalculator::default();
//!
//! assert_eq!(calculator.compute("200.0"), "$30.00");
//! assert_eq!(calculator.compute(""), "$0.00");
//! assert_eq!(calculator.compute("-100"), "-$15.00");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::CurrencyFormat;
use crate::calculations::amount::parse_amount;

/// Tip percent used when none is configured.
pub const DEFAULT_TIP_PERCENT: f64 = 15.0;

/// Errors that can occur when building a [`TipCalculator`].
#[derive(Debug, Error, PartialEq)]
pub enum CalculatorConfigError {
    /// The tip percent is NaN or infinite.
    #[error("tip percent must be a finite number, got {0}")]
    NonFiniteTipPercent(f64),

    /// The tip percent is below zero.
    #[error("tip percent must be non-negative, got {0}")]
    NegativeTipPercent(f64),
}

/// Configuration for a [`TipCalculator`].
///
/// # Example
///
/// ```
/// use tip_core::{CurrencyFormat, CurrencyLocale, TipCalculatorConfig};
///
/// let config = TipCalculatorConfig {
///     tip_percent: 20.0,
///     currency: CurrencyFormat::for_locale(CurrencyLocale::EnGb),
/// };
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TipCalculatorConfig {
    /// Percentage of the cost paid as a tip, e.g. `15.0` for 15 %.
    pub tip_percent: f64,

    /// Currency conventions used to render the tip.
    pub currency: CurrencyFormat,
}

impl Default for TipCalculatorConfig {
    fn default() -> Self {
        Self {
            tip_percent: DEFAULT_TIP_PERCENT,
            currency: CurrencyFormat::default(),
        }
    }
}

impl TipCalculatorConfig {
    /// Validates the configuration values.
    ///
    /// # Errors
    ///
    /// Returns [`CalculatorConfigError`] if `tip_percent` is not finite or is
    /// negative.
    pub fn validate(&self) -> Result<(), CalculatorConfigError> {
        if !self.tip_percent.is_finite() {
            return Err(CalculatorConfigError::NonFiniteTipPercent(
                self.tip_percent,
            ));
        }
        if self.tip_percent < 0.0 {
            return Err(CalculatorConfigError::NegativeTipPercent(
                self.tip_percent,
            ));
        }
        Ok(())
    }
}

/// One recomputation of the tip, with the intermediate values kept for
/// logging and inspection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TipResult {
    /// The cost the input text was read as (`0.0` when unparsable).
    pub cost: f64,

    /// The percentage applied.
    pub tip_percent: f64,

    /// The unrounded tip amount.
    pub tip: f64,

    /// The tip rendered as a currency string.
    pub display: String,
}

/// Computes the tip amount for a cost.
///
/// Plain IEEE arithmetic: a negative cost gives a negative tip and an infinite
/// cost an infinite tip.
///
/// ```
/// use tip_core::tip_amount;
///
/// assert_eq!(tip_amount(200.0, 15.0), 30.0);
/// assert_eq!(tip_amount(-100.0, 15.0), -15.0);
/// ```
pub fn tip_amount(
    cost: f64,
    tip_percent: f64,
) -> f64 {
    (tip_percent / 100.0) * cost
}

/// Parses `input`, applies `tip_percent` and renders the tip with `currency`.
///
/// Never fails; see the [module documentation](self) for the steps.
pub fn compute(
    input: &str,
    tip_percent: f64,
    currency: &CurrencyFormat,
) -> String {
    calculate(input, tip_percent, currency).display
}

fn calculate(
    input: &str,
    tip_percent: f64,
    currency: &CurrencyFormat,
) -> TipResult {
    let cost = parse_amount(input);
    let tip = tip_amount(cost, tip_percent);
    let rendered = currency.format(tip);

    debug!(input, cost, tip_percent, tip, display = %rendered, "tip recomputed");

    TipResult {
        cost,
        tip_percent,
        tip,
        display: rendered,
    }
}

/// Calculator that turns "cost of service" text into a formatted tip.
///
/// Holds a validated [`TipCalculatorConfig`]; every method is a pure function
/// of its arguments and that configuration.
///
/// # Example
///
/// ```
/// use tip_core::{CurrencyFormat, CurrencyLocale, TipCalculator, TipCalculatorConfig};
///
/// let calculator = TipCalculator::new(TipCalculatorConfig {
///     tip_percent: 10.0,
///     currency: CurrencyFormat::for_locale(CurrencyLocale::PtBr),
/// })
/// .unwrap();
///
/// assert_eq!(calculator.compute("1234.5"), "R$\u{a0}123,45");
/// ```
#[derive(Debug, Clone, Default)]
pub struct TipCalculator {
    config: TipCalculatorConfig,
}

impl TipCalculator {
    /// Creates a calculator after validating `config`.
    ///
    /// # Errors
    ///
    /// Returns [`CalculatorConfigError`] if the configuration is invalid.
    pub fn new(config: TipCalculatorConfig) -> Result<Self, CalculatorConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &TipCalculatorConfig {
        &self.config
    }

    pub fn tip_percent(&self) -> f64 {
        self.config.tip_percent
    }

    pub fn currency(&self) -> &CurrencyFormat {
        &self.config.currency
    }

    /// Formats the tip for `input` at the configured percent.
    pub fn compute(
        &self,
        input: &str,
    ) -> String {
        self.calculate(input).display
    }

    /// Formats the tip for `input` at an explicit percent.
    ///
    /// The percent is used as given, without the validation applied to the
    /// configured one; a NaN percent renders as [`crate::UNDEFINED_DISPLAY`].
    pub fn compute_with_percent(
        &self,
        input: &str,
        tip_percent: f64,
    ) -> String {
        compute(input, tip_percent, &self.config.currency)
    }

    /// Like [`Self::compute`], keeping the parsed cost and raw tip.
    pub fn calculate(
        &self,
        input: &str,
    ) -> TipResult {
        calculate(input, self.config.tip_percent, &self.config.currency)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{CurrencyLocale, UNDEFINED_DISPLAY};

    fn calculator() -> TipCalculator {
        TipCalculator::default()
    }

    // =========================================================================
    // Configuration tests
    // =========================================================================

    #[test]
    fn default_config_uses_fifteen_percent_and_en_us() {
        let config = TipCalculatorConfig::default();

        assert_eq!(config.tip_percent, 15.0);
        assert_eq!(config.currency.locale, CurrencyLocale::EnUs);
    }

    #[test]
    fn new_rejects_non_finite_percent() {
        let result = TipCalculator::new(TipCalculatorConfig {
            tip_percent: f64::INFINITY,
            ..Default::default()
        });

        assert_eq!(
            result.map(|_| ()),
            Err(CalculatorConfigError::NonFiniteTipPercent(f64::INFINITY))
        );
    }

    #[test]
    fn new_rejects_negative_percent() {
        let result = TipCalculator::new(TipCalculatorConfig {
            tip_percent: -5.0,
            ..Default::default()
        });

        assert_eq!(
            result.map(|_| ()),
            Err(CalculatorConfigError::NegativeTipPercent(-5.0))
        );
    }

    #[test]
    fn new_accepts_zero_percent() {
        let calculator = TipCalculator::new(TipCalculatorConfig {
            tip_percent: 0.0,
            ..Default::default()
        })
        .unwrap();

        assert_eq!(calculator.compute("250"), "$0.00");
    }

    // =========================================================================
    // compute tests
    // =========================================================================

    #[test]
    fn compute_applies_default_percent() {
        assert_eq!(calculator().compute("200.0"), "$30.00");
    }

    #[test]
    fn compute_empty_input_is_zero_tip() {
        assert_eq!(calculator().compute(""), "$0.00");
    }

    #[test]
    fn compute_unparsable_input_matches_zero() {
        let zero = calculator().compute("0");

        for text in ["", "   ", "abc", "1.2.3", "12abc", "$5", "1,000"] {
            assert_eq!(calculator().compute(text), zero, "input {text:?}");
        }
    }

    #[test]
    fn compute_negative_input_is_not_clamped() {
        assert_eq!(calculator().compute("-100"), "-$15.00");
    }

    #[test]
    fn compute_small_amounts_round_to_cents() {
        assert_eq!(calculator().compute("1"), "$0.15");
        assert_eq!(calculator().compute("12.34"), "$1.85");
    }

    #[test]
    fn compute_groups_large_amounts() {
        assert_eq!(calculator().compute("1234567.89"), "$185,185.18");
    }

    #[test]
    fn compute_overflow_renders_indicator() {
        assert_eq!(calculator().compute("1e400"), "$∞");
        assert_eq!(calculator().compute("-1e400"), "-$∞");
        assert_eq!(calculator().compute("1e30"), "$∞");
    }

    #[test]
    fn compute_is_deterministic() {
        let first = calculator().compute("87.65");
        let second = calculator().compute("87.65");

        assert_eq!(first, second);
    }

    #[test]
    fn compute_with_percent_overrides_configured_percent() {
        assert_eq!(calculator().compute_with_percent("200", 20.0), "$40.00");
        assert_eq!(calculator().compute_with_percent("200", 0.0), "$0.00");
    }

    #[test]
    fn compute_with_nan_percent_is_undefined() {
        assert_eq!(calculator().compute_with_percent("200", f64::NAN), UNDEFINED_DISPLAY);
    }

    #[test]
    fn free_compute_matches_calculator() {
        let currency = CurrencyFormat::default();

        assert_eq!(compute("200.0", DEFAULT_TIP_PERCENT, &currency), calculator().compute("200.0"));
    }

    #[test]
    fn compute_uses_locale_currency() {
        let calculator = TipCalculator::new(TipCalculatorConfig {
            currency: CurrencyFormat::for_locale(CurrencyLocale::JaJp),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(calculator.compute("200"), "￥30");
    }

    // =========================================================================
    // calculate tests
    // =========================================================================

    #[test]
    fn calculate_keeps_intermediate_values() {
        let result = calculator().calculate("200");

        assert_eq!(
            result,
            TipResult {
                cost: 200.0,
                tip_percent: 15.0,
                tip: 30.0,
                display: "$30.00".to_string(),
            }
        );
    }

    #[test]
    fn calculate_reports_zero_cost_for_garbage() {
        let result = calculator().calculate("garbage");

        assert_eq!(result.cost, 0.0);
        assert_eq!(result.tip, 0.0);
    }
}
