use std::fmt;

use rust_decimal::{Decimal, prelude::FromPrimitive};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::calculations::common::to_fixed_places;

/// Digits shown in place of a number whose magnitude cannot be represented.
pub const OVERFLOW_DIGITS: &str = "∞";

/// Display used when an amount is not a number at all.
pub const UNDEFINED_DISPLAY: &str = "—";

/// Smallest magnitude that no longer fits in a [`Decimal`] (2^96).
const DECIMAL_LIMIT: f64 = 79_228_162_514_264_337_593_543_950_336.0;

/// Environment variables consulted for the active locale, highest priority first.
const LOCALE_ENV_VARS: [&str; 3] = ["LC_ALL", "LC_MONETARY", "LANG"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CurrencyFormatError {
    #[error("unknown locale '{0}'")]
    UnknownLocale(String),
}

/// Locales with a built-in currency format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CurrencyLocale {
    #[default]
    EnUs,
    EnGb,
    PtBr,
    DeDe,
    FrFr,
    JaJp,
}

impl CurrencyLocale {
    pub fn all() -> &'static [CurrencyLocale] {
        &[
            CurrencyLocale::EnUs,
            CurrencyLocale::EnGb,
            CurrencyLocale::PtBr,
            CurrencyLocale::DeDe,
            CurrencyLocale::FrFr,
            CurrencyLocale::JaJp,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EnUs => "en-US",
            Self::EnGb => "en-GB",
            Self::PtBr => "pt-BR",
            Self::DeDe => "de-DE",
            Self::FrFr => "fr-FR",
            Self::JaJp => "ja-JP",
        }
    }

    /// Two-letter language code of the locale.
    pub fn language(&self) -> &'static str {
        match self {
            Self::EnUs | Self::EnGb => "en",
            Self::PtBr => "pt",
            Self::DeDe => "de",
            Self::FrFr => "fr",
            Self::JaJp => "ja",
        }
    }

    /// Parses a locale tag such as `en-US`, `pt_BR` or `de_DE.UTF-8@euro`.
    ///
    /// Matching is case-insensitive; `_` and `-` are interchangeable and any
    /// encoding suffix or modifier is ignored.
    pub fn parse(tag: &str) -> Option<Self> {
        let base = tag
            .split(['.', '@'])
            .next()
            .unwrap_or_default()
            .trim()
            .replace('_', "-");

        Self::all()
            .iter()
            .copied()
            .find(|locale| locale.as_str().eq_ignore_ascii_case(&base))
    }

    /// Resolves the active locale using `lookup` to read environment variables.
    ///
    /// `LC_ALL`, `LC_MONETARY` and `LANG` are consulted in that order and the
    /// first non-empty value other than `C`/`POSIX` decides. An unrecognised
    /// value, or no value at all, falls back to en-US.
    pub fn from_env_with(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let Some((name, value)) = LOCALE_ENV_VARS.iter().find_map(|name| {
            lookup(*name)
                .filter(|v| !v.trim().is_empty())
                .filter(|v| !is_posix_locale(v))
                .map(|v| (*name, v))
        }) else {
            return Self::default();
        };

        Self::parse(&value).unwrap_or_else(|| {
            warn!(variable = name, %value, "unsupported locale; using en-US currency format");
            Self::default()
        })
    }
}

impl TryFrom<&str> for CurrencyLocale {
    type Error = CurrencyFormatError;

    fn try_from(tag: &str) -> Result<Self, Self::Error> {
        Self::parse(tag).ok_or_else(|| CurrencyFormatError::UnknownLocale(tag.to_string()))
    }
}

impl fmt::Display for CurrencyLocale {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn is_posix_locale(value: &str) -> bool {
    let base = value.split('.').next().unwrap_or_default();
    base == "C" || base == "POSIX"
}

/// Where the currency symbol sits relative to the number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolPosition {
    Prefix,
    Suffix,
}

/// Currency rendering conventions for one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormat {
    pub locale: CurrencyLocale,
    pub symbol: &'static str,
    pub position: SymbolPosition,
    /// Inserted between the symbol and the number (empty for none).
    pub symbol_spacing: &'static str,
    pub grouping_separator: char,
    pub decimal_separator: char,
    pub fraction_digits: u32,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::for_locale(CurrencyLocale::default())
    }
}

impl CurrencyFormat {
    pub fn for_locale(locale: CurrencyLocale) -> Self {
        match locale {
            CurrencyLocale::EnUs => Self {
                locale,
                symbol: "$",
                position: SymbolPosition::Prefix,
                symbol_spacing: "",
                grouping_separator: ',',
                decimal_separator: '.',
                fraction_digits: 2,
            },
            CurrencyLocale::EnGb => Self {
                locale,
                symbol: "£",
                position: SymbolPosition::Prefix,
                symbol_spacing: "",
                grouping_separator: ',',
                decimal_separator: '.',
                fraction_digits: 2,
            },
            CurrencyLocale::PtBr => Self {
                locale,
                symbol: "R$",
                position: SymbolPosition::Prefix,
                symbol_spacing: "\u{a0}",
                grouping_separator: '.',
                decimal_separator: ',',
                fraction_digits: 2,
            },
            CurrencyLocale::DeDe => Self {
                locale,
                symbol: "€",
                position: SymbolPosition::Suffix,
                symbol_spacing: "\u{a0}",
                grouping_separator: '.',
                decimal_separator: ',',
                fraction_digits: 2,
            },
            CurrencyLocale::FrFr => Self {
                locale,
                symbol: "€",
                position: SymbolPosition::Suffix,
                symbol_spacing: "\u{a0}",
                grouping_separator: '\u{202f}',
                decimal_separator: ',',
                fraction_digits: 2,
            },
            CurrencyLocale::JaJp => Self {
                locale,
                symbol: "￥",
                position: SymbolPosition::Prefix,
                symbol_spacing: "",
                grouping_separator: ',',
                decimal_separator: '.',
                fraction_digits: 0,
            },
        }
    }

    /// Looks up the format for a locale tag.
    pub fn for_tag(tag: &str) -> Result<Self, CurrencyFormatError> {
        CurrencyLocale::try_from(tag).map(Self::for_locale)
    }

    /// Renders `amount` as a currency string.
    ///
    /// The amount is rounded half-even to [`Self::fraction_digits`]. A
    /// negative amount puts the minus sign in front of the whole pattern
    /// (`-$15.00`) unless it rounds to zero. Amounts that cannot be held in a
    /// [`Decimal`] with all fraction digits, including infinities, keep their
    /// sign and symbol but show [`OVERFLOW_DIGITS`] (`$∞`). NaN renders as [`UNDEFINED_DISPLAY`].
    ///
    /// # Examples
    ///
    /// ```
    /// use tip_core::{CurrencyFormat, CurrencyLocale};
    ///
    /// let us = CurrencyFormat::for_locale(CurrencyLocale::EnUs);
    /// assert_eq!(us.format(1234.5), "$1,234.50");
    /// assert_eq!(us.format(-15.0), "-$15.00");
    /// assert_eq!(us.format(f64::INFINITY), "$∞");
    ///
    /// let de = CurrencyFormat::for_locale(CurrencyLocale::DeDe);
    /// assert_eq!(de.format(1234.5), "1.234,50\u{a0}€");
    /// ```
    pub fn format(
        &self,
        amount: f64,
    ) -> String {
        if amount.is_nan() {
            warn!(locale = %self.locale, "amount is not a number");
            return UNDEFINED_DISPLAY.to_string();
        }

        let negative = amount.is_sign_negative();
        let magnitude = amount.abs();

        let fixed = if magnitude < DECIMAL_LIMIT {
            Decimal::from_f64(magnitude)
                .map(|value| to_fixed_places(value, self.fraction_digits))
                .filter(|fixed| fixed.scale() == self.fraction_digits)
        } else {
            None
        };

        match fixed {
            Some(fixed) => {
                let number = self.localize_digits(&fixed.to_string());
                self.apply_pattern(negative && !fixed.is_zero(), &number)
            }
            None => {
                warn!(amount, locale = %self.locale, "amount exceeds the displayable range");
                self.apply_pattern(negative, OVERFLOW_DIGITS)
            }
        }
    }

    /// Swaps in the locale's separators for a plain `1234.56` digit string.
    fn localize_digits(
        &self,
        plain: &str,
    ) -> String {
        let (integer, fraction) = match plain.split_once('.') {
            Some((integer, fraction)) => (integer, Some(fraction)),
            None => (plain, None),
        };

        let mut out = String::with_capacity(plain.len() + integer.len() / 3 + 1);
        let len = integer.len();
        for (i, digit) in integer.chars().enumerate() {
            if i > 0 && (len - i) % 3 == 0 {
                out.push(self.grouping_separator);
            }
            out.push(digit);
        }
        if let Some(fraction) = fraction {
            out.push(self.decimal_separator);
            out.push_str(fraction);
        }
        out
    }

    fn apply_pattern(
        &self,
        negative: bool,
        number: &str,
    ) -> String {
        let sign = if negative { "-" } else { "" };
        match self.position {
            SymbolPosition::Prefix => format!("{sign}{}{}{number}", self.symbol, self.symbol_spacing),
            SymbolPosition::Suffix => format!("{sign}{number}{}{}", self.symbol_spacing, self.symbol),
        }
    }
}
