//! String resources for the tip screen.
//!
//! Labels and message templates are looked up by [`StringId`]; the screen only
//! interpolates the formatted tip into the `tip_amount` template.

use std::{collections::HashMap, fmt};

use thiserror::Error;
use tip_core::CurrencyLocale;

/// Placeholder replaced by a value in message templates.
pub const PLACEHOLDER: &str = "%s";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StringTableError {
    #[error("unknown string identifier '{0}'")]
    UnknownId(String),

    #[error("template '{id}' must contain the %s placeholder")]
    MissingPlaceholder { id: StringId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StringId {
    AppName,
    CalculateTip,
    CostOfService,
    TipAmount,
}

impl StringId {
    pub fn all() -> &'static [StringId] {
        &[
            StringId::AppName,
            StringId::CalculateTip,
            StringId::CostOfService,
            StringId::TipAmount,
        ]
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::AppName => "app_name",
            Self::CalculateTip => "calculate_tip",
            Self::CostOfService => "cost_of_service",
            Self::TipAmount => "tip_amount",
        }
    }

    pub fn parse(key: &str) -> Option<Self> {
        Self::all().iter().copied().find(|id| id.key() == key)
    }

    /// Whether the resource is a template that takes a value.
    pub fn is_template(&self) -> bool {
        matches!(self, Self::TipAmount)
    }
}

impl fmt::Display for StringId {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Lookup table from [`StringId`] to display text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringTable {
    entries: HashMap<StringId, String>,
}

impl Default for StringTable {
    fn default() -> Self {
        Self::english()
    }
}

impl StringTable {
    pub fn english() -> Self {
        Self::from_pairs(&[
            (StringId::AppName, "Tip Time"),
            (StringId::CalculateTip, "Calculate Tip"),
            (StringId::CostOfService, "Cost of Service"),
            (StringId::TipAmount, "Tip Amount: %s"),
        ])
    }

    pub fn portuguese() -> Self {
        Self::from_pairs(&[
            (StringId::AppName, "Tip Time"),
            (StringId::CalculateTip, "Calcular gorjeta"),
            (StringId::CostOfService, "Custo do serviço"),
            (StringId::TipAmount, "Valor da gorjeta: %s"),
        ])
    }

    /// Picks the table matching the locale's language, English otherwise.
    pub fn for_locale(locale: CurrencyLocale) -> Self {
        match locale.language() {
            "pt" => Self::portuguese(),
            _ => Self::english(),
        }
    }

    fn from_pairs(pairs: &[(StringId, &str)]) -> Self {
        Self {
            entries: pairs
                .iter()
                .map(|(id, text)| (*id, (*text).to_string()))
                .collect(),
        }
    }

    /// Replaces entries with `overrides`, keyed by identifier (`"tip_amount"`).
    ///
    /// # Errors
    ///
    /// Fails on an unknown identifier or a template without [`PLACEHOLDER`].
    pub fn with_overrides<'a>(
        mut self,
        overrides: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self, StringTableError> {
        let mut parsed = Vec::new();
        for (key, text) in overrides {
            let id =
                StringId::parse(key).ok_or_else(|| StringTableError::UnknownId(key.to_string()))?;
            if id.is_template() && !text.contains(PLACEHOLDER) {
                return Err(StringTableError::MissingPlaceholder { id });
            }
            parsed.push((id, text.to_string()));
        }
        self.entries.extend(parsed);
        Ok(self)
    }

    pub fn get(
        &self,
        id: StringId,
    ) -> &str {
        self.entries.get(&id).map(String::as_str).unwrap_or(id.key())
    }

    /// Interpolates a formatted tip into the `tip_amount` template.
    pub fn format_tip_amount(
        &self,
        value: &str,
    ) -> String {
        self.get(StringId::TipAmount).replacen(PLACEHOLDER, value, 1)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn english_table_has_every_id() {
        let table = StringTable::english();

        for id in StringId::all() {
            assert_ne!(table.get(*id), id.key(), "missing text for {id}");
        }
    }

    #[test]
    fn portuguese_table_has_every_id() {
        let table = StringTable::portuguese();

        for id in StringId::all() {
            assert_ne!(table.get(*id), id.key(), "missing text for {id}");
        }
    }

    #[test]
    fn key_round_trips_through_parse() {
        for id in StringId::all() {
            assert_eq!(StringId::parse(id.key()), Some(*id));
        }
        assert_eq!(StringId::parse("nope"), None);
    }

    #[test]
    fn format_tip_amount_interpolates_value() {
        let table = StringTable::english();

        assert_eq!(table.format_tip_amount("$30.00"), "Tip Amount: $30.00");
    }

    #[test]
    fn for_locale_selects_by_language() {
        assert_eq!(StringTable::for_locale(CurrencyLocale::PtBr), StringTable::portuguese());
        assert_eq!(StringTable::for_locale(CurrencyLocale::DeDe), StringTable::english());
    }

    #[test]
    fn with_overrides_replaces_entries() {
        let table = StringTable::english()
            .with_overrides([("tip_amount", "Tip: %s"), ("calculate_tip", "Tips")])
            .unwrap();

        assert_eq!(table.format_tip_amount("$1.50"), "Tip: $1.50");
        assert_eq!(table.get(StringId::CalculateTip), "Tips");
        assert_eq!(table.get(StringId::CostOfService), "Cost of Service");
    }

    #[test]
    fn with_overrides_rejects_unknown_id() {
        let result = StringTable::english().with_overrides([("tip_total", "x")]);

        assert_eq!(result, Err(StringTableError::UnknownId("tip_total".to_string())));
    }

    #[test]
    fn with_overrides_requires_placeholder_in_template() {
        let result = StringTable::english().with_overrides([("tip_amount", "Tip!")]);

        assert_eq!(
            result,
            Err(StringTableError::MissingPlaceholder {
                id: StringId::TipAmount
            })
        );
    }
}
