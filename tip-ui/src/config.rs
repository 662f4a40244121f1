//! Application configuration.
//!
//! Settings come from three places, highest priority first: command-line
//! overrides, an optional TOML file, and the environment (for the locale).
//!
//! ## File format
//!
//! Every key is optional.
//!
//! ```toml
//! tip_percent = 15.0
//! locale = "en-US"
//!
//! [logging]
//! level = "info"
//! stdout = false
//! file = "tip-time.log"
//!
//! [strings]
//! tip_amount = "Tip: %s"
//! ```

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tip_core::{
    CalculatorConfigError, CurrencyFormat, CurrencyFormatError, CurrencyLocale,
    DEFAULT_TIP_PERCENT, TipCalculatorConfig,
};
use tracing::debug;

use crate::{
    logging::LogOptions,
    strings::{StringTable, StringTableError},
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    Locale(#[from] CurrencyFormatError),

    #[error(transparent)]
    Calculator(#[from] CalculatorConfigError),

    #[error(transparent)]
    Strings(#[from] StringTableError),
}

/// Contents of the TOML config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub tip_percent: Option<f64>,
    pub locale: Option<String>,
    pub logging: LoggingConfig,
    /// Replacement display strings keyed by identifier.
    pub strings: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub stdout: bool,
    pub file: Option<PathBuf>,
}

/// Values given on the command line; `None` leaves the file/default value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub tip_percent: Option<f64>,
    pub locale: Option<String>,
    pub log_level: Option<String>,
    pub log_stdout: Option<bool>,
    pub log_file: Option<PathBuf>,
}

/// Fully resolved settings the application runs with.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub calculator: TipCalculatorConfig,
    pub strings: StringTable,
    pub logging: LogOptions,
}

impl AppConfig {
    /// Reads and parses a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, path)
    }

    /// Parses config text; `path` is only used in error messages.
    pub fn parse(
        text: &str,
        path: &Path,
    ) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads `path` if given, otherwise returns the empty configuration.
    pub fn load_optional(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Applies `overrides` and resolves the locale.
    ///
    /// `env` reads environment variables and is only consulted when neither
    /// the overrides nor the file name a locale.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for an unknown locale named explicitly, an
    /// invalid tip percent, or an invalid string override.
    pub fn resolve(
        self,
        overrides: Overrides,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Settings, ConfigError> {
        let locale = match overrides.locale.or(self.locale) {
            Some(tag) => CurrencyLocale::try_from(tag.as_str())?,
            None => CurrencyLocale::from_env_with(env),
        };

        let calculator = TipCalculatorConfig {
            tip_percent: overrides
                .tip_percent
                .or(self.tip_percent)
                .unwrap_or(DEFAULT_TIP_PERCENT),
            currency: CurrencyFormat::for_locale(locale),
        };
        calculator.validate()?;

        let strings = StringTable::for_locale(locale).with_overrides(
            self.strings
                .iter()
                .map(|(key, text)| (key.as_str(), text.as_str())),
        )?;

        let logging = LogOptions {
            level: overrides.log_level.or(self.logging.level),
            stdout: overrides.log_stdout.unwrap_or(self.logging.stdout),
            file: overrides.log_file.or(self.logging.file),
        };

        debug!(
            %locale,
            tip_percent = calculator.tip_percent,
            "configuration resolved"
        );

        Ok(Settings {
            calculator,
            strings,
            logging,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::strings::StringId;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn parse(text: &str) -> Result<AppConfig, ConfigError> {
        AppConfig::parse(text, Path::new("test.toml"))
    }

    #[test]
    fn empty_file_uses_defaults() {
        let settings = parse("").unwrap().resolve(Overrides::default(), no_env).unwrap();

        assert_eq!(settings.calculator, TipCalculatorConfig::default());
        assert_eq!(settings.strings, StringTable::english());
        assert_eq!(settings.logging, LogOptions::default());
    }

    #[test]
    fn file_values_are_applied() {
        let config = parse(
            r#"
            tip_percent = 20.0
            locale = "de-DE"

            [logging]
            level = "debug"
            stdout = true
            file = "tips.log"
            "#,
        )
        .unwrap();

        let settings = config.resolve(Overrides::default(), no_env).unwrap();

        assert_eq!(settings.calculator.tip_percent, 20.0);
        assert_eq!(settings.calculator.currency.locale, CurrencyLocale::DeDe);
        assert_eq!(
            settings.logging,
            LogOptions {
                level: Some("debug".to_string()),
                stdout: true,
                file: Some(PathBuf::from("tips.log")),
            }
        );
    }

    #[test]
    fn overrides_win_over_file() {
        let config = parse("tip_percent = 20.0\nlocale = \"de-DE\"").unwrap();
        let overrides = Overrides {
            tip_percent: Some(18.0),
            locale: Some("en_GB".to_string()),
            log_stdout: Some(true),
            ..Default::default()
        };

        let settings = config.resolve(overrides, no_env).unwrap();

        assert_eq!(settings.calculator.tip_percent, 18.0);
        assert_eq!(settings.calculator.currency.locale, CurrencyLocale::EnGb);
        assert!(settings.logging.stdout);
    }

    #[test]
    fn environment_locale_used_when_unset() {
        let env = |name: &str| (name == "LANG").then(|| "pt_BR.UTF-8".to_string());

        let settings = AppConfig::default().resolve(Overrides::default(), env).unwrap();

        assert_eq!(settings.calculator.currency.locale, CurrencyLocale::PtBr);
        assert_eq!(settings.strings.get(StringId::CalculateTip), "Calcular gorjeta");
    }

    #[test]
    fn explicit_unknown_locale_is_an_error() {
        let config = parse("locale = \"xx-XX\"").unwrap();

        let result = config.resolve(Overrides::default(), no_env);

        assert!(matches!(
            result,
            Err(ConfigError::Locale(CurrencyFormatError::UnknownLocale(tag))) if tag == "xx-XX"
        ));
    }

    #[test]
    fn negative_tip_percent_is_an_error() {
        let result = AppConfig::default().resolve(
            Overrides {
                tip_percent: Some(-1.0),
                ..Default::default()
            },
            no_env,
        );

        assert!(matches!(
            result,
            Err(ConfigError::Calculator(CalculatorConfigError::NegativeTipPercent(_)))
        ));
    }

    #[test]
    fn string_overrides_are_applied() {
        let config = parse("[strings]\ntip_amount = \"Tip: %s\"").unwrap();

        let settings = config.resolve(Overrides::default(), no_env).unwrap();

        assert_eq!(settings.strings.format_tip_amount("$1.00"), "Tip: $1.00");
    }

    #[test]
    fn unknown_string_id_is_an_error() {
        let config = parse("[strings]\ntip_total = \"x\"").unwrap();

        let result = config.resolve(Overrides::default(), no_env);

        assert!(matches!(result, Err(ConfigError::Strings(_))));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result = parse("tip_rate = 10.0");

        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn load_optional_without_path_is_default() {
        assert_eq!(AppConfig::load_optional(None).unwrap(), AppConfig::default());
    }

    #[test]
    fn load_missing_file_reports_path() {
        let error = AppConfig::load(Path::new("/this/path/does/not/exist.toml")).unwrap_err();

        assert!(error.to_string().contains("/this/path/does/not/exist.toml"));
    }
}
