//! Integration tests that load the on-disk fixture configuration and drive a
//! screen built from it.

use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use tip_core::CurrencyLocale;
use tip_ui::{
    RecordingSurface, StringId,
    app::build_screen,
    config::{AppConfig, Overrides},
};

/// Path to the sample config shipped with the test fixtures.
fn fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("tip-time.toml")
}

fn no_env(_: &str) -> Option<String> {
    None
}

#[test]
fn test_load_fixture_file_succeeds() {
    let config = AppConfig::load(&fixture_path()).expect("fixture file should load without error");

    assert_eq!(config.tip_percent, Some(18.0));
    assert_eq!(config.locale.as_deref(), Some("pt-BR"));
    assert_eq!(config.logging.level.as_deref(), Some("debug"));
    assert_eq!(config.logging.file, Some(PathBuf::from("tip-time.log")));
    assert_eq!(config.strings.len(), 1);
}

#[test]
fn test_fixture_resolves_to_brazilian_settings() {
    let settings = AppConfig::load(&fixture_path())
        .unwrap()
        .resolve(Overrides::default(), no_env)
        .unwrap();

    assert_eq!(settings.calculator.tip_percent, 18.0);
    assert_eq!(settings.calculator.currency.locale, CurrencyLocale::PtBr);
    assert_eq!(settings.strings.get(StringId::CostOfService), "Valor da conta");
    assert_eq!(settings.strings.get(StringId::CalculateTip), "Calcular gorjeta");
}

#[test]
fn test_screen_from_fixture_renders_localized_tip() {
    let settings = AppConfig::load(&fixture_path())
        .unwrap()
        .resolve(Overrides::default(), no_env)
        .unwrap();
    let surface = RecordingSurface::new();
    let mut screen = build_screen(&settings, Box::new(surface.clone())).unwrap();

    let frame = screen.on_value_change("1000");

    assert_eq!(frame.field_label, "Valor da conta");
    assert_eq!(frame.tip, "R$\u{a0}180,00");
}

#[test]
fn test_cli_overrides_beat_fixture() {
    let overrides = Overrides {
        tip_percent: Some(10.0),
        locale: Some("en-US".to_string()),
        ..Default::default()
    };

    let settings = AppConfig::load(&fixture_path())
        .unwrap()
        .resolve(overrides, no_env)
        .unwrap();

    assert_eq!(settings.calculator.tip_percent, 10.0);
    assert_eq!(settings.calculator.currency.locale, CurrencyLocale::EnUs);
    // String overrides from the file still apply on top of the English table.
    assert_eq!(settings.strings.get(StringId::CostOfService), "Valor da conta");
}

#[test]
fn test_load_nonexistent_file_returns_err() {
    let result = AppConfig::load(Path::new("/this/path/does/not/exist.toml"));

    assert!(result.is_err());
}
