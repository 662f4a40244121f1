use std::{io, path::PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing::debug;

use tip_ui::{
    app::{self, TerminalSurface},
    config::{AppConfig, Overrides},
    logging,
};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Tip calculator.
///
/// Reads the cost of service from stdin, one edit per line (each line is the
/// full field text), and prints the tip after every edit. Enter `:q` or close
/// stdin to quit.
#[derive(Debug, Parser)]
#[command(name = "TipTime", version, about)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Tip percent to apply, e.g. 15 for 15 %.
    #[arg(short, long)]
    percent: Option<f64>,

    /// Currency locale such as `en-US` or `pt-BR`.
    /// Defaults to the config file, then LC_ALL / LC_MONETARY / LANG.
    #[arg(short, long)]
    locale: Option<String>,

    /// Compute the tip for this cost, print it and exit.
    #[arg(short, long, allow_hyphen_values = true)]
    amount: Option<String>,

    /// Log level or `EnvFilter` directive. `RUST_LOG` takes precedence.
    #[arg(long)]
    log_level: Option<String>,

    /// Append log records to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Also write log records to stdout.
    #[arg(long)]
    log_stdout: bool,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            tip_percent: self.percent,
            locale: self.locale.clone(),
            log_level: self.log_level.clone(),
            log_stdout: self.log_stdout.then_some(true),
            log_file: self.log_file.clone(),
        }
    }
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = AppConfig::load_optional(cli.config.as_deref())?
        .resolve(cli.overrides(), |name| std::env::var(name).ok())
        .context("invalid configuration")?;

    logging::init_logging(&settings.logging);
    if let Some(path) = &settings.logging.file {
        logging::enable_file_logging(path)?;
    }
    debug!(?settings, "starting {}", logging::app_name());

    if let Some(amount) = &cli.amount {
        return app::run_once(&settings, amount, io::stdout().lock());
    }

    let mut screen = app::build_screen(&settings, Box::new(TerminalSurface::new(io::stdout())))?;
    app::run_interactive(&mut screen, io::stdin().lock())?;

    logging::disable_file_logging();
    Ok(())
}
