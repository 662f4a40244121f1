//! Terminal host for the tip screen.
//!
//! Each line read from the input is one text-change event carrying the full
//! replacement text of the "cost of service" field. Every event is rendered to
//! the output before the next line is read.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use tip_core::TipCalculator;
use tracing::{debug, info};

use crate::{
    config::Settings,
    screen::{DisplaySurface, ScreenFrame, TipTimeScreen},
};

/// Line that ends the interactive loop.
pub const QUIT_COMMAND: &str = ":q";

/// Writes each frame as a block of text followed by a blank line.
pub struct TerminalSurface<W: Write> {
    out: W,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> DisplaySurface for TerminalSurface<W> {
    fn present(
        &mut self,
        frame: &ScreenFrame,
    ) -> Result<()> {
        writeln!(self.out, "{frame}\n").context("failed to write frame")?;
        self.out.flush().context("failed to flush output")
    }
}

/// Builds the screen described by `settings`, drawing to `surface`.
pub fn build_screen(
    settings: &Settings,
    surface: Box<dyn DisplaySurface>,
) -> Result<TipTimeScreen> {
    let calculator = TipCalculator::new(settings.calculator.clone())?;
    Ok(TipTimeScreen::new(
        calculator,
        settings.strings.clone(),
        surface,
    ))
}

/// Feeds every line of `input` to `screen` until end of input or
/// [`QUIT_COMMAND`]. Returns the number of edits handled.
pub fn run_interactive(
    screen: &mut TipTimeScreen,
    input: impl BufRead,
) -> Result<usize> {
    info!(app = %screen.app_name(), "tip screen started");

    let mut edits = 0;
    for line in input.lines() {
        let line = line.context("failed to read input")?;
        let text = line.strip_suffix('\r').unwrap_or(&line);
        if text == QUIT_COMMAND {
            debug!("quit command received");
            break;
        }
        screen.on_value_change(text);
        edits += 1;
    }

    info!(edits, "tip screen closed");
    Ok(edits)
}

/// Computes the tip line for a single input and writes it to `out`.
pub fn run_once(
    settings: &Settings,
    amount: &str,
    mut out: impl Write,
) -> Result<()> {
    let calculator = TipCalculator::new(settings.calculator.clone())?;
    let tip = calculator.compute(amount);
    writeln!(out, "{}", settings.strings.format_tip_amount(&tip)).context("failed to write tip")
}
