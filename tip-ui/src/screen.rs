//! The tip screen: one "cost of service" field and the derived tip line.
//!
//! [`TipTimeScreen`] owns the [`InputState`] and subscribes to it, so every
//! edit is recomputed and pushed to the [`DisplaySurface`] before the edit
//! call returns. [`TipTimeScreen::recompute`] does the same on demand.

use std::{cell::RefCell, fmt, rc::Rc};

use anyhow::Result;
use tip_core::{InputState, TipCalculator};
use tracing::debug;

use crate::{
    logging::log_task_error,
    strings::{StringId, StringTable},
};

/// Everything the screen displays after one recomputation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenFrame {
    /// 1-based count of frames rendered by the screen.
    pub sequence: u64,
    pub title: String,
    pub field_label: String,
    /// The raw input text, exactly as typed.
    pub input: String,
    /// The tip rendered as a currency string.
    pub tip: String,
    /// The tip interpolated into the `tip_amount` template.
    pub tip_line: String,
}

impl fmt::Display for ScreenFrame {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}: {}", self.field_label, self.input)?;
        write!(f, "{}", self.tip_line)
    }
}

/// Where frames are pushed. Implemented by the host.
pub trait DisplaySurface {
    fn present(
        &mut self,
        frame: &ScreenFrame,
    ) -> Result<()>;
}

/// A surface that keeps every frame it is given.
///
/// Clones share the same frame list, so one clone can be handed to the screen
/// while another is kept for inspection.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    frames: Rc<RefCell<Vec<ScreenFrame>>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> Vec<ScreenFrame> {
        self.frames.borrow().clone()
    }

    /// The tip lines of all recorded frames, oldest first.
    pub fn tip_lines(&self) -> Vec<String> {
        self.frames
            .borrow()
            .iter()
            .map(|frame| frame.tip_line.clone())
            .collect()
    }
}

impl DisplaySurface for RecordingSurface {
    fn present(
        &mut self,
        frame: &ScreenFrame,
    ) -> Result<()> {
        self.frames.borrow_mut().push(frame.clone());
        Ok(())
    }
}

struct Presenter {
    calculator: TipCalculator,
    strings: StringTable,
    surface: Box<dyn DisplaySurface>,
    sequence: u64,
    last_frame: Option<ScreenFrame>,
}

impl Presenter {
    fn render(
        &mut self,
        text: &str,
    ) -> ScreenFrame {
        self.sequence += 1;
        let tip = self.calculator.compute(text);
        let frame = ScreenFrame {
            sequence: self.sequence,
            title: self.strings.get(StringId::CalculateTip).to_string(),
            field_label: self.strings.get(StringId::CostOfService).to_string(),
            input: text.to_string(),
            tip_line: self.strings.format_tip_amount(&tip),
            tip,
        };

        debug!(sequence = frame.sequence, tip = %frame.tip, "presenting frame");
        log_task_error("present frame", self.surface.present(&frame));

        self.last_frame = Some(frame.clone());
        frame
    }
}

/// The composed tip screen.
pub struct TipTimeScreen {
    input: InputState,
    presenter: Rc<RefCell<Presenter>>,
}

impl TipTimeScreen {
    /// Builds the screen and presents the initial frame for the empty input.
    pub fn new(
        calculator: TipCalculator,
        strings: StringTable,
        surface: Box<dyn DisplaySurface>,
    ) -> Self {
        let presenter = Rc::new(RefCell::new(Presenter {
            calculator,
            strings,
            surface,
            sequence: 0,
            last_frame: None,
        }));

        let mut input = InputState::new();
        let listener = Rc::clone(&presenter);
        input.subscribe(move |text: &str| {
            listener.borrow_mut().render(text);
        });

        let screen = Self { input, presenter };
        screen.recompute();
        screen
    }

    /// Handles a text-change event carrying the full replacement text.
    pub fn on_value_change(
        &mut self,
        text: impl Into<String>,
    ) -> ScreenFrame {
        self.input.set(text);
        self.current_frame()
    }

    /// Recomputes and presents a frame from the current input.
    pub fn recompute(&self) -> ScreenFrame {
        self.presenter.borrow_mut().render(self.input.get())
    }

    pub fn input(&self) -> &str {
        self.input.get()
    }

    pub fn revision(&self) -> u64 {
        self.input.revision()
    }

    /// The most recently presented frame.
    pub fn current_frame(&self) -> ScreenFrame {
        let last = self.presenter.borrow().last_frame.clone();
        last.unwrap_or_else(|| self.recompute())
    }

    pub fn app_name(&self) -> String {
        self.presenter
            .borrow()
            .strings
            .get(StringId::AppName)
            .to_string()
    }
}

impl fmt::Debug for TipTimeScreen {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("TipTimeScreen")
            .field("input", &self.input)
            .field("calculator", &self.presenter.borrow().calculator)
            .finish_non_exhaustive()
    }
}
