pub mod app;
pub mod config;
pub mod logging;
pub mod screen;
pub mod strings;

pub use screen::{DisplaySurface, RecordingSurface, ScreenFrame, TipTimeScreen};
pub use strings::{StringId, StringTable};
