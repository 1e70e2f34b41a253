pub mod progress;
pub mod tui;
