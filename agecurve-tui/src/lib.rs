//! AgeCurve TUI - terminal explorer for player aging curves
//!
//! Provides interactive exploration of the loaded roster with:
//! - Population aging curve
//! - Per-player history, forecast and backtest chart
//! - Over- and under-performer rankings
//! - Live name search

pub mod app;
pub mod input;
pub mod theme;
pub mod ui;
pub mod worker;

pub use app::AppState;
pub use input::handle_key;
pub use theme::Theme;

#[cfg(test)]
mod test_helpers;
