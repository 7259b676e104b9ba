//! Parrot/neon theme tokens for the AgeCurve TUI
//!
//! # Color Palette
//! - **Background**: Near-black / deep charcoal (base layer)
//! - **Accent**: Electric cyan (focus, population curve)
//! - **Positive**: Neon green (over-performers, actual values)
//! - **Negative**: Hot pink (under-performers, errors)
//! - **Warning**: Neon orange (backtest expected marker, warnings)
//! - **Neutral**: Cool purple (forecast, projection)
//! - **Muted**: Steel blue (axes, hints, disabled)

use ratatui::style::{Color, Modifier, Style};

use agecurve_core::domain::SeriesKind;

pub const BACKGROUND: Color = Color::Rgb(18, 18, 20);
pub const ACCENT: Color = Color::Rgb(0, 255, 255);
pub const POSITIVE: Color = Color::Rgb(0, 255, 128);
pub const NEGATIVE: Color = Color::Rgb(255, 20, 147);
pub const WARNING: Color = Color::Rgb(255, 140, 0);
pub const NEUTRAL: Color = Color::Rgb(147, 112, 219);
pub const MUTED: Color = Color::Rgb(100, 149, 237);
pub const TEXT_SECONDARY: Color = Color::Rgb(170, 170, 170);

/// Parrot/neon theme for the AgeCurve TUI
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: Color,
    pub accent: Color,
    pub positive: Color,
    pub negative: Color,
    pub warning: Color,
    pub neutral: Color,
    pub muted: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::parrot_neon()
    }
}

impl Theme {
    pub fn parrot_neon() -> Self {
        Self {
            background: BACKGROUND,
            accent: ACCENT,
            positive: POSITIVE,
            negative: NEGATIVE,
            warning: WARNING,
            neutral: NEUTRAL,
            muted: MUTED,
            text_primary: Color::White,
            text_secondary: TEXT_SECONDARY,
        }
    }

    /// Over-performance green, under-performance pink, zero secondary.
    pub fn delta_color(&self, delta: f64) -> Color {
        if delta > 0.0 {
            self.positive
        } else if delta < 0.0 {
            self.negative
        } else {
            self.text_secondary
        }
    }

    /// Line color for a chart series.
    pub fn series_color(&self, kind: SeriesKind) -> Color {
        match kind {
            SeriesKind::Population => self.accent,
            SeriesKind::LeagueAverage => self.muted,
            SeriesKind::History => self.text_primary,
            SeriesKind::Forecast => self.neutral,
            SeriesKind::CurveProjection => self.neutral,
            SeriesKind::BacktestExpected => self.warning,
            SeriesKind::BacktestConnector => self.positive,
        }
    }
}

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

pub fn neutral() -> Style {
    Style::default().fg(NEUTRAL)
}

pub fn warning() -> Style {
    Style::default().fg(WARNING)
}

pub fn negative() -> Style {
    Style::default().fg(NEGATIVE)
}

pub fn panel_border(active: bool) -> Style {
    if active {
        accent()
    } else {
        muted()
    }
}

pub fn panel_title(active: bool) -> Style {
    if active {
        accent_bold()
    } else {
        muted()
    }
}
