//! Chart view-models handed to a drawing backend.
//!
//! These are transient: a new set is derived on every selection change and the
//! previous set is dropped.

use serde::{Deserialize, Serialize};

/// How a series should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderStyle {
    /// Solid line through the points.
    Line,
    /// Dashed line through the points.
    DashedLine,
    /// Point markers only.
    Markers,
    /// A single emphasized marker.
    Highlight,
    /// A straight segment between exactly two points.
    Connector,
}

/// What a series represents. Frontends pick colors from this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesKind {
    Population,
    LeagueAverage,
    History,
    Forecast,
    CurveProjection,
    BacktestExpected,
    BacktestConnector,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub label: String,
    pub kind: SeriesKind,
    pub style: RenderStyle,
    pub points: Vec<(f64, f64)>,
}

impl ChartSeries {
    pub fn new(
        label: impl Into<String>,
        kind: SeriesKind,
        style: RenderStyle,
        points: Vec<(f64, f64)>,
    ) -> Self {
        Self {
            label: label.into(),
            kind,
            style,
            points,
        }
    }

    pub fn y_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|&(_, y)| y)
    }
}

/// Inclusive axis bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Tick positions from `min` to `max` every `step`.
    pub fn ticks(&self, step: f64) -> Vec<f64> {
        if step <= 0.0 || !step.is_finite() || self.span() < 0.0 {
            return vec![self.min];
        }
        let count = (self.span() / step).round() as usize;
        (0..=count).map(|i| self.min + step * i as f64).collect()
    }
}

/// Everything needed to draw one chart canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub x_axis: AxisRange,
    pub y_axis: AxisRange,
    /// Spacing between x ticks (ages are integer ticks).
    pub x_step: f64,
    /// Spacing between y gridlines.
    pub y_step: f64,
    pub series: Vec<ChartSeries>,
}

impl ChartSpec {
    pub fn series_of(&self, kind: SeriesKind) -> Option<&ChartSeries> {
        self.series.iter().find(|s| s.kind == kind)
    }
}
