//! Domain types for the aging-curve explorer

pub mod curve;
pub mod player;
pub mod series;

pub use curve::{AgingCurve, AgingCurvePoint, DEFAULT_AGE_DOMAIN, MAX_AGE_FACTOR};
pub use player::{Backtest, PlayerInvariantError, PlayerRecord, SeasonPoint};
pub use series::{AxisRange, ChartSeries, ChartSpec, RenderStyle, SeriesKind};
