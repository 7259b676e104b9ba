//! Player detail chart — league average, history, forecast, backtest.
//!
//! The plotter is one parameterized implementation; the axis policy, backtest
//! overlay and curve projection are options rather than separate code paths.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::axis::AxisPolicy;
use crate::domain::{
    AgingCurve, AxisRange, ChartSeries, ChartSpec, PlayerRecord, RenderStyle, SeasonPoint,
    SeriesKind, DEFAULT_AGE_DOMAIN,
};

/// League-average wRC+.
pub const LEAGUE_AVERAGE: f64 = 100.0;
pub const CONNECTOR_LABEL: &str = "Expected -> Actual";

fn default_true() -> bool {
    true
}

fn default_league_average() -> f64 {
    LEAGUE_AVERAGE
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotterConfig {
    /// Draw the backtest marker and connector when a player has one.
    #[serde(default = "default_true")]
    pub show_backtest: bool,
    #[serde(default = "default_league_average")]
    pub league_average: f64,
    /// Derive a forecast from the population curve when a player has none.
    #[serde(default)]
    pub project_missing_forecast: bool,
    #[serde(default)]
    pub axis: AxisPolicy,
}

impl Default for PlotterConfig {
    fn default() -> Self {
        Self {
            show_backtest: true,
            league_average: LEAGUE_AVERAGE,
            project_missing_forecast: false,
            axis: AxisPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PlayerPlotter {
    config: PlotterConfig,
}

impl PlayerPlotter {
    pub fn new(config: PlotterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PlotterConfig {
        &self.config
    }

    /// Build the complete chart for one player.
    ///
    /// Always contains the league-average line; history, forecast and the
    /// backtest pair are included only when the player has them.
    pub fn plot(&self, player: &PlayerRecord, curve: &AgingCurve) -> ChartSpec {
        let mut series = Vec::with_capacity(5);

        let projection = if self.config.project_missing_forecast && player.forecast.is_empty() {
            project_forecast(player, curve)
        } else {
            Vec::new()
        };

        let (lo, hi) = age_domain(player, curve);
        let avg = self.config.league_average;
        series.push(ChartSeries::new(
            format!("League Average ({avg:.0})"),
            SeriesKind::LeagueAverage,
            RenderStyle::Line,
            vec![(lo as f64, avg), (hi as f64, avg)],
        ));

        if !player.history.is_empty() {
            series.push(ChartSeries::new(
                format!("{} (History)", player.name),
                SeriesKind::History,
                RenderStyle::Markers,
                to_points(&player.history),
            ));
        }

        if !player.forecast.is_empty() {
            series.push(ChartSeries::new(
                format!("{} (Forecast)", player.name),
                SeriesKind::Forecast,
                RenderStyle::DashedLine,
                to_points(&player.forecast),
            ));
        } else if !projection.is_empty() {
            series.push(ChartSeries::new(
                format!("{} (Curve Projection)", player.name),
                SeriesKind::CurveProjection,
                RenderStyle::DashedLine,
                to_points(&projection),
            ));
        }

        if let Some(bt) = player.backtest.filter(|_| self.config.show_backtest) {
            let age = bt.age as f64;
            series.push(ChartSeries::new(
                format!("{} (Expected @ {})", player.name, bt.age),
                SeriesKind::BacktestExpected,
                RenderStyle::Highlight,
                vec![(age, bt.expected_index)],
            ));
            series.push(ChartSeries::new(
                CONNECTOR_LABEL,
                SeriesKind::BacktestConnector,
                RenderStyle::Connector,
                vec![(age, bt.expected_index), (age, bt.actual_index)],
            ));
        }

        let y_axis = self
            .config
            .axis
            .range(series.iter().flat_map(|s| s.y_values()));

        debug!(
            "plotted {}: {} series, y [{}, {}]",
            player.name,
            series.len(),
            y_axis.min,
            y_axis.max
        );

        ChartSpec {
            title: player.name.clone(),
            x_label: "Age".into(),
            y_label: "wRC+".into(),
            x_axis: AxisRange::new(lo as f64, hi as f64),
            y_axis,
            x_step: 1.0,
            y_step: self.config.axis.step(),
            series,
        }
    }
}

fn to_points(seasons: &[SeasonPoint]) -> Vec<(f64, f64)> {
    seasons
        .iter()
        .map(|s| (s.age as f64, s.performance_index))
        .collect()
}

/// Union of the curve's ages and the player's ages.
fn age_domain(player: &PlayerRecord, curve: &AgingCurve) -> (u32, u32) {
    let curve_ages = curve.age_domain().into_iter().flat_map(|(lo, hi)| [lo, hi]);
    let (lo, hi) = player
        .ages()
        .chain(curve_ages)
        .fold((u32::MAX, u32::MIN), |(lo, hi), a| (lo.min(a), hi.max(a)));
    if lo > hi {
        DEFAULT_AGE_DOMAIN
    } else {
        (lo, hi)
    }
}

/// Scale the last observed index along the curve for every later curve age:
/// `last.index * factor(age) / factor(last.age)`.
pub fn project_forecast(player: &PlayerRecord, curve: &AgingCurve) -> Vec<SeasonPoint> {
    let Some(last) = player.last_season() else {
        return Vec::new();
    };
    let base = match curve.factor_at(last.age) {
        Some(f) if f > 0.0 => f,
        _ => return Vec::new(),
    };
    curve
        .points()
        .iter()
        .filter(|p| p.age > last.age)
        .map(|p| SeasonPoint {
            age: p.age,
            performance_index: last.performance_index * p.age_factor / base,
        })
        .filter(|s| s.performance_index.is_finite())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AgingCurvePoint, Backtest};

    fn season(age: u32, performance_index: f64) -> SeasonPoint {
        SeasonPoint { age, performance_index }
    }

    fn curve() -> AgingCurve {
        AgingCurve::from_points(
            (20..=40)
                .map(|age| AgingCurvePoint {
                    age,
                    age_factor: if age <= 27 { 1.0 } else { 0.9 },
                })
                .collect(),
        )
    }

    fn trout() -> PlayerRecord {
        PlayerRecord {
            name: "Mike Trout".into(),
            history: vec![season(29, 80.0), season(30, 115.0)],
            forecast: vec![season(31, 130.0)],
            backtest: Some(Backtest {
                age: 30,
                expected_index: 105.0,
                actual_index: 115.0,
            }),
        }
    }

    #[test]
    fn five_series_with_backtest() {
        let spec = PlayerPlotter::default().plot(&trout(), &curve());
        let kinds: Vec<SeriesKind> = spec.series.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SeriesKind::LeagueAverage,
                SeriesKind::History,
                SeriesKind::Forecast,
                SeriesKind::BacktestExpected,
                SeriesKind::BacktestConnector,
            ]
        );
        let forecast = spec.series_of(SeriesKind::Forecast).unwrap();
        assert_eq!(forecast.style, RenderStyle::DashedLine);
        let history = spec.series_of(SeriesKind::History).unwrap();
        assert_eq!(history.style, RenderStyle::Markers);
        let connector = spec.series_of(SeriesKind::BacktestConnector).unwrap();
        assert_eq!(connector.points, vec![(30.0, 105.0), (30.0, 115.0)]);
    }

    #[test]
    fn series_labels_are_ascii() {
        let spec = PlayerPlotter::default().plot(&trout(), &curve());
        for series in &spec.series {
            assert!(series.label.is_ascii(), "{}", series.label);
        }
        assert_eq!(
            spec.series_of(SeriesKind::BacktestConnector).unwrap().label,
            "Expected -> Actual"
        );
    }

    #[test]
    fn dynamic_axis_covers_all_values() {
        let spec = PlayerPlotter::default().plot(&trout(), &curve());
        assert_eq!(spec.y_axis, AxisRange::new(70.0, 140.0));
        assert_eq!(spec.y_step, 10.0);
    }

    #[test]
    fn league_average_spans_full_age_domain() {
        let spec = PlayerPlotter::default().plot(&trout(), &curve());
        let league = spec.series_of(SeriesKind::LeagueAverage).unwrap();
        assert_eq!(league.points, vec![(20.0, 100.0), (40.0, 100.0)]);
        assert_eq!(spec.x_axis, AxisRange::new(20.0, 40.0));
    }

    #[test]
    fn empty_player_degenerates_to_90_110() {
        let empty = PlayerRecord {
            name: "Nobody".into(),
            history: vec![],
            forecast: vec![],
            backtest: None,
        };
        let spec = PlayerPlotter::default().plot(&empty, &AgingCurve::default());
        assert_eq!(spec.series.len(), 1);
        assert_eq!(spec.y_axis, AxisRange::new(90.0, 110.0));
        assert_eq!(spec.x_axis, AxisRange::new(20.0, 40.0));
    }

    #[test]
    fn hidden_backtest_is_excluded_from_series_and_axis() {
        let mut player = trout();
        player.backtest = Some(Backtest {
            age: 30,
            expected_index: 40.0,
            actual_index: 115.0,
        });
        let plotter = PlayerPlotter::new(PlotterConfig {
            show_backtest: false,
            ..PlotterConfig::default()
        });
        let spec = plotter.plot(&player, &curve());
        assert!(spec.series_of(SeriesKind::BacktestExpected).is_none());
        assert_eq!(spec.y_axis.min, 70.0);
    }

    #[test]
    fn fixed_axis_policy() {
        let plotter = PlayerPlotter::new(PlotterConfig {
            axis: AxisPolicy::Fixed { min: 50.0, max: 200.0 },
            ..PlotterConfig::default()
        });
        let spec = plotter.plot(&trout(), &curve());
        assert_eq!(spec.y_axis, AxisRange::new(50.0, 200.0));
    }

    #[test]
    fn projection_scales_by_curve_ratio() {
        let player = PlayerRecord {
            name: "Young".into(),
            history: vec![season(26, 120.0), season(27, 130.0)],
            forecast: vec![],
            backtest: None,
        };
        let plotter = PlayerPlotter::new(PlotterConfig {
            project_missing_forecast: true,
            ..PlotterConfig::default()
        });
        let spec = plotter.plot(&player, &curve());
        let projection = spec.series_of(SeriesKind::CurveProjection).unwrap();
        assert_eq!(projection.points.first(), Some(&(28.0, 117.0)));
        assert_eq!(projection.points.len(), 13);
    }

    #[test]
    fn projection_not_used_when_forecast_exists() {
        let plotter = PlayerPlotter::new(PlotterConfig {
            project_missing_forecast: true,
            ..PlotterConfig::default()
        });
        let spec = plotter.plot(&trout(), &curve());
        assert!(spec.series_of(SeriesKind::CurveProjection).is_none());
    }

    #[test]
    fn projection_needs_last_age_on_curve() {
        let player = PlayerRecord {
            name: "Veteran".into(),
            history: vec![season(45, 90.0)],
            forecast: vec![],
            backtest: None,
        };
        assert!(project_forecast(&player, &curve()).is_empty());
    }
}
