//! Outlier rankings — players who beat or missed their prediction by the most.
//!
//! `delta = last observed wRC+ - predicted wRC+`. A player without a last
//! season or without a prediction has no delta and is left out, as is a delta
//! of exactly zero. Both lists are bounded to `top_n` and sorted stably, so
//! ties keep roster order.

use serde::{Deserialize, Serialize};

use crate::domain::PlayerRecord;

pub const DEFAULT_TOP_N: usize = 5;

/// Which value counts as the prediction a player is measured against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionPolicy {
    /// Backtest expected value, else the first forecast point.
    #[default]
    PreferBacktest,
    /// First forecast point only.
    FirstForecast,
}

/// Where a prediction came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionSource {
    Backtest,
    Forecast,
}

/// Which of the two lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingSide {
    Over,
    Under,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierDelta {
    pub actual: f64,
    pub predicted: f64,
    pub source: PredictionSource,
    pub delta: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry {
    /// Index into the roster this ranking was built from.
    pub player_index: usize,
    pub name: String,
    pub delta: f64,
    pub actual: f64,
    pub predicted: f64,
    pub source: PredictionSource,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutlierRankings {
    /// Largest positive deltas first.
    pub over: Vec<RankedEntry>,
    /// Most negative deltas first.
    pub under: Vec<RankedEntry>,
}

impl OutlierRankings {
    pub fn side(&self, side: RankingSide) -> &[RankedEntry] {
        match side {
            RankingSide::Over => &self.over,
            RankingSide::Under => &self.under,
        }
    }

    pub fn get(&self, side: RankingSide, position: usize) -> Option<&RankedEntry> {
        self.side(side).get(position)
    }
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingConfig {
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    #[serde(default)]
    pub prediction: PredictionPolicy,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            prediction: PredictionPolicy::default(),
        }
    }
}

/// Compute a player's delta, or `None` when it is not rankable.
pub fn outlier_delta(player: &PlayerRecord, policy: PredictionPolicy) -> Option<OutlierDelta> {
    let actual = player.last_season()?.performance_index;

    let backtest = player
        .backtest
        .map(|b| (b.expected_index, PredictionSource::Backtest));
    let forecast = player
        .first_forecast()
        .map(|f| (f.performance_index, PredictionSource::Forecast));

    let (predicted, source) = match policy {
        PredictionPolicy::PreferBacktest => backtest.or(forecast)?,
        PredictionPolicy::FirstForecast => forecast?,
    };

    let delta = actual - predicted;
    delta.is_finite().then_some(OutlierDelta {
        actual,
        predicted,
        source,
        delta,
    })
}

/// Build both lists from a roster.
pub fn rank_outliers(players: &[PlayerRecord], config: &RankingConfig) -> OutlierRankings {
    let entries: Vec<RankedEntry> = players
        .iter()
        .enumerate()
        .filter_map(|(i, p)| {
            outlier_delta(p, config.prediction).map(|d| RankedEntry {
                player_index: i,
                name: p.name.clone(),
                delta: d.delta,
                actual: d.actual,
                predicted: d.predicted,
                source: d.source,
            })
        })
        .collect();

    let mut over: Vec<RankedEntry> = entries.iter().filter(|e| e.delta > 0.0).cloned().collect();
    over.sort_by(|a, b| b.delta.total_cmp(&a.delta));
    over.truncate(config.top_n);

    let mut under: Vec<RankedEntry> = entries.into_iter().filter(|e| e.delta < 0.0).collect();
    under.sort_by(|a, b| a.delta.total_cmp(&b.delta));
    under.truncate(config.top_n);

    OutlierRankings { over, under }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Backtest, SeasonPoint};

    fn player(
        name: &str,
        last: Option<f64>,
        expected: Option<f64>,
        forecast: Option<f64>,
    ) -> PlayerRecord {
        PlayerRecord {
            name: name.into(),
            history: last
                .map(|v| vec![SeasonPoint { age: 30, performance_index: v }])
                .unwrap_or_default(),
            forecast: forecast
                .map(|v| vec![SeasonPoint { age: 31, performance_index: v }])
                .unwrap_or_default(),
            backtest: expected.map(|e| Backtest {
                age: 30,
                expected_index: e,
                actual_index: last.unwrap_or(e),
            }),
        }
    }

    #[test]
    fn backtest_expected_wins_over_forecast() {
        let p = player("A", Some(120.0), Some(105.0), Some(90.0));
        let d = outlier_delta(&p, PredictionPolicy::PreferBacktest).unwrap();
        assert_eq!(d.delta, 15.0);
        assert_eq!(d.source, PredictionSource::Backtest);

        let rankings = rank_outliers(&[p], &RankingConfig::default());
        assert_eq!(rankings.over.len(), 1);
        assert!(rankings.under.is_empty());
    }

    #[test]
    fn falls_back_to_first_forecast() {
        let p = player("B", Some(100.0), None, Some(110.0));
        let d = outlier_delta(&p, PredictionPolicy::PreferBacktest).unwrap();
        assert_eq!(d.delta, -10.0);
        assert_eq!(d.source, PredictionSource::Forecast);
    }

    #[test]
    fn first_forecast_policy_ignores_backtest() {
        let p = player("C", Some(120.0), Some(105.0), Some(125.0));
        let d = outlier_delta(&p, PredictionPolicy::FirstForecast).unwrap();
        assert_eq!(d.delta, -5.0);
        let no_forecast = player("D", Some(1.0), Some(2.0), None);
        assert!(outlier_delta(&no_forecast, PredictionPolicy::FirstForecast).is_none());
    }

    #[test]
    fn unrankable_players_are_excluded() {
        let roster = vec![
            player("no history", None, Some(100.0), Some(100.0)),
            player("no prediction", Some(120.0), None, None),
            player("even", Some(100.0), Some(100.0), None),
        ];
        let rankings = rank_outliers(&roster, &RankingConfig::default());
        assert!(rankings.over.is_empty());
        assert!(rankings.under.is_empty());
    }

    #[test]
    fn seven_players_split_by_sign() {
        let deltas = [20.0, 15.0, 10.0, 5.0, -5.0, -10.0, -20.0];
        let roster: Vec<PlayerRecord> = deltas
            .iter()
            .enumerate()
            .map(|(i, d)| player(&format!("P{i}"), Some(100.0 + d), Some(100.0), None))
            .collect();
        let rankings = rank_outliers(&roster, &RankingConfig::default());
        let over: Vec<f64> = rankings.over.iter().map(|e| e.delta).collect();
        let under: Vec<f64> = rankings.under.iter().map(|e| e.delta).collect();
        assert_eq!(over, vec![20.0, 15.0, 10.0, 5.0]);
        assert_eq!(under, vec![-20.0, -10.0, -5.0]);
    }

    #[test]
    fn lists_are_bounded_and_ties_keep_roster_order() {
        let roster: Vec<PlayerRecord> = (0..8)
            .map(|i| player(&format!("T{i}"), Some(110.0), Some(100.0), None))
            .collect();
        let rankings = rank_outliers(&roster, &RankingConfig::default());
        let names: Vec<&str> = rankings.over.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["T0", "T1", "T2", "T3", "T4"]);
        assert_eq!(rankings.get(RankingSide::Over, 2).unwrap().player_index, 2);
        assert!(rankings.get(RankingSide::Under, 0).is_none());
    }
}
