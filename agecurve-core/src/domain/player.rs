//! Player records — observed seasons, model forecast, optional backtest.

use serde::{Deserialize, Serialize};

/// A single season's performance index (wRC+, 100 = league average).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeasonPoint {
    pub age: u32,
    pub performance_index: f64,
}

/// Model expectation at one age compared with what was actually observed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Backtest {
    pub age: u32,
    pub expected_index: f64,
    pub actual_index: f64,
}

/// One player. `name` is the lookup key and is unique within a roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub name: String,
    pub history: Vec<SeasonPoint>,
    pub forecast: Vec<SeasonPoint>,
    pub backtest: Option<Backtest>,
}

/// Why a record violates the player invariants.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlayerInvariantError {
    #[error("empty name")]
    EmptyName,

    #[error("non-finite value at age {age}")]
    NonFinite { age: u32 },

    #[error("history ages are not strictly increasing at age {age}")]
    HistoryOrder { age: u32 },

    #[error("forecast ages are not strictly increasing at age {age}")]
    ForecastOrder { age: u32 },

    #[error("forecast age {age} overlaps history")]
    Overlap { age: u32 },

    #[error("forecast age {age} is not after the last observed season")]
    ForecastNotFuture { age: u32 },
}

impl PlayerRecord {
    /// Most recent observed season.
    pub fn last_season(&self) -> Option<&SeasonPoint> {
        self.history.last()
    }

    /// First forecast season.
    pub fn first_forecast(&self) -> Option<&SeasonPoint> {
        self.forecast.first()
    }

    /// Every age this player has a data point for.
    pub fn ages(&self) -> impl Iterator<Item = u32> + '_ {
        self.history
            .iter()
            .chain(self.forecast.iter())
            .map(|s| s.age)
            .chain(self.backtest.iter().map(|b| b.age))
    }

    /// Check names, finiteness, ordering and history/forecast separation.
    ///
    /// History may skip seasons (missed years); it only has to increase.
    pub fn validate(&self) -> Result<(), PlayerInvariantError> {
        if self.name.trim().is_empty() {
            return Err(PlayerInvariantError::EmptyName);
        }

        for s in self.history.iter().chain(self.forecast.iter()) {
            if !s.performance_index.is_finite() {
                return Err(PlayerInvariantError::NonFinite { age: s.age });
            }
        }
        if let Some(b) = &self.backtest {
            if !b.expected_index.is_finite() || !b.actual_index.is_finite() {
                return Err(PlayerInvariantError::NonFinite { age: b.age });
            }
        }

        for pair in self.history.windows(2) {
            if pair[1].age <= pair[0].age {
                return Err(PlayerInvariantError::HistoryOrder { age: pair[1].age });
            }
        }
        for pair in self.forecast.windows(2) {
            if pair[1].age <= pair[0].age {
                return Err(PlayerInvariantError::ForecastOrder { age: pair[1].age });
            }
        }

        if let Some(f) = self
            .forecast
            .iter()
            .find(|f| self.history.iter().any(|h| h.age == f.age))
        {
            return Err(PlayerInvariantError::Overlap { age: f.age });
        }
        if let (Some(last), Some(first)) = (self.last_season(), self.first_forecast()) {
            if first.age <= last.age {
                return Err(PlayerInvariantError::ForecastNotFuture { age: first.age });
            }
        }

        Ok(())
    }
}
