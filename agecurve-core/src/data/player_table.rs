//! Player table: a JSON array of player objects.
//!
//! ```json
//! [{ "name": "Mike Trout",
//!    "history":  [{ "age": 31, "wRCPlus": 168 }],
//!    "forecast": [{ "age": 32, "wRCPlus": 150 }],
//!    "backtest": { "age": 31, "expected_wRCPlus": 155, "actual_wRCPlus": 168 } }]
//! ```

use std::collections::HashSet;

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use super::provider::{DataError, ResourceLocation};
use super::Loaded;
use crate::domain::{Backtest, PlayerRecord, SeasonPoint};

/// A number that may arrive as a JSON number or as a numeric string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Numeric {
    Number(f64),
    Text(String),
}

impl Numeric {
    fn value(&self) -> Option<f64> {
        let v = match self {
            Numeric::Number(n) => *n,
            Numeric::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        v.is_finite().then_some(v)
    }
}

#[derive(Debug, Deserialize)]
struct RawSeason {
    age: Numeric,
    #[serde(rename = "wRCPlus")]
    wrc_plus: Numeric,
}

#[derive(Debug, Deserialize)]
struct RawBacktest {
    age: Numeric,
    #[serde(rename = "expected_wRCPlus")]
    expected: Numeric,
    #[serde(rename = "actual_wRCPlus")]
    actual: Numeric,
}

#[derive(Debug, Deserialize)]
struct RawPlayer {
    name: String,
    #[serde(default)]
    history: Vec<RawSeason>,
    #[serde(default)]
    forecast: Vec<RawSeason>,
    #[serde(default)]
    backtest: Option<RawBacktest>,
}

fn to_age(n: &Numeric) -> Result<u32, String> {
    match n.value() {
        Some(v) if v >= 0.0 && v.fract() == 0.0 && v <= u32::MAX as f64 => Ok(v as u32),
        _ => Err(format!("invalid age {n:?}")),
    }
}

fn to_index(n: &Numeric, age: u32) -> Result<f64, String> {
    n.value()
        .ok_or_else(|| format!("invalid wRC+ {n:?} at age {age}"))
}

fn to_seasons(raw: &[RawSeason]) -> Result<Vec<SeasonPoint>, String> {
    raw.iter()
        .map(|s| {
            let age = to_age(&s.age)?;
            Ok(SeasonPoint {
                age,
                performance_index: to_index(&s.wrc_plus, age)?,
            })
        })
        .collect()
}

fn to_record(raw: RawPlayer) -> Result<PlayerRecord, String> {
    let backtest = match &raw.backtest {
        Some(b) => {
            let age = to_age(&b.age)?;
            Some(Backtest {
                age,
                expected_index: to_index(&b.expected, age)?,
                actual_index: to_index(&b.actual, age)?,
            })
        }
        None => None,
    };
    let record = PlayerRecord {
        name: raw.name.trim().to_string(),
        history: to_seasons(&raw.history)?,
        forecast: to_seasons(&raw.forecast)?,
        backtest,
    };
    record.validate().map_err(|e| e.to_string())?;
    Ok(record)
}

/// Fetch and parse the player table.
pub fn load_players(location: &ResourceLocation) -> Result<Loaded<Vec<PlayerRecord>>, DataError> {
    let text = location.fetch_text()?;
    parse_players(&text, &location.to_string())
}

/// Parse a player table.
///
/// The document must be a JSON array. Each element that fails to decode, has
/// a non-numeric age or index, or breaks the history/forecast invariants is
/// skipped with a warning; the rest load normally. Duplicate names keep the
/// first record.
pub fn parse_players(text: &str, location: &str) -> Result<Loaded<Vec<PlayerRecord>>, DataError> {
    let doc: Value = serde_json::from_str(text).map_err(|e| DataError::Malformed {
        location: location.to_string(),
        reason: e.to_string(),
    })?;
    let Value::Array(items) = doc else {
        return Err(DataError::Malformed {
            location: location.to_string(),
            reason: "expected a JSON array of players".into(),
        });
    };

    let mut players = Vec::with_capacity(items.len());
    let mut seen: HashSet<String> = HashSet::new();
    let mut warnings = Vec::new();

    for (i, item) in items.into_iter().enumerate() {
        let label = item
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("#{i}"));

        let record = serde_json::from_value::<RawPlayer>(item)
            .map_err(|e| e.to_string())
            .and_then(to_record);

        match record {
            Ok(record) => {
                if !seen.insert(record.name.clone()) {
                    warnings.push(format!(
                        "{location}: duplicate player '{}', keeping first",
                        record.name
                    ));
                    continue;
                }
                players.push(record);
            }
            Err(reason) => {
                warnings.push(format!("{location}: skipping player '{label}': {reason}"));
            }
        }
    }

    for w in &warnings {
        warn!("{w}");
    }

    Ok(Loaded {
        data: players,
        warnings,
    })
}
