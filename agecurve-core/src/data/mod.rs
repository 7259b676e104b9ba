//! Data loading: the population curve table and the player table.
//!
//! Each table loads independently. A failed load is logged and degrades to an
//! empty collection; it never stops the other table from loading.

pub mod curve_table;
pub mod player_table;
pub mod provider;

pub use curve_table::{load_curve, parse_curve};
pub use player_table::{load_players, parse_players};
pub use provider::{DataError, ResourceLocation, Sources};

use tracing::{error, info};

use crate::domain::{AgingCurve, PlayerRecord};

/// A successfully loaded table plus the rows/records that were dropped.
#[derive(Debug, Clone, Default)]
pub struct Loaded<T> {
    pub data: T,
    pub warnings: Vec<String>,
}

/// Result of loading both tables.
#[derive(Debug)]
pub struct LoadOutcome {
    pub curve: Result<Loaded<AgingCurve>, DataError>,
    pub players: Result<Loaded<Vec<PlayerRecord>>, DataError>,
}

impl LoadOutcome {
    /// Collapse failures into empty collections, keeping the error messages.
    pub fn degrade(self) -> (AgingCurve, Vec<PlayerRecord>, Vec<String>) {
        let mut problems = Vec::new();
        let curve = match self.curve {
            Ok(loaded) => {
                problems.extend(loaded.warnings);
                loaded.data
            }
            Err(e) => {
                problems.push(e.to_string());
                AgingCurve::default()
            }
        };
        let players = match self.players {
            Ok(loaded) => {
                problems.extend(loaded.warnings);
                loaded.data
            }
            Err(e) => {
                problems.push(e.to_string());
                Vec::new()
            }
        };
        (curve, players, problems)
    }
}

/// Load the curve table, logging the outcome.
pub fn load_curve_logged(location: &ResourceLocation) -> Result<Loaded<AgingCurve>, DataError> {
    let result = load_curve(location);
    match &result {
        Ok(loaded) => info!(
            "loaded {} curve points from {location} ({} dropped)",
            loaded.data.len(),
            loaded.warnings.len()
        ),
        Err(e) => error!("population curve unavailable: {e}"),
    }
    result
}

/// Load the player table, logging the outcome.
pub fn load_players_logged(
    location: &ResourceLocation,
) -> Result<Loaded<Vec<PlayerRecord>>, DataError> {
    let result = load_players(location);
    match &result {
        Ok(loaded) => info!(
            "loaded {} players from {location} ({} skipped)",
            loaded.data.len(),
            loaded.warnings.len()
        ),
        Err(e) => error!("player table unavailable: {e}"),
    }
    result
}

/// Load both tables concurrently and wait for both.
pub fn load_all(sources: &Sources) -> LoadOutcome {
    let (curve, players) = rayon::join(
        || load_curve_logged(&sources.curve),
        || load_players_logged(&sources.players),
    );
    LoadOutcome { curve, players }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn one_failed_table_does_not_block_the_other() {
        let dir = tempfile::tempdir().unwrap();
        let curve_path = dir.path().join("curve.csv");
        std::fs::write(&curve_path, "Age,AgeFactor\n26,1.0\n27,0.99\n").unwrap();

        let sources = Sources {
            curve: ResourceLocation::File(curve_path),
            players: ResourceLocation::File(PathBuf::from("/nonexistent/players.json")),
        };
        let outcome = load_all(&sources);
        assert!(outcome.curve.is_ok());
        assert!(matches!(outcome.players, Err(DataError::Unreachable { .. })));

        let (curve, players, problems) = outcome.degrade();
        assert_eq!(curve.len(), 2);
        assert!(players.is_empty());
        assert_eq!(problems.len(), 1);
    }
}
