//! Player lookup by name.

use serde::{Deserialize, Serialize};

use crate::domain::PlayerRecord;

pub const DEFAULT_MIN_QUERY_LEN: usize = 2;

fn default_min_query_len() -> usize {
    DEFAULT_MIN_QUERY_LEN
}

/// How a query is matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SearchMode {
    /// Case-insensitive substring match; shorter queries are ignored.
    FreeText {
        #[serde(default = "default_min_query_len")]
        min_query_len: usize,
    },
    /// Case-insensitive exact name, as picked from a list.
    Select,
}

impl Default for SearchMode {
    fn default() -> Self {
        SearchMode::FreeText {
            min_query_len: DEFAULT_MIN_QUERY_LEN,
        }
    }
}

impl SearchMode {
    /// Index of the first player in roster order that matches, if any.
    ///
    /// First match, not best match: "an" resolves to whichever roster entry
    /// containing "an" comes first.
    pub fn find(&self, players: &[PlayerRecord], query: &str) -> Option<usize> {
        match *self {
            SearchMode::FreeText { min_query_len } => {
                if query.chars().count() < min_query_len {
                    return None;
                }
                let needle = query.to_lowercase();
                players
                    .iter()
                    .position(|p| p.name.to_lowercase().contains(&needle))
            }
            SearchMode::Select => {
                let needle = query.trim().to_lowercase();
                if needle.is_empty() {
                    return None;
                }
                players.iter().position(|p| p.name.to_lowercase() == needle)
            }
        }
    }
}

/// Names containing `query` (case-insensitive), in roster order, at most `limit`.
/// An empty query lists the first `limit` names.
pub fn suggestions<'a>(players: &'a [PlayerRecord], query: &str, limit: usize) -> Vec<&'a str> {
    let needle = query.trim().to_lowercase();
    players
        .iter()
        .filter(|p| needle.is_empty() || p.name.to_lowercase().contains(&needle))
        .map(|p| p.name.as_str())
        .take(limit)
        .collect()
}
