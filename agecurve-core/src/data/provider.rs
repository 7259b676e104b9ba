//! Resource locations and structured error types.
//!
//! Both input tables are static resources: a local file or a one-shot HTTP
//! fetch. No retries, no caching.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured error types for data loading.
///
/// These are displayable in both CLI and TUI contexts. None of them are fatal:
/// callers log them and carry on with an empty collection.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("resource unreachable: {location}: {reason}")]
    Unreachable { location: String, reason: String },

    #[error("malformed resource: {location}: {reason}")]
    Malformed { location: String, reason: String },
}

/// Where a table comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ResourceLocation {
    File(PathBuf),
    Url(String),
}

impl ResourceLocation {
    /// `http://` and `https://` prefixes select a URL; anything else is a path.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            ResourceLocation::Url(trimmed.to_string())
        } else {
            ResourceLocation::File(PathBuf::from(trimmed))
        }
    }

    /// Read the whole resource as text.
    pub fn fetch_text(&self) -> Result<String, DataError> {
        match self {
            ResourceLocation::File(path) => {
                std::fs::read_to_string(path).map_err(|e| DataError::Unreachable {
                    location: self.to_string(),
                    reason: e.to_string(),
                })
            }
            ResourceLocation::Url(url) => fetch_url(url).map_err(|e| DataError::Unreachable {
                location: self.to_string(),
                reason: e.to_string(),
            }),
        }
    }
}

fn fetch_url(url: &str) -> Result<String, reqwest::Error> {
    reqwest::blocking::get(url)?.error_for_status()?.text()
}

impl fmt::Display for ResourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceLocation::File(path) => write!(f, "{}", path.display()),
            ResourceLocation::Url(url) => f.write_str(url),
        }
    }
}

impl From<String> for ResourceLocation {
    fn from(raw: String) -> Self {
        ResourceLocation::parse(&raw)
    }
}

impl From<ResourceLocation> for String {
    fn from(loc: ResourceLocation) -> Self {
        loc.to_string()
    }
}

/// The two input tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sources {
    pub curve: ResourceLocation,
    pub players: ResourceLocation,
}

impl Default for Sources {
    fn default() -> Self {
        Self {
            curve: ResourceLocation::File(PathBuf::from("data/population_curve.csv")),
            players: ResourceLocation::File(PathBuf::from("data/players_sample.json")),
        }
    }
}
