//! AgeCurve Core — aging-curve data, chart construction, outlier rankings.
//!
//! This crate contains everything that does not touch a terminal:
//! - Domain types (curve points, player records, chart series)
//! - Loaders for the population curve CSV and the player JSON table
//! - The population and player chart builders with their axis policy
//! - Over/under outlier rankings and name search
//! - `Session`, which ties loads, rankings and the current selection together

pub mod chart;
pub mod config;
pub mod data;
pub mod domain;
pub mod ranking;
pub mod search;
pub mod session;

pub use chart::{ChartHandle, PlayerPlotter, PlotterConfig};
pub use config::{AppConfig, ConfigError};
pub use data::{load_all, DataError, LoadOutcome, Loaded, ResourceLocation, Sources};
pub use ranking::{rank_outliers, OutlierRankings, RankedEntry, RankingConfig, RankingSide};
pub use search::SearchMode;
pub use session::{LoadStatus, Session};
