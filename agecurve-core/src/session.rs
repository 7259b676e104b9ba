//! Session — the single owner of loaded data, chart handles and selection.
//!
//! Load completions arrive in any order through `complete_curve_load` and
//! `complete_players_load`. Lookups are accepted only after both have
//! completed, successfully or not.

use tracing::{debug, info, warn};

use crate::chart::{population_chart, ChartHandle, PlayerPlotter};
use crate::config::AppConfig;
use crate::data::{DataError, Loaded};
use crate::domain::{AgingCurve, PlayerRecord};
use crate::ranking::{rank_outliers, OutlierRankings, RankedEntry, RankingConfig, RankingSide};
use crate::search::{suggestions, SearchMode};

/// Progress of one of the two loads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Pending,
    Loaded { count: usize, dropped: usize },
    Failed(String),
}

impl LoadStatus {
    pub fn is_complete(&self) -> bool {
        !matches!(self, LoadStatus::Pending)
    }
}

pub struct Session {
    curve: AgingCurve,
    players: Vec<PlayerRecord>,
    plotter: PlayerPlotter,
    ranking: RankingConfig,
    search: SearchMode,
    population_chart: ChartHandle,
    player_chart: ChartHandle,
    rankings: OutlierRankings,
    selected: Option<usize>,
    curve_status: LoadStatus,
    players_status: LoadStatus,
}

impl Session {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            curve: AgingCurve::default(),
            players: Vec::new(),
            plotter: PlayerPlotter::new(config.plotter),
            ranking: config.ranking,
            search: config.search,
            population_chart: ChartHandle::new(),
            player_chart: ChartHandle::new(),
            rankings: OutlierRankings::default(),
            selected: None,
            curve_status: LoadStatus::Pending,
            players_status: LoadStatus::Pending,
        }
    }

    /// Build a session with both loads already complete.
    pub fn with_data(config: &AppConfig, curve: AgingCurve, players: Vec<PlayerRecord>) -> Self {
        let mut session = Self::new(config);
        session.complete_curve_load(Ok(Loaded {
            data: curve,
            warnings: Vec::new(),
        }));
        session.complete_players_load(Ok(Loaded {
            data: players,
            warnings: Vec::new(),
        }));
        session
    }

    /// Curve load finished. Draws the population chart from whatever loaded.
    pub fn complete_curve_load(&mut self, result: Result<Loaded<AgingCurve>, DataError>) {
        match result {
            Ok(loaded) => {
                self.curve_status = LoadStatus::Loaded {
                    count: loaded.data.len(),
                    dropped: loaded.warnings.len(),
                };
                self.curve = loaded.data;
            }
            Err(e) => {
                warn!("continuing without population curve: {e}");
                self.curve_status = LoadStatus::Failed(e.to_string());
                self.curve = AgingCurve::default();
            }
        }
        self.population_chart.replace(population_chart(&self.curve));
        self.replot_selected();
    }

    /// Player load finished. Recomputes the rankings.
    pub fn complete_players_load(&mut self, result: Result<Loaded<Vec<PlayerRecord>>, DataError>) {
        match result {
            Ok(loaded) => {
                self.players_status = LoadStatus::Loaded {
                    count: loaded.data.len(),
                    dropped: loaded.warnings.len(),
                };
                self.players = loaded.data;
            }
            Err(e) => {
                warn!("continuing without players: {e}");
                self.players_status = LoadStatus::Failed(e.to_string());
                self.players = Vec::new();
            }
        }
        self.selected = None;
        self.player_chart.clear();
        self.rankings = rank_outliers(&self.players, &self.ranking);
        info!(
            "rankings ready: {} over, {} under",
            self.rankings.over.len(),
            self.rankings.under.len()
        );
    }

    /// Both loads have completed, so lookups are meaningful.
    pub fn is_ready(&self) -> bool {
        self.curve_status.is_complete() && self.players_status.is_complete()
    }

    /// Resolve a query and plot the first match. Returns the plotted index.
    ///
    /// A miss, a too-short query, or a session still loading is a no-op.
    pub fn search(&mut self, query: &str) -> Option<usize> {
        if !self.is_ready() {
            debug!("ignoring query '{query}' until both tables have loaded");
            return None;
        }
        let index = self.search.find(&self.players, query)?;
        self.select(index)
    }

    /// Plot the player at `index`, replacing the previous player chart.
    pub fn select(&mut self, index: usize) -> Option<usize> {
        let player = self.players.get(index)?;
        let spec = self.plotter.plot(player, &self.curve);
        self.player_chart.replace(spec);
        self.selected = Some(index);
        Some(index)
    }

    /// Plot the player behind a ranked entry.
    pub fn activate(&mut self, side: RankingSide, position: usize) -> Option<usize> {
        let index = self.rankings.get(side, position)?.player_index;
        self.select(index)
    }

    fn replot_selected(&mut self) {
        if let Some(index) = self.selected {
            self.select(index);
        }
    }

    pub fn curve(&self) -> &AgingCurve {
        &self.curve
    }

    pub fn players(&self) -> &[PlayerRecord] {
        &self.players
    }

    pub fn selected(&self) -> Option<&PlayerRecord> {
        self.selected.and_then(|i| self.players.get(i))
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn rankings(&self) -> &OutlierRankings {
        &self.rankings
    }

    pub fn ranked(&self, side: RankingSide) -> &[RankedEntry] {
        self.rankings.side(side)
    }

    pub fn population_chart(&self) -> &ChartHandle {
        &self.population_chart
    }

    pub fn player_chart(&self) -> &ChartHandle {
        &self.player_chart
    }

    pub fn curve_status(&self) -> &LoadStatus {
        &self.curve_status
    }

    pub fn players_status(&self) -> &LoadStatus {
        &self.players_status
    }

    pub fn search_mode(&self) -> SearchMode {
        self.search
    }

    /// Names matching a partial query, for a suggestion list.
    pub fn suggestions(&self, query: &str, limit: usize) -> Vec<&str> {
        suggestions(&self.players, query, limit)
    }
}
