//! Application state — single-owner, main-thread only.
//!
//! All TUI state lives here. The loader thread communicates via a channel.

use std::collections::VecDeque;
use std::sync::mpsc::Receiver;

use chrono::NaiveDateTime;
use tracing::{error, info};

use agecurve_core::ranking::RankingSide;
use agecurve_core::{SearchMode, Session};

use crate::worker::LoadEvent;

const ERROR_HISTORY_CAP: usize = 50;
const SUGGESTION_LIMIT: usize = 5;

/// Which widget receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Search,
    Over,
    Under,
}

impl Focus {
    pub fn next(self) -> Focus {
        match self {
            Focus::Search => Focus::Over,
            Focus::Over => Focus::Under,
            Focus::Under => Focus::Search,
        }
    }

    pub fn prev(self) -> Focus {
        match self {
            Focus::Search => Focus::Under,
            Focus::Over => Focus::Search,
            Focus::Under => Focus::Over,
        }
    }

    pub fn side(self) -> Option<RankingSide> {
        match self {
            Focus::Search => None,
            Focus::Over => Some(RankingSide::Over),
            Focus::Under => Some(RankingSide::Under),
        }
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// An error record for the error history overlay.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: NaiveDateTime,
    pub category: ErrorCategory,
    pub message: String,
    pub context: String,
}

/// Error category for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// A whole table could not be loaded.
    Load,
    /// A row or player was dropped.
    Data,
    Config,
}

impl ErrorCategory {
    pub fn label(self) -> &'static str {
        match self {
            ErrorCategory::Load => "LOAD",
            ErrorCategory::Data => "DATA",
            ErrorCategory::Config => "CFG",
        }
    }
}

/// Which overlay (if any) is shown on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    Help,
    ErrorHistory,
}

/// Top-level application state.
pub struct AppState {
    pub session: Session,
    pub focus: Focus,
    pub running: bool,

    pub search_input: String,
    pub over_cursor: usize,
    pub under_cursor: usize,

    pub loader_rx: Receiver<LoadEvent>,

    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: VecDeque<ErrorRecord>,
    pub error_scroll: usize,
    pub overlay: Overlay,
}

impl AppState {
    pub fn new(session: Session, loader_rx: Receiver<LoadEvent>) -> Self {
        Self {
            session,
            focus: Focus::Search,
            running: true,
            search_input: String::new(),
            over_cursor: 0,
            under_cursor: 0,
            loader_rx,
            status_message: Some(("Loading curve and players...".into(), StatusLevel::Info)),
            error_history: VecDeque::with_capacity(ERROR_HISTORY_CAP),
            error_scroll: 0,
            overlay: Overlay::None,
        }
    }

    /// Push an error to the history, capping at 50.
    ///
    /// Only config errors are logged here; load failures and dropped rows were
    /// logged by the loader.
    pub fn push_error(&mut self, category: ErrorCategory, message: String, context: String) {
        if category == ErrorCategory::Config {
            error!("[{}] {message}", category.label());
        }
        let record = ErrorRecord {
            timestamp: chrono::Local::now().naive_local(),
            category,
            message: message.clone(),
            context,
        };
        self.error_history.push_front(record);
        if self.error_history.len() > ERROR_HISTORY_CAP {
            self.error_history.pop_back();
        }
        let level = match category {
            ErrorCategory::Data => StatusLevel::Warning,
            _ => StatusLevel::Error,
        };
        self.status_message = Some((message, level));
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    /// Apply every load completion that has arrived since the last frame.
    pub fn drain_loader(&mut self) {
        while let Ok(event) = self.loader_rx.try_recv() {
            self.apply_load_event(event);
        }
    }

    pub fn apply_load_event(&mut self, event: LoadEvent) {
        match event {
            LoadEvent::Curve(result) => {
                let context = "population curve".to_string();
                match &result {
                    Ok(loaded) => {
                        for w in &loaded.warnings {
                            self.push_error(ErrorCategory::Data, w.clone(), context.clone());
                        }
                    }
                    Err(e) => self.push_error(ErrorCategory::Load, e.to_string(), context),
                }
                self.session.complete_curve_load(result);
            }
            LoadEvent::Players(result) => {
                let context = "player table".to_string();
                match &result {
                    Ok(loaded) => {
                        for w in &loaded.warnings {
                            self.push_error(ErrorCategory::Data, w.clone(), context.clone());
                        }
                    }
                    Err(e) => self.push_error(ErrorCategory::Load, e.to_string(), context),
                }
                self.session.complete_players_load(result);
                self.over_cursor = 0;
                self.under_cursor = 0;
            }
        }

        if self.session.is_ready() {
            info!(
                "session ready: {} curve points, {} players",
                self.session.curve().len(),
                self.session.players().len()
            );
            if self.error_history.is_empty() {
                self.set_status(format!(
                    "Ready: {} players. Type a name to plot.",
                    self.session.players().len()
                ));
            }
            // A query typed while loading is resolved now.
            self.on_search_changed();
        }
    }

    /// Live lookup after every edit of the search input.
    pub fn on_search_changed(&mut self) {
        if let Some(index) = self.session.search(&self.search_input) {
            let name = self.session.players()[index].name.clone();
            self.set_status(format!("Plotted {name}"));
        }
    }

    /// Enter in the search box. In select mode the first suggestion is taken.
    pub fn submit_search(&mut self) {
        if matches!(self.session.search_mode(), SearchMode::Select) {
            let first = self.suggestions().first().map(|s| s.to_string());
            if let Some(first) = first {
                self.search_input = first;
            }
        }
        self.on_search_changed();
    }

    pub fn suggestions(&self) -> Vec<&str> {
        if !self.session.is_ready() || self.search_input.trim().is_empty() {
            return Vec::new();
        }
        self.session.suggestions(&self.search_input, SUGGESTION_LIMIT)
    }

    pub fn cursor(&self, side: RankingSide) -> usize {
        match side {
            RankingSide::Over => self.over_cursor,
            RankingSide::Under => self.under_cursor,
        }
    }

    /// Move the focused list's cursor, clamped to the list.
    pub fn move_cursor(&mut self, delta: isize) {
        let Some(side) = self.focus.side() else {
            return;
        };
        let len = self.session.ranked(side).len();
        let cursor = match side {
            RankingSide::Over => &mut self.over_cursor,
            RankingSide::Under => &mut self.under_cursor,
        };
        if len == 0 {
            *cursor = 0;
            return;
        }
        *cursor = cursor.saturating_add_signed(delta).min(len - 1);
    }

    /// Enter on a ranked entry plots that player.
    pub fn activate_cursor(&mut self) {
        let Some(side) = self.focus.side() else {
            return;
        };
        if let Some(index) = self.session.activate(side, self.cursor(side)) {
            let name = self.session.players()[index].name.clone();
            self.set_status(format!("Plotted {name}"));
        }
    }
}
