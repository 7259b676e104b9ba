//! Top-level UI layout — search and outlier lists on the left, two charts on
//! the right, status bar at the bottom.

pub mod chart_panel;
pub mod outliers_panel;
pub mod overlays;
pub mod search_bar;
pub mod status_bar;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::Frame;

use agecurve_core::ranking::RankingSide;

use crate::app::{AppState, Focus, Overlay};
use crate::theme::Theme;
use outliers_panel::OutliersPanel;

const LEFT_COLUMN_WIDTH: u16 = 46;

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    let theme = Theme::default();

    // Split: main area + 1-line status bar.
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(f.area());
    let main_area = chunks[0];
    let status_area = chunks[1];

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(LEFT_COLUMN_WIDTH), Constraint::Min(20)])
        .split(main_area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(search_bar::HEIGHT),
            Constraint::Percentage(50),
            Constraint::Percentage(50),
        ])
        .split(columns[0]);

    search_bar::render(f, left[0], app);

    for (side, area) in [(RankingSide::Over, left[1]), (RankingSide::Under, left[2])] {
        let panel = OutliersPanel::new(
            side,
            app.session.ranked(side),
            app.cursor(side),
            app.focus.side() == Some(side),
            &theme,
        );
        f.render_widget(panel, area);
    }

    let charts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(columns[1]);

    chart_panel::render(
        f,
        charts[0],
        app.session.population_chart(),
        "Population curve unavailable.",
        &theme,
    );
    let player_hint = if app.session.is_ready() {
        "Type a name or press Enter on a ranked player."
    } else {
        "Loading..."
    };
    chart_panel::render(f, charts[1], app.session.player_chart(), player_hint, &theme);

    status_bar::render(f, status_area, app);

    // Draw overlays on top.
    match app.overlay {
        Overlay::Help => overlays::render_help(f, main_area),
        Overlay::ErrorHistory => overlays::render_error_history(f, main_area, app),
        Overlay::None => {}
    }

    if app.focus == Focus::Search && app.overlay == Overlay::None {
        search_bar::place_cursor(f, left[0], app);
    }
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
