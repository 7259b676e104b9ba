//! Search box plus up to five suggestions underneath.

use ratatui::layout::{Position, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use agecurve_core::SearchMode;

use crate::app::{AppState, Focus};
use crate::theme;

/// Border, input line, five suggestion lines.
pub const HEIGHT: u16 = 8;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let active = app.focus == Focus::Search;
    let mode = match app.session.search_mode() {
        SearchMode::FreeText { .. } => "name",
        SearchMode::Select => "select",
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(active))
        .title(format!(" Search [{mode}] "))
        .title_style(theme::panel_title(active));

    let mut lines = vec![Line::from(vec![
        Span::styled("> ", theme::accent()),
        Span::styled(app.search_input.as_str(), theme::accent_bold()),
    ])];

    if !app.session.is_ready() {
        lines.push(Line::from(Span::styled("  loading...", theme::muted())));
    } else {
        let selected = app.session.selected().map(|p| p.name.as_str());
        for name in app.suggestions() {
            let style = if Some(name) == selected {
                theme::neutral()
            } else {
                theme::muted()
            };
            lines.push(Line::from(Span::styled(format!("  {name}"), style)));
        }
    }

    f.render_widget(Paragraph::new(lines).block(block), area);
}

/// Put the terminal cursor after the typed text.
pub fn place_cursor(f: &mut Frame, area: Rect, app: &AppState) {
    let typed = app.search_input.chars().count() as u16;
    let x = (area.x + 3 + typed).min(area.right().saturating_sub(2));
    f.set_cursor_position(Position::new(x, area.y + 1));
}
