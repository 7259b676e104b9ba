//! Outliers panel - one of the two ranked lists
//!
//! Displays, per player:
//! - Rank
//! - Name
//! - Delta (last observed minus predicted wRC+)
//! - Actual and predicted wRC+
//! - Prediction source (backtest or forecast)

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Widget},
};

use agecurve_core::ranking::{PredictionSource, RankedEntry, RankingSide};

use crate::theme::Theme;

/// Outliers panel widget
pub struct OutliersPanel<'a> {
    side: RankingSide,
    entries: &'a [RankedEntry],
    selected_index: usize,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> OutliersPanel<'a> {
    pub fn new(
        side: RankingSide,
        entries: &'a [RankedEntry],
        selected_index: usize,
        focused: bool,
        theme: &'a Theme,
    ) -> Self {
        Self {
            side,
            entries,
            selected_index,
            focused,
            theme,
        }
    }

    pub fn title(&self) -> &'static str {
        match self.side {
            RankingSide::Over => " Over-performers ",
            RankingSide::Under => " Under-performers ",
        }
    }

    fn format_delta(delta: f64) -> String {
        format!("{:+.0}", delta)
    }

    fn source_tag(source: PredictionSource) -> &'static str {
        match source {
            PredictionSource::Backtest => "bt",
            PredictionSource::Forecast => "fc",
        }
    }
}

impl<'a> Widget for OutliersPanel<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border = if self.focused {
            self.theme.accent
        } else {
            self.theme.muted
        };
        let block = Block::default()
            .title(self.title())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(self.theme.background));

        if self.entries.is_empty() {
            let hint = Paragraph::new(Span::styled(
                " No players to rank.",
                Style::default().fg(self.theme.muted),
            ))
            .block(block);
            hint.render(area, buf);
            return;
        }

        let header_cells = ["#", "Player", "Δ", "Act", "Pred", ""].iter().map(|h| {
            Cell::from(*h).style(
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            )
        });
        let header = Row::new(header_cells).height(1);

        let rows = self.entries.iter().enumerate().map(|(i, entry)| {
            let style = if self.focused && i == self.selected_index {
                Style::default()
                    .bg(self.theme.neutral)
                    .fg(self.theme.text_primary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(self.theme.text_primary)
            };

            let cells = vec![
                Cell::from(format!("{}", i + 1)),
                Cell::from(entry.name.clone()),
                Cell::from(Self::format_delta(entry.delta))
                    .style(Style::default().fg(self.theme.delta_color(entry.delta))),
                Cell::from(format!("{:.0}", entry.actual)),
                Cell::from(format!("{:.0}", entry.predicted)),
                Cell::from(Self::source_tag(entry.source))
                    .style(Style::default().fg(self.theme.text_secondary)),
            ];
            Row::new(cells).style(style).height(1)
        });

        let widths = [
            Constraint::Length(2),
            Constraint::Min(12),
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Length(2),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .column_spacing(1);

        table.render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::ready_app;

    fn buffer_text(buf: &Buffer) -> String {
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn renders_ranked_names_in_order() {
        let app = ready_app();
        let theme = Theme::default();
        let entries = app.session.ranked(RankingSide::Over);
        let panel = OutliersPanel::new(RankingSide::Over, entries, 0, true, &theme);

        let area = Rect::new(0, 0, 44, 8);
        let mut buf = Buffer::empty(area);
        panel.render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("Over-performers"));
        let betts = text.find("Mookie Betts").unwrap();
        let trout = text.find("Mike Trout").unwrap();
        assert!(betts < trout);
        assert!(text.contains("+20"));
    }

    #[test]
    fn empty_list_shows_hint() {
        let theme = Theme::default();
        let panel = OutliersPanel::new(RankingSide::Under, &[], 0, false, &theme);
        let area = Rect::new(0, 0, 40, 5);
        let mut buf = Buffer::empty(area);
        panel.render(area, &mut buf);
        let text = buffer_text(&buf);
        assert!(text.contains("Under-performers"));
        assert!(text.contains("No players to rank."));
    }

    #[test]
    fn delta_formatting_is_signed() {
        assert_eq!(OutliersPanel::format_delta(14.4), "+14");
        assert_eq!(OutliersPanel::format_delta(-7.0), "-7");
        assert_eq!(OutliersPanel::source_tag(PredictionSource::Backtest), "bt");
    }
}
