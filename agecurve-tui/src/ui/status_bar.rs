//! Bottom status bar — load progress, last status message, key hints.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use agecurve_core::LoadStatus;

use crate::app::{AppState, Focus, StatusLevel};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut spans: Vec<Span> = Vec::new();

    spans.push(Span::styled(" curve ", theme::muted()));
    spans.push(load_span(app.session.curve_status()));
    spans.push(Span::styled(" players ", theme::muted()));
    spans.push(load_span(app.session.players_status()));

    spans.push(Span::raw(" | "));
    let hints = match app.focus {
        Focus::Search => "Tab:lists Enter:plot Esc:lists ^C:quit",
        Focus::Over | Focus::Under => "j/k:move h/l:list Enter:plot /:search ?:help e:errors q:quit",
    };
    spans.push(Span::styled(hints, theme::muted()));

    if let Some((msg, level)) = &app.status_message {
        spans.push(Span::raw(" | "));
        let style = match level {
            StatusLevel::Info => theme::accent(),
            StatusLevel::Warning => theme::warning(),
            StatusLevel::Error => theme::negative(),
        };
        spans.push(Span::styled(msg.as_str(), style));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn load_span(status: &LoadStatus) -> Span<'static> {
    match status {
        LoadStatus::Pending => Span::styled("…", theme::muted()),
        LoadStatus::Loaded { count, dropped: 0 } => Span::styled(count.to_string(), theme::accent()),
        LoadStatus::Loaded { count, dropped } => {
            Span::styled(format!("{count} (-{dropped})"), theme::warning())
        }
        LoadStatus::Failed(_) => Span::styled("failed", theme::negative()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_span_reflects_status() {
        assert_eq!(load_span(&LoadStatus::Pending).content, "…");
        assert_eq!(
            load_span(&LoadStatus::Loaded { count: 21, dropped: 0 }).content,
            "21"
        );
        assert_eq!(
            load_span(&LoadStatus::Loaded { count: 7, dropped: 3 }).content,
            "7 (-3)"
        );
        assert_eq!(load_span(&LoadStatus::Failed("x".into())).content, "failed");
    }
}
