//! Chart canvas — draws a `ChartSpec` with ratatui's Chart widget.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::Style;
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, LegendPosition, Paragraph};
use ratatui::Frame;

use agecurve_core::domain::{AxisRange, ChartSpec, RenderStyle};
use agecurve_core::ChartHandle;

use crate::theme::{self, Theme};

const MAX_AXIS_LABELS: usize = 8;

pub fn render(f: &mut Frame, area: Rect, handle: &ChartHandle, empty_hint: &str, theme: &Theme) {
    match handle.spec() {
        Some(spec) if !spec.series.is_empty() => render_chart(f, area, spec, theme),
        Some(spec) => render_empty(f, area, &spec.title, empty_hint),
        None => render_empty(f, area, "Player", empty_hint),
    }
}

fn render_empty(f: &mut Frame, area: Rect, title: &str, hint: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::muted())
        .title(format!(" {title} "))
        .title_style(theme::muted());
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(hint.to_string(), theme::muted())),
    ];
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_chart(f: &mut Frame, area: Rect, spec: &ChartSpec, theme: &Theme) {
    let datasets: Vec<Dataset> = spec
        .series
        .iter()
        .map(|series| {
            let (graph_type, marker) = glyphs(series.style);
            Dataset::default()
                .name(series.label.clone())
                .marker(marker)
                .graph_type(graph_type)
                .style(Style::default().fg(theme.series_color(series.kind)))
                .data(&series.points)
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true))
        .title(format!(" {} ", spec.title))
        .title_style(theme::panel_title(true));


    let chart = Chart::new(datasets)
        .block(block)
        .legend_position(Some(LegendPosition::TopRight))
        .hidden_legend_constraints((Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)))
        .x_axis(
            Axis::default()
                .title(Span::styled(spec.x_label.clone(), theme::muted()))
                .style(theme::muted())
                .bounds([spec.x_axis.min, spec.x_axis.max])
                .labels(
                    axis_labels(spec.x_axis, spec.x_step)
                        .into_iter()
                        .map(|l| Span::styled(l, theme::muted()))
                        .collect::<Vec<_>>(),
                ),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled(spec.y_label.clone(), theme::muted()))
                .style(theme::muted())
                .bounds([spec.y_axis.min, spec.y_axis.max])
                .labels(
                    axis_labels(spec.y_axis, spec.y_step)
                        .into_iter()
                        .map(|l| Span::styled(l, theme::muted()))
                        .collect::<Vec<_>>(),
                ),
        );

    f.render_widget(chart, area);
}

/// Terminal glyphs for each render style. Dashed lines have no terminal
/// equivalent and are drawn dotted.
pub fn glyphs(style: RenderStyle) -> (GraphType, Marker) {
    match style {
        RenderStyle::Line => (GraphType::Line, Marker::Braille),
        RenderStyle::DashedLine => (GraphType::Line, Marker::Dot),
        RenderStyle::Markers => (GraphType::Scatter, Marker::Dot),
        RenderStyle::Highlight => (GraphType::Scatter, Marker::Block),
        RenderStyle::Connector => (GraphType::Line, Marker::Braille),
    }
}

/// Labels on the axis gridlines, `min` to `max` every `step`.
///
/// ratatui spaces labels evenly between the bounds, so when there are too many
/// ticks every k-th one is kept, with k dividing the interval count.
pub fn axis_labels(range: AxisRange, step: f64) -> Vec<String> {
    let precision = if step < 1.0 { 1 } else { 0 };
    let ticks = range.ticks(step);
    let intervals = ticks.len().saturating_sub(1);
    if intervals == 0 {
        return vec![format!("{:.*}", precision, range.min)];
    }
    let min_stride = intervals.div_ceil(MAX_AXIS_LABELS - 1);
    let stride = (min_stride..=intervals)
        .find(|k| intervals % k == 0)
        .unwrap_or(intervals);
    ticks
        .into_iter()
        .step_by(stride)
        .map(|v| format!("{:.*}", precision, v))
        .collect()
}
