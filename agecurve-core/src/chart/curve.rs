//! Population curve chart.

use crate::domain::{
    AgingCurve, AxisRange, ChartSeries, ChartSpec, RenderStyle, SeriesKind, DEFAULT_AGE_DOMAIN,
    MAX_AGE_FACTOR,
};

pub const POPULATION_LABEL: &str = "Population Curve";

/// One solid line over the curve, age on x with integer ticks, factor on y
/// fixed to `[0, 1.1]`. An empty curve produces no series.
pub fn population_chart(curve: &AgingCurve) -> ChartSpec {
    let (lo, hi) = curve.age_domain().unwrap_or(DEFAULT_AGE_DOMAIN);

    let series = if curve.is_empty() {
        Vec::new()
    } else {
        let points = curve
            .points()
            .iter()
            .map(|p| (p.age as f64, p.age_factor))
            .collect();
        vec![ChartSeries::new(
            POPULATION_LABEL,
            SeriesKind::Population,
            RenderStyle::Line,
            points,
        )]
    };

    ChartSpec {
        title: POPULATION_LABEL.to_string(),
        x_label: "Age".into(),
        y_label: "Age Factor".into(),
        x_axis: AxisRange::new(lo as f64, hi as f64),
        y_axis: AxisRange::new(0.0, MAX_AGE_FACTOR),
        x_step: 1.0,
        y_step: 0.1,
        series,
    }
}
