//! Value-axis policies for the player chart.

use serde::{Deserialize, Serialize};

use crate::domain::AxisRange;

pub const DEFAULT_AXIS_STEP: f64 = 10.0;
pub const DEFAULT_AXIS_PADDING: f64 = 10.0;

fn default_step() -> f64 {
    DEFAULT_AXIS_STEP
}

fn default_padding() -> f64 {
    DEFAULT_AXIS_PADDING
}

/// How the player chart's y-axis is sized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum AxisPolicy {
    /// Snap the data range outward to multiples of `step`, then pad.
    Dynamic {
        #[serde(default = "default_step")]
        step: f64,
        #[serde(default = "default_padding")]
        padding: f64,
    },
    /// Fixed bounds regardless of data.
    Fixed { min: f64, max: f64 },
}

impl Default for AxisPolicy {
    fn default() -> Self {
        AxisPolicy::Dynamic {
            step: DEFAULT_AXIS_STEP,
            padding: DEFAULT_AXIS_PADDING,
        }
    }
}

impl AxisPolicy {
    /// Compute the axis for a set of y-values.
    pub fn range(&self, values: impl IntoIterator<Item = f64>) -> AxisRange {
        match *self {
            AxisPolicy::Dynamic { step, padding } => dynamic_axis(values, step, padding),
            AxisPolicy::Fixed { min, max } => AxisRange::new(min.min(max), max.max(min)),
        }
    }

    /// Gridline spacing implied by the policy.
    pub fn step(&self) -> f64 {
        match *self {
            AxisPolicy::Dynamic { step, .. } if step > 0.0 => step,
            AxisPolicy::Dynamic { .. } => DEFAULT_AXIS_STEP,
            AxisPolicy::Fixed { min, max } => ((max - min).abs() / 10.0).max(f64::EPSILON),
        }
    }
}

/// `min = floor(lo / step) * step - padding`, `max = ceil(hi / step) * step + padding`.
///
/// Non-finite values are ignored. With no values at all the axis collapses to
/// `[-padding, padding]`. A non-positive step skips the snapping.
pub fn dynamic_axis(values: impl IntoIterator<Item = f64>, step: f64, padding: f64) -> AxisRange {
    let (lo, hi) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    if lo > hi {
        return AxisRange::new(-padding, padding);
    }

    if step > 0.0 && step.is_finite() {
        AxisRange::new(
            (lo / step).floor() * step - padding,
            (hi / step).ceil() * step + padding,
        )
    } else {
        AxisRange::new(lo - padding, hi + padding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snaps_to_tens_with_padding() {
        let axis = dynamic_axis([80.0, 100.0, 115.0, 130.0], 10.0, 10.0);
        assert_eq!(axis, AxisRange::new(70.0, 140.0));
    }

    #[test]
    fn league_average_alone_pads_to_90_110() {
        let axis = dynamic_axis([100.0], 10.0, 10.0);
        assert_eq!(axis, AxisRange::new(90.0, 110.0));
    }

    #[test]
    fn ignores_non_finite_values() {
        let axis = dynamic_axis([f64::NAN, 100.0, f64::INFINITY, 121.0], 10.0, 10.0);
        assert_eq!(axis, AxisRange::new(90.0, 140.0));
    }

    #[test]
    fn empty_input_does_not_panic() {
        let axis = dynamic_axis(std::iter::empty(), 10.0, 10.0);
        assert_eq!(axis, AxisRange::new(-10.0, 10.0));
    }

    #[test]
    fn fixed_policy_ignores_data_and_orders_bounds() {
        let policy = AxisPolicy::Fixed { min: 150.0, max: 50.0 };
        assert_eq!(policy.range([10.0, 300.0]), AxisRange::new(50.0, 150.0));
    }

    #[test]
    fn policy_deserializes_from_toml_table() {
        #[derive(Deserialize)]
        struct Wrapper {
            axis: AxisPolicy,
        }
        let w: Wrapper = toml::from_str(r#"axis = { mode = "dynamic" }"#).unwrap();
        assert_eq!(w.axis, AxisPolicy::default());
        let w: Wrapper = toml::from_str(r#"axis = { mode = "fixed", min = 40.0, max = 200.0 }"#)
            .unwrap();
        assert_eq!(w.axis, AxisPolicy::Fixed { min: 40.0, max: 200.0 });
    }
}
