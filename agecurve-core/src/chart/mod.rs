//! Chart view-model builders and the owned chart handle.

pub mod axis;
pub mod curve;
pub mod player;

pub use axis::{dynamic_axis, AxisPolicy};
pub use curve::population_chart;
pub use player::{project_forecast, PlayerPlotter, PlotterConfig, LEAGUE_AVERAGE};

use crate::domain::ChartSpec;

/// One chart canvas. Created once; its content only changes through
/// [`ChartHandle::replace`], which swaps the whole series set at once.
#[derive(Debug, Clone, Default)]
pub struct ChartHandle {
    spec: Option<ChartSpec>,
    revision: u64,
}

impl ChartHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current content, if anything has been drawn yet.
    pub fn spec(&self) -> Option<&ChartSpec> {
        self.spec.as_ref()
    }

    /// Incremented on every replace; frontends redraw when it changes.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replace the entire chart content and request a redraw.
    pub fn replace(&mut self, spec: ChartSpec) {
        self.spec = Some(spec);
        self.revision += 1;
    }

    pub fn clear(&mut self) {
        if self.spec.take().is_some() {
            self.revision += 1;
        }
    }
}
