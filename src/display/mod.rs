//! Display settings driven by the control panel.

pub mod charts;
pub mod color_scheme;
mod state;

pub use charts::{CHART_GROUPS, ChartEntry, ChartGroup, ChartOption};
pub use color_scheme::{COLOR_SCHEMES, ColorScheme};
pub use state::DisplayState;
