//! Canvas graph widget: simulation state, layout, edge curves and rendering.

mod component;
pub mod curve;
mod layout;
mod render;
mod scale;
mod state;
mod types;

pub use component::ForceGraphCanvas;
pub use curve::{CURVE_NAMES, Curve};
pub use types::{GraphData, GraphLink, GraphNode, GraphOptions, Layout, Orientation, Theme};
