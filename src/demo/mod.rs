//! Sample graph that grows on a timer while live updates are on.

pub mod data;
mod generator;
mod ticker;

pub use generator::{ADD_PROBABILITY, Growth, LINK_LABEL, SampleGraph, TICK_INTERVAL, TickPlan};
pub use ticker::{BrowserInterval, Schedule, Ticker};
