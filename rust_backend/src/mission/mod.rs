//! Mission table state and derived views.
//!
//! - [`table`]: the ordered, mutable list of selected blocks
//! - [`chart`]: bar-chart projection of the per-category totals

pub mod chart;
pub mod table;

#[cfg(test)]
mod table_tests;

pub use chart::{CategoryChart, ChartBar, DEFAULT_PALETTE};
pub use table::{MissionTable, SerializedMission};
