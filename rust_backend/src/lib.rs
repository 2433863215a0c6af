//! Sting mission engine.
//!
//! Builds a mission out of catalog task blocks, keeps per-category time totals,
//! and reads and writes missions as CSV or JSON. The web front-end drives it
//! through [`session::MissionSession`], or through the Python bindings when
//! the `python` feature is enabled.

pub mod config;
pub mod core;
pub mod io;
pub mod mission;
pub mod parsing;
pub mod session;

#[cfg(feature = "python")]
pub mod python;

pub use crate::config::{AppConfig, ConfigError};
pub use crate::core::{BlockDefinition, BlockTime, Catalog, MissionBlock, MissionError, MissionResult};
pub use crate::mission::MissionTable;
pub use crate::parsing::DataFormat;
pub use crate::session::{AddOutcome, MissionSession, MissionView};

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// Sting Python module
#[cfg(feature = "python")]
#[pymodule]
fn sting_rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    python::register(m)
}
