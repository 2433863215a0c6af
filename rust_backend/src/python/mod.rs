//! Python bindings for the mission engine.
//!
//! This module exposes a session class to the Python web front-end via PyO3.
//! The front-end keeps one `MissionSession` object per user session and calls
//! its methods from widget callbacks.
//!
//! # Python API
//!
//! ```python
//! import sting_rust
//!
//! session = sting_rust.MissionSession()
//! session.add_block("Portail")
//! session.update_duration(0, 12)
//! print(session.total_minutes())
//! ```

pub mod session;

use pyo3::exceptions::{PyIndexError, PyKeyError, PyOSError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use crate::config::ConfigError;
use crate::core::error::{ImportError, MissionError};

pub use session::PyMissionSession;

/// Register all classes with the Python module.
pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyMissionSession>()?;
    Ok(())
}

impl From<MissionError> for PyErr {
    fn from(err: MissionError) -> Self {
        let message = err.to_string();
        match err {
            MissionError::NotFound(_) => PyKeyError::new_err(message),
            MissionError::IndexOutOfRange { .. } => PyIndexError::new_err(message),
            MissionError::Import(ImportError::Io { .. }) => PyOSError::new_err(message),
            MissionError::DuplicateBlock(_)
            | MissionError::Import(_)
            | MissionError::Schema { .. }
            | MissionError::InvalidCatalog(_) => PyValueError::new_err(message),
            MissionError::Export(_) => PyRuntimeError::new_err(message),
        }
    }
}

impl From<ConfigError> for PyErr {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Read { .. } => PyOSError::new_err(err.to_string()),
            _ => PyValueError::new_err(err.to_string()),
        }
    }
}
