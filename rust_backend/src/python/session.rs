use std::path::PathBuf;

use pyo3::prelude::*;
use pyo3::types::PyBytes;
use serde_json::Value;

use crate::config::AppConfig;
use crate::core::domain::BlockTime;
use crate::session::MissionSession;

/// Mission session exposed to Python.
#[pyclass(name = "MissionSession", module = "sting_rust")]
pub struct PyMissionSession {
    inner: MissionSession,
}

/// Read a duration typed into the front-end. Unusable values become a
/// pending cell, which the table coerces to 0.
fn duration_from_py(value: &Bound<'_, PyAny>) -> BlockTime {
    if let Ok(i) = value.extract::<i64>() {
        BlockTime::from(i)
    } else if let Ok(f) = value.extract::<f64>() {
        BlockTime::from(f)
    } else if let Ok(s) = value.extract::<String>() {
        BlockTime::from(s)
    } else {
        BlockTime::Pending(Value::Null)
    }
}

#[pymethods]
impl PyMissionSession {
    /// Create a session, optionally reading settings from a TOML file.
    #[new]
    #[pyo3(signature = (config_path=None))]
    fn new(config_path: Option<PathBuf>) -> PyResult<Self> {
        let config = match config_path {
            Some(path) => AppConfig::from_file(path)?,
            None => AppConfig::load_or_default()?,
        };
        Ok(Self {
            inner: MissionSession::new(config)?,
        })
    }

    /// All catalog names in declaration order.
    fn catalog_names(&self) -> Vec<String> {
        self.inner
            .catalog()
            .list_names()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Catalog names not yet in the mission.
    fn available_names(&self) -> Vec<String> {
        self.inner
            .available_names()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Add a block; returns False when it was already present.
    fn add_block(&mut self, name: &str) -> PyResult<bool> {
        Ok(self.inner.add_block(name)?.is_added())
    }

    fn remove_block(&mut self, index: usize) -> PyResult<()> {
        self.inner.remove_block(index)?;
        Ok(())
    }

    /// Set a block's duration; returns the stored minutes.
    fn update_duration(&mut self, index: usize, value: &Bound<'_, PyAny>) -> PyResult<u32> {
        let view = self.inner.update_duration(index, duration_from_py(value))?;
        Ok(view.blocks[index].minutes())
    }

    fn __len__(&self) -> usize {
        self.inner.table().len()
    }

    /// Rows as (name, minutes, category) tuples.
    fn blocks(&self) -> Vec<(String, u32, String)> {
        self.inner
            .table()
            .iter()
            .map(|b| (b.name.clone(), b.minutes(), b.category.clone()))
            .collect()
    }

    fn total_minutes(&mut self) -> u64 {
        self.inner.view().total_minutes
    }

    /// Per-category totals as (category, minutes) tuples.
    fn totals(&mut self) -> Vec<(String, u64)> {
        self.inner
            .view()
            .totals
            .into_iter()
            .map(|t| (t.category, t.minutes))
            .collect()
    }

    /// The full view (rows, totals, chart, chooser names) as a JSON string.
    fn view_json(&mut self) -> PyResult<String> {
        serde_json::to_string(&self.inner.view())
            .map_err(|e| pyo3::exceptions::PyRuntimeError::new_err(e.to_string()))
    }

    /// Replace the mission with an uploaded file; returns the row count.
    fn import_file(&mut self, file_name: &str, data: &[u8]) -> PyResult<usize> {
        Ok(self.inner.import_bytes(file_name, data)?.rows)
    }

    /// CSV export as (file_name, mime, bytes).
    fn export_csv<'py>(&self, py: Python<'py>) -> PyResult<(String, String, Bound<'py, PyBytes>)> {
        let csv = self.inner.export()?.csv;
        Ok((csv.file_name, csv.mime.to_string(), PyBytes::new(py, &csv.data)))
    }

    /// JSON export as (file_name, mime, text).
    fn export_json(&self) -> PyResult<(String, String, String)> {
        let json = self.inner.export()?.json;
        let text = String::from_utf8(json.data)
            .map_err(|e| pyo3::exceptions::PyRuntimeError::new_err(e.to_string()))?;
        Ok((json.file_name, json.mime.to_string(), text))
    }
}
