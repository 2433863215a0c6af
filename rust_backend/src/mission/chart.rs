//! Bar-chart projection of the per-category totals.

use serde::{Deserialize, Serialize};

use crate::core::domain::CategoryTotal;

/// Bar colors, cycled over the categories.
pub const DEFAULT_PALETTE: [&str; 4] = ["#003ea5", "#ffcb05", "#e8b900", "#999999"];

/// Default chart title.
pub const DEFAULT_TITLE: &str = "Répartition du temps par catégorie";

/// One bar of the per-category chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartBar {
    pub category: String,
    pub minutes: u64,
    pub color: String,
}

/// Data behind the "time per category" bar chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryChart {
    pub title: String,
    pub bars: Vec<ChartBar>,
}

impl CategoryChart {
    /// Chart with the default title and palette.
    pub fn from_totals(totals: &[CategoryTotal]) -> Self {
        Self::with_style(totals, DEFAULT_TITLE, &DEFAULT_PALETTE)
    }

    /// Chart with a custom title and palette. An empty palette leaves bars
    /// without a color.
    pub fn with_style<S: AsRef<str>>(totals: &[CategoryTotal], title: &str, palette: &[S]) -> Self {
        let bars = totals
            .iter()
            .enumerate()
            .map(|(i, total)| ChartBar {
                category: total.category.clone(),
                minutes: total.minutes,
                color: if palette.is_empty() {
                    String::new()
                } else {
                    palette[i % palette.len()].as_ref().to_string()
                },
            })
            .collect();

        Self {
            title: title.to_string(),
            bars,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Height of the tallest bar, 0 when empty.
    pub fn max_minutes(&self) -> u64 {
        self.bars.iter().map(|b| b.minutes).max().unwrap_or(0)
    }
}
