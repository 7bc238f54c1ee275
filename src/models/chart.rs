use serde::{Deserialize, Serialize};

use super::Metric;

/// Kind of chart drawn in the chart area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Empty,
}

/// Chart produced for one selection; never mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub categories: Vec<String>,
    pub values: Vec<f64>,
    pub title: String,
}

impl ChartSpec {
    /// The chart shown when nothing is selected.
    pub fn empty() -> Self {
        Self {
            kind: ChartKind::Empty,
            categories: Vec::new(),
            values: Vec::new(),
            title: String::new(),
        }
    }

    /// A bar chart of `metric` for the given (name, value) pairs.
    pub fn bar(metric: Metric, bars: impl IntoIterator<Item = (String, f64)>) -> Self {
        let (categories, values) = bars.into_iter().unzip();
        Self {
            kind: ChartKind::Bar,
            categories,
            values,
            title: chart_title(metric),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.kind == ChartKind::Empty
    }

    /// Largest value in the chart, or 0 when there are no bars.
    pub fn max_value(&self) -> f64 {
        self.values.iter().copied().fold(0.0, f64::max)
    }
}

/// Title embedding the metric name.
pub fn chart_title(metric: Metric) -> String {
    format!("Statistics for {} in selected food items", metric)
}
