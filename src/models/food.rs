use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strsim::jaro_winkler;

use crate::error::DashboardError;

/// Column holding the food name.
pub const FOOD_ITEM_COLUMN: &str = "FoodItem";

/// Minimum similarity for an unknown metric name to get a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// A numeric nutrition field that can be charted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    Calories,
    Protein,
    Fat,
    Carbs,
    Fibre,
}

impl Metric {
    /// All metrics in column order.
    pub const ALL: [Metric; 5] = [
        Metric::Calories,
        Metric::Protein,
        Metric::Fat,
        Metric::Carbs,
        Metric::Fibre,
    ];

    /// Column name of the metric.
    pub fn as_str(self) -> &'static str {
        match self {
            Metric::Calories => "Calories",
            Metric::Protein => "Protein",
            Metric::Fat => "Fat",
            Metric::Carbs => "Carbs",
            Metric::Fibre => "Fibre",
        }
    }

    /// Closest metric to an unknown name, if any is similar enough.
    fn suggest(name: &str) -> Option<Metric> {
        let needle = name.trim().to_lowercase();
        Metric::ALL
            .into_iter()
            .map(|m| (m, jaro_winkler(&needle, &m.as_str().to_lowercase())))
            .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(m, _)| m)
    }
}

impl Default for Metric {
    fn default() -> Self {
        Metric::Calories
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metric::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| DashboardError::InvalidMetric {
                name: s.to_string(),
                suggestion: Metric::suggest(s).map(|m| m.as_str().to_string()),
            })
    }
}

/// One row of the cleaned nutrition table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodRecord {
    #[serde(rename = "FoodItem")]
    pub food_item: String,

    #[serde(rename = "Calories")]
    pub calories: f64,

    #[serde(rename = "Protein")]
    pub protein: f64,

    #[serde(rename = "Fat")]
    pub fat: f64,

    #[serde(rename = "Carbs")]
    pub carbs: f64,

    #[serde(rename = "Fibre")]
    pub fibre: f64,
}

impl FoodRecord {
    /// Value of the given metric.
    #[inline]
    pub fn metric(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Calories => self.calories,
            Metric::Protein => self.protein,
            Metric::Fat => self.fat,
            Metric::Carbs => self.carbs,
            Metric::Fibre => self.fibre,
        }
    }

    /// Mutable slot for the given metric, used while assembling a row.
    pub(crate) fn metric_mut(&mut self, metric: Metric) -> &mut f64 {
        match metric {
            Metric::Calories => &mut self.calories,
            Metric::Protein => &mut self.protein,
            Metric::Fat => &mut self.fat,
            Metric::Carbs => &mut self.carbs,
            Metric::Fibre => &mut self.fibre,
        }
    }

    /// Cells in column order, formatted for display or export.
    pub fn to_cells(&self) -> Vec<String> {
        let mut cells = Vec::with_capacity(Metric::ALL.len() + 1);
        cells.push(self.food_item.clone());
        cells.extend(Metric::ALL.into_iter().map(|m| self.metric(m).to_string()));
        cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> FoodRecord {
        FoodRecord {
            food_item: "Apple".to_string(),
            calories: 52.0,
            protein: 0.3,
            fat: 0.2,
            carbs: 14.0,
            fibre: 2.4,
        }
    }

    #[test]
    fn test_metric_lookup() {
        let record = sample_record();
        assert_eq!(record.metric(Metric::Calories), 52.0);
        assert_eq!(record.metric(Metric::Carbs), 14.0);
        assert_eq!(record.metric(Metric::Fibre), 2.4);
    }

    #[test]
    fn test_parse_metric_exact() {
        for metric in Metric::ALL {
            assert_eq!(metric.as_str().parse::<Metric>().unwrap(), metric);
        }
    }

    #[test]
    fn test_parse_metric_suggests_close_name() {
        let err = "Fiber".parse::<Metric>().unwrap_err();
        match err {
            DashboardError::InvalidMetric { name, suggestion } => {
                assert_eq!(name, "Fiber");
                assert_eq!(suggestion.as_deref(), Some("Fibre"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_metric_no_suggestion_for_unrelated_name() {
        let err = "Sodium".parse::<Metric>().unwrap_err();
        assert!(matches!(
            err,
            DashboardError::InvalidMetric {
                suggestion: None,
                ..
            }
        ));
    }

    #[test]
    fn test_serializes_with_column_names() {
        let json = serde_json::to_value(sample_record()).unwrap();
        assert_eq!(json["FoodItem"], "Apple");
        assert_eq!(json["Calories"], 52.0);
        assert!(json.get("food_item").is_none());
    }
}
