use serde::{Deserialize, Serialize};

use super::Metric;

/// Transient per-session UI state sent with every chart request.
///
/// `selected_rows` are indices into the rows of `page` as displayed in the
/// table, not stable record identities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    pub metric: String,

    #[serde(default)]
    pub page: usize,

    #[serde(default)]
    pub selected_rows: Option<Vec<usize>>,
}

impl SelectionState {
    pub fn new(metric: impl Into<String>, page: usize, selected_rows: Vec<usize>) -> Self {
        Self {
            metric: metric.into(),
            page,
            selected_rows: Some(selected_rows),
        }
    }

    /// True when no row is selected (absent or empty).
    pub fn has_no_rows(&self) -> bool {
        self.selected_rows.as_ref().is_none_or(|rows| rows.is_empty())
    }
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            metric: Metric::default().as_str().to_string(),
            page: 0,
            selected_rows: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_with_defaults() {
        let state: SelectionState = serde_json::from_str(r#"{"metric": "Fat"}"#).unwrap();
        assert_eq!(state.metric, "Fat");
        assert_eq!(state.page, 0);
        assert!(state.has_no_rows());
    }

    #[test]
    fn test_empty_rows_count_as_no_selection() {
        assert!(SelectionState::new("Calories", 0, vec![]).has_no_rows());
        assert!(!SelectionState::new("Calories", 0, vec![1]).has_no_rows());
    }
}
