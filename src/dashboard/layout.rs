use serde::Serialize;

use crate::dashboard::constants::*;
use crate::data::Dataset;
use crate::models::{ChartSpec, FoodRecord, Metric};

/// One dropdown entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectorOption {
    pub label: String,
    pub value: String,
}

/// Dropdown choosing the charted metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricSelector {
    pub id: &'static str,
    pub options: Vec<SelectorOption>,
    pub value: Metric,
}

/// Row selection mode of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RowSelectable {
    Multi,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableColumn {
    pub name: String,
    pub id: String,
}

/// Paginated, selectable view over the dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableView {
    pub id: &'static str,
    pub columns: Vec<TableColumn>,
    pub page_size: usize,
    pub row_selectable: RowSelectable,
    pub row_count: usize,
    pub page_count: usize,
}

/// Chart area, filled only by the selection reactor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPlaceholder {
    pub id: &'static str,
    pub figure: ChartSpec,
}

/// Static structure of the dashboard, built once from the dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub header: &'static str,
    pub metric_selector: MetricSelector,
    pub table: TableView,
    pub chart: ChartPlaceholder,
    pub footer: &'static str,
}

/// Rows shown on one page of the table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TablePage<'a> {
    pub page: usize,
    pub page_count: usize,
    pub rows: &'a [FoodRecord],
}

impl TableView {
    /// Rows of `page`, or `None` when the page does not exist.
    pub fn page<'a>(&self, dataset: &'a Dataset, page: usize) -> Option<TablePage<'a>> {
        if page >= self.page_count {
            return None;
        }
        Some(TablePage {
            page,
            page_count: self.page_count,
            rows: dataset.page(page, self.page_size),
        })
    }
}

/// Build the dashboard layout for a dataset.
pub fn build_layout(dataset: &Dataset) -> Layout {
    let options = Metric::ALL
        .into_iter()
        .map(|m| SelectorOption {
            label: m.as_str().to_string(),
            value: m.as_str().to_string(),
        })
        .collect();

    let columns = Dataset::columns()
        .into_iter()
        .map(|c| TableColumn {
            name: c.to_string(),
            id: c.to_string(),
        })
        .collect();

    Layout {
        header: HEADER_TEXT,
        metric_selector: MetricSelector {
            id: METRIC_DROPDOWN_ID,
            options,
            value: Metric::default(),
        },
        table: TableView {
            id: FOOD_TABLE_ID,
            columns,
            page_size: PAGE_SIZE,
            row_selectable: RowSelectable::Multi,
            row_count: dataset.len(),
            page_count: dataset.page_count(PAGE_SIZE),
        },
        chart: ChartPlaceholder {
            id: FOOD_GRAPH_ID,
            figure: ChartSpec::empty(),
        },
        footer: FOOTER_TEXT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(count: usize) -> Dataset {
        Dataset::new(
            (0..count)
                .map(|i| FoodRecord {
                    food_item: format!("Food {i}"),
                    calories: 10.0 * i as f64,
                    protein: 1.0,
                    fat: 1.0,
                    carbs: 1.0,
                    fibre: 1.0,
                })
                .collect(),
        )
    }

    #[test]
    fn test_selector_offers_exactly_the_metrics() {
        let layout = build_layout(&dataset(3));
        let values: Vec<&str> = layout
            .metric_selector
            .options
            .iter()
            .map(|o| o.value.as_str())
            .collect();
        assert_eq!(values, vec!["Calories", "Protein", "Fat", "Carbs", "Fibre"]);
        assert_eq!(layout.metric_selector.value, Metric::Calories);
    }

    #[test]
    fn test_table_exposes_every_column() {
        let layout = build_layout(&dataset(3));
        let ids: Vec<&str> = layout.table.columns.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, Dataset::columns());
        assert_eq!(layout.table.page_size, 10);
        assert_eq!(layout.table.row_selectable, RowSelectable::Multi);
    }

    #[test]
    fn test_chart_starts_empty() {
        let layout = build_layout(&dataset(3));
        assert!(layout.chart.figure.is_empty());
    }

    #[test]
    fn test_table_pages() {
        let data = dataset(25);
        let layout = build_layout(&data);
        assert_eq!(layout.table.page_count, 3);

        let last = layout.table.page(&data, 2).unwrap();
        assert_eq!(last.rows.len(), 5);
        assert_eq!(last.rows[0].food_item, "Food 20");
        assert!(layout.table.page(&data, 3).is_none());
    }

    #[test]
    fn test_layout_json_shape() {
        let json = serde_json::to_value(build_layout(&dataset(1))).unwrap();
        assert_eq!(json["header"], "Food Data");
        assert_eq!(json["metric_selector"]["id"], "metric-dropdown");
        assert_eq!(json["metric_selector"]["value"], "Calories");
        assert_eq!(json["table"]["row_selectable"], "multi");
        assert_eq!(json["chart"]["figure"]["kind"], "empty");
    }
}
