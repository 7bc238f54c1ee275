use std::collections::HashSet;

use crate::dashboard::constants::PAGE_SIZE;
use crate::data::Dataset;
use crate::error::{DashboardError, Result};
use crate::models::{ChartSpec, Metric, SelectionState};

/// Compute the chart for the current selection.
///
/// Selected indices refer to rows of the displayed page. They are resolved to
/// food names and every record in the dataset carrying one of those names is
/// charted, so selecting one of several same-named rows charts all of them.
/// An empty selection yields the empty chart.
pub fn update_chart(dataset: &Dataset, selection: &SelectionState) -> Result<ChartSpec> {
    let rows = match selection.selected_rows.as_deref() {
        Some(rows) if !rows.is_empty() => rows,
        _ => return Ok(ChartSpec::empty()),
    };

    let metric: Metric = selection.metric.parse()?;

    let page_rows = dataset.page(selection.page, PAGE_SIZE);
    let names = rows
        .iter()
        .map(|&index| {
            page_rows
                .get(index)
                .map(|r| r.food_item.as_str())
                .ok_or(DashboardError::InvalidSelection {
                    index,
                    page: selection.page,
                    len: page_rows.len(),
                })
        })
        .collect::<Result<HashSet<&str>>>()?;

    Ok(ChartSpec::bar(
        metric,
        dataset
            .records_named(&names)
            .map(|r| (r.food_item.clone(), r.metric(metric))),
    ))
}
