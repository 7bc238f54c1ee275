use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use tracing::{debug, info, warn};

use crate::data::Dataset;
use crate::error::{DashboardError, Result};
use crate::models::{FOOD_ITEM_COLUMN, FoodRecord, Metric};

/// A worksheet cell reduced to what the loader cares about.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Other(String),
}

impl Cell {
    fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Text used when the cell is a header.
    fn header_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) | Cell::Other(s) => s.trim().to_string(),
            Cell::Number(n) => n.to_string(),
        }
    }
}

impl From<&Data> for Cell {
    fn from(value: &Data) -> Self {
        match value {
            Data::Empty => Cell::Empty,
            Data::String(s) => Cell::Text(s.clone()),
            Data::Float(f) => Cell::Number(*f),
            Data::Int(i) => Cell::Number(*i as f64),
            other => Cell::Other(other.to_string()),
        }
    }
}

/// A non-essential source column removed at load time.
///
/// Each target must be present in the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    /// Serving size description.
    Measure,
    /// Blank-header artifact column (`Unnamed: N` in dataframe exports).
    Unnamed,
    /// Footnote column stating the units of the nutrient columns.
    UnitsNote,
}

impl DropTarget {
    pub const ALL: [DropTarget; 3] = [
        DropTarget::Measure,
        DropTarget::Unnamed,
        DropTarget::UnitsNote,
    ];

    fn matches(self, header: &str) -> bool {
        let header = header.trim();
        match self {
            DropTarget::Measure => normalize(header) == "measure",
            DropTarget::Unnamed => header.is_empty() || header.starts_with("Unnamed:"),
            DropTarget::UnitsNote => header.to_lowercase().starts_with("note:"),
        }
    }

    /// Name used in diagnostics.
    pub fn label(self) -> &'static str {
        match self {
            DropTarget::Measure => "Measure",
            DropTarget::Unnamed => "<unnamed column>",
            DropTarget::UnitsNote => "Note: <units footnote>",
        }
    }
}

/// What a source column turns into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnRole {
    FoodItem,
    Metric(Metric),
    Dropped(DropTarget),
    Ignored,
}

/// Header matching ignores whitespace and case ("Food Item" == "FoodItem").
fn normalize(header: &str) -> String {
    header
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Assign a role to every header, checking the schema and drop targets.
fn resolve_columns(headers: &[String]) -> Result<Vec<ColumnRole>> {
    let food_key = normalize(FOOD_ITEM_COLUMN);
    let mut roles = Vec::with_capacity(headers.len());

    for header in headers {
        let key = normalize(header);
        let role = if !key.is_empty() && key == food_key {
            ColumnRole::FoodItem
        } else if let Some(metric) = Metric::ALL
            .into_iter()
            .find(|m| normalize(m.as_str()) == key)
        {
            ColumnRole::Metric(metric)
        } else if let Some(target) = DropTarget::ALL.into_iter().find(|t| t.matches(header)) {
            ColumnRole::Dropped(target)
        } else {
            ColumnRole::Ignored
        };

        // Only the first occurrence of a schema column is read.
        let role = if matches!(role, ColumnRole::FoodItem | ColumnRole::Metric(_))
            && roles.contains(&role)
        {
            ColumnRole::Ignored
        } else {
            role
        };
        roles.push(role);
    }

    for target in DropTarget::ALL {
        if !roles.contains(&ColumnRole::Dropped(target)) {
            return Err(DashboardError::MissingColumn(target.label().to_string()));
        }
    }
    if !roles.contains(&ColumnRole::FoodItem) {
        return Err(DashboardError::MissingColumn(FOOD_ITEM_COLUMN.to_string()));
    }
    for metric in Metric::ALL {
        if !roles.contains(&ColumnRole::Metric(metric)) {
            return Err(DashboardError::MissingColumn(metric.as_str().to_string()));
        }
    }

    for (header, role) in headers.iter().zip(&roles) {
        if *role == ColumnRole::Ignored {
            warn!(column = %header, "unexpected column ignored");
        }
    }

    Ok(roles)
}

fn name_cell(cell: &Cell, row: usize) -> Result<String> {
    let name = match cell {
        Cell::Text(s) => s.trim().to_string(),
        Cell::Number(n) => n.to_string(),
        Cell::Other(s) => s.trim().to_string(),
        Cell::Empty => String::new(),
    };
    if name.is_empty() {
        return Err(DashboardError::InvalidCell {
            row,
            column: FOOD_ITEM_COLUMN.to_string(),
            reason: "food name is empty".to_string(),
        });
    }
    Ok(name)
}

fn metric_cell(cell: &Cell, row: usize, metric: Metric) -> Result<f64> {
    let invalid = |reason: String| DashboardError::InvalidCell {
        row,
        column: metric.as_str().to_string(),
        reason,
    };

    let value = match cell {
        Cell::Number(n) => *n,
        Cell::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| invalid(format!("'{}' is not a number", s.trim())))?,
        Cell::Empty => return Err(invalid("value is missing".to_string())),
        Cell::Other(s) => return Err(invalid(format!("'{}' is not a number", s))),
    };

    if !value.is_finite() || value < 0.0 {
        return Err(invalid(format!("{} is not a non-negative number", value)));
    }
    Ok(value)
}

/// Build a dataset from a header row and data rows.
///
/// Rows are `(sheet_row, cells)` with 1-based sheet row numbers for
/// diagnostics. Blank rows are skipped; every other row is kept in order.
pub fn clean_table<I>(headers: &[String], rows: I) -> Result<Dataset>
where
    I: IntoIterator<Item = (usize, Vec<Cell>)>,
{
    let roles = resolve_columns(headers)?;
    let mut records = Vec::new();

    for (row, cells) in rows {
        if cells.iter().all(Cell::is_blank) {
            continue;
        }

        let mut record = FoodRecord {
            food_item: String::new(),
            calories: 0.0,
            protein: 0.0,
            fat: 0.0,
            carbs: 0.0,
            fibre: 0.0,
        };

        for (col, role) in roles.iter().enumerate() {
            let cell = cells.get(col).unwrap_or(&Cell::Empty);
            match role {
                ColumnRole::FoodItem => record.food_item = name_cell(cell, row)?,
                ColumnRole::Metric(metric) => {
                    *record.metric_mut(*metric) = metric_cell(cell, row, *metric)?
                }
                ColumnRole::Dropped(_) | ColumnRole::Ignored => {}
            }
        }

        records.push(record);
    }

    Ok(Dataset::new(records))
}

/// Load the nutrition table from a sheet of a workbook.
///
/// Fails if the file or sheet is missing, if a drop target or schema column
/// is absent, or if a cell cannot be read as its column's type.
pub fn load_dataset<P: AsRef<Path>>(path: P, sheet: &str) -> Result<Dataset> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(DashboardError::ResourceNotFound(path.display().to_string()));
    }

    let mut workbook = open_workbook_auto(path)?;
    if !workbook.sheet_names().iter().any(|name| name == sheet) {
        return Err(DashboardError::SheetNotFound {
            path: path.display().to_string(),
            sheet: sheet.to_string(),
        });
    }

    let range = workbook.worksheet_range(sheet)?;
    let first_row = range.start().map(|(row, _)| row as usize).unwrap_or(0);
    let mut rows = range.rows();

    let headers: Vec<String> = rows
        .next()
        .map(|cells| cells.iter().map(|c| Cell::from(c).header_text()).collect())
        .unwrap_or_default();
    debug!(?headers, sheet, "read header row");

    // Sheet rows are 1-based and the header occupies the first one.
    let data_rows = rows.enumerate().map(|(offset, cells)| {
        (
            first_row + offset + 2,
            cells.iter().map(Cell::from).collect::<Vec<_>>(),
        )
    });

    let dataset = clean_table(&headers, data_rows)?;
    info!(
        path = %path.display(),
        sheet,
        rows = dataset.len(),
        "loaded dataset"
    );
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers() -> Vec<String> {
        [
            "Food Item",
            "Measure",
            "Calories",
            "Protein",
            "Fat",
            "Carbs",
            "Fibre",
            "",
            "Note: Protein, Fat, Carbs, Fibre, are measured in grams",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    fn row(name: &str, calories: f64) -> Vec<Cell> {
        vec![
            Cell::Text(name.to_string()),
            Cell::Text("1 cup".to_string()),
            Cell::Number(calories),
            Cell::Number(1.0),
            Cell::Number(2.0),
            Cell::Number(3.0),
            Cell::Number(4.0),
            Cell::Empty,
            Cell::Empty,
        ]
    }

    #[test]
    fn test_clean_table_keeps_rows_in_order() {
        let dataset = clean_table(
            &headers(),
            vec![(2, row("Apple", 52.0)), (3, row("Banana", 89.0))],
        )
        .unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.records()[0].food_item, "Apple");
        assert_eq!(dataset.records()[1].food_item, "Banana");
        assert_eq!(dataset.records()[1].calories, 89.0);
        assert_eq!(dataset.records()[1].fibre, 4.0);
    }

    #[test]
    fn test_missing_drop_target_fails() {
        for target in DropTarget::ALL {
            let headers: Vec<String> = headers()
                .into_iter()
                .filter(|h| !target.matches(h))
                .collect();
            let err = clean_table(&headers, Vec::new()).unwrap_err();
            assert!(
                matches!(err, DashboardError::MissingColumn(ref name) if name == target.label()),
                "unexpected error for {:?}: {}",
                target,
                err
            );
        }
    }

    #[test]
    fn test_missing_metric_column_fails() {
        let headers: Vec<String> = headers().into_iter().filter(|h| h != "Fat").collect();
        let err = clean_table(&headers, Vec::new()).unwrap_err();
        assert!(matches!(err, DashboardError::MissingColumn(ref name) if name == "Fat"));
    }

    #[test]
    fn test_unnamed_export_header_is_dropped() {
        let mut headers = headers();
        headers[7] = "Unnamed: 8".to_string();
        assert!(clean_table(&headers, Vec::new()).is_ok());
    }

    #[test]
    fn test_blank_rows_are_skipped() {
        let blank = vec![Cell::Empty; 9];
        let dataset =
            clean_table(&headers(), vec![(2, row("Apple", 52.0)), (3, blank)]).unwrap();
        assert_eq!(dataset.len(), 1);
    }

    #[test]
    fn test_numeric_text_is_accepted() {
        let mut cells = row("Oats", 0.0);
        cells[2] = Cell::Text(" 389 ".to_string());
        let dataset = clean_table(&headers(), vec![(2, cells)]).unwrap();
        assert_eq!(dataset.records()[0].calories, 389.0);
    }

    #[test]
    fn test_invalid_metric_cell_reports_row_and_column() {
        let mut cells = row("Oats", 0.0);
        cells[3] = Cell::Text("lots".to_string());
        let err = clean_table(&headers(), vec![(5, cells)]).unwrap_err();
        match err {
            DashboardError::InvalidCell { row, column, .. } => {
                assert_eq!(row, 5);
                assert_eq!(column, "Protein");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_negative_metric_is_rejected() {
        let mut cells = row("Oats", 0.0);
        cells[4] = Cell::Number(-2.0);
        assert!(matches!(
            clean_table(&headers(), vec![(2, cells)]),
            Err(DashboardError::InvalidCell { .. })
        ));
    }

    #[test]
    fn test_missing_name_is_rejected() {
        let mut cells = row("", 10.0);
        cells[0] = Cell::Empty;
        assert!(matches!(
            clean_table(&headers(), vec![(2, cells)]),
            Err(DashboardError::InvalidCell { .. })
        ));
    }

    #[test]
    fn test_missing_file_is_resource_not_found() {
        let err = load_dataset("does/not/exist.xlsx", "FoodList").unwrap_err();
        assert!(matches!(err, DashboardError::ResourceNotFound(_)));
    }
}
