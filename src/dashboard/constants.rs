/// Workbook read when no path is configured.
pub const DEFAULT_DATA_FILE: &str = "foodinfo.xlsx";

/// Sheet holding the nutrition table.
pub const SHEET_NAME: &str = "FoodList";

/// Rows per table page.
pub const PAGE_SIZE: usize = 10;

/// Debug mode when neither config nor CLI say otherwise.
pub const DEBUG_MODE: bool = true;

/// Address the dashboard listens on by default.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8050";

// ─────────────────────────────────────────────────────────────────────────────
// Layout ids and static text
// ─────────────────────────────────────────────────────────────────────────────

pub const HEADER_TEXT: &str = "Food Data";
pub const FOOTER_TEXT: &str = "2023 Kareem Dibs";

pub const METRIC_DROPDOWN_ID: &str = "metric-dropdown";
pub const FOOD_TABLE_ID: &str = "food-table";
pub const FOOD_GRAPH_ID: &str = "food-graph";

// ─────────────────────────────────────────────────────────────────────────────
// Chart rendering
// ─────────────────────────────────────────────────────────────────────────────

pub const CHART_WIDTH: u32 = 900;
pub const CHART_HEIGHT: u32 = 450;

/// Width of the longest bar in the terminal chart.
pub const TEXT_BAR_WIDTH: usize = 40;
