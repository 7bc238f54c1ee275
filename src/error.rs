use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("Spreadsheet not found: {0}")]
    ResourceNotFound(String),

    #[error("Sheet '{sheet}' not found in {path}")]
    SheetNotFound { path: String, sheet: String },

    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("Invalid value in row {row}, column '{column}': {reason}")]
    InvalidCell {
        row: usize,
        column: String,
        reason: String,
    },

    #[error("Unknown metric '{name}'{}", suggestion_hint(.suggestion))]
    InvalidMetric {
        name: String,
        suggestion: Option<String>,
    },

    #[error("Selected row {index} is outside page {page} ({len} rows displayed)")]
    InvalidSelection { index: usize, page: usize, len: usize },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Chart rendering failed: {0}")]
    Render(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Workbook error: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),
}

fn suggestion_hint(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(name) => format!(" (did you mean '{}'?)", name),
        None => String::new(),
    }
}

impl DashboardError {
    /// Whether the error belongs to a single interaction rather than to startup.
    pub fn is_interaction_error(&self) -> bool {
        matches!(
            self,
            DashboardError::InvalidMetric { .. }
                | DashboardError::InvalidSelection { .. }
                | DashboardError::InvalidInput(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
