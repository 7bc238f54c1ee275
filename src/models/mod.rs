mod chart;
mod food;
mod selection;

pub use chart::{ChartKind, ChartSpec};
pub use food::{FOOD_ITEM_COLUMN, FoodRecord, Metric};
pub use selection::SelectionState;
