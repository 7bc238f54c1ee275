pub mod cli;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod error;
pub mod interface;
pub mod models;
pub mod server;

pub use error::{DashboardError, Result};
pub use models::{ChartSpec, FoodRecord, Metric, SelectionState};
