pub mod constants;
pub mod layout;
pub mod reactor;

pub use constants::*;
pub use layout::{
    ChartPlaceholder, Layout, MetricSelector, RowSelectable, SelectorOption, TableColumn,
    TablePage, TableView, build_layout,
};
pub use reactor::update_chart;
