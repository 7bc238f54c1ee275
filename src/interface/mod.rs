pub mod html;
pub mod render;
pub mod svg;

pub use html::render_dashboard;
pub use render::{display_chart, display_table_page};
pub use svg::{render_chart_svg, render_error_svg};
