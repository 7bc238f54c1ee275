mod dataset;
mod export;
mod loader;

pub use dataset::Dataset;
pub use export::{write_csv, write_csv_file};
pub use loader::{Cell, DropTarget, clean_table, load_dataset};
