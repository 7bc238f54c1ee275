use std::io::Write;
use std::path::Path;

use crate::data::Dataset;
use crate::error::Result;

/// Write the cleaned table as CSV to any writer.
pub fn write_csv<W: Write>(dataset: &Dataset, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    wtr.write_record(Dataset::columns())?;
    for record in dataset.records() {
        wtr.write_record(record.to_cells())?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write the cleaned table to a CSV file.
pub fn write_csv_file(dataset: &Dataset, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_csv(dataset, file)
}
