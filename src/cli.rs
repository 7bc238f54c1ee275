use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Food Dashboard: browse a nutrition spreadsheet and chart selected foods.
#[derive(Parser, Debug)]
#[command(name = "food_dashboard")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the nutrition workbook.
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Sheet holding the nutrition table.
    #[arg(long)]
    pub sheet: Option<String>,

    /// Path to a TOML config file (defaults to dashboard.toml if present).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the dashboard over HTTP.
    Serve {
        /// Address to listen on.
        #[arg(long)]
        bind: Option<String>,

        /// Enable debug logging.
        #[arg(long)]
        debug: bool,
    },

    /// Print one page of the table.
    Table {
        /// Page number, starting at 0.
        #[arg(long, default_value = "0")]
        page: usize,
    },

    /// Print the chart for a selection.
    Chart {
        /// Metric to chart.
        #[arg(short, long, default_value = "Calories")]
        metric: String,

        /// Selected row indices on the page (comma-separated).
        #[arg(short, long, value_delimiter = ',')]
        rows: Vec<usize>,

        /// Page the row indices refer to.
        #[arg(long, default_value = "0")]
        page: usize,
    },

    /// Write the cleaned table to a CSV file.
    Export {
        /// Output CSV path.
        #[arg(short, long, default_value = "foodinfo.csv")]
        output: PathBuf,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Serve {
            bind: None,
            debug: false,
        }
    }
}
