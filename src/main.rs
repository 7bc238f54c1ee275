use clap::Parser;
use tracing_subscriber::EnvFilter;

use food_dashboard_rs::cli::{Cli, Command};
use food_dashboard_rs::config::{Settings, load_settings};
use food_dashboard_rs::dashboard::{build_layout, update_chart};
use food_dashboard_rs::data::{Dataset, load_dataset, write_csv_file};
use food_dashboard_rs::error::{DashboardError, Result};
use food_dashboard_rs::interface::{display_chart, display_table_page};
use food_dashboard_rs::models::SelectionState;
use food_dashboard_rs::server;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(debug: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if debug { "debug" } else { "info" }));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut settings = load_settings(cli.config.as_deref())?;

    if let Some(file) = cli.file {
        settings.data_file = file;
    }
    if let Some(sheet) = cli.sheet {
        settings.sheet = sheet;
    }

    let command = cli.command.unwrap_or_default();
    if let Command::Serve { bind, debug } = &command {
        if let Some(bind) = bind {
            settings.bind_addr = bind.clone();
        }
        settings.debug |= *debug;
    }

    init_tracing(settings.debug);

    // Nothing starts with a partially loaded table.
    let dataset = load_dataset(&settings.data_file, &settings.sheet)?;

    match command {
        Command::Serve { .. } => cmd_serve(&settings, dataset),
        Command::Table { page } => cmd_table(&dataset, page),
        Command::Chart { metric, rows, page } => cmd_chart(&dataset, metric, rows, page),
        Command::Export { output } => cmd_export(&dataset, &output),
    }
}

/// Serve the dashboard over HTTP.
fn cmd_serve(settings: &Settings, dataset: Dataset) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server::serve(settings, dataset))
}

/// Print one page of the table.
fn cmd_table(dataset: &Dataset, page: usize) -> Result<()> {
    let layout = build_layout(dataset);
    let table_page = layout.table.page(dataset, page).ok_or_else(|| {
        DashboardError::InvalidInput(format!(
            "page {} does not exist ({} pages)",
            page, layout.table.page_count
        ))
    })?;

    display_table_page(&table_page);
    Ok(())
}

/// Print the chart for the selected rows of a page.
fn cmd_chart(dataset: &Dataset, metric: String, rows: Vec<usize>, page: usize) -> Result<()> {
    let selection = SelectionState::new(metric, page, rows);
    let chart = update_chart(dataset, &selection)?;
    display_chart(&chart);
    Ok(())
}

/// Write the cleaned table to CSV.
fn cmd_export(dataset: &Dataset, output: &std::path::Path) -> Result<()> {
    write_csv_file(dataset, output)?;
    println!("Wrote {} rows to {}", dataset.len(), output.display());
    Ok(())
}
