use crate::dashboard::TablePage;
use crate::dashboard::constants::TEXT_BAR_WIDTH;
use crate::data::Dataset;
use crate::models::{ChartSpec, Metric};

/// Number of bar characters for `value` when `max` fills `width`.
fn bar_length(value: f64, max: f64, width: usize) -> usize {
    if max <= 0.0 || value <= 0.0 {
        return 0;
    }
    ((value / max) * width as f64).round() as usize
}

/// Display one page of the table, numbering rows as the page displays them.
pub fn display_table_page(page: &TablePage<'_>) {
    println!();
    println!("=== Food Data (page {} of {}) ===", page.page + 1, page.page_count);
    println!();

    if page.rows.is_empty() {
        println!("(no rows)");
        println!();
        return;
    }

    let name_width = page
        .rows
        .iter()
        .map(|r| r.food_item.len())
        .max()
        .unwrap_or(10)
        .max("FoodItem".len());

    let columns = Dataset::columns();
    print!("{:>3}  {:<width$}", "#", columns[0], width = name_width);
    for column in &columns[1..] {
        print!(" {:>9}", column);
    }
    println!();

    for (i, record) in page.rows.iter().enumerate() {
        print!("{:>3}  {:<width$}", i, record.food_item, width = name_width);
        for metric in Metric::ALL {
            print!(" {:>9.1}", record.metric(metric));
        }
        println!();
    }

    println!();
}

/// Display a chart as horizontal text bars.
pub fn display_chart(chart: &ChartSpec) {
    if chart.is_empty() {
        println!("No rows selected.");
        return;
    }

    println!();
    println!("=== {} ===", chart.title);
    println!();

    let max_name_len = chart.categories.iter().map(|c| c.len()).max().unwrap_or(10);
    let max = chart.max_value();

    for (name, value) in chart.categories.iter().zip(&chart.values) {
        println!(
            "{:<width$} | {:<bar_width$} {:.1}",
            name,
            "#".repeat(bar_length(*value, max, TEXT_BAR_WIDTH)),
            value,
            width = max_name_len,
            bar_width = TEXT_BAR_WIDTH
        );
    }

    println!();
    println!("Bars: {}", chart.categories.len());
    println!();
}
