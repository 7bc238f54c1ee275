use plotters::coord::Shift;
use plotters::prelude::*;

use crate::dashboard::constants::{CHART_HEIGHT, CHART_WIDTH};
use crate::models::ChartSpec;
use crate::{DashboardError, Result};

type DrawResult = std::result::Result<(), Box<dyn std::error::Error>>;
type Area<'a> = DrawingArea<SVGBackend<'a>, Shift>;

/// Render a chart to an SVG document.
///
/// The empty chart is drawn as bare axes, as the chart area shows before any
/// row is selected.
pub fn render_chart_svg(chart: &ChartSpec, y_label: &str) -> Result<String> {
    render_with(|root| {
        if chart.is_empty() || chart.categories.is_empty() {
            draw_empty(root)
        } else {
            draw_bars(root, chart, y_label)
        }
    })
}

/// Render a message in place of the chart.
pub fn render_error_svg(message: &str) -> Result<String> {
    render_with(|root| {
        root.fill(&WHITE)?;
        let style = ("sans-serif", 18).into_font().color(&RED);
        root.draw(&Text::new(
            message.to_string(),
            (20, (CHART_HEIGHT / 2) as i32),
            style,
        ))?;
        root.present()?;
        Ok(())
    })
}

fn render_with<F>(draw: F) -> Result<String>
where
    F: FnOnce(&Area<'_>) -> DrawResult,
{
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (CHART_WIDTH, CHART_HEIGHT))
            .into_drawing_area();
        draw(&root).map_err(|e| DashboardError::Render(e.to_string()))?;
    }
    Ok(svg)
}

fn draw_empty(root: &Area<'_>) -> DrawResult {
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(root)
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0f64..1f64, 0f64..1f64)?;
    chart.configure_mesh().draw()?;
    root.present()?;
    Ok(())
}

fn draw_bars(root: &Area<'_>, spec: &ChartSpec, y_label: &str) -> DrawResult {
    root.fill(&WHITE)?;

    let count = spec.categories.len() as u32;
    let max = spec.max_value();
    let top = if max > 0.0 { max * 1.1 } else { 1.0 };

    let mut chart = ChartBuilder::on(root)
        .caption(&spec.title, ("sans-serif", 22).into_font())
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d((0u32..count).into_segmented(), 0f64..top)?;

    let label = |value: &SegmentValue<u32>| match value {
        SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => spec
            .categories
            .get(*i as usize)
            .cloned()
            .unwrap_or_default(),
        _ => String::new(),
    };

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(spec.categories.len())
        .x_label_formatter(&label)
        .x_desc("FoodItem")
        .y_desc(y_label)
        .draw()?;

    chart.draw_series(
        Histogram::vertical(&chart)
            .style(BLUE.mix(0.7).filled())
            .margin(8)
            .data(
                spec.values
                    .iter()
                    .enumerate()
                    .map(|(i, value)| (i as u32, *value)),
            ),
    )?;

    root.present()?;
    Ok(())
}
