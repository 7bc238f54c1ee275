//! HTML page for the dashboard.
//!
//! The page is rendered once per request from the static layout. Table paging
//! and chart refreshes are done by a small script talking to the JSON and SVG
//! routes, so the browser holds the selection state for its own session.

use crate::dashboard::{Layout, TablePage};
use crate::error::Result;

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// JSON safe to embed inside a `<script>` element.
fn script_json<T: serde::Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

/// Render the dashboard page with the first table page embedded.
pub fn render_dashboard(layout: &Layout, first_page: &TablePage<'_>) -> Result<String> {
    let options: String = layout
        .metric_selector
        .options
        .iter()
        .map(|o| {
            let selected = if o.value == layout.metric_selector.value.as_str() {
                " selected"
            } else {
                ""
            };
            format!(
                r#"<option value="{}"{}>{}</option>"#,
                escape_html(&o.value),
                selected,
                escape_html(&o.label)
            )
        })
        .collect();

    let header_cells: String = layout
        .table
        .columns
        .iter()
        .map(|c| format!("<th>{}</th>", escape_html(&c.name)))
        .collect();

    let layout_json = script_json(layout)?;
    let page_json = script_json(first_page)?;

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{header}</title>
    <style>
        body {{ font-family: -apple-system, 'Segoe UI', Helvetica, Arial, sans-serif; margin: 2rem; color: #222; }}
        select {{ width: 50%; padding: 0.3rem; margin-bottom: 1rem; }}
        table {{ border-collapse: collapse; width: 100%; }}
        th, td {{ border: 1px solid #ddd; padding: 0.3rem 0.6rem; text-align: right; }}
        th:nth-child(2), td:nth-child(2) {{ text-align: left; }}
        tr.selected {{ background: #eef4ff; }}
        .pager {{ margin: 0.5rem 0 1.5rem; }}
        #{graph_id} svg {{ max-width: 100%; height: auto; }}
        footer {{ margin-top: 2rem; color: #777; }}
    </style>
</head>
<body>
    <div>{header}</div>
    <hr>
    <select id="{dropdown_id}">{options}</select>
    <table id="{table_id}">
        <thead><tr><th></th>{header_cells}</tr></thead>
        <tbody></tbody>
    </table>
    <div class="pager">
        <button id="prev-page">&lsaquo;</button>
        <span id="page-label"></span>
        <button id="next-page">&rsaquo;</button>
    </div>
    <div id="{graph_id}"></div>
    <footer>{footer}</footer>
    <script>
    const layout = {layout_json};
    let current = {page_json};
    let selected = new Set();

    const dropdown = document.getElementById(layout.metric_selector.id);
    const graph = document.getElementById(layout.chart.id);
    const body = document.querySelector('#' + layout.table.id + ' tbody');

    function renderTable() {{
        body.innerHTML = '';
        current.rows.forEach((row, index) => {{
            const tr = document.createElement('tr');
            const pick = document.createElement('td');
            const box = document.createElement('input');
            box.type = 'checkbox';
            box.checked = selected.has(index);
            box.addEventListener('change', () => {{
                if (box.checked) {{ selected.add(index); }} else {{ selected.delete(index); }}
                tr.classList.toggle('selected', box.checked);
                refreshChart();
            }});
            pick.appendChild(box);
            tr.appendChild(pick);
            layout.table.columns.forEach(col => {{
                const td = document.createElement('td');
                td.textContent = row[col.id];
                tr.appendChild(td);
            }});
            body.appendChild(tr);
        }});
        document.getElementById('page-label').textContent =
            'Page ' + (current.page + 1) + ' of ' + current.page_count;
    }}

    async function refreshChart() {{
        const rows = Array.from(selected).sort((a, b) => a - b).join(',');
        const params = new URLSearchParams({{ metric: dropdown.value, page: current.page, rows }});
        const response = await fetch('/api/chart.svg?' + params.toString());
        graph.innerHTML = await response.text();
    }}

    async function goTo(page) {{
        if (page < 0 || page >= current.page_count) {{ return; }}
        const response = await fetch('/api/table?page=' + page);
        if (!response.ok) {{ return; }}
        current = await response.json();
        selected = new Set();
        renderTable();
        refreshChart();
    }}

    dropdown.addEventListener('change', refreshChart);
    document.getElementById('prev-page').addEventListener('click', () => goTo(current.page - 1));
    document.getElementById('next-page').addEventListener('click', () => goTo(current.page + 1));

    renderTable();
    refreshChart();
    </script>
</body>
</html>
"#,
        header = escape_html(layout.header),
        footer = escape_html(layout.footer),
        dropdown_id = layout.metric_selector.id,
        table_id = layout.table.id,
        graph_id = layout.chart.id,
        options = options,
        header_cells = header_cells,
        layout_json = layout_json,
        page_json = page_json,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::build_layout;
    use crate::data::Dataset;
    use crate::models::FoodRecord;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Fish & Chips</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Fish &amp; Chips&lt;/a&gt;"
        );
    }

    #[test]
    fn test_script_json_cannot_close_script() {
        let json = script_json(&"</script>").unwrap();
        assert!(!json.contains("</script>"));
    }

    #[test]
    fn test_page_contains_layout_parts() {
        let dataset = Dataset::new(vec![FoodRecord {
            food_item: "Rice </script>".to_string(),
            calories: 130.0,
            protein: 2.7,
            fat: 0.3,
            carbs: 28.0,
            fibre: 0.4,
        }]);
        let layout = build_layout(&dataset);
        let page = layout.table.page(&dataset, 0).unwrap();
        let html = render_dashboard(&layout, &page).unwrap();

        assert!(html.contains("<div>Food Data</div>"));
        assert!(html.contains(r#"<option value="Calories" selected>Calories</option>"#));
        assert!(html.contains(r#"<option value="Fibre">Fibre</option>"#));
        assert!(html.contains("<th>FoodItem</th>"));
        assert!(html.contains(r#"<div id="food-graph"></div>"#));
        assert!(html.contains("Rice <\\/script>"));
        assert_eq!(html.matches("</script>").count(), 1);
    }
}
