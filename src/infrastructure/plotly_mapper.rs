// Mapper to convert domain figures to plotly.js figure JSON
use crate::domain::figure::{Figure, Trace};
use crate::domain::grid::{GridCell, SubplotGrid};
use serde_json::{json, Map, Value};

const TRACE_MODE: &str = "lines+markers";
const TITLE_FONT_SIZE: u32 = 16;

/// `{ "data": [...], "layout": {...} }` ready for `Plotly.newPlot`
pub fn figure_to_plotly(figure: &Figure) -> Value {
    let grid = &figure.grid;

    let data: Vec<Value> = figure.traces.iter().map(|t| trace_to_plotly(t, grid)).collect();

    let mut layout = Map::new();
    let mut annotations = Vec::with_capacity(figure.traces.len());

    for (trace, title) in figure.traces.iter().zip(figure.subplot_titles()) {
        let suffix = axis_suffix(trace.cell, grid);
        let (x0, x1) = x_domain(trace.cell, grid);
        let (y0, y1) = y_domain(trace.cell, grid);

        layout.insert(
            format!("xaxis{}", suffix),
            json!({ "domain": [x0, x1], "anchor": format!("y{}", suffix), "type": "category" }),
        );
        layout.insert(
            format!("yaxis{}", suffix),
            json!({ "domain": [y0, y1], "anchor": format!("x{}", suffix) }),
        );
        annotations.push(json!({
            "text": title,
            "x": (x0 + x1) / 2.0,
            "y": y1,
            "xref": "paper",
            "yref": "paper",
            "xanchor": "center",
            "yanchor": "bottom",
            "showarrow": false,
            "font": { "size": TITLE_FONT_SIZE },
        }));
    }

    layout.insert("annotations".to_string(), Value::Array(annotations));
    layout.insert("height".to_string(), json!(figure.height));
    layout.insert("showlegend".to_string(), json!(figure.show_legend));

    json!({ "data": data, "layout": Value::Object(layout) })
}

fn trace_to_plotly(trace: &Trace, grid: &SubplotGrid) -> Value {
    let suffix = axis_suffix(trace.cell, grid);
    json!({
        "type": "scatter",
        "mode": TRACE_MODE,
        "name": trace.name,
        "x": trace.x,
        "y": trace.y,
        "xaxis": format!("x{}", suffix),
        "yaxis": format!("y{}", suffix),
    })
}

/// Plotly names the first axis pair `x`/`y`, then `x2`/`y2`, ...
fn axis_suffix(cell: GridCell, grid: &SubplotGrid) -> String {
    match cell.index(grid.columns()) {
        1 => String::new(),
        n => n.to_string(),
    }
}

// Spacing follows plotly's make_subplots defaults
fn x_domain(cell: GridCell, grid: &SubplotGrid) -> (f64, f64) {
    let cols = grid.columns() as f64;
    let spacing = 0.2 / cols;
    let width = (1.0 - spacing * (cols - 1.0)) / cols;
    let start = (cell.col - 1) as f64 * (width + spacing);
    (start, start + width)
}

fn y_domain(cell: GridCell, grid: &SubplotGrid) -> (f64, f64) {
    let rows = grid.rows() as f64;
    let spacing = 0.3 / rows;
    let height = (1.0 - spacing * (rows - 1.0)) / rows;
    let top = 1.0 - (cell.row - 1) as f64 * (height + spacing);
    ((top - height).max(0.0), top)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::grid::layout_grid;

    fn figure(count: usize) -> Figure {
        let grid = layout_grid(count).unwrap();
        let traces = grid
            .cells()
            .iter()
            .enumerate()
            .map(|(k, cell)| Trace {
                name: format!("IND.{}", k),
                label: format!("Indicator {}", k),
                x: vec!["2019".to_string(), "2020".to_string()],
                y: vec![Some(k as f64), None],
                cell: *cell,
            })
            .collect();
        Figure::new(grid, traces, 300)
    }

    fn close(a: &Value, b: f64) -> bool {
        (a.as_f64().unwrap() - b).abs() < 1e-9
    }

    #[test]
    fn test_traces_use_row_major_axes() {
        let plotly = figure(3);
        let plotly = figure_to_plotly(&plotly);
        let data = plotly["data"].as_array().unwrap();

        let axes: Vec<(&str, &str)> = data
            .iter()
            .map(|t| (t["xaxis"].as_str().unwrap(), t["yaxis"].as_str().unwrap()))
            .collect();
        assert_eq!(axes, vec![("x", "y"), ("x2", "y2"), ("x3", "y3")]);
        assert_eq!(data[0]["mode"], "lines+markers");
        assert_eq!(data[1]["name"], "IND.1");
    }

    #[test]
    fn test_missing_values_are_null() {
        let plotly = figure_to_plotly(&figure(1));
        assert_eq!(plotly["data"][0]["y"], json!([0.0, null]));
    }

    #[test]
    fn test_layout_height_legend_and_titles() {
        let plotly = figure_to_plotly(&figure(5));
        let layout = &plotly["layout"];

        assert_eq!(layout["height"], 900);
        assert_eq!(layout["showlegend"], false);

        let titles: Vec<&str> = layout["annotations"]
            .as_array()
            .unwrap()
            .iter()
            .map(|a| a["text"].as_str().unwrap())
            .collect();
        assert_eq!(
            titles,
            vec!["Indicator 0", "Indicator 1", "Indicator 2", "Indicator 3", "Indicator 4"]
        );

        // Trailing empty cell gets no axes
        assert!(layout.get("xaxis5").is_some());
        assert!(layout.get("xaxis6").is_none());
    }

    #[test]
    fn test_domains_two_by_two() {
        let layout = figure_to_plotly(&figure(4))["layout"].clone();

        // Horizontal spacing 0.1, vertical spacing 0.15
        assert!(close(&layout["xaxis"]["domain"][0], 0.0));
        assert!(close(&layout["xaxis"]["domain"][1], 0.45));
        assert!(close(&layout["xaxis2"]["domain"][0], 0.55));
        assert!(close(&layout["xaxis2"]["domain"][1], 1.0));
        assert!(close(&layout["yaxis"]["domain"][0], 0.575));
        assert!(close(&layout["yaxis"]["domain"][1], 1.0));
        assert!(close(&layout["yaxis3"]["domain"][0], 0.0));
        assert!(close(&layout["yaxis3"]["domain"][1], 0.425));
        assert_eq!(layout["xaxis4"]["anchor"], "y4");
    }
}
