// HTML rendering for dashboard pages
use crate::domain::dashboard::{Dashboard, PageConfig, PageLayout, Panel, Section, SidebarState};
use crate::domain::time_series::TimeSeriesTable;
use crate::infrastructure::config::{PageDefinition, SiteConfig};
use crate::infrastructure::plotly_mapper::figure_to_plotly;
use std::fmt::Write;

const PLOTLY_JS: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

const STYLE: &str = "\
body{margin:0;font-family:system-ui,sans-serif;display:flex;color:#262730}\
aside{background:#f0f2f6;min-height:100vh;padding:1rem;box-sizing:border-box}\
aside a{display:block;padding:.3rem 0;color:#262730;text-decoration:none}\
main{flex:1;padding:2rem 3rem}\
main.centered{max-width:46rem;margin:0 auto}\
pre.intro{background:#f0f2f6;padding:1rem;white-space:pre-wrap}\
details.table{margin:1rem 0}\
table{border-collapse:collapse;font-size:.85rem}\
th,td{border:1px solid #e6e9ef;padding:.2rem .5rem;text-align:right}\
.error{background:#ffebee;color:#b71c1c;padding:1rem;border-radius:.3rem}";

pub fn render_home(site: &SiteConfig, pages: &[PageDefinition]) -> String {
    let mut body = String::new();
    let _ = write!(body, "<h1>{}</h1>", escape(&site.heading));
    if !site.intro.is_empty() {
        let _ = write!(body, "<pre class=\"intro\">{}</pre>", escape(&site.intro));
    }
    render_document(&site.page, pages, None, &body, false)
}

pub fn render_dashboard(dashboard: &Dashboard, pages: &[PageDefinition], slug: &str) -> String {
    let mut body = String::new();
    let _ = write!(body, "<h1>{}</h1>", escape(&dashboard.heading));
    for paragraph in dashboard.intro.split("\n\n").filter(|p| !p.trim().is_empty()) {
        let _ = write!(body, "<p>{}</p>", escape(paragraph.trim()));
    }

    for (index, section) in dashboard.sections.iter().enumerate() {
        render_section(&mut body, index, section);
    }

    let has_charts = dashboard.sections.iter().any(|s| s.panel.is_ok());
    render_document(&dashboard.page, pages, Some(slug), &body, has_charts)
}

fn render_section(out: &mut String, index: usize, section: &Section) {
    let _ = write!(out, "<section><h2>{}</h2>", escape(&section.heading));
    match &section.panel {
        Ok(panel) => render_panel(out, index, panel),
        Err(e) => {
            let _ = write!(
                out,
                "<div class=\"error\">Could not build this panel: {}</div>",
                escape(&e.to_string())
            );
        }
    }
    out.push_str("</section>");
}

fn render_panel(out: &mut String, index: usize, panel: &Panel) {
    out.push_str("<details class=\"table\"><summary>Table data</summary>");
    render_table(out, &panel.table);
    out.push_str("</details>");

    let figure = figure_to_plotly(&panel.figure);
    let _ = write!(
        out,
        "<div id=\"chart-{index}\"></div>\
         <script>(function(){{var f={};Plotly.newPlot(\"chart-{index}\",f.data,f.layout,{{responsive:true}});}})();</script>",
        script_json(&figure.to_string())
    );
}

fn render_table(out: &mut String, table: &TimeSeriesTable) {
    if table.is_empty() {
        out.push_str("<p>No observations available.</p>");
        return;
    }

    out.push_str("<table><thead><tr><th></th>");
    for column in table.columns() {
        let _ = write!(out, "<th>{}</th>", escape(column));
    }
    out.push_str("</tr></thead><tbody>");

    for (period, row) in table.periods().iter().zip(table.rows()) {
        let _ = write!(out, "<tr><th>{}</th>", escape(period));
        for value in row {
            match value {
                Some(v) => {
                    let _ = write!(out, "<td>{}</td>", format_value(*v));
                }
                None => out.push_str("<td></td>"),
            }
        }
        out.push_str("</tr>");
    }
    out.push_str("</tbody></table>");
}

fn render_document(
    page: &PageConfig,
    pages: &[PageDefinition],
    current: Option<&str>,
    body: &str,
    with_plotly: bool,
) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
         <title>{title}</title>\
         <link rel=\"icon\" href=\"data:image/svg+xml,<svg xmlns=%22http://www.w3.org/2000/svg%22 viewBox=%220 0 100 100%22><text y=%22.9em%22 font-size=%2290%22>{icon}</text></svg>\">\
         <style>{STYLE}</style>",
        title = escape(&page.title),
        icon = page_icon(&page.icon),
    );
    if with_plotly {
        let _ = write!(html, "<script src=\"{}\"></script>", PLOTLY_JS);
    }
    html.push_str("</head><body>");

    let open = match page.sidebar {
        SidebarState::Expanded => " open",
        SidebarState::Collapsed => "",
    };
    let _ = write!(html, "<aside><details{}><summary>Pages</summary>", open);
    let _ = write!(
        html,
        "<a href=\"/\"{}>Home</a>",
        if current.is_none() { " aria-current=\"page\"" } else { "" }
    );
    for p in pages {
        let _ = write!(
            html,
            "<a href=\"/pages/{}\"{}>{}</a>",
            urlencoding::encode(&p.slug),
            if current == Some(p.slug.as_str()) { " aria-current=\"page\"" } else { "" },
            escape(&p.heading)
        );
    }
    html.push_str("</details></aside>");

    let class = match page.layout {
        PageLayout::Wide => "wide",
        PageLayout::Centered => "centered",
    };
    let _ = write!(html, "<main class=\"{}\">{}</main></body></html>", class, body);
    html
}

/// Emoji for the shortcodes used in page configs; anything else is shown as-is
fn page_icon(icon: &str) -> String {
    let emoji = match icon {
        "chart_with_upwards_trend" => "📈",
        "chart_with_downwards_trend" => "📉",
        "bar_chart" => "📊",
        "earth_asia" => "🌏",
        "moneybag" => "💰",
        other => other,
    };
    escape(emoji)
}

fn format_value(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{:.0}", v)
    } else {
        let s = format!("{:.4}", v);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// JSON embedded in a `<script>` must not close the tag early
fn script_json(json: &str) -> String {
    json.replace("</", "<\\/")
}
