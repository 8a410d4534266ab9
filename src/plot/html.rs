use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use plotly::common::Mode;
use plotly::{Plot, Scatter};

/// One named trace of the chart; x values are shared per chart but kept
/// per trace because plotly wants aligned pairs.
pub struct Trace {
    pub name: String,
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
}

impl Trace {
    pub fn new(name: &str, xs: Vec<f64>, ys: Vec<f64>) -> Self {
        Self {
            name: name.to_string(),
            xs,
            ys,
        }
    }
}

/// Render one chart to a self-contained HTML file. The plotly snippet is
/// wrapped in a page template carrying the title and axis labels. The
/// file is written to a temporary sibling and renamed, so the output is
/// either a complete chart or nothing.
pub fn write_chart(
    path: &Path,
    title: &str,
    x_label: &str,
    y_label: &str,
    traces: &[Trace],
) -> Result<()> {
    let mut plot = Plot::new();
    for trace in traces {
        let scatter = Scatter::new(trace.xs.clone(), trace.ys.clone())
            .mode(Mode::LinesMarkers)
            .name(&trace.name);
        plot.add_trace(scatter);
    }
    let plot_html = plot.to_inline_html(None);

    let html = format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<script src="https://cdn.plot.ly/plotly-latest.min.js"></script>
</head>
<body>
<h2 style="font-family:sans-serif;">{title}</h2>
<p style="font-family:sans-serif; color:#555;">x: {x_label} &mdash; y: {y_label}</p>
{plot_html}
</body>
</html>
"#,
        title = title,
        x_label = x_label,
        y_label = y_label,
        plot_html = plot_html
    );

    let tmp = path.with_extension("html.tmp");
    fs::write(&tmp, html).with_context(|| format!("writing {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("renaming into {}", path.display()))?;
    Ok(())
}
