//! HTML rendering
//!
//! Produces a single self-contained page: inline CSS and an inline SVG
//! timeline, no scripts and no external assets. Hovering a bar shows the
//! task details through the SVG `<title>` tooltip.

use super::{ChartRow, GanttChart, LegendEntry, LegendGroup, TimeAxis};
use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::path::Path;

const MARGIN_LEFT: f64 = 20.0;
const MARGIN_RIGHT: f64 = 150.0;
const MARGIN_TOP: f64 = 70.0;
const MARGIN_BOTTOM: f64 = 20.0;

/// Room for the rotated "Task" axis title
const Y_TITLE_SPACE: f64 = 30.0;
/// Tick labels plus the "Date" axis title
const X_AXIS_SPACE: f64 = 64.0;
/// Rough advance width of a 12px glyph
const CHAR_WIDTH: f64 = 7.0;
const MIN_PLOT_WIDTH: f64 = 200.0;
const LEGEND_ROW: f64 = 20.0;
const SWATCH: f64 = 10.0;

const TITLE_FONT: &str = "'Arial Black', Arial, sans-serif";
const PLOT_BACKGROUND: &str = "#E5ECF6";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Pixel geometry derived from the chart contents
struct Layout {
    width: f64,
    height: f64,
    plot_left: f64,
    plot_right: f64,
    plot_top: f64,
    plot_bottom: f64,
    row_height: f64,
    legend_left: f64,
}

impl Layout {
    fn new(chart: &GanttChart) -> Self {
        let width = f64::from(chart.width);
        let row_height = f64::from(chart.row_height);

        let longest_name = chart
            .rows
            .iter()
            .map(|r| r.task.name.chars().count())
            .max()
            .unwrap_or(0);
        let gutter = (longest_name as f64 * CHAR_WIDTH + 12.0).min(width * 0.4);

        let longest_legend = chart
            .legend
            .iter()
            .map(|e| e.label.chars().count())
            .max()
            .unwrap_or(0);
        let legend_width = longest_legend as f64 * CHAR_WIDTH + SWATCH + 24.0;

        let plot_left = MARGIN_LEFT + Y_TITLE_SPACE + gutter;
        let reserved_right = MARGIN_RIGHT.max(legend_width + 16.0);
        let plot_right = (width - reserved_right).max(plot_left + MIN_PLOT_WIDTH);
        let width = width.max(plot_right + reserved_right);

        let plot_top = MARGIN_TOP;
        let plot_bottom = plot_top + row_height * chart.rows.len().max(1) as f64;

        let legend_height = LEGEND_ROW * (chart.legend.len() as f64 + 3.0);
        let height = (plot_bottom + X_AXIS_SPACE + MARGIN_BOTTOM).max(plot_top + legend_height);

        Self {
            width,
            height,
            plot_left,
            plot_right,
            plot_top,
            plot_bottom,
            row_height,
            legend_left: plot_right + 16.0,
        }
    }

    fn plot_width(&self) -> f64 {
        self.plot_right - self.plot_left
    }

    fn x(&self, axis: &TimeAxis, at: chrono::NaiveDateTime) -> f64 {
        self.plot_left + axis.position(at) * self.plot_width()
    }

    fn row_top(&self, index: usize) -> f64 {
        self.plot_top + index as f64 * self.row_height
    }
}

/// Render a chart as a standalone HTML page
pub fn render_html(chart: &GanttChart) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{css}</style>
</head>
<body>
    <div class="chart">
{svg}
    </div>
    <footer>Generated by taskgantt v{version}</footer>
</body>
</html>
"#,
        title = html_escape(&chart.title),
        css = inline_css(),
        svg = render_svg(chart),
        version = env!("CARGO_PKG_VERSION"),
    )
}

/// Render and write a chart to `path`, creating parent directories
pub fn write_html(chart: &GanttChart, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    std::fs::write(path, render_html(chart))
        .with_context(|| format!("Failed to write chart to {}", path.display()))?;

    log::info!("Wrote {} rows to {}", chart.rows.len(), path.display());
    Ok(())
}

fn inline_css() -> &'static str {
    r#"
body {
    margin: 0;
    padding: 1rem;
    background: #ffffff;
    font-family: Arial, sans-serif;
    color: #2a3f5f;
}
.chart { overflow-x: auto; }
.bar { cursor: default; }
.bar:hover { opacity: 0.75; }
footer {
    margin-top: 0.5rem;
    font-size: 0.75rem;
    color: #9ca3af;
}
"#
}

fn render_svg(chart: &GanttChart) -> String {
    let layout = Layout::new(chart);
    let mut svg = String::new();

    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{:.0}" height="{:.0}" viewBox="0 0 {:.0} {:.0}">"#,
        layout.width, layout.height, layout.width, layout.height
    );

    let _ = writeln!(
        svg,
        r#"<text x="{:.1}" y="{:.1}" font-family="{}" font-size="20" fill="black">{}</text>"#,
        MARGIN_LEFT,
        MARGIN_TOP / 2.0 + 7.0,
        TITLE_FONT,
        html_escape(&chart.title)
    );

    let _ = writeln!(
        svg,
        r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}"/>"#,
        layout.plot_left,
        layout.plot_top,
        layout.plot_width(),
        layout.plot_bottom - layout.plot_top,
        PLOT_BACKGROUND
    );

    if let Some(axis) = &chart.axis {
        svg.push_str(&render_x_axis(&layout, axis));
    }
    svg.push_str(&render_y_axis(&layout, &chart.rows));

    if let Some(axis) = &chart.axis {
        for trace in &chart.traces {
            let _ = writeln!(
                svg,
                r#"<g class="trace" data-section="{}">"#,
                html_escape(&trace.section)
            );
            for &index in &trace.rows {
                svg.push_str(&render_bar(&layout, axis, index, &chart.rows[index]));
            }
            svg.push_str("</g>\n");
        }
    }

    svg.push_str(&render_legend(&layout, &chart.legend));
    svg.push_str("</svg>");
    svg
}

fn render_x_axis(layout: &Layout, axis: &TimeAxis) -> String {
    let mut out = String::from("<g class=\"x-axis\">\n");

    for tick in &axis.ticks {
        let x = layout.x(axis, tick.at);
        let _ = writeln!(
            out,
            r#"<line x1="{x:.1}" y1="{:.1}" x2="{x:.1}" y2="{:.1}" stroke="white" stroke-width="1"/>"#,
            layout.plot_top, layout.plot_bottom
        );
        let _ = writeln!(
            out,
            r#"<text x="{x:.1}" y="{:.1}" text-anchor="middle" font-size="12">{}</text>"#,
            layout.plot_bottom + 18.0,
            html_escape(&tick.label)
        );
    }

    let _ = writeln!(
        out,
        r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-family="{}" font-size="18" fill="black">Date</text>"#,
        layout.plot_left + layout.plot_width() / 2.0,
        layout.plot_bottom + 50.0,
        TITLE_FONT
    );

    out.push_str("</g>\n");
    out
}

/// Category labels, earliest task at the top
fn render_y_axis(layout: &Layout, rows: &[ChartRow]) -> String {
    let mut out = String::from("<g class=\"y-axis\">\n");

    for (index, row) in rows.iter().enumerate() {
        let _ = writeln!(
            out,
            r#"<text x="{:.1}" y="{:.1}" text-anchor="end" dominant-baseline="middle" font-size="12">{}</text>"#,
            layout.plot_left - 6.0,
            layout.row_top(index) + layout.row_height / 2.0,
            html_escape(&row.task.name)
        );
    }

    let mid = (layout.plot_top + layout.plot_bottom) / 2.0;
    let x = MARGIN_LEFT + 10.0;
    let _ = writeln!(
        out,
        r#"<text x="{x:.1}" y="{mid:.1}" text-anchor="middle" font-family="{}" font-size="18" fill="black" transform="rotate(-90, {x:.1}, {mid:.1})">Task</text>"#,
        TITLE_FONT
    );

    out.push_str("</g>\n");
    out
}

fn render_bar(layout: &Layout, axis: &TimeAxis, index: usize, row: &ChartRow) -> String {
    let Some(bar) = row.bar else {
        return String::new();
    };

    let x = layout.x(axis, bar.start);
    let width = (layout.x(axis, bar.end) - x).max(1.0);
    let y = layout.row_top(index) + layout.row_height * 0.15;
    let height = layout.row_height * 0.7;

    format!(
        r#"<rect class="bar" x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}" stroke="{}" stroke-width="2"><title>{}</title></rect>
"#,
        x,
        y,
        width,
        height,
        html_escape(&row.fill),
        html_escape(&row.border),
        html_escape(&hover_text(row))
    )
}

/// Tooltip body for one task
fn hover_text(row: &ChartRow) -> String {
    let task = &row.task;
    let when = |at: Option<chrono::NaiveDateTime>| {
        at.map(|d| d.format(TIMESTAMP_FORMAT).to_string())
            .unwrap_or_else(|| "-".to_string())
    };

    let notes = if task.notes.is_empty() { "-" } else { task.notes.as_str() };

    format!(
        "{}\nStart Date: {}\nDue Date: {}\nSection/Column: {}\nAssignee: {}\nPriority: {}\nnotes: {}",
        task.name,
        when(task.start),
        when(task.due),
        task.section_label(),
        task.assignee,
        task.priority.as_deref().unwrap_or("-"),
        notes,
    )
}

fn render_legend(layout: &Layout, entries: &[LegendEntry]) -> String {
    let mut out = String::from("<g class=\"legend\">\n");
    let x = layout.legend_left;
    let mut y = layout.plot_top;

    let _ = writeln!(
        out,
        r#"<text x="{x:.1}" y="{y:.1}" font-family="{}" font-size="16" fill="black">Legend</text>"#,
        TITLE_FONT
    );
    y += LEGEND_ROW;

    let mut previous: Option<LegendGroup> = None;
    for entry in entries {
        if previous.is_some_and(|group| group != entry.group) {
            y += LEGEND_ROW / 2.0;
        }
        previous = Some(entry.group);

        let (stroke, stroke_width) = match &entry.border {
            Some(color) => (html_escape(color), 2),
            None => ("none".to_string(), 0),
        };
        let _ = writeln!(
            out,
            r#"<rect x="{x:.1}" y="{:.1}" width="{SWATCH}" height="{SWATCH}" fill="{}" stroke="{}" stroke-width="{}"/>"#,
            y - SWATCH + 1.0,
            html_escape(&entry.fill),
            stroke,
            stroke_width
        );
        let _ = writeln!(
            out,
            r#"<text x="{:.1}" y="{y:.1}" font-size="12">{}</text>"#,
            x + SWATCH + 8.0,
            html_escape(&entry.label)
        );
        y += LEGEND_ROW;
    }

    out.push_str("</g>\n");
    out
}

/// Escape HTML special characters
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
