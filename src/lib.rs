//! taskgantt - Task exports to Gantt timelines
//!
//! Loads project tasks from a JSON export or a tab-delimited table,
//! normalizes them into a table, colors them by section and assignee,
//! and renders a static HTML Gantt chart.

pub mod chart;
pub mod config;
pub mod core;
pub mod error;
pub mod palette;

// Re-exports
pub use chart::{render_html, write_html, GanttChart};
pub use config::{ColorEntry, Config};
pub use self::core::{load_tasks, parse_tasks, InputFormat, Task};
pub use error::{ConfigError, LoadError};
pub use palette::Palette;

use anyhow::Context;
use std::path::Path;

/// Result type alias
pub type Result<T> = anyhow::Result<T>;

/// Load a task source and lay it out as a chart
pub fn chart_from_file(path: &Path, format: Option<InputFormat>, config: &Config) -> Result<GanttChart> {
    let tasks = load_tasks(path, format, config)
        .with_context(|| format!("Failed to load tasks from {}", path.display()))?;
    Ok(GanttChart::build(tasks, config))
}
