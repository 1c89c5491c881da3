//! Tab-delimited task tables
//!
//! The inline form of the task list: a header row followed by one task per
//! line. Column names are matched case-insensitively and unknown columns are
//! ignored. `write_table` emits the normalized table in the same layout, so
//! its output loads back unchanged.

use super::task::{normalize_assignee, parse_timestamp, title_case, Task};
use crate::config::Config;
use crate::error::LoadError;
use chrono::NaiveDateTime;
use std::io::Write;

const NAME_COLUMNS: &[&str] = &["task", "task name", "name"];
const ID_COLUMNS: &[&str] = &["id", "task id", "gid"];
const SECTION_COLUMNS: &[&str] = &["section/column", "section", "column"];
const ASSIGNEE_COLUMNS: &[&str] = &["assignee", "owner"];
const START_COLUMNS: &[&str] = &["start date", "start", "created at"];
const DUE_COLUMNS: &[&str] = &["due date", "due", "due on"];
const PRIORITY_COLUMNS: &[&str] = &["priority"];
const NOTES_COLUMNS: &[&str] = &["notes"];

const HEADER: [&str; 8] = [
    "ID",
    "Task",
    "Section/Column",
    "Assignee",
    "Start Date",
    "Due Date",
    "Priority",
    "Notes",
];

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Column positions resolved from the header row
#[derive(Debug)]
struct Columns {
    name: usize,
    id: Option<usize>,
    section: Option<usize>,
    assignee: Option<usize>,
    start: Option<usize>,
    due: Option<usize>,
    priority: Option<usize>,
    notes: Option<usize>,
}

impl Columns {
    fn resolve(header: &csv::StringRecord) -> Result<Self, LoadError> {
        let find = |aliases: &[&str]| {
            header
                .iter()
                .position(|h| aliases.contains(&h.trim().to_lowercase().as_str()))
        };

        Ok(Self {
            name: find(NAME_COLUMNS).ok_or(LoadError::MissingColumn("Task"))?,
            id: find(ID_COLUMNS),
            section: find(SECTION_COLUMNS),
            assignee: find(ASSIGNEE_COLUMNS),
            start: find(START_COLUMNS),
            due: find(DUE_COLUMNS),
            priority: find(PRIORITY_COLUMNS),
            notes: find(NOTES_COLUMNS),
        })
    }
}

/// Parse a tab-delimited table into tasks
pub fn parse_table(content: &str, config: &Config) -> Result<Vec<Task>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .quoting(false)
        .from_reader(content.as_bytes());

    let columns = Columns::resolve(reader.headers()?)?;

    let mut tasks = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }

        let cell = |idx: Option<usize>| {
            idx.and_then(|i| record.get(i))
                .map(str::trim)
                .filter(|s| !s.is_empty())
        };

        tasks.push(Task {
            id: cell(columns.id).unwrap_or_default().to_string(),
            name: title_case(cell(Some(columns.name)).unwrap_or_default()),
            section: cell(columns.section).map(str::to_string),
            assignee: normalize_assignee(cell(columns.assignee), &config.unassigned_label),
            start: cell(columns.start).and_then(parse_timestamp),
            due: cell(columns.due).and_then(parse_timestamp),
            priority: cell(columns.priority).map(str::to_string),
            notes: cell(columns.notes).unwrap_or_default().to_string(),
        });
    }

    Ok(tasks)
}

/// Write tasks as a tab-delimited table with a header row
pub fn write_table<W: Write>(tasks: &[Task], writer: W) -> Result<(), LoadError> {
    let mut out = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .quote_style(csv::QuoteStyle::Never)
        .from_writer(writer);

    out.write_record(HEADER).map_err(LoadError::Write)?;
    for task in tasks {
        let start = format_timestamp(task.start);
        let due = format_timestamp(task.due);
        out.write_record([
            flatten(&task.id).as_str(),
            flatten(&task.name).as_str(),
            flatten(task.section.as_deref().unwrap_or_default()).as_str(),
            flatten(&task.assignee).as_str(),
            start.as_str(),
            due.as_str(),
            flatten(task.priority.as_deref().unwrap_or_default()).as_str(),
            flatten(&task.notes).as_str(),
        ])
        .map_err(LoadError::Write)?;
    }
    out.flush().map_err(|e| LoadError::Write(e.into()))?;
    Ok(())
}

fn format_timestamp(value: Option<NaiveDateTime>) -> String {
    value
        .map(|d| d.format(TIMESTAMP_FORMAT).to_string())
        .unwrap_or_default()
}

/// Tabs and newlines would break the row structure
fn flatten(cell: &str) -> String {
    cell.replace(['\t', '\r', '\n'], " ")
}
