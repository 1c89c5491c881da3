//! Chart model - turns normalized tasks into rows, traces, legend and axis
//!
//! Rendering lives in [`html`]; everything here is plain data so the layout
//! rules can be tested without parsing markup.

mod html;

pub use html::{render_html, write_html};

use crate::config::Config;
use crate::core::Task;
use crate::palette::Palette;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use std::cmp::Ordering;

/// Upper bound on axis ticks before the spacing is widened
const MAX_TICKS: i64 = 60;

/// Horizontal extent of one task bar; `start <= end` always holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bar {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// One task line on the chart
#[derive(Debug, Clone)]
pub struct ChartRow {
    pub task: Task,
    /// Section fill
    pub fill: String,
    /// Assignee border
    pub border: String,
    /// `None` when the task lacks a start or due date
    pub bar: Option<Bar>,
}

/// Rows sharing a section, drawn in one color
#[derive(Debug, Clone)]
pub struct SectionTrace {
    pub section: String,
    pub fill: String,
    /// Indices into [`GanttChart::rows`]
    pub rows: Vec<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendGroup {
    Section,
    Person,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendEntry {
    pub group: LegendGroup,
    pub label: String,
    pub fill: String,
    /// Outline color; section swatches have none
    pub border: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tick {
    pub at: NaiveDateTime,
    pub label: String,
}

/// Visible date range and its tick marks
#[derive(Debug, Clone)]
pub struct TimeAxis {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub ticks: Vec<Tick>,
}

impl TimeAxis {
    /// Fraction of the axis span at `at`, 0.0 at `start` and 1.0 at `end`
    pub fn position(&self, at: NaiveDateTime) -> f64 {
        let span = (self.end - self.start).num_milliseconds();
        if span <= 0 {
            return 0.0;
        }
        (at - self.start).num_milliseconds() as f64 / span as f64
    }
}

/// A fully laid-out Gantt chart
#[derive(Debug, Clone)]
pub struct GanttChart {
    pub title: String,
    pub width: u32,
    pub row_height: u32,
    /// Rows in display order, earliest start first (drawn top-down)
    pub rows: Vec<ChartRow>,
    pub traces: Vec<SectionTrace>,
    pub legend: Vec<LegendEntry>,
    /// `None` when no task has a drawable bar
    pub axis: Option<TimeAxis>,
}

impl GanttChart {
    /// Build the chart for `tasks` using the colors and axis settings in `config`
    pub fn build(mut tasks: Vec<Task>, config: &Config) -> Self {
        tasks.sort_by(|a, b| by_start(a.start, b.start));

        let mut palette = Palette::new(config);
        let mut traces: Vec<SectionTrace> = Vec::new();
        let mut rows = Vec::with_capacity(tasks.len());

        for (index, task) in tasks.into_iter().enumerate() {
            let section = task.section_label().to_string();
            let fill = palette.fill_for(&section);
            let border = palette.border_for(&task.assignee).to_string();
            let bar = bar_for(&task);

            match traces.iter().position(|t| t.section == section) {
                Some(i) => traces[i].rows.push(index),
                None => traces.push(SectionTrace {
                    section,
                    fill: fill.clone(),
                    rows: vec![index],
                }),
            }

            rows.push(ChartRow {
                task,
                fill,
                border,
                bar,
            });
        }

        let legend = legend_for(&palette);
        let axis = axis_for(&rows, config);

        log::debug!(
            "Chart laid out: {} rows, {} sections, {} ticks",
            rows.len(),
            traces.len(),
            axis.as_ref().map_or(0, |a| a.ticks.len())
        );

        Self {
            title: config.title.clone(),
            width: config.width,
            row_height: config.row_height,
            rows,
            traces,
            legend,
            axis,
        }
    }

    /// Rows that have a bar to draw
    pub fn bars(&self) -> impl Iterator<Item = (&ChartRow, Bar)> {
        self.rows.iter().filter_map(|row| row.bar.map(|bar| (row, bar)))
    }
}

/// Ascending by start, missing starts last
fn by_start(a: Option<NaiveDateTime>, b: Option<NaiveDateTime>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn bar_for(task: &Task) -> Option<Bar> {
    let (start, due) = (task.start?, task.due?);
    if due < start {
        log::warn!(
            "Task {:?} is due ({}) before it starts ({}), drawing it as a point",
            task.name,
            due,
            start
        );
    }
    Some(Bar {
        start,
        end: due.max(start),
    })
}

fn legend_for(palette: &Palette) -> Vec<LegendEntry> {
    let sections = palette.sections().iter().map(|entry| LegendEntry {
        group: LegendGroup::Section,
        label: entry.name.clone(),
        fill: entry.color.clone(),
        border: None,
    });

    let people = palette.assignees().iter().map(|entry| LegendEntry {
        group: LegendGroup::Person,
        label: entry.name.clone(),
        fill: "black".to_string(),
        border: Some(entry.color.clone()),
    });

    sections.chain(people).collect()
}

/// Ticks sit on multiples of the spacing counted from 2000-01-01
fn tick_epoch() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2000, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

fn axis_for(rows: &[ChartRow], config: &Config) -> Option<TimeAxis> {
    let first = rows.iter().filter_map(|r| r.bar).map(|b| b.start).min()?;
    let last = rows.iter().filter_map(|r| r.bar).map(|b| b.end).max()?;

    let base_step = ((config.tick_days * 86_400_000.0).round() as i64).max(1);
    let pad = Duration::milliseconds(base_step / 2);
    // padding stops at the edge of the representable range
    let start = first.checked_sub_signed(pad).unwrap_or(first);
    let end = last.checked_add_signed(pad).unwrap_or(last);

    let span = (end - start).num_milliseconds();
    let mut step = base_step;
    while span / step > MAX_TICKS {
        step = step.saturating_mul(2);
    }

    let epoch = tick_epoch();
    let offset = (start - epoch).num_milliseconds();
    let mut k = offset.div_euclid(step);
    if offset.rem_euclid(step) != 0 {
        k += 1;
    }

    let mut ticks = Vec::new();
    let mut next = k
        .checked_mul(step)
        .and_then(|ms| epoch.checked_add_signed(Duration::milliseconds(ms)));
    while let Some(at) = next.filter(|at| *at <= end) {
        ticks.push(Tick {
            at,
            label: at.format(&config.tick_format).to_string(),
        });
        next = at.checked_add_signed(Duration::milliseconds(step));
    }

    Some(TimeAxis { start, end, ticks })
}
