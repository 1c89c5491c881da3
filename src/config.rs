//! Report configuration - loaded from taskgantt.yml
//!
//! Every key is optional. An empty file reproduces the stock report:
//! ```yaml
//! title: IED Gantt Chart
//! output: index.html
//! sections:
//!   - name: Prototype Development
//!     color: lightyellow
//! assignees:
//!   - name: Ethan Katz
//!     color: red
//! ```

use crate::error::ConfigError;
use chrono::format::{Item, StrftimeItems};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const LOCAL_CONFIG: &str = "taskgantt.yml";

/// Widest tick spacing accepted, in days
const MAX_TICK_DAYS: f64 = 3650.0;

/// One row of a color lookup table
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ColorEntry {
    pub name: String,
    pub color: String,
}

impl ColorEntry {
    fn new(name: &str, color: &str) -> Self {
        Self {
            name: name.to_string(),
            color: color.to_string(),
        }
    }
}

/// Report settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub title: String,
    pub output: PathBuf,
    /// Custom field holding the task priority
    pub priority_field: String,
    pub unassigned_label: String,
    /// Border for assignees missing from `assignees`
    pub default_border: String,
    /// Spacing between x-axis ticks, in days
    pub tick_days: f64,
    /// chrono format string for tick labels
    pub tick_format: String,
    pub width: u32,
    pub row_height: u32,
    pub sections: Vec<ColorEntry>,
    pub assignees: Vec<ColorEntry>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "IED Gantt Chart".to_string(),
            output: PathBuf::from("index.html"),
            priority_field: "Priority".to_string(),
            unassigned_label: "Unassigned".to_string(),
            default_border: "black".to_string(),
            tick_days: 7.5,
            tick_format: "%m/%d".to_string(),
            width: 1200,
            row_height: 28,
            sections: default_sections(),
            assignees: default_assignees(),
        }
    }
}

fn default_sections() -> Vec<ColorEntry> {
    vec![
        ColorEntry::new("Project Planning & Logistics", "lightblue"),
        ColorEntry::new("System Concept Proposal (Milestone 1)", "lightgreen"),
        ColorEntry::new("Prototype Development", "lightyellow"),
        ColorEntry::new("Prototype Demonstration (Milestone 2)", "lightcoral"),
        ColorEntry::new(
            "Final Design Review & Documentation (Milestone 3)",
            "lightgrey",
        ),
    ]
}

fn default_assignees() -> Vec<ColorEntry> {
    vec![
        ColorEntry::new("Nora Amrani", "blue"),
        ColorEntry::new("Edwards Doh", "purple"),
        ColorEntry::new("Lizeth Ramirez", "green"),
        ColorEntry::new("Ethan Katz", "red"),
        ColorEntry::new("Blake Leichter", "orange"),
        ColorEntry::new("Vidyut Baskar", "brown"),
    ]
}

impl Config {
    /// Load config from a YAML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    /// Parse and validate config from YAML text
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        // serde_yaml rejects an empty document for a struct
        let config: Config = if content.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(content)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Auto-detect config
    /// Priority:
    /// 1. ./taskgantt.yml
    /// 2. <config dir>/taskgantt/config.yml
    /// 3. Built-in defaults
    pub fn auto_load() -> Result<Self, ConfigError> {
        let local = Path::new(LOCAL_CONFIG);
        if local.exists() {
            log::debug!("Using config {}", local.display());
            return Self::from_file(local);
        }

        if let Some(dir) = dirs::config_dir() {
            let user = dir.join("taskgantt").join("config.yml");
            if user.exists() {
                log::debug!("Using config {}", user.display());
                return Self::from_file(&user);
            }
        }

        Ok(Self::default())
    }

    /// Reject settings the renderer cannot draw with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.tick_days.is_finite() && self.tick_days > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "tick_days must be positive, got {}",
                self.tick_days
            )));
        }
        if self.tick_days > MAX_TICK_DAYS {
            return Err(ConfigError::Invalid(format!(
                "tick_days must be at most {}, got {}",
                MAX_TICK_DAYS, self.tick_days
            )));
        }
        if self.width == 0 || self.row_height == 0 {
            return Err(ConfigError::Invalid(
                "width and row_height must be non-zero".to_string(),
            ));
        }
        if StrftimeItems::new(&self.tick_format).any(|item| matches!(item, Item::Error)) {
            return Err(ConfigError::Invalid(format!(
                "tick_format {:?} is not a valid date format",
                self.tick_format
            )));
        }
        if self.default_border.trim().is_empty() {
            return Err(ConfigError::Invalid("default_border is empty".to_string()));
        }
        for entry in self.sections.iter().chain(&self.assignees) {
            if entry.color.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "no color given for {:?}",
                    entry.name
                )));
            }
        }
        Ok(())
    }
}
