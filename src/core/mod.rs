//! Core data - task records and the loaders that produce them

mod export;
mod table;
mod task;

pub use export::parse_export;
pub use table::{parse_table, write_table};
pub use task::{normalize_assignee, parse_timestamp, title_case, Task, NO_SECTION};

use crate::config::Config;
use crate::error::LoadError;
use std::fmt;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

/// Shape of a task source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Task-manager JSON export
    Json,
    /// Tab-delimited table with a header row
    Tsv,
}

impl InputFormat {
    /// Guess the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "tsv" | "tab" | "txt" => Some(Self::Tsv),
            _ => None,
        }
    }
}

impl FromStr for InputFormat {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "tsv" | "tab" => Ok(Self::Tsv),
            other => Err(LoadError::UnknownFormat(other.to_string())),
        }
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Tsv => write!(f, "tsv"),
        }
    }
}

/// Parse in-memory task data
pub fn parse_tasks(content: &str, format: InputFormat, config: &Config) -> Result<Vec<Task>, LoadError> {
    match format {
        InputFormat::Json => parse_export(content, config),
        InputFormat::Tsv => parse_table(content, config),
    }
}

/// Load tasks from a file, or from stdin when `path` is `-`.
///
/// Without an explicit format the file extension decides; stdin and
/// unrecognised extensions fall back to the tab-delimited table.
pub fn load_tasks(path: &Path, format: Option<InputFormat>, config: &Config) -> Result<Vec<Task>, LoadError> {
    let io_err = |source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    };

    let content = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf).map_err(io_err)?;
        buf
    } else {
        std::fs::read_to_string(path).map_err(io_err)?
    };

    let format = format
        .or_else(|| InputFormat::from_path(path))
        .unwrap_or(InputFormat::Tsv);

    let tasks = parse_tasks(&content, format, config)?;
    log::info!("Loaded {} tasks from {} ({})", tasks.len(), path.display(), format);
    Ok(tasks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(InputFormat::from_path(Path::new("tasks.json")), Some(InputFormat::Json));
        assert_eq!(InputFormat::from_path(Path::new("TASKS.TSV")), Some(InputFormat::Tsv));
        assert_eq!(InputFormat::from_path(Path::new("plan.txt")), Some(InputFormat::Tsv));
        assert_eq!(InputFormat::from_path(Path::new("plan.csv")), None);
        assert_eq!(InputFormat::from_path(Path::new("-")), None);
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("JSON".parse::<InputFormat>().unwrap(), InputFormat::Json);
        assert_eq!(" tsv ".parse::<InputFormat>().unwrap(), InputFormat::Tsv);
        assert!(matches!(
            "xml".parse::<InputFormat>(),
            Err(LoadError::UnknownFormat(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_tasks(Path::new("no/such/tasks.json"), None, &Config::default()).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
