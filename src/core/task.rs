//! Task record - one row of the normalized task table

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Timestamp layouts tried after RFC 3339, most specific first
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

/// A normalized project task
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Task {
    pub id: String,
    pub name: String,
    /// "Section/Column" label
    pub section: Option<String>,
    pub assignee: String,
    pub start: Option<NaiveDateTime>,
    pub due: Option<NaiveDateTime>,
    pub priority: Option<String>,
    pub notes: String,
}

impl Task {
    /// Create a task with only an id and (title-cased) name set
    pub fn new(id: impl Into<String>, name: &str) -> Self {
        Self {
            id: id.into(),
            name: title_case(name),
            ..Self::default()
        }
    }

    /// Whether both ends of the timeline bar are known
    pub fn is_scheduled(&self) -> bool {
        self.start.is_some() && self.due.is_some()
    }

    /// Section label used for grouping, with a placeholder for unsectioned tasks
    pub fn section_label(&self) -> &str {
        self.section.as_deref().unwrap_or(NO_SECTION)
    }
}

/// Group label for tasks without a section
pub const NO_SECTION: &str = "(no section)";

/// Capitalize the first letter of every run of cased letters, lowercase the rest.
///
/// Anything without case starts a new word, so `"don't"` becomes `"Don'T"`,
/// `"phase 2b"` becomes `"Phase 2B"` and `"中a"` becomes `"中A"`.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if c.is_lowercase() || c.is_uppercase() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

/// Trim an assignee name, substituting `unassigned` for null or blank values
pub fn normalize_assignee(raw: Option<&str>, unassigned: &str) -> String {
    match raw.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => unassigned.to_string(),
    }
}

/// Parse a date or timestamp into naive UTC; unparseable input yields `None`
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt);
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, fmt) {
            return date.and_hms_opt(0, 0, 0);
        }
    }

    log::debug!("Could not parse date {:?}, treating as missing", raw);
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("prototype DEMO day"), "Prototype Demo Day");
        assert_eq!(title_case("don't panic"), "Don'T Panic");
        assert_eq!(title_case("phase 2b review"), "Phase 2B Review");
        assert_eq!(title_case(""), "");
        assert_eq!(title_case("  spaced  "), "  Spaced  ");
        assert_eq!(title_case("中a"), "中A");
        assert_eq!(title_case("über ÉCOLE"), "Über École");
    }

    #[test]
    fn test_normalize_assignee() {
        assert_eq!(normalize_assignee(Some("  Ethan Katz "), "Unassigned"), "Ethan Katz");
        assert_eq!(normalize_assignee(None, "Unassigned"), "Unassigned");
        assert_eq!(normalize_assignee(Some("   "), "Nobody"), "Nobody");
    }

    #[test]
    fn test_parse_rfc3339_converts_to_utc() {
        assert_eq!(
            parse_timestamp("2025-01-15T18:23:45.120Z"),
            Some(at(2025, 1, 15, 18, 23, 45) + chrono::Duration::milliseconds(120))
        );
        assert_eq!(
            parse_timestamp("2025-01-15T20:00:00+02:00"),
            Some(at(2025, 1, 15, 18, 0, 0))
        );
    }

    #[test]
    fn test_parse_plain_dates() {
        assert_eq!(parse_timestamp("2025-02-01"), Some(at(2025, 2, 1, 0, 0, 0)));
        assert_eq!(parse_timestamp("02/01/2025"), Some(at(2025, 2, 1, 0, 0, 0)));
        assert_eq!(
            parse_timestamp("2025-02-01 09:30"),
            Some(at(2025, 2, 1, 9, 30, 0))
        );
        assert_eq!(
            parse_timestamp("2025-02-01 09:30:15"),
            Some(at(2025, 2, 1, 9, 30, 15))
        );
    }

    #[test]
    fn test_unparseable_dates_are_missing() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("next tuesday"), None);
        assert_eq!(parse_timestamp("2025-13-45"), None);
    }

    #[test]
    fn test_section_label_placeholder() {
        let mut task = Task::new("1", "write report");
        assert_eq!(task.name, "Write Report");
        assert_eq!(task.section_label(), NO_SECTION);
        task.section = Some("Prototype Development".to_string());
        assert_eq!(task.section_label(), "Prototype Development");
        assert!(!task.is_scheduled());
    }
}
