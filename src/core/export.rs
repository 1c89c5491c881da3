//! JSON export loader
//!
//! Reads task-manager exports shaped like:
//! ```json
//! {"data": [
//!   {"gid": "1201", "name": "order parts", "created_at": "2025-01-06T15:02:11.000Z",
//!    "due_on": "2025-01-20", "assignee": "Ethan Katz", "notes": "",
//!    "memberships": [{"section": {"name": "Prototype Development"}}],
//!    "custom_fields": [{"name": "Priority", "enum_value": {"name": "High"}}]}
//! ]}
//! ```
//! Every field is optional; the first non-empty candidate wins.

use super::task::{normalize_assignee, parse_timestamp, title_case, Task};
use crate::config::Config;
use crate::error::LoadError;
use serde_json::{Map, Value};

/// Parse an export document into tasks
pub fn parse_export(content: &str, config: &Config) -> Result<Vec<Task>, LoadError> {
    let doc: Value = serde_json::from_str(content)?;

    let records: &[Value] = match &doc {
        Value::Array(items) => items.as_slice(),
        Value::Object(map) => match map.get("data") {
            Some(Value::Array(items)) => items.as_slice(),
            _ => &[],
        },
        _ => &[],
    };

    records
        .iter()
        .enumerate()
        .map(|(index, record)| match record {
            Value::Object(fields) => Ok(task_from_record(fields, config)),
            _ => Err(LoadError::InvalidRecord { index }),
        })
        .collect()
}

fn task_from_record(fields: &Map<String, Value>, config: &Config) -> Task {
    let id = ["gid", "id"]
        .iter()
        .find_map(|key| scalar_text(fields.get(*key)))
        .unwrap_or_default();

    let name = text(fields.get("name")).unwrap_or_default();

    let start = ["start_on", "start_at", "created_at"]
        .iter()
        .find_map(|key| text(fields.get(*key)).and_then(|raw| parse_timestamp(&raw)));

    let due = ["due_on", "due_at"]
        .iter()
        .find_map(|key| text(fields.get(*key)).and_then(|raw| parse_timestamp(&raw)));

    let assignee = named(fields.get("assignee"));

    Task {
        id,
        name: title_case(&name),
        section: section_of(fields),
        assignee: normalize_assignee(assignee.as_deref(), &config.unassigned_label),
        start,
        due,
        priority: priority_of(fields.get("custom_fields"), &config.priority_field),
        notes: text(fields.get("notes")).unwrap_or_default(),
    }
}

/// Section from the first membership, else a top-level `section`
fn section_of(fields: &Map<String, Value>) -> Option<String> {
    if let Some(Value::Array(memberships)) = fields.get("memberships") {
        if let Some(first) = memberships.first() {
            return named(first.get("section"));
        }
    }
    named(fields.get("section"))
}

/// First matching custom field with a value
fn priority_of(custom_fields: Option<&Value>, field_name: &str) -> Option<String> {
    let Some(Value::Array(list)) = custom_fields else {
        return None;
    };

    list.iter()
        .filter(|field| field.get("name").and_then(Value::as_str) == Some(field_name))
        .find_map(|field| match field.get("enum_value") {
            Some(Value::Object(enum_value)) => text(enum_value.get("name")),
            _ => text(field.get("display_value")),
        })
}

/// A string value, or the `name` of an object value
fn named(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Object(map) => text(map.get("name")),
        other => text(Some(other)),
    }
}

/// Non-empty string value
fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        _ => None,
    }
}

/// Non-empty string or number, rendered as text
fn scalar_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Number(n) => Some(n.to_string()),
        other => text(Some(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn parse(json: &str) -> Vec<Task> {
        parse_export(json, &Config::default()).unwrap()
    }

    #[test]
    fn test_full_record() {
        let tasks = parse(
            r#"{"data": [{
                "gid": "1201",
                "name": "order PARTS",
                "created_at": "2025-01-06T15:02:11.000Z",
                "due_on": "2025-01-20",
                "assignee": " Ethan Katz ",
                "notes": "check lead times",
                "memberships": [{"section": {"name": "Prototype Development"}}],
                "custom_fields": [
                    {"name": "Effort", "enum_value": {"name": "Large"}},
                    {"name": "Priority", "enum_value": {"name": "High"}}
                ]
            }]}"#,
        );

        assert_eq!(tasks.len(), 1);
        let task = &tasks[0];
        assert_eq!(task.id, "1201");
        assert_eq!(task.name, "Order Parts");
        assert_eq!(task.section.as_deref(), Some("Prototype Development"));
        assert_eq!(task.assignee, "Ethan Katz");
        assert_eq!(task.priority.as_deref(), Some("High"));
        assert_eq!(task.notes, "check lead times");
        assert_eq!(
            task.start,
            NaiveDate::from_ymd_opt(2025, 1, 6).unwrap().and_hms_opt(15, 2, 11)
        );
        assert_eq!(
            task.due,
            NaiveDate::from_ymd_opt(2025, 1, 20).unwrap().and_hms_opt(0, 0, 0)
        );
    }

    #[test]
    fn test_sparse_record_defaults() {
        let tasks = parse(r#"[{"name": "kickoff", "assignee": null, "due_on": "soon"}]"#);
        let task = &tasks[0];
        assert_eq!(task.id, "");
        assert_eq!(task.assignee, "Unassigned");
        assert_eq!(task.section, None);
        assert_eq!(task.priority, None);
        assert_eq!(task.start, None);
        assert_eq!(task.due, None, "unparseable due date coerces to missing");
        assert_eq!(task.notes, "");
    }

    #[test]
    fn test_alternative_shapes() {
        let tasks = parse(
            r#"{"data": [{
                "id": 42,
                "name": "bench test",
                "start_on": "2025-03-03",
                "created_at": "2025-01-01T00:00:00Z",
                "due_at": "2025-03-07T17:00:00Z",
                "assignee": {"gid": "9", "name": "Nora Amrani"},
                "memberships": [],
                "section": "Prototype Demonstration (Milestone 2)"
            }]}"#,
        );
        let task = &tasks[0];
        assert_eq!(task.id, "42");
        assert_eq!(task.assignee, "Nora Amrani");
        assert_eq!(
            task.section.as_deref(),
            Some("Prototype Demonstration (Milestone 2)")
        );
        assert_eq!(
            task.start,
            NaiveDate::from_ymd_opt(2025, 3, 3).unwrap().and_hms_opt(0, 0, 0),
            "start_on takes precedence over created_at"
        );
        assert_eq!(
            task.due,
            NaiveDate::from_ymd_opt(2025, 3, 7).unwrap().and_hms_opt(17, 0, 0)
        );
    }

    #[test]
    fn test_priority_needs_enum_value() {
        let tasks = parse(
            r#"[
                {"name": "a", "custom_fields": [{"name": "Priority", "enum_value": null}]},
                {"name": "b", "custom_fields": [{"name": "Priority", "display_value": "Low"}]},
                {"name": "c", "custom_fields": "not a list"}
            ]"#,
        );
        assert_eq!(tasks[0].priority, None);
        assert_eq!(tasks[1].priority.as_deref(), Some("Low"));
        assert_eq!(tasks[2].priority, None);
    }

    #[test]
    fn test_custom_priority_field_name() {
        let config = Config {
            priority_field: "Urgency".to_string(),
            ..Config::default()
        };
        let tasks = parse_export(
            r#"[{"name": "a", "custom_fields": [{"name": "Urgency", "enum_value": {"name": "P0"}}]}]"#,
            &config,
        )
        .unwrap();
        assert_eq!(tasks[0].priority.as_deref(), Some("P0"));
    }

    #[test]
    fn test_non_object_record_is_error() {
        let err = parse_export(r#"{"data": [{"name": "ok"}, 7]}"#, &Config::default()).unwrap_err();
        assert!(matches!(err, LoadError::InvalidRecord { index: 1 }));
    }

    #[test]
    fn test_malformed_json() {
        let err = parse_export("{\"data\": [", &Config::default()).unwrap_err();
        assert!(matches!(err, LoadError::Json(_)));
    }

    #[test]
    fn test_missing_data_key_is_empty() {
        assert!(parse(r#"{"tasks": []}"#).is_empty());
    }
}
