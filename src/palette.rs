//! Color lookup - section fills and assignee borders

use crate::config::{ColorEntry, Config};
use std::collections::HashMap;

/// Fills for sections missing from the section table, handed out in order
pub const FALLBACK_FILLS: &[&str] = &[
    "#636efa", "#EF553B", "#00cc96", "#ab63fa", "#FFA15A", "#19d3f3", "#FF6692", "#B6E880",
    "#FF97FF", "#FECB52",
];

/// Resolves chart colors from the configured lookup tables
#[derive(Debug, Clone)]
pub struct Palette {
    sections: Vec<ColorEntry>,
    assignees: Vec<ColorEntry>,
    default_border: String,
    /// Fallback fills already handed out, by section label
    assigned: HashMap<String, &'static str>,
}

impl Palette {
    pub fn new(config: &Config) -> Self {
        Self {
            sections: config.sections.clone(),
            assignees: config.assignees.clone(),
            default_border: config.default_border.clone(),
            assigned: HashMap::new(),
        }
    }

    /// Border color for an assignee, `default_border` when not in the table
    pub fn border_for(&self, assignee: &str) -> &str {
        lookup(&self.assignees, assignee).unwrap_or(self.default_border.as_str())
    }

    /// Fill color for a section.
    ///
    /// Unknown sections take the next fallback fill the first time they are
    /// seen and keep it afterwards.
    pub fn fill_for(&mut self, section: &str) -> String {
        if let Some(color) = lookup(&self.sections, section) {
            return color.to_string();
        }

        let next = self.assigned.len() % FALLBACK_FILLS.len();
        let color = *self.assigned.entry(section.to_string()).or_insert_with(|| {
            log::warn!("Section {:?} has no configured color, using {}", section, FALLBACK_FILLS[next]);
            FALLBACK_FILLS[next]
        });
        color.to_string()
    }

    pub fn sections(&self) -> &[ColorEntry] {
        &self.sections
    }

    pub fn assignees(&self) -> &[ColorEntry] {
        &self.assignees
    }

    /// Whether `color` is one this palette could have produced
    pub fn is_known_color(&self, color: &str) -> bool {
        color == self.default_border
            || FALLBACK_FILLS.contains(&color)
            || self
                .sections
                .iter()
                .chain(&self.assignees)
                .any(|entry| entry.color == color)
    }
}

fn lookup<'a>(table: &'a [ColorEntry], name: &str) -> Option<&'a str> {
    table
        .iter()
        .find(|entry| entry.name == name)
        .map(|entry| entry.color.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_border_lookup_and_default() {
        let palette = Palette::new(&Config::default());
        assert_eq!(palette.border_for("Ethan Katz"), "red");
        assert_eq!(palette.border_for("Vidyut Baskar"), "brown");
        assert_eq!(palette.border_for("Unassigned"), "black");
        assert_eq!(palette.border_for("ethan katz"), "black", "lookup is exact");
    }

    #[test]
    fn test_section_fill_lookup() {
        let mut palette = Palette::new(&Config::default());
        assert_eq!(palette.fill_for("Prototype Development"), "lightyellow");
        assert_eq!(
            palette.fill_for("Final Design Review & Documentation (Milestone 3)"),
            "lightgrey"
        );
    }

    #[test]
    fn test_unknown_sections_get_stable_fallbacks() {
        let mut palette = Palette::new(&Config::default());
        let first = palette.fill_for("Backlog");
        let second = palette.fill_for("Icebox");
        assert_eq!(first, FALLBACK_FILLS[0]);
        assert_eq!(second, FALLBACK_FILLS[1]);
        assert_eq!(palette.fill_for("Backlog"), first);
        assert_eq!(palette.fill_for("Prototype Development"), "lightyellow");
    }

    #[test]
    fn test_known_colors() {
        let palette = Palette::new(&Config::default());
        assert!(palette.is_known_color("black"));
        assert!(palette.is_known_color("lightcoral"));
        assert!(palette.is_known_color("purple"));
        assert!(palette.is_known_color(FALLBACK_FILLS[3]));
        assert!(!palette.is_known_color("hotpink"));
    }
}
