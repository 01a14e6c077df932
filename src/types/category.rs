//! Category record types.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CatalogError;

/// A persisted category.
///
/// The `id` is assigned by the store on creation and is opaque to callers.
#[derive(Debug, Clone, Serialize, PartialEq, Eq, Hash)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub description: String,
}

impl Category {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
        }
    }
}

/// The fields a caller supplies to create a category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewCategory {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl NewCategory {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    /// Parse a JSON object such as `{"name":"Books","description":"Printed books"}`.
    /// The description may be omitted.
    pub fn from_json(line: &str) -> Result<Self, CatalogError> {
        let parsed: Self = serde_json::from_str(line)?;
        parsed.require_name(line)
    }

    /// Parse newline-separated input, one category per non-blank line,
    /// as JSON objects or as `name<TAB>description`.
    pub fn parse_lines(input: &str, json: bool) -> Result<Vec<Self>, CatalogError> {
        input
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| if json { Self::from_json(line) } else { line.parse() })
            .collect()
    }

    fn require_name(self, line: &str) -> Result<Self, CatalogError> {
        if self.name.is_empty() {
            return Err(CatalogError::InvalidInput(format!(
                "missing category name in line {line:?}"
            )));
        }
        Ok(self)
    }

    /// Whether `category` carries exactly these fields.
    pub fn matches(&self, category: &Category) -> bool {
        self.name == category.name && self.description == category.description
    }
}

/// Parses a `name<TAB>description` line. The description may be omitted.
impl FromStr for NewCategory {
    type Err = CatalogError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let (name, description) = line.split_once('\t').unwrap_or((line, ""));
        Self::new(name, description).require_name(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_name_and_description() {
        let parsed: NewCategory = "Books\tPrinted books".parse().unwrap();
        assert_eq!(parsed, NewCategory::new("Books", "Printed books"));
    }

    #[test]
    fn parse_keeps_tabs_inside_description() {
        let parsed: NewCategory = "Music\tVinyl\tand tapes".parse().unwrap();
        assert_eq!(parsed.description, "Vinyl\tand tapes");
    }

    #[test]
    fn parse_without_description() {
        let parsed: NewCategory = "Games".parse().unwrap();
        assert_eq!(parsed, NewCategory::new("Games", ""));
    }

    #[test]
    fn parse_rejects_empty_name() {
        let err = "\tno name".parse::<NewCategory>().unwrap_err();
        assert!(matches!(err, CatalogError::InvalidInput(_)));
    }

    #[test]
    fn from_json_reads_name_and_description() {
        let parsed = NewCategory::from_json(r#"{"name":"Books","description":"Printed books"}"#)
            .unwrap();
        assert_eq!(parsed, NewCategory::new("Books", "Printed books"));
    }

    #[test]
    fn from_json_defaults_missing_description() {
        let parsed = NewCategory::from_json(r#"{"name":"Games"}"#).unwrap();
        assert_eq!(parsed, NewCategory::new("Games", ""));
    }

    #[test]
    fn from_json_rejects_malformed_and_nameless_input() {
        assert!(matches!(
            NewCategory::from_json("Books\tPrinted books").unwrap_err(),
            CatalogError::Json(_)
        ));
        assert!(matches!(
            NewCategory::from_json(r#"{"name":"","description":"x"}"#).unwrap_err(),
            CatalogError::InvalidInput(_)
        ));
    }

    #[test]
    fn parse_lines_skips_blank_lines() {
        let tsv = "Books\tPrinted books\n\n  \nMusic\n";
        assert_eq!(
            NewCategory::parse_lines(tsv, false).unwrap(),
            vec![NewCategory::new("Books", "Printed books"), NewCategory::new("Music", "")]
        );

        let json = "{\"name\":\"Books\"}\n\n{\"name\":\"Music\",\"description\":\"Records\"}\n";
        assert_eq!(
            NewCategory::parse_lines(json, true).unwrap(),
            vec![NewCategory::new("Books", ""), NewCategory::new("Music", "Records")]
        );
    }

    #[test]
    fn parse_lines_stops_at_first_bad_line() {
        let err = NewCategory::parse_lines("Books\n\tno name\nMusic\n", false).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidInput(_)));
    }

    #[test]
    fn matches_compares_fields_not_id() {
        let new = NewCategory::new("Books", "Printed books");
        assert!(new.matches(&Category::new("7", "Books", "Printed books")));
        assert!(!new.matches(&Category::new("7", "Books", "E-books")));
    }
}
