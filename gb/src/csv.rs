//! Permissive CSV parsing
//!
//! The first line names the columns; every following line is split on `,`
//! and kept only when it has exactly as many fields as the header. There is
//! no quoting or escaping: a comma inside a value shifts the field count and
//! the line is dropped.

use serde::Serialize;
use tracing::debug;

/// Canonical column names recognised in goal CSV files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Description,
    Category,
    Status,
    Current,
    Target,
    Link,
    Distance,
    Date,
}

impl Field {
    /// Lowercase canonical column name
    pub fn canonical(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::Category => "category",
            Self::Status => "status",
            Self::Current => "current",
            Self::Target => "target",
            Self::Link => "link",
            Self::Distance => "distance",
            Self::Date => "date",
        }
    }

    /// Header spellings tried in order before falling back to a
    /// case-insensitive comparison
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Title => &["title", "Title"],
            Self::Description => &["description", "Description"],
            Self::Category => &["category", "Category"],
            Self::Status => &["status", "Status"],
            Self::Current => &["current", "Current"],
            Self::Target => &["target", "Target"],
            Self::Link => &["link", "Link"],
            Self::Distance => &["distance", "Distance"],
            Self::Date => &["date", "Date"],
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.canonical())
    }
}

/// One accepted CSV line, keyed by header name in column order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Row {
    fields: Vec<(String, String)>,
}

impl Row {
    pub fn new(fields: Vec<(String, String)>) -> Self {
        Self { fields }
    }

    /// Exact header lookup; with duplicate headers the later column wins
    pub fn get(&self, header: &str) -> Option<&str> {
        self.fields
            .iter()
            .rev()
            .find(|(h, _)| h == header)
            .map(|(_, v)| v.as_str())
    }

    /// Look up a canonical field, returning the first non-empty value
    pub fn field(&self, field: Field) -> Option<&str> {
        for alias in field.aliases() {
            if let Some(value) = self.get(alias)
                && !value.is_empty()
            {
                return Some(value);
            }
        }

        self.fields
            .iter()
            .rev()
            .find(|(h, v)| h.eq_ignore_ascii_case(field.canonical()) && !v.is_empty())
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A line rejected because its field count did not match the header
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DroppedLine {
    /// 1-based line number in the trimmed input
    pub line_number: usize,
    pub expected: usize,
    pub found: usize,
}

/// Parse outcome including the lines that were dropped
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseReport {
    pub rows: Vec<Row>,
    pub dropped: Vec<DroppedLine>,
}

/// Parse CSV text into rows, silently dropping malformed lines
pub fn parse_csv(text: &str) -> Vec<Row> {
    parse_csv_report(text).rows
}

/// Parse CSV text and keep track of every dropped line
pub fn parse_csv_report(text: &str) -> ParseReport {
    debug!(len = text.len(), "parse_csv_report: called");
    let lines: Vec<&str> = text.trim().split('\n').collect();
    if lines.len() < 2 {
        debug!(lines = lines.len(), "parse_csv_report: no data lines");
        return ParseReport::default();
    }

    let headers: Vec<String> = lines[0].split(',').map(|h| h.trim().to_string()).collect();
    let mut rows = Vec::with_capacity(lines.len() - 1);
    let mut dropped = Vec::new();

    for (index, line) in lines.iter().enumerate().skip(1) {
        let values: Vec<&str> = line.split(',').map(str::trim).collect();
        if values.len() == headers.len() {
            let fields = headers
                .iter()
                .cloned()
                .zip(values.into_iter().map(str::to_string))
                .collect();
            rows.push(Row::new(fields));
        } else {
            debug!(
                line_number = index + 1,
                expected = headers.len(),
                found = values.len(),
                "parse_csv_report: dropping line with wrong field count"
            );
            dropped.push(DroppedLine {
                line_number: index + 1,
                expected: headers.len(),
                found: values.len(),
            });
        }
    }

    debug!(rows = rows.len(), dropped = dropped.len(), "parse_csv_report: done");
    ParseReport { rows, dropped }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_well_formed_rows_in_order() {
        let text = "title, status\n Run a marathon , in-progress\nRead 12 books,completed\nLearn Rust ,not-started\n";
        let rows = parse_csv(text);

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].get("title"), Some("Run a marathon"));
        assert_eq!(rows[0].get("status"), Some("in-progress"));
        assert_eq!(rows[1].get("title"), Some("Read 12 books"));
        assert_eq!(rows[2].get("title"), Some("Learn Rust"));
    }

    #[test]
    fn test_parse_drops_wrong_field_count() {
        let text = "title,status\nA,completed\nB,has,extra\nC,in-progress";
        let report = parse_csv_report(text);

        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.rows[1].get("title"), Some("C"));
        assert_eq!(
            report.dropped,
            vec![DroppedLine {
                line_number: 3,
                expected: 2,
                found: 3
            }]
        );
    }

    #[test]
    fn test_parse_header_only_or_empty() {
        assert!(parse_csv("").is_empty());
        assert!(parse_csv("title,status").is_empty());
        assert!(parse_csv("   \n\n  ").is_empty());
    }

    #[test]
    fn test_parse_handles_crlf() {
        let rows = parse_csv("date\r\n2025-01-06\r\n2025-01-07\r\n");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("date"), Some("2025-01-06"));
    }

    #[test]
    fn test_quoted_comma_is_not_supported() {
        let rows = parse_csv("title,status\n\"Save, invest\",completed\nPlain,completed");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("title"), Some("Plain"));
    }

    #[test]
    fn test_field_lookup_aliases() {
        let rows = parse_csv("Title,STATUS,description\nUpper,Completed,\n");
        let row = &rows[0];

        assert_eq!(row.field(Field::Title), Some("Upper"));
        assert_eq!(row.field(Field::Status), Some("Completed"));
        assert_eq!(row.field(Field::Description), None);
        assert_eq!(row.field(Field::Link), None);
    }

    #[test]
    fn test_field_lookup_skips_empty_alias() {
        let row = Row::new(vec![
            ("status".to_string(), String::new()),
            ("Status".to_string(), "completed".to_string()),
        ]);
        assert_eq!(row.field(Field::Status), Some("completed"));
    }

    #[test]
    fn test_duplicate_header_later_wins() {
        let rows = parse_csv("title,title\nfirst,second");
        assert_eq!(rows[0].get("title"), Some("second"));
        assert_eq!(rows[0].len(), 2);
    }

    proptest! {
        #[test]
        fn prop_well_formed_rows_all_accepted(values in prop::collection::vec("[a-z0-9 ]{0,8}", 1..20)) {
            let mut text = String::from("name,value\n");
            for (i, v) in values.iter().enumerate() {
                text.push_str(&format!("row{},{}\n", i, v));
            }
            let rows = parse_csv(&text);
            prop_assert_eq!(rows.len(), values.len());
            for (i, row) in rows.iter().enumerate() {
                let expected_name = format!("row{}", i);
                prop_assert_eq!(row.get("name"), Some(expected_name.as_str()));
                prop_assert_eq!(row.get("value"), Some(values[i].trim()));
            }
        }
    }
}
