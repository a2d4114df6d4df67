//! Resolution records and list ordering

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::csv::{Field, Row};
use crate::progress::ResolutionStatus;

/// Title shown when a row has none
pub const UNTITLED: &str = "Untitled Resolution";

/// One resolution row with its fields resolved through the alias table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub status: ResolutionStatus,
    pub current: Option<String>,
    pub target: Option<String>,
    pub link: Option<String>,
}

impl Resolution {
    pub fn from_row(row: &Row) -> Self {
        let text = |field: Field| row.field(field).map(str::to_string);
        Self {
            title: text(Field::Title).unwrap_or_else(|| UNTITLED.to_string()),
            description: text(Field::Description),
            category: text(Field::Category),
            status: row.field(Field::Status).map(ResolutionStatus::parse).unwrap_or_default(),
            current: text(Field::Current),
            target: text(Field::Target),
            link: text(Field::Link),
        }
    }

    pub fn progress(&self) -> u8 {
        self.status.percent()
    }
}

/// How resolution cards are ordered on the page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ResolutionOrder {
    /// Keep CSV file order
    #[default]
    File,
    /// Not started first, then in progress, completed last
    Status,
}

impl ResolutionOrder {
    /// Reorder in place; status ordering is stable within a bucket
    pub fn apply(&self, resolutions: &mut [Resolution]) {
        debug!(order = ?self, count = resolutions.len(), "ResolutionOrder::apply: called");
        match self {
            Self::File => {}
            Self::Status => resolutions.sort_by_key(|r| r.status.sort_rank()),
        }
    }
}

impl std::fmt::Display for ResolutionOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File => write!(f, "file"),
            Self::Status => write!(f, "status"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv::parse_csv;

    #[test]
    fn test_from_row_defaults() {
        let rows = parse_csv("category,notes\nHealth,whatever");
        let res = Resolution::from_row(&rows[0]);

        assert_eq!(res.title, UNTITLED);
        assert_eq!(res.status, ResolutionStatus::NotStarted);
        assert_eq!(res.category.as_deref(), Some("Health"));
        assert_eq!(res.description, None);
        assert_eq!(res.progress(), 0);
    }

    #[test]
    fn test_from_row_capitalised_headers() {
        let rows = parse_csv("Title,Status,Current,Target,Link\nRead,Completed,12,12,https://example.com");
        let res = Resolution::from_row(&rows[0]);

        assert_eq!(res.title, "Read");
        assert_eq!(res.status, ResolutionStatus::Completed);
        assert_eq!(res.current.as_deref(), Some("12"));
        assert_eq!(res.target.as_deref(), Some("12"));
        assert_eq!(res.link.as_deref(), Some("https://example.com"));
        assert_eq!(res.progress(), 100);
    }

    #[test]
    fn test_order_by_status_is_stable() {
        let rows = parse_csv(
            "title,status\nA,completed\nB,in-progress\nC,not-started\nD,paused\nE,in-progress\nF,completed",
        );
        let mut list: Vec<Resolution> = rows.iter().map(Resolution::from_row).collect();

        ResolutionOrder::File.apply(&mut list);
        let titles: Vec<&str> = list.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B", "C", "D", "E", "F"]);

        ResolutionOrder::Status.apply(&mut list);
        let titles: Vec<&str> = list.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["C", "D", "B", "E", "A", "F"]);
    }
}
