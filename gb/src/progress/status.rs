//! Resolution status classification
//!
//! Status strings map onto three fixed buckets. Anything unrecognised is kept
//! verbatim so it can still be shown on the card.

use serde::Serialize;
use tracing::debug;

/// Classified resolution status
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResolutionStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
    /// Free-text status as written in the CSV
    Other(String),
}

impl ResolutionStatus {
    /// Classify a raw status string, ignoring case
    pub fn parse(raw: &str) -> Self {
        debug!(%raw, "ResolutionStatus::parse: called");
        match raw.to_lowercase().as_str() {
            "not-started" => Self::NotStarted,
            "in-progress" => Self::InProgress,
            "completed" => Self::Completed,
            _ => Self::Other(raw.to_string()),
        }
    }

    /// Raw form used for labels and CSS classes
    pub fn as_str(&self) -> &str {
        match self {
            Self::NotStarted => "not-started",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
            Self::Other(raw) => raw,
        }
    }

    /// Fixed percent-complete for the bucket
    pub fn percent(&self) -> u8 {
        match self {
            Self::Completed => 100,
            Self::InProgress => 50,
            Self::NotStarted | Self::Other(_) => 0,
        }
    }

    /// Badge text: lowercase with dashes turned into spaces
    pub fn label(&self) -> String {
        self.as_str().to_lowercase().replace('-', " ")
    }

    /// CSS class: lowercase with whitespace runs turned into dashes
    pub fn css_class(&self) -> String {
        self.as_str()
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-")
    }

    /// Position when resolutions are ordered by status
    pub fn sort_rank(&self) -> u8 {
        match self {
            Self::NotStarted | Self::Other(_) => 0,
            Self::InProgress => 1,
            Self::Completed => 2,
        }
    }
}

impl std::fmt::Display for ResolutionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Legacy percent-complete for a raw status string
pub fn status_progress(status: &str) -> u8 {
    ResolutionStatus::parse(status).percent()
}
