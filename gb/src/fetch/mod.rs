//! CSV source fetching
//!
//! A [`Location`] is the base that source names are resolved against: a local
//! directory (plain path or `file://` URL) or an `http(s)://` URL. The
//! [`Fetcher`] trait hides which one is in use from the dashboard.

mod error;
mod file;
mod http;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use tracing::debug;

pub use error::FetchError;
pub use file::FileFetcher;
pub use http::HttpFetcher;

/// Base location of the CSV sources
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    Dir(PathBuf),
    Url(Url),
}

impl Location {
    /// Parse a base location string
    pub fn parse(location: &str) -> Result<Self, FetchError> {
        debug!(%location, "Location::parse: called");
        let invalid = |reason: String| FetchError::InvalidLocation {
            location: location.to_string(),
            reason,
        };

        let scheme = location
            .split_once("://")
            .map(|(scheme, _)| scheme.to_ascii_lowercase());

        if matches!(scheme.as_deref(), Some("http" | "https")) {
            let mut url = Url::parse(location).map_err(|e| invalid(e.to_string()))?;
            // Url::join replaces the last path segment unless the base ends in '/'
            if !url.path().ends_with('/') {
                let path = format!("{}/", url.path());
                url.set_path(&path);
            }
            Ok(Self::Url(url))
        } else if scheme.as_deref() == Some("file") {
            let url = Url::parse(location).map_err(|e| invalid(e.to_string()))?;
            url.to_file_path()
                .map(Self::Dir)
                .map_err(|_| invalid("not a usable file path".to_string()))
        } else if scheme.is_some() {
            Err(invalid("unsupported scheme".to_string()))
        } else {
            Ok(Self::Dir(PathBuf::from(location)))
        }
    }

    /// Whether sources are read from the local filesystem
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Dir(_))
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dir(path) => write!(f, "{}", path.display()),
            Self::Url(url) => write!(f, "{}", url),
        }
    }
}

/// Fetches the text of a named source
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Base location names are resolved against
    fn location(&self) -> &Location;

    /// Fetch the full text of `name`
    async fn fetch_text(&self, name: &str) -> Result<String, FetchError>;
}

/// Build the fetcher matching a location
pub fn fetcher_for(location: Location, timeout: Option<Duration>) -> Result<Arc<dyn Fetcher>, FetchError> {
    debug!(%location, ?timeout, "fetcher_for: called");
    match location {
        Location::Dir(dir) => Ok(Arc::new(FileFetcher::new(dir))),
        Location::Url(url) => Ok(Arc::new(HttpFetcher::new(url, timeout)?)),
    }
}
