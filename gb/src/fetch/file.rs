//! Local directory fetcher

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use super::{FetchError, Fetcher, Location};

/// Reads sources from a directory on disk
pub struct FileFetcher {
    location: Location,
    dir: PathBuf,
}

impl FileFetcher {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            location: Location::Dir(dir.clone()),
            dir,
        }
    }
}

#[async_trait]
impl Fetcher for FileFetcher {
    fn location(&self) -> &Location {
        &self.location
    }

    async fn fetch_text(&self, name: &str) -> Result<String, FetchError> {
        let path = self.dir.join(name);
        debug!(?path, "FileFetcher::fetch_text: called");
        let bytes = tokio::fs::read(&path).await.map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                FetchError::NotFound { path: path.clone() }
            } else {
                FetchError::Io {
                    path: path.clone(),
                    source,
                }
            }
        })?;
        // Invalid UTF-8 becomes U+FFFD, as with reqwest's Response::text
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
