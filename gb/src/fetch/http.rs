//! HTTP fetcher

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use tracing::debug;

use super::{FetchError, Fetcher, Location};

/// Fetches sources relative to a base URL
pub struct HttpFetcher {
    location: Location,
    base: Url,
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build a fetcher; without a timeout a stalled server stalls the fetch
    pub fn new(base: Url, timeout: Option<Duration>) -> Result<Self, FetchError> {
        debug!(%base, ?timeout, "HttpFetcher::new: called");
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            location: Location::Url(base.clone()),
            base,
            client: builder.build()?,
        })
    }

    fn resolve(&self, name: &str) -> Result<Url, FetchError> {
        self.base.join(name).map_err(|e| FetchError::InvalidLocation {
            location: format!("{}{}", self.base, name),
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    fn location(&self) -> &Location {
        &self.location
    }

    async fn fetch_text(&self, name: &str) -> Result<String, FetchError> {
        let url = self.resolve(name)?;
        debug!(%url, "HttpFetcher::fetch_text: called");

        let response = self.client.get(url.clone()).send().await?;
        if !response.status().is_success() {
            debug!(%url, status = %response.status(), "HttpFetcher::fetch_text: non-success status");
            return Err(FetchError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}
