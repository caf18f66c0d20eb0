use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::Url;
use thiserror::Error;

use crate::config::AppConfig;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid listings url: {0}")]
    InvalidUrl(String),
    #[error("unable to build http client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request failed for {url}: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("non-success status {status} for {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("unable to read response body for {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("no `{marker}` listings in page from {url}")]
    MissingMarker { url: String, marker: &'static str },
}

/// What to ask the listings endpoint for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingQuery {
    pub date: String,
    pub category_id: &'static str,
    /// Class name every listing container carries. A page without it is
    /// treated as a failed fetch.
    pub marker: &'static str,
}

pub trait PageFetcher: Send + Sync {
    fn fetch_listings(&self, query: &ListingQuery) -> Result<String, FetchError>;
}

/// Fetches server-rendered listings markup over plain HTTP.
///
/// Holds configuration only; the HTTP client lives for a single fetch
/// and is dropped on every return path.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    listings_url: String,
    num_listings: u32,
    timeout: Duration,
}

impl HttpFetcher {
    pub fn new(listings_url: impl Into<String>, num_listings: u32, timeout: Duration) -> Self {
        Self {
            listings_url: listings_url.into(),
            num_listings,
            timeout,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.listings_url.clone(),
            config.num_listings,
            config.fetch_timeout,
        )
    }

    pub fn listing_url(&self, query: &ListingQuery) -> Result<Url, FetchError> {
        let num_listings = self.num_listings.to_string();
        Url::parse_with_params(
            &self.listings_url,
            [
                ("selectedDate", query.date.as_str()),
                ("sortBy", "name"),
                ("numListingsLoaded", num_listings.as_str()),
                ("selectedCategory", query.category_id),
                ("selectedTagIds", ""),
                ("tagMatchingStyle", ""),
            ],
        )
        .map_err(|err| FetchError::InvalidUrl(format!("{}: {err}", self.listings_url)))
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch_listings(&self, query: &ListingQuery) -> Result<String, FetchError> {
        let url = self.listing_url(query)?;
        let client = Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(FetchError::Client)?;

        tracing::debug!(%url, "fetching listings");
        let response = client
            .get(url.clone())
            .send()
            .map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }
        let body = response.text().map_err(|source| FetchError::Body {
            url: url.to_string(),
            source,
        })?;

        if !body.contains(query.marker) {
            return Err(FetchError::MissingMarker {
                url: url.to_string(),
                marker: query.marker,
            });
        }
        Ok(body)
    }
}

/// Serves canned markup, or a canned failure, without touching the
/// network.
#[cfg(test)]
pub(crate) struct StaticFetcher {
    html: Option<String>,
    seen: std::sync::Mutex<Vec<ListingQuery>>,
}

#[cfg(test)]
impl StaticFetcher {
    pub(crate) fn serving(html: &str) -> Self {
        Self {
            html: Some(html.to_string()),
            seen: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            html: None,
            seen: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn queries(&self) -> Vec<ListingQuery> {
        self.seen.lock().expect("fetcher mutex poisoned").clone()
    }
}

#[cfg(test)]
impl PageFetcher for StaticFetcher {
    fn fetch_listings(&self, query: &ListingQuery) -> Result<String, FetchError> {
        self.seen
            .lock()
            .expect("fetcher mutex poisoned")
            .push(query.clone());
        match &self.html {
            Some(html) if html.contains(query.marker) => Ok(html.clone()),
            Some(_) => Err(FetchError::MissingMarker {
                url: "static".to_string(),
                marker: query.marker,
            }),
            None => Err(FetchError::InvalidUrl("static fetcher has no page".to_string())),
        }
    }
}
