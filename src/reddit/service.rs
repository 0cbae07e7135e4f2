// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2025 Michael Dippery <michael@monkey-robot.com>

//! HTTPS connector for the Reddit API.
//!
//! Service structures in this module provide a low-level way to interact
//! with the Reddit API over HTTPS, essentially a specialized HTTPS client
//! specifically for Reddit.

use crate::conf;
use crate::http::{HTTPError, HTTPResult, HTTPService};
use log::{debug, warn};
use reqwest::header::HeaderMap;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Converts the URL of a thread page into the URL of its JSON representation.
///
/// Exactly one trailing slash is removed before `.json` is appended. No
/// other normalization is done, so any string is accepted; a bogus URL
/// simply fails when it is fetched.
///
/// # Examples
///
/// ```
/// use threadmark::reddit::service::json_url;
/// let url = json_url("https://www.reddit.com/r/rust/comments/abc123/title/");
/// assert_eq!(url, "https://www.reddit.com/r/rust/comments/abc123/title.json");
/// ```
///
/// ```
/// use threadmark::reddit::service::json_url;
/// let url = json_url("https://www.reddit.com/r/rust/comments/abc123/title");
/// assert_eq!(url, "https://www.reddit.com/r/rust/comments/abc123/title.json");
/// ```
pub fn json_url(url: &str) -> String {
    let base = url.strip_suffix('/').unwrap_or(url);
    format!("{base}.json")
}

/// A service for retrieving Reddit threads.
///
/// Using this trait, clients can implement different ways of connecting
/// to the Reddit API, such as an actual connector for production code,
/// and a mocked connector for testing purposes.
pub trait Service {
    /// Retrieves the thread displayed at the page `url` and returns its
    /// raw JSON representation.
    ///
    /// `url` is the address of the thread as seen in a browser, not the
    /// address of its JSON data; see [`json_url()`].
    fn get_thread(&self, url: &str) -> impl Future<Output = HTTPResult<String>> + Send;
}

/// A service that contacts the Reddit API directly to retrieve threads.
#[derive(Debug)]
pub struct RedditService {
    client: Client,
}

impl RedditService {
    /// Creates a new Reddit service that abandons requests taking longer
    /// than `timeout`.
    pub fn new(timeout: Duration) -> HTTPResult<Self> {
        let client = Self::client(timeout)?;
        Ok(Self { client })
    }

    /// Sends a GET request to a Reddit API endpoint and returns the raw body.
    ///
    /// Anything other than `200 OK` is an [`HTTPError::Http`] carrying the
    /// status and whatever body Reddit sent back.
    async fn get(&self, uri: &str) -> HTTPResult<String> {
        debug!("GET {uri}");
        let resp = self
            .client
            .get(uri)
            .send()
            .await
            .map_err(HTTPError::Request)?;

        let status = resp.status();
        let body = resp.text().await.map_err(HTTPError::Body)?;
        debug!("{uri} returned HTTP {status} with {} bytes", body.len());

        if status == StatusCode::OK {
            Ok(body)
        } else {
            warn!("{uri} returned HTTP {status}");
            Err(HTTPError::Http { status, body })
        }
    }
}

impl HTTPService for RedditService {
    fn user_agent() -> String {
        conf::user_agent()
    }

    fn default_headers() -> HeaderMap {
        conf::browser_headers()
    }
}

impl Service for RedditService {
    async fn get_thread(&self, url: &str) -> HTTPResult<String> {
        let uri = json_url(url);
        self.get(&uri).await
    }
}
