// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2025 Michael Dippery <michael@monkey-robot.com>

//! Environment and configuration utilities.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::env;
use std::time::Duration;

/// Origin prepended to comment permalinks, which Reddit returns as bare paths.
pub const REDDIT_ORIGIN: &str = "https://www.reddit.com";

/// Number of seconds to wait for Reddit before giving up on a request.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Environment variable that overrides the User-Agent sent to Reddit.
pub const USER_AGENT_VAR: &str = "THREADMARK_USER_AGENT";

// Reddit is much less likely to throttle or block a request that looks
// like it came from an ordinary browser.
const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:135.0) Gecko/20100101 Firefox/135.0";

// Accept-Encoding is filled in by reqwest from its enabled decoders, and
// Connection is a hop-by-hop header that the client manages itself.
const BROWSER_HEADERS: [(&str, &str); 12] = [
    (
        "accept",
        "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
    ),
    ("accept-language", "en,en-US;q=0.5"),
    ("dnt", "1"),
    ("upgrade-insecure-requests", "1"),
    ("sec-fetch-dest", "document"),
    ("sec-fetch-mode", "navigate"),
    ("sec-fetch-site", "none"),
    ("sec-fetch-user", "?1"),
    ("sec-gpc", "1"),
    ("priority", "u=0, i"),
    ("pragma", "no-cache"),
    ("cache-control", "no-cache"),
];

/// The default HTTP timeout.
pub fn default_timeout() -> Duration {
    Duration::from_secs(DEFAULT_TIMEOUT_SECS)
}

/// The User-Agent sent with every request to Reddit.
///
/// This is a desktop Firefox user agent unless `$THREADMARK_USER_AGENT`
/// is set to a non-blank value, in which case that value is used instead.
///
/// # Examples
///
/// ```
/// use threadmark::conf::user_agent;
/// # use temp_env::with_var_unset;
/// # with_var_unset("THREADMARK_USER_AGENT", || {
/// assert!(user_agent().starts_with("Mozilla/5.0"));
/// # });
/// ```
pub fn user_agent() -> String {
    env::var(USER_AGENT_VAR)
        .ok()
        .filter(|agent| !agent.trim().is_empty())
        .unwrap_or_else(|| BROWSER_USER_AGENT.to_string())
}

/// The browser-like headers sent with every request to Reddit, apart from
/// the User-Agent, which is supplied by [`user_agent()`].
pub fn browser_headers() -> HeaderMap {
    BROWSER_HEADERS
        .into_iter()
        .map(|(name, value)| {
            (
                HeaderName::from_static(name),
                HeaderValue::from_static(value),
            )
        })
        .collect()
}
