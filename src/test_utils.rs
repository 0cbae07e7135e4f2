// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2025 Michael Dippery <michael@monkey-robot.com>

use crate::clock::{Clock, DateTime, Utc};
use crate::http::{HTTPError, HTTPResult};
use crate::reddit::Discussion;
use crate::reddit::client::Error;
use crate::reddit::service::Service;
use reqwest::StatusCode;
use std::fs;

pub fn do_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn load_data(file: &str) -> String {
    fs::read_to_string(format!("tests/data/{file}.json")).expect("could not find test data")
}

pub fn load_output(filename: &str) -> String {
    let filename = format!("tests/output/{filename}.out");
    String::from(
        fs::read_to_string(&filename)
            .unwrap_or_else(|_| panic!("could not load test data from {filename}"))
            .trim_end(),
    )
}

/// Builds the JSON for a thread whose comments form a single chain
/// `depth` replies deep. The comment at depth `n` is written by `user{n}`.
pub fn deep_thread(depth: usize) -> String {
    let mut json = String::from(concat!(
        r#"[{"kind": "Listing", "data": {"children": [{"kind": "t3", "data": "#,
        r#"{"subreddit_name_prefixed": "r/deep", "title": "Deep", "selftext": ""}}]}}, "#,
        r#"{"kind": "Listing", "data": {"children": ["#,
    ));
    for n in 1..=depth {
        json += &format!(
            r#"{{"kind": "t1", "data": {{"author": "user{n}", "body": "level {n}", "permalink": "/r/deep/comments/1/_/{n}/", "is_submitter": false, "created_utc": 1748009580, "score": 1, "replies": "#
        );
        if n < depth {
            json += r#"{"kind": "Listing", "data": {"children": ["#;
        }
    }
    json += r#""""#;
    for n in (1..=depth).rev() {
        json += "}}";
        if n > 1 {
            json += "]}}";
        }
    }
    json += "]}}]";
    json
}

/// Serves threads from `tests/data` instead of Reddit.
///
/// A fixture whose name ends in `_404` is served as an HTTP 404 with the
/// fixture as the body.
pub struct TestService<'a> {
    name: &'a str,
}

impl<'a> TestService<'a> {
    pub fn new(name: &'a str) -> Self {
        Self { name }
    }
}

impl Service for TestService<'_> {
    async fn get_thread(&self, _url: &str) -> HTTPResult<String> {
        do_logging();
        let body = load_data(self.name);
        if self.name.ends_with("_404") {
            Err(HTTPError::Http {
                status: StatusCode::NOT_FOUND,
                body,
            })
        } else {
            Ok(body)
        }
    }
}

pub struct FrozenClock {
    datetime: DateTime<Utc>,
}

impl FrozenClock {
    pub fn new(datetime: DateTime<Utc>) -> Self {
        FrozenClock { datetime }
    }
}

impl Default for FrozenClock {
    fn default() -> Self {
        let datetime = DateTime::parse_from_rfc3339("2025-05-23T10:13:00-07:00")
            .expect("invalid date supplied")
            .with_timezone(&Utc);
        Self::new(datetime)
    }
}

impl Clock for FrozenClock {
    fn now(&self) -> DateTime<Utc> {
        self.datetime
    }
}

const TEST_URL: &str = "https://www.reddit.com/r/rust/comments/1abc2de/what_are_you_working_on/";

impl Discussion {
    /// Returns a thread with nested replies and "more" placeholders that
    /// can be used for testing purposes.
    pub async fn test() -> Discussion {
        Discussion::new_with_service(TEST_URL, TestService::new("thread_nested"))
            .await
            .unwrap()
    }

    /// Returns a thread with no comments that can be used for testing purposes.
    pub async fn test_empty() -> Discussion {
        Discussion::new_with_service(TEST_URL, TestService::new("thread_no_comments"))
            .await
            .unwrap()
    }

    /// Attempts to retrieve a thread that does not exist.
    pub async fn test_none() -> Result<Discussion, Error> {
        Discussion::new_with_service(TEST_URL, TestService::new("thread_404")).await
    }

    /// Attempts to retrieve a thread with a comment that has no author.
    pub async fn test_malformed() -> Result<Discussion, Error> {
        Discussion::new_with_service(TEST_URL, TestService::new("thread_missing_author")).await
    }
}
