// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2025 Michael Dippery <michael@monkey-robot.com>

//! Services for communicating with APIs using HTTP.

use reqwest::header::HeaderMap;
use reqwest::{Client, ClientBuilder, StatusCode};
use std::time::Duration;
use thiserror::Error;

/// A general service for making HTTP calls.
///
/// It might be a bit odd to refer to this trait as a "service", since
/// it appears to be more of a _client_ implementation, but think of
/// this as a proxy for a remote _service_ (even though a _client_ is used
/// to communicate with that remote service). A service might not always
/// be remote, such as when the implementation is a deterministic service
/// used for testing.
pub trait HTTPService {
    /// Builds an HTTP client that sends [`HTTPService::user_agent()`] and
    /// [`HTTPService::default_headers()`] with every request and gives up
    /// on a request after `timeout`.
    ///
    /// Fails only if a TLS backend or the DNS resolver cannot be
    /// initialized, or if the user agent is not a valid header value.
    fn client(timeout: Duration) -> HTTPResult<Client> {
        ClientBuilder::new()
            .user_agent(Self::user_agent())
            .default_headers(Self::default_headers())
            .timeout(timeout)
            .build()
            .map_err(HTTPError::Client)
    }

    /// An appropriate user agent to use when making HTTP requests.
    fn user_agent() -> String {
        format!("{} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
    }

    /// Headers, other than the user agent, sent with every request.
    fn default_headers() -> HeaderMap {
        HeaderMap::new()
    }
}

/// The result of an HTTP request.
pub type HTTPResult<T> = Result<T, HTTPError>;

/// Indicates an error has occurred when making an HTTP call.
#[derive(Debug, Error)]
pub enum HTTPError {
    /// The HTTP client itself could not be created.
    #[error("Could not create HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// An error that occurred while making an HTTP request, including
    /// connection failures and timeouts.
    #[error("Error while making HTTP request: {0}")]
    Request(#[source] reqwest::Error),

    /// An error retrieving the body of a response.
    #[error("Error retrieving body of HTTP response: {0}")]
    Body(#[source] reqwest::Error),

    /// An unsuccessful HTTP status code in an HTTP response, along with
    /// the raw body the server sent back.
    #[error("Request returned HTTP {status}")]
    Http { status: StatusCode, body: String },
}

impl HTTPError {
    /// The HTTP status code, if the server responded at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            HTTPError::Http { status, .. } => Some(*status),
            HTTPError::Request(err) | HTTPError::Body(err) => err.status(),
            HTTPError::Client(_) => None,
        }
    }
}
