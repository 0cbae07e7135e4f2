// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2025 Michael Dippery <michael@monkey-robot.com>

//! Clients for reading threads from the Reddit API.

use crate::http;
use crate::reddit::service::{RedditService, Service};
use crate::reddit::thing::{self, Thread};
use log::debug;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// A Reddit thread retrieved from a particular URL, or read from a saved
/// copy of Reddit's JSON.
#[derive(Debug)]
pub struct Discussion {
    url: String,
    thread: Thread,
}

impl Discussion {
    /// Retrieves the thread at `url` from Reddit.
    ///
    /// `url` should be the address of the thread as it appears in a
    /// browser. The request is abandoned if it takes longer than `timeout`.
    ///
    /// Returns an [`enum@Error`] if the thread cannot be retrieved or parsed.
    pub async fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, Error> {
        let service = RedditService::new(timeout)?;
        Self::new_with_service(url, service).await
    }

    /// Retrieves the thread at `url`.
    ///
    /// `service` is the actual service implementation that will be used
    /// to retrieve the thread.
    ///
    /// Returns an [`enum@Error`] if the thread cannot be retrieved or parsed.
    pub(crate) async fn new_with_service<T: Service>(
        url: impl Into<String>,
        service: T,
    ) -> Result<Self, Error> {
        let url = url.into();
        let data = service.get_thread(&url).await?;
        debug!("retrieved {} bytes of thread data from {url}", data.len());
        let thread = Thread::parse(&data)?;
        Ok(Self { url, thread })
    }

    /// Reads a thread saved from Reddit's JSON API at `path`.
    ///
    /// Returns an [`enum@Error`] if the file cannot be read or parsed.
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let data = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| Error::Read {
                path: path.to_path_buf(),
                source,
            })?;
        debug!("read {} bytes of thread data from {}", data.len(), path.display());
        let thread = Thread::parse(&data)?;
        let url = path.display().to_string();
        Ok(Self { url, thread })
    }

    /// The URL the thread was retrieved from, or the path of the file it
    /// was read from.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The retrieved thread.
    pub fn thread(&self) -> &Thread {
        &self.thread
    }
}

/// A client error.
#[derive(Debug, Error)]
pub enum Error {
    /// An error from the underlying HTTP service.
    #[error("Service error: {0}")]
    Service(#[from] http::HTTPError),

    /// An error parsing data.
    #[error("Parse error: {0}")]
    Parse(#[from] thing::Error),

    /// A saved thread could not be read.
    #[error("Read error: {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
}

impl Error {
    /// The raw body of an unsuccessful HTTP response, if that is what
    /// caused the error.
    pub fn response_body(&self) -> Option<&str> {
        match self {
            Error::Service(http::HTTPError::Http { body, .. }) => Some(body),
            _ => None,
        }
    }
}
