// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2025 Michael Dippery <michael@monkey-robot.com>

//! Drives the command-line program.

use crate::clock::{Clock, SystemClock};
use crate::conf;
use crate::reddit::Discussion;
use crate::reddit::client;
use crate::view::{ViewOptions, Viewable};
use clap::{Parser, ValueEnum};
use clap_verbosity_flag::Verbosity;
use log::{debug, info};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Program configuration.
#[derive(Debug, Parser)]
#[command(version)]
#[command(about = "Converts a Reddit thread into a Markdown document", long_about = None)]
pub struct Config {
    #[command(flatten)]
    verbosity: Verbosity,

    /// URL of the Reddit thread
    #[arg(required_unless_present = "input", conflicts_with = "input")]
    url: Option<String>,

    /// Read the thread from a saved copy of its JSON instead of fetching it
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Write Markdown to PATH instead of standard output
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Show dates in "absolute" or "relative" format
    #[arg(long, value_enum, default_value_t = DateFormat::Relative)]
    date: DateFormat,

    /// Give up on Reddit after SECS seconds
    #[arg(long, value_name = "SECS", default_value_t = conf::DEFAULT_TIMEOUT_SECS)]
    timeout: u64,
}

impl Config {
    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    /// URL of the thread to convert, unless it is read from a file.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Saved thread JSON to read instead of fetching the thread.
    pub fn input(&self) -> Option<&Path> {
        self.input.as_deref()
    }

    /// File the Markdown document is written to, or `None` for standard output.
    pub fn output(&self) -> Option<&Path> {
        self.output.as_deref()
    }

    /// How long to wait for Reddit before giving up.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    fn view_options(&self) -> ViewOptions {
        ViewOptions::build().date_format(self.date.clone()).build()
    }
}

/// Determines if dates should be displayed as an absolute date ("Jan 01, 2025 09:30 UTC")
/// or relative to the current time ("5 months ago").
#[derive(Clone, Debug, Default, PartialEq, ValueEnum)]
pub enum DateFormat {
    /// Display dates as an absolute date ("Jan 01, 2025 09:30 UTC").
    Absolute,

    /// Display dates relative to the current time ("5 months ago").
    #[default]
    Relative,
}

/// An error that stops the program.
#[derive(Debug, Error)]
pub enum Error {
    /// The thread could not be retrieved, read or parsed.
    #[error("could not fetch thread: {0}")]
    Fetch(#[from] client::Error),

    /// The Markdown document could not be written.
    #[error("could not write {}: {source}", .path.display())]
    Output { path: PathBuf, source: io::Error },
}

/// Runs the command-line program.
#[derive(Debug)]
pub struct Runner {
    config: Config,
    discussion: Discussion,
}

impl Runner {
    /// Create a new program runner using the given `config`.
    ///
    /// Fetches the thread named in `config`, or reads it from the input
    /// file, returning an error with a helpful message if it cannot be
    /// retrieved or understood.
    pub async fn new(config: Config) -> Result<Runner, Error> {
        let discussion = match config.input() {
            Some(path) => {
                info!("reading {}", path.display());
                Discussion::from_file(path).await?
            }
            None => {
                let url = config.url().unwrap_or_default();
                info!("fetching {url}");
                Discussion::new(url, config.timeout()).await?
            }
        };
        Ok(Self { config, discussion })
    }

    /// Run the command-line program using its stored configuration options.
    pub async fn run(&self) -> Result<(), Error> {
        let markdown = self.render(&SystemClock::default());
        match self.config.output() {
            Some(path) => write_output(path, &markdown).await,
            None => {
                println!("{markdown}");
                Ok(())
            }
        }
    }

    fn render<C: Clock>(&self, clock: &C) -> String {
        self.discussion.view(&self.config.view_options(), clock)
    }
}

/// Fetches the thread named in `config` and writes it out as Markdown.
pub async fn run(config: Config) -> Result<(), Error> {
    Runner::new(config).await?.run().await
}

async fn write_output(path: &Path, markdown: &str) -> Result<(), Error> {
    tokio::fs::write(path, markdown)
        .await
        .map_err(|source| Error::Output {
            path: path.to_path_buf(),
            source,
        })?;
    debug!("wrote {} bytes to {}", markdown.len(), path.display());
    Ok(())
}
