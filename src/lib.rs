// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2025 Michael Dippery <michael@monkey-robot.com>

//! threadmark is a command-line tool for saving a Reddit discussion as
//! Markdown. It retrieves a thread (a post and all of the comments Reddit
//! includes with it) and writes it out as a single Markdown document, with
//! each level of replies nested one heading level deeper than its parent.
//!
//! # Examples
//!
//! (In all examples, replace the URL with the address of an actual Reddit
//! thread.)
//!
//! Print a thread as Markdown:
//!
//! ```bash
//! threadmark https://www.reddit.com/r/rust/comments/1abc2de/some_title/
//! ```
//!
//! Save a thread to a file, with comment dates shown as timestamps instead
//! of relative ages:
//!
//! ```bash
//! threadmark --date absolute -o thread.md https://www.reddit.com/r/rust/comments/1abc2de/some_title/
//! ```
//!
//! Convert a thread saved earlier from Reddit's JSON API
//! (`<thread URL>.json`) without fetching it again:
//!
//! ```bash
//! threadmark --input saved_thread.json
//! ```
//!
//! Get usage and help for the tool:
//!
//! ```bash
//! threadmark --help
//! ```
//!
//! # Limitations
//!
//! Reddit does not include every comment in a large thread. Comments that
//! Reddit leaves out ("load more comments") are skipped; threadmark never
//! makes more than one request per thread.
//!
//! # License
//!
//! threadmark is licensed under the terms of the [Apache License 2.0]. Please
//! see the LICENSE file accompanying this source code or visit the previous
//! link for more information on licensing.
//!
//! [Apache License 2.0]: https://www.apache.org/licenses/LICENSE-2.0

pub mod cli;
pub mod clock;
pub mod conf;
pub mod http;
pub mod reddit;
pub mod view;

#[cfg(test)]
mod test_utils;
