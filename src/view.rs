// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2025 Michael Dippery <michael@monkey-robot.com>

//! Draws viewable objects as Markdown.

use crate::cli::DateFormat;
use crate::clock::{Clock, HasAge};
use crate::conf::REDDIT_ORIGIN;
use crate::reddit::Discussion;
use crate::reddit::thing::{Comment, Post, Thread};
use log::debug;

/// View renderer options.
#[derive(Clone, Debug)]
pub struct ViewOptions {
    date_format: DateFormat,
    depth: usize,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self::build().build()
    }
}

impl ViewOptions {
    /// Incrementally builds a new set of view options.
    ///
    /// # Examples
    ///
    /// ```
    /// use threadmark::cli::DateFormat;
    /// use threadmark::view::ViewOptions;
    /// let opts = ViewOptions::build()
    ///     .date_format(DateFormat::Absolute)
    ///     .depth(2)
    ///     .build();
    /// ```
    pub fn build() -> ViewOptionsBuilder {
        ViewOptionsBuilder::default()
    }

    /// A copy of these options for rendering a comment nested at `depth`.
    pub fn at_depth(&self, depth: usize) -> Self {
        Self {
            depth,
            ..self.clone()
        }
    }

    fn age<T: HasAge, C: Clock>(&self, thing: &T, clock: &C) -> String {
        match self.date_format {
            DateFormat::Relative => thing.relative_age(clock),
            DateFormat::Absolute => thing.absolute_age(),
        }
    }
}

/// A builder for view options.
///
/// You probably don't want to use this directly; call [`ViewOptions::build()`]
/// and construct it incrementally instead.
#[derive(Debug)]
#[must_use]
pub struct ViewOptionsBuilder {
    date_format: DateFormat,
    depth: usize,
}

impl Default for ViewOptionsBuilder {
    fn default() -> Self {
        Self {
            date_format: DateFormat::default(),
            depth: 1,
        }
    }
}

impl ViewOptionsBuilder {
    /// Sets the date format option to relative or absolute.
    pub fn date_format(mut self, date_format: DateFormat) -> Self {
        self.date_format = date_format;
        self
    }

    /// Sets the depth at which a comment is drawn. Top-level comments
    /// are at depth 1.
    pub fn depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    /// Finalizes the [`ViewOptions`].
    pub fn build(self) -> ViewOptions {
        ViewOptions {
            date_format: self.date_format,
            depth: self.depth,
        }
    }
}

/// Marks an item that can be converted into Markdown.
pub trait Viewable {
    /// Converts the item into Markdown.
    ///
    /// `clock` is the point in time from which relative dates are measured.
    fn view<C: Clock>(&self, opts: &ViewOptions, clock: &C) -> String;
}

impl Viewable for Post {
    fn view<C: Clock>(&self, _: &ViewOptions, _: &C) -> String {
        format!(
            "# {} Reddit Post \n\n**title:** {}  \n\n## Post Text  \n\n{}  \n\n",
            self.subreddit(),
            self.title(),
            self.body(),
        )
    }
}

impl Viewable for Comment {
    fn view<C: Clock>(&self, opts: &ViewOptions, clock: &C) -> String {
        // Deep threads produce headings past h6; they are left as they are.
        let heading = "#".repeat(opts.depth + 2);
        let op = if self.is_op() { "**OP**" } else { "" };
        format!(
            "{heading} Reply by *u/{}* {op}\n\n{}\n\n\n\nposted: **{}** | score: **{}**\n[permalink: ]({REDDIT_ORIGIN}{})\n\n",
            self.author(),
            self.body(),
            opts.age(self, clock),
            self.score(),
            self.permalink(),
        )
    }
}

impl Viewable for Thread {
    fn view<C: Clock>(&self, opts: &ViewOptions, clock: &C) -> String {
        let mut s = self.post().view(opts, clock);
        let mut count = 0;
        for (depth, comment) in self.comments() {
            s += &comment.view(&opts.at_depth(depth), clock);
            count += 1;
        }
        debug!("rendered {count} comments");
        s
    }
}

impl Viewable for Discussion {
    fn view<C: Clock>(&self, opts: &ViewOptions, clock: &C) -> String {
        self.thread().view(opts, clock)
    }
}
