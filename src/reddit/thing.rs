// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2025 Michael Dippery <michael@monkey-robot.com>

//! A "thing" in the Reddit sense.
//!
//! Historically in the Reddit API and its old source code, a "Thing" was
//! any element of the Reddit system: users, posts, comments, etc. This
//! module encapsulates that idea and provides an easy way to more or less
//! work with JSON data from the Reddit API.
//!
//! A thread, as returned by `/r/<subreddit>/comments/<id>.json`, is a JSON
//! array of two listings. The first listing holds the post itself; the
//! second holds the top-level comments, each of which may hold a listing
//! of its own replies, and so on.

use crate::clock::{DateTime, HasAge, Utc};
use log::{trace, warn};
use serde::Deserialize;
use serde::de::value::MapAccessDeserializer;
use serde::de::{Deserializer, Error as _, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde_json::error::Category;
use std::{fmt, mem};
use thiserror::Error;

/// An error parsing thread data.
#[derive(Debug, Error)]
pub enum Error {
    /// The data is not valid JSON.
    #[error("invalid JSON: {0}")]
    Syntax(#[source] serde_json::Error),

    /// The data is JSON, but not shaped like a thread: a required field
    /// is missing, a field has the wrong type, or the top-level array has
    /// the wrong number of listings.
    #[error("unexpected thread data: {0}")]
    Data(#[source] serde_json::Error),

    /// The post listing is empty or does not start with a post.
    #[error("thread does not contain a post")]
    MissingPost,
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        match err.classify() {
            Category::Data => Error::Data(err),
            Category::Io | Category::Syntax | Category::Eof => Error::Syntax(err),
        }
    }
}

/// A Reddit thread: a post and the comments made on it.
#[derive(Debug)]
pub struct Thread {
    post: Post,
    comments: Vec<Thing>,
}

impl Thread {
    /// Parses the JSON representation of a thread.
    ///
    /// Replies may be nested to any depth; the parser grows its stack onto
    /// the heap as needed instead of giving up at a fixed nesting limit.
    pub fn parse(data: &str) -> Result<Self, Error> {
        let mut json = serde_json::Deserializer::from_str(data);
        json.disable_recursion_limit();
        let (posts, comments): (Listing, Listing) =
            Deserialize::deserialize(serde_stacker::Deserializer::new(&mut json))?;
        json.end()?;

        let post = match posts.into_children().into_iter().next() {
            Some(Thing::Post(post)) => post,
            _ => return Err(Error::MissingPost),
        };
        let comments = comments.into_children();
        trace!("parsed thread with {} top-level entries", comments.len());

        Ok(Self { post, comments })
    }

    /// The post the thread is about.
    pub fn post(&self) -> &Post {
        &self.post
    }

    /// Every comment in the thread, paired with its depth.
    ///
    /// Comments are visited depth-first, with each comment followed by all
    /// of its replies before its next sibling. Top-level comments have a
    /// depth of 1. Placeholders for replies that Reddit did not include in
    /// the response are skipped.
    pub fn comments(&self) -> CommentTree<'_> {
        CommentTree::new(&self.comments)
    }
}

/// Anything that can show up in a listing.
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", content = "data")]
pub enum Thing {
    /// A comment (`t1`).
    #[serde(rename = "t1")]
    Comment(Comment),

    /// A post (`t3`).
    #[serde(rename = "t3")]
    Post(Post),

    /// A placeholder for replies that were left out of the response.
    #[serde(rename = "more")]
    More(More),
}

/// A Reddit post.
#[derive(Debug, Deserialize)]
pub struct Post {
    subreddit_name_prefixed: String,
    title: String,
    selftext: String,
}

impl Post {
    /// The subreddit the post was made in, including its `r/` prefix.
    pub fn subreddit(&self) -> &str {
        &self.subreddit_name_prefixed
    }

    /// The post's title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The post's body, in Markdown. Empty for link posts.
    pub fn body(&self) -> &str {
        &self.selftext
    }
}

/// A Reddit comment.
#[derive(Debug, Deserialize)]
pub struct Comment {
    author: String,
    body: String,
    permalink: String,
    is_submitter: bool,
    #[serde(deserialize_with = "deserialize_timestamp")]
    created_utc: DateTime<Utc>,
    score: i64,
    #[serde(default, deserialize_with = "deserialize_replies")]
    replies: Vec<Thing>,
}

impl Comment {
    /// The comment author's username, without the `u/` prefix.
    pub fn author(&self) -> &str {
        &self.author
    }

    /// The comment's body, in Markdown.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// The path to the comment, relative to the Reddit origin.
    pub fn permalink(&self) -> &str {
        &self.permalink
    }

    /// True if the comment was made by the person who submitted the post.
    pub fn is_op(&self) -> bool {
        self.is_submitter
    }

    /// The comment's score, which may be negative.
    pub fn score(&self) -> i64 {
        self.score
    }

    /// Direct replies to this comment, in the order Reddit sent them.
    pub fn replies(&self) -> impl Iterator<Item = &Comment> {
        self.replies.iter().filter_map(|thing| match thing {
            Thing::Comment(comment) => Some(comment),
            _ => None,
        })
    }
}

// Replies are released from a work stack, so dropping a deep thread never
// recurses.
impl Drop for Comment {
    fn drop(&mut self) {
        let mut pending = mem::take(&mut self.replies);
        while let Some(thing) = pending.pop() {
            if let Thing::Comment(mut comment) = thing {
                pending.append(&mut comment.replies);
            }
        }
    }
}

impl HasAge for Comment {
    fn created_utc(&self) -> DateTime<Utc> {
        self.created_utc
    }
}

/// Replies that Reddit left out of a response.
#[derive(Debug, Deserialize)]
pub struct More {
    #[serde(default)]
    count: u64,
    #[serde(default)]
    children: Vec<String>,
}

impl More {
    /// The number of replies that were left out.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// IDs of the comments that were left out.
    pub fn children(&self) -> &[String] {
        &self.children
    }
}

#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    children: Vec<Thing>,
}

impl Listing {
    fn into_children(self) -> Vec<Thing> {
        self.data.children
    }
}

/// Iterates over a comment forest depth-first, yielding each comment along
/// with its depth.
///
/// Pending comments are kept on an explicit stack rather than the call
/// stack, so threads of any depth can be walked.
#[derive(Debug)]
pub struct CommentTree<'a> {
    stack: Vec<(usize, &'a Thing)>,
}

impl<'a> CommentTree<'a> {
    fn new(roots: &'a [Thing]) -> Self {
        let mut tree = Self { stack: Vec::new() };
        tree.push_children(roots, 1);
        tree
    }

    // Children are pushed in reverse so the first child is popped first.
    fn push_children(&mut self, children: &'a [Thing], depth: usize) {
        self.stack
            .extend(children.iter().rev().map(|child| (depth, child)));
    }
}

impl<'a> Iterator for CommentTree<'a> {
    type Item = (usize, &'a Comment);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((depth, thing)) = self.stack.pop() {
            match thing {
                Thing::Comment(comment) => {
                    self.push_children(&comment.replies, depth + 1);
                    return Some((depth, comment));
                }
                Thing::More(more) => {
                    trace!("skipping {} unfetched replies at depth {depth}", more.count());
                }
                Thing::Post(post) => {
                    warn!("ignoring post \"{}\" found among comments", post.title());
                }
            }
        }
        None
    }
}

/// Reddit sends creation times as epoch seconds, usually as a float.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let secs = f64::deserialize(deserializer)?;
    DateTime::from_timestamp(secs.trunc() as i64, 0)
        .ok_or_else(|| D::Error::custom(format!("timestamp out of range: {secs}")))
}

/// A comment's replies are a listing when it has any. When it has none,
/// Reddit sends an empty string, or sometimes `null`, or leaves the field
/// out, so anything other than an object means "no replies". An object
/// that is not a valid listing is still an error.
fn deserialize_replies<'de, D>(deserializer: D) -> Result<Vec<Thing>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(RepliesVisitor)
}

struct RepliesVisitor;

impl<'de> Visitor<'de> for RepliesVisitor {
    type Value = Vec<Thing>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a listing of replies")
    }

    fn visit_map<A>(self, map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        Listing::deserialize(MapAccessDeserializer::new(map)).map(Listing::into_children)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(Vec::new())
    }

    fn visit_str<E: serde::de::Error>(self, _: &str) -> Result<Self::Value, E> {
        Ok(Vec::new())
    }

    fn visit_bool<E: serde::de::Error>(self, _: bool) -> Result<Self::Value, E> {
        Ok(Vec::new())
    }

    fn visit_i64<E: serde::de::Error>(self, _: i64) -> Result<Self::Value, E> {
        Ok(Vec::new())
    }

    fn visit_u64<E: serde::de::Error>(self, _: u64) -> Result<Self::Value, E> {
        Ok(Vec::new())
    }

    fn visit_f64<E: serde::de::Error>(self, _: f64) -> Result<Self::Value, E> {
        Ok(Vec::new())
    }

    fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
        Ok(Vec::new())
    }

    fn visit_none<E: serde::de::Error>(self) -> Result<Self::Value, E> {
        Ok(Vec::new())
    }
}
