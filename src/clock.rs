// SPDX-License-Identifier: Apache-2.0
// Copyright (C) 2025 Michael Dippery <michael@monkey-robot.com>

//! All things time-related.

pub use chrono::{DateTime, TimeDelta, Utc};
use chrono_humanize::HumanTime;
use std::ops::Sub;

/// Tells time and returns the time.
///
/// Generally you will want to retrieve time using [`SystemClock`],
/// but in tests you may want to implement a `Clock` with a fixed time.
pub trait Clock {
    /// The current time.
    fn now(&self) -> DateTime<Utc>;
}

/// Interacts with the system clock to get the current time.
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Marks a thing that has a notion of its age.
pub trait HasAge {
    /// The date the item was created, in UTC.
    fn created_utc(&self) -> DateTime<Utc>;

    /// The age of the item.
    ///
    /// `clock` is a source of time from which the age can be derived.
    /// Generally [`SystemClock::default()`] is used.
    fn age<C: Clock>(&self, clock: &C) -> TimeDelta {
        clock.now().sub(self.created_utc())
    }

    /// The age of the item, relative to the current time, as a
    /// human-readable string, such as "3 hours ago" or "a month ago".
    ///
    /// Items younger than a few seconds are simply "now".
    fn relative_age<C: Clock>(&self, clock: &C) -> String {
        // HumanTime treats negative durations as being in the past.
        HumanTime::from(-self.age(clock)).to_string()
    }

    /// The date the item was created, formatted as an absolute UTC
    /// timestamp ("Jan 02, 2025 14:05 UTC").
    fn absolute_age(&self) -> String {
        self.created_utc().format("%b %d, %Y %H:%M UTC").to_string()
    }
}
