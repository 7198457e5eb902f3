//! Simulated clock
//!
//! A single UTC timestamp that only moves forward. Every record is stamped
//! after the clock has been advanced by the delta of the phase (or anchor)
//! that produced it.

use chrono::{DateTime, TimeDelta, Utc};
use rand::Rng;
use std::fmt;

/// How far the clock moves before a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delta {
    /// Fixed step, used by anchors and milestones
    Fixed(TimeDelta),
    /// Uniform integer number of seconds in `[min_secs, max_secs]`
    Seconds { min_secs: u32, max_secs: u32 },
}

impl Delta {
    pub fn seconds(secs: i64) -> Self {
        Delta::Fixed(TimeDelta::seconds(secs))
    }

    pub fn minutes(mins: i64) -> Self {
        Delta::Fixed(TimeDelta::minutes(mins))
    }

    pub const fn uniform(min_secs: u32, max_secs: u32) -> Self {
        Delta::Seconds { min_secs, max_secs }
    }

    /// Draw a concrete step. Fixed deltas consume no randomness.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> TimeDelta {
        match *self {
            Delta::Fixed(step) => step,
            Delta::Seconds { min_secs, max_secs } => {
                let (lo, hi) = if min_secs <= max_secs {
                    (min_secs, max_secs)
                } else {
                    (max_secs, min_secs)
                };
                TimeDelta::seconds(i64::from(rng.random_range(lo..=hi)))
            }
        }
    }
}

impl fmt::Display for Delta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Delta::Fixed(step) if step.num_seconds() % 60 == 0 && step.num_seconds() != 0 => {
                write!(f, "+{}m", step.num_minutes())
            }
            Delta::Fixed(step) => write!(f, "+{}s", step.num_seconds()),
            Delta::Seconds { min_secs, max_secs } => write!(f, "{}-{}s", min_secs, max_secs),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimClock {
    now: DateTime<Utc>,
}

impl SimClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self { now: start }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    /// Advance by `delta` and return the new time.
    ///
    /// Negative fixed steps are clamped to zero so the clock never runs
    /// backwards.
    pub fn advance<R: Rng>(&mut self, delta: &Delta, rng: &mut R) -> DateTime<Utc> {
        let step = delta.sample(rng).max(TimeDelta::zero());
        self.now += step;
        self.now
    }
}
