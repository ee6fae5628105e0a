//! Per-client round countdown
//!
//! Each client computes the remaining time from the shared round start
//! timestamp and its own wall clock. There is no authoritative cutoff: a
//! client whose clock lags may still submit after its peers consider the
//! round over.

use crate::game::{GameDocument, GameStatus};
use chrono::{DateTime, TimeDelta, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundClock {
    started_at: DateTime<Utc>,
    time_limit: TimeDelta,
}

impl RoundClock {
    #[must_use]
    pub const fn new(started_at: DateTime<Utc>, time_limit: TimeDelta) -> Self {
        Self {
            started_at,
            time_limit,
        }
    }

    /// Clock for the round in progress, if one is running
    #[must_use]
    pub fn for_document(document: &GameDocument) -> Option<Self> {
        if document.status != GameStatus::Playing {
            return None;
        }

        document
            .round_start_time
            .map(|started_at| Self::new(started_at, document.settings.time_limit_delta()))
    }

    /// Whole seconds left, `timeLimit - floor(now - start)`; never negative
    #[must_use]
    pub fn remaining_secs(&self, now: DateTime<Utc>) -> i64 {
        let elapsed = (now - self.started_at).num_seconds();
        (self.time_limit.num_seconds() - elapsed).max(0)
    }

    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.remaining_secs(now) == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clock() -> (RoundClock, DateTime<Utc>) {
        let start = DateTime::<Utc>::UNIX_EPOCH;
        (RoundClock::new(start, TimeDelta::seconds(90)), start)
    }

    #[test]
    fn counts_down_in_whole_seconds() {
        let (clock, start) = clock();
        assert_eq!(clock.remaining_secs(start), 90);
        assert_eq!(clock.remaining_secs(start + TimeDelta::milliseconds(1500)), 89);
        assert_eq!(clock.remaining_secs(start + TimeDelta::seconds(89)), 1);
        assert!(!clock.is_expired(start + TimeDelta::seconds(89)));
    }

    #[test]
    fn expires_at_the_limit_and_stays_at_zero() {
        let (clock, start) = clock();
        assert!(clock.is_expired(start + TimeDelta::seconds(90)));
        assert_eq!(clock.remaining_secs(start + TimeDelta::seconds(500)), 0);
    }

    #[test]
    fn skewed_clock_behind_the_start_sees_extra_time() {
        let (clock, start) = clock();
        assert_eq!(clock.remaining_secs(start - TimeDelta::seconds(3)), 93);
    }
}
