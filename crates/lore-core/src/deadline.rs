//! Cooperative deadlines carried by every engine call.

use std::time::{Duration, Instant};

use crate::errors::{LoreError, LoreResult};

/// Point in time after which an operation must give up with `Timeout`.
///
/// Engines call [`Deadline::check`] before each store call and between
/// batches. Work already committed before expiry stays committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Deadline {
    expires_at: Option<Instant>,
}

impl Deadline {
    /// No deadline: the call may run to completion.
    pub fn none() -> Self {
        Self { expires_at: None }
    }

    pub fn after(timeout: Duration) -> Self {
        Self {
            expires_at: Instant::now().checked_add(timeout),
        }
    }

    pub fn at(instant: Instant) -> Self {
        Self {
            expires_at: Some(instant),
        }
    }

    pub fn expires_at(&self) -> Option<Instant> {
        self.expires_at
    }

    /// Time left, `None` when unbounded. Saturates at zero.
    pub fn remaining(&self) -> Option<Duration> {
        self.expires_at
            .map(|at| at.saturating_duration_since(Instant::now()))
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|at| Instant::now() >= at)
    }

    /// The earlier of two deadlines.
    pub fn min(self, other: Deadline) -> Deadline {
        match (self.expires_at, other.expires_at) {
            (Some(a), Some(b)) => Deadline::at(a.min(b)),
            (Some(_), None) => self,
            (None, _) => other,
        }
    }

    /// Fail with `Timeout` if the deadline has passed.
    pub fn check(&self, operation: &str) -> LoreResult<()> {
        if self.is_expired() {
            Err(LoreError::timeout(operation))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbounded_deadline_never_expires() {
        let d = Deadline::none();
        assert!(!d.is_expired());
        assert!(d.remaining().is_none());
        assert!(d.check("op").is_ok());
    }

    #[test]
    fn past_deadline_reports_timeout_with_operation() {
        let d = Deadline::at(Instant::now());
        let err = d.check("ranker.search").unwrap_err();
        assert!(matches!(err, LoreError::Timeout { ref operation } if operation == "ranker.search"));
        assert_eq!(d.remaining(), Some(Duration::ZERO));
    }

    #[test]
    fn min_picks_earlier_deadline() {
        let soon = Deadline::after(Duration::from_millis(10));
        let later = Deadline::after(Duration::from_secs(60));
        assert_eq!(soon.min(later), soon);
        assert_eq!(Deadline::none().min(later), later);
        assert_eq!(later.min(Deadline::none()), later);
    }
}
