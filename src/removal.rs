//! Two-phase removal: an element is first marked, then physically removed
//! once its commit deadline has passed.
//!
//! The controller never sleeps. The owner polls [`RemovalController::take_due`]
//! from its event loop with the current time, which keeps the transition
//! deterministic under test.

use std::time::{Duration, Instant};

/// Removal delay used when nothing else is configured
pub const DEFAULT_COMMIT_DELAY: Duration = Duration::from_millis(500);

/// Element currently being evicted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingRemoval {
    pub index: usize,
    pub started: Instant,
    pub deadline: Instant,
}

impl PendingRemoval {
    /// Fraction of the delay that has elapsed at `now`, in `[0.0, 1.0]`.
    pub fn progress(&self, now: Instant) -> f64 {
        let total = self.deadline.saturating_duration_since(self.started);
        if total.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f64() / total.as_secs_f64()).min(1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalState {
    Idle,
    Pending(PendingRemoval),
}

/// Outcome of a validated removal request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalRequest {
    /// The target was marked and will be removed at `deadline`
    Started { index: usize, deadline: Instant },
    /// Another removal is already in flight; nothing changed
    AlreadyPending { index: usize, deadline: Instant },
}

#[derive(Debug, Clone)]
pub struct RemovalController {
    state: RemovalState,
}

impl RemovalController {
    pub fn new() -> Self {
        Self {
            state: RemovalState::Idle,
        }
    }

    pub fn pending(&self) -> Option<&PendingRemoval> {
        match &self.state {
            RemovalState::Pending(pending) => Some(pending),
            RemovalState::Idle => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, RemovalState::Pending(_))
    }

    /// Enter `Pending` for `index`. A request while already pending leaves the
    /// existing marker in place.
    pub fn begin(&mut self, index: usize, now: Instant, delay: Duration) -> RemovalRequest {
        if let RemovalState::Pending(pending) = self.state {
            return RemovalRequest::AlreadyPending {
                index: pending.index,
                deadline: pending.deadline,
            };
        }

        let deadline = now + delay;
        self.state = RemovalState::Pending(PendingRemoval {
            index,
            started: now,
            deadline,
        });
        RemovalRequest::Started { index, deadline }
    }

    /// Commit the pending removal if its deadline has passed, returning the
    /// index to remove and going back to `Idle`.
    pub fn take_due(&mut self, now: Instant) -> Option<usize> {
        match self.state {
            RemovalState::Pending(pending) if now >= pending.deadline => {
                self.state = RemovalState::Idle;
                Some(pending.index)
            }
            _ => None,
        }
    }

    /// Drop any pending marker without committing it.
    pub fn reset(&mut self) -> Option<PendingRemoval> {
        match std::mem::replace(&mut self.state, RemovalState::Idle) {
            RemovalState::Pending(pending) => Some(pending),
            RemovalState::Idle => None,
        }
    }
}

impl Default for RemovalController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_fires_only_after_deadline() {
        let mut controller = RemovalController::new();
        let start = Instant::now();

        let request = controller.begin(3, start, DEFAULT_COMMIT_DELAY);
        assert_eq!(
            request,
            RemovalRequest::Started {
                index: 3,
                deadline: start + DEFAULT_COMMIT_DELAY
            }
        );
        assert!(controller.is_pending());

        assert_eq!(controller.take_due(start), None);
        assert_eq!(
            controller.take_due(start + Duration::from_millis(499)),
            None
        );
        assert_eq!(controller.take_due(start + DEFAULT_COMMIT_DELAY), Some(3));
        assert!(!controller.is_pending());

        // Committed exactly once
        assert_eq!(controller.take_due(start + Duration::from_secs(5)), None);
    }

    #[test]
    fn test_second_begin_keeps_first_marker() {
        let mut controller = RemovalController::new();
        let start = Instant::now();

        controller.begin(0, start, DEFAULT_COMMIT_DELAY);
        let later = start + Duration::from_millis(200);
        let request = controller.begin(7, later, DEFAULT_COMMIT_DELAY);

        assert_eq!(
            request,
            RemovalRequest::AlreadyPending {
                index: 0,
                deadline: start + DEFAULT_COMMIT_DELAY
            }
        );
        assert_eq!(controller.pending().map(|p| p.index), Some(0));
    }

    #[test]
    fn test_reset_drops_marker() {
        let mut controller = RemovalController::new();
        let start = Instant::now();
        controller.begin(1, start, DEFAULT_COMMIT_DELAY);

        assert!(controller.reset().is_some());
        assert!(!controller.is_pending());
        assert_eq!(controller.take_due(start + Duration::from_secs(1)), None);
        assert!(controller.reset().is_none());
    }

    #[test]
    fn test_progress() {
        let start = Instant::now();
        let pending = PendingRemoval {
            index: 0,
            started: start,
            deadline: start + Duration::from_millis(500),
        };

        assert_eq!(pending.progress(start), 0.0);
        assert!((pending.progress(start + Duration::from_millis(250)) - 0.5).abs() < 1e-9);
        assert_eq!(pending.progress(start + Duration::from_secs(2)), 1.0);

        let instant = PendingRemoval {
            index: 0,
            started: start,
            deadline: start,
        };
        assert_eq!(instant.progress(start), 1.0);
    }

    #[test]
    fn test_zero_delay_commits_on_next_poll() {
        let mut controller = RemovalController::new();
        let start = Instant::now();
        controller.begin(2, start, Duration::ZERO);
        assert_eq!(controller.take_due(start), Some(2));
    }
}
