//! Trailing-edge debounce with an explicit clock.
//!
//! Every push replaces the pending value and pushes the deadline back by the
//! quiet interval; the value is released once, by the first poll at or
//! after the deadline. Time is passed in by the caller, so the same type
//! drives a synchronous tick loop, a tokio timer, or a test with a
//! hand-advanced clock.
//!
//! ```
//! use std::time::{Duration, Instant};
//! use canon_vdom::debounce::Debouncer;
//!
//! let t0 = Instant::now();
//! let mut debounce = Debouncer::new(Duration::from_millis(100));
//! debounce.push("a", t0);
//! debounce.push("b", t0 + Duration::from_millis(50));
//!
//! assert_eq!(debounce.poll(t0 + Duration::from_millis(120)), None);
//! assert_eq!(debounce.poll(t0 + Duration::from_millis(150)), Some("b"));
//! assert!(!debounce.is_pending());
//! ```

use std::ops::Add;
use std::time::{Duration, Instant};

/// Latest-value-wins debounce.
///
/// Not thread-safe; owned by whoever drives it.
#[derive(Debug, Clone)]
pub struct Debouncer<T, I = Instant> {
    interval: Duration,
    pending: Option<Pending<T, I>>,
}

#[derive(Debug, Clone)]
struct Pending<T, I> {
    value: T,
    deadline: I,
}

impl<T, I> Debouncer<T, I>
where
    I: Copy + Ord + Add<Duration, Output = I>,
{
    /// Create a debouncer with the given quiet interval.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            pending: None,
        }
    }

    /// Quiet interval.
    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Record a value at `now`, replacing any pending value and re-arming
    /// the deadline at `now + interval`.
    pub fn push(&mut self, value: T, now: I) {
        self.pending = Some(Pending {
            value,
            deadline: now + self.interval,
        });
    }

    /// Release the pending value if the quiet interval has elapsed.
    pub fn poll(&mut self, now: I) -> Option<T> {
        match &self.pending {
            Some(p) if now >= p.deadline => self.take(),
            _ => None,
        }
    }

    /// When the pending value becomes due.
    #[inline]
    pub fn deadline(&self) -> Option<I> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    /// Release the pending value regardless of the deadline.
    #[inline]
    pub fn take(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.value)
    }

    /// Drop the pending value. Returns whether one was pending.
    #[inline]
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Whether a value is waiting.
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Peek at the pending value.
    #[inline]
    pub fn pending(&self) -> Option<&T> {
        self.pending.as_ref().map(|p| &p.value)
    }
}
