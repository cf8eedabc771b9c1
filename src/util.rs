//! Small helpers shared by the engine and the message layer

use std::time::{Duration, Instant};

/// Tolerance used when comparing percentages that should sum to 100
pub const SIZE_EPSILON: f64 = 1e-6;

/// Approximate float equality
#[inline]
pub fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}

/// Monotonic id source scoped to its owner
///
/// Wraps back to zero after `u64::MAX`; nothing in a single workspace lives
/// long enough for that to collide.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    next: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start counting from `first`
    pub fn starting_at(first: u64) -> Self {
        Self { next: first }
    }

    /// Hand out the next id
    pub fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next = if self.next == u64::MAX { 0 } else { self.next + 1 };
        id
    }

    /// Peek at the id the next call will return
    pub fn peek(&self) -> u64 {
        self.next
    }
}

/// Synchronous throttle: the first call passes, later calls pass at most once
/// per interval.
#[derive(Debug, Clone)]
pub struct Throttle {
    interval: Duration,
    last: Option<Instant>,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Check against the wall clock
    pub fn ready(&mut self) -> bool {
        self.ready_at(Instant::now())
    }

    /// Check against an explicit instant. Records `now` when it passes.
    pub fn ready_at(&mut self, now: Instant) -> bool {
        if self.interval.is_zero() {
            return true;
        }
        match self.last {
            Some(last) if now.saturating_duration_since(last) < self.interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }

    /// Forget the last pass so the next call goes through
    pub fn reset(&mut self) {
        self.last = None;
    }
}

impl Default for Throttle {
    fn default() -> Self {
        Self::new(Duration::ZERO)
    }
}
