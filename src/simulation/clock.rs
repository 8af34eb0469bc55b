//! Virtual simulation clock
//!
//! The clock never reads wall time after construction. It counts milliseconds since
//! the simulation started and only moves when the driver advances it.

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

/// Latest point in simulation time a run may reach (one year)
pub const MAX_ELAPSED_MS: u64 = 365 * 24 * 60 * 60 * 1_000;

/// Millisecond clock anchored at a start instant
#[derive(Debug, Clone)]
pub struct SimClock {
    start: DateTime<Utc>,
    elapsed_ms: u64,
}

impl SimClock {
    /// Create a clock starting now
    pub fn new() -> Self {
        Self::starting_at(Utc::now())
    }

    /// Create a clock starting at a fixed instant
    pub fn starting_at(start: DateTime<Utc>) -> Self {
        Self { start, elapsed_ms: 0 }
    }

    /// Instant the simulation started
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Milliseconds since the start
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// Current simulated instant
    pub fn now(&self) -> DateTime<Utc> {
        self.timestamp_at(self.elapsed_ms)
    }

    /// Simulated instant of a point in simulation time
    ///
    /// Instants beyond what chrono can represent saturate at its latest instant.
    pub fn timestamp_at(&self, elapsed_ms: u64) -> DateTime<Utc> {
        let offset = Duration::milliseconds(i64::try_from(elapsed_ms).unwrap_or(i64::MAX));
        self.start.checked_add_signed(offset).unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// Move the clock forward to `elapsed_ms`; earlier instants leave it unchanged
    pub fn advance_to(&mut self, elapsed_ms: u64) {
        if elapsed_ms > self.elapsed_ms {
            debug!("Advancing clock from {} ms to {} ms", self.elapsed_ms, elapsed_ms);
            self.elapsed_ms = elapsed_ms;
        }
    }

    /// Move the clock forward by a number of milliseconds
    pub fn advance_by(&mut self, ms: u64) {
        self.advance_to(self.elapsed_ms.saturating_add(ms));
    }
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new()
    }
}
