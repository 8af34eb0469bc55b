//! Cancellable door auto-close timer
//!
//! The scheduler does not keep time itself. Arming the timer hands out a ticket the
//! host schedules; cancelling it makes that ticket stale, so a late expiry is
//! recognised and ignored.

use serde::{Deserialize, Serialize};

/// Identifies one arming of an auto-close timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimerTicket(pub u64);

/// Auto-close timer state of one scheduler
#[derive(Debug, Clone)]
pub struct DoorTimer {
    delay_ms: u64,
    next_ticket: u64,
    armed: Option<TimerTicket>,
}

impl DoorTimer {
    /// Create a disarmed timer with the given delay
    pub fn new(delay_ms: u64) -> Self {
        Self { delay_ms, next_ticket: 1, armed: None }
    }

    /// Delay between arming and expiry
    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    /// Ticket of the currently armed timer, if any
    pub fn armed(&self) -> Option<TimerTicket> {
        self.armed
    }

    /// Arm the timer and return its ticket. Re-arming replaces the previous ticket.
    pub fn start(&mut self) -> TimerTicket {
        let ticket = TimerTicket(self.next_ticket);
        self.next_ticket += 1;
        self.armed = Some(ticket);
        ticket
    }

    /// Disarm the timer, returning the ticket that was armed
    pub fn cancel(&mut self) -> Option<TimerTicket> {
        self.armed.take()
    }

    /// Report an expiry. Returns `true` (and disarms) only for the armed ticket.
    pub fn expire(&mut self, ticket: TimerTicket) -> bool {
        if self.armed == Some(ticket) {
            self.armed = None;
            true
        } else {
            false
        }
    }
}
