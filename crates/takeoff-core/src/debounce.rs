use std::time::{Duration, Instant};

pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(300);

/// Identifies one scheduled action. Only the most recent ticket is ever current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// Holds at most one pending value and releases it after a quiet period.
///
/// Scheduling again replaces the pending value and restarts the period, so a
/// burst of updates fires once with the last value. Callers pass `now` in,
/// which keeps the type free of timers and threads.
#[derive(Debug)]
pub struct Debouncer<T> {
    quiet_period: Duration,
    pending: Option<Pending<T>>,
    generation: u64,
}

#[derive(Debug)]
struct Pending<T> {
    due: Instant,
    ticket: Ticket,
    value: T,
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_PERIOD)
    }
}

impl<T> Debouncer<T> {
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            pending: None,
            generation: 0,
        }
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    /// Schedules `value`, superseding anything still pending.
    pub fn schedule(&mut self, value: T, now: Instant) -> Ticket {
        self.generation += 1;
        let ticket = Ticket(self.generation);
        self.pending = Some(Pending {
            due: now + self.quiet_period,
            ticket,
            value,
        });
        ticket
    }

    /// Releases the pending value once its quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<(Ticket, T)> {
        let due = self.pending.as_ref()?.due;
        if now >= due {
            self.flush()
        } else {
            None
        }
    }

    /// Releases the pending value immediately, ignoring the quiet period.
    pub fn flush(&mut self) -> Option<(Ticket, T)> {
        self.pending.take().map(|p| (p.ticket, p.value))
    }

    /// Drops the pending value. Tickets handed out before this are no longer current.
    pub fn cancel(&mut self) {
        self.pending = None;
        self.generation += 1;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Time left before the pending value is due, if any.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.pending
            .as_ref()
            .map(|p| p.due.saturating_duration_since(now))
    }

    /// Whether `ticket` belongs to the latest schedule. Results carrying an
    /// older ticket must be discarded.
    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.generation
    }
}
