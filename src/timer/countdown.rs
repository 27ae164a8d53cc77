//! Countdown and its controller.
//!
//! A [`Countdown`] is one armed timer. The [`TimerController`] holds at most
//! one of them: starting a new countdown cancels the previous one, and every
//! countdown carries a generation number so a stale expiry can never be
//! mistaken for the current one.

use std::time::Duration;

use super::clock::Clock;

/// A single armed countdown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Countdown {
    started_at: Duration,
    limit: Duration,
    generation: u64,
    fired: bool,
}

impl Countdown {
    /// Arm a countdown of `limit_secs` starting at `now`.
    #[must_use]
    pub fn new(now: Duration, limit_secs: u32, generation: u64) -> Self {
        Self {
            started_at: now,
            limit: Duration::from_secs(u64::from(limit_secs)),
            generation,
            fired: false,
        }
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Time left at `now`, floored at zero.
    #[must_use]
    pub fn remaining(&self, now: Duration) -> Duration {
        let elapsed = now.saturating_sub(self.started_at);
        self.limit.saturating_sub(elapsed)
    }

    /// Time left in whole seconds, rounded up (30.0 → 30, 29.2 → 30, 0.0 → 0).
    #[must_use]
    pub fn secs_left(&self, now: Duration) -> u32 {
        let remaining = self.remaining(now);
        let whole = remaining.as_secs() + u64::from(remaining.subsec_nanos() > 0);
        u32::try_from(whole).unwrap_or(u32::MAX)
    }

    /// Returns `true` exactly once: on the first poll at or after expiry.
    pub fn poll(&mut self, now: Duration) -> bool {
        if self.fired || !self.remaining(now).is_zero() {
            return false;
        }
        self.fired = true;
        true
    }
}

/// Owner of the (at most one) active countdown.
#[derive(Clone, Debug)]
pub struct TimerController<C> {
    clock: C,
    active: Option<Countdown>,
    next_generation: u64,
}

impl<C: Clock> TimerController<C> {
    /// Create an idle controller reading from `clock`.
    #[must_use]
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            active: None,
            next_generation: 1,
        }
    }

    /// Arm a new countdown, replacing any active one. Returns its generation.
    pub fn start(&mut self, limit_secs: u32) -> u64 {
        let generation = self.next_generation;
        self.next_generation += 1;

        if let Some(previous) = self.active.take() {
            log::debug!(
                "Replacing countdown {} with {}",
                previous.generation(),
                generation
            );
        }
        self.active = Some(Countdown::new(self.clock.now(), limit_secs, generation));
        generation
    }

    /// Disarm the active countdown, if any.
    pub fn cancel(&mut self) {
        if let Some(previous) = self.active.take() {
            log::debug!("Cancelled countdown {}", previous.generation());
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// Generation of the active countdown.
    #[must_use]
    pub fn generation(&self) -> Option<u64> {
        self.active.as_ref().map(Countdown::generation)
    }

    /// Whole seconds left on the active countdown.
    #[must_use]
    pub fn secs_left(&self) -> Option<u32> {
        let now = self.clock.now();
        self.active.as_ref().map(|c| c.secs_left(now))
    }

    /// Check for expiry. Returns the generation that expired, once; the
    /// countdown is then stopped.
    pub fn poll(&mut self) -> Option<u64> {
        let now = self.clock.now();
        let countdown = self.active.as_mut()?;
        if !countdown.poll(now) {
            return None;
        }
        let generation = countdown.generation();
        self.active = None;
        Some(generation)
    }

    /// The clock this controller reads.
    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }
}
