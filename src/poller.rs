// src/poller.rs
//
// Bounded fetch-and-check loop used by the wait operations.

use chrono::{DateTime, Utc};
use log::{debug, info};
use std::time::Duration;

use crate::client_ops::Clock;
use crate::error::Error;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(250);
pub const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    pub interval: Duration,
    pub timeout: Duration,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            timeout: DEFAULT_WAIT_TIMEOUT,
        }
    }
}

impl PollSettings {
    pub fn with_timeout(self, timeout: Duration) -> Self {
        Self { timeout, ..self }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    Satisfied { ticks: u32 },
    TimedOut { ticks: u32 },
}

impl PollOutcome {
    pub fn is_satisfied(&self) -> bool {
        matches!(self, PollOutcome::Satisfied { .. })
    }

    pub fn ticks(&self) -> u32 {
        match self {
            PollOutcome::Satisfied { ticks } | PollOutcome::TimedOut { ticks } => *ticks,
        }
    }
}

pub struct Poller<C: Clock> {
    clock: C,
    settings: PollSettings,
}

impl<C: Clock> Poller<C> {
    pub fn new(clock: C, settings: PollSettings) -> Self {
        Self { clock, settings }
    }

    pub fn settings(&self) -> PollSettings {
        self.settings
    }

    /// Run `tick` until it reports `true` or the timeout elapses.
    ///
    /// The first tick runs immediately, later ones every `interval`; the
    /// last sleep is clamped so one final tick lands on the deadline.
    /// An error from `tick` ends the loop at once. A zero interval is
    /// rejected before the first tick.
    pub fn run<F>(&self, mut tick: F) -> Result<PollOutcome, Error>
    where
        F: FnMut() -> Result<bool, Error>,
    {
        if self.settings.interval.is_zero() {
            return Err(Error::Config("poll interval must be greater than zero".into()));
        }

        // Timeouts past chrono's range mean no practical deadline.
        let start = self.clock.now();
        let timeout = chrono::Duration::from_std(self.settings.timeout).unwrap_or(chrono::Duration::MAX);
        let deadline = start
            .checked_add_signed(timeout)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        let mut ticks = 0;

        loop {
            ticks += 1;
            if tick()? {
                info!("Poll condition met after {} tick(s)", ticks);
                return Ok(PollOutcome::Satisfied { ticks });
            }

            let now = self.clock.now();
            if now >= deadline {
                info!("Poll timed out after {} tick(s)", ticks);
                return Ok(PollOutcome::TimedOut { ticks });
            }

            let remaining = (deadline - now).to_std().unwrap_or_default();
            let pause = self.settings.interval.min(remaining);
            debug!("Tick {} unsatisfied, sleeping {:?}", ticks, pause);
            self.clock.sleep(pause);
        }
    }
}
