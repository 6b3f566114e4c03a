//! Fixed-interval scheduler
//!
//! Drives the reconciliation job on a fixed period, forever. The schedule
//! is deliberately minimal: one job, one timer, no overlap between runs,
//! and no supervision. A job error ends the schedule and is returned to
//! the caller, which treats it as fatal.
//!
//! The first run happens one full period after the schedule starts; there
//! is no immediate kick-off run.

use crate::error::{Error, Result};
use std::future::Future;
use std::time::Duration;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::debug;

/// A fixed repetition period for the reconciliation job
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    period: Duration,
}

impl Schedule {
    /// Create a schedule from an explicit period
    pub fn new(period: Duration) -> Self {
        Self { period }
    }

    /// Parse an interval expression
    ///
    /// Accepts a bare number of seconds ("300") or a number with an `s`,
    /// `m`, or `h` suffix ("30s", "5m", "2h").
    ///
    /// # Returns
    ///
    /// - `Ok(Schedule)`: the parsed period
    /// - `Err(Error)`: if the expression is empty, malformed, zero, or too
    ///   large to represent in seconds
    pub fn parse(expr: &str) -> Result<Self> {
        let expr = expr.trim();
        if expr.is_empty() {
            return Err(Error::config("interval expression is empty"));
        }

        let (number, unit_secs) = match expr.as_bytes()[expr.len() - 1] {
            b's' => (&expr[..expr.len() - 1], 1),
            b'm' => (&expr[..expr.len() - 1], 60),
            b'h' => (&expr[..expr.len() - 1], 3600),
            _ => (expr, 1),
        };

        let count: u64 = number.parse().map_err(|_| {
            Error::config(format!("invalid interval expression: {:?}", expr))
        })?;

        if count == 0 {
            return Err(Error::config("interval must be greater than zero"));
        }

        let secs = count.checked_mul(unit_secs).ok_or_else(|| {
            Error::config(format!("interval expression out of range: {:?}", expr))
        })?;

        Ok(Self {
            period: Duration::from_secs(secs),
        })
    }

    /// The repetition period
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Run `job` once per period until it fails
    ///
    /// The timer fires one period after this call, then once per period.
    /// If a run outlasts its period, the missed ticks are skipped rather
    /// than bursted, so runs never overlap and never bunch up.
    ///
    /// # Returns
    ///
    /// Only returns when a run fails; the job's error is passed through.
    pub async fn run<F, Fut>(&self, mut job: F) -> Result<()>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<()>>,
    {
        let mut ticker = time::interval_at(Instant::now() + self.period, self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            debug!("Schedule tick, running job");
            job().await?;
        }
    }
}
