//! Fixed-interval sweep scheduler for Roundtable.
//!
//! Drives the periodic room-expiration sweep (every 30 seconds by
//! default). The scheduler only decides *when* to sweep; the caller does
//! the sweeping and reports back with [`SweepScheduler::record_sweep_end`].
//!
//! # Disabled mode
//!
//! When `interval` is zero, [`SweepScheduler::wait_for_sweep`] pends
//! forever. Tests and embedders that drive expiration by hand use this.
//!
//! # Integration
//!
//! The scheduler is designed to sit inside a `tokio::select!` loop next to
//! a shutdown signal:
//!
//! ```ignore
//! loop {
//!     tokio::select! {
//!         _ = &mut shutdown => break,
//!         _ = scheduler.wait_for_sweep() => {
//!             let removed = store.check_expiration();
//!             if removed { store.refresh().notify(RefreshReason::RoomsExpired); }
//!             scheduler.record_sweep_end(removed);
//!         }
//!     }
//! }
//! ```

use std::time::{Duration, Instant};

use rand::Rng;
use tokio::time::{self, Instant as TokioInstant};
use tracing::{debug, trace, warn};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for the sweep scheduler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepConfig {
    /// Time between sweeps. Zero disables sweeping.
    pub interval: Duration,
    /// Random delay (0..max) added to the *first* sweep so several
    /// stores started together don't sweep in lockstep.
    pub initial_jitter: Duration,
    /// A sweep holding the store longer than this logs a warning.
    pub slow_sweep_warn: Duration,
}

impl SweepConfig {
    /// Default time between sweeps.
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(30);

    /// Create a config for a specific interval with default settings.
    pub fn with_interval(interval: Duration) -> Self {
        Self {
            interval,
            ..Default::default()
        }
    }

    /// A config that never sweeps.
    pub fn disabled() -> Self {
        Self::with_interval(Duration::ZERO)
    }

    /// `None` when sweeping is disabled.
    pub fn period(&self) -> Option<Duration> {
        (!self.interval.is_zero()).then_some(self.interval)
    }
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            interval: Self::DEFAULT_INTERVAL,
            initial_jitter: Duration::from_millis(250),
            slow_sweep_warn: Duration::from_millis(10),
        }
    }
}

// ---------------------------------------------------------------------------
// Sweep info (returned to caller each sweep)
// ---------------------------------------------------------------------------

/// Information about a due sweep, returned by [`SweepScheduler::wait_for_sweep`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepInfo {
    /// Monotonically increasing sweep number (starts at 1).
    pub sweep: u64,
    /// How long after its deadline this sweep woke up.
    pub late_by: Duration,
    /// Whole intervals missed because the loop was busy (0 normally).
    pub sweeps_skipped: u64,
}

// ---------------------------------------------------------------------------
// Metrics
// ---------------------------------------------------------------------------

/// Running totals for the scheduler.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepMetrics {
    /// Sweeps that fired.
    pub total_sweeps: u64,
    /// Sweeps that reported removing something.
    pub productive_sweeps: u64,
    /// Intervals skipped because a sweep woke up late.
    pub total_skipped: u64,
    /// Sweeps that ran longer than `slow_sweep_warn`.
    pub slow_sweeps: u64,
    /// Longest sweep observed (wall clock).
    pub max_sweep_time: Duration,
}

// ---------------------------------------------------------------------------
// Scheduler
// ---------------------------------------------------------------------------

/// Fixed-interval sweep scheduler.
///
/// Late wake-ups never cause a burst of back-to-back sweeps: the next
/// deadline is always computed from the actual wake-up time.
pub struct SweepScheduler {
    config: SweepConfig,
    period: Option<Duration>,
    sweep_count: u64,
    /// When the next sweep should fire (Tokio instant for `sleep_until`).
    next_sweep: Option<TokioInstant>,
    /// Wall-clock instant when the current sweep started.
    /// Set by `wait_for_sweep`, consumed by `record_sweep_end`.
    sweep_start: Option<Instant>,
    paused: bool,
    metrics: SweepMetrics,
}

impl SweepScheduler {
    pub fn new(config: SweepConfig) -> Self {
        let period = config.period();

        let next_sweep = period.map(|d| {
            let jitter = if config.initial_jitter.is_zero() {
                Duration::ZERO
            } else {
                let max_us = config.initial_jitter.as_micros() as u64;
                Duration::from_micros(rand::rng().random_range(0..max_us.max(1)))
            };
            TokioInstant::now() + d + jitter
        });

        match period {
            None => debug!("sweep scheduler created in disabled mode"),
            Some(interval) => debug!(
                interval_secs = interval.as_secs_f64(),
                "sweep scheduler created"
            ),
        }

        Self {
            config,
            period,
            sweep_count: 0,
            next_sweep,
            sweep_start: None,
            paused: false,
            metrics: SweepMetrics::default(),
        }
    }

    /// Create a scheduler for a specific interval with default settings.
    pub fn with_interval(interval: Duration) -> Self {
        Self::new(SweepConfig::with_interval(interval))
    }

    /// Wait until the next sweep is due.
    ///
    /// When disabled or paused this future never resolves, but the other
    /// branches of a surrounding `select!` keep running.
    pub async fn wait_for_sweep(&mut self) -> SweepInfo {
        let (next, period) = match (self.next_sweep, self.period) {
            (Some(next), Some(period)) if !self.paused => (next, period),
            _ => {
                std::future::pending::<()>().await;
                unreachable!()
            }
        };

        time::sleep_until(next).await;

        let now = TokioInstant::now();
        self.sweep_count += 1;
        self.sweep_start = Some(Instant::now());

        let late_by = now.saturating_duration_since(next);
        let sweeps_skipped = (late_by.as_nanos() / period.as_nanos()) as u64;
        if sweeps_skipped > 0 {
            warn!(
                sweep = self.sweep_count,
                skipped = sweeps_skipped,
                late_ms = late_by.as_secs_f64() * 1000.0,
                "sweep overrun, skipping ahead"
            );
        }
        self.next_sweep = Some(now + period);

        self.metrics.total_sweeps += 1;
        self.metrics.total_skipped += sweeps_skipped;
        trace!(sweep = self.sweep_count, "sweep due");

        SweepInfo {
            sweep: self.sweep_count,
            late_by,
            sweeps_skipped,
        }
    }

    /// Record that the current sweep finished. `removed` is what the
    /// sweep reported (did anything expire).
    ///
    /// Does nothing if no sweep is in flight.
    pub fn record_sweep_end(&mut self, removed: bool) {
        let Some(start) = self.sweep_start.take() else {
            return;
        };
        let elapsed = start.elapsed();

        if removed {
            self.metrics.productive_sweeps += 1;
        }
        if elapsed > self.metrics.max_sweep_time {
            self.metrics.max_sweep_time = elapsed;
        }
        if elapsed >= self.config.slow_sweep_warn {
            self.metrics.slow_sweeps += 1;
            warn!(
                sweep = self.sweep_count,
                elapsed_ms = elapsed.as_secs_f64() * 1000.0,
                "sweep held the store longer than expected"
            );
        }
    }

    /// Pause sweeping until [`resume`](Self::resume). Idempotent.
    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            debug!(sweep = self.sweep_count, "sweep scheduler paused");
        }
    }

    /// Resume after a pause. The next sweep is one full interval from now.
    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            if let Some(period) = self.period {
                self.next_sweep = Some(TokioInstant::now() + period);
            }
            debug!(sweep = self.sweep_count, "sweep scheduler resumed");
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_disabled(&self) -> bool {
        self.period.is_none()
    }

    pub fn sweep_count(&self) -> u64 {
        self.sweep_count
    }

    pub fn metrics(&self) -> &SweepMetrics {
        &self.metrics
    }

    /// The sweep interval, or `None` when disabled.
    pub fn interval(&self) -> Option<Duration> {
        self.period
    }
}
