//! Core rate limiter implementation.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, trace};

use crate::config::LimiterConfig;
use crate::error::{FloodgateError, Result};

use super::bucket::TokenBucket;

/// A token-bucket rate limiter.
///
/// The limiter owns a bounded token store and a background refill task. The
/// store starts at full capacity, so the first `capacity` admission checks
/// succeed immediately; after that, one token is added per refill interval
/// until the store is full again.
///
/// This struct is thread-safe and can be shared across multiple tasks.
pub struct RateLimiter {
    /// The bounded token store, shared with the refill task
    bucket: Arc<TokenBucket>,
    /// Period between refill attempts
    refill_interval: Duration,
    /// Shutdown signal for the refill task
    shutdown: watch::Sender<bool>,
}

impl RateLimiter {
    /// Create a new rate limiter and start its refill task.
    ///
    /// `capacity` is the burst size: the maximum number of tokens held at
    /// once. The store is pre-filled to `capacity`. Exactly one refill task
    /// is spawned per limiter; it adds at most one token per
    /// `refill_interval` and skips the attempt when the store is full.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`FloodgateError::InvalidCapacity`] if `capacity` is zero and
    /// [`FloodgateError::InvalidInterval`] if `refill_interval` is zero.
    pub fn new(capacity: u32, refill_interval: Duration) -> Result<Self> {
        if capacity == 0 {
            return Err(FloodgateError::InvalidCapacity(capacity));
        }
        if refill_interval.is_zero() {
            return Err(FloodgateError::InvalidInterval);
        }

        let bucket = Arc::new(TokenBucket::new(capacity));
        let (shutdown, shutdown_rx) = watch::channel(false);

        debug!(
            capacity = capacity,
            refill_interval_ms = refill_interval.as_millis() as u64,
            "Starting rate limiter"
        );

        tokio::spawn(Self::refill_loop(
            Arc::clone(&bucket),
            refill_interval,
            shutdown_rx,
        ));

        Ok(Self {
            bucket,
            refill_interval,
            shutdown,
        })
    }

    /// Create a new rate limiter from a validated configuration.
    pub fn from_config(config: &LimiterConfig) -> Result<Self> {
        config.validate()?;
        Self::new(config.capacity, config.refill_interval())
    }

    /// The background refill task.
    ///
    /// Parks between ticks and wakes on the tick or the shutdown signal,
    /// whichever comes first. The first refill happens one full interval
    /// after construction; missed ticks are skipped rather than backfilled,
    /// so the refill rate never exceeds one token per interval.
    async fn refill_loop(
        bucket: Arc<TokenBucket>,
        refill_interval: Duration,
        mut shutdown_rx: watch::Receiver<bool>,
    ) {
        let start = time::Instant::now() + refill_interval;
        let mut ticker = time::interval_at(start, refill_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if bucket.try_put() {
                        trace!(available = bucket.available(), "Token refilled");
                    } else {
                        trace!("Store full, refill skipped");
                    }
                }
                changed = shutdown_rx.changed() => {
                    // A send means stop was requested; an error means the
                    // limiter itself was dropped.
                    if changed.is_err() || *shutdown_rx.borrow() {
                        debug!("Refill task stopping");
                        break;
                    }
                }
            }
        }
    }

    /// Check whether a caller may proceed, consuming one token if so.
    ///
    /// Non-blocking: returns `true` and removes one token if any is
    /// available, `false` immediately otherwise. Denial is a normal outcome,
    /// not an error. Safe to call concurrently from any number of tasks;
    /// each success consumes a distinct token.
    ///
    /// Valid both while the refill task is running and after [`stop`], in
    /// which case remaining tokens stay consumable but none are added.
    ///
    /// [`stop`]: RateLimiter::stop
    pub fn try_acquire(&self) -> bool {
        let admitted = self.bucket.try_take();
        trace!(
            admitted = admitted,
            available = self.bucket.available(),
            "Admission check"
        );
        admitted
    }

    /// Signal the refill task to terminate.
    ///
    /// Does not block: the task exit is asynchronous, bounded by one tick at
    /// most (it is always parked on the tick or this signal). After the task
    /// exits, no further tokens are added; tokens already in the store remain
    /// available to [`try_acquire`] until exhausted.
    ///
    /// Idempotent: calling `stop` more than once is a no-op. Dropping the
    /// limiter also terminates the refill task.
    ///
    /// [`try_acquire`]: RateLimiter::try_acquire
    pub fn stop(&self) {
        let _ = self.shutdown.send(true);
        debug!("Rate limiter stopped");
    }

    /// Get the number of tokens currently available.
    pub fn available(&self) -> u32 {
        self.bucket.available()
    }

    /// Get the burst capacity of this limiter.
    pub fn capacity(&self) -> u32 {
        self.bucket.capacity()
    }

    /// Get the refill interval of this limiter.
    pub fn refill_interval(&self) -> Duration {
        self.refill_interval
    }
}
