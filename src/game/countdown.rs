//! Cancellable one-second countdown ticker.
//!
//! At most one ticker task runs at a time. [`Countdown::start`] always stops
//! the previous task before spawning the next one, and every [`Tick`] carries
//! the generation it was started for so the receiver can drop ticks that
//! were already in flight when a round ended.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

/// Interval between ticks.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// One elapsed second of the countdown started for `generation`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// Generation passed to [`Countdown::start`].
    pub generation: u64,
}

struct ActiveTicker {
    generation: u64,
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

/// Owner of the single ticker task.
///
/// Ticks are delivered on the channel given to [`Countdown::new`]. The task
/// is stopped on [`stop`](Self::stop), on the next [`start`](Self::start),
/// and on drop.
pub struct Countdown {
    tx: mpsc::UnboundedSender<Tick>,
    period: Duration,
    active: Option<ActiveTicker>,
}

impl Countdown {
    /// Creates an idle countdown that will send ticks on `tx`.
    #[must_use]
    pub const fn new(tx: mpsc::UnboundedSender<Tick>) -> Self {
        Self::with_period(tx, TICK_PERIOD)
    }

    /// Creates an idle countdown with a custom tick period.
    #[must_use]
    pub const fn with_period(tx: mpsc::UnboundedSender<Tick>, period: Duration) -> Self {
        Self {
            tx,
            period,
            active: None,
        }
    }

    /// Stops any running ticker, then starts a new one for `generation`.
    ///
    /// The first tick arrives one period after this call. Must be called
    /// from within a tokio runtime.
    pub fn start(&mut self, generation: u64) {
        self.stop();

        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let tx = self.tx.clone();
        let period = self.period;

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Burst);
            loop {
                tokio::select! {
                    biased;
                    () = token.cancelled() => {
                        trace!(generation, "countdown ticker cancelled");
                        break;
                    }
                    _ = interval.tick() => {
                        if tx.send(Tick { generation }).is_err() {
                            trace!(generation, "tick receiver dropped");
                            break;
                        }
                    }
                }
            }
        });

        debug!(generation, "countdown started");
        self.active = Some(ActiveTicker {
            generation,
            cancel,
            handle,
        });
    }

    /// Stops the running ticker, if any.
    ///
    /// Ticks already queued on the channel are not recalled; receivers
    /// filter them by generation.
    pub fn stop(&mut self) {
        if let Some(active) = self.active.take() {
            active.cancel.cancel();
            active.handle.abort();
            debug!(generation = active.generation, "countdown stopped");
        }
    }

    /// Generation of the running ticker, if any.
    #[must_use]
    pub fn active_generation(&self) -> Option<u64> {
        self.active.as_ref().map(|a| a.generation)
    }

    /// Whether a ticker is running.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.active.is_some()
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for Countdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Countdown")
            .field("period", &self.period)
            .field("active_generation", &self.active_generation())
            .finish_non_exhaustive()
    }
}
