//! Expiry sweeper job
//!
//! Periodically deletes used activation codes whose window has closed. Runs as a
//! single tokio task next to the HTTP server and stops when the shutdown channel
//! flips to `true` (or its sender is dropped).

use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{error, info};

use crate::domain::repository::ActivationCodeRepository;
use crate::usecase::cleanup::DeleteExpiredUseCase;

/// Default sweep interval in seconds (1 hour)
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 3600;

pub struct ExpirySweeper<R>
where
    R: ActivationCodeRepository,
{
    cleanup: DeleteExpiredUseCase<R>,
    period: Duration,
}

impl<R> ExpirySweeper<R>
where
    R: ActivationCodeRepository,
{
    pub fn new(codes: R, period: Duration) -> Self {
        Self {
            cleanup: DeleteExpiredUseCase { codes },
            period,
        }
    }

    /// Sweep once. Storage errors are logged and swallowed; the next tick retries.
    ///
    /// Returns the number of deleted codes, `0` on failure.
    pub async fn tick(&self) -> u64 {
        match self.cleanup.execute().await {
            Ok(0) => 0,
            Ok(deleted) => {
                info!(deleted, "expiry sweep removed expired codes");
                deleted
            }
            Err(e) => {
                error!(error = %e, "expiry sweep failed, retrying next tick");
                0
            }
        }
    }

    /// Run until `shutdown` turns `true`. The first sweep happens immediately.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        info!(interval_secs = self.period.as_secs(), "expiry sweeper started");

        let mut ticker = interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            if *shutdown.borrow() {
                break;
            }
            tokio::select! {
                changed = shutdown.changed() => {
                    // A dropped sender also means the process is going away.
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
                _ = ticker.tick() => {
                    self.tick().await;
                }
            }
        }

        info!("expiry sweeper stopped");
    }
}
