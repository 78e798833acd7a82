use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::time::{Duration, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use super::dispatcher::ReminderDispatcher;
use super::ports::CandidateSource;

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::{log_error, log_info, log_warn};

const POLL_PASS_TIMEOUT_SECS: u64 = 30;

/// Periodic evaluation loop: on every tick, take a fresh candidate
/// snapshot and run each candidate through the dispatcher.
///
/// A candidate whose evaluation or delivery fails is logged and skipped
/// for the cycle; the next tick is the retry cadence. The whole pass is
/// bounded by a timeout so a hung collaborator cannot stall the ticker
/// indefinitely.
pub async fn reminder_poll_loop(
    source: Arc<dyn CandidateSource>,
    dispatcher: Arc<ReminderDispatcher>,
    poll_interval: Duration,
    cancel_token: CancellationToken,
) {
    let mut ticker = tokio::time::interval(poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let fut = run_poll_pass(source.as_ref(), dispatcher.as_ref());
                match tokio::time::timeout(Duration::from_secs(POLL_PASS_TIMEOUT_SECS), fut).await {
                    Ok(Ok(pushed)) => {
                        if pushed > 0 {
                            log_info!("reminder poll pass delivered {pushed} notification(s)");
                        }
                    }
                    Ok(Err(err)) => log_error!("reminder poll pass failed: {err:?}"),
                    Err(_) => log_warn!("reminder poll pass timeout (> {}s)", POLL_PASS_TIMEOUT_SECS),
                }
            }
            _ = cancel_token.cancelled() => {
                log_info!("reminder poll loop shutting down");
                break;
            }
        }
    }
}

async fn run_poll_pass(
    source: &dyn CandidateSource,
    dispatcher: &ReminderDispatcher,
) -> Result<usize> {
    let batch = source
        .candidates()
        .await
        .context("failed to load reminder candidates")?;

    let mut pushed = 0;
    for candidate in &batch {
        match dispatcher.dispatch(candidate).await {
            Ok(decision) if decision.should_push() => pushed += 1,
            Ok(_) => {}
            Err(err) => {
                log_warn!("candidate {} skipped this cycle: {err:?}", candidate.id);
            }
        }
    }

    Ok(pushed)
}
