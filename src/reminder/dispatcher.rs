use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};

use super::evaluator::ReminderEvaluator;
use super::models::{EvaluationResult, ReminderCandidate};
use super::ports::NotificationChannelSink;

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::{log_info, log_warn};

/// Shared foreground/background flag, flipped by the app lifecycle layer
/// and read synchronously when picking a delivery channel.
#[derive(Clone, Default)]
pub struct ForegroundTracker {
    foreground: Arc<AtomicBool>,
}

impl ForegroundTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_foreground(&self, foreground: bool) {
        self.foreground.store(foreground, Ordering::Relaxed);
    }

    pub fn is_foreground(&self) -> bool {
        self.foreground.load(Ordering::Relaxed)
    }
}

/// Routes eligible candidates to a delivery channel and advances their
/// cooldown only after the channel accepted the notification.
pub struct ReminderDispatcher {
    evaluator: ReminderEvaluator,
    sink: Arc<dyn NotificationChannelSink>,
    foreground: ForegroundTracker,
}

impl ReminderDispatcher {
    pub fn new(
        evaluator: ReminderEvaluator,
        sink: Arc<dyn NotificationChannelSink>,
        foreground: ForegroundTracker,
    ) -> Self {
        Self {
            evaluator,
            sink,
            foreground,
        }
    }

    /// Evaluate one candidate and, if eligible, deliver a notification.
    ///
    /// In-app banner when the app is foregrounded, system push otherwise.
    /// `on_pushed` runs only after successful delivery; a failed delivery
    /// propagates the error with the cooldown untouched, so the candidate
    /// stays eligible for the next poll.
    pub async fn dispatch(&self, candidate: &ReminderCandidate) -> Result<EvaluationResult> {
        let decision = self.evaluator.evaluate(candidate).await?;
        if !decision.should_push() {
            return Ok(decision);
        }

        let body = format!("You are near \"{}\"", candidate.title);
        if self.foreground.is_foreground() {
            self.sink
                .show_in_app(&candidate.title, &body)
                .await
                .context("in-app banner delivery failed")?;
            log_info!("delivered in-app reminder for candidate {}", candidate.id);
        } else {
            self.sink
                .show_system_push(candidate.id, &candidate.title, &body)
                .await
                .context("system push delivery failed")?;
            log_info!("delivered system push for candidate {}", candidate.id);
        }

        if let Err(err) = self.evaluator.on_pushed(candidate.id).await {
            // Delivery already happened; surface the bookkeeping failure
            // but expect one extra notification within the window.
            log_warn!(
                "push delivered but cooldown not recorded for candidate {}: {err:?}",
                candidate.id
            );
            return Err(err);
        }

        Ok(decision)
    }

    pub fn evaluator(&self) -> &ReminderEvaluator {
        &self.evaluator
    }
}
