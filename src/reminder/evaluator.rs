use std::sync::Arc;

use anyhow::{bail, Context, Result};

use crate::geo::{distance_meters, parse_geotag};

use super::models::{EvaluationResult, ReminderCandidate, ReminderSettings};
use super::ports::{Clock, LastPushStore, LocationSource, SystemClock};

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = false;

use crate::log_info;

/// Decides whether a candidate should produce a proximity push right now.
///
/// Holds no candidate-keyed state of its own: cooldown timestamps live in
/// the injected [`LastPushStore`], so concurrent evaluation of different
/// candidates from one poll pass is safe, and decisions survive process
/// restarts.
pub struct ReminderEvaluator {
    settings: ReminderSettings,
    location: Arc<dyn LocationSource>,
    store: Arc<dyn LastPushStore>,
    clock: Arc<dyn Clock>,
}

impl ReminderEvaluator {
    pub fn new(
        settings: ReminderSettings,
        location: Arc<dyn LocationSource>,
        store: Arc<dyn LastPushStore>,
    ) -> Result<Self> {
        Self::with_clock(settings, location, store, Arc::new(SystemClock))
    }

    pub fn with_clock(
        settings: ReminderSettings,
        location: Arc<dyn LocationSource>,
        store: Arc<dyn LastPushStore>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        if !(settings.distance_threshold_meters > 0.0) {
            bail!(
                "distance_threshold_meters must be positive, got {}",
                settings.distance_threshold_meters
            );
        }
        if settings.min_interval_between_push_ms < 0 {
            bail!(
                "min_interval_between_push_ms must be non-negative, got {}",
                settings.min_interval_between_push_ms
            );
        }

        Ok(Self {
            settings,
            location,
            store,
            clock,
        })
    }

    /// One fresh, idempotent snapshot decision for one candidate.
    ///
    /// The checks run as a short-circuit cascade, cheapest first: the
    /// distance computation only happens for enabled candidates with both
    /// locations known, and the persisted store is only touched for
    /// candidates already within range.
    ///
    /// Location-source and store failures propagate to the caller; the
    /// outer polling cadence provides the retry, so nothing is swallowed
    /// or retried here.
    pub async fn evaluate(&self, candidate: &ReminderCandidate) -> Result<EvaluationResult> {
        if !candidate.reminder_enabled {
            return Ok(EvaluationResult::Disabled);
        }

        let Some(current) = self
            .location
            .last_known_location()
            .await
            .context("location source failed")?
        else {
            return Ok(EvaluationResult::NoLocation);
        };

        let Some(target) = parse_geotag(candidate.geotag.as_deref()) else {
            return Ok(EvaluationResult::NoGeotag);
        };

        let distance = distance_meters(current, target);
        if distance > self.settings.distance_threshold_meters {
            return Ok(EvaluationResult::TooFar);
        }

        if let Some(last_push) = self
            .store
            .last_push_at_ms(candidate.id)
            .await
            .context("failed to read last-push record")?
        {
            let elapsed = self.clock.now_millis() - last_push;
            if elapsed < self.settings.min_interval_between_push_ms {
                return Ok(EvaluationResult::RateLimited);
            }
        }

        log_info!(
            "candidate {} eligible at {:.1}m from target",
            candidate.id,
            distance
        );
        Ok(EvaluationResult::Eligible)
    }

    /// Record that a notification for this candidate was genuinely
    /// delivered. The dispatcher calls this exactly once per delivered
    /// push, never speculatively, so a failed delivery leaves the
    /// candidate eligible for the next pass.
    pub async fn on_pushed(&self, candidate_id: i64) -> Result<()> {
        self.store
            .set_last_push_at_ms(candidate_id, self.clock.now_millis())
            .await
            .context("failed to record push timestamp")
    }

    pub fn settings(&self) -> &ReminderSettings {
        &self.settings
    }
}
