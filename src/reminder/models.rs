use serde::{Deserialize, Serialize};

/// Read-only snapshot of a note/task that may produce a proximity
/// reminder. Built fresh from the store on each evaluation pass; never
/// retained between passes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderCandidate {
    pub id: i64,
    pub title: String,
    /// Raw `"lat,lon"` geotag as stored on the note, if any.
    pub geotag: Option<String>,
    pub reminder_enabled: bool,
}

/// Process-wide evaluation thresholds, fixed at evaluator construction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderSettings {
    /// Maximum distance to the target location, in meters (inclusive).
    pub distance_threshold_meters: f64,
    /// Minimum elapsed time between two pushes for the same candidate.
    pub min_interval_between_push_ms: i64,
}

impl Default for ReminderSettings {
    fn default() -> Self {
        Self {
            distance_threshold_meters: 300.0,
            min_interval_between_push_ms: 2 * 60 * 60 * 1000,
        }
    }
}

/// Outcome of one evaluation pass for one candidate. Everything except
/// `Eligible` is an expected non-event, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EvaluationResult {
    Disabled,
    NoLocation,
    NoGeotag,
    TooFar,
    RateLimited,
    Eligible,
}

impl EvaluationResult {
    pub fn should_push(self) -> bool {
        self == EvaluationResult::Eligible
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EvaluationResult::Disabled => "disabled",
            EvaluationResult::NoLocation => "no-location",
            EvaluationResult::NoGeotag => "no-geotag",
            EvaluationResult::TooFar => "too-far",
            EvaluationResult::RateLimited => "rate-limited",
            EvaluationResult::Eligible => "eligible",
        }
    }
}
