use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;

use crate::geo::GeoPoint;

use super::models::ReminderCandidate;

/// Source of the device's current position. Implemented by the platform
/// location layer; a fix may be unavailable (None) or the lookup may fail
/// outright (permission/transport error).
#[async_trait]
pub trait LocationSource: Send + Sync {
    async fn last_known_location(&self) -> Result<Option<GeoPoint>>;
}

/// Durable key-value record of when each candidate last produced a push.
/// The evaluator re-reads this on every pass rather than caching, so
/// cooldown state survives process restarts.
#[async_trait]
pub trait LastPushStore: Send + Sync {
    async fn last_push_at_ms(&self, candidate_id: i64) -> Result<Option<i64>>;
    async fn set_last_push_at_ms(&self, candidate_id: i64, at_ms: i64) -> Result<()>;
}

/// Delivery channels for a reminder. Either call is terminal: an Ok means
/// the notification was handed off, an Err means it was not shown.
#[async_trait]
pub trait NotificationChannelSink: Send + Sync {
    async fn show_in_app(&self, title: &str, body: &str) -> Result<()>;
    async fn show_system_push(&self, candidate_id: i64, title: &str, body: &str) -> Result<()>;
}

/// Snapshot provider for the notes/tasks currently carrying a reminder.
/// Backed by the surrounding store; candidates are rebuilt fresh on every
/// poll pass.
#[async_trait]
pub trait CandidateSource: Send + Sync {
    async fn candidates(&self) -> Result<Vec<ReminderCandidate>>;
}

/// Wall-clock reads in epoch millis, injectable so cooldown tests can use
/// a fake clock.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}
