//! Geofenced reminder engine: decides when a note or task with a target
//! location should produce a proximity notification, plus a synthetic
//! motion simulator for exercising the pipeline without real GPS.
//!
//! The pipeline is: periodic poll worker → [`ReminderEvaluator`] per
//! candidate → [`ReminderDispatcher`] routes eligible candidates to an
//! in-app banner or system push → the push timestamp is recorded back
//! into the injected [`LastPushStore`] for cooldown enforcement.
//!
//! Platform concerns (real location lookup, durable storage, the actual
//! notification channels) are injected through the traits in
//! [`reminder::ports`].

pub mod geo;
pub mod reminder;
pub mod sim;
pub mod utils;

pub use geo::{distance_meters, parse_geotag, GeoPoint};
pub use reminder::{
    CandidateSource, Clock, EvaluationResult, ForegroundTracker, LastPushStore, LocationSource,
    NotificationChannelSink, PollController, ReminderCandidate, ReminderDispatcher,
    ReminderEvaluator, ReminderSettings, SystemClock,
};
pub use sim::{MotionConfig, MotionSimulator, MotionType};
