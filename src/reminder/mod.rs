pub mod controller;
pub mod dispatcher;
pub mod evaluator;
pub mod models;
pub mod poll_worker;
pub mod ports;

pub use controller::PollController;
pub use dispatcher::{ForegroundTracker, ReminderDispatcher};
pub use evaluator::ReminderEvaluator;
pub use models::{EvaluationResult, ReminderCandidate, ReminderSettings};
pub use ports::{
    CandidateSource, Clock, LastPushStore, LocationSource, NotificationChannelSink, SystemClock,
};
