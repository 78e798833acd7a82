mod common;

use std::sync::Arc;
use std::time::Duration;

use georemind::{
    ForegroundTracker, GeoPoint, PollController, ReminderDispatcher, ReminderEvaluator,
    ReminderSettings,
};

use common::{candidate, FakeClock, FakeLocation, FakeStore, FixedCandidates, RecordingSink};

const TARGET: GeoPoint = GeoPoint {
    lat: 55.7558,
    lon: 37.6173,
};
const TARGET_TAG: &str = "55.7558,37.6173";

const NOW_MS: i64 = 1_700_000_000_000;

#[tokio::test(start_paused = true)]
async fn poll_pass_delivers_eligible_candidates_once() {
    let store = Arc::new(FakeStore::new());
    let sink = Arc::new(RecordingSink::new());

    let evaluator = ReminderEvaluator::with_clock(
        ReminderSettings::default(),
        Arc::new(FakeLocation::at(TARGET)),
        store.clone(),
        Arc::new(FakeClock::at(NOW_MS)),
    )
    .unwrap();
    let dispatcher = Arc::new(ReminderDispatcher::new(
        evaluator,
        sink.clone(),
        ForegroundTracker::new(),
    ));

    let source = Arc::new(FixedCandidates::new(vec![
        candidate(1, "groceries", Some(TARGET_TAG), true),
        candidate(2, "archived note", Some(TARGET_TAG), false),
        candidate(3, "untagged note", None, true),
    ]));

    let mut controller = PollController::new();
    controller
        .start(source, dispatcher, Duration::from_secs(60))
        .unwrap();
    assert!(controller.is_active());

    // Several ticks elapse; the cooldown keeps the eligible candidate at
    // exactly one delivery, and the others never reach a channel.
    tokio::time::sleep(Duration::from_secs(130)).await;

    controller.stop().await.unwrap();
    assert!(!controller.is_active());

    assert_eq!(sink.system_push_count(), 1);
    assert_eq!(sink.in_app_count(), 0);
    assert_eq!(sink.system_pushes.lock().unwrap()[0].0, 1);
    assert_eq!(store.get(1), Some(NOW_MS));
    assert_eq!(store.get(2), None);
    assert_eq!(store.get(3), None);
}

#[tokio::test(start_paused = true)]
async fn starting_twice_is_rejected() {
    let store = Arc::new(FakeStore::new());
    let evaluator = ReminderEvaluator::with_clock(
        ReminderSettings::default(),
        Arc::new(FakeLocation::unavailable()),
        store,
        Arc::new(FakeClock::at(NOW_MS)),
    )
    .unwrap();
    let dispatcher = Arc::new(ReminderDispatcher::new(
        evaluator,
        Arc::new(RecordingSink::new()),
        ForegroundTracker::new(),
    ));
    let source = Arc::new(FixedCandidates::new(Vec::new()));

    let mut controller = PollController::new();
    controller
        .start(source.clone(), dispatcher.clone(), Duration::from_secs(60))
        .unwrap();
    assert!(controller
        .start(source, dispatcher, Duration::from_secs(60))
        .is_err());

    controller.stop().await.unwrap();
}
