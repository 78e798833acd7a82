#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Mutex;

use anyhow::{bail, Result};
use async_trait::async_trait;
use georemind::{
    CandidateSource, Clock, GeoPoint, LastPushStore, LocationSource, NotificationChannelSink,
    ReminderCandidate,
};

pub fn candidate(id: i64, title: &str, geotag: Option<&str>, enabled: bool) -> ReminderCandidate {
    ReminderCandidate {
        id,
        title: title.to_string(),
        geotag: geotag.map(str::to_string),
        reminder_enabled: enabled,
    }
}

pub struct FakeLocation {
    fix: Mutex<Option<GeoPoint>>,
    fail: AtomicBool,
}

impl FakeLocation {
    pub fn at(point: GeoPoint) -> Self {
        Self {
            fix: Mutex::new(Some(point)),
            fail: AtomicBool::new(false),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            fix: Mutex::new(None),
            fail: AtomicBool::new(false),
        }
    }

    pub fn failing() -> Self {
        Self {
            fix: Mutex::new(None),
            fail: AtomicBool::new(true),
        }
    }

    pub fn set_fix(&self, fix: Option<GeoPoint>) {
        *self.fix.lock().unwrap() = fix;
    }
}

#[async_trait]
impl LocationSource for FakeLocation {
    async fn last_known_location(&self) -> Result<Option<GeoPoint>> {
        if self.fail.load(Ordering::Relaxed) {
            bail!("location provider transport error");
        }
        Ok(*self.fix.lock().unwrap())
    }
}

#[derive(Default)]
pub struct FakeStore {
    records: Mutex<HashMap<i64, i64>>,
    fail_reads: AtomicBool,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_reads() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
            fail_reads: AtomicBool::new(true),
        }
    }

    pub fn get(&self, candidate_id: i64) -> Option<i64> {
        self.records.lock().unwrap().get(&candidate_id).copied()
    }

    pub fn set(&self, candidate_id: i64, at_ms: i64) {
        self.records.lock().unwrap().insert(candidate_id, at_ms);
    }
}

#[async_trait]
impl LastPushStore for FakeStore {
    async fn last_push_at_ms(&self, candidate_id: i64) -> Result<Option<i64>> {
        if self.fail_reads.load(Ordering::Relaxed) {
            bail!("store read failed");
        }
        Ok(self.get(candidate_id))
    }

    async fn set_last_push_at_ms(&self, candidate_id: i64, at_ms: i64) -> Result<()> {
        self.set(candidate_id, at_ms);
        Ok(())
    }
}

pub struct FakeClock {
    now_ms: AtomicI64,
}

impl FakeClock {
    pub fn at(now_ms: i64) -> Self {
        Self {
            now_ms: AtomicI64::new(now_ms),
        }
    }

    pub fn advance(&self, delta_ms: i64) {
        self.now_ms.fetch_add(delta_ms, Ordering::Relaxed);
    }
}

impl Clock for FakeClock {
    fn now_millis(&self) -> i64 {
        self.now_ms.load(Ordering::Relaxed)
    }
}

#[derive(Default)]
pub struct RecordingSink {
    pub in_app: Mutex<Vec<(String, String)>>,
    pub system_pushes: Mutex<Vec<(i64, String)>>,
    fail: AtomicBool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::Relaxed);
    }

    pub fn in_app_count(&self) -> usize {
        self.in_app.lock().unwrap().len()
    }

    pub fn system_push_count(&self) -> usize {
        self.system_pushes.lock().unwrap().len()
    }
}

#[async_trait]
impl NotificationChannelSink for RecordingSink {
    async fn show_in_app(&self, title: &str, body: &str) -> Result<()> {
        if self.fail.load(Ordering::Relaxed) {
            bail!("banner channel unavailable");
        }
        self.in_app
            .lock()
            .unwrap()
            .push((title.to_string(), body.to_string()));
        Ok(())
    }

    async fn show_system_push(&self, candidate_id: i64, title: &str, _body: &str) -> Result<()> {
        if self.fail.load(Ordering::Relaxed) {
            bail!("push channel unavailable");
        }
        self.system_pushes
            .lock()
            .unwrap()
            .push((candidate_id, title.to_string()));
        Ok(())
    }
}

pub struct FixedCandidates {
    list: Vec<ReminderCandidate>,
}

impl FixedCandidates {
    pub fn new(list: Vec<ReminderCandidate>) -> Self {
        Self { list }
    }
}

#[async_trait]
impl CandidateSource for FixedCandidates {
    async fn candidates(&self) -> Result<Vec<ReminderCandidate>> {
        Ok(self.list.clone())
    }
}
