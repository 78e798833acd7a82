use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::geo::GeoPoint;

use super::config::{MotionConfig, MotionType};
use super::path::MotionPath;
use super::run_loop::motion_loop;

const SAMPLE_CHANNEL_CAPACITY: usize = 32;

/// Drives one synthetic trajectory at a time and hands samples to the
/// consumer over a channel.
///
/// Starting a new run first cancels and joins any in-flight run
/// (last-writer-wins, not queuing), so two runs can never interleave
/// their samples. Each instance owns its own run state; independent
/// simulated trackers are just independent instances.
pub struct MotionSimulator {
    handle: Option<JoinHandle<()>>,
    cancel_token: Option<CancellationToken>,
    active_type: Option<MotionType>,
}

impl MotionSimulator {
    pub fn new() -> Self {
        Self {
            handle: None,
            cancel_token: None,
            active_type: None,
        }
    }

    /// Launch a run toward `target` and return the stream of samples.
    ///
    /// Returns as soon as the background task is spawned; the run then
    /// emits a sample, sleeps for the model-specific delay, and repeats
    /// until the model terminates or the run is cancelled. The channel
    /// closes when the run ends, however it ends.
    pub async fn start(
        &mut self,
        target: GeoPoint,
        config: MotionConfig,
    ) -> Result<mpsc::Receiver<GeoPoint>> {
        self.stop().await?;

        let path = MotionPath::new(target, &config);
        let cancel_token = CancellationToken::new();
        let token_clone = cancel_token.clone();
        let (tx, rx) = mpsc::channel(SAMPLE_CHANNEL_CAPACITY);

        let handle = tokio::spawn(motion_loop(path, tx, token_clone));

        self.handle = Some(handle);
        self.cancel_token = Some(cancel_token);
        self.active_type = Some(config.motion_type);
        Ok(rx)
    }

    /// Request cancellation and wait for the run to wind down. The loop
    /// observes the token between samples, so no further samples are
    /// emitted after this returns.
    pub async fn stop(&mut self) -> Result<()> {
        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }

        self.active_type = None;

        if let Some(handle) = self.handle.take() {
            handle
                .await
                .context("motion run task failed to join")
                .map(|_| ())
        } else {
            Ok(())
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }

    pub fn current_type(&self) -> Option<MotionType> {
        if self.is_running() {
            self.active_type
        } else {
            None
        }
    }
}

impl Default for MotionSimulator {
    fn default() -> Self {
        Self::new()
    }
}
