use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tokio::task::JoinHandle;
use tokio::time::Duration;
use tokio_util::sync::CancellationToken;

use super::dispatcher::ReminderDispatcher;
use super::poll_worker::reminder_poll_loop;
use super::ports::CandidateSource;

/// Owns the background poll task. One loop at a time; `start` refuses a
/// second loop and `stop` cancels and joins the running one.
pub struct PollController {
    handle: Option<JoinHandle<()>>,
    cancel_token: Option<CancellationToken>,
}

impl PollController {
    pub fn new() -> Self {
        Self {
            handle: None,
            cancel_token: None,
        }
    }

    pub fn start(
        &mut self,
        source: Arc<dyn CandidateSource>,
        dispatcher: Arc<ReminderDispatcher>,
        poll_interval: Duration,
    ) -> Result<()> {
        if self.handle.is_some() {
            bail!("reminder polling already active");
        }

        let cancel_token = CancellationToken::new();
        let token_clone = cancel_token.clone();

        let handle = tokio::spawn(reminder_poll_loop(
            source,
            dispatcher,
            poll_interval,
            token_clone,
        ));

        self.handle = Some(handle);
        self.cancel_token = Some(cancel_token);
        Ok(())
    }

    pub async fn stop(&mut self) -> Result<()> {
        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }

        if let Some(handle) = self.handle.take() {
            handle
                .await
                .context("reminder poll task failed to join")
                .map(|_| ())
        } else {
            Ok(())
        }
    }

    pub fn is_active(&self) -> bool {
        self.handle
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }
}

impl Default for PollController {
    fn default() -> Self {
        Self::new()
    }
}
