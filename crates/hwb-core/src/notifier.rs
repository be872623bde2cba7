//! Polling loop: fetch, validate, describe, notify, sleep.
//!
//! Every cycle turns its result (status message or error) into one text and
//! sends it through the messenger unless it repeats the last delivered text.
//! Nothing raised inside a cycle stops the loop; only the shutdown future does.

use std::{future::Future, sync::Arc, time::Duration};

use tokio::time::sleep;
use tracing::{debug, error, info};

use crate::{
    domain::{ChatTarget, StatusQuery},
    homework::{current_date, validate_response, StatusSource},
    messaging::port::MessagingPort,
    verdict::describe,
    Result,
};

/// Prefix of the notification sent when a cycle fails.
pub const FAILURE_PREFIX: &str = "Сбой в работе программы: ";

/// What a single cycle ended with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The API reported no records.
    Idle,
    Delivered(String),
    /// Same text as the last delivered notification.
    Suppressed(String),
    /// The messenger failed; the text is not remembered so the next cycle retries it.
    Undelivered(String),
}

/// Text of the last delivered notification.
#[derive(Clone, Debug, Default)]
pub struct LastMessage(Option<String>);

impl LastMessage {
    pub fn is_repeat(&self, text: &str) -> bool {
        self.0.as_deref() == Some(text)
    }

    pub fn get(&self) -> Option<&str> {
        self.0.as_deref()
    }

    fn remember(&mut self, text: String) {
        self.0 = Some(text);
    }
}

/// Loop-local state carried from one cycle to the next.
#[derive(Clone, Debug)]
pub struct PollState {
    pub from_date: i64,
    pub last: LastMessage,
}

impl PollState {
    pub fn starting_at(from_date: i64) -> Self {
        Self {
            from_date,
            last: LastMessage::default(),
        }
    }
}

struct Report {
    message: Option<String>,
    current_date: Option<i64>,
}

pub struct Notifier {
    source: Arc<dyn StatusSource>,
    messenger: Arc<dyn MessagingPort>,
    chat: ChatTarget,
    retry_period: Duration,
}

impl Notifier {
    pub fn new(
        source: Arc<dyn StatusSource>,
        messenger: Arc<dyn MessagingPort>,
        chat: ChatTarget,
        retry_period: Duration,
    ) -> Self {
        Self {
            source,
            messenger,
            chat,
            retry_period,
        }
    }

    /// Run cycles until `shutdown` resolves.
    ///
    /// The sleep between cycles always happens; shutdown can only cut it short.
    pub async fn run_until<F>(&self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        let mut state = PollState::starting_at(unix_now());
        info!(
            chat = %self.chat,
            retry_secs = self.retry_period.as_secs(),
            "notifier started"
        );

        loop {
            let outcome = self.cycle(&mut state, unix_now()).await;
            debug!(?outcome, from_date = state.from_date, "cycle finished");

            tokio::select! {
                _ = &mut shutdown => {
                    info!("shutdown requested, stopping notifier");
                    return;
                }
                _ = sleep(self.retry_period) => {}
            }
        }
    }

    /// One fetch → validate → describe → notify pass.
    ///
    /// `now` becomes the next lower bound when the API omits `current_date`.
    /// The lower bound stays put while a status message is undelivered, so the
    /// API keeps returning that record.
    pub async fn cycle(&self, state: &mut PollState, now: i64) -> CycleOutcome {
        match self.poll(state.from_date).await {
            Ok(report) => {
                let next_from_date = report.current_date.unwrap_or(now);
                let outcome = match report.message {
                    Some(message) => self.notify(state, message).await,
                    None => {
                        debug!("no status changes");
                        CycleOutcome::Idle
                    }
                };
                if !matches!(outcome, CycleOutcome::Undelivered(_)) {
                    state.from_date = next_from_date;
                }
                outcome
            }
            Err(e) => {
                let message = format!("{FAILURE_PREFIX}{e}");
                error!(error = %e, "poll cycle failed");
                self.notify(state, message).await
            }
        }
    }

    /// Send `text` to the configured chat, logging and swallowing any failure.
    ///
    /// Returns whether the message was delivered.
    pub async fn send(&self, text: &str) -> bool {
        debug!(chat = %self.chat, text, "sending notification");
        match self.messenger.send_text(&self.chat, text).await {
            Ok(id) => {
                info!(message_id = id.0, "notification sent");
                true
            }
            Err(e) => {
                error!(error = %e, "failed to send notification");
                false
            }
        }
    }

    async fn poll(&self, from_date: i64) -> Result<Report> {
        let response = self
            .source
            .fetch_statuses(StatusQuery { from_date })
            .await?;
        let current_date = current_date(&response);
        let homeworks = validate_response(response)?;

        let message = match homeworks.first() {
            Some(record) => Some(describe(record)?),
            None => None,
        };

        Ok(Report {
            message,
            current_date,
        })
    }

    async fn notify(&self, state: &mut PollState, message: String) -> CycleOutcome {
        if state.last.is_repeat(&message) {
            debug!("message repeats the last notification, skipping");
            return CycleOutcome::Suppressed(message);
        }

        if self.send(&message).await {
            state.last.remember(message.clone());
            CycleOutcome::Delivered(message)
        } else {
            CycleOutcome::Undelivered(message)
        }
    }
}

fn unix_now() -> i64 {
    chrono::Utc::now().timestamp()
}
