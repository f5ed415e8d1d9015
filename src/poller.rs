use std::time::Duration;

use serde_json::Value;
use tracing::{debug, error, info};

use crate::api::HomeworkApi;
use crate::error::CycleError;
use crate::homework::{check_response, parse_status};
use crate::notifier::Notifier;

/// What a single poll cycle ended with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    Notified,
    NothingNew,
    Failed,
}

/// Polls the homework API and reports status changes to the chat.
pub struct Poller {
    api: HomeworkApi,
    notifier: Notifier,
    retry_period: Duration,
    cursor: i64,
}

impl Poller {
    pub fn new(api: HomeworkApi, notifier: Notifier, retry_period: Duration) -> Self {
        Self::with_cursor(api, notifier, retry_period, chrono::Utc::now().timestamp())
    }

    pub fn with_cursor(
        api: HomeworkApi,
        notifier: Notifier,
        retry_period: Duration,
        cursor: i64,
    ) -> Self {
        Self {
            api,
            notifier,
            retry_period,
            cursor,
        }
    }

    /// Timestamp sent as `from_date` on the next request.
    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    /// Poll forever. Only process termination stops this.
    pub async fn run(&mut self) {
        info!(
            "Polling every {}s starting from {}",
            self.retry_period.as_secs(),
            self.cursor()
        );
        loop {
            self.tick().await;
        }
    }

    /// One cycle followed by the retry sleep, whatever the cycle's outcome.
    pub async fn tick(&mut self) -> CycleOutcome {
        let outcome = self.run_cycle().await;
        debug!("Sleeping for {}s", self.retry_period.as_secs());
        tokio::time::sleep(self.retry_period).await;
        outcome
    }

    pub async fn run_cycle(&mut self) -> CycleOutcome {
        match self.poll_once().await {
            Ok(outcome) => outcome,
            Err(CycleError::Send(e)) => {
                error!("Notification was not delivered: {}", e);
                CycleOutcome::Failed
            }
            Err(CycleError::Api(e)) => {
                error!("Homework API request failed: {}", e);
                CycleOutcome::Failed
            }
            Err(CycleError::Shape(e)) => {
                error!("Incorrect API response: {}", e);
                CycleOutcome::Failed
            }
            Err(e @ CycleError::Homework(_)) => {
                error!("Program failure: {}", e);
                self.report_failure(&e).await;
                CycleOutcome::Failed
            }
        }
    }

    async fn poll_once(&mut self) -> Result<CycleOutcome, CycleError> {
        let answer = self.api.get_api_answer(self.cursor).await?;
        let response = check_response(&Value::Object(answer))?;

        let outcome = match response.homeworks.first() {
            Some(homework) => {
                debug!("Latest homework: {}", homework);
                let message = parse_status(homework)?;
                self.notifier.send_message(&message).await?;
                info!("Reported status change: {}", message);
                CycleOutcome::Notified
            }
            None => {
                debug!("No homework updates");
                CycleOutcome::NothingNew
            }
        };

        self.cursor = response.current_date;
        Ok(outcome)
    }

    /// Best-effort: a failure here is logged and dropped so the loop keeps running.
    async fn report_failure(&self, cause: &CycleError) {
        let message = format!("Program failure: {}", cause);
        if let Err(e) = self.notifier.send_message(&message).await {
            error!("Could not report failure to chat: {}", e);
        }
    }
}
