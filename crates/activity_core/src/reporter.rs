//! Fire-and-forget delivery of attempts to the results collector.
//!
//! Delivery never feeds back into the activity: the outcome is logged and
//! handed back in a [`ReportHandle`] that callers are free to drop.

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use shared::{
    domain::{AttemptOutcome, StepId},
    protocol::AttemptRecord,
};
use thiserror::Error;
use tokio::{runtime::Handle, task::JoinHandle};
use tracing::{info, warn};
use url::Url;

use crate::session::SessionIdentity;

/// One submission, built at submit time and discarded once reported.
#[derive(Debug, Clone)]
pub struct Attempt {
    pub identity: SessionIdentity,
    pub submitted_order: Vec<StepId>,
    pub outcome: AttemptOutcome,
    pub submitted_at: DateTime<Utc>,
}

impl Attempt {
    pub fn to_record(&self) -> AttemptRecord {
        AttemptRecord::new(
            self.identity.name(),
            self.identity.email(),
            self.outcome,
            &self.submitted_order,
            self.submitted_at,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    Delivered { status: u16 },
    Rejected { status: u16 },
    Failed { reason: String },
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("no results collector endpoint is configured")]
    NotConfigured,
}

#[async_trait]
pub trait AttemptCollector: Send + Sync {
    async fn submit(&self, record: &AttemptRecord) -> Result<ReportOutcome>;
}

/// Posts records as JSON. The response body is never read since the
/// collector may be a write-only sink.
pub struct HttpCollector {
    http: Client,
    endpoint: Url,
}

impl HttpCollector {
    pub fn new(endpoint: Url) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    pub fn with_client(http: Client, endpoint: Url) -> Self {
        Self { http, endpoint }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl AttemptCollector for HttpCollector {
    async fn submit(&self, record: &AttemptRecord) -> Result<ReportOutcome> {
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(record)
            .send()
            .await
            .with_context(|| format!("failed to post attempt to {}", self.endpoint))?;
        let status = response.status();
        if status.is_success() || status.is_redirection() {
            Ok(ReportOutcome::Delivered {
                status: status.as_u16(),
            })
        } else {
            Ok(ReportOutcome::Rejected {
                status: status.as_u16(),
            })
        }
    }
}

pub struct MissingCollector;

#[async_trait]
impl AttemptCollector for MissingCollector {
    async fn submit(&self, _record: &AttemptRecord) -> Result<ReportOutcome> {
        Err(ReportError::NotConfigured.into())
    }
}

#[derive(Clone)]
pub struct AttemptReporter {
    collector: Arc<dyn AttemptCollector>,
    runtime: Handle,
}

impl AttemptReporter {
    pub fn new(collector: Arc<dyn AttemptCollector>, runtime: Handle) -> Self {
        Self { collector, runtime }
    }

    /// Spawns delivery and returns at once. Failures are logged, never
    /// retried and never returned as errors.
    pub fn report(&self, attempt: &Attempt) -> ReportHandle {
        let record = attempt.to_record();
        let collector = Arc::clone(&self.collector);
        let task = self.runtime.spawn(async move {
            let outcome = match collector.submit(&record).await {
                Ok(outcome) => outcome,
                Err(err) => ReportOutcome::Failed {
                    reason: format!("{err:#}"),
                },
            };
            log_outcome(&record, &outcome);
            outcome
        });
        ReportHandle { task }
    }
}

fn log_outcome(record: &AttemptRecord, outcome: &ReportOutcome) {
    match outcome {
        ReportOutcome::Delivered { status } => info!(
            result = record.result.as_str(),
            status, "report: attempt delivered"
        ),
        ReportOutcome::Rejected { status } => warn!(
            result = record.result.as_str(),
            status, "report: collector rejected attempt"
        ),
        ReportOutcome::Failed { reason } => warn!(
            result = record.result.as_str(),
            "report: failed to send attempt: {reason}"
        ),
    }
}

/// Completion of one spawned report. Dropping it leaves the delivery
/// running in the background.
pub struct ReportHandle {
    task: JoinHandle<ReportOutcome>,
}

impl ReportHandle {
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    pub async fn outcome(self) -> ReportOutcome {
        match self.task.await {
            Ok(outcome) => outcome,
            Err(err) => ReportOutcome::Failed {
                reason: format!("report task ended before completion: {err}"),
            },
        }
    }
}

#[cfg(test)]
#[path = "tests/reporter_tests.rs"]
mod tests;
