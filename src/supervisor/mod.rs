//! Isolated, deadline-bounded scrape attempts.
//!
//! Each attempt runs a [`ScrapeSession`](crate::scraper::ScrapeSession) in
//! its own execution context so a hung or crashed browser cannot take the
//! batch down with it. The [`Supervisor`] enforces the wall-clock budget and
//! turns whatever came back into a [`ScrapeResult`].
//!
//! Two contexts are provided:
//!
//! - [`ProcessIsolation`]: a fresh OS process per attempt (this binary's
//!   hidden `worker` command). On timeout the whole process group,
//!   including any Chrome it started, is killed.
//! - [`TaskIsolation`]: a tokio task per attempt, aborted on timeout. Used
//!   for `--in-process` runs and in tests.

mod process;
mod task;
mod worker;

pub use process::ProcessIsolation;
pub use task::TaskIsolation;
pub use worker::{serve, WorkerRequest};

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use crate::domain::{ScrapeJob, ScrapeResult, ScrapeStatus};

/// What an isolated context handed back.
#[derive(Debug, Clone, PartialEq)]
pub enum AttemptOutcome {
    Completed(ScrapeResult),
    /// The budget elapsed and the context was terminated
    TimedOut,
    /// The context ended without delivering a result
    Lost(String),
}

/// An execution context that can run one scrape attempt in isolation.
#[async_trait]
pub trait Isolation: Send + Sync {
    /// Run `job`, terminating the context if it is still running after
    /// `budget`. Must not return while anything it started is still alive.
    async fn run(&self, job: &ScrapeJob, budget: Duration) -> AttemptOutcome;
}

/// Runs scrape attempts under a hard deadline.
#[derive(Clone)]
pub struct Supervisor {
    isolation: Arc<dyn Isolation>,
    budget: Duration,
}

impl Supervisor {
    pub fn new(isolation: Arc<dyn Isolation>, budget: Duration) -> Self {
        Self { isolation, budget }
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Run one attempt. Always yields a result; the session's own trail is
    /// wrapped between an attempt header and a status line.
    pub async fn attempt(&self, job: &ScrapeJob) -> ScrapeResult {
        let secs = self.budget.as_secs();
        let mut trail = vec![format!(
            "Attempting to scrape {} with process timeout {}s",
            job.url, secs
        )];

        let mut result = match self.isolation.run(job, self.budget).await {
            AttemptOutcome::Completed(mut result) => {
                trail.append(&mut result.debug_log);
                result
            }
            AttemptOutcome::TimedOut => {
                warn!("Attempt for {} timed out after {}s", job.business_id, secs);
                trail.push(format!(
                    "Process timed out after {} seconds and was terminated.",
                    secs
                ));
                ScrapeResult::failed(job, ScrapeStatus::FailedProcessTimeout, Vec::new())
            }
            AttemptOutcome::Lost(reason) => {
                warn!("Attempt for {} delivered no result: {}", job.business_id, reason);
                trail.push(format!("No result from isolated attempt: {}", reason));
                ScrapeResult::failed(job, ScrapeStatus::FailedNoResultFromProcess, Vec::new())
            }
        };

        trail.push(format!(
            "Scraping attempt for {} finished with status: {}",
            job.url, result.status
        ));
        result.debug_log = trail;
        result
    }
}
