use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::ScrapeJob;
use crate::scraper::{BrowserLauncher, ScrapeSession};
use crate::supervisor::{AttemptOutcome, Isolation};

/// Runs every attempt on its own tokio task, aborted on timeout.
///
/// Weaker than [`ProcessIsolation`](crate::supervisor::ProcessIsolation): a
/// panic is contained, but a browser call that blocks a runtime thread is
/// not. Dropping the aborted task drops its browser handle.
pub struct TaskIsolation<L> {
    session: Arc<ScrapeSession>,
    launcher: Arc<L>,
}

impl<L> TaskIsolation<L>
where
    L: BrowserLauncher + 'static,
{
    pub fn new(session: ScrapeSession, launcher: L) -> Self {
        Self {
            session: Arc::new(session),
            launcher: Arc::new(launcher),
        }
    }
}

#[async_trait]
impl<L> Isolation for TaskIsolation<L>
where
    L: BrowserLauncher + 'static,
{
    async fn run(&self, job: &ScrapeJob, budget: Duration) -> AttemptOutcome {
        let session = self.session.clone();
        let launcher = self.launcher.clone();
        let task_job = job.clone();

        let mut handle =
            tokio::spawn(async move { session.run(launcher.as_ref(), &task_job).await });

        match tokio::time::timeout(budget, &mut handle).await {
            Ok(Ok(result)) => AttemptOutcome::Completed(result),
            Ok(Err(e)) => AttemptOutcome::Lost(format!("Scrape task failed: {}", e)),
            Err(_) => {
                handle.abort();
                let _ = handle.await;
                AttemptOutcome::TimedOut
            }
        }
    }
}
