use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, Command};
use tracing::debug;

use crate::app::{HarvestError, Result};
use crate::domain::{ScrapeJob, ScrapeResult};
use crate::scraper::ScraperConfig;
use crate::supervisor::worker::WorkerRequest;
use crate::supervisor::{AttemptOutcome, Isolation};

/// Runs every attempt in a fresh child process.
///
/// The child gets a [`WorkerRequest`] on stdin and is expected to print one
/// JSON [`ScrapeResult`] line on stdout. Its stderr is inherited so worker
/// logs show up alongside the orchestrator's.
#[derive(Debug, Clone)]
pub struct ProcessIsolation {
    program: PathBuf,
    args: Vec<String>,
    config: ScraperConfig,
}

impl ProcessIsolation {
    /// Re-invoke the current executable's `worker` command.
    pub fn new(config: ScraperConfig) -> Result<Self> {
        Ok(Self::with_command(
            std::env::current_exe()?,
            vec!["worker".to_string()],
            config,
        ))
    }

    pub fn with_command(program: impl Into<PathBuf>, args: Vec<String>, config: ScraperConfig) -> Self {
        Self {
            program: program.into(),
            args,
            config,
        }
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true);
        // Own process group, so Chrome and its helpers can be killed together.
        #[cfg(unix)]
        command.process_group(0);
        command
    }

    fn request(&self, job: &ScrapeJob) -> Result<Vec<u8>> {
        let request = WorkerRequest {
            job: job.clone(),
            config: self.config.clone(),
        };
        let mut encoded = serde_json::to_vec(&request)?;
        encoded.push(b'\n');
        Ok(encoded)
    }
}

#[async_trait]
impl Isolation for ProcessIsolation {
    async fn run(&self, job: &ScrapeJob, budget: Duration) -> AttemptOutcome {
        let request = match self.request(job) {
            Ok(request) => request,
            Err(e) => return AttemptOutcome::Lost(format!("Failed to encode request: {}", e)),
        };

        let mut child = match self.command().spawn() {
            Ok(child) => child,
            Err(e) => return AttemptOutcome::Lost(format!("Failed to spawn worker: {}", e)),
        };
        let pid = child.id();
        debug!("Spawned worker {:?} for {}", pid, job.business_id);

        let outcome = match tokio::time::timeout(budget, exchange(&mut child, &request)).await {
            Ok(Ok(Some(result))) => AttemptOutcome::Completed(result),
            Ok(Ok(None)) => AttemptOutcome::Lost("worker exited without a result".to_string()),
            Ok(Err(e)) => AttemptOutcome::Lost(e.to_string()),
            Err(_) => AttemptOutcome::TimedOut,
        };

        // Reclaim everything the attempt started, whatever the outcome.
        if let Some(pid) = pid {
            kill_process_group(pid).await;
        }
        let _ = child.kill().await;

        outcome
    }
}

/// Send the request, then wait for the first stdout line. Returns `None`
/// when the worker exits without printing one.
async fn exchange(child: &mut Child, request: &[u8]) -> Result<Option<ScrapeResult>> {
    let mut stdin = child
        .stdin
        .take()
        .ok_or_else(|| HarvestError::Worker("worker stdin unavailable".to_string()))?;
    stdin.write_all(request).await?;
    drop(stdin);

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| HarvestError::Worker("worker stdout unavailable".to_string()))?;
    let mut lines = BufReader::new(stdout).lines();

    match lines.next_line().await? {
        Some(line) if !line.trim().is_empty() => Ok(Some(serde_json::from_str(&line)?)),
        _ => {
            let status = child.wait().await?;
            debug!("Worker exited with {} and no result", status);
            Ok(None)
        }
    }
}

#[cfg(unix)]
async fn kill_process_group(pid: u32) {
    let _ = Command::new("kill")
        .args(["-KILL", "--", &format!("-{}", pid)])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await;
}

#[cfg(windows)]
async fn kill_process_group(pid: u32) {
    let _ = Command::new("taskkill")
        .args(["/PID", &pid.to_string(), "/T", "/F"])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await;
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::domain::ScrapeStatus;

    fn shell(script: &str) -> ProcessIsolation {
        ProcessIsolation::with_command(
            "sh",
            vec!["-c".to_string(), script.to_string()],
            ScraperConfig::default(),
        )
    }

    fn job() -> ScrapeJob {
        ScrapeJob::new("42", "https://acme.io")
    }

    #[tokio::test]
    async fn test_result_line_is_parsed() {
        let result = ScrapeResult {
            business_id: "42".into(),
            content: "We make anvils.".into(),
            status: ScrapeStatus::SuccessContentFound,
            final_url: "https://acme.io".into(),
            debug_log: vec!["from worker".into()],
        };
        let json = serde_json::to_string(&result).unwrap();
        let isolation = shell(&format!("cat > /dev/null; printf '%s\\n' '{}'", json));

        let outcome = isolation.run(&job(), Duration::from_secs(10)).await;
        assert_eq!(outcome, AttemptOutcome::Completed(result));
    }

    #[tokio::test]
    async fn test_hung_worker_times_out() {
        let isolation = shell("sleep 30");
        let started = std::time::Instant::now();

        let outcome = isolation.run(&job(), Duration::from_millis(300)).await;
        assert_eq!(outcome, AttemptOutcome::TimedOut);
        assert!(started.elapsed() < Duration::from_secs(10));
    }

    #[tokio::test]
    async fn test_timeout_kills_background_children() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("survivor");
        let isolation = shell(&format!("(sleep 2; touch '{}') & sleep 30", marker.display()));

        let outcome = isolation.run(&job(), Duration::from_millis(300)).await;
        assert_eq!(outcome, AttemptOutcome::TimedOut);

        tokio::time::sleep(Duration::from_secs(3)).await;
        assert!(!marker.exists());
    }

    #[tokio::test]
    async fn test_crashed_worker_is_lost() {
        let isolation = shell("cat > /dev/null; exit 3");
        let outcome = isolation.run(&job(), Duration::from_secs(10)).await;
        assert!(matches!(outcome, AttemptOutcome::Lost(_)));
    }

    #[tokio::test]
    async fn test_garbage_output_is_lost() {
        let isolation = shell("cat > /dev/null; echo 'Segmentation fault'");
        let outcome = isolation.run(&job(), Duration::from_secs(10)).await;
        assert!(matches!(outcome, AttemptOutcome::Lost(_)));
    }

    #[tokio::test]
    async fn test_missing_program_is_lost() {
        let isolation = ProcessIsolation::with_command(
            "/nonexistent/about-harvest-worker",
            Vec::new(),
            ScraperConfig::default(),
        );
        let outcome = isolation.run(&job(), Duration::from_secs(1)).await;
        assert!(matches!(outcome, AttemptOutcome::Lost(ref m) if m.starts_with("Failed to spawn")));
    }
}
