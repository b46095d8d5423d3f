use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};

use crate::app::{HarvestError, Result};
use crate::domain::ScrapeJob;
use crate::scraper::{BrowserLauncher, ScrapeSession, ScraperConfig};

/// The single message a worker process receives on stdin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerRequest {
    pub job: ScrapeJob,
    pub config: ScraperConfig,
}

/// Worker side of the process boundary.
///
/// Reads one JSON [`WorkerRequest`] line from `input`, runs a session with a
/// launcher built from the request's config, and writes the
/// [`ScrapeResult`](crate::domain::ScrapeResult) as one JSON line to
/// `output`.
pub async fn serve<R, W, L, F>(input: R, mut output: W, make_launcher: F) -> Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
    L: BrowserLauncher,
    F: FnOnce(&ScraperConfig) -> L,
{
    let mut line = String::new();
    BufReader::new(input).read_line(&mut line).await?;
    if line.trim().is_empty() {
        return Err(HarvestError::Worker("no request received on stdin".to_string()));
    }

    let request: WorkerRequest = serde_json::from_str(&line)?;
    let session = ScrapeSession::new(request.config.clone())?;
    let launcher = make_launcher(&request.config);
    let result = session.run(&launcher, &request.job).await;

    let mut encoded = serde_json::to_vec(&result)?;
    encoded.push(b'\n');
    output.write_all(&encoded).await?;
    output.flush().await?;
    Ok(())
}
