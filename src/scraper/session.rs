use tracing::{info, warn};

use crate::app::Result;
use crate::domain::{ScrapeJob, ScrapeResult, ScrapeStatus};
use crate::normalizer::normalize;
use crate::scraper::browser::{Browser, BrowserError, BrowserLauncher};
use crate::scraper::discovery::AboutLinkFinder;
use crate::scraper::extractor::ContentExtractor;
use crate::scraper::ScraperConfig;

/// Which navigation an error happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Initial,
    Followed,
}

impl Phase {
    fn status_for(self, error: &BrowserError) -> ScrapeStatus {
        match (self, error) {
            (Phase::Initial, BrowserError::Timeout(_)) => ScrapeStatus::FailedTimeoutInitial,
            (Phase::Initial, BrowserError::Driver(_)) => ScrapeStatus::FailedWebdriverErrorInitial,
            (Phase::Initial, BrowserError::Other(_)) => ScrapeStatus::FailedGeneralException,
            (Phase::Followed, BrowserError::Timeout(_)) => ScrapeStatus::FailedTimeoutFollowedLink,
            (Phase::Followed, BrowserError::Driver(_)) => ScrapeStatus::FailedWebdriverFollowedLink,
            (Phase::Followed, BrowserError::Other(_)) => ScrapeStatus::FailedExceptionFollowedLink,
        }
    }
}

/// Where a session ended up before the browser is closed.
struct Outcome {
    content: String,
    status: ScrapeStatus,
    final_url: String,
}

impl Outcome {
    fn new(status: ScrapeStatus, final_url: impl Into<String>) -> Self {
        Self {
            content: String::new(),
            status,
            final_url: final_url.into(),
        }
    }
}

/// Drives one browser through load, evaluate, discover and follow.
///
/// A session never returns an error: every failure is mapped to a terminal
/// [`ScrapeStatus`] and the trail of what happened travels with the result.
/// It has no deadline of its own; the supervisor enforces that.
pub struct ScrapeSession {
    config: ScraperConfig,
    extractor: ContentExtractor,
    finder: AboutLinkFinder,
}

impl ScrapeSession {
    pub fn new(config: ScraperConfig) -> Result<Self> {
        let extractor = ContentExtractor::new(&config)?;
        let finder = AboutLinkFinder::new(&config)?;
        Ok(Self {
            config,
            extractor,
            finder,
        })
    }

    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }

    pub async fn run<L: BrowserLauncher>(&self, launcher: &L, job: &ScrapeJob) -> ScrapeResult {
        let mut trace = vec![format!(
            "Starting scrape session for ID: {}, URL: {}",
            job.business_id, job.url
        )];

        let start_url = normalize(&job.url, &mut trace);
        if start_url.is_empty() {
            trace.push(format!(
                "Initial URL '{}' normalized to an invalid format.",
                job.url
            ));
            return ScrapeResult::failed(job, ScrapeStatus::FailedInvalidInitialUrl, trace);
        }

        trace.push("Launching browser.".to_string());
        let mut browser = match launcher.launch().await {
            Ok(browser) => browser,
            Err(e) => {
                warn!("Browser launch failed for {}: {}", job.business_id, e);
                trace.push(format!("Browser launch failed: {}", e));
                trace.push("Browser was not started, nothing to close.".to_string());
                return ScrapeResult::failed(job, ScrapeStatus::FailedWebdriverErrorInitial, trace);
            }
        };

        let outcome = self.drive(&browser, &start_url, &job.url, &mut trace).await;

        trace.push("Closing browser.".to_string());
        match browser.close().await {
            Ok(()) => trace.push("Browser closed successfully.".to_string()),
            Err(e) => trace.push(format!("Error closing browser: {}", e)),
        }

        info!(
            "Session for {} finished with status {} ({} chars)",
            job.business_id,
            outcome.status,
            outcome.content.chars().count()
        );

        ScrapeResult {
            business_id: job.business_id.clone(),
            content: outcome.content,
            status: outcome.status,
            final_url: outcome.final_url,
            debug_log: trace,
        }
    }

    async fn drive<B: Browser>(
        &self,
        browser: &B,
        start_url: &str,
        raw_url: &str,
        trace: &mut Vec<String>,
    ) -> Outcome {
        trace.push(format!("Navigating to initial URL: {}", start_url));
        let (landed, initial) = match self.load_and_extract(browser, start_url, trace).await {
            Ok(loaded) => loaded,
            Err(e) => {
                let status = self.fail(browser, Phase::Initial, e, raw_url, trace).await;
                return Outcome::new(status, raw_url);
            }
        };

        let initial_len = initial.chars().count();
        if self.config.is_adequate(&initial) {
            trace.push(format!("Initial page has enough content ({} chars).", initial_len));
            return Outcome {
                content: initial,
                status: ScrapeStatus::SuccessContentFound,
                final_url: landed,
            };
        }
        trace.push(format!(
            "Initial page content too short ({} chars). Looking for about page.",
            initial_len
        ));

        let candidate = self.finder.find_about_url(browser, &landed, trace).await;
        let here = normalize(&landed, trace);
        let about_url = match candidate {
            Some(c) if c.url != here => c.url,
            _ => {
                trace.push("No suitable 'about' link found or already on about page.".to_string());
                return Outcome::new(ScrapeStatus::FailedNoAboutLinkFound, landed);
            }
        };

        trace.push(format!("Attempting to navigate to found 'about' URL: {}", about_url));
        let (followed, content) = match self.load_and_extract(browser, &about_url, trace).await {
            Ok(loaded) => loaded,
            Err(e) => {
                let status = self.fail(browser, Phase::Followed, e, &about_url, trace).await;
                return Outcome::new(status, landed);
            }
        };

        let len = content.chars().count();
        let status = if self.config.is_adequate(&content) {
            trace.push(format!(
                "Successfully scraped content from followed link ({} chars).",
                len
            ));
            ScrapeStatus::SuccessFollowedLink
        } else {
            trace.push(format!("Followed link content too short ({} chars).", len));
            ScrapeStatus::FailedContentTooShortFollowed
        };

        Outcome {
            content,
            status,
            final_url: followed,
        }
    }

    /// Navigate, wait for the document, then extract. Returns the URL the
    /// browser actually landed on alongside the text.
    async fn load_and_extract<B: Browser>(
        &self,
        browser: &B,
        url: &str,
        trace: &mut Vec<String>,
    ) -> std::result::Result<(String, String), BrowserError> {
        browser.navigate(url, self.config.page_load_timeout()).await?;
        browser.wait_until_ready(self.config.ready_timeout()).await?;
        let landed = browser.current_url().await?;
        trace.push(format!("Page loaded: {}", landed));
        let content = self.extractor.extract(browser, trace).await?;
        Ok((landed, content))
    }

    async fn fail<B: Browser>(
        &self,
        browser: &B,
        phase: Phase,
        error: BrowserError,
        url: &str,
        trace: &mut Vec<String>,
    ) -> ScrapeStatus {
        warn!("Scrape of {} failed: {}", url, error);
        let entry = match (phase, &error) {
            (Phase::Initial, BrowserError::Timeout(_)) => {
                format!("Timeout while loading initial URL: {}", url)
            }
            (Phase::Initial, BrowserError::Driver(e)) => {
                format!("Driver error for initial URL: {} - {}", url, e)
            }
            (Phase::Initial, BrowserError::Other(e)) => {
                format!("General exception during scrape for URL: {} - {}", url, e)
            }
            (Phase::Followed, BrowserError::Timeout(_)) => {
                format!("Timeout navigating to followed about link: {}", url)
            }
            (Phase::Followed, BrowserError::Driver(e)) => {
                format!("Driver error navigating to followed about link: {}", e)
            }
            (Phase::Followed, BrowserError::Other(e)) => {
                format!("General error navigating to followed about link: {}", e)
            }
        };
        trace.push(entry);

        if matches!(error, BrowserError::Driver(_)) {
            match browser.page_source().await {
                Ok(source) => {
                    let snippet: String = source
                        .chars()
                        .take(self.config.page_source_snippet_chars)
                        .collect();
                    trace.push(format!("Page source on driver error: {}...", snippet));
                }
                Err(e) => trace.push(format!("Could not get page source on driver error: {}", e)),
            }
        }

        phase.status_for(&error)
    }
}
