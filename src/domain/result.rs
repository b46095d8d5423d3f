use serde::{Deserialize, Serialize};

use crate::domain::ScrapeStatus;

/// Unit of work handed to an isolated scrape attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeJob {
    pub business_id: String,
    pub url: String,
}

impl ScrapeJob {
    pub fn new(business_id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            business_id: business_id.into(),
            url: url.into(),
        }
    }
}

/// Outcome of one scrape session, returned by value across the isolation
/// boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapeResult {
    pub business_id: String,
    /// Extracted text, empty on failure
    pub content: String,
    pub status: ScrapeStatus,
    /// Last URL the browser was on (or the raw input if it never navigated)
    pub final_url: String,
    pub debug_log: Vec<String>,
}

impl ScrapeResult {
    /// A result with no content, used for outcomes decided outside a session.
    pub fn failed(job: &ScrapeJob, status: ScrapeStatus, debug_log: Vec<String>) -> Self {
        Self {
            business_id: job.business_id.clone(),
            content: String::new(),
            status,
            final_url: job.url.clone(),
            debug_log,
        }
    }

    pub fn content_len(&self) -> usize {
        self.content.chars().count()
    }
}
