use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{BusinessRecord, ScrapeStatus};

const SNIPPET_CHARS: usize = 200;

/// Final good/bad verdict for one record, written to the classification report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationSummary {
    #[serde(rename = "_id")]
    pub id: String,
    pub company_name: Option<String>,
    pub web_url: Option<String>,
    pub original_text_snippet: String,
    pub scraped_text_snippet: String,
    pub status: Option<ScrapeStatus>,
    pub scraped_length: usize,
    pub original_score: f64,
    pub scrape_score: f64,
    pub is_good: bool,
    pub debug_log: Vec<String>,
    pub classified_at: DateTime<Utc>,
}

impl ClassificationSummary {
    pub fn new(
        record: &BusinessRecord,
        original_text: &str,
        original_score: f64,
        scrape_score: f64,
        is_good: bool,
    ) -> Self {
        Self {
            id: record.id.clone(),
            company_name: record.company_name.clone(),
            web_url: record.web_url.clone(),
            original_text_snippet: snippet(original_text),
            scraped_text_snippet: snippet(record.combined_text.as_deref().unwrap_or("")),
            status: record.scrape_status,
            scraped_length: record.scraped_length.unwrap_or(0),
            original_score,
            scrape_score,
            is_good,
            debug_log: record.debug_log.clone().unwrap_or_default(),
            classified_at: Utc::now(),
        }
    }
}

/// First 200 characters with an ellipsis, or `[N/A]` for empty text.
pub fn snippet(text: &str) -> String {
    let text = text.trim();
    if text.is_empty() {
        return "[N/A]".to_string();
    }
    let mut out: String = text.chars().take(SNIPPET_CHARS).collect();
    out.push_str("...");
    out
}
