//! Batch orchestration of scrape attempts over a dataset.
//!
//! A run goes through four passes over the records, strictly in order:
//!
//! 1. **Pre-filter**: records without a URL and records whose existing text
//!    already clears the classifier threshold are marked skipped.
//! 2. **Batches**: the remaining records are split into fixed-size batches
//!    and attempted one at a time under the [`Supervisor`], with a pause
//!    after every attempt and a longer pause between batches.
//! 3. **Merge**: each result is written back to its record as soon as the
//!    attempt returns.
//! 4. **Classification**: every record is scored before and after, and
//!    gets a final good/bad verdict.

mod config;
mod report;

pub use config::{IsolationMode, RunConfig};
pub use report::{ClassifyReport, DatasetBreakdown, UrlShape};

use tracing::info;

use crate::classifier::ScrapeClassifier;
use crate::domain::{BusinessRecord, ClassificationSummary, ScrapeJob, ScrapeResult, ScrapeStatus};
use crate::supervisor::Supervisor;

/// Outcome of a full run.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub summaries: Vec<ClassificationSummary>,
    pub skipped_no_url: usize,
    pub skipped_prefilter: usize,
    pub attempted: usize,
}

impl RunReport {
    pub fn good(&self) -> impl Iterator<Item = &ClassificationSummary> {
        self.summaries.iter().filter(|s| s.is_good)
    }

    pub fn bad(&self) -> impl Iterator<Item = &ClassificationSummary> {
        self.summaries.iter().filter(|s| !s.is_good)
    }
}

pub struct Orchestrator {
    classifier: ScrapeClassifier,
    supervisor: Supervisor,
    run: RunConfig,
    /// Scraped text must be strictly longer than this to count as good
    content_floor: usize,
}

impl Orchestrator {
    pub fn new(
        classifier: ScrapeClassifier,
        supervisor: Supervisor,
        run: RunConfig,
        content_floor: usize,
    ) -> Self {
        Self {
            classifier,
            supervisor,
            run,
            content_floor,
        }
    }

    pub fn classifier(&self) -> &ScrapeClassifier {
        &self.classifier
    }

    /// Scrape and classify `records` in place.
    pub async fn run(&self, records: &mut [BusinessRecord]) -> RunReport {
        let originals: Vec<String> = records.iter().map(BusinessRecord::original_text).collect();
        let mut report = RunReport::default();

        let queue = self.prefilter(records, &mut report);
        info!(
            "{} records queued for scraping ({} without URL, {} already adequate)",
            queue.len(),
            report.skipped_no_url,
            report.skipped_prefilter
        );

        let batch_size = self.run.batch_size.max(1);
        let total_batches = queue.len().div_ceil(batch_size);
        for (n, batch) in queue.chunks(batch_size).enumerate() {
            info!("Processing batch {} of {}", n + 1, total_batches);

            for &idx in batch {
                report.attempted += 1;
                let record = &mut records[idx];
                let Some(url) = record.url() else {
                    continue;
                };
                let job = ScrapeJob::new(record.id.clone(), url);
                info!(
                    "Scraping business {}/{}: {} ({})",
                    report.attempted,
                    queue.len(),
                    record.display_name(),
                    job.url
                );

                let result = self.supervisor.attempt(&job).await;
                info!("Status for {}: {}", record.id, result.status);
                merge(record, result);

                tokio::time::sleep(self.run.request_delay()).await;
            }

            if n + 1 < total_batches {
                info!(
                    "Batch {} completed. Waiting {} before next batch",
                    n + 1,
                    RunConfig::format_interval(self.run.batch_delay_secs)
                );
                tokio::time::sleep(self.run.batch_delay()).await;
            }
        }

        report.summaries = records
            .iter()
            .zip(&originals)
            .map(|(record, original)| self.classify(record, original))
            .collect();

        info!(
            "Run complete: {} good, {} bad",
            report.good().count(),
            report.bad().count()
        );
        report
    }

    /// Mark records that need no scraping and return the indices of the rest.
    fn prefilter(&self, records: &mut [BusinessRecord], report: &mut RunReport) -> Vec<usize> {
        let threshold = self.classifier.threshold();
        let mut queue = Vec::new();

        for (idx, record) in records.iter_mut().enumerate() {
            if record.url().is_none() {
                record.scrape_status = Some(ScrapeStatus::SkippedNoUrl);
                record.scraped_length = Some(0);
                record.debug_log =
                    Some(vec!["Skipped: No web_url provided for this business.".to_string()]);
                report.skipped_no_url += 1;
                continue;
            }

            if self.classifier.score_record(record) >= threshold {
                record.scrape_status = Some(ScrapeStatus::SkippedPrefilter);
                record.scraped_length = Some(
                    record
                        .combined_text
                        .as_deref()
                        .map_or(0, |t| t.chars().count()),
                );
                record.debug_log = Some(vec![
                    "Skipped: Existing content deemed sufficient.".to_string(),
                ]);
                report.skipped_prefilter += 1;
                continue;
            }

            queue.push(idx);
        }
        queue
    }

    /// Score a record before and after scraping and decide its verdict.
    ///
    /// Pre-filtered records are judged on their original text alone. Every
    /// other record needs a successful status, more than `content_floor`
    /// scraped characters, and a post-scrape score at the threshold.
    pub fn classify(&self, record: &BusinessRecord, original_text: &str) -> ClassificationSummary {
        let url = record.web_url.as_deref().unwrap_or("");
        let threshold = self.classifier.threshold();
        let original_score = self.classifier.score(original_text, url);
        let scrape_score = self
            .classifier
            .score(record.combined_text.as_deref().unwrap_or(""), url);

        let is_good = match record.scrape_status {
            Some(ScrapeStatus::SkippedPrefilter) => original_score >= threshold,
            Some(status) => {
                status.is_success()
                    && record.scraped_length.unwrap_or(0) > self.content_floor
                    && scrape_score >= threshold
            }
            None => false,
        };

        ClassificationSummary::new(record, original_text, original_score, scrape_score, is_good)
    }
}

/// Apply an attempt's result to its record. Existing text is only replaced
/// by non-empty content.
pub fn merge(record: &mut BusinessRecord, result: ScrapeResult) {
    let length = result.content_len();
    if !result.content.is_empty() {
        record.combined_text = Some(result.content);
    }
    record.scrape_status = Some(result.status);
    record.scraped_length = Some(length);
    record.debug_log = Some(result.debug_log);
}
