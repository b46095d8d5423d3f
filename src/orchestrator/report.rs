use serde::Serialize;

use crate::classifier::ScrapeClassifier;
use crate::domain::BusinessRecord;

/// Scored entry in a [`ClassifyReport`].
#[derive(Debug, Clone, Serialize)]
pub struct ScoredRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub company_name: Option<String>,
    pub web_url: Option<String>,
    pub text_snippet: String,
    pub score: f64,
    pub is_good: bool,
}

/// Verdicts on a dataset's existing text, without scraping anything.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ClassifyReport {
    pub good: Vec<ScoredRecord>,
    pub bad: Vec<ScoredRecord>,
    /// Records with no text in any of the text fields
    pub empty: usize,
}

impl ClassifyReport {
    pub fn build(classifier: &ScrapeClassifier, records: &[BusinessRecord]) -> Self {
        let mut report = Self::default();
        for record in records {
            let text = record.best_text();
            if text.trim().is_empty() {
                report.empty += 1;
                continue;
            }

            let (is_good, score) =
                classifier.is_good(text, record.web_url.as_deref().unwrap_or(""));
            let entry = ScoredRecord {
                id: record.id.clone(),
                company_name: record.company_name.clone(),
                web_url: record.web_url.clone(),
                text_snippet: crate::domain::snippet(text),
                score,
                is_good,
            };
            if is_good {
                report.good.push(entry);
            } else {
                report.bad.push(entry);
            }
        }
        report
    }
}

/// Rough shape of a raw `web_url` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UrlShape {
    /// Has an http(s) scheme
    Full,
    /// Looks like a host without a scheme (`acme.io`)
    Partial,
    /// Filler such as `n/a` or `-`
    Placeholder,
    Other,
}

impl UrlShape {
    pub fn of(raw: &str) -> Self {
        let url = raw.trim().to_lowercase();
        if url.starts_with("http://") || url.starts_with("https://") {
            Self::Full
        } else if url.contains('.') && url.chars().count() > 4 {
            Self::Partial
        } else if matches!(url.as_str(), "n/a" | "na" | "none" | "-" | "") {
            Self::Placeholder
        } else {
            Self::Other
        }
    }
}

/// How a dataset splits by URL and content availability.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DatasetBreakdown {
    pub total: usize,
    pub url_and_content: usize,
    pub url_no_content: usize,
    pub no_url_no_content: usize,
    pub no_url_content: usize,
    pub full_urls: usize,
    pub partial_urls: usize,
    pub placeholder_urls: usize,
    pub other_urls: usize,
}

impl DatasetBreakdown {
    pub fn build(records: &[BusinessRecord]) -> Self {
        let mut breakdown = Self {
            total: records.len(),
            ..Default::default()
        };

        for record in records {
            let has_url = record.url().is_some();
            let has_content = record
                .combined_text
                .as_deref()
                .is_some_and(|t| !t.trim().is_empty());

            match (has_url, has_content) {
                (true, true) => breakdown.url_and_content += 1,
                (true, false) => breakdown.url_no_content += 1,
                (false, false) => breakdown.no_url_no_content += 1,
                (false, true) => breakdown.no_url_content += 1,
            }

            if let Some(raw) = record.web_url.as_deref() {
                match UrlShape::of(raw) {
                    UrlShape::Full => breakdown.full_urls += 1,
                    UrlShape::Partial => breakdown.partial_urls += 1,
                    UrlShape::Placeholder => breakdown.placeholder_urls += 1,
                    UrlShape::Other => breakdown.other_urls += 1,
                }
            }
        }
        breakdown
    }

    /// Share of `count` in the whole dataset, in percent.
    pub fn percent(&self, count: usize) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            count as f64 / self.total as f64 * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::ClassifierConfig;

    fn record(url: Option<&str>, text: Option<&str>) -> BusinessRecord {
        let mut r = BusinessRecord::new("id");
        r.web_url = url.map(String::from);
        r.combined_text = text.map(String::from);
        r
    }

    #[test]
    fn test_url_shape() {
        assert_eq!(UrlShape::of("https://acme.io"), UrlShape::Full);
        assert_eq!(UrlShape::of("HTTP://ACME.IO"), UrlShape::Full);
        assert_eq!(UrlShape::of("www.acme.io"), UrlShape::Partial);
        assert_eq!(UrlShape::of("N/A"), UrlShape::Placeholder);
        assert_eq!(UrlShape::of(" - "), UrlShape::Placeholder);
        assert_eq!(UrlShape::of("a.io"), UrlShape::Other);
        assert_eq!(UrlShape::of("acme"), UrlShape::Other);
    }

    #[test]
    fn test_breakdown_counts() {
        let records = vec![
            record(Some("https://a.io"), Some("text")),
            record(Some("b.io.example"), None),
            record(Some("   "), Some("   ")),
            record(None, Some("text")),
        ];
        let b = DatasetBreakdown::build(&records);

        assert_eq!(b.total, 4);
        assert_eq!(b.url_and_content, 1);
        assert_eq!(b.url_no_content, 1);
        assert_eq!(b.no_url_no_content, 1);
        assert_eq!(b.no_url_content, 1);
        assert_eq!(b.full_urls, 1);
        assert_eq!(b.partial_urls, 1);
        assert_eq!(b.placeholder_urls, 1);
        assert_eq!(b.percent(b.url_and_content), 25.0);
    }

    #[test]
    fn test_percent_of_empty_dataset() {
        assert_eq!(DatasetBreakdown::build(&[]).percent(0), 0.0);
    }

    #[test]
    fn test_classify_report_separates_empty() {
        let classifier = ScrapeClassifier::new(ClassifierConfig::default()).unwrap();
        let good_text = "About us: our story and our mission. We are a family company with \
                         a long history of quality.";
        let records = vec![
            record(Some("https://a.io"), Some(good_text)),
            record(Some("https://b.io"), Some("Buy now")),
            record(None, None),
        ];
        let report = ClassifyReport::build(&classifier, &records);

        assert_eq!(report.good.len(), 1);
        assert_eq!(report.bad.len(), 1);
        assert_eq!(report.empty, 1);
        assert!(report.good[0].score >= classifier.threshold());
    }
}
