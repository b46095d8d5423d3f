//! Scrape-quality classification.
//!
//! Scores a (text, url) pair against a set of independent signals. Each
//! signal contributes its configured weight at most once per call; the total
//! is compared to a fixed threshold to decide whether the text is a usable
//! "about us" narrative.
//!
//! ```text
//! text ─┬─ length floor ──────────┐
//!       ├─ about section (markup) │
//!       ├─ about link (markup)    │
//!       ├─ phrase match           ├─ Σ weights ─ ≥ threshold? ─ verdict
//!       ├─ keyword match          │
//!       └─ irrelevant penalty     │
//! url ──── about keyword ─────────┘
//! ```

pub(crate) mod config;
mod signals;

pub use config::{ClassifierConfig, ScoreWeights};
pub use signals::{HtmlStructure, StructuralSignals};

use regex::Regex;

use crate::app::Result;
use crate::domain::BusinessRecord;

/// A scoring signal category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    MinContentLength,
    AboutSection,
    AboutLink,
    PhraseMatch,
    KeywordMatch,
    IrrelevantPenalty,
    UrlAboutKeyword,
}

impl Signal {
    pub fn weight(&self, weights: &ScoreWeights) -> f64 {
        match self {
            Self::MinContentLength => weights.min_content_length_met,
            Self::AboutSection => weights.has_about_section,
            Self::AboutLink => weights.has_about_link,
            Self::PhraseMatch => weights.phrase_match,
            Self::KeywordMatch => weights.keyword_match,
            Self::IrrelevantPenalty => weights.irrelevant_keyword_penalty,
            Self::UrlAboutKeyword => weights.url_contains_about,
        }
    }
}

/// Signals that fired for one input, plus their summed weight.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    pub fired: Vec<Signal>,
    pub total: f64,
}

impl ScoreBreakdown {
    pub fn fired(&self, signal: Signal) -> bool {
        self.fired.contains(&signal)
    }
}

pub struct ScrapeClassifier<S = HtmlStructure> {
    config: ClassifierConfig,
    signals: S,
    irrelevant: Option<Regex>,
    url_keywords: Option<Regex>,
}

impl ScrapeClassifier<HtmlStructure> {
    pub fn new(config: ClassifierConfig) -> Result<Self> {
        let signals = HtmlStructure::new(&config.about_headings)?;
        Self::with_signals(config, signals)
    }
}

impl<S: StructuralSignals> ScrapeClassifier<S> {
    pub fn with_signals(config: ClassifierConfig, signals: S) -> Result<Self> {
        let irrelevant = whole_word_pattern(&config.irrelevant_keywords)?;
        let url_keywords = whole_word_pattern(&config.about_url_keywords)?;
        Ok(Self {
            config,
            signals,
            irrelevant,
            url_keywords,
        })
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    pub fn threshold(&self) -> f64 {
        self.config.threshold
    }

    /// Which signals fire for `text` scraped from (or associated with) `url`.
    pub fn breakdown(&self, text: &str, url: &str) -> ScoreBreakdown {
        let text = text.trim().to_lowercase();
        let url = url.to_lowercase();
        let mut fired = Vec::new();

        if text.chars().count() >= self.config.min_content_length {
            fired.push(Signal::MinContentLength);
        }
        if self.signals.has_about_section(&text) {
            fired.push(Signal::AboutSection);
        }
        if self.signals.has_about_link(&text) {
            fired.push(Signal::AboutLink);
        }
        if self.config.phrases.iter().any(|p| text.contains(p.as_str())) {
            fired.push(Signal::PhraseMatch);
        }
        if self.config.keywords.iter().any(|k| text.contains(k.as_str())) {
            fired.push(Signal::KeywordMatch);
        }
        if self.irrelevant.as_ref().is_some_and(|re| re.is_match(&text)) {
            fired.push(Signal::IrrelevantPenalty);
        }
        if self.url_keywords.as_ref().is_some_and(|re| re.is_match(&url)) {
            fired.push(Signal::UrlAboutKeyword);
        }

        let total = fired.iter().map(|s| s.weight(&self.config.weights)).sum();
        ScoreBreakdown { fired, total }
    }

    pub fn score(&self, text: &str, url: &str) -> f64 {
        self.breakdown(text, url).total
    }

    /// Verdict and score for a (text, url) pair.
    pub fn is_good(&self, text: &str, url: &str) -> (bool, f64) {
        let score = self.score(text, url);
        (score >= self.config.threshold, score)
    }

    /// Score a record's best available text against its URL.
    pub fn score_record(&self, record: &BusinessRecord) -> f64 {
        self.score(record.best_text(), record.web_url.as_deref().unwrap_or(""))
    }
}

/// Case-insensitive `\b(?:a|b|c)\b`, or `None` for an empty list.
fn whole_word_pattern(words: &[String]) -> Result<Option<Regex>> {
    if words.is_empty() {
        return Ok(None);
    }
    let alternation = words
        .iter()
        .map(|w| regex::escape(&w.to_lowercase()))
        .collect::<Vec<_>>()
        .join("|");
    Ok(Some(Regex::new(&format!(r"(?i)\b(?:{})\b", alternation))?))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn classifier() -> ScrapeClassifier {
        ScrapeClassifier::new(ClassifierConfig::default()).unwrap()
    }

    fn only(c: &ScrapeClassifier, text: &str, url: &str, expected: Signal) {
        let b = c.breakdown(text, url);
        assert_eq!(b.fired, vec![expected], "text={text:?} url={url:?}");
        assert!((b.total - expected.weight(&c.config().weights)).abs() < EPS);
    }

    #[test]
    fn test_no_signals() {
        let c = classifier();
        assert_eq!(c.score("", ""), 0.0);
        assert_eq!(c.score("xyz", "https://acme.io/home"), 0.0);
    }

    #[test]
    fn test_min_length_signal_alone() {
        let c = classifier();
        only(&c, &"z".repeat(50), "", Signal::MinContentLength);
    }

    #[test]
    fn test_min_length_boundary() {
        let c = classifier();
        assert!(!c.breakdown(&"z".repeat(49), "").fired(Signal::MinContentLength));
        assert!(c.breakdown(&"z".repeat(50), "").fired(Signal::MinContentLength));
        // Surrounding whitespace is trimmed before measuring
        assert!(!c
            .breakdown(&format!("   {}   ", "z".repeat(49)), "")
            .fired(Signal::MinContentLength));
    }

    #[test]
    fn test_phrase_and_keyword_fire_independently() {
        let c = classifier();
        let b = c.breakdown("who we are", "");
        assert_eq!(b.fired, vec![Signal::PhraseMatch]);

        only(&c, "team", "", Signal::KeywordMatch);

        let b = c.breakdown("about us", "");
        assert!(b.fired(Signal::PhraseMatch));
        assert!(b.fired(Signal::KeywordMatch));
        assert!((b.total - 1.0).abs() < EPS);
    }

    #[test]
    fn test_phrase_counted_once() {
        let c = classifier();
        let one = c.score("who we are", "");
        let many = c.score("who we are. our mission. our vision.", "");
        // keyword stems (mission, vision) add once, phrases still once
        assert!((many - one - 0.3).abs() < EPS);
    }

    #[test]
    fn test_irrelevant_penalty_once() {
        let c = classifier();
        only(&c, "jobs", "", Signal::IrrelevantPenalty);
        assert!((c.score("jobs pricing legal", "") + 0.5).abs() < EPS);
    }

    #[test]
    fn test_irrelevant_requires_whole_word() {
        let c = classifier();
        assert!(!c.breakdown("jobsite", "").fired(Signal::IrrelevantPenalty));
        assert!(c.breakdown("Careers!", "").fired(Signal::IrrelevantPenalty));
    }

    #[test]
    fn test_url_keyword_signal() {
        let c = classifier();
        only(&c, "", "https://acme.io/About", Signal::UrlAboutKeyword);
        only(&c, "", "https://acme.io/who-we-are", Signal::UrlAboutKeyword);
        assert!(!c
            .breakdown("", "https://acme.io/aboutness")
            .fired(Signal::UrlAboutKeyword));
    }

    #[test]
    fn test_structural_signals_from_markup() {
        let c = classifier();
        let b = c.breakdown(r#"<section class="about"></section>"#, "");
        assert!(b.fired(Signal::AboutSection));
        assert!(!b.fired(Signal::AboutLink));

        let b = c.breakdown(r#"<nav><a href="/about">x</a></nav>"#, "");
        assert!(b.fired(Signal::AboutLink));
        assert!(!b.fired(Signal::AboutSection));
    }

    #[test]
    fn test_score_is_pure() {
        let c = classifier();
        let text = "Our mission is to provide innovative solutions. We are a team of dedicated professionals. Our history dates back to 1990.";
        let url = "http://www.aboutuscorp.com/about";
        assert_eq!(c.score(text, url), c.score(text, url));
    }

    #[test]
    fn test_good_about_text() {
        let c = classifier();
        let text = "Our mission is to provide innovative solutions. We are a team of dedicated professionals. Our history dates back to 1990.";
        let (good, score) = c.is_good(text, "http://www.aboutuscorp.com/about");
        // length + phrase + keyword + irrelevant("solutions") + url
        assert!((score - (1.5 + 0.7 + 0.3 - 0.5 + 0.7)).abs() < EPS);
        assert!(good);
    }

    #[test]
    fn test_news_page_is_bad() {
        let c = classifier();
        let text = "Breaking news: Local event coverage. Read more on our blog. Subscribe for updates. Careers available now.";
        let (good, _) = c.is_good(text, "http://www.news.com/latest");
        assert!(!good);
    }

    #[test]
    fn test_score_record_uses_best_text() {
        let c = classifier();
        let mut record = BusinessRecord::new("1");
        record.web_url = Some("https://acme.io/about".into());
        record.raw_text = Some("who we are".into());
        assert!((c.score_record(&record) - c.score("who we are", "https://acme.io/about")).abs() < EPS);
    }

    struct AlwaysStructured;

    impl StructuralSignals for AlwaysStructured {
        fn has_about_section(&self, _markup: &str) -> bool {
            true
        }
        fn has_about_link(&self, _markup: &str) -> bool {
            true
        }
    }

    #[test]
    fn test_custom_structural_signals() {
        let c = ScrapeClassifier::with_signals(ClassifierConfig::default(), AlwaysStructured).unwrap();
        assert!((c.score("", "") - 2.0).abs() < EPS);
    }

    #[test]
    fn test_empty_tables_never_fire() {
        let config = ClassifierConfig {
            irrelevant_keywords: vec![],
            about_url_keywords: vec![],
            ..Default::default()
        };
        let c = ScrapeClassifier::new(config).unwrap();
        assert!(!c.breakdown("careers", "https://x.io/about").fired(Signal::IrrelevantPenalty));
        assert!(!c.breakdown("careers", "https://x.io/about").fired(Signal::UrlAboutKeyword));
    }
}
