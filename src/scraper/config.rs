use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::classifier::config::{to_strings, DEFAULT_ABOUT_URL_KEYWORDS, DEFAULT_IRRELEVANT_KEYWORDS};

/// Configuration for a single scrape session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Whether to run the browser in headless mode (default: true)
    pub headless: bool,

    /// Browser window size in pixels (default: 1920x1080)
    pub window_width: u32,
    pub window_height: u32,

    /// Page load timeout in seconds (default: 20)
    pub page_load_timeout_secs: u64,

    /// How long to wait for `document.readyState == "complete"` in seconds (default: 15)
    pub ready_timeout_secs: u64,

    /// Minimum extracted length, in characters, for content to be adequate (default: 50)
    pub min_content_length: usize,

    /// Characters of page source kept in the trail after a driver error (default: 500)
    pub page_source_snippet_chars: usize,

    /// CSS selectors to try for about content, in priority order
    pub content_selectors: Vec<String>,

    /// CSS selectors for navigation regions stripped from extracted text
    pub noise_selectors: Vec<String>,

    /// Substrings of a link URL that suggest an about page
    pub about_url_keywords: Vec<String>,

    /// Regex patterns (case-insensitive) matched against a link's visible text
    pub about_link_text_patterns: Vec<String>,

    /// Path segments that disqualify a link (careers, pricing, legal, ...)
    pub irrelevant_path_keywords: Vec<String>,

    /// User agent string to use
    pub user_agent: Option<String>,

    /// Browser UI language, kept fixed so pages render the same everywhere
    pub lang: String,

    /// Path to a Chrome/Chromium executable; autodetected when unset
    pub chrome_executable: Option<String>,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            headless: true,
            window_width: 1920,
            window_height: 1080,
            page_load_timeout_secs: 20,
            ready_timeout_secs: 15,
            min_content_length: 50,
            page_source_snippet_chars: 500,
            content_selectors: vec![
                "section.about".to_string(),
                "div#about".to_string(),
                "div[class*='about']".to_string(),
                "main".to_string(),
                "article".to_string(),
                "div.content".to_string(),
                "div.main-content".to_string(),
                "div.container".to_string(),
            ],
            noise_selectors: vec![
                "nav".to_string(),
                "header".to_string(),
                "footer".to_string(),
                "ul.main-menu".to_string(),
                "ul.navigation".to_string(),
                "div.menu".to_string(),
                "div[role='navigation']".to_string(),
            ],
            about_url_keywords: to_strings(DEFAULT_ABOUT_URL_KEYWORDS),
            about_link_text_patterns: to_strings(&[
                r"about\s*us",
                r"who\s*we\s*are",
                r"our\s*story",
                r"our\s*mission",
                r"our\s*vision",
                r"our\s*values",
                r"company\s*profile",
                "about",
                "corporate",
                "history",
                "team",
                "leadership",
                "overview",
                "philosophy",
                "purpose",
                "culture",
                "approach",
                "goals",
                "milestones",
                "achievements",
            ]),
            irrelevant_path_keywords: to_strings(DEFAULT_IRRELEVANT_KEYWORDS),
            user_agent: Some(
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                    .to_string(),
            ),
            lang: "en-US".to_string(),
            chrome_executable: None,
        }
    }
}

impl ScraperConfig {
    /// Get the page load timeout as a Duration
    pub fn page_load_timeout(&self) -> Duration {
        Duration::from_secs(self.page_load_timeout_secs)
    }

    /// Get the ready-state wait as a Duration
    pub fn ready_timeout(&self) -> Duration {
        Duration::from_secs(self.ready_timeout_secs)
    }

    /// Whether extracted text is long enough to stop searching.
    pub fn is_adequate(&self, text: &str) -> bool {
        text.chars().count() >= self.min_content_length
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_values() {
        let config = ScraperConfig::default();
        assert!(config.headless);
        assert_eq!(config.min_content_length, 50);
        assert_eq!(config.page_load_timeout_secs, 20);
        assert_eq!(config.ready_timeout_secs, 15);
        assert_eq!(config.content_selectors[0], "section.about");
        assert!(config.noise_selectors.contains(&"nav".to_string()));
        assert!(!config.about_link_text_patterns.is_empty());
    }

    #[test]
    fn test_timeout_durations() {
        let config = ScraperConfig::default();
        assert_eq!(config.page_load_timeout(), Duration::from_secs(20));
        assert_eq!(config.ready_timeout(), Duration::from_secs(15));
    }

    #[test]
    fn test_adequacy_boundary() {
        let config = ScraperConfig::default();
        assert!(config.is_adequate(&"a".repeat(50)));
        assert!(!config.is_adequate(&"a".repeat(49)));
    }

    #[test]
    fn test_adequacy_counts_chars_not_bytes() {
        let config = ScraperConfig {
            min_content_length: 4,
            ..Default::default()
        };
        assert!(!config.is_adequate("ééé"));
        assert!(config.is_adequate("éééé"));
    }
}
