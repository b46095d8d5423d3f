use std::collections::HashSet;

use scraper::{Html, Selector};

use crate::app::Result;
use crate::config::ConfigError;
use crate::scraper::browser::{Browser, BrowserError};
use crate::scraper::ScraperConfig;

/// Pulls the visible about-content text out of a loaded page
pub struct ContentExtractor {
    content_selectors: Vec<String>,
    noise_selectors: Vec<Selector>,
}

impl ContentExtractor {
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        let noise_selectors = config
            .noise_selectors
            .iter()
            .map(|s| {
                Selector::parse(s).map_err(|e| ConfigError::InvalidSelector {
                    selector: s.clone(),
                    message: e.to_string(),
                })
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self {
            content_selectors: config.content_selectors.clone(),
            noise_selectors,
        })
    }

    /// Extract cleaned text from the browser's current page.
    ///
    /// The first content selector with any match wins; otherwise the whole
    /// `body` is used. Returns an empty string when neither matches. Only
    /// driver-level failures are propagated.
    pub async fn extract<B: Browser>(
        &self,
        browser: &B,
        trace: &mut Vec<String>,
    ) -> std::result::Result<String, BrowserError> {
        trace.push("Attempting to extract content.".to_string());

        let mut elements = Vec::new();
        for selector in &self.content_selectors {
            match browser.find_elements(selector).await {
                Ok(found) if !found.is_empty() => {
                    trace.push(format!("Found elements with selector: {}", selector));
                    elements = found;
                    break;
                }
                Ok(_) => {}
                Err(BrowserError::Other(e)) => {
                    trace.push(format!("Selector {} failed: {}", selector, e));
                }
                Err(e) => return Err(e),
            }
        }

        if elements.is_empty() {
            match browser.find_elements("body").await {
                Ok(body) if !body.is_empty() => {
                    trace.push("No specific about section found, extracting from body.".to_string());
                    elements = body;
                }
                Ok(_) | Err(BrowserError::Other(_)) => {
                    trace.push("Could not find body element.".to_string());
                    return Ok(String::new());
                }
                Err(e) => return Err(e),
            }
        }

        let mut full_text = String::new();
        for element in &elements {
            match browser.element_text(element).await {
                Ok(text) if !text.is_empty() => {
                    full_text.push_str(&text);
                    full_text.push('\n');
                }
                Ok(_) => {}
                Err(e) => trace.push(format!("Error getting text from element: {}", e)),
            }
        }

        let cleaned = self.strip_noise(&full_text);
        trace.push(format!(
            "Extracted {} characters of content.",
            cleaned.chars().count()
        ));
        Ok(cleaned)
    }

    /// Drop navigation regions from extracted text and collapse whitespace.
    ///
    /// Visible text normally carries no markup, but pages that render
    /// escaped HTML (or fallback `noscript` blocks) do; those fragments are
    /// parsed and any subtree matching a noise selector is removed.
    pub fn strip_noise(&self, text: &str) -> String {
        let fragment = Html::parse_fragment(text);

        let noise: HashSet<_> = self
            .noise_selectors
            .iter()
            .flat_map(|sel| fragment.select(sel).map(|el| el.id()))
            .collect();

        let mut words: Vec<&str> = Vec::new();
        for node in fragment.tree.root().descendants() {
            let Some(text) = node.value().as_text() else {
                continue;
            };
            if node.ancestors().any(|a| noise.contains(&a.id())) {
                continue;
            }
            words.extend(text.split_whitespace());
        }
        words.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scraper::fake::{FakeBrowser, FakePage};

    fn extractor() -> ContentExtractor {
        ContentExtractor::new(&ScraperConfig::default()).unwrap()
    }

    #[test]
    fn test_strip_noise_plain_text() {
        let e = extractor();
        assert_eq!(
            e.strip_noise("  We bake\n\n bread   since 1990.\n"),
            "We bake bread since 1990."
        );
    }

    #[test]
    fn test_strip_noise_removes_nav_regions() {
        let e = extractor();
        let text = "<nav>Home | Shop</nav><p>We bake bread.</p><footer>(c) 2024</footer>";
        assert_eq!(e.strip_noise(text), "We bake bread.");
    }

    #[test]
    fn test_strip_noise_class_selectors() {
        let e = extractor();
        let text = r#"<div class="menu">Menu</div><div role="navigation">Nav</div>Story"#;
        assert_eq!(e.strip_noise(text), "Story");
    }

    #[test]
    fn test_invalid_noise_selector_is_config_error() {
        let config = ScraperConfig {
            noise_selectors: vec!["[[[".to_string()],
            ..Default::default()
        };
        assert!(ContentExtractor::new(&config).is_err());
    }

    #[tokio::test]
    async fn test_first_matching_selector_wins() {
        let page = FakePage::new()
            .element("main", "Main text")
            .element("section.about", "About section one")
            .element("section.about", "About section two");
        let browser = FakeBrowser::single("https://acme.io", page);
        browser.navigate_now("https://acme.io");

        let mut trace = Vec::new();
        let text = extractor().extract(&browser, &mut trace).await.unwrap();
        assert_eq!(text, "About section one About section two");
        assert!(trace.contains(&"Found elements with selector: section.about".to_string()));
        assert_eq!(trace.last().unwrap(), "Extracted 35 characters of content.");
    }

    #[tokio::test]
    async fn test_falls_back_to_body() {
        let page = FakePage::new().element("body", "Just a body");
        let browser = FakeBrowser::single("https://acme.io", page);
        browser.navigate_now("https://acme.io");

        let mut trace = Vec::new();
        let text = extractor().extract(&browser, &mut trace).await.unwrap();
        assert_eq!(text, "Just a body");
        assert!(trace
            .iter()
            .any(|l| l == "No specific about section found, extracting from body."));
    }

    #[tokio::test]
    async fn test_empty_page_is_empty_string() {
        let browser = FakeBrowser::single("https://acme.io", FakePage::new());
        browser.navigate_now("https://acme.io");

        let mut trace = Vec::new();
        let text = extractor().extract(&browser, &mut trace).await.unwrap();
        assert_eq!(text, "");
        assert_eq!(trace.last().unwrap(), "Could not find body element.");
    }

    #[tokio::test]
    async fn test_driver_failure_propagates() {
        let browser = FakeBrowser::single("https://acme.io", FakePage::new().crash_on_lookup());
        browser.navigate_now("https://acme.io");

        let mut trace = Vec::new();
        let err = extractor().extract(&browser, &mut trace).await.unwrap_err();
        assert!(matches!(err, BrowserError::Driver(_)));
    }
}
