use regex::{Regex, RegexBuilder};
use tracing::debug;

use crate::app::Result;
use crate::normalizer::{authority_of, normalize, path_of, resolve_href};
use crate::scraper::browser::Browser;
use crate::scraper::ScraperConfig;

/// How a link qualified as an about-page candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchedBy {
    LinkText,
    UrlKeyword,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveryCandidate {
    /// Normalized URL
    pub url: String,
    pub is_internal: bool,
    pub matched_by: MatchedBy,
}

/// Finds the most promising "about us" link on a page
pub struct AboutLinkFinder {
    url_keywords: Vec<String>,
    text_patterns: Vec<Regex>,
    irrelevant_segments: Vec<String>,
}

impl AboutLinkFinder {
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        let text_patterns = config
            .about_link_text_patterns
            .iter()
            .map(|p| RegexBuilder::new(p).case_insensitive(true).build())
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self {
            url_keywords: lowercase(&config.about_url_keywords),
            text_patterns,
            irrelevant_segments: lowercase(&config.irrelevant_path_keywords),
        })
    }

    /// Scan the current page's links for an about page.
    ///
    /// Links are visited in document order. A link whose visible text looks
    /// like "About us", or whose path carries an about keyword, is returned
    /// as soon as it is seen. Links that only match through their host name
    /// (`teamsports.com`) are weaker evidence: they are collected, and once
    /// the scan finishes the first internal one wins over the first external.
    pub async fn find_about_url<B: Browser>(
        &self,
        browser: &B,
        current_url: &str,
        trace: &mut Vec<String>,
    ) -> Option<DiscoveryCandidate> {
        trace.push(format!("Searching for 'about' links on {}", current_url));

        let links = match browser.find_links().await {
            Ok(links) => links,
            Err(e) => {
                trace.push(format!("Error while finding about page links: {}", e));
                return None;
            }
        };

        let base_authority = authority_of(current_url);
        let mut weak: Vec<DiscoveryCandidate> = Vec::new();

        for link in links {
            if link.href.trim().is_empty() {
                continue;
            }
            let href = resolve_href(current_url, &link.href);
            let normalized = normalize(&href, trace);
            if normalized.is_empty() {
                continue;
            }

            let text = link.text.trim();
            let by_text = self.text_patterns.iter().any(|p| p.is_match(text));
            let lower = normalized.to_lowercase();
            let by_url = self.url_keywords.iter().any(|k| lower.contains(k.as_str()));
            if !by_text && !by_url {
                continue;
            }

            let path = path_of(&normalized).to_lowercase();
            if self.has_irrelevant_segment(&path) {
                debug!("Skipping irrelevant link {}", normalized);
                continue;
            }

            let is_internal = authority_of(&normalized) == base_authority;

            if by_text {
                trace.push(format!("Found strong 'about' link by text: {} -> {}", text, href));
                return Some(DiscoveryCandidate {
                    url: normalized,
                    is_internal,
                    matched_by: MatchedBy::LinkText,
                });
            }

            let candidate = DiscoveryCandidate {
                url: normalized,
                is_internal,
                matched_by: MatchedBy::UrlKeyword,
            };
            if self.url_keywords.iter().any(|k| path.contains(k.as_str())) {
                trace.push(format!("Found strong 'about' link by URL keyword: {}", href));
                return Some(candidate);
            }
            weak.push(candidate);
        }

        if let Some(internal) = weak.iter().find(|c| c.is_internal) {
            trace.push(format!("Selected internal 'about' link: {}", internal.url));
            return Some(internal.clone());
        }
        if let Some(external) = weak.into_iter().next() {
            trace.push(format!(
                "Selected external 'about' link (as no internal found): {}",
                external.url
            ));
            return Some(external);
        }

        trace.push("No suitable 'about' link found.".to_string());
        None
    }

    fn has_irrelevant_segment(&self, path: &str) -> bool {
        path.split('/')
            .any(|segment| self.irrelevant_segments.iter().any(|k| k == segment))
    }
}

fn lowercase(items: &[String]) -> Vec<String> {
    items.iter().map(|s| s.to_lowercase()).collect()
}
