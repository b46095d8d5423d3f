//! Structural about-page signals read from markup.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};

static ABOUT_CONTAINER: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("section.about, div#about, div[class*=about]").expect("valid selector")
});
static HEADINGS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h1, h2, h3, h4, h5, h6").expect("valid selector"));
static NAV_REGIONS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("nav, header, ul").expect("valid selector"));
static LINKS: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").expect("valid selector"));

/// Markup inspection used by the classifier.
pub trait StructuralSignals: Send + Sync {
    /// An "about" container exists, or a heading starts with an about phrase.
    fn has_about_section(&self, markup: &str) -> bool;

    /// A nav/header/list element links to an href containing "about".
    fn has_about_link(&self, markup: &str) -> bool;
}

/// [`StructuralSignals`] backed by the `scraper` HTML parser.
#[derive(Debug, Clone)]
pub struct HtmlStructure {
    heading: Option<Regex>,
}

impl HtmlStructure {
    pub fn new(about_headings: &[String]) -> Result<Self, regex::Error> {
        let heading = if about_headings.is_empty() {
            None
        } else {
            let alternation = about_headings
                .iter()
                .map(|h| regex::escape(h.trim()).replace(' ', r"\s+"))
                .collect::<Vec<_>>()
                .join("|");
            Some(Regex::new(&format!(r"(?i)^\s*(?:{})\b", alternation))?)
        };
        Ok(Self { heading })
    }
}

impl StructuralSignals for HtmlStructure {
    fn has_about_section(&self, markup: &str) -> bool {
        let document = Html::parse_fragment(markup);
        if document.select(&ABOUT_CONTAINER).next().is_some() {
            return true;
        }
        let Some(ref heading) = self.heading else {
            return false;
        };
        document.select(&HEADINGS).any(|h| {
            let text: String = h.text().collect();
            heading.is_match(text.trim())
        })
    }

    fn has_about_link(&self, markup: &str) -> bool {
        let document = Html::parse_fragment(markup);
        document.select(&NAV_REGIONS).any(|region| {
            region.select(&LINKS).any(|a| {
                a.value()
                    .attr("href")
                    .is_some_and(|href| href.to_lowercase().contains("about"))
            })
        })
    }
}
