//! Browser-driven scraping of "about us" content.
//!
//! A [`ScrapeSession`] runs one business end to end against a
//! [`Browser`] obtained from a [`BrowserLauncher`]:
//!
//! ```text
//! normalize → load → extract ─ adequate ──────────────→ success_content_found
//!                       └ thin → discover → follow → extract → success_followed_link
//!                                   └ none → failed_no_about_link_found
//! ```
//!
//! The production launcher is [`ChromeLauncher`] (headless Chrome over
//! CDP). Tests use an in-memory fake.
//!
//! # Usage
//!
//! ```rust,ignore
//! use about_harvest::domain::ScrapeJob;
//! use about_harvest::scraper::{ChromeLauncher, ScrapeSession, ScraperConfig};
//!
//! let config = ScraperConfig::default();
//! let session = ScrapeSession::new(config.clone())?;
//! let launcher = ChromeLauncher::new(config);
//!
//! let result = session.run(&launcher, &ScrapeJob::new("42", "example.com")).await;
//! println!("{}: {} chars", result.status, result.content_len());
//! ```

mod browser;
mod chrome;
mod config;
mod discovery;
mod extractor;
mod session;

#[cfg(test)]
pub(crate) mod fake;

pub use browser::{Browser, BrowserError, BrowserLauncher, Link};
pub use chrome::{ChromeBrowser, ChromeLauncher};
pub use config::ScraperConfig;
pub use discovery::{AboutLinkFinder, DiscoveryCandidate, MatchedBy};
pub use extractor::ContentExtractor;
pub use session::ScrapeSession;
