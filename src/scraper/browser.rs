use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure raised by a browser capability.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BrowserError {
    /// Page load or ready-state wait exceeded its budget
    #[error("timed out: {0}")]
    Timeout(String),

    /// The automation layer itself failed (crash, protocol error, launch failure)
    #[error("driver error: {0}")]
    Driver(String),

    #[error("{0}")]
    Other(String),
}

/// An anchor on the current page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    /// Absolute href as resolved by the browser
    pub href: String,
    /// Visible text
    pub text: String,
}

impl Link {
    pub fn new(href: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            text: text.into(),
        }
    }
}

/// A controlled browser session: one tab the scrape session drives.
#[async_trait]
pub trait Browser: Send + Sync {
    type Element: Send + Sync;

    /// Navigate, failing with [`BrowserError::Timeout`] if the load exceeds `timeout`.
    async fn navigate(&self, url: &str, timeout: Duration) -> Result<(), BrowserError>;

    /// Block until the document reports it is fully loaded.
    async fn wait_until_ready(&self, timeout: Duration) -> Result<(), BrowserError>;

    async fn current_url(&self) -> Result<String, BrowserError>;

    async fn find_links(&self) -> Result<Vec<Link>, BrowserError>;

    /// Elements matching a CSS selector; empty when nothing matches.
    async fn find_elements(&self, selector: &str) -> Result<Vec<Self::Element>, BrowserError>;

    /// Rendered (visible) text of an element.
    async fn element_text(&self, element: &Self::Element) -> Result<String, BrowserError>;

    async fn page_source(&self) -> Result<String, BrowserError>;

    async fn close(&mut self) -> Result<(), BrowserError>;
}

/// Starts a fresh [`Browser`] for each scrape session.
#[async_trait]
pub trait BrowserLauncher: Send + Sync {
    type Browser: Browser;

    async fn launch(&self) -> Result<Self::Browser, BrowserError>;
}
