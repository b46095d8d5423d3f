//! In-memory browser used by tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::scraper::browser::{Browser, BrowserError, BrowserLauncher, Link};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Load {
    Ok,
    Timeout,
    DriverError,
    Hang,
}

#[derive(Debug, Clone)]
pub struct FakePage {
    elements: Vec<(String, String)>,
    links: Vec<Link>,
    load: Load,
    crash_on_lookup: bool,
    redirect_to: Option<String>,
}

impl FakePage {
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            links: Vec::new(),
            load: Load::Ok,
            crash_on_lookup: false,
            redirect_to: None,
        }
    }

    pub fn element(mut self, selector: &str, text: &str) -> Self {
        self.elements.push((selector.to_string(), text.to_string()));
        self
    }

    pub fn link(mut self, href: &str, text: &str) -> Self {
        self.links.push(Link::new(href, text));
        self
    }

    pub fn load(mut self, load: Load) -> Self {
        self.load = load;
        self
    }

    pub fn crash_on_lookup(mut self) -> Self {
        self.crash_on_lookup = true;
        self
    }

    pub fn redirect_to(mut self, url: &str) -> Self {
        self.redirect_to = Some(url.to_string());
        self
    }
}

pub struct FakeBrowser {
    pages: HashMap<String, FakePage>,
    current: Mutex<Option<String>>,
    closed: Arc<AtomicUsize>,
}

impl FakeBrowser {
    pub fn new(pages: HashMap<String, FakePage>) -> Self {
        Self {
            pages,
            current: Mutex::new(None),
            closed: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn single(url: &str, page: FakePage) -> Self {
        Self::new(HashMap::from([(url.to_string(), page)]))
    }

    /// Point the browser at `url` without going through `navigate`.
    pub fn navigate_now(&self, url: &str) {
        *self.current.lock().unwrap() = Some(url.to_string());
    }

    fn current_page(&self) -> Option<FakePage> {
        let current = self.current.lock().unwrap().clone()?;
        self.pages.get(&current).cloned()
    }
}

#[async_trait]
impl Browser for FakeBrowser {
    type Element = String;

    async fn navigate(&self, url: &str, _timeout: Duration) -> Result<(), BrowserError> {
        let Some(page) = self.pages.get(url) else {
            return Err(BrowserError::Driver(format!("net::ERR_NAME_NOT_RESOLVED at {}", url)));
        };
        match page.load {
            Load::Ok => {
                let landed = page.redirect_to.clone().unwrap_or_else(|| url.to_string());
                *self.current.lock().unwrap() = Some(landed);
                Ok(())
            }
            Load::Timeout => Err(BrowserError::Timeout(format!("loading {}", url))),
            Load::DriverError => Err(BrowserError::Driver("tab crashed".to_string())),
            Load::Hang => std::future::pending().await,
        }
    }

    async fn wait_until_ready(&self, _timeout: Duration) -> Result<(), BrowserError> {
        Ok(())
    }

    async fn current_url(&self) -> Result<String, BrowserError> {
        Ok(self
            .current
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| "about:blank".to_string()))
    }

    async fn find_links(&self) -> Result<Vec<Link>, BrowserError> {
        Ok(self.current_page().map(|p| p.links).unwrap_or_default())
    }

    async fn find_elements(&self, selector: &str) -> Result<Vec<String>, BrowserError> {
        let Some(page) = self.current_page() else {
            return Ok(Vec::new());
        };
        if page.crash_on_lookup {
            return Err(BrowserError::Driver("session deleted".to_string()));
        }
        Ok(page
            .elements
            .iter()
            .filter(|(sel, _)| sel == selector)
            .map(|(_, text)| text.clone())
            .collect())
    }

    async fn element_text(&self, element: &String) -> Result<String, BrowserError> {
        Ok(element.clone())
    }

    async fn page_source(&self) -> Result<String, BrowserError> {
        Ok("<html><body>fake</body></html>".to_string())
    }

    async fn close(&mut self) -> Result<(), BrowserError> {
        self.closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Hands out a fresh [`FakeBrowser`] over the same site map on every launch.
#[derive(Clone, Default)]
pub struct FakeLauncher {
    pages: HashMap<String, FakePage>,
    fail_launch: bool,
    pub launched: Arc<AtomicUsize>,
    pub closed: Arc<AtomicUsize>,
}

impl FakeLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, page: FakePage) -> Self {
        self.pages.insert(url.to_string(), page);
        self
    }

    pub fn failing() -> Self {
        Self {
            fail_launch: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl BrowserLauncher for FakeLauncher {
    type Browser = FakeBrowser;

    async fn launch(&self) -> Result<FakeBrowser, BrowserError> {
        if self.fail_launch {
            return Err(BrowserError::Driver("chrome not found".to_string()));
        }
        self.launched.fetch_add(1, Ordering::SeqCst);
        let mut browser = FakeBrowser::new(self.pages.clone());
        browser.closed = self.closed.clone();
        Ok(browser)
    }
}
