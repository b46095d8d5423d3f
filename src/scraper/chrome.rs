use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::browser::BrowserConfig;
use chromiumoxide::element::Element;
use chromiumoxide::error::CdpError;
use chromiumoxide::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::scraper::browser::{Browser, BrowserError, BrowserLauncher, Link};
use crate::scraper::config::ScraperConfig;

const READY_POLL_INTERVAL: Duration = Duration::from_millis(200);

const LINKS_SCRIPT: &str = r#"
    Array.from(document.querySelectorAll('a')).map(a => ({
        href: a.href || '',
        text: (a.innerText || a.textContent || '').trim()
    }))
"#;

impl From<CdpError> for BrowserError {
    fn from(e: CdpError) -> Self {
        match e {
            CdpError::Timeout => BrowserError::Timeout(e.to_string()),
            other => BrowserError::Driver(other.to_string()),
        }
    }
}

/// Launches headless Chrome via chromiumoxide.
#[derive(Debug, Clone)]
pub struct ChromeLauncher {
    config: ScraperConfig,
}

impl ChromeLauncher {
    pub fn new(config: ScraperConfig) -> Self {
        Self { config }
    }

    fn browser_config(&self) -> Result<BrowserConfig, BrowserError> {
        let mut builder = BrowserConfig::builder()
            .arg("--no-sandbox")
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-software-rasterizer")
            .arg("--disable-blink-features=AutomationControlled")
            .arg(format!("--lang={}", self.config.lang))
            .window_size(self.config.window_width, self.config.window_height)
            .request_timeout(self.config.page_load_timeout());

        if let Some(ref ua) = self.config.user_agent {
            builder = builder.arg(format!("--user-agent={}", ua));
        }

        if let Some(ref exe) = self.config.chrome_executable {
            builder = builder.chrome_executable(exe);
        }

        if !self.config.headless {
            builder = builder.with_head();
        }

        builder
            .build()
            .map_err(|e| BrowserError::Driver(format!("Failed to build browser config: {}", e)))
    }
}

#[async_trait]
impl BrowserLauncher for ChromeLauncher {
    type Browser = ChromeBrowser;

    async fn launch(&self) -> Result<ChromeBrowser, BrowserError> {
        let browser_config = self.browser_config()?;

        let (browser, mut handler) =
            chromiumoxide::Browser::launch(browser_config)
                .await
                .map_err(|e| {
                    BrowserError::Driver(format!(
                        "Failed to launch browser: {}. Is Chrome or Chromium installed and in PATH?",
                        e
                    ))
                })?;

        let handler_task = tokio::spawn(async move {
            while let Some(_event) = handler.next().await {
                // Drive the CDP connection
            }
        });

        let page = browser.new_page("about:blank").await?;

        Ok(ChromeBrowser {
            browser,
            page,
            handler_task,
        })
    }
}

/// A single Chrome tab driven over CDP.
pub struct ChromeBrowser {
    browser: chromiumoxide::Browser,
    page: Page,
    handler_task: JoinHandle<()>,
}

#[async_trait]
impl Browser for ChromeBrowser {
    type Element = Element;

    async fn navigate(&self, url: &str, timeout: Duration) -> Result<(), BrowserError> {
        match tokio::time::timeout(timeout, self.page.goto(url)).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(e)) => Err(e.into()),
            Err(_) => Err(BrowserError::Timeout(format!(
                "navigation to {} exceeded {}s",
                url,
                timeout.as_secs()
            ))),
        }
    }

    async fn wait_until_ready(&self, timeout: Duration) -> Result<(), BrowserError> {
        let deadline = Instant::now() + timeout;
        loop {
            let state: String = self
                .page
                .evaluate("document.readyState")
                .await?
                .into_value()
                .map_err(|e| BrowserError::Other(format!("Failed to parse ready state: {:?}", e)))?;
            if state == "complete" {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(BrowserError::Timeout(format!(
                    "document not ready after {}s (state: {})",
                    timeout.as_secs(),
                    state
                )));
            }
            tokio::time::sleep(READY_POLL_INTERVAL).await;
        }
    }

    async fn current_url(&self) -> Result<String, BrowserError> {
        Ok(self.page.url().await?.unwrap_or_default())
    }

    async fn find_links(&self) -> Result<Vec<Link>, BrowserError> {
        self.page
            .evaluate(LINKS_SCRIPT)
            .await?
            .into_value()
            .map_err(|e| BrowserError::Other(format!("Failed to parse links: {:?}", e)))
    }

    async fn find_elements(&self, selector: &str) -> Result<Vec<Element>, BrowserError> {
        Ok(self.page.find_elements(selector).await?)
    }

    async fn element_text(&self, element: &Element) -> Result<String, BrowserError> {
        Ok(element.inner_text().await?.unwrap_or_default())
    }

    async fn page_source(&self) -> Result<String, BrowserError> {
        Ok(self.page.content().await?)
    }

    async fn close(&mut self) -> Result<(), BrowserError> {
        self.browser.close().await?;
        self.browser.wait().await.map_err(|e| {
            BrowserError::Driver(format!("Failed to wait for browser exit: {}", e))
        })?;
        Ok(())
    }
}

impl Drop for ChromeBrowser {
    fn drop(&mut self) {
        self.handler_task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_browser_config_builds_without_launching() {
        let launcher = ChromeLauncher::new(ScraperConfig::default());
        // Building only fails when no executable can be found; either way it must not panic.
        let _ = launcher.browser_config();
    }

    #[test]
    fn test_cdp_timeout_maps_to_timeout() {
        assert!(matches!(
            BrowserError::from(CdpError::Timeout),
            BrowserError::Timeout(_)
        ));
    }

    #[tokio::test]
    #[ignore] // Requires Chrome or Chromium to be installed
    async fn test_chrome_extracts_data_url() {
        let launcher = ChromeLauncher::new(ScraperConfig::default());
        let mut browser = launcher.launch().await.expect("failed to launch");
        browser
            .navigate(
                "data:text/html,<main><h1>About</h1><a href='/about'>About us</a></main>",
                Duration::from_secs(10),
            )
            .await
            .expect("navigation failed");
        browser
            .wait_until_ready(Duration::from_secs(10))
            .await
            .expect("page never became ready");

        let mains = browser.find_elements("main").await.unwrap();
        assert_eq!(mains.len(), 1);
        let text = browser.element_text(&mains[0]).await.unwrap();
        assert!(text.contains("About"));

        let links = browser.find_links().await.unwrap();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].text, "About us");

        browser.close().await.unwrap();
    }
}
