// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// Playwright-backed session
//
// Launches Playwright and one browser page per session. Targets are rendered
// to Playwright selector strings, so chained (" >> ") and indexed ("nth=")
// lookups are resolved by the browser itself. A single dialog handler is
// registered at launch and forwards every native dialog to the session's
// `DialogRouter`.

use crate::config::{BrowserKind, SuiteConfig};
use crate::dialog::{DialogKind, DialogResponse, DialogRouter};
use crate::driver::Session;
use crate::error::Result;
use crate::selector::Target;
use async_trait::async_trait;
use playwright_rs::{
    Browser, ClickOptions, FillOptions, GotoOptions, LaunchOptions, Locator, Page, Playwright,
};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// A [`Session`] driving a real browser page through Playwright.
pub struct PlaywrightSession {
    playwright: Playwright,
    browser: Browser,
    page: Page,
    base_url: Url,
    dialogs: Arc<DialogRouter>,
    action_timeout: Duration,
    poll_interval: Duration,
}

impl PlaywrightSession {
    /// Launches the configured browser and opens one page.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The configuration is invalid
    /// - The Playwright server or the browser fails to launch
    pub async fn launch(config: &SuiteConfig) -> Result<Self> {
        config.validate()?;
        let base_url = config.base_url()?;

        let playwright = Playwright::launch().await?;
        let browser_type = match config.browser {
            BrowserKind::Chromium => playwright.chromium(),
            BrowserKind::Firefox => playwright.firefox(),
            BrowserKind::Webkit => playwright.webkit(),
        };

        let mut options = LaunchOptions::new().headless(config.headless);
        if let Some(ms) = config.slow_mo_ms {
            options = options.slow_mo(ms as f64);
        }

        let browser = browser_type.launch_with_options(options).await?;
        let page = browser.new_page().await?;
        tracing::info!(
            "Launched {:?} (headless: {}) for {}",
            config.browser,
            config.headless,
            base_url
        );

        let dialogs = Arc::new(DialogRouter::new());
        let router = Arc::clone(&dialogs);
        page.on_dialog(move |dialog| {
            let router = Arc::clone(&router);
            async move {
                let kind = DialogKind::from_protocol(dialog.type_());
                match router.dispatch(kind, dialog.message()) {
                    DialogResponse::Accept => dialog.accept(None).await,
                    DialogResponse::Dismiss => dialog.dismiss().await,
                }
            }
        })
        .await?;

        Ok(Self {
            playwright,
            browser,
            page,
            base_url,
            dialogs,
            action_timeout: config.action_timeout(),
            poll_interval: config.poll_interval(),
        })
    }

    /// Underlying Playwright page, for assertions the trait does not cover.
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Closes the browser and shuts down the Playwright server.
    pub async fn close(self) -> Result<()> {
        self.browser.close().await?;
        self.playwright.shutdown().await?;
        tracing::info!("Browser session closed");
        Ok(())
    }

    async fn locator(&self, target: &Target) -> Locator {
        self.page.locator(&target.to_string()).await
    }

    fn timeout_ms(&self) -> f64 {
        self.action_timeout.as_millis() as f64
    }
}

#[async_trait]
impl Session for PlaywrightSession {
    async fn goto(&self, path: &str) -> Result<()> {
        let url = self.base_url.join(path)?;
        tracing::debug!("goto {}", url);
        self.page
            .goto(url.as_str(), Some(GotoOptions::new().timeout(self.action_timeout)))
            .await?;
        Ok(())
    }

    async fn click(&self, target: &Target) -> Result<()> {
        tracing::debug!("click '{}'", target);
        let options = ClickOptions::builder().timeout(self.timeout_ms()).build();
        self.locator(target).await.click(Some(options)).await?;
        Ok(())
    }

    async fn fill(&self, target: &Target, value: &str) -> Result<()> {
        tracing::debug!("fill '{}'", target);
        let options = FillOptions::builder().timeout(self.timeout_ms()).build();
        self.locator(target).await.fill(value, Some(options)).await?;
        Ok(())
    }

    async fn is_visible(&self, target: &Target) -> Result<bool> {
        let locator = self.locator(target).await;
        let locator = match target.index() {
            Some(_) => locator,
            None => locator.first(),
        };
        Ok(locator.is_visible().await?)
    }

    async fn count(&self, target: &Target) -> Result<usize> {
        Ok(self.locator(target).await.count().await?)
    }

    async fn text_content(&self, target: &Target) -> Result<Option<String>> {
        Ok(self.locator(target).await.text_content().await?)
    }

    async fn get_attribute(&self, target: &Target, name: &str) -> Result<Option<String>> {
        Ok(self.locator(target).await.get_attribute(name).await?)
    }

    async fn input_value(&self, target: &Target) -> Result<String> {
        Ok(self.locator(target).await.input_value(None).await?)
    }

    fn dialogs(&self) -> &DialogRouter {
        &self.dialogs
    }

    fn poll_interval(&self) -> Duration {
        self.poll_interval
    }
}
