// Suite configuration
//
// Where the storefront lives, which browser drives it, and the timeouts for
// every condition wait. Loaded from an optional JSON file plus environment
// overrides, matching how the rest of the stack is configured.

use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Default storefront under test
pub const DEFAULT_BASE_URL: &str = "https://www.demoblaze.com/";

/// Environment variable naming a JSON config file
pub const CONFIG_FILE_ENV: &str = "STOREFRONT_CONFIG";

/// Browser engine used for the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrowserKind {
    #[default]
    Chromium,
    Firefox,
    Webkit,
}

impl std::str::FromStr for BrowserKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chromium" | "chrome" => Ok(BrowserKind::Chromium),
            "firefox" => Ok(BrowserKind::Firefox),
            "webkit" | "safari" => Ok(BrowserKind::Webkit),
            other => Err(Error::Config(format!("unknown browser '{}'", other))),
        }
    }
}

/// Configuration shared by every scenario.
///
/// All fields are optional in the JSON form and fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SuiteConfig {
    /// Root of the storefront; navigation paths are resolved against it
    pub base_url: String,

    /// Browser engine to launch
    pub browser: BrowserKind,

    /// Run without a visible window
    pub headless: bool,

    /// Slow down every browser operation by N milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slow_mo_ms: Option<u64>,

    /// Timeout for individual clicks, fills and navigations
    pub action_timeout_ms: u64,

    /// Default timeout for condition waits
    pub wait_timeout_ms: u64,

    /// How long a successful login may take to show the logout control
    pub login_timeout_ms: u64,

    /// How long an armed dialog capture waits for its dialog
    pub dialog_timeout_ms: u64,

    /// How long the product images may take to render
    pub image_timeout_ms: u64,

    /// Interval between condition polls
    pub poll_interval_ms: u64,

    /// Pattern the add-to-cart dialog message must match
    pub added_dialog_pattern: String,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            browser: BrowserKind::default(),
            headless: true,
            slow_mo_ms: None,
            action_timeout_ms: 30_000,
            wait_timeout_ms: 10_000,
            login_timeout_ms: 3_000,
            dialog_timeout_ms: 5_000,
            image_timeout_ms: 15_000,
            poll_interval_ms: 100,
            added_dialog_pattern: "added".to_string(),
        }
    }
}

impl SuiteConfig {
    /// Creates the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a JSON config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::from(e).context(format!("reading {}", path.display())))?;
        let config: SuiteConfig = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Builds the configuration from the process environment.
    ///
    /// Starts from the file named by `STOREFRONT_CONFIG` (or the defaults),
    /// then applies `STOREFRONT_BASE_URL`, `STOREFRONT_BROWSER`,
    /// `STOREFRONT_HEADLESS` and `STOREFRONT_SLOW_MO_MS`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an explicit variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = match lookup(CONFIG_FILE_ENV) {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Some(url) = lookup("STOREFRONT_BASE_URL") {
            config.base_url = url;
        }
        if let Some(browser) = lookup("STOREFRONT_BROWSER") {
            config.browser = browser.parse()?;
        }
        if let Some(headless) = lookup("STOREFRONT_HEADLESS") {
            config.headless = parse_flag(&headless)?;
        }
        if let Some(slow_mo) = lookup("STOREFRONT_SLOW_MO_MS") {
            let ms = slow_mo
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("STOREFRONT_SLOW_MO_MS: '{}'", slow_mo)))?;
            config.slow_mo_ms = Some(ms);
        }

        config.validate()?;
        tracing::debug!("Suite configuration: {:?}", config);
        Ok(config)
    }

    /// Checks the base URL and dialog pattern.
    pub fn validate(&self) -> Result<()> {
        let url = self.base_url()?;
        if url.cannot_be_a_base() {
            return Err(Error::Config(format!(
                "base URL '{}' cannot be a base",
                self.base_url
            )));
        }
        self.added_dialog_regex()?;
        if self.poll_interval_ms == 0 {
            return Err(Error::Config("pollIntervalMs must be positive".to_string()));
        }
        Ok(())
    }

    /// Parsed base URL
    pub fn base_url(&self) -> Result<Url> {
        Ok(Url::parse(&self.base_url)?)
    }

    /// Compiled add-to-cart dialog pattern
    pub fn added_dialog_regex(&self) -> Result<Regex> {
        Regex::new(&self.added_dialog_pattern).map_err(|e| {
            Error::Config(format!(
                "addedDialogPattern '{}': {}",
                self.added_dialog_pattern, e
            ))
        })
    }

    pub fn action_timeout(&self) -> Duration {
        Duration::from_millis(self.action_timeout_ms)
    }

    pub fn wait_timeout(&self) -> Duration {
        Duration::from_millis(self.wait_timeout_ms)
    }

    pub fn login_timeout(&self) -> Duration {
        Duration::from_millis(self.login_timeout_ms)
    }

    pub fn dialog_timeout(&self) -> Duration {
        Duration::from_millis(self.dialog_timeout_ms)
    }

    pub fn image_timeout(&self) -> Duration {
        Duration::from_millis(self.image_timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_browser(mut self, browser: BrowserKind) -> Self {
        self.browser = browser;
        self
    }

    pub fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    pub fn with_slow_mo(mut self, ms: u64) -> Self {
        self.slow_mo_ms = Some(ms);
        self
    }

    pub fn with_wait_timeout(mut self, timeout: Duration) -> Self {
        self.wait_timeout_ms = timeout.as_millis() as u64;
        self
    }

    pub fn with_dialog_timeout(mut self, timeout: Duration) -> Self {
        self.dialog_timeout_ms = timeout.as_millis() as u64;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval_ms = interval.as_millis() as u64;
        self
    }

    pub fn with_added_dialog_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.added_dialog_pattern = pattern.into();
        self
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(Error::Config(format!("expected a boolean, got '{}'", other))),
    }
}
