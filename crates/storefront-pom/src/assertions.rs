// Assertions - Auto-retry assertions for scenarios
//
// Provides an expect() API over any `Session`: each assertion polls the
// document until it holds or the timeout passes, so scenarios never need a
// fixed sleep before checking UI state.

use crate::driver::Session;
use crate::error::{Error, Result};
use crate::selector::Target;
use crate::wait::DEFAULT_POLL_INTERVAL;
use std::time::{Duration, Instant};

/// Default timeout for assertions (5 seconds)
const DEFAULT_ASSERTION_TIMEOUT: Duration = Duration::from_secs(5);

/// Creates an expectation for `target` on `session` with auto-retry behavior.
///
/// # Example
///
/// ```ignore
/// use storefront_pom::{expect, Selector, Target};
/// use std::time::Duration;
///
/// expect(&session, Target::new(Selector::id("logout2")))
///     .with_timeout(Duration::from_millis(3000))
///     .to_be_visible()
///     .await?;
///
/// expect(&session, Target::new(Selector::id("logInModal")))
///     .to_be_hidden()
///     .await?;
/// ```
pub fn expect<S: Session + ?Sized>(session: &S, target: impl Into<Target>) -> Expectation<'_, S> {
    Expectation::new(session, target.into())
}

/// Expectation wraps a target and provides assertion methods with auto-retry.
pub struct Expectation<'a, S: Session + ?Sized> {
    session: &'a S,
    target: Target,
    timeout: Duration,
    poll_interval: Duration,
    negate: bool,
}

// to_* methods consume self so assertions read as one chain
#[allow(clippy::wrong_self_convention)]
impl<'a, S: Session + ?Sized> Expectation<'a, S> {
    pub(crate) fn new(session: &'a S, target: Target) -> Self {
        Self {
            session,
            target,
            timeout: DEFAULT_ASSERTION_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            negate: false,
        }
    }

    /// Sets a custom timeout for this assertion.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets a custom poll interval for this assertion.
    ///
    /// Default is 100ms.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Negates the assertion.
    #[allow(clippy::should_implement_trait)]
    pub fn not(mut self) -> Self {
        self.negate = !self.negate;
        self
    }

    /// Asserts that the element is visible.
    pub async fn to_be_visible(self) -> Result<()> {
        let session = self.session;
        let target = self.target.clone();
        self.retry("be visible", || {
            let target = target.clone();
            async move { session.is_visible(&target).await }
        })
        .await
    }

    /// Asserts that the element is hidden (not visible, or absent).
    pub async fn to_be_hidden(self) -> Result<()> {
        self.not().to_be_visible().await
    }

    /// Asserts that the element's trimmed text content equals `expected`.
    pub async fn to_have_text(self, expected: &str) -> Result<()> {
        let session = self.session;
        let target = self.target.clone();
        self.retry(&format!("have text '{}'", expected), || {
            let target = target.clone();
            async move {
                let text = session.text_content(&target).await?.unwrap_or_default();
                Ok::<_, Error>(text.trim() == expected)
            }
        })
        .await
    }

    /// Asserts that the element's text content contains `expected`.
    pub async fn to_contain_text(self, expected: &str) -> Result<()> {
        let session = self.session;
        let target = self.target.clone();
        self.retry(&format!("contain text '{}'", expected), || {
            let target = target.clone();
            async move {
                let text = session.text_content(&target).await?.unwrap_or_default();
                Ok::<_, Error>(text.contains(expected))
            }
        })
        .await
    }

    /// Asserts that the input's value equals `expected`.
    pub async fn to_have_value(self, expected: &str) -> Result<()> {
        let session = self.session;
        let target = self.target.clone();
        self.retry(&format!("have value '{}'", expected), || {
            let target = target.clone();
            async move { Ok::<_, Error>(session.input_value(&target).await? == expected) }
        })
        .await
    }

    /// Asserts that the target matches exactly `expected` elements.
    pub async fn to_have_count(self, expected: usize) -> Result<()> {
        let session = self.session;
        let target = self.target.clone();
        self.retry(&format!("have count {}", expected), || {
            let target = target.clone();
            async move { Ok::<_, Error>(session.count(&target).await? == expected) }
        })
        .await
    }

    async fn retry<F, Fut>(self, condition: &str, mut check: F) -> Result<()>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<bool>>,
    {
        let start = Instant::now();

        loop {
            let holds = check().await?;

            // Check if condition matches (with negation support)
            if holds != self.negate {
                return Ok(());
            }

            if start.elapsed() >= self.timeout {
                let message = if self.negate {
                    format!(
                        "Expected '{}' NOT to {}, but it did after {:?}",
                        self.target, condition, self.timeout
                    )
                } else {
                    format!(
                        "Expected '{}' to {}, but it did not after {:?}",
                        self.target, condition, self.timeout
                    )
                };
                return Err(Error::AssertionTimeout(message));
            }

            tokio::time::sleep(self.poll_interval).await;
        }
    }
}
