// Driver adapter
//
// The capability contract page objects are written against. A `Session` is
// one browser page: it navigates, acts on targets, reads element state and
// owns the dialog router for that page. Implementations:
//
// - `playwright::PlaywrightSession` drives a real browser (feature `playwright`)
// - `scripted::ScriptedSession` plays back a scripted in-memory document

#[cfg(feature = "playwright")]
pub mod playwright;
#[doc(hidden)]
pub mod scripted;

use crate::dialog::DialogRouter;
use crate::error::{Error, Result};
use crate::selector::Target;
use crate::wait::{DEFAULT_POLL_INTERVAL, poll_until};
use async_trait::async_trait;
use std::time::Duration;

/// Element state a wait resolves on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitState {
    /// The first match is visible
    Visible,
    /// The first match is not visible, or nothing matches
    Hidden,
    /// At least one match exists in the document
    Attached,
    /// No match exists in the document
    Detached,
}

impl std::fmt::Display for WaitState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            WaitState::Visible => "visible",
            WaitState::Hidden => "hidden",
            WaitState::Attached => "attached",
            WaitState::Detached => "detached",
        };
        f.write_str(name)
    }
}

/// One browser page, exclusively owned by one scenario.
///
/// Every method is a suspension point; calls on a session complete in the
/// order they are issued. Actions are strict: a target matching several
/// elements is an error unless it is narrowed with `Target::nth`.
#[async_trait]
pub trait Session: Send + Sync {
    /// Navigates to `path`, resolved against the session's base URL.
    async fn goto(&self, path: &str) -> Result<()>;

    /// Clicks the element matched by `target`.
    async fn click(&self, target: &Target) -> Result<()>;

    /// Replaces the value of the input matched by `target`.
    async fn fill(&self, target: &Target, value: &str) -> Result<()>;

    /// Whether the first match is visible. No match is not visible.
    async fn is_visible(&self, target: &Target) -> Result<bool>;

    /// Number of elements matched by `target`.
    async fn count(&self, target: &Target) -> Result<usize>;

    /// Text content of the element matched by `target`.
    async fn text_content(&self, target: &Target) -> Result<Option<String>>;

    /// Attribute value of the element matched by `target`.
    async fn get_attribute(&self, target: &Target, name: &str) -> Result<Option<String>>;

    /// Current value of the input matched by `target`.
    async fn input_value(&self, target: &Target) -> Result<String>;

    /// Router receiving every native dialog raised on this page.
    fn dialogs(&self) -> &DialogRouter;

    /// Poll interval used by [`wait_for`](Session::wait_for).
    fn poll_interval(&self) -> Duration {
        DEFAULT_POLL_INTERVAL
    }

    /// One indexed target per current match of `target`.
    async fn all(&self, target: &Target) -> Result<Vec<Target>> {
        let count = self.count(target).await?;
        Ok((0..count).map(|i| target.clone().nth(i)).collect())
    }

    /// Text content of every match, empty strings for elements without text.
    async fn all_text_contents(&self, target: &Target) -> Result<Vec<String>> {
        let mut texts = Vec::new();
        for item in self.all(target).await? {
            texts.push(self.text_content(&item).await?.unwrap_or_default());
        }
        Ok(texts)
    }

    /// Waits until `target` reaches `state`, polling until `timeout`.
    async fn wait_for(&self, target: &Target, state: WaitState, timeout: Duration) -> Result<()> {
        tracing::debug!("Waiting up to {:?} for '{}' to be {}", timeout, target, state);
        poll_until(
            || format!("'{}' to be {}", target, state),
            timeout,
            self.poll_interval(),
            || async move {
                Ok::<_, Error>(match state {
                    WaitState::Visible => self.is_visible(target).await?,
                    WaitState::Hidden => !self.is_visible(target).await?,
                    WaitState::Attached => self.count(target).await? > 0,
                    WaitState::Detached => self.count(target).await? == 0,
                })
            },
        )
        .await
    }
}
