// Login page object
//
// The login modal opened from the home page's "Log in" link.

use super::PageObject;
use crate::dialog::{CapturedDialog, DialogResponse};
use crate::driver::{Session, WaitState};
use crate::error::Result;
use crate::fixtures::Credentials;
use crate::selector::{Selector, SelectorMap};
use std::time::Duration;

const USERNAME_INPUT: &str = "usernameInput";
const PASSWORD_INPUT: &str = "passwordInput";
const LOGIN_BUTTON: &str = "loginButton";
const LOGIN_MODAL: &str = "loginModal";
const CLOSE_BUTTON: &str = "closeButton";

/// Login modal.
pub struct LoginPage<'a, S: Session + ?Sized> {
    session: &'a S,
    selectors: SelectorMap,
}

impl<'a, S: Session + ?Sized> LoginPage<'a, S> {
    pub fn new(session: &'a S) -> Self {
        let selectors = SelectorMap::new(Self::NAME)
            .with(USERNAME_INPUT, Selector::id("loginusername"))
            .with(PASSWORD_INPUT, Selector::id("loginpassword"))
            .with(
                LOGIN_BUTTON,
                Selector::attr_equals("button", "onclick", "logIn()"),
            )
            .with(LOGIN_MODAL, Selector::id("logInModal"))
            .with(CLOSE_BUTTON, Selector::css("#logInModal .close"));

        Self { session, selectors }
    }

    /// Fills username, then password, then submits.
    ///
    /// Empty strings are sent as-is. The modal must already be open.
    pub async fn login(&self, username: &str, password: &str) -> Result<()> {
        tracing::debug!("Login: submit as '{}'", username);
        self.session
            .fill(&self.target(USERNAME_INPUT)?, username)
            .await?;
        self.session
            .fill(&self.target(PASSWORD_INPUT)?, password)
            .await?;
        self.session.click(&self.target(LOGIN_BUTTON)?).await
    }

    /// [`login`](Self::login) with a fixture record.
    pub async fn login_as(&self, credentials: &Credentials) -> Result<()> {
        self.login(credentials.username, credentials.password).await
    }

    /// Submits the form with a one-shot dialog capture armed around it.
    ///
    /// The storefront reports rejected logins with a native alert.
    pub async fn login_capturing(
        &self,
        username: &str,
        password: &str,
        response: DialogResponse,
        timeout: Duration,
    ) -> Result<CapturedDialog> {
        self.session
            .dialogs()
            .capture(response, timeout, self.login(username, password))
            .await
    }

    /// Whether the login modal is showing.
    pub async fn is_open(&self) -> Result<bool> {
        self.session.is_visible(&self.target(LOGIN_MODAL)?).await
    }

    /// Waits until the username input is visible.
    pub async fn wait_until_open(&self, timeout: Duration) -> Result<()> {
        self.session
            .wait_for(&self.target(USERNAME_INPUT)?, WaitState::Visible, timeout)
            .await
    }

    /// Clicks the modal's close control.
    pub async fn close(&self) -> Result<()> {
        tracing::debug!("Login: close modal");
        self.session.click(&self.target(CLOSE_BUTTON)?).await
    }
}

impl<S: Session + ?Sized> PageObject for LoginPage<'_, S> {
    const NAME: &'static str = "Login";

    fn selectors(&self) -> &SelectorMap {
        &self.selectors
    }
}
