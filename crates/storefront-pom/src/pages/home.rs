// Home page object
//
// Entry screen: navigation links, the product listing and the category
// sidebar.

use super::PageObject;
use crate::driver::{Session, WaitState};
use crate::error::{Error, Result};
use crate::selector::{Selector, SelectorMap, Target};
use crate::wait::poll_until;
use std::time::Duration;

const LOGIN_LINK: &str = "loginLink";
const LOGOUT_LINK: &str = "logoutLink";
const CART_LINK: &str = "cartLink";
const PRODUCT_CARD: &str = "productCard";
const PRODUCT_TITLE: &str = "productTitle";
const PRODUCT_IMAGE: &str = "productImage";

/// Storefront landing page.
pub struct HomePage<'a, S: Session + ?Sized> {
    session: &'a S,
    selectors: SelectorMap,
}

impl<'a, S: Session + ?Sized> HomePage<'a, S> {
    pub fn new(session: &'a S) -> Self {
        let selectors = SelectorMap::new(Self::NAME)
            .with(LOGIN_LINK, Selector::id("login2"))
            .with(LOGOUT_LINK, Selector::id("logout2"))
            .with(CART_LINK, Selector::id("cartur"))
            .with(PRODUCT_CARD, Selector::css(".card"))
            .with(PRODUCT_TITLE, Selector::css(".card-title"))
            .with(PRODUCT_IMAGE, Selector::css(".card-img-top"));

        Self { session, selectors }
    }

    /// Navigates to the storefront root.
    pub async fn goto(&self) -> Result<()> {
        tracing::debug!("Home: goto");
        self.session.goto("/").await
    }

    /// Clicks the "Log in" link, starting the login modal's opening animation.
    ///
    /// Does not wait for the modal; safe to call while it is already open.
    pub async fn click_login(&self) -> Result<()> {
        tracing::debug!("Home: click login");
        self.session.click(&self.target(LOGIN_LINK)?).await
    }

    /// Clicks the "Log out" link.
    pub async fn click_logout(&self) -> Result<()> {
        tracing::debug!("Home: click logout");
        self.session.click(&self.target(LOGOUT_LINK)?).await
    }

    /// Clicks the "Cart" link.
    pub async fn click_cart(&self) -> Result<()> {
        tracing::debug!("Home: click cart");
        self.session.click(&self.target(CART_LINK)?).await
    }

    /// Opens the product whose visible label is exactly `name`.
    ///
    /// # Errors
    ///
    /// Fails with the driver's not-found/timeout error if no element on the
    /// current listing carries that exact, case-sensitive label.
    pub async fn select_product(&self, name: &str) -> Result<()> {
        tracing::debug!("Home: select product '{}'", name);
        self.session.click(&Target::new(Selector::text(name))).await
    }

    /// Filters the listing by the sidebar category labelled exactly `name`.
    pub async fn select_category(&self, name: &str) -> Result<()> {
        tracing::debug!("Home: select category '{}'", name);
        self.session.click(&Target::new(Selector::text(name))).await
    }

    /// Waits until the first product title is visible.
    pub async fn wait_for_listing(&self, timeout: Duration) -> Result<()> {
        self.session
            .wait_for(&self.target(PRODUCT_TITLE)?, WaitState::Visible, timeout)
            .await
    }

    /// Waits until the listing differs from `previous` and includes
    /// `product`, then returns the new titles.
    ///
    /// Filtering replaces the listing in place, so a plain visibility wait
    /// would resolve against the stale cards. Snapshot the titles with
    /// [`product_titles`](Self::product_titles) before the click.
    pub async fn wait_for_listing_change(
        &self,
        previous: &[String],
        product: &str,
        timeout: Duration,
    ) -> Result<Vec<String>> {
        let page = self;
        poll_until(
            || format!("listing to change and include '{}'", product),
            timeout,
            self.session.poll_interval(),
            || async move {
                let titles = page.product_titles().await?;
                Ok::<_, Error>(titles != previous && titles.iter().any(|t| t == product))
            },
        )
        .await?;
        self.product_titles().await
    }

    /// Titles of every product card currently listed.
    pub async fn product_titles(&self) -> Result<Vec<String>> {
        self.session
            .all_text_contents(&self.target(PRODUCT_TITLE)?)
            .await
    }

    pub async fn product_card_count(&self) -> Result<usize> {
        self.session.count(&self.target(PRODUCT_CARD)?).await
    }

    /// One target per product image, in listing order.
    pub async fn product_images(&self) -> Result<Vec<Target>> {
        self.session.all(&self.target(PRODUCT_IMAGE)?).await
    }

    /// Whether the "Log out" link is showing.
    pub async fn is_logged_in(&self) -> Result<bool> {
        self.session.is_visible(&self.target(LOGOUT_LINK)?).await
    }
}

impl<S: Session + ?Sized> PageObject for HomePage<'_, S> {
    const NAME: &'static str = "Home";

    fn selectors(&self) -> &SelectorMap {
        &self.selectors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::test_support::{assert_selector_names, session};

    #[test]
    fn test_selector_map_covers_actions() {
        let session = session();
        let page = HomePage::new(&session);
        assert_selector_names(
            page.selectors(),
            &[
                LOGIN_LINK,
                LOGOUT_LINK,
                CART_LINK,
                PRODUCT_CARD,
                PRODUCT_TITLE,
                PRODUCT_IMAGE,
            ],
        );
    }
}
