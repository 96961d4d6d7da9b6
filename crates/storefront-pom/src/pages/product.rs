// Product page object
//
// Detail view of a single product.

use super::PageObject;
use crate::dialog::{CapturedDialog, DialogResponse};
use crate::driver::{Session, WaitState};
use crate::error::Result;
use crate::selector::{Selector, SelectorMap};
use std::time::Duration;

const ADD_TO_CART_BUTTON: &str = "addToCartButton";

/// Product detail page.
pub struct ProductPage<'a, S: Session + ?Sized> {
    session: &'a S,
    selectors: SelectorMap,
}

impl<'a, S: Session + ?Sized> ProductPage<'a, S> {
    pub fn new(session: &'a S) -> Self {
        let selectors = SelectorMap::new(Self::NAME).with(
            ADD_TO_CART_BUTTON,
            Selector::attr_contains("a", "onclick", "addToCart"),
        );

        Self { session, selectors }
    }

    /// Clicks "Add to cart".
    ///
    /// The storefront answers with a native dialog. Nothing is armed here:
    /// without a capture the session accepts it as unhandled. Use
    /// [`add_to_cart_capturing`](Self::add_to_cart_capturing) to observe it.
    pub async fn add_to_cart(&self) -> Result<()> {
        tracing::debug!("Product: add to cart");
        self.session.click(&self.target(ADD_TO_CART_BUTTON)?).await
    }

    /// Clicks "Add to cart" with a one-shot dialog capture armed around it.
    ///
    /// # Errors
    ///
    /// Returns `Error::DialogNotRaised` if no dialog appears within `timeout`.
    pub async fn add_to_cart_capturing(
        &self,
        response: DialogResponse,
        timeout: Duration,
    ) -> Result<CapturedDialog> {
        self.session
            .dialogs()
            .capture(response, timeout, self.add_to_cart())
            .await
    }

    /// Waits until the "Add to cart" control is visible.
    pub async fn wait_until_loaded(&self, timeout: Duration) -> Result<()> {
        self.session
            .wait_for(
                &self.target(ADD_TO_CART_BUTTON)?,
                WaitState::Visible,
                timeout,
            )
            .await
    }
}

impl<S: Session + ?Sized> PageObject for ProductPage<'_, S> {
    const NAME: &'static str = "Product";

    fn selectors(&self) -> &SelectorMap {
        &self.selectors
    }
}
