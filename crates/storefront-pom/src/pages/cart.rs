// Cart page object
//
// The cart table plus the button that opens the place-order modal. Rows are
// addressed either by position or by the product name in their title cell,
// always scoped to the cart table.

use super::PageObject;
use crate::driver::{Session, WaitState};
use crate::error::Result;
use crate::selector::{Selector, SelectorMap, Target, escape_quotes};
use std::time::Duration;

const PLACE_ORDER_BUTTON: &str = "placeOrderButton";
const DELETE_BUTTONS: &str = "deleteButtons";
const CART_TABLE: &str = "cartTable";
const LINE_ITEM: &str = "lineItem";
const LINE_ITEM_TITLE: &str = "lineItemTitle";

/// Cart view.
pub struct CartPage<'a, S: Session + ?Sized> {
    session: &'a S,
    selectors: SelectorMap,
}

impl<'a, S: Session + ?Sized> CartPage<'a, S> {
    pub fn new(session: &'a S) -> Self {
        let selectors = SelectorMap::new(Self::NAME)
            .with(
                PLACE_ORDER_BUTTON,
                Selector::attr_equals("button", "data-target", "#orderModal"),
            )
            .with(
                DELETE_BUTTONS,
                Selector::attr_contains("a", "onclick", "deleteItem"),
            )
            .with(CART_TABLE, Selector::id("tbodyid"))
            .with(LINE_ITEM, Selector::css("tr"))
            .with(LINE_ITEM_TITLE, Selector::css("td:nth-child(2)"));

        Self { session, selectors }
    }

    /// Clicks "Place Order", opening the order modal.
    pub async fn place_order(&self) -> Result<()> {
        tracing::debug!("Cart: place order");
        self.session.click(&self.target(PLACE_ORDER_BUTTON)?).await
    }

    /// Deletes the first line item in document order.
    ///
    /// With several rows this does not say which product goes; use
    /// [`delete_item_at`](Self::delete_item_at) or
    /// [`delete_item_for`](Self::delete_item_for) to pick one.
    pub async fn delete_item(&self) -> Result<()> {
        tracing::debug!("Cart: delete first item");
        self.session
            .click(&self.target(DELETE_BUTTONS)?.first())
            .await
    }

    /// Deletes the line item in row `index` (zero-based) of the cart table.
    pub async fn delete_item_at(&self, index: usize) -> Result<()> {
        tracing::debug!("Cart: delete item {}", index);
        let target = self
            .rows()?
            .nth(index)
            .child(self.selectors.get(DELETE_BUTTONS)?.clone());
        self.session.click(&target).await
    }

    /// Deletes the line item whose title cell is exactly `product`.
    ///
    /// If the product was added more than once, the first of its rows goes.
    pub async fn delete_item_for(&self, product: &str) -> Result<()> {
        tracing::debug!("Cart: delete item '{}'", product);
        let target = self
            .row_for(product)?
            .first()
            .child(self.selectors.get(DELETE_BUTTONS)?.clone());
        self.session.click(&target).await
    }

    /// Product titles of every line item, in table order.
    pub async fn line_item_titles(&self) -> Result<Vec<String>> {
        let target = self
            .rows()?
            .child(self.selectors.get(LINE_ITEM_TITLE)?.clone());
        self.session.all_text_contents(&target).await
    }

    pub async fn line_item_count(&self) -> Result<usize> {
        self.session.count(&self.rows()?).await
    }

    /// Whether a row for `product` is in the table.
    pub async fn contains(&self, product: &str) -> Result<bool> {
        Ok(self.session.count(&self.row_for(product)?).await? > 0)
    }

    /// Waits until at least one line item is present.
    pub async fn wait_for_items(&self, timeout: Duration) -> Result<()> {
        self.session
            .wait_for(&self.rows()?, WaitState::Attached, timeout)
            .await
    }

    /// Waits until the row for `product` is present.
    pub async fn wait_for_item(&self, product: &str, timeout: Duration) -> Result<()> {
        self.session
            .wait_for(&self.row_for(product)?, WaitState::Attached, timeout)
            .await
    }

    /// Waits until no row for `product` remains.
    pub async fn wait_for_item_removed(&self, product: &str, timeout: Duration) -> Result<()> {
        self.session
            .wait_for(&self.row_for(product)?, WaitState::Detached, timeout)
            .await
    }

    fn rows(&self) -> Result<Target> {
        Ok(self
            .target(CART_TABLE)?
            .child(self.selectors.get(LINE_ITEM)?.clone()))
    }

    fn row_for(&self, product: &str) -> Result<Target> {
        let row = format!(
            "{}:has(td:text-is(\"{}\"))",
            self.selectors.get(LINE_ITEM)?,
            escape_quotes(product)
        );
        Ok(self.target(CART_TABLE)?.child(Selector::css(row)))
    }
}

impl<S: Session + ?Sized> PageObject for CartPage<'_, S> {
    const NAME: &'static str = "Cart";

    fn selectors(&self) -> &SelectorMap {
        &self.selectors
    }
}
