// Checkout page object
//
// The place-order modal: six inputs, the purchase button and the
// confirmation panel shown after a successful order.

use super::PageObject;
use crate::dialog::{CapturedDialog, DialogResponse};
use crate::driver::{Session, WaitState};
use crate::error::Result;
use crate::fixtures::{OrderField, OrderForm};
use crate::selector::{Selector, SelectorMap};
use std::time::Duration;

const NAME_INPUT: &str = "nameInput";
const COUNTRY_INPUT: &str = "countryInput";
const CITY_INPUT: &str = "cityInput";
const CARD_INPUT: &str = "cardInput";
const MONTH_INPUT: &str = "monthInput";
const YEAR_INPUT: &str = "yearInput";
const PURCHASE_BUTTON: &str = "purchaseButton";
const ORDER_MODAL: &str = "orderModal";
const CLOSE_BUTTON: &str = "closeButton";
const CONFIRMATION_HEADING: &str = "confirmationHeading";
const CONFIRM_BUTTON: &str = "confirmButton";

fn input_for(field: OrderField) -> &'static str {
    match field {
        OrderField::Name => NAME_INPUT,
        OrderField::Country => COUNTRY_INPUT,
        OrderField::City => CITY_INPUT,
        OrderField::CreditCard => CARD_INPUT,
        OrderField::Month => MONTH_INPUT,
        OrderField::Year => YEAR_INPUT,
    }
}

/// Values read back from the order form, one owned string per input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderFormValues {
    pub name: String,
    pub country: String,
    pub city: String,
    pub credit_card: String,
    pub month: String,
    pub year: String,
}

impl OrderFormValues {
    /// Value of one input.
    pub fn get(&self, field: OrderField) -> &str {
        match field {
            OrderField::Name => &self.name,
            OrderField::Country => &self.country,
            OrderField::City => &self.city,
            OrderField::CreditCard => &self.credit_card,
            OrderField::Month => &self.month,
            OrderField::Year => &self.year,
        }
    }

    fn slot(&mut self, field: OrderField) -> &mut String {
        match field {
            OrderField::Name => &mut self.name,
            OrderField::Country => &mut self.country,
            OrderField::City => &mut self.city,
            OrderField::CreditCard => &mut self.credit_card,
            OrderField::Month => &mut self.month,
            OrderField::Year => &mut self.year,
        }
    }

    /// Fields whose value differs from `order`, in form order.
    pub fn mismatches(&self, order: &OrderForm) -> Vec<OrderField> {
        order
            .fields()
            .into_iter()
            .filter(|(field, value)| self.get(*field) != *value)
            .map(|(field, _)| field)
            .collect()
    }
}

impl From<&OrderForm> for OrderFormValues {
    fn from(order: &OrderForm) -> Self {
        let mut values = Self::default();
        for (field, value) in order.fields() {
            *values.slot(field) = value.to_string();
        }
        values
    }
}

impl PartialEq<OrderForm> for OrderFormValues {
    fn eq(&self, other: &OrderForm) -> bool {
        self.mismatches(other).is_empty()
    }
}

/// Place-order modal.
pub struct CheckoutPage<'a, S: Session + ?Sized> {
    session: &'a S,
    selectors: SelectorMap,
}

impl<'a, S: Session + ?Sized> CheckoutPage<'a, S> {
    pub fn new(session: &'a S) -> Self {
        let selectors = SelectorMap::new(Self::NAME)
            .with(NAME_INPUT, Selector::id("name"))
            .with(COUNTRY_INPUT, Selector::id("country"))
            .with(CITY_INPUT, Selector::id("city"))
            .with(CARD_INPUT, Selector::id("card"))
            .with(MONTH_INPUT, Selector::id("month"))
            .with(YEAR_INPUT, Selector::id("year"))
            .with(
                PURCHASE_BUTTON,
                Selector::attr_equals("button", "onclick", "purchaseOrder()"),
            )
            .with(ORDER_MODAL, Selector::id("orderModal"))
            .with(CLOSE_BUTTON, Selector::css("#orderModal .close"))
            .with(CONFIRMATION_HEADING, Selector::css(".sweet-alert h2"))
            .with(CONFIRM_BUTTON, Selector::css(".sweet-alert .confirm"));

        Self { session, selectors }
    }

    /// Fills name, country, city, card, month and year, in that order,
    /// replacing whatever the inputs held. No validation is applied.
    pub async fn fill_order_form(&self, order: &OrderForm) -> Result<()> {
        tracing::debug!("Checkout: fill order form for '{}'", order.name);
        for (field, value) in order.fields() {
            self.session
                .fill(&self.target(input_for(field))?, value)
                .await?;
        }
        Ok(())
    }

    /// Current value of each of the six inputs.
    pub async fn field_values(&self) -> Result<OrderFormValues> {
        let mut values = OrderFormValues::default();
        for field in OrderField::ALL {
            *values.slot(field) = self
                .session
                .input_value(&self.target(input_for(field))?)
                .await?;
        }
        Ok(values)
    }

    /// Clicks "Purchase". Whether the order went through is for the caller
    /// to check; an empty form is a valid thing to submit.
    pub async fn purchase(&self) -> Result<()> {
        tracing::debug!("Checkout: purchase");
        self.session.click(&self.target(PURCHASE_BUTTON)?).await
    }

    /// Clicks "Purchase" with a one-shot dialog capture armed around it.
    ///
    /// The storefront rejects an incomplete form with a native alert.
    pub async fn purchase_capturing(
        &self,
        response: DialogResponse,
        timeout: Duration,
    ) -> Result<CapturedDialog> {
        self.session
            .dialogs()
            .capture(response, timeout, self.purchase())
            .await
    }

    /// Whether the order modal is showing.
    pub async fn is_open(&self) -> Result<bool> {
        self.session.is_visible(&self.target(ORDER_MODAL)?).await
    }

    /// Waits until the order modal's name input is visible.
    pub async fn wait_until_open(&self, timeout: Duration) -> Result<()> {
        self.session
            .wait_for(&self.target(NAME_INPUT)?, WaitState::Visible, timeout)
            .await
    }

    /// Clicks the modal's close control.
    pub async fn close(&self) -> Result<()> {
        tracing::debug!("Checkout: close modal");
        self.session.click(&self.target(CLOSE_BUTTON)?).await
    }

    /// Heading of the purchase confirmation panel, once it is showing.
    pub async fn confirmation_heading(&self, timeout: Duration) -> Result<String> {
        let heading = self.target(CONFIRMATION_HEADING)?;
        self.session
            .wait_for(&heading, WaitState::Visible, timeout)
            .await?;
        Ok(self
            .session
            .text_content(&heading)
            .await?
            .unwrap_or_default()
            .trim()
            .to_string())
    }

    /// Dismisses the purchase confirmation panel.
    pub async fn confirm(&self) -> Result<()> {
        tracing::debug!("Checkout: confirm purchase");
        self.session.click(&self.target(CONFIRM_BUTTON)?).await
    }
}

impl<S: Session + ?Sized> PageObject for CheckoutPage<'_, S> {
    const NAME: &'static str = "Checkout";

    fn selectors(&self) -> &SelectorMap {
        &self.selectors
    }
}
