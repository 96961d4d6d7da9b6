//! storefront-pom: Page Object Model end-to-end suite for a demo storefront
//!
//! Page objects for the storefront's Home, Product, Cart, Checkout and Login
//! screens, written against a small [`Session`] adapter so they run on a real
//! browser (feature `playwright`) or on the in-memory scripted session.
//!
//! # Examples
//!
//! ## Valid login
//!
//! ```ignore
//! use storefront_pom::fixtures::VALID_USER;
//! use storefront_pom::{HomePage, LoginPage, PlaywrightSession, SuiteConfig};
//!
//! #[tokio::main]
//! async fn main() -> storefront_pom::Result<()> {
//!     let config = SuiteConfig::from_env()?;
//!     let session = PlaywrightSession::launch(&config).await?;
//!
//!     let home = HomePage::new(&session);
//!     let login = LoginPage::new(&session);
//!
//!     home.goto().await?;
//!     home.click_login().await?;
//!     login.wait_until_open(config.wait_timeout()).await?;
//!     login.login_as(&VALID_USER).await?;
//!
//!     storefront_pom::expect(&session, storefront_pom::Selector::id("logout2"))
//!         .with_timeout(config.login_timeout())
//!         .to_be_visible()
//!         .await?;
//!
//!     session.close().await
//! }
//! ```
//!
//! ## Capturing a native dialog
//!
//! Dialogs go through the session's [`DialogRouter`]. Arm a one-shot capture
//! around the action that raises one:
//!
//! ```ignore
//! use storefront_pom::{DialogResponse, ProductPage};
//!
//! let product = ProductPage::new(&session);
//! let dialog = product
//!     .add_to_cart_capturing(DialogResponse::Accept, config.dialog_timeout())
//!     .await?;
//! assert!(config.added_dialog_regex()?.is_match(&dialog.message));
//! ```
//!
//! Dialogs raised with no capture armed are accepted and kept in
//! [`DialogRouter::unhandled`].

pub mod assertions;
pub mod config;
pub mod dialog;
pub mod driver;
mod error;
pub mod fixtures;
pub mod pages;
pub mod selector;
pub mod wait;

pub use error::{Error, Result};

pub use assertions::{Expectation, expect};

pub use config::{BrowserKind, SuiteConfig};

pub use dialog::{CapturedDialog, DialogCapture, DialogKind, DialogResponse, DialogRouter};

pub use driver::{Session, WaitState};

#[cfg(feature = "playwright")]
pub use driver::playwright::PlaywrightSession;

pub use pages::{
    CartPage, CheckoutPage, HomePage, LoginPage, OrderFormValues, PageObject, ProductPage,
};

pub use selector::{Selector, SelectorMap, Target};
