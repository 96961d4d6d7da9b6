// Page objects
//
// One type per logical screen of the storefront. Each owns a fixed
// `SelectorMap` and borrows the scenario's `Session`. Nothing is cached
// between calls and actions never wait internally; the `wait_*` methods are
// there for the caller, who owns sequencing (for example waiting for the
// login modal before calling `login`).

mod cart;
mod checkout;
mod home;
mod login;
mod product;

pub use cart::CartPage;
pub use checkout::{CheckoutPage, OrderFormValues};
pub use home::HomePage;
pub use login::LoginPage;
pub use product::ProductPage;

use crate::error::Result;
use crate::selector::{SelectorMap, Target};

/// Common surface of every page object.
pub trait PageObject {
    /// Page name used in selector lookups and logs
    const NAME: &'static str;

    /// The page's selector map
    fn selectors(&self) -> &SelectorMap;

    /// Fresh target for a named selector.
    fn target(&self, name: &str) -> Result<Target> {
        self.selectors().target(name)
    }
}
