// Shared helpers for the scenario and offline suites
//
// Note: Functions appear "unused" because each test binary compiles separately,
// but they ARE used across multiple test files. Suppress false-positive warnings.
#![allow(dead_code)]

use std::sync::Once;
use storefront_pom::driver::scripted::{Element, Reaction, ScriptedSession};
use storefront_pom::fixtures::{categories, products};
use storefront_pom::{
    CapturedDialog, DialogKind, DialogResponse, Error, HomePage, ProductPage, Session, SuiteConfig,
};
use tracing_subscriber::EnvFilter;

/// Installs a test-writer subscriber once per binary. `RUST_LOG` overrides
/// the default `storefront_pom=info` filter.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("storefront_pom=info"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// Loads the suite configuration from the environment and launches a browser.
#[cfg(feature = "playwright")]
pub async fn launch() -> storefront_pom::Result<(
    storefront_pom::SuiteConfig,
    storefront_pom::PlaywrightSession,
)> {
    init_tracing();
    let config = storefront_pom::SuiteConfig::from_env()?;
    let session = storefront_pom::PlaywrightSession::launch(&config).await?;
    Ok((config, session))
}

/// Opens `product` from the listing and adds it to the cart, accepting the
/// confirmation dialog.
///
/// A missing dialog is a soft pass: it is logged and `None` is returned, since
/// the storefront does not raise one reliably.
pub async fn add_product_to_cart<S: Session + ?Sized>(
    session: &S,
    config: &SuiteConfig,
    product: &str,
) -> storefront_pom::Result<Option<CapturedDialog>> {
    let home = HomePage::new(session);
    let product_page = ProductPage::new(session);

    home.select_product(product).await?;
    product_page.wait_until_loaded(config.wait_timeout()).await?;

    match product_page
        .add_to_cart_capturing(DialogResponse::Accept, config.dialog_timeout())
        .await
    {
        Ok(dialog) => Ok(Some(dialog)),
        Err(Error::DialogNotRaised { timeout_ms }) => {
            tracing::warn!(
                "No dialog within {}ms after adding '{}' to the cart",
                timeout_ms,
                product
            );
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

// ============================================================================
// Scripted storefront
// ============================================================================

pub const BASE_URL: &str = "https://store.test/";

/// Product wired to "Add to cart" in the scripted storefront.
pub const CART_PRODUCT: &str = products::SAMSUNG_GALAXY_S6;

pub const LOGIN_LINK: &str = "#login2";
pub const LOGOUT_LINK: &str = "#logout2";
pub const CART_LINK: &str = "#cartur";
pub const LOGIN_MODAL: &str = "#logInModal";
pub const LOGIN_MODAL_CLOSE: &str = "#logInModal .close";
pub const USERNAME_INPUT: &str = "#loginusername";
pub const PASSWORD_INPUT: &str = "#loginpassword";
pub const LOGIN_BUTTON: &str = r#"button[onclick="logIn()"]"#;
pub const ADD_TO_CART: &str = r#"a[onclick*="addToCart"]"#;
pub const PLACE_ORDER: &str = r##"button[data-target="#orderModal"]"##;
pub const ORDER_MODAL: &str = "#orderModal";
pub const ORDER_MODAL_CLOSE: &str = "#orderModal .close";
pub const PURCHASE_BUTTON: &str = r#"button[onclick="purchaseOrder()"]"#;
pub const CONFIRMATION_HEADING: &str = ".sweet-alert h2";
pub const CONFIRM_BUTTON: &str = ".sweet-alert .confirm";
pub const DELETE_LINKS: &str = r#"a[onclick*="deleteItem"]"#;
pub const CART_ROWS: &str = "#tbodyid >> tr";
pub const CART_TITLES: &str = "#tbodyid >> tr >> td:nth-child(2)";
pub const ORDER_INPUTS: [&str; 6] = ["#name", "#country", "#city", "#card", "#month", "#year"];

pub const WRONG_PASSWORD: &str = "Wrong password.";
pub const MISSING_CREDENTIALS: &str = "Please fill out Username and Password.";
pub const PRODUCT_ADDED: &str = "Product added.";
pub const PURCHASE_THANKS: &str = "Thank you for your purchase!";

/// How the scripted login form answers a submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Closes the modal and shows "Log out"
    Accept,
    /// Raises an alert and leaves the modal open
    Reject(&'static str),
}

pub fn cart_row_for(product: &str) -> String {
    format!("#tbodyid >> tr:has(td:text-is(\"{}\"))", product)
}

fn text_key(text: &str) -> String {
    format!("text=\"{}\"", text)
}

/// A scripted storefront with the listing, login modal, product pages, the
/// cart table and the order modal.
///
/// Every listed product opens a product page whose "Add to cart" raises the
/// added dialog. The cart only models one row, titled [`CART_PRODUCT`], and
/// that is the row any add inserts.
pub fn storefront(login: LoginOutcome) -> ScriptedSession {
    let mut session = ScriptedSession::new(BASE_URL)
        .expect("valid base URL")
        .with_element(LOGIN_LINK, Element::visible().with_text("Log in"))
        .with_element(LOGOUT_LINK, Element::hidden().with_text("Log out"))
        .with_element(CART_LINK, Element::visible().with_text("Cart"));

    for (i, product) in products::ALL.iter().enumerate() {
        session = session
            .with_element(".card", Element::visible())
            .with_element(".card-title", Element::visible().with_text(*product))
            .with_element(
                ".card-img-top",
                Element::visible().with_attribute("src", format!("imgs/product_{}.jpg", i + 1)),
            )
            .with_element(text_key(product), Element::visible());
    }

    for category in categories::ALL {
        session = session.with_element(text_key(category), Element::visible());
    }

    // Login modal
    let modal_keys = [
        LOGIN_MODAL,
        LOGIN_MODAL_CLOSE,
        USERNAME_INPUT,
        PASSWORD_INPUT,
        LOGIN_BUTTON,
    ];
    for key in modal_keys {
        session = session
            .with_element(key, Element::hidden())
            .on_click(LOGIN_LINK, Reaction::Show(key.into()))
            .on_click(LOGIN_MODAL_CLOSE, Reaction::Hide(key.into()));
    }
    match login {
        LoginOutcome::Accept => {
            for key in modal_keys {
                session = session.on_click(LOGIN_BUTTON, Reaction::Hide(key.into()));
            }
            session = session
                .on_click(LOGIN_BUTTON, Reaction::Show(LOGOUT_LINK.into()))
                .on_click(LOGIN_BUTTON, Reaction::Hide(LOGIN_LINK.into()));
        }
        LoginOutcome::Reject(message) => {
            session = session.on_click(
                LOGIN_BUTTON,
                Reaction::Dialog(DialogKind::Alert, message.into()),
            );
        }
    }

    // Product page and cart contents
    let row_for = cart_row_for(CART_PRODUCT);
    let delete_keys = [
        format!("{} >> nth=0", DELETE_LINKS),
        format!("{} >> nth=0 >> {}", CART_ROWS, DELETE_LINKS),
        format!("{} >> nth=0 >> {}", row_for, DELETE_LINKS),
    ];
    let cart_keys = [
        DELETE_LINKS.to_string(),
        CART_ROWS.to_string(),
        CART_TITLES.to_string(),
        row_for.clone(),
        delete_keys[1].clone(),
        delete_keys[2].clone(),
    ];

    session = session
        .with_element(ADD_TO_CART, Element::hidden())
        .on_goto("/prod.html", Reaction::Show(ADD_TO_CART.into()))
        .on_click(
            ADD_TO_CART,
            Reaction::Dialog(DialogKind::Alert, PRODUCT_ADDED.into()),
        )
        .on_click(
            ADD_TO_CART,
            Reaction::Insert(
                CART_TITLES.into(),
                Element::visible().with_text(CART_PRODUCT),
            ),
        );
    for product in products::ALL {
        session = session.on_click(text_key(product), Reaction::Navigate("/prod.html".into()));
    }
    for key in cart_keys.iter().filter(|key| key.as_str() != CART_TITLES) {
        session = session.on_click(
            ADD_TO_CART,
            Reaction::Insert(key.clone(), Element::visible()),
        );
    }
    for delete in &delete_keys {
        for key in &cart_keys {
            session = session.on_click(delete.clone(), Reaction::Clear(key.clone()));
        }
    }

    // Cart page and order modal
    let order_keys = [ORDER_MODAL, ORDER_MODAL_CLOSE, PURCHASE_BUTTON]
        .into_iter()
        .chain(ORDER_INPUTS);
    session = session
        .with_element("#tbodyid", Element::visible())
        .with_element(PLACE_ORDER, Element::hidden().with_text("Place Order"))
        .with_element(
            CONFIRMATION_HEADING,
            Element::hidden().with_text(PURCHASE_THANKS),
        )
        .with_element(CONFIRM_BUTTON, Element::hidden().with_text("OK"))
        .on_click(CART_LINK, Reaction::Navigate("/cart.html".into()))
        .on_goto("/cart.html", Reaction::Show(PLACE_ORDER.into()))
        .on_click(PURCHASE_BUTTON, Reaction::Show(CONFIRMATION_HEADING.into()))
        .on_click(PURCHASE_BUTTON, Reaction::Show(CONFIRM_BUTTON.into()))
        .on_click(CONFIRM_BUTTON, Reaction::Hide(CONFIRMATION_HEADING.into()))
        .on_click(CONFIRM_BUTTON, Reaction::Hide(CONFIRM_BUTTON.into()));
    for key in order_keys {
        session = session
            .with_element(key, Element::hidden())
            .on_click(PLACE_ORDER, Reaction::Show(key.into()))
            .on_click(ORDER_MODAL_CLOSE, Reaction::Hide(key.into()));
    }

    session
}

/// Makes each sidebar category replace the listing with its sample product.
pub fn with_category_filters(mut session: ScriptedSession) -> ScriptedSession {
    for category in categories::ALL {
        let product = categories::sample_product(category).expect("sample product");
        session = session
            .on_click(text_key(category), Reaction::Clear(".card-title".into()))
            .on_click(
                text_key(category),
                Reaction::Insert(".card-title".into(), Element::visible().with_text(product)),
            );
    }
    session
}
