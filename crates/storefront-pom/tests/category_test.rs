// Category filter scenarios against the live storefront

mod common;

use storefront_pom::fixtures::categories;
use storefront_pom::{Error, HomePage, Result};

/// Each category replaces the listing with one that includes its sample product.
#[tokio::test]
async fn test_category_filters() -> Result<()> {
    let (config, session) = common::launch().await?;
    let home = HomePage::new(&session);

    for category in categories::ALL {
        home.goto().await?;
        home.wait_for_listing(config.wait_timeout()).await?;
        let before = home.product_titles().await?;

        let sample = categories::sample_product(category)
            .ok_or_else(|| Error::Config(format!("no sample product for '{}'", category)))?;
        home.select_category(category).await?;

        let titles = home
            .wait_for_listing_change(&before, sample, config.wait_timeout())
            .await?;
        tracing::info!("{}: {:?}", category, titles);
        assert!(titles.iter().any(|title| title == sample), "{}", category);
    }

    session.close().await
}
