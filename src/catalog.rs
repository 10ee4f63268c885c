use crate::config::BundleInfo;
use crate::document::{Document, Generated};
use crate::error::Result;
use crate::PRODUCT;

/// Index image serving the bundle, tagged with the bundle (not operator) version.
pub fn index_image(bundle: &BundleInfo) -> String {
    format!(
        "{}:{}-{}-{}",
        bundle.dev.index_image_name, bundle.version, bundle.release, bundle.dev.bundle_build
    )
}

pub fn catalog_name(bundle_version: &str) -> String {
    format!("{}-catalog-{}", PRODUCT, bundle_version)
}

/// Points the dev catalog source at the freshly built index image.
pub fn update_catalog_source(catalog_source: &Document, bundle: &BundleInfo) -> Result<Generated> {
    let mut catalog_source = catalog_source.clone();
    catalog_source.set(&["spec", "image"], index_image(bundle))?;
    catalog_source.set(&["metadata", "name"], catalog_name(&bundle.version))?;

    log::info!("Updated catalog source {}", catalog_source.path().display());

    Generated::from_document(catalog_source.path(), &catalog_source)
}

/// Makes the dev subscription start from the generated CSV.
pub fn update_subscription(subscription: &Document, csv_name: &str) -> Result<Generated> {
    let mut subscription = subscription.clone();
    subscription.set(&["spec", "startingCSV"], csv_name)?;

    log::info!("Updated subscription {}", subscription.path().display());

    Generated::from_document(subscription.path(), &subscription)
}
