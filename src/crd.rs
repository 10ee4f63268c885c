use crate::document::Document;
use crate::error::Result;

const CREATION_TIMESTAMP: &[&str] = &["metadata", "creationTimestamp"];

/// Drops the creation timestamp left over from exporting the CRD out of a live cluster.
///
/// The raw template must still carry the field. If it doesn't, the template changed shape
/// and needs a look, so this fails instead of passing it through.
pub fn normalize(template: &Document) -> Result<Document> {
    let mut crd = template.clone();
    crd.remove(CREATION_TIMESTAMP)?;
    log::info!("Normalized CRD from {}", template.path().display());
    Ok(crd)
}
