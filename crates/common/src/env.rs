//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use tracing::warn;

/// Check that the static form directory exists; returns whether it was found.
///
/// A missing directory is not fatal: the SOAP endpoint keeps working, only
/// the browser form will 404.
pub async fn ensure_public_dir(public_dir: &str) -> anyhow::Result<bool> {
    match tokio::fs::metadata(public_dir).await {
        Ok(meta) if meta.is_dir() => Ok(true),
        Ok(_) => Err(anyhow::anyhow!("{public_dir} exists but is not a directory")),
        Err(_) => {
            warn!(%public_dir, "public assets directory not found; enrollment form will 404");
            Ok(false)
        }
    }
}
