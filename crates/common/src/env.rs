//! Environment/runtime helpers
//!
//! Sanity checks run once at startup, before the store is opened.

use std::path::Path;

use tracing::{info, warn};

/// Make sure the directory holding `data_file` exists and that `data_file`
/// itself, if present, is a regular file.
pub async fn ensure_data_dir(data_file: &str) -> anyhow::Result<()> {
    let path = Path::new(data_file);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", parent.display()))?;
    }
    match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_file() => {
            info!(%data_file, bytes = meta.len(), "using existing volunteer data file");
            Ok(())
        }
        Ok(_) => Err(anyhow::anyhow!("{data_file} exists but is not a regular file")),
        Err(_) => {
            warn!(%data_file, "volunteer data file not found; it will be created on first write");
            Ok(())
        }
    }
}
