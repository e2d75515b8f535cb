//! Output: persist the PDF at its well-known path.
//!
//! The path is fixed per configuration and overwritten on every run. Bytes go
//! to a sibling `*.pdf.tmp` file first and are then renamed into place, so a
//! crash or full disk mid-write never leaves a truncated file under the final
//! name. Concurrent runs against the same path still race on the rename; the
//! last one wins.

use crate::error::ProposalError;
use std::path::Path;
use tracing::debug;

/// Write `bytes` to `path`, creating parent directories as needed.
pub async fn write_pdf(bytes: &[u8], path: &Path) -> Result<(), ProposalError> {
    let write_err = |source| ProposalError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(write_err)?;
    }

    let tmp_path = path.with_extension("pdf.tmp");
    if let Err(e) = tokio::fs::write(&tmp_path, bytes).await {
        let _ = tokio::fs::remove_file(&tmp_path).await;
        return Err(write_err(e));
    }

    if let Err(e) = tokio::fs::rename(&tmp_path, path).await {
        let _ = tokio::fs::remove_file(&tmp_path).await;
        return Err(write_err(e));
    }
    debug!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}
