//! Local-filesystem strategy for fixtures and offline runs

use super::{Transfer, TransferCapabilities};
use crate::error::TransferError;
use async_trait::async_trait;
use std::path::Path;

/// Transfer strategy that resolves the remote argument as a filesystem glob
///
/// Every match is copied into the destination's directory under its own
/// file name. Used for tests and offline runs where the archive tree is
/// mounted or staged locally; a pattern with zero matches copies nothing,
/// which the orchestrator reports as a missing payload for the item.
pub struct LocalTransfer;

#[async_trait]
impl Transfer for LocalTransfer {
    async fn fetch(&self, remote: &str, dest: &Path) -> Result<(), TransferError> {
        let dest_dir = dest.parent().unwrap_or(Path::new("."));

        let matches = glob::glob(remote).map_err(|e| TransferError::Pattern {
            pattern: remote.to_string(),
            reason: e.to_string(),
        })?;

        for entry in matches {
            let source = entry.map_err(|e| TransferError::Io(e.into_error()))?;
            let target = match source.file_name() {
                Some(name) => dest_dir.join(name),
                None => continue, // glob matched a directory-like path
            };
            std::fs::copy(&source, &target)?;
        }

        Ok(())
    }

    fn capabilities(&self) -> TransferCapabilities {
        TransferCapabilities { fetches: true }
    }

    fn name(&self) -> &'static str {
        "local-copy"
    }
}
