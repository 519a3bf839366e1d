//! No-op strategy used when the caller declines media download

use super::{Transfer, TransferCapabilities};
use crate::error::TransferError;
use async_trait::async_trait;
use std::path::Path;

/// Transfer strategy that never fetches anything
///
/// Selected by the default `no` invocation mode. The orchestrator consults
/// [`TransferCapabilities::fetches`] and skips every item, so each media
/// item's `local_path` remains unset for the whole run.
pub struct NoopTransfer;

#[async_trait]
impl Transfer for NoopTransfer {
    async fn fetch(&self, _remote: &str, _dest: &Path) -> Result<(), TransferError> {
        Ok(())
    }

    fn capabilities(&self) -> TransferCapabilities {
        TransferCapabilities { fetches: false }
    }

    fn name(&self) -> &'static str {
        "noop"
    }
}
