//! Transfer strategies for fetching remote media payloads
//!
//! One of three interchangeable mechanisms copies a remote resource to a
//! local path: [`ScpTransfer`] shells out to a templated external command,
//! [`LocalTransfer`] resolves the remote argument as a filesystem glob (for
//! fixtures and offline tests), and [`NoopTransfer`] declines every fetch.
//! The strategy is selected once per run from the invocation mode flag, not
//! per item.

mod local;
mod noop;
mod scp;

// Re-exports
pub use local::LocalTransfer;
pub use noop::NoopTransfer;
pub use scp::ScpTransfer;

use crate::error::{Error, Result, TransferError};
use async_trait::async_trait;
use std::path::Path;

/// Capabilities of a transfer strategy implementation
#[derive(Debug, Clone, Copy)]
pub struct TransferCapabilities {
    /// Whether this strategy actually produces local payloads; when false
    /// the orchestrator skips items entirely and leaves `local_path` unset
    pub fetches: bool,
}

/// Trait for media transfer strategies
///
/// Implementations copy one remote resource to one local destination path.
/// Errors are scoped to the single item being fetched; the caller decides
/// whether to continue (it always does).
#[async_trait]
pub trait Transfer: Send + Sync {
    /// Copy `remote` to `dest`
    ///
    /// # Errors
    ///
    /// Returns a [`TransferError`] when the underlying mechanism fails:
    /// a non-zero exit from the external command (classified by exit code),
    /// an invalid glob pattern, or a filesystem copy failure.
    async fn fetch(&self, remote: &str, dest: &Path) -> std::result::Result<(), TransferError>;

    /// Query capabilities of this strategy
    fn capabilities(&self) -> TransferCapabilities;

    /// Human-readable name for logging
    fn name(&self) -> &'static str;
}

/// Invocation mode selecting the transfer strategy for the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferMode {
    /// `yes` — secure copy via the templated external command
    Scp,
    /// `local` — filesystem glob copy
    Local,
    /// `no` — decline every fetch
    Noop,
}

impl TransferMode {
    /// Parse the mode flag value, case-insensitively
    ///
    /// # Errors
    ///
    /// Unrecognized values fail fast with [`Error::BadArguments`] rather
    /// than silently defaulting.
    pub fn parse(value: &str) -> Result<Self> {
        match value.to_lowercase().as_str() {
            "yes" => Ok(TransferMode::Scp),
            "local" => Ok(TransferMode::Local),
            "no" => Ok(TransferMode::Noop),
            other => Err(Error::BadArguments(format!(
                "unrecognized download mode '{other}' (expected yes, local or no)"
            ))),
        }
    }
}
