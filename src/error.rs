//! Error types for tour-dl
//!
//! Two propagation scopes exist:
//! - Structural errors ([`Error`]) abort the whole run: a missing required
//!   row, an unrecognized invocation mode, a failed database connection.
//! - Item-scoped errors ([`TransferError`], manifest resolution failures)
//!   are caught and logged where they occur and never escape the component
//!   that produced them.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for tour-dl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for tour-dl
///
/// Every variant here is fatal to the run when it reaches `main`; item-scoped
/// failures are handled before they are wrapped into this type.
#[derive(Debug, Error)]
pub enum Error {
    /// Unrecognized invocation mode or an otherwise unusable request
    /// (e.g. writing a body summary for a tour with zero pages)
    #[error("bad arguments: {0}")]
    BadArguments(String),

    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "transfer.command")
        key: Option<String>,
    },

    /// Database operation failed
    #[error("database error: {0}")]
    Database(#[from] DatabaseError),

    /// SQLx database error
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Manifest endpoint returned a body without a usable archive marker
    #[error("unusable manifest at {url}: {reason}")]
    Manifest {
        /// The manifest URL that was fetched
        url: String,
        /// Why the manifest could not be used
        reason: String,
    },

    /// Network error (manifest fetch)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Media transfer failed
    #[error("transfer error: {0}")]
    Transfer(#[from] TransferError),

    /// Serialization error (configuration file)
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Database-related errors
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Failed to connect to a database
    #[error("failed to connect to database {database}: {reason}")]
    ConnectionFailed {
        /// Which database the connection was for
        database: String,
        /// Driver-level failure description
        reason: String,
    },

    /// Query failed
    #[error("query failed: {0}")]
    QueryFailed(String),

    /// A required row was absent — the underlying record is malformed
    #[error("missing required row: {0}")]
    MissingRow(String),
}

/// Transfer-related errors, scoped to a single media item
///
/// The first three variants are derived from the transfer command's exit
/// status; which exit codes map to which variant is defined by the disjoint
/// code sets in [`crate::transfer`].
#[derive(Debug, Error)]
pub enum TransferError {
    /// The transfer command could not reach the remote host
    #[error("connection failure (exit code {code})")]
    Connection {
        /// Raw exit code of the transfer command
        code: i32,
    },

    /// The remote file could not be read
    #[error("remote file failure (exit code {code})")]
    RemoteFile {
        /// Raw exit code of the transfer command
        code: i32,
    },

    /// The local destination could not be written
    #[error("local file failure (exit code {code})")]
    LocalFile {
        /// Raw exit code of the transfer command
        code: i32,
    },

    /// The transfer command failed with a code outside every known set
    #[error("transfer command exited with unrecognized code {code}")]
    UnclassifiedExit {
        /// Raw exit code of the transfer command
        code: i32,
    },

    /// The transfer command could not be started at all
    #[error("failed to start transfer command: {0}")]
    Spawn(String),

    /// The local-copy source pattern was not a valid glob
    #[error("invalid source pattern {pattern}: {reason}")]
    Pattern {
        /// The offending glob pattern
        pattern: String,
        /// Parser-level failure description
        reason: String,
    },

    /// Filesystem error while copying a local match
    #[error("copy failed: {0}")]
    Io(#[from] std::io::Error),

    /// The strategy reported success but produced no payload
    #[error("no payload produced at {path}")]
    MissingPayload {
        /// Where the payload was expected
        path: PathBuf,
    },
}
