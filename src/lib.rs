//! # tour-dl
//!
//! Tour content export and media archival tool.
//!
//! Pulls a hierarchical tour document (tour → sections → pages →
//! media/notes/vocabulary) out of its relational store, resolves each
//! page's raw media references into locally-fetched archive copies or
//! pass-through remote paths, and renders the result as a report.
//!
//! ## Design
//!
//! - **Single-shot** — one tour, processed synchronously end to end, once.
//!   The async stack is plumbing, not parallelism: every query, manifest
//!   fetch and transfer is awaited in tree order.
//! - **Partial-failure tolerant where it matters** — a failed transfer or
//!   an unreachable manifest costs exactly one media item or directory; a
//!   malformed required row aborts the run.
//! - **Pluggable transfer** — secure copy over a templated external
//!   command, local filesystem copy for fixtures, or a no-op.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use tour_dl::{
//!     Config, Database, Downloader, MediaResolver, NoopTransfer, Printer, TourStore, TreeBuilder,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let store: Arc<dyn TourStore> = Arc::new(Database::connect(&config.database).await?);
//!
//!     let downloader = Downloader::new(Box::new(NoopTransfer), 42, &config.media.output_root)?;
//!     let resolver = MediaResolver::new(store.clone(), config.media.clone())?;
//!     let builder = TreeBuilder::new(store, resolver, downloader);
//!
//!     let tour = builder.build_tour(42).await?;
//!     let mut printer = Printer::new();
//!     printer.print_tour(&mut std::io::stdout().lock(), &tour)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Content tree assembly
pub mod builder;
/// Configuration types
pub mod config;
/// Row data service (trait and MySQL implementation)
pub mod db;
/// Download orchestration
pub mod downloader;
/// Error types
pub mod error;
/// Report rendering
pub mod report;
/// Media classification and archive resolution
pub mod resolver;
/// Transfer strategies
pub mod transfer;
/// Core document types
pub mod types;
/// Utility functions
pub mod utils;

#[cfg(test)]
pub(crate) mod test_helpers;

// Re-export commonly used types
pub use builder::TreeBuilder;
pub use config::{Config, DatabaseConfig, MediaConfig, TransferConfig};
pub use db::{Database, MediaFileRow, NoteRow, SectionRow, TourStore};
pub use downloader::Downloader;
pub use error::{DatabaseError, Error, Result, TransferError};
pub use report::{Printer, SEPARATOR};
pub use resolver::MediaResolver;
pub use transfer::{
    LocalTransfer, NoopTransfer, ScpTransfer, Transfer, TransferCapabilities, TransferMode,
};
pub use types::{Media, MediaKind, Note, Page, Section, Tour};
