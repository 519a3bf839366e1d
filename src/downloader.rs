//! Download orchestration for resolved media items
//!
//! Owns the per-run output directory tree, derives a deterministic local
//! path for each item from its tour/section/page coordinates, drives the
//! active [`Transfer`] strategy, and gunzips compressed payloads before the
//! final write. Failure is isolated to the single item: a failed transfer
//! is logged with the offending remote path and the run continues.

use crate::error::{Result, TransferError};
use crate::transfer::Transfer;
use crate::types::Media;
use crate::utils::{remote_basename, strip_gz};
use flate2::read::GzDecoder;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Orchestrates local persistence of resolved media
pub struct Downloader {
    strategy: Box<dyn Transfer>,
    root_dir: PathBuf,
}

impl Downloader {
    /// Create the orchestrator and its per-run root directory
    ///
    /// The root is `<output_root>/tour-<id>-images`. A pre-existing root is
    /// tolerated and reported at info level; it is only created at all when
    /// the strategy actually fetches.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the root directory cannot be created.
    pub fn new(strategy: Box<dyn Transfer>, tour_id: i64, output_root: &Path) -> Result<Self> {
        let root_dir = output_root.join(format!("tour-{tour_id}-images"));

        if strategy.capabilities().fetches {
            match std::fs::create_dir(&root_dir) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    info!(dir = %root_dir.display(), "output directory already exists");
                }
                Err(e) => return Err(e.into()),
            }
        }

        Ok(Self { strategy, root_dir })
    }

    /// The per-run output root
    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Realize `local_path` for every media item on one page
    ///
    /// Items are processed in order, one blocking transfer at a time. An
    /// item whose transfer fails keeps `local_path` unset; the failure never
    /// aborts the page, section or run.
    pub async fn realize_page(&self, media: &mut [Media], section_pos: u32, page_id: i64) {
        if !self.strategy.capabilities().fetches {
            debug!(
                strategy = self.strategy.name(),
                page_id, "strategy does not fetch, leaving media unrealized"
            );
            return;
        }

        for item in media.iter_mut() {
            let source = item.source_path().to_string();
            match self.fetch_item(&source, section_pos, page_id).await {
                Ok(path) => item.local_path = Some(path),
                Err(e) => {
                    warn!(
                        remote = %source,
                        error = %e,
                        "media transfer failed, skipping item"
                    );
                }
            }
        }
    }

    /// Fetch one item into `root/section-<N>/page-<M>/<basename>` and
    /// return the path of the persisted (decompressed) artifact
    async fn fetch_item(&self, remote: &str, section_pos: u32, page_id: i64) -> Result<PathBuf> {
        let item_dir = self
            .root_dir
            .join(format!("section-{section_pos}"))
            .join(format!("page-{page_id}"));
        std::fs::create_dir_all(&item_dir)?;

        let basename = remote_basename(remote);
        let fetched = item_dir.join(&basename);

        self.strategy.fetch(remote, &fetched).await?;

        if !fetched.is_file() {
            return Err(TransferError::MissingPayload { path: fetched }.into());
        }

        if basename.ends_with(".gz") {
            let unzipped = item_dir.join(strip_gz(&basename));
            let mut decoder = GzDecoder::new(std::fs::File::open(&fetched)?);
            let mut out = std::fs::File::create(&unzipped)?;
            std::io::copy(&mut decoder, &mut out)?;
            Ok(unzipped)
        } else {
            Ok(fetched)
        }
    }
}
