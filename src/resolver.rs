//! Media classification, deduplication, and archive resolution
//!
//! Converts a page's unordered raw `(type, file name, storage path)` rows
//! into a deduplicated, classified, metadata-enriched media list. Image
//! directories are resolved to permanent archive locations by fetching a
//! per-directory manifest; everything else passes through verbatim.

use crate::config::MediaConfig;
use crate::db::{MediaFileRow, TourStore};
use crate::error::{Error, Result};
use crate::types::{Media, MediaKind};
use crate::utils::fill_template;
use regex::Regex;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

/// First line matching this marker names the authoritative archive location
const ARCHIVE_MARKER: &str = r"(?m)^::Archive:(.*)$";

/// Path segment separating the archive root from the per-file suffix
const ARCHIVE_ROOT_SEGMENT: &str = "med_arc";

/// Resolves raw media-file rows into classified [`Media`] items
pub struct MediaResolver {
    store: Arc<dyn TourStore>,
    client: reqwest::Client,
    archive_marker: Regex,
    config: MediaConfig,
}

impl MediaResolver {
    /// Create a resolver over the given row service and media templates
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built.
    pub fn new(store: Arc<dyn TourStore>, config: MediaConfig) -> Result<Self> {
        let archive_marker = Regex::new(ARCHIVE_MARKER).map_err(|e| Error::Config {
            message: format!("invalid archive marker pattern: {e}"),
            key: None,
        })?;
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            store,
            client,
            archive_marker,
            config,
        })
    }

    /// Resolve one page's raw rows into its media list
    ///
    /// Output ordering: images in the order their directories were first
    /// encountered, then other media in first-encountered order. A
    /// directory whose manifest cannot be fetched or parsed is logged and
    /// skipped (and never fetched again for this page); metadata misses
    /// leave title/caption empty. Only database failures propagate.
    pub async fn resolve_page(&self, rows: &[MediaFileRow], page_id: i64) -> Result<Vec<Media>> {
        let mut seen_dirs: HashSet<String> = HashSet::new();
        let mut images: Vec<(String, String)> = Vec::new(); // (media dir, archive path)
        let mut seen_others: HashSet<String> = HashSet::new();
        let mut others: Vec<String> = Vec::new();

        for row in rows {
            let media_dir = fill_template(&self.config.media_dir, &[("path", &row.file_location)]);

            if row.file_type == "image" {
                // Dedup on the computed directory, before any manifest fetch
                if !seen_dirs.insert(media_dir.clone()) {
                    continue;
                }
                match self.resolve_archive_path(&row.file_location).await {
                    Ok(archive_path) => images.push((media_dir, archive_path)),
                    Err(e) => {
                        warn!(
                            directory = %media_dir,
                            error = %e,
                            "manifest resolution failed, skipping directory"
                        );
                    }
                }
            } else {
                let remote = format!("{media_dir}{}", row.file_name);
                if seen_others.insert(remote.clone()) {
                    others.push(remote);
                }
            }
        }

        let mut media = Vec::with_capacity(images.len() + others.len());
        for (media_dir, archive_path) in images {
            let (title, caption) = self.lookup_title_caption(&media_dir, rows, page_id).await?;
            media.push(Media {
                kind: MediaKind::Image,
                remote_path: media_dir,
                archive_path: Some(archive_path),
                local_path: None,
                title,
                caption,
            });
        }
        for remote in others {
            media.push(Media {
                kind: MediaKind::Other,
                remote_path: remote,
                archive_path: None,
                local_path: None,
                title: None,
                caption: None,
            });
        }

        Ok(media)
    }

    /// Fetch the per-directory manifest and derive the archive location
    async fn resolve_archive_path(&self, file_location: &str) -> Result<String> {
        let url = fill_template(
            &self.config.manifest_url,
            &[("path", file_location.trim_matches('/'))],
        );

        let body = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let marked = self
            .archive_marker
            .captures(&body)
            .and_then(|captures| captures.get(1))
            .map(|m| m.as_str())
            .ok_or_else(|| Error::Manifest {
                url: url.clone(),
                reason: "no archive marker line".to_string(),
            })?;

        let suffix = marked
            .split_once(ARCHIVE_ROOT_SEGMENT)
            .map(|(_, rest)| rest.trim_matches('/'))
            .ok_or_else(|| Error::Manifest {
                url,
                reason: format!("archive marker does not contain '{ARCHIVE_ROOT_SEGMENT}'"),
            })?;

        Ok(fill_template(&self.config.archive_dir, &[("file", suffix)]))
    }

    /// Recover title/caption for one resolved image
    ///
    /// The image's short directory segment is matched by substring
    /// containment against every row's composite key. Exactly one distinct
    /// media id must match; zero or several leave the metadata empty. The
    /// containment heuristic assumes directory segments are unique enough
    /// within a page's media set.
    async fn lookup_title_caption(
        &self,
        media_dir: &str,
        rows: &[MediaFileRow],
        page_id: i64,
    ) -> Result<(Option<String>, Option<String>)> {
        let segment = media_dir.rsplit('/').next().unwrap_or(media_dir);

        let mut candidates: Vec<i64> = rows
            .iter()
            .filter(|row| row.composite_key().contains(segment))
            .map(|row| row.media_id)
            .collect();
        candidates.sort_unstable();
        candidates.dedup();

        let media_id = match candidates.as_slice() {
            [id] => *id,
            [] => {
                debug!(segment, "no media row matches directory segment");
                return Ok((None, None));
            }
            _ => {
                debug!(
                    segment,
                    candidates = candidates.len(),
                    "ambiguous directory segment match, leaving metadata empty"
                );
                return Ok((None, None));
            }
        };

        match self.store.media_title_caption(media_id, page_id).await? {
            Some((title, caption)) => Ok((title, caption)),
            None => Ok((None, None)),
        }
    }
}
