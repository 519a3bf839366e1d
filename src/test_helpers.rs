//! Shared test fixtures: an in-memory row service and canned transfer
//! strategies.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::db::{MediaFileRow, NoteRow, SectionRow, TourStore};
use crate::error::{DatabaseError, Result, TransferError};
use crate::transfer::{Transfer, TransferCapabilities};
use async_trait::async_trait;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::collections::HashMap;
use std::io::Write;
use std::path::Path;

/// In-memory [`TourStore`] backed by plain maps
///
/// Pages are keyed by 1-based section position, matching the interface the
/// builder actually exercises. Required-row lookups (`page_body`) fail with
/// [`DatabaseError::MissingRow`] when the map has no entry.
#[derive(Default)]
pub(crate) struct FixtureStore {
    pub tour_title: String,
    pub module_title: String,
    pub sections: Vec<SectionRow>,
    pub pages: HashMap<u32, Vec<i64>>,
    pub bodies: HashMap<i64, String>,
    pub media: HashMap<i64, Vec<MediaFileRow>>,
    pub titles: HashMap<(i64, i64), (Option<String>, Option<String>)>,
    pub questions: HashMap<i64, Vec<String>>,
    pub vocabulary: HashMap<i64, Vec<String>>,
    pub notes: HashMap<i64, Vec<NoteRow>>,
    pub first_names: HashMap<i64, String>,
    pub last_names: HashMap<i64, String>,
}

#[async_trait]
impl TourStore for FixtureStore {
    async fn tour_title(&self, _tour_id: i64) -> Result<String> {
        Ok(self.tour_title.clone())
    }

    async fn module_title(&self, _tour_id: i64) -> Result<String> {
        Ok(self.module_title.clone())
    }

    async fn sections(&self, _tour_id: i64) -> Result<Vec<SectionRow>> {
        Ok(self.sections.clone())
    }

    async fn page_ids(&self, _tour_id: i64, section_pos: u32) -> Result<Vec<i64>> {
        Ok(self.pages.get(&section_pos).cloned().unwrap_or_default())
    }

    async fn page_body(&self, page_id: i64) -> Result<String> {
        self.bodies.get(&page_id).cloned().ok_or_else(|| {
            DatabaseError::MissingRow(format!("body text for page {page_id}")).into()
        })
    }

    async fn page_media(&self, page_id: i64) -> Result<Vec<MediaFileRow>> {
        Ok(self.media.get(&page_id).cloned().unwrap_or_default())
    }

    async fn media_title_caption(
        &self,
        media_id: i64,
        page_id: i64,
    ) -> Result<Option<(Option<String>, Option<String>)>> {
        Ok(self.titles.get(&(media_id, page_id)).cloned())
    }

    async fn page_questions(&self, _tour_id: i64, page_id: i64) -> Result<Vec<String>> {
        Ok(self.questions.get(&page_id).cloned().unwrap_or_default())
    }

    async fn page_vocabulary(&self, _tour_id: i64, page_id: i64) -> Result<Vec<String>> {
        Ok(self.vocabulary.get(&page_id).cloned().unwrap_or_default())
    }

    async fn page_notes(&self, page_id: i64) -> Result<Vec<NoteRow>> {
        Ok(self.notes.get(&page_id).cloned().unwrap_or_default())
    }

    async fn user_first_name(&self, access_id: i64) -> Result<Option<String>> {
        Ok(self.first_names.get(&access_id).cloned())
    }

    async fn user_last_name(&self, access_id: i64) -> Result<Option<String>> {
        Ok(self.last_names.get(&access_id).cloned())
    }
}

/// Strategy that fails every fetch with a connection error
pub(crate) struct FailingTransfer;

#[async_trait]
impl Transfer for FailingTransfer {
    async fn fetch(&self, _remote: &str, _dest: &Path) -> std::result::Result<(), TransferError> {
        Err(TransferError::Connection { code: 65 })
    }

    fn capabilities(&self) -> TransferCapabilities {
        TransferCapabilities { fetches: true }
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

/// Gzip-compress a byte slice, for staging compressed payload fixtures
pub(crate) fn gzip_bytes(content: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(content).unwrap();
    encoder.finish().unwrap()
}
