//! Content tree assembly from the row service
//!
//! Materializes the Tour → Section → Page structure level by level,
//! preserving the database's declared ordering, and populates each page's
//! cross-cutting collections. Media classification is delegated to the
//! [`MediaResolver`], byte transfer to the [`Downloader`]. Any single-row
//! lookup failure is a malformed underlying record and aborts the run.

use crate::db::TourStore;
use crate::downloader::Downloader;
use crate::error::Result;
use crate::resolver::MediaResolver;
use crate::types::{Note, Page, Section, Tour};
use std::sync::Arc;
use tracing::{debug, info};

/// Assembles the in-memory document for one tour
pub struct TreeBuilder {
    store: Arc<dyn TourStore>,
    resolver: MediaResolver,
    downloader: Downloader,
}

impl TreeBuilder {
    /// Create a builder over the given collaborators
    pub fn new(store: Arc<dyn TourStore>, resolver: MediaResolver, downloader: Downloader) -> Self {
        Self {
            store,
            resolver,
            downloader,
        }
    }

    /// Build the whole tree for one tour id
    pub async fn build_tour(&self, tour_id: i64) -> Result<Tour> {
        info!(tour_id, "building content tree");
        let title = self.store.tour_title(tour_id).await?;
        let module_title = self.store.module_title(tour_id).await?;
        let sections = self.build_sections(tour_id).await?;
        Ok(Tour {
            id: tour_id,
            title,
            module_title,
            sections,
        })
    }

    /// Build every section of a tour, in declared sequence order
    ///
    /// Pages are keyed on each section's 1-based position within the tour,
    /// not on its raw section id.
    pub async fn build_sections(&self, tour_id: i64) -> Result<Vec<Section>> {
        let mut sections = Vec::new();
        for (index, row) in self.store.sections(tour_id).await?.into_iter().enumerate() {
            let position = index as u32 + 1;
            debug!(tour_id, position, title = %row.title, "building section");
            let pages = self.build_pages(tour_id, position).await?;
            sections.push(Section {
                title: row.title,
                pages,
            });
        }
        Ok(sections)
    }

    /// Build every page of one section, in declared sequence order
    pub async fn build_pages(&self, tour_id: i64, section_pos: u32) -> Result<Vec<Page>> {
        let mut pages = Vec::new();
        for page_id in self.store.page_ids(tour_id, section_pos).await? {
            let body = self.store.page_body(page_id).await?;

            let media_rows = self.store.page_media(page_id).await?;
            let mut media = self.resolver.resolve_page(&media_rows, page_id).await?;
            self.downloader
                .realize_page(&mut media, section_pos, page_id)
                .await;

            let questions = self.store.page_questions(tour_id, page_id).await?;
            let vocabulary = self.store.page_vocabulary(tour_id, page_id).await?;
            let notes = self.build_notes(page_id).await?;

            pages.push(Page {
                id: page_id,
                body,
                media,
                questions,
                vocabulary,
                notes,
            });
        }
        Ok(pages)
    }

    /// Resolve each note row's author names through the access-id lookups
    async fn build_notes(&self, page_id: i64) -> Result<Vec<Note>> {
        let mut notes = Vec::new();
        for row in self.store.page_notes(page_id).await? {
            let first_name = self.store.user_first_name(row.user_access_id).await?;
            let last_name = self.store.user_last_name(row.user_access_id).await?;
            notes.push(Note {
                text: row.text,
                timestamp: row.timestamp,
                first_name,
                last_name,
            });
        }
        Ok(notes)
    }
}
