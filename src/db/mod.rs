//! Row data service for tour content
//!
//! The content hierarchy lives in two MySQL schemas: the content schema
//! (tours, sections, pages, text, questions, vocabulary, notes, users) and
//! the media schema (file records behind each media id). [`Database`] holds
//! one pool per schema and implements [`TourStore`], the interface the tree
//! builder and media resolver are written against.
//!
//! ## Submodules
//!
//! Methods on [`Database`] are organized by domain:
//! - [`tours`] — tour/module titles and section listing
//! - [`pages`] — page ids, body text, media-file rows, questions, vocabulary
//! - [`notes`] — reader annotations and author name lookups

use crate::config::DatabaseConfig;
use crate::error::{DatabaseError, Result};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};

mod notes;
mod pages;
mod tours;

/// One `(section id, title)` row, in declared sequence order
#[derive(Debug, Clone)]
pub struct SectionRow {
    /// Database section identifier
    pub id: i64,
    /// Section title
    pub title: String,
}

/// One raw media-file row for a page
///
/// `media_id` comes from the content schema, the three file fields from the
/// media schema; the two identifier spaces are only loosely connected, which
/// is why the resolver cross-references them by composite key.
#[derive(Debug, Clone)]
pub struct MediaFileRow {
    /// Database-assigned media id (content schema)
    pub media_id: i64,
    /// File type tag (`image` or anything else)
    pub file_type: String,
    /// File name within the storage directory
    pub file_name: String,
    /// Storage path relative to the base media directory
    pub file_location: String,
}

impl MediaFileRow {
    /// Concatenation of the raw field strings, used as the loose key for
    /// title/caption recovery
    pub fn composite_key(&self) -> String {
        format!("{}{}{}", self.file_type, self.file_name, self.file_location)
    }
}

/// One reader annotation row, before author name resolution
#[derive(Debug, Clone)]
pub struct NoteRow {
    /// Annotation text
    pub text: String,
    /// Opaque access id resolving to the author
    pub user_access_id: i64,
    /// When the annotation was made
    pub timestamp: NaiveDateTime,
}

/// Interface of the row data service
///
/// Every ordered result preserves the database's declared sequence order;
/// callers never re-sort. Single-row lookups that find no row return an
/// error for required records (`tour_title`, `page_body`) and `None`/empty
/// for optional ones (title/caption, author names).
#[async_trait]
pub trait TourStore: Send + Sync {
    /// Title of a tour (required row)
    async fn tour_title(&self, tour_id: i64) -> Result<String>;

    /// Title of the module a tour belongs to (required row)
    async fn module_title(&self, tour_id: i64) -> Result<String>;

    /// Ordered `(section id, title)` rows for a tour
    async fn sections(&self, tour_id: i64) -> Result<Vec<SectionRow>>;

    /// Ordered page ids for the section at a 1-based position within a tour
    async fn page_ids(&self, tour_id: i64, section_pos: u32) -> Result<Vec<i64>>;

    /// Main body text of a page (required row)
    async fn page_body(&self, page_id: i64) -> Result<String>;

    /// Raw media-file rows for a page
    async fn page_media(&self, page_id: i64) -> Result<Vec<MediaFileRow>>;

    /// Title and caption for a `(media id, page id)` pair, if recorded
    async fn media_title_caption(
        &self,
        media_id: i64,
        page_id: i64,
    ) -> Result<Option<(Option<String>, Option<String>)>>;

    /// Journal questions on a page, in sequence order
    async fn page_questions(&self, tour_id: i64, page_id: i64) -> Result<Vec<String>>;

    /// Distinct vocabulary words on a page, alphabetically ordered
    async fn page_vocabulary(&self, tour_id: i64, page_id: i64) -> Result<Vec<String>>;

    /// Reader annotations on a page, in timestamp order
    async fn page_notes(&self, page_id: i64) -> Result<Vec<NoteRow>>;

    /// First name behind an access id, when the user row exists
    async fn user_first_name(&self, access_id: i64) -> Result<Option<String>>;

    /// Last name behind an access id, when the user row exists
    async fn user_last_name(&self, access_id: i64) -> Result<Option<String>>;
}

/// MySQL-backed row data service
pub struct Database {
    pub(crate) content: MySqlPool,
    pub(crate) media: MySqlPool,
}

impl Database {
    /// Connect to both schemas
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::ConnectionFailed`] naming the schema that
    /// could not be reached.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let content = Self::pool(config, &config.content_db).await?;
        let media = Self::pool(config, &config.media_db).await?;
        Ok(Self { content, media })
    }

    async fn pool(config: &DatabaseConfig, database: &str) -> Result<MySqlPool> {
        let url = format!(
            "mysql://{}:{}@{}/{}",
            config.username, config.password, config.host, database
        );
        let pool = MySqlPoolOptions::new()
            .max_connections(1)
            .connect(&url)
            .await
            .map_err(|e| DatabaseError::ConnectionFailed {
                database: database.to_string(),
                reason: e.to_string(),
            })?;
        Ok(pool)
    }
}

#[async_trait]
impl TourStore for Database {
    async fn tour_title(&self, tour_id: i64) -> Result<String> {
        self.query_tour_title(tour_id).await
    }

    async fn module_title(&self, tour_id: i64) -> Result<String> {
        self.query_module_title(tour_id).await
    }

    async fn sections(&self, tour_id: i64) -> Result<Vec<SectionRow>> {
        self.query_sections(tour_id).await
    }

    async fn page_ids(&self, tour_id: i64, section_pos: u32) -> Result<Vec<i64>> {
        self.query_page_ids(tour_id, section_pos).await
    }

    async fn page_body(&self, page_id: i64) -> Result<String> {
        self.query_page_body(page_id).await
    }

    async fn page_media(&self, page_id: i64) -> Result<Vec<MediaFileRow>> {
        self.query_page_media(page_id).await
    }

    async fn media_title_caption(
        &self,
        media_id: i64,
        page_id: i64,
    ) -> Result<Option<(Option<String>, Option<String>)>> {
        self.query_media_title_caption(media_id, page_id).await
    }

    async fn page_questions(&self, tour_id: i64, page_id: i64) -> Result<Vec<String>> {
        self.query_page_questions(tour_id, page_id).await
    }

    async fn page_vocabulary(&self, tour_id: i64, page_id: i64) -> Result<Vec<String>> {
        self.query_page_vocabulary(tour_id, page_id).await
    }

    async fn page_notes(&self, page_id: i64) -> Result<Vec<NoteRow>> {
        self.query_page_notes(page_id).await
    }

    async fn user_first_name(&self, access_id: i64) -> Result<Option<String>> {
        self.query_user_name(access_id, "s_first_name").await
    }

    async fn user_last_name(&self, access_id: i64) -> Result<Option<String>> {
        self.query_user_name(access_id, "s_last_name").await
    }
}
