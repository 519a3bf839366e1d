//! Core document types assembled from the row service
//!
//! The whole tree is built once, top-down, for a single tour id, held in
//! memory for the duration of the run, and handed to the report renderer.
//! Nothing mutates it after construction except the download orchestrator,
//! which sets each [`Media::local_path`] at most once.

use chrono::NaiveDateTime;
use std::fmt;
use std::path::PathBuf;

/// The top-level document being exported
#[derive(Debug, Clone)]
pub struct Tour {
    /// Tour identifier supplied at invocation
    pub id: i64,
    /// Tour title
    pub title: String,
    /// Title of the module the tour belongs to
    pub module_title: String,
    /// Sections in declared sequence order
    pub sections: Vec<Section>,
}

/// An ordered grouping of pages within a tour
#[derive(Debug, Clone)]
pub struct Section {
    /// Section title
    pub title: String,
    /// Pages in declared sequence order
    pub pages: Vec<Page>,
}

/// A single content unit
#[derive(Debug, Clone)]
pub struct Page {
    /// Page identifier
    pub id: i64,
    /// Main body text (HTML)
    pub body: String,
    /// Resolved media, images first
    pub media: Vec<Media>,
    /// Journal questions in sequence order
    pub questions: Vec<String>,
    /// Distinct vocabulary words, alphabetically ordered
    pub vocabulary: Vec<String>,
    /// Reader annotations in timestamp order
    pub notes: Vec<Note>,
}

/// Classification of a resolved media item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    /// An image whose permanent location was discovered via a manifest
    Image,
    /// Any non-image asset, passed through verbatim
    Other,
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Image => write!(f, "image"),
            MediaKind::Other => write!(f, "other"),
        }
    }
}

/// One resolved asset attached to a page
#[derive(Debug, Clone)]
pub struct Media {
    /// Classification tag
    pub kind: MediaKind,
    /// Remote source path (media directory for images, full path otherwise)
    pub remote_path: String,
    /// Permanent archive location, images only
    pub archive_path: Option<String>,
    /// Locally persisted copy; stays `None` under the no-op strategy or
    /// when the transfer for this one item failed
    pub local_path: Option<PathBuf>,
    /// Human-authored title, when the metadata lookup matched
    pub title: Option<String>,
    /// Human-authored caption, when the metadata lookup matched
    pub caption: Option<String>,
}

impl Media {
    /// The path the transfer strategy should fetch: the archive location
    /// for images, the raw remote path for everything else
    pub fn source_path(&self) -> &str {
        self.archive_path.as_deref().unwrap_or(&self.remote_path)
    }
}

/// A reader annotation on a page
///
/// Author names are secondary lookups keyed by an opaque access id; an
/// absent user row leaves the field empty rather than failing the page.
#[derive(Debug, Clone)]
pub struct Note {
    /// Annotation text
    pub text: String,
    /// When the annotation was made
    pub timestamp: NaiveDateTime,
    /// Author first name, if the access id resolved
    pub first_name: Option<String>,
    /// Author last name, if the access id resolved
    pub last_name: Option<String>,
}
