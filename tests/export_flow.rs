//! End-to-end export flow against an in-memory row service, a mock
//! manifest endpoint, and a staged local archive tree. No real database or
//! network access.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tempfile::TempDir;
use tour_dl::{
    DatabaseError, Downloader, Error, LocalTransfer, MediaConfig, MediaFileRow, MediaKind,
    MediaResolver, NoopTransfer, NoteRow, Printer, Result, SectionRow, TourStore, TreeBuilder,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Minimal in-memory row service for driving the public pipeline.
#[derive(Default)]
struct MemoryStore {
    sections: Vec<SectionRow>,
    pages: HashMap<u32, Vec<i64>>,
    bodies: HashMap<i64, String>,
    media: HashMap<i64, Vec<MediaFileRow>>,
    titles: HashMap<(i64, i64), (Option<String>, Option<String>)>,
}

#[async_trait]
impl TourStore for MemoryStore {
    async fn tour_title(&self, _tour_id: i64) -> Result<String> {
        Ok("Ancient Rivers".to_string())
    }

    async fn module_title(&self, _tour_id: i64) -> Result<String> {
        Ok("Geography".to_string())
    }

    async fn sections(&self, _tour_id: i64) -> Result<Vec<SectionRow>> {
        Ok(self.sections.clone())
    }

    async fn page_ids(&self, _tour_id: i64, section_pos: u32) -> Result<Vec<i64>> {
        Ok(self.pages.get(&section_pos).cloned().unwrap_or_default())
    }

    async fn page_body(&self, page_id: i64) -> Result<String> {
        self.bodies.get(&page_id).cloned().ok_or_else(|| {
            Error::Database(DatabaseError::MissingRow(format!(
                "body text for page {page_id}"
            )))
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

    async fn page_questions(&self, _tour_id: i64, _page_id: i64) -> Result<Vec<String>> {
        Ok(vec!["What shaped this valley?".to_string()])
    }

    async fn page_vocabulary(&self, _tour_id: i64, _page_id: i64) -> Result<Vec<String>> {
        Ok(vec!["alluvium".to_string()])
    }

    async fn page_notes(&self, _page_id: i64) -> Result<Vec<NoteRow>> {
        Ok(Vec::new())
    }

    async fn user_first_name(&self, _access_id: i64) -> Result<Option<String>> {
        Ok(None)
    }

    async fn user_last_name(&self, _access_id: i64) -> Result<Option<String>> {
        Ok(None)
    }
}

fn file_row(media_id: i64, file_type: &str, file_name: &str, file_location: &str) -> MediaFileRow {
    MediaFileRow {
        media_id,
        file_type: file_type.to_string(),
        file_name: file_name.to_string(),
        file_location: file_location.to_string(),
    }
}

/// One tour, one section, one page with an image and a document.
fn store_with_media() -> MemoryStore {
    let mut store = MemoryStore::default();
    store.sections = vec![SectionRow {
        id: 90,
        title: "Sources".to_string(),
    }];
    store.pages.insert(1, vec![11]);
    store
        .bodies
        .insert(11, "<p>The river|s source</p>".to_string());
    // The document's storage path carries its trailing slash; the remote
    // path is the plain concatenation of directory and file name
    store.media.insert(
        11,
        vec![
            file_row(7, "image", "spring.jpg", "img42"),
            file_row(8, "document", "field-notes.pdf", "doc9/"),
        ],
    );
    store
        .titles
        .insert((7, 11), (Some("The spring".to_string()), None));
    store
}

/// Media templates pointing the manifest at the mock server and the archive
/// glob at the staged tree.
fn media_config(server_uri: &str, staged_root: &std::path::Path, out_root: &std::path::Path) -> MediaConfig {
    MediaConfig {
        manifest_url: format!("{server_uri}/media/{{path}}/log.txt"),
        media_dir: format!("{}/media/{{path}}", staged_root.display()),
        archive_dir: format!("{}/med_arc/*{{file}}", staged_root.display()),
        output_root: out_root.to_path_buf(),
    }
}

#[tokio::test]
async fn full_export_with_local_strategy_realizes_media() {
    let dir = TempDir::new().unwrap();
    let staged = dir.path().join("staged");

    // Archive tree: med_arc/<dir>/<file>, matched by the wildcard template
    std::fs::create_dir_all(staged.join("med_arc/arc42")).unwrap();
    std::fs::write(staged.join("med_arc/arc42/spring.jpg"), b"jpeg bytes").unwrap();
    // Pass-through document next to the media directory
    std::fs::create_dir_all(staged.join("media/doc9")).unwrap();
    std::fs::write(staged.join("media/doc9/field-notes.pdf"), b"pdf bytes").unwrap();

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/media/img42/log.txt"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("::Archive:/data/cmap/med_arc/arc42/spring.jpg\n"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let out_root = dir.path().join("out");
    std::fs::create_dir(&out_root).unwrap();

    let store: Arc<dyn TourStore> = Arc::new(store_with_media());
    let config = media_config(&server.uri(), &staged, &out_root);
    let resolver = MediaResolver::new(store.clone(), config.clone()).unwrap();
    let downloader = Downloader::new(Box::new(LocalTransfer), 42, &config.output_root).unwrap();
    let builder = TreeBuilder::new(store, resolver, downloader);

    let tour = builder.build_tour(42).await.unwrap();

    let media = &tour.sections[0].pages[0].media;
    assert_eq!(media.len(), 2);

    // Image first, resolved through the manifest, with recovered title
    assert_eq!(media[0].kind, MediaKind::Image);
    assert_eq!(media[0].title.as_deref(), Some("The spring"));
    let image_local = media[0].local_path.as_ref().expect("image downloaded");
    assert!(image_local.ends_with("section-1/page-11/spring.jpg"));
    assert_eq!(std::fs::read(image_local).unwrap(), b"jpeg bytes");

    // Document passed through verbatim and copied as-is
    assert_eq!(media[1].kind, MediaKind::Other);
    let doc_local = media[1].local_path.as_ref().expect("document downloaded");
    assert_eq!(std::fs::read(doc_local).unwrap(), b"pdf bytes");

    // Report and summary render with normalized text
    let mut printer = Printer::new();
    let mut out = Vec::new();
    printer.print_tour(&mut out, &tour).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("CONTENT FOR TOUR ID 42"));
    assert!(text.contains("The river's source"));

    let summary_path = dir.path().join("summary-tour-42.txt");
    printer.write_summary(&summary_path).unwrap();
    let summary = std::fs::read_to_string(summary_path).unwrap();
    assert_eq!(summary, "Page 11: <p>The river's source</p>");
}

#[tokio::test]
async fn noop_strategy_never_sets_local_paths() {
    let dir = TempDir::new().unwrap();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/media/img42/log.txt"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("::Archive:/data/cmap/med_arc/arc42/spring.jpg\n"),
        )
        .mount(&server)
        .await;

    let store: Arc<dyn TourStore> = Arc::new(store_with_media());
    let config = media_config(&server.uri(), dir.path(), dir.path());
    let resolver = MediaResolver::new(store.clone(), config.clone()).unwrap();
    let downloader = Downloader::new(Box::new(NoopTransfer), 42, &config.output_root).unwrap();
    let builder = TreeBuilder::new(store, resolver, downloader);

    let tour = builder.build_tour(42).await.unwrap();

    let media = &tour.sections[0].pages[0].media;
    assert_eq!(media.len(), 2);
    assert!(media.iter().all(|m| m.local_path.is_none()));
    // The resolved structure is still complete without downloads
    assert!(media[0].archive_path.is_some());
}

#[tokio::test]
async fn one_missing_payload_leaves_the_rest_of_the_page_intact() {
    let dir = TempDir::new().unwrap();
    let staged = dir.path().join("staged");
    // Only the document exists; the image archive tree is absent
    std::fs::create_dir_all(staged.join("media/doc9")).unwrap();
    std::fs::write(staged.join("media/doc9/field-notes.pdf"), b"pdf bytes").unwrap();

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/media/img42/log.txt"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("::Archive:/data/cmap/med_arc/arc42/spring.jpg\n"),
        )
        .mount(&server)
        .await;

    let out_root = dir.path().join("out");
    std::fs::create_dir(&out_root).unwrap();

    let store: Arc<dyn TourStore> = Arc::new(store_with_media());
    let config = media_config(&server.uri(), &staged, &out_root);
    let resolver = MediaResolver::new(store.clone(), config.clone()).unwrap();
    let downloader = Downloader::new(Box::new(LocalTransfer), 42, &config.output_root).unwrap();
    let builder = TreeBuilder::new(store, resolver, downloader);

    let tour = builder.build_tour(42).await.unwrap();

    let media = &tour.sections[0].pages[0].media;
    assert_eq!(media.len(), 2, "the failed item still appears in the tree");
    assert!(media[0].local_path.is_none(), "image transfer failed");
    assert!(media[1].local_path.is_some(), "document still downloaded");
}
