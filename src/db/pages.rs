//! Page-level queries: ids, body text, media-file rows, questions, vocabulary.

use crate::error::{DatabaseError, Result};
use sqlx::Row;

use super::{Database, MediaFileRow};

impl Database {
    /// Ordered page ids for the section at a 1-based position within a tour
    ///
    /// Pages are keyed on the section's declared sequence position, not its
    /// raw id; the builder passes the position it enumerated.
    pub(super) async fn query_page_ids(&self, tour_id: i64, section_pos: u32) -> Result<Vec<i64>> {
        let rows = sqlx::query(
            r#"
            SELECT n_section_page_id FROM t_section_page s
            INNER JOIN t_page p ON s.n_page_id = p.n_page_id
            INNER JOIN t_tour_section x ON s.n_tour_section_id = x.n_tour_section_id
            WHERE n_tour_id = ? AND x.n_sequence = ?
            ORDER BY s.n_sequence
            "#,
        )
        .bind(tour_id)
        .bind(section_pos)
        .fetch_all(&self.content)
        .await?;

        rows.into_iter().map(|row| Ok(row.try_get(0)?)).collect()
    }

    /// Main body text of a page; a page without body text is a malformed
    /// record and aborts the run
    pub(super) async fn query_page_body(&self, page_id: i64) -> Result<String> {
        let row = sqlx::query(
            r#"
            SELECT s_text FROM t_text t
            INNER JOIN t_page_text p ON t.n_text_id = p.n_text_id
            WHERE n_section_page_id = ?
            "#,
        )
        .bind(page_id)
        .fetch_optional(&self.content)
        .await?
        .ok_or_else(|| DatabaseError::MissingRow(format!("body text for page {page_id}")))?;

        Ok(row.try_get(0)?)
    }

    /// Raw media-file rows for a page
    ///
    /// Media ids come from the content schema (rows without a display mode),
    /// the file records behind them from the media schema. One media id can
    /// fan out to several file rows.
    pub(super) async fn query_page_media(&self, page_id: i64) -> Result<Vec<MediaFileRow>> {
        let id_rows = sqlx::query(
            r#"
            SELECT n_media_id FROM t_page_media
            WHERE n_section_page_id = ? AND s_mode IS NULL
            "#,
        )
        .bind(page_id)
        .fetch_all(&self.content)
        .await?;

        let mut files = Vec::new();
        for id_row in id_rows {
            let media_id: i64 = id_row.try_get(0)?;
            let info_rows = sqlx::query(
                r#"
                SELECT s_file, s_file_name, s_file_location FROM t_file f
                INNER JOIN t_file_subtype fs ON f.n_file_id = fs.n_file_id
                INNER JOIN t_media_subtype ms ON fs.n_file_subtype_id = ms.n_file_subtype_id
                WHERE ms.n_media_id = ?
                "#,
            )
            .bind(media_id)
            .fetch_all(&self.media)
            .await?;

            for row in info_rows {
                files.push(MediaFileRow {
                    media_id,
                    file_type: row.try_get(0)?,
                    file_name: row.try_get(1)?,
                    file_location: row.try_get(2)?,
                });
            }
        }

        Ok(files)
    }

    /// Title and caption for a `(media id, page id)` pair; absence is a
    /// tolerated metadata miss, not an error
    pub(super) async fn query_media_title_caption(
        &self,
        media_id: i64,
        page_id: i64,
    ) -> Result<Option<(Option<String>, Option<String>)>> {
        let row = sqlx::query(
            r#"
            SELECT s_title, s_caption FROM t_page_media
            WHERE n_media_id = ? AND n_section_page_id = ?
            "#,
        )
        .bind(media_id)
        .bind(page_id)
        .fetch_optional(&self.content)
        .await?;

        match row {
            Some(row) => Ok(Some((row.try_get(0)?, row.try_get(1)?))),
            None => Ok(None),
        }
    }

    /// Journal questions on a page, in sequence order
    pub(super) async fn query_page_questions(
        &self,
        _tour_id: i64,
        page_id: i64,
    ) -> Result<Vec<String>> {
        let rows = sqlx::query(
            r#"
            SELECT t_body FROM t_page_quiz p
            INNER JOIN t_quiz_question qq ON p.n_page_quiz_id = qq.n_page_quiz_id
            INNER JOIN t_ques_body q ON qq.n_quiz_ques_id = q.n_quiz_ques_id
            INNER JOIN t_body b ON q.n_body_id = b.n_body_id
            WHERE n_section_page_id = ?
            ORDER BY n_sequence
            "#,
        )
        .bind(page_id)
        .fetch_all(&self.content)
        .await?;

        rows.into_iter().map(|row| Ok(row.try_get(0)?)).collect()
    }

    /// Distinct vocabulary words on a page, alphabetically ordered
    pub(super) async fn query_page_vocabulary(
        &self,
        tour_id: i64,
        page_id: i64,
    ) -> Result<Vec<String>> {
        let rows = sqlx::query(
            r#"
            SELECT DISTINCT s_word FROM t_page_term p
            INNER JOIN t_word w ON p.n_word_id = w.n_word_id
            INNER JOIN t_tour_term t ON p.n_tour_term_id = t.n_tour_term_id
            WHERE n_tour_id = ? AND n_section_page_id = ?
            ORDER BY s_word
            "#,
        )
        .bind(tour_id)
        .bind(page_id)
        .fetch_all(&self.content)
        .await?;

        rows.into_iter().map(|row| Ok(row.try_get(0)?)).collect()
    }
}
