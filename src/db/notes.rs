//! Note queries: reader annotations and author name lookups.

use crate::error::Result;
use sqlx::Row;

use super::{Database, NoteRow};

impl Database {
    /// Reader annotations on a page, in timestamp order
    pub(super) async fn query_page_notes(&self, page_id: i64) -> Result<Vec<NoteRow>> {
        let rows = sqlx::query(
            r#"
            SELECT t_notes, n_user_access_id, t_timestamp FROM t_notes n
            INNER JOIN t_page_notes p ON n.n_notes_id = p.n_notes_id
            WHERE n_section_page_id = ?
            ORDER BY t_timestamp
            "#,
        )
        .bind(page_id)
        .fetch_all(&self.content)
        .await?;

        rows.into_iter()
            .map(|row| {
                Ok(NoteRow {
                    text: row.try_get(0)?,
                    user_access_id: row.try_get(1)?,
                    timestamp: row.try_get(2)?,
                })
            })
            .collect()
    }

    /// One name column behind an access id; an absent user row yields an
    /// empty result, not an error
    ///
    /// `column` is one of the two compile-time constants passed by the
    /// trait methods, never user input.
    pub(super) async fn query_user_name(
        &self,
        access_id: i64,
        column: &str,
    ) -> Result<Option<String>> {
        let sql = format!(
            r#"
            SELECT {column} FROM t_user u
            INNER JOIN t_user_access a ON u.n_user_id = a.n_user_id
            WHERE n_user_access_id = ?
            "#
        );

        let row = sqlx::query(&sql)
            .bind(access_id)
            .fetch_optional(&self.content)
            .await?;

        match row {
            Some(row) => Ok(row.try_get(0)?),
            None => Ok(None),
        }
    }
}
