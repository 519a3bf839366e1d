//! Tour-level queries: titles and section listing.

use crate::error::{DatabaseError, Result};
use sqlx::Row;

use super::{Database, SectionRow};

impl Database {
    /// Title of a tour; a missing row means the tour id is unknown
    pub(super) async fn query_tour_title(&self, tour_id: i64) -> Result<String> {
        let row = sqlx::query("SELECT s_tour FROM t_tour WHERE n_tour_id = ?")
            .bind(tour_id)
            .fetch_optional(&self.content)
            .await?
            .ok_or_else(|| DatabaseError::MissingRow(format!("title for tour {tour_id}")))?;

        Ok(row.try_get(0)?)
    }

    /// Title of the module a tour belongs to
    pub(super) async fn query_module_title(&self, tour_id: i64) -> Result<String> {
        let row = sqlx::query(
            r#"
            SELECT s_module FROM t_module
            INNER JOIN t_module_tour ON t_module_tour.n_module_id = t_module.n_module_id
            WHERE n_tour_id = ?
            "#,
        )
        .bind(tour_id)
        .fetch_optional(&self.content)
        .await?
        .ok_or_else(|| DatabaseError::MissingRow(format!("module title for tour {tour_id}")))?;

        Ok(row.try_get(0)?)
    }

    /// Ordered `(section id, title)` rows for a tour
    pub(super) async fn query_sections(&self, tour_id: i64) -> Result<Vec<SectionRow>> {
        let rows = sqlx::query(
            r#"
            SELECT n_tour_section_id, s_section FROM t_tour_section t
            INNER JOIN t_section s ON t.n_section_id = s.n_section_id
            WHERE n_tour_id = ?
            ORDER BY n_sequence
            "#,
        )
        .bind(tour_id)
        .fetch_all(&self.content)
        .await?;

        rows.into_iter()
            .map(|row| {
                Ok(SectionRow {
                    id: row.try_get(0)?,
                    title: row.try_get(1)?,
                })
            })
            .collect()
    }
}
