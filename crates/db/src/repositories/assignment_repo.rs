//! Repository for the `sim_style_song_classes` table.
//!
//! One row per `(style_id, library_song_id)`; writes overwrite the class
//! and refresh `moved_at`.

use opus_core::validation::ValidAssignment;
use sqlx::PgPool;

use crate::models::assignment::ClassAssignment;

/// Column list shared across queries.
const COLUMNS: &str = "library_song_id, class_code, moved_at";

/// Provides read/write access to class assignments.
pub struct AssignmentRepo;

impl AssignmentRepo {
    /// List all assignments of a style.
    pub async fn list_by_style(
        pool: &PgPool,
        style_id: &str,
    ) -> Result<Vec<ClassAssignment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM sim_style_song_classes \
             WHERE style_id = $1 \
             ORDER BY moved_at, library_song_id"
        );
        sqlx::query_as::<_, ClassAssignment>(&query)
            .bind(style_id)
            .fetch_all(pool)
            .await
    }

    /// Insert or overwrite a batch of assignments for one style.
    ///
    /// The batch must not contain the same `library_song_id` twice; a
    /// single `ON CONFLICT DO UPDATE` statement cannot touch a row twice.
    pub async fn upsert_many(
        pool: &PgPool,
        style_id: &str,
        rows: &[ValidAssignment],
    ) -> Result<u64, sqlx::Error> {
        if rows.is_empty() {
            return Ok(0);
        }

        let song_ids: Vec<&str> = rows.iter().map(|r| r.library_song_id.as_str()).collect();
        let codes: Vec<&str> = rows.iter().map(|r| r.class_code.as_str()).collect();

        let result = sqlx::query(
            "INSERT INTO sim_style_song_classes (style_id, library_song_id, class_code) \
             SELECT $1, song_id, class_code \
             FROM UNNEST($2::text[], $3::text[]) AS t(song_id, class_code) \
             ON CONFLICT (style_id, library_song_id) DO UPDATE SET \
                 class_code = EXCLUDED.class_code, \
                 moved_at = now()",
        )
        .bind(style_id)
        .bind(&song_ids)
        .bind(&codes)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Delete the assignments of the given tracks, returning the ids removed.
    pub async fn delete_many(
        pool: &PgPool,
        style_id: &str,
        song_ids: &[String],
    ) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "DELETE FROM sim_style_song_classes \
             WHERE style_id = $1 AND library_song_id = ANY($2) \
             RETURNING library_song_id",
        )
        .bind(style_id)
        .bind(song_ids)
        .fetch_all(pool)
        .await
    }
}
