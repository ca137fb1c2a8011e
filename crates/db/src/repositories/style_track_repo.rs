//! Repository for the `sim_style_songs` membership table.

use sqlx::PgPool;

use crate::models::style_track::StyleTrackRow;

/// Provides read access to style membership.
pub struct StyleTrackRepo;

impl StyleTrackRepo {
    /// List a style's tracks joined with their library metadata.
    ///
    /// Ordered by `library_song_id`, at most `limit` rows.
    pub async fn list_with_songs(
        pool: &PgPool,
        style_id: &str,
        limit: i64,
    ) -> Result<Vec<StyleTrackRow>, sqlx::Error> {
        sqlx::query_as::<_, StyleTrackRow>(
            "SELECT ss.library_song_id, ss.sim_duration_seconds, \
                    ls.id AS song_id, ls.artist, ls.title, ls.album, \
                    ls.peak_year, ls.run_time_seconds, ls.styles \
             FROM sim_style_songs ss \
             LEFT JOIN library_songs ls ON ls.id = ss.library_song_id \
             WHERE ss.style_id = $1 \
             ORDER BY ss.library_song_id \
             LIMIT $2",
        )
        .bind(style_id)
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// List only the member track ids of a style, at most `limit` rows.
    pub async fn list_track_ids(
        pool: &PgPool,
        style_id: &str,
        limit: i64,
    ) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT library_song_id FROM sim_style_songs \
             WHERE style_id = $1 \
             ORDER BY library_song_id \
             LIMIT $2",
        )
        .bind(style_id)
        .bind(limit)
        .fetch_all(pool)
        .await
    }
}
