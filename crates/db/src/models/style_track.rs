//! Style membership model with the joined library song.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Metadata from `library_songs` attached to a membership row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibrarySong {
    pub id: String,
    pub artist: Option<String>,
    pub title: Option<String>,
    pub album: Option<String>,
    pub peak_year: Option<i32>,
    pub run_time_seconds: Option<i32>,
    pub styles: Option<String>,
}

/// A `sim_style_songs` row in response shape.
///
/// `song` is `None` when the referenced library row does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleTrack {
    pub library_song_id: String,
    pub sim_duration_seconds: Option<i32>,
    pub song: Option<LibrarySong>,
}

/// Flat result of `sim_style_songs LEFT JOIN library_songs`.
#[derive(Debug, Clone, FromRow)]
pub struct StyleTrackRow {
    pub library_song_id: String,
    pub sim_duration_seconds: Option<i32>,
    pub song_id: Option<String>,
    pub artist: Option<String>,
    pub title: Option<String>,
    pub album: Option<String>,
    pub peak_year: Option<i32>,
    pub run_time_seconds: Option<i32>,
    pub styles: Option<String>,
}

impl From<StyleTrackRow> for StyleTrack {
    fn from(row: StyleTrackRow) -> Self {
        let song = row.song_id.map(|id| LibrarySong {
            id,
            artist: row.artist,
            title: row.title,
            album: row.album,
            peak_year: row.peak_year,
            run_time_seconds: row.run_time_seconds,
            styles: row.styles,
        });
        StyleTrack {
            library_song_id: row.library_song_id,
            sim_duration_seconds: row.sim_duration_seconds,
            song,
        }
    }
}
