//! Wire types of the Opus API as seen by a client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use opus_core::playback_profile::{PlaybackMode, PlaybackProfile, Pool, Pools};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Style {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LibrarySong {
    pub id: String,
    pub artist: Option<String>,
    pub title: Option<String>,
    pub album: Option<String>,
    pub peak_year: Option<i32>,
    pub run_time_seconds: Option<i32>,
    pub styles: Option<String>,
}

/// One member of a style, with its library row when one exists.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StyleTrack {
    #[serde(default)]
    pub library_song_id: Option<String>,
    pub sim_duration_seconds: Option<i32>,
    pub song: Option<LibrarySong>,
}

/// A style member flattened for display: blank metadata reads as empty
/// text, a missing run time as zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleSongRow {
    pub song_id: String,
    pub sim_duration_seconds: Option<i32>,
    pub song: Option<SongSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SongSummary {
    pub id: String,
    pub artist: String,
    pub title: String,
    pub album: String,
    pub year: Option<i32>,
    pub run_time_seconds: i32,
    pub styles: String,
}

impl From<LibrarySong> for SongSummary {
    fn from(song: LibrarySong) -> Self {
        Self {
            id: song.id,
            artist: song.artist.unwrap_or_default(),
            title: song.title.unwrap_or_default(),
            album: song.album.unwrap_or_default(),
            year: song.peak_year,
            run_time_seconds: song.run_time_seconds.unwrap_or(0),
            styles: song.styles.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClassAssignment {
    #[serde(default)]
    pub library_song_id: Option<String>,
    pub class_code: String,
    pub moved_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClassWeight {
    pub class_code: String,
    pub weight_pct: Option<i32>,
}

/// A row of an assignment upsert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignmentUpdate {
    pub library_song_id: String,
    pub class_code: String,
}

/// A row of a weight upsert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeightUpdate {
    pub class_code: String,
    pub weight_pct: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct UpsertResult {
    pub ok: bool,
    pub upserted: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct DeleteResult {
    pub ok: bool,
    pub deleted: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Health {
    pub ok: bool,
}

/// `{ "data": T }` envelope of read endpoints.
#[derive(Debug, Deserialize)]
pub(crate) struct DataEnvelope<T> {
    pub(crate) data: T,
}

#[derive(Debug, Serialize)]
pub(crate) struct AssignmentsBody<'a> {
    pub(crate) assignments: &'a [AssignmentUpdate],
}

#[derive(Debug, Serialize)]
pub(crate) struct DeleteAssignmentsBody<'a> {
    #[serde(rename = "songIds")]
    pub(crate) song_ids: &'a [String],
}

#[derive(Debug, Serialize)]
pub(crate) struct WeightsBody<'a> {
    pub(crate) weights: &'a [WeightUpdate],
}

/// Server error body: `{ "error": { "message", "status" } }`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub(crate) error: Option<ErrorDetail>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorDetail {
    #[serde(default)]
    pub(crate) message: Option<String>,
    #[serde(default)]
    pub(crate) status: Option<u16>,
}
