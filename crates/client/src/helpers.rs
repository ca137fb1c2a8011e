//! Conveniences layered over [`OpusApiClient`] for the curation pages.

use std::collections::HashMap;
use std::future::Future;

use chrono::{DateTime, Utc};
use opus_core::classification::{class_display_name, normalize_class_code, ClassCode};

use crate::client::OpusApiClient;
use crate::error::ClientError;
use crate::models::{AssignmentUpdate, StyleSongRow, UpsertResult};

/// Fetch a style's members as display rows.
///
/// Rows with a missing or empty track id are dropped.
pub async fn fetch_style_song_rows(
    client: &OpusApiClient,
    style_id: &str,
) -> Result<Vec<StyleSongRow>, ClientError> {
    let tracks = client.get_style_tracks(style_id).await?;
    Ok(tracks
        .into_iter()
        .filter_map(|track| {
            let song_id = track.library_song_id.filter(|id| !id.is_empty())?;
            Some(StyleSongRow {
                song_id,
                sim_duration_seconds: track.sim_duration_seconds,
                song: track.song.map(Into::into),
            })
        })
        .collect())
}

/// Current class of one track, keyed by track id in [`fetch_assignment_map`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentState {
    pub class_code: String,
    pub moved_at: Option<DateTime<Utc>>,
}

/// Fetch a style's assignments as a map from track id to its class.
///
/// Rows without a track id are skipped. Should the server return the same
/// id twice, the later row wins.
pub async fn fetch_assignment_map(
    client: &OpusApiClient,
    style_id: &str,
) -> Result<HashMap<String, AssignmentState>, ClientError> {
    let rows = client.get_style_assignments(style_id).await?;
    Ok(rows
        .into_iter()
        .filter_map(|row| {
            let id = row.library_song_id.filter(|id| !id.is_empty())?;
            Some((
                id,
                AssignmentState {
                    class_code: row.class_code,
                    moved_at: row.moved_at,
                },
            ))
        })
        .collect())
}

/// Bulk-assign tracks, skipping the round trip when there is nothing to send.
///
/// Rows with an empty track id are dropped first; if no rows remain (or the
/// style id is blank) the call answers `{ok: true, upserted: 0}` locally.
pub async fn upsert_assignments(
    client: &OpusApiClient,
    style_id: &str,
    rows: &[AssignmentUpdate],
) -> Result<UpsertResult, ClientError> {
    let payload: Vec<AssignmentUpdate> = rows
        .iter()
        .filter(|r| !r.library_song_id.is_empty())
        .cloned()
        .collect();

    if payload.is_empty() || style_id.trim().is_empty() {
        return Ok(UpsertResult {
            ok: true,
            upserted: 0,
        });
    }

    client.update_style_assignments(style_id, &payload).await
}

/// Await a client call, logging a failure at `warn` instead of returning it.
///
/// For UI actions where an error is reported to the user and otherwise
/// ignored.
pub async fn best_effort<T, F>(action: &str, call: F) -> Option<T>
where
    F: Future<Output = Result<T, ClientError>>,
{
    match call.await {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(action, error = %e, status = ?e.status(), "Opus API call failed");
            None
        }
    }
}

/// Display name of a raw class code, with an optional per-style label.
///
/// Unrecognized or absent codes read as `"Uncategorized"`.
pub fn display_name(raw: Option<&str>, labels: &HashMap<ClassCode, String>) -> String {
    let code = normalize_class_code(raw);
    let label = code.and_then(|c| labels.get(&c)).map(String::as_str);
    class_display_name(code, label)
}
