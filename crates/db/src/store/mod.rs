//! The store gateway trait consumed by route handlers.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use opus_core::validation::{ValidAssignment, ValidWeight};

use crate::error::StoreError;
use crate::models::assignment::ClassAssignment;
use crate::models::style::Style;
use crate::models::style_track::StyleTrack;
use crate::models::weight::ClassWeight;

/// Filtered reads and writes over the style tables.
///
/// Implementations surface every failure as a [`StoreError`] and never
/// retry. Writes are overwrite-on-conflict: a later write for the same key
/// replaces the earlier one.
#[async_trait]
pub trait StyleStore: Send + Sync {
    /// Verify the backend is reachable.
    async fn health_check(&self) -> Result<(), StoreError>;

    /// All styles ordered by name.
    async fn list_styles(&self) -> Result<Vec<Style>, StoreError>;

    /// A style's tracks with library metadata, at most `limit` rows.
    async fn list_style_tracks(
        &self,
        style_id: &str,
        limit: usize,
    ) -> Result<Vec<StyleTrack>, StoreError>;

    /// A style's member track ids in fetch order, at most `limit` rows.
    async fn list_style_track_ids(
        &self,
        style_id: &str,
        limit: usize,
    ) -> Result<Vec<String>, StoreError>;

    /// All assignment rows of a style.
    async fn list_assignments(&self, style_id: &str) -> Result<Vec<ClassAssignment>, StoreError>;

    /// Insert or overwrite assignments. Keys in `rows` are unique.
    async fn upsert_assignments(
        &self,
        style_id: &str,
        rows: &[ValidAssignment],
    ) -> Result<u64, StoreError>;

    /// Delete assignments for the given tracks; returns the ids removed.
    async fn delete_assignments(
        &self,
        style_id: &str,
        song_ids: &[String],
    ) -> Result<Vec<String>, StoreError>;

    /// A style's weight rows ordered by class code.
    async fn list_weights(&self, style_id: &str) -> Result<Vec<ClassWeight>, StoreError>;

    /// Insert or overwrite weights. Class codes in `rows` are unique.
    async fn upsert_weights(&self, style_id: &str, rows: &[ValidWeight])
        -> Result<u64, StoreError>;
}
