//! [`StyleStore`] backed by Postgres through the repositories.

use async_trait::async_trait;
use opus_core::validation::{ValidAssignment, ValidWeight};

use super::StyleStore;
use crate::error::StoreError;
use crate::models::assignment::ClassAssignment;
use crate::models::style::Style;
use crate::models::style_track::StyleTrack;
use crate::models::weight::ClassWeight;
use crate::repositories::{AssignmentRepo, StyleRepo, StyleTrackRepo, WeightRepo};
use crate::DbPool;

#[derive(Clone)]
pub struct PgStyleStore {
    pool: DbPool,
}

impl PgStyleStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn sql_limit(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

#[async_trait]
impl StyleStore for PgStyleStore {
    async fn health_check(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }

    async fn list_styles(&self) -> Result<Vec<Style>, StoreError> {
        Ok(StyleRepo::list(&self.pool).await?)
    }

    async fn list_style_tracks(
        &self,
        style_id: &str,
        limit: usize,
    ) -> Result<Vec<StyleTrack>, StoreError> {
        let rows = StyleTrackRepo::list_with_songs(&self.pool, style_id, sql_limit(limit)).await?;
        Ok(rows.into_iter().map(StyleTrack::from).collect())
    }

    async fn list_style_track_ids(
        &self,
        style_id: &str,
        limit: usize,
    ) -> Result<Vec<String>, StoreError> {
        Ok(StyleTrackRepo::list_track_ids(&self.pool, style_id, sql_limit(limit)).await?)
    }

    async fn list_assignments(&self, style_id: &str) -> Result<Vec<ClassAssignment>, StoreError> {
        Ok(AssignmentRepo::list_by_style(&self.pool, style_id).await?)
    }

    async fn upsert_assignments(
        &self,
        style_id: &str,
        rows: &[ValidAssignment],
    ) -> Result<u64, StoreError> {
        Ok(AssignmentRepo::upsert_many(&self.pool, style_id, rows).await?)
    }

    async fn delete_assignments(
        &self,
        style_id: &str,
        song_ids: &[String],
    ) -> Result<Vec<String>, StoreError> {
        Ok(AssignmentRepo::delete_many(&self.pool, style_id, song_ids).await?)
    }

    async fn list_weights(&self, style_id: &str) -> Result<Vec<ClassWeight>, StoreError> {
        Ok(WeightRepo::list_by_style(&self.pool, style_id).await?)
    }

    async fn upsert_weights(
        &self,
        style_id: &str,
        rows: &[ValidWeight],
    ) -> Result<u64, StoreError> {
        Ok(WeightRepo::upsert_many(&self.pool, style_id, rows).await?)
    }
}
