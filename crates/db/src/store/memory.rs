//! In-process [`StyleStore`] used by tests and local tooling.
//!
//! Mirrors the ordering and overwrite behaviour of the Postgres store.
//! Rows can also be seeded directly, including rows the Postgres schema
//! would reject (duplicates, unknown class codes), to exercise readers.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use opus_core::validation::{ValidAssignment, ValidWeight};
use tokio::sync::RwLock;

use super::StyleStore;
use crate::error::StoreError;
use crate::models::assignment::ClassAssignment;
use crate::models::style::Style;
use crate::models::style_track::{LibrarySong, StyleTrack};
use crate::models::weight::ClassWeight;

#[derive(Debug, Clone)]
struct MembershipRow {
    style_id: String,
    library_song_id: String,
    sim_duration_seconds: Option<i32>,
}

#[derive(Debug, Default)]
struct Tables {
    styles: Vec<Style>,
    songs: HashMap<String, LibrarySong>,
    memberships: Vec<MembershipRow>,
    assignments: Vec<(String, ClassAssignment)>,
    weights: Vec<(String, ClassWeight)>,
    /// When set, every operation fails with this message.
    failure: Option<String>,
}

impl Tables {
    fn check(&self) -> Result<(), StoreError> {
        match &self.failure {
            Some(msg) => Err(StoreError::Unavailable(msg.clone())),
            None => Ok(()),
        }
    }

    fn sorted_memberships(&self, style_id: &str, limit: usize) -> Vec<&MembershipRow> {
        let mut rows: Vec<&MembershipRow> = self
            .memberships
            .iter()
            .filter(|m| m.style_id == style_id)
            .collect();
        rows.sort_by(|a, b| a.library_song_id.cmp(&b.library_song_id));
        rows.truncate(limit);
        rows
    }
}

#[derive(Debug, Default)]
pub struct MemoryStyleStore {
    tables: RwLock<Tables>,
}

impl MemoryStyleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_style(&self, id: &str, name: &str) {
        self.tables.write().await.styles.push(Style {
            id: id.to_string(),
            name: name.to_string(),
        });
    }

    pub async fn insert_song(&self, song: LibrarySong) {
        self.tables.write().await.songs.insert(song.id.clone(), song);
    }

    /// Add a track to a style's membership.
    pub async fn add_track(&self, style_id: &str, library_song_id: &str, sim_duration_seconds: Option<i32>) {
        self.tables.write().await.memberships.push(MembershipRow {
            style_id: style_id.to_string(),
            library_song_id: library_song_id.to_string(),
            sim_duration_seconds,
        });
    }

    /// Append an assignment row as-is, bypassing the upsert.
    pub async fn push_raw_assignment(&self, style_id: &str, row: ClassAssignment) {
        self.tables
            .write()
            .await
            .assignments
            .push((style_id.to_string(), row));
    }

    /// Append a weight row as-is, bypassing the upsert.
    pub async fn push_raw_weight(&self, style_id: &str, row: ClassWeight) {
        self.tables.write().await.weights.push((style_id.to_string(), row));
    }

    /// Make every subsequent operation fail (or succeed again with `None`).
    pub async fn set_failure(&self, message: Option<&str>) {
        self.tables.write().await.failure = message.map(str::to_string);
    }
}

#[async_trait]
impl StyleStore for MemoryStyleStore {
    async fn health_check(&self) -> Result<(), StoreError> {
        self.tables.read().await.check()
    }

    async fn list_styles(&self) -> Result<Vec<Style>, StoreError> {
        let tables = self.tables.read().await;
        tables.check()?;
        let mut styles = tables.styles.clone();
        styles.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(styles)
    }

    async fn list_style_tracks(
        &self,
        style_id: &str,
        limit: usize,
    ) -> Result<Vec<StyleTrack>, StoreError> {
        let tables = self.tables.read().await;
        tables.check()?;
        Ok(tables
            .sorted_memberships(style_id, limit)
            .into_iter()
            .map(|m| StyleTrack {
                library_song_id: m.library_song_id.clone(),
                sim_duration_seconds: m.sim_duration_seconds,
                song: tables.songs.get(&m.library_song_id).cloned(),
            })
            .collect())
    }

    async fn list_style_track_ids(
        &self,
        style_id: &str,
        limit: usize,
    ) -> Result<Vec<String>, StoreError> {
        let tables = self.tables.read().await;
        tables.check()?;
        Ok(tables
            .sorted_memberships(style_id, limit)
            .into_iter()
            .map(|m| m.library_song_id.clone())
            .collect())
    }

    async fn list_assignments(&self, style_id: &str) -> Result<Vec<ClassAssignment>, StoreError> {
        let tables = self.tables.read().await;
        tables.check()?;
        Ok(tables
            .assignments
            .iter()
            .filter(|(sid, _)| sid == style_id)
            .map(|(_, row)| row.clone())
            .collect())
    }

    async fn upsert_assignments(
        &self,
        style_id: &str,
        rows: &[ValidAssignment],
    ) -> Result<u64, StoreError> {
        let mut tables = self.tables.write().await;
        tables.check()?;
        let now = Utc::now();
        for row in rows {
            let existing = tables
                .assignments
                .iter_mut()
                .find(|(sid, a)| sid == style_id && a.library_song_id == row.library_song_id);
            match existing {
                Some((_, a)) => {
                    a.class_code = row.class_code.as_str().to_string();
                    a.moved_at = Some(now);
                }
                None => tables.assignments.push((
                    style_id.to_string(),
                    ClassAssignment {
                        library_song_id: row.library_song_id.clone(),
                        class_code: row.class_code.as_str().to_string(),
                        moved_at: Some(now),
                    },
                )),
            }
        }
        Ok(rows.len() as u64)
    }

    async fn delete_assignments(
        &self,
        style_id: &str,
        song_ids: &[String],
    ) -> Result<Vec<String>, StoreError> {
        let mut tables = self.tables.write().await;
        tables.check()?;
        let mut deleted = Vec::new();
        tables.assignments.retain(|(sid, a)| {
            let hit = sid == style_id && song_ids.contains(&a.library_song_id);
            if hit {
                deleted.push(a.library_song_id.clone());
            }
            !hit
        });
        Ok(deleted)
    }

    async fn list_weights(&self, style_id: &str) -> Result<Vec<ClassWeight>, StoreError> {
        let tables = self.tables.read().await;
        tables.check()?;
        let mut weights: Vec<ClassWeight> = tables
            .weights
            .iter()
            .filter(|(sid, _)| sid == style_id)
            .map(|(_, w)| w.clone())
            .collect();
        weights.sort_by(|a, b| a.class_code.cmp(&b.class_code));
        Ok(weights)
    }

    async fn upsert_weights(
        &self,
        style_id: &str,
        rows: &[ValidWeight],
    ) -> Result<u64, StoreError> {
        let mut tables = self.tables.write().await;
        tables.check()?;
        for row in rows {
            let code = row.class_code.as_str();
            let existing = tables
                .weights
                .iter_mut()
                .find(|(sid, w)| sid == style_id && w.class_code == code);
            match existing {
                Some((_, w)) => w.weight_pct = Some(row.weight_pct),
                None => tables.weights.push((
                    style_id.to_string(),
                    ClassWeight {
                        class_code: code.to_string(),
                        weight_pct: Some(row.weight_pct),
                    },
                )),
            }
        }
        Ok(rows.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use opus_core::classification::ClassCode;

    use super::*;

    fn valid(id: &str, code: ClassCode) -> ValidAssignment {
        ValidAssignment {
            library_song_id: id.to_string(),
            class_code: code,
        }
    }

    #[tokio::test]
    async fn upsert_overwrites_existing_assignment() {
        let store = MemoryStyleStore::new();
        store.upsert_assignments("s1", &[valid("t1", ClassCode::A)]).await.unwrap();
        store.upsert_assignments("s1", &[valid("t1", ClassCode::Rest)]).await.unwrap();

        let rows = store.list_assignments("s1").await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].class_code, "REST");
        assert!(rows[0].moved_at.is_some());
    }

    #[tokio::test]
    async fn assignments_are_scoped_by_style() {
        let store = MemoryStyleStore::new();
        store.upsert_assignments("s1", &[valid("t1", ClassCode::A)]).await.unwrap();
        store.upsert_assignments("s2", &[valid("t1", ClassCode::B)]).await.unwrap();

        let deleted = store
            .delete_assignments("s1", &["t1".to_string(), "t9".to_string()])
            .await
            .unwrap();
        assert_eq!(deleted, vec!["t1".to_string()]);
        assert!(store.list_assignments("s1").await.unwrap().is_empty());
        assert_eq!(store.list_assignments("s2").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn track_listing_is_ordered_and_limited() {
        let store = MemoryStyleStore::new();
        for id in ["t3", "t1", "t2"] {
            store.add_track("s1", id, Some(180)).await;
        }
        let ids = store.list_style_track_ids("s1", 2).await.unwrap();
        assert_eq!(ids, vec!["t1".to_string(), "t2".to_string()]);
    }

    #[tokio::test]
    async fn tracks_join_library_songs_when_present() {
        let store = MemoryStyleStore::new();
        store
            .insert_song(LibrarySong {
                id: "t1".into(),
                artist: Some("Artist".into()),
                title: Some("Title".into()),
                album: None,
                peak_year: Some(1999),
                run_time_seconds: Some(200),
                styles: None,
            })
            .await;
        store.add_track("s1", "t1", Some(180)).await;
        store.add_track("s1", "t2", None).await;

        let tracks = store.list_style_tracks("s1", 10).await.unwrap();
        assert_eq!(tracks[0].song.as_ref().map(|s| s.peak_year), Some(Some(1999)));
        assert!(tracks[1].song.is_none());
    }

    #[tokio::test]
    async fn failure_mode_fails_every_call() {
        let store = MemoryStyleStore::new();
        store.set_failure(Some("connection refused")).await;
        assert_matches!(
            store.list_styles().await,
            Err(StoreError::Unavailable(msg)) if msg == "connection refused"
        );
        store.set_failure(None).await;
        assert!(store.list_styles().await.is_ok());
    }

    #[tokio::test]
    async fn health_check_follows_failure_mode() {
        let store = MemoryStyleStore::new();
        assert!(store.health_check().await.is_ok());

        store.set_failure(Some("db down")).await;
        assert_matches!(
            store.health_check().await,
            Err(StoreError::Unavailable(msg)) if msg == "db down"
        );
    }
}
