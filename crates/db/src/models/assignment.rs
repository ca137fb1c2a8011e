//! Per-track class assignment model.

use opus_core::playback_profile::AssignmentInput;
use opus_core::types::Timestamp;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from `sim_style_song_classes`, scoped to one style.
///
/// `class_code` is kept as the stored string; readers normalize it.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct ClassAssignment {
    pub library_song_id: String,
    pub class_code: String,
    pub moved_at: Option<Timestamp>,
}

impl ClassAssignment {
    pub fn as_profile_input(&self) -> AssignmentInput<'_> {
        AssignmentInput {
            library_song_id: Some(&self.library_song_id),
            class_code: &self.class_code,
            moved_at: self.moved_at,
        }
    }
}
