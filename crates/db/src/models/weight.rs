//! Per-class weight model.

use opus_core::playback_profile::WeightInput;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from `sim_style_class_weights`, scoped to one style.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct ClassWeight {
    pub class_code: String,
    pub weight_pct: Option<i32>,
}

impl ClassWeight {
    pub fn as_profile_input(&self) -> WeightInput<'_> {
        WeightInput {
            class_code: &self.class_code,
            weight_pct: self.weight_pct,
        }
    }
}
