//! Write-batch validation for assignments and weights.
//!
//! Both batches are all-or-nothing: the first invalid row rejects the
//! whole batch before anything is written.

use std::collections::HashMap;
use std::hash::Hash;

use crate::classification::{normalize_class_code, ClassCode};
use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Required total of a submitted weight batch.
pub const REQUIRED_WEIGHT_SUM: i64 = 100;

pub const MIN_WEIGHT_PCT: i32 = 0;
pub const MAX_WEIGHT_PCT: i32 = 100;

// ---------------------------------------------------------------------------
// Structs
// ---------------------------------------------------------------------------

/// An assignment row as submitted by a client.
#[derive(Debug, Clone, Copy)]
pub struct AssignmentDraft<'a> {
    pub library_song_id: &'a str,
    pub class_code: &'a str,
}

/// An assignment whose class code has been normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidAssignment {
    pub library_song_id: String,
    pub class_code: ClassCode,
}

/// A weight row as submitted by a client.
#[derive(Debug, Clone, Copy)]
pub struct WeightDraft<'a> {
    pub class_code: &'a str,
    pub weight_pct: i32,
}

/// A weight whose class code has been normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidWeight {
    pub class_code: ClassCode,
    pub weight_pct: i32,
}

// ---------------------------------------------------------------------------
// Validation functions
// ---------------------------------------------------------------------------

fn normalize_or_reject(raw: &str) -> Result<ClassCode, CoreError> {
    normalize_class_code(Some(raw))
        .ok_or_else(|| CoreError::Validation(format!("Invalid class_code: {raw}")))
}

/// Validate a bulk assignment upsert.
///
/// Every class code must normalize; the first one that does not rejects
/// the batch.
pub fn validate_assignment_batch<'a>(
    drafts: impl IntoIterator<Item = AssignmentDraft<'a>>,
) -> Result<Vec<ValidAssignment>, CoreError> {
    drafts
        .into_iter()
        .map(|draft| {
            Ok(ValidAssignment {
                library_song_id: draft.library_song_id.to_string(),
                class_code: normalize_or_reject(draft.class_code)?,
            })
        })
        .collect()
}

/// Validate a weight upsert.
///
/// Every class code must normalize and every value must lie in
/// `0..=100`; then the submitted values must sum to exactly 100. The sum
/// covers the submitted rows only, not weights already stored.
pub fn validate_weight_batch<'a>(
    drafts: impl IntoIterator<Item = WeightDraft<'a>>,
) -> Result<Vec<ValidWeight>, CoreError> {
    let weights = drafts
        .into_iter()
        .map(|draft| {
            let class_code = normalize_or_reject(draft.class_code)?;
            if !(MIN_WEIGHT_PCT..=MAX_WEIGHT_PCT).contains(&draft.weight_pct) {
                return Err(CoreError::Validation(format!(
                    "weight_pct must be between {MIN_WEIGHT_PCT} and {MAX_WEIGHT_PCT}. Got {}.",
                    draft.weight_pct
                )));
            }
            Ok(ValidWeight {
                class_code,
                weight_pct: draft.weight_pct,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let sum: i64 = weights.iter().map(|w| i64::from(w.weight_pct)).sum();
    if sum != REQUIRED_WEIGHT_SUM {
        return Err(CoreError::Validation(format!(
            "Weights must sum to {REQUIRED_WEIGHT_SUM}. Got {sum}."
        )));
    }

    Ok(weights)
}

/// Collapse rows sharing a key so that only the last one survives.
///
/// The survivor keeps the position of the first occurrence. Used before a
/// multi-row upsert, which may not touch the same row twice.
pub fn collapse_last_wins<T, K, F>(rows: Vec<T>, key: F) -> Vec<T>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let mut slots: HashMap<K, usize> = HashMap::new();
    let mut out: Vec<T> = Vec::with_capacity(rows.len());
    for row in rows {
        let k = key(&row);
        match slots.get(&k) {
            Some(&idx) => out[idx] = row,
            None => {
                slots.insert(k, out.len());
                out.push(row);
            }
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
