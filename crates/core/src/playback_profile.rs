//! Playback profile aggregation.
//!
//! Combines a style's class weights, its full track membership and its
//! per-track class assignments into classified pools plus a playback mode
//! for the downstream playback engine. Pure evaluation: the caller loads
//! the three row sets and passes them in.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::classification::{normalize_class_code, ClassCode};
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum number of membership rows considered for one profile.
///
/// Styles larger than this are reported with `membership_truncated = true`
/// rather than paginated.
pub const MEMBERSHIP_FETCH_LIMIT: usize = 5000;

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// A weight row as loaded from the store.
#[derive(Debug, Clone, Copy)]
pub struct WeightInput<'a> {
    pub class_code: &'a str,
    /// `None` covers both a missing and a non-numeric stored value.
    pub weight_pct: Option<i32>,
}

/// An assignment row as loaded from the store.
#[derive(Debug, Clone, Copy)]
pub struct AssignmentInput<'a> {
    pub library_song_id: Option<&'a str>,
    pub class_code: &'a str,
    pub moved_at: Option<Timestamp>,
}

/// The style's track membership, in fetch order.
#[derive(Debug, Clone, Copy)]
pub struct Membership<'a> {
    pub track_ids: &'a [String],
    /// Set when the store held more rows than [`MEMBERSHIP_FETCH_LIMIT`].
    pub truncated: bool,
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// How the playback engine should pick tracks for a style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlaybackMode {
    /// Enough classification and weight data exists for weighted selection.
    ClassWeighted,
    /// Fall back to unweighted selection over the whole style.
    Legacy,
}

/// Weight percentages for the weighted classes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassWeights {
    #[serde(rename = "A")]
    pub a: i64,
    #[serde(rename = "B")]
    pub b: i64,
    #[serde(rename = "C")]
    pub c: i64,
}

impl ClassWeights {
    pub fn sum(&self) -> i64 {
        self.a + self.b + self.c
    }

    fn set(&mut self, code: ClassCode, pct: i64) {
        match code {
            ClassCode::A => self.a = pct,
            ClassCode::B => self.b = pct,
            ClassCode::C => self.c = pct,
            ClassCode::Rest => {}
        }
    }
}

/// Tracks sharing one classification outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    pub count: usize,
    /// Member ids in membership order; only present when requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_ids: Option<Vec<String>>,
}

impl Pool {
    fn new(include_track_ids: bool) -> Self {
        Self {
            count: 0,
            track_ids: include_track_ids.then(Vec::new),
        }
    }

    fn push(&mut self, track_id: &str) {
        self.count += 1;
        if let Some(ids) = self.track_ids.as_mut() {
            ids.push(track_id.to_string());
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pools {
    #[serde(rename = "A")]
    pub a: Pool,
    #[serde(rename = "B")]
    pub b: Pool,
    #[serde(rename = "C")]
    pub c: Pool,
    #[serde(rename = "UNCATEGORIZED")]
    pub uncategorized: Pool,
    #[serde(rename = "REST")]
    pub rest: Pool,
}

impl Pools {
    fn new(include_track_ids: bool) -> Self {
        Self {
            a: Pool::new(include_track_ids),
            b: Pool::new(include_track_ids),
            c: Pool::new(include_track_ids),
            uncategorized: Pool::new(include_track_ids),
            rest: Pool::new(include_track_ids),
        }
    }

    /// The pool a track with the given class falls into.
    fn pool_for(&mut self, code: Option<ClassCode>) -> &mut Pool {
        match code {
            Some(ClassCode::A) => &mut self.a,
            Some(ClassCode::B) => &mut self.b,
            Some(ClassCode::C) => &mut self.c,
            Some(ClassCode::Rest) => &mut self.rest,
            None => &mut self.uncategorized,
        }
    }

    /// Number of tracks in the weighted pools.
    pub fn weighted_count(&self) -> usize {
        self.a.count + self.b.count + self.c.count
    }
}

/// Classification snapshot of one style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackProfile {
    pub style_id: String,
    pub mode: PlaybackMode,
    #[serde(with = "iso_millis")]
    pub updated_at: Option<Timestamp>,
    pub weights: ClassWeights,
    pub pools: Pools,
    #[serde(default)]
    pub membership_truncated: bool,
}

// ---------------------------------------------------------------------------
// Evaluation functions
// ---------------------------------------------------------------------------

/// Build the weight map for A/B/C.
///
/// Missing values count as 0. Rows for `REST` or with an unrecognized code
/// are ignored. A later row for the same class replaces an earlier one.
pub fn collect_weights<'a>(rows: impl IntoIterator<Item = WeightInput<'a>>) -> ClassWeights {
    let mut weights = ClassWeights::default();
    for row in rows {
        match normalize_class_code(Some(row.class_code)) {
            Some(code) if code.is_weighted() => {
                weights.set(code, i64::from(row.weight_pct.unwrap_or(0)));
            }
            _ => {}
        }
    }
    weights
}

/// Resolve the current class of every assigned track.
///
/// Rows are applied in order and the last row for a track wins, matching
/// the overwrite semantics of the assignment upsert. Rows without a track
/// id or with an unrecognized code are skipped and never clear an earlier
/// entry. Also returns the latest `moved_at` among the accepted rows.
pub fn resolve_track_classes<'a>(
    rows: impl IntoIterator<Item = AssignmentInput<'a>>,
) -> (HashMap<&'a str, ClassCode>, Option<Timestamp>) {
    let mut classes = HashMap::new();
    let mut updated_at: Option<Timestamp> = None;

    for row in rows {
        let Some(id) = row.library_song_id.filter(|id| !id.is_empty()) else {
            continue;
        };
        let Some(code) = normalize_class_code(Some(row.class_code)) else {
            continue;
        };

        classes.insert(id, code);

        if let Some(moved_at) = row.moved_at {
            if updated_at.map_or(true, |latest| moved_at > latest) {
                updated_at = Some(moved_at);
            }
        }
    }

    (classes, updated_at)
}

/// Pick the playback mode from the weighted track count and weight sum.
pub fn decide_mode(weighted_count: usize, weight_sum: i64) -> PlaybackMode {
    if weighted_count > 0 && weight_sum > 0 {
        PlaybackMode::ClassWeighted
    } else {
        PlaybackMode::Legacy
    }
}

/// Build the playback profile for a style.
///
/// Every membership track lands in exactly one pool. Tracks without a
/// valid assignment are `UNCATEGORIZED`.
pub fn build_playback_profile<'a>(
    style_id: &str,
    weights: impl IntoIterator<Item = WeightInput<'a>>,
    membership: Membership<'_>,
    assignments: impl IntoIterator<Item = AssignmentInput<'a>>,
    include_track_ids: bool,
) -> PlaybackProfile {
    let weights = collect_weights(weights);
    let (classes, updated_at) = resolve_track_classes(assignments);

    let mut pools = Pools::new(include_track_ids);
    for id in membership.track_ids.iter().filter(|id| !id.is_empty()) {
        let code = classes.get(id.as_str()).copied();
        pools.pool_for(code).push(id);
    }

    let mode = decide_mode(pools.weighted_count(), weights.sum());

    PlaybackProfile {
        style_id: style_id.to_string(),
        mode,
        updated_at,
        weights,
        pools,
        membership_truncated: membership.truncated,
    }
}

// ---------------------------------------------------------------------------
// Serialization helpers
// ---------------------------------------------------------------------------

/// `Option<Timestamp>` as an ISO-8601 UTC string with millisecond precision.
mod iso_millis {
    use chrono::SecondsFormat;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::types::Timestamp;

    pub fn serialize<S: Serializer>(value: &Option<Timestamp>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(ts) => s.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Timestamp>, D::Error> {
        Option::<Timestamp>::deserialize(d)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
