//! Class codes and identifier normalization.
//!
//! Every class code that enters the system (request bodies, stored rows)
//! goes through [`normalize_class_code`]. Unknown codes are reported as
//! `None` rather than as errors so callers decide whether an invalid code
//! is fatal (write paths) or simply means "unassigned" (the aggregator).

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const CLASS_A: &str = "A";
pub const CLASS_B: &str = "B";
pub const CLASS_C: &str = "C";
pub const CLASS_REST: &str = "REST";

// ---------------------------------------------------------------------------
// ClassCode
// ---------------------------------------------------------------------------

/// Classification of a track within a style.
///
/// `A`, `B` and `C` are weighted playback classes. `Rest` keeps the track in
/// the style but excludes it from weighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ClassCode {
    A,
    B,
    C,
    #[serde(rename = "REST")]
    Rest,
}

impl ClassCode {
    /// The weighted classes, in weight-map order.
    pub const WEIGHTED: [ClassCode; 3] = [ClassCode::A, ClassCode::B, ClassCode::C];

    /// Convert to the stored string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A => CLASS_A,
            Self::B => CLASS_B,
            Self::C => CLASS_C,
            Self::Rest => CLASS_REST,
        }
    }

    /// Whether the class participates in weighted playback.
    pub fn is_weighted(&self) -> bool {
        !matches!(self, Self::Rest)
    }

    /// Human-readable name, optionally suffixed with a per-style label.
    ///
    /// `Rest` is shown as `"Rest"`; the weighted classes use their letter.
    pub fn display_name(&self, label: Option<&str>) -> String {
        let base = match self {
            Self::Rest => "Rest",
            other => other.as_str(),
        };
        match label {
            Some(label) if !label.is_empty() => format!("{base} — {label}"),
            _ => base.to_string(),
        }
    }
}

impl fmt::Display for ClassCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display name for an optional class; `None` reads as "Uncategorized".
pub fn class_display_name(code: Option<ClassCode>, label: Option<&str>) -> String {
    match code {
        Some(code) => code.display_name(label),
        None => "Uncategorized".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Normalize a raw class code.
///
/// Trims and upper-cases the input. Recognizes `REST` (any case) and the
/// single letters `A`, `B`, `C`. Anything else, including an absent value,
/// yields `None`.
pub fn normalize_class_code(raw: Option<&str>) -> Option<ClassCode> {
    let code = raw.unwrap_or_default().trim().to_ascii_uppercase();
    match code.as_str() {
        CLASS_REST => Some(ClassCode::Rest),
        CLASS_A => Some(ClassCode::A),
        CLASS_B => Some(ClassCode::B),
        CLASS_C => Some(ClassCode::C),
        _ => None,
    }
}

/// Normalize a raw style identifier. Absent input becomes the empty string.
pub fn normalize_style_id(raw: Option<&str>) -> String {
    raw.unwrap_or_default().trim().to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
