//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Query parameters of the playback profile endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ProfileParams {
    pub include_track_ids: Option<String>,
}

/// Interpret a loosely typed boolean query flag.
///
/// `1`, `true`, `yes` and `y` (trimmed, any case) are true; anything else,
/// including an absent flag, is false.
pub fn parse_flag(raw: Option<&str>) -> bool {
    let value = raw.unwrap_or_default().trim().to_ascii_lowercase();
    matches!(value.as_str(), "1" | "true" | "yes" | "y")
}
