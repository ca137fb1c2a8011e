//! Domain logic for the Opus style-classification API.
//!
//! Pure functions only: class-code normalization, playback profile
//! aggregation and write-batch validation. Nothing in this crate touches
//! the database; callers pass in rows they have already loaded.

pub mod classification;
pub mod error;
pub mod playback_profile;
pub mod types;
pub mod validation;
