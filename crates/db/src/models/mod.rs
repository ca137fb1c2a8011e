//! Row models for the style tables.

pub mod assignment;
pub mod style;
pub mod style_track;
pub mod weight;
