//! Typed HTTP client for the Opus style-classification API.
//!
//! [`OpusApiClient`] wraps every `/v1` route plus `/health`; the
//! [`helpers`] module carries the small conveniences the curation pages
//! build on (display rows, assignment maps, empty-batch short-circuits,
//! best-effort calls).

pub mod client;
pub mod error;
pub mod helpers;
pub mod models;

pub use client::{ClientConfig, OpusApiClient};
pub use error::ClientError;
pub use opus_core::classification::{class_display_name, ClassCode};
