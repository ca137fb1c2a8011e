//! Request extractors shared by the route handlers.
//!
//! - [`internal_key::RequireInternalKey`] -- Rejects requests without the pre-shared API key.
//! - [`validated_json::ValidatedJson`] -- JSON body that also passes its `validator` rules.

pub mod internal_key;
pub mod validated_json;
