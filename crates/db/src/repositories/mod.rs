//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` as the first argument.

pub mod assignment_repo;
pub mod style_repo;
pub mod style_track_repo;
pub mod weight_repo;

pub use assignment_repo::AssignmentRepo;
pub use style_repo::StyleRepo;
pub use style_track_repo::StyleTrackRepo;
pub use weight_repo::WeightRepo;
