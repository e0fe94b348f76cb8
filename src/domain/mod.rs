//! Domain logic - pure business rules independent of I/O

pub mod commit;
pub mod version;

pub use commit::{Commit, CommitType, Trailer, BREAKING_CHANGE_TOKEN};
pub use version::{Version, VersionBump};
