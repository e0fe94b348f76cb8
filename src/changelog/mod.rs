//! Changelog document handling and generation

pub mod document;
pub mod entry;
pub mod generator;

pub use document::{ChangelogDocument, SectionHeading};
pub use entry::{generate_version_entry, list_entry, ChangeCategory, DEFAULT_OTHER_TYPES};
pub use generator::{ChangelogGenerator, GeneratedChangelog, CHANGELOG_HEADER};
