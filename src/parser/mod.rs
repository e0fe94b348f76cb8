//! Commit message and commit log parsing

pub mod history;
pub mod message;

pub use history::{parse_commit_history, LOG_DATE_FORMAT};
pub use message::{parse_commit, SHRUG_TOKEN};
