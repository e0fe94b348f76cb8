//! Semantic versions and changelogs derived from conventional commit history.

pub mod analyzer;
pub mod boundary;
pub mod changelog;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod parser;
pub mod ui;

pub use error::{AutoversionError, Result};
