use std::path::Path;

use chrono::{Local, NaiveDate};
use tracing::{debug, info, instrument};

use super::document::ChangelogDocument;
use super::entry::{render_version_entry, DEFAULT_OTHER_TYPES};
use crate::analyzer::VersionCalculator;
use crate::domain::{Commit, Version};
use crate::error::Result;

/// Header block written at the top of a new changelog
pub const CHANGELOG_HEADER: [&str; 4] = [
    "# Changelog",
    "",
    "All notable changes to this project will be documented in this file. See [conventional commits](https://www.conventionalcommits.org/) for commit guidelines.",
    "",
];

/// Output of a changelog generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedChangelog {
    /// Full changelog markdown
    pub text: String,
    /// Version after the whole history
    pub version: Version,
    /// Commits after the last version commit; not rendered
    pub unreleased: Vec<Commit>,
}

/// Generates changelog sections on top of an existing changelog
#[derive(Debug, Clone)]
pub struct ChangelogGenerator {
    document: ChangelogDocument,
    base_version: Version,
    other_types: Vec<String>,
}

impl ChangelogGenerator {
    /// Create a generator over an already parsed document
    pub fn new(document: ChangelogDocument, base_version: Version) -> Self {
        ChangelogGenerator {
            document,
            base_version,
            other_types: DEFAULT_OTHER_TYPES.iter().map(|t| t.to_string()).collect(),
        }
    }

    /// Load the changelog at `path` (missing file = new changelog)
    ///
    /// The version of the topmost section overrides `fallback`; with neither,
    /// generation starts from `0.0.0`.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn from_changelog(path: &Path, fallback: Option<Version>) -> Result<Self> {
        let document = ChangelogDocument::load(path)?;
        Ok(Self::with_fallback(document, fallback))
    }

    /// Same as [`ChangelogGenerator::from_changelog`] for in-memory markdown
    pub fn from_markdown(markdown: &str, fallback: Option<Version>) -> Result<Self> {
        let document = ChangelogDocument::parse(markdown)?;
        Ok(Self::with_fallback(document, fallback))
    }

    fn with_fallback(document: ChangelogDocument, fallback: Option<Version>) -> Self {
        let base_version = match document.latest_version() {
            Some(latest) => {
                info!(version = %latest, "using base version from changelog");
                latest.clone()
            }
            None => fallback.unwrap_or_default(),
        };
        Self::new(document, base_version)
    }

    /// Commit types listed under the "Other" category
    pub fn with_other_types(mut self, other_types: Vec<String>) -> Self {
        self.other_types = other_types;
        self
    }

    pub fn base_version(&self) -> &Version {
        &self.base_version
    }

    pub fn document(&self) -> &ChangelogDocument {
        &self.document
    }

    /// Render the changelog with one new section per version commit
    pub fn generate_changelog(&self, commits: &[Commit]) -> GeneratedChangelog {
        self.generate_changelog_on(commits, Local::now().date_naive())
    }

    #[instrument(skip_all, fields(base = %self.base_version, count = commits.len()))]
    pub(crate) fn generate_changelog_on(
        &self,
        commits: &[Commit],
        today: NaiveDate,
    ) -> GeneratedChangelog {
        let existing = self.document.lines();
        let (head, tail): (Vec<&str>, &[String]) =
            match self.document.insertion_index(&self.base_version) {
                Some(index) => (
                    existing[..index].iter().map(String::as_str).collect(),
                    &existing[index..],
                ),
                None => (CHANGELOG_HEADER.to_vec(), existing),
            };

        let calculator = VersionCalculator::new(self.base_version.clone(), commits);
        let mut sections: Vec<Vec<String>> = Vec::new();
        let mut pending: Vec<&Commit> = Vec::new();

        for (version, commit) in calculator.steps() {
            if !commit.is_version_commit() {
                pending.push(commit);
                continue;
            }
            debug!(%version, hash = commit.hash(), "version boundary");
            sections.push(render_version_entry(
                &version,
                Some(commit),
                &pending,
                &self.other_types,
                today,
            ));
            pending.clear();
        }

        if !pending.is_empty() {
            debug!(count = pending.len(), "commits after the last version boundary");
        }

        // Newest section first
        let lines: Vec<&str> = head
            .into_iter()
            .chain(sections.iter().rev().flatten().map(String::as_str))
            .chain(tail.iter().map(String::as_str))
            .collect();

        GeneratedChangelog {
            text: lines.join("\n"),
            version: calculator.current_version(),
            unreleased: pending.into_iter().cloned().collect(),
        }
    }
}
