use std::slice;

use tracing::{debug, instrument};

use crate::domain::{Commit, CommitType, Version, VersionBump};

/// Bump a single commit triggers, if any
///
/// Breaking changes win over the commit type; `feat` bumps minor, `fix` bumps
/// patch, everything else leaves the version alone.
pub fn bump_for(commit: &Commit) -> Option<VersionBump> {
    if commit.is_breaking() {
        Some(VersionBump::Major)
    } else {
        match commit.kind() {
            CommitType::Feature => Some(VersionBump::Minor),
            CommitType::Fix => Some(VersionBump::Patch),
            _ => None,
        }
    }
}

/// Folds an ordered commit history over a starting version
pub struct VersionCalculator<'a> {
    start: Version,
    commits: &'a [Commit],
}

impl<'a> VersionCalculator<'a> {
    /// Create a calculator for `commits` (oldest first) starting at `start`
    pub fn new(start: Version, commits: &'a [Commit]) -> Self {
        VersionCalculator { start, commits }
    }

    /// Lazy sequence of `(version after commit, commit)` pairs, one per commit
    ///
    /// Versions inside the sequence are not finalized: a history without any
    /// bump keeps reporting the starting version, prerelease tag included.
    pub fn steps(&self) -> VersionSteps<'a> {
        VersionSteps {
            version: self.start.clone(),
            commits: self.commits.iter(),
        }
    }

    /// Version after the whole history, stripped of prerelease/build metadata
    #[instrument(skip(self), fields(start = %self.start, commits = self.commits.len()))]
    pub fn current_version(&self) -> Version {
        let version = self
            .steps()
            .last()
            .map(|(version, _)| version)
            .unwrap_or_else(|| self.start.clone())
            .finalize();
        debug!(%version, "calculated current version");
        version
    }
}

/// Iterator over the intermediate versions of a fold
///
/// Cloning restarts nothing: a clone continues from the same position.
#[derive(Debug, Clone)]
pub struct VersionSteps<'a> {
    version: Version,
    commits: slice::Iter<'a, Commit>,
}

impl<'a> Iterator for VersionSteps<'a> {
    type Item = (Version, &'a Commit);

    fn next(&mut self) -> Option<Self::Item> {
        let commit = self.commits.next()?;
        if let Some(bump) = bump_for(commit) {
            self.version = self.version.bump(bump);
        }
        Some((self.version.clone(), commit))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.commits.size_hint()
    }
}

impl ExactSizeIterator for VersionSteps<'_> {}

/// Calculate the version reached by applying `commits` to `start`
pub fn calculate_current_version(start: &Version, commits: &[Commit]) -> Version {
    VersionCalculator::new(start.clone(), commits).current_version()
}
