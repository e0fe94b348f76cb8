//! Command workflows behind the `autoversion` binary
//!
//! Each subcommand has an args struct mirroring its CLI flags so the
//! workflows can be driven programmatically without depending on clap.

use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::PathBuf;

use tracing::{info, instrument};

use crate::analyzer::calculate_current_version;
use crate::boundary::BoundaryWarning;
use crate::changelog::{generate_version_entry, ChangelogGenerator};
use crate::config::Config;
use crate::domain::{Commit, Version};
use crate::error::Result;
use crate::parser::parse_commit_history;

/// Where the commit log is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistorySource {
    File(PathBuf),
    Stdin,
}

impl HistorySource {
    /// `-` selects stdin, anything else is a file path
    pub fn from_arg(arg: &str) -> Self {
        if arg == "-" {
            HistorySource::Stdin
        } else {
            HistorySource::File(PathBuf::from(arg))
        }
    }

    /// Read and parse the whole log
    pub fn read_commits(&self) -> Result<Vec<Commit>> {
        match self {
            HistorySource::File(path) => {
                let file = File::open(path)?;
                parse_commit_history(BufReader::new(file))
            }
            HistorySource::Stdin => parse_commit_history(io::stdin().lock()),
        }
    }
}

/// Arguments for `autoversion current`
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentArgs {
    /// Last released version; falls back to `[version] initial`
    pub last: Option<String>,

    pub history: HistorySource,
}

/// Arguments for `autoversion chlog`
#[derive(Debug, Clone, PartialEq)]
pub struct ChlogArgs {
    /// Version to start from when the changelog has none
    pub last: Option<String>,

    /// Changelog path; falls back to `[changelog] file`
    pub chlog_file: Option<PathBuf>,

    /// Print the changelog instead of writing it
    pub noupdate: bool,

    pub history: HistorySource,
}

/// Arguments for `autoversion release`
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseArgs {
    /// Version the release notes are written for
    pub current: String,

    pub history: HistorySource,
}

/// Result of `autoversion chlog`
#[derive(Debug, Clone, PartialEq)]
pub struct ChlogOutcome {
    /// Updated changelog text
    pub changelog: String,

    /// Version the changelog was generated on top of
    pub base_version: Version,

    /// Version after the whole history
    pub version: Version,

    /// Changelog file the run targeted
    pub path: PathBuf,

    /// Whether `changelog` was written to `path`
    pub written: bool,

    pub warnings: Vec<BoundaryWarning>,
}

fn start_version(last: Option<&str>, config: &Config) -> Result<Version> {
    match last {
        Some(last) => Version::parse(last),
        None => config.initial_version(),
    }
}

/// Compute the current version from the commit history
#[instrument(skip_all)]
pub fn run_current(args: &CurrentArgs, config: &Config) -> Result<Version> {
    let start = start_version(args.last.as_deref(), config)?;
    let commits = args.history.read_commits()?;
    let version = calculate_current_version(&start, &commits);
    info!(%start, %version, commits = commits.len(), "computed current version");
    Ok(version)
}

/// Generate the changelog and write it unless `noupdate` is set
///
/// The file is only written after generation has fully succeeded.
#[instrument(skip_all)]
pub fn run_chlog(args: &ChlogArgs, config: &Config) -> Result<ChlogOutcome> {
    let fallback = start_version(args.last.as_deref(), config)?;
    let commits = args.history.read_commits()?;

    let path = args
        .chlog_file
        .clone()
        .unwrap_or_else(|| config.changelog_path());
    let is_new = !path.is_file();

    let generator = ChangelogGenerator::from_changelog(&path, Some(fallback))?
        .with_other_types(config.changelog.other_types.clone());
    let generated = generator.generate_changelog(&commits);

    let mut warnings = Vec::new();
    if commits.is_empty() {
        warnings.push(BoundaryWarning::NoCommits);
    }
    if !generated.unreleased.is_empty() {
        warnings.push(BoundaryWarning::UnreleasedCommits {
            count: generated.unreleased.len(),
            since_version: generated.version.to_string(),
        });
    }
    if is_new && !args.noupdate {
        warnings.push(BoundaryWarning::NewChangelog {
            path: path.display().to_string(),
        });
    }

    let written = !args.noupdate;
    if written {
        fs::write(&path, &generated.text)?;
        info!(path = %path.display(), version = %generated.version, "changelog written");
    }

    Ok(ChlogOutcome {
        changelog: generated.text,
        base_version: generator.base_version().clone(),
        version: generated.version,
        path,
        written,
        warnings,
    })
}

/// Render the release notes section for `args.current`
///
/// The last commit of the history is taken as the version commit and every
/// earlier commit as part of the same release.
#[instrument(skip_all)]
pub fn run_release(args: &ReleaseArgs, config: &Config) -> Result<Vec<String>> {
    let version = Version::parse(&args.current)?;
    let commits = args.history.read_commits()?;

    let lines = match commits.split_last() {
        Some((version_commit, others)) => {
            let others: Vec<&Commit> = others.iter().collect();
            generate_version_entry(
                &version,
                Some(version_commit),
                &others,
                &config.changelog.other_types,
            )
        }
        None => generate_version_entry(&version, None, &[], &config.changelog.other_types),
    };
    Ok(lines)
}
