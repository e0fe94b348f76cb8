//! Rendering of a single changelog version section

use chrono::{Local, NaiveDate};

use crate::domain::{Commit, Version};

/// Commit types listed under "Other" unless configured otherwise
pub const DEFAULT_OTHER_TYPES: [&str; 2] = ["perf", "revert"];

/// Change category of a version section, in rendering order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeCategory {
    Breaking,
    Features,
    BugFixes,
    Other,
}

impl ChangeCategory {
    pub const ALL: [ChangeCategory; 4] = [
        ChangeCategory::Breaking,
        ChangeCategory::Features,
        ChangeCategory::BugFixes,
        ChangeCategory::Other,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            ChangeCategory::Breaking => "BREAKING CHANGES",
            ChangeCategory::Features => "Features",
            ChangeCategory::BugFixes => "Bug Fixes",
            ChangeCategory::Other => "Other",
        }
    }

    /// Category a commit is listed under; breaking changes win over the type
    pub fn of(commit: &Commit, other_types: &[String]) -> Option<ChangeCategory> {
        if commit.is_breaking() {
            return Some(ChangeCategory::Breaking);
        }
        match commit.commit_type() {
            "feat" => Some(ChangeCategory::Features),
            "fix" => Some(ChangeCategory::BugFixes),
            other if other_types.iter().any(|t| t == other) => Some(ChangeCategory::Other),
            _ => None,
        }
    }
}

/// Bullet text for one commit, without the leading `* `
pub fn list_entry(commit: &Commit, skip_body: bool) -> String {
    let mut entry = if skip_body || commit.body().is_empty() {
        commit.summary().to_string()
    } else {
        format!("{}\n\n{}\n", commit.summary(), commit.body())
    };

    if let Some(scope) = commit.scope() {
        entry = format!("**{}:** {}", scope, entry);
    }

    if commit.is_breaking() {
        if let Some(note) = commit.footer_value() {
            entry = format!("{}\n\n{}", entry, note);
        }
    }

    entry
}

/// Render a version section as markdown lines
///
/// `version_commit` is the commit that produced `version`; `other_commits` are
/// the non-version commits that preceded it. Without a version commit only the
/// heading is produced, dated today.
pub fn generate_version_entry(
    version: &Version,
    version_commit: Option<&Commit>,
    other_commits: &[&Commit],
    other_types: &[String],
) -> Vec<String> {
    render_version_entry(
        version,
        version_commit,
        other_commits,
        other_types,
        Local::now().date_naive(),
    )
}

pub(crate) fn render_version_entry(
    version: &Version,
    version_commit: Option<&Commit>,
    other_commits: &[&Commit],
    other_types: &[String],
    today: NaiveDate,
) -> Vec<String> {
    let date = match version_commit {
        Some(commit) => commit.date_str(),
        None => today.format("%Y-%m-%d").to_string(),
    };
    let heading = format!("## v{} ({})", version, date);

    let Some(version_commit) = version_commit else {
        return vec![heading];
    };

    let commits: Vec<&Commit> = other_commits
        .iter()
        .copied()
        .chain(std::iter::once(version_commit))
        .collect();

    let mut section = format!("{}\n\n", heading);
    for category in ChangeCategory::ALL {
        let members: Vec<&Commit> = commits
            .iter()
            .copied()
            .filter(|c| ChangeCategory::of(c, other_types) == Some(category))
            .collect();
        if members.is_empty() {
            continue;
        }

        section.push_str(&format!("### {}\n\n", category.title()));
        for commit in members {
            let entry = list_entry(commit, category == ChangeCategory::Other);
            section.push_str(&format!("* {}\n", entry));
        }
        section.push('\n');
    }

    section.lines().map(str::to_string).collect()
}
