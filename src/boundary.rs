use std::fmt;

/// Non-fatal conditions at the edges of a commit history.
/// These are reported to the user but never abort a run.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// The log contained no conventional commits
    NoCommits,
    /// Commits after the last version commit were left out of the changelog
    UnreleasedCommits { count: usize, since_version: String },
    /// The changelog file did not exist and will be created
    NewChangelog { path: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NoCommits => {
                write!(f, "No conventional commits found in the commit history")
            }
            BoundaryWarning::UnreleasedCommits {
                count,
                since_version,
            } => {
                let noun = if *count == 1 { "commit" } else { "commits" };
                write!(
                    f,
                    "{} {} after v{} not released (no feat, fix or breaking change)",
                    count, noun, since_version
                )
            }
            BoundaryWarning::NewChangelog { path } => {
                write!(f, "Changelog '{}' not found, creating a new one", path)
            }
        }
    }
}
