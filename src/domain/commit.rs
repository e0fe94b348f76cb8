use chrono::NaiveDateTime;
use std::fmt;

/// Conventional commit type
///
/// Resolved from the raw type token through a static table. Tokens with no
/// entry (such as the shrug placeholder) map to [`CommitType::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommitType {
    Build,
    Chore,
    Ci,
    Docs,
    Feature,
    Fix,
    Performance,
    Refactor,
    Release,
    Revert,
    Style,
    Test,
    Unknown,
}

impl CommitType {
    const TOKENS: [(&'static str, CommitType); 12] = [
        ("build", CommitType::Build),
        ("chore", CommitType::Chore),
        ("ci", CommitType::Ci),
        ("docs", CommitType::Docs),
        ("feat", CommitType::Feature),
        ("fix", CommitType::Fix),
        ("perf", CommitType::Performance),
        ("refactor", CommitType::Refactor),
        ("release", CommitType::Release),
        ("revert", CommitType::Revert),
        ("style", CommitType::Style),
        ("test", CommitType::Test),
    ];

    /// Resolve a raw type token
    pub fn from_token(token: &str) -> Self {
        Self::TOKENS
            .iter()
            .find(|(literal, _)| *literal == token)
            .map(|(_, kind)| *kind)
            .unwrap_or(CommitType::Unknown)
    }

    /// The token literal for this type, if it has one
    pub fn token(&self) -> Option<&'static str> {
        Self::TOKENS
            .iter()
            .find(|(_, kind)| kind == self)
            .map(|(literal, _)| *literal)
    }

    /// Every token literal the commit grammar accepts as a type
    pub fn tokens() -> impl Iterator<Item = &'static str> {
        Self::TOKENS.iter().map(|(literal, _)| *literal)
    }
}

/// A single `Token: Value` footer line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trailer {
    pub token: String,
    pub value: String,
}

/// Token that marks a breaking change when it appears in the footer
pub const BREAKING_CHANGE_TOKEN: &str = "BREAKING CHANGE";

/// Parsed representation of one conventional commit
///
/// Built by the commit parser; fields are read-only from the outside. The log
/// parser stamps hash and date through [`Commit::with_hash`] and
/// [`Commit::with_date`], which consume the record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    hash: String,
    date: Option<NaiveDateTime>,
    commit_type: String,
    kind: CommitType,
    scope: Option<String>,
    summary: String,
    body: String,
    footer: String,
    trailers: Vec<Trailer>,
    is_breaking: bool,
    is_merge: bool,
    is_initial: bool,
}

/// Raw parts handed over by the message parser
#[derive(Debug, Default)]
pub(crate) struct CommitParts {
    pub commit_type: String,
    pub scope: Option<String>,
    pub breaking_marker: bool,
    pub summary: String,
    pub body: String,
    pub footer: String,
    pub trailers: Vec<Trailer>,
    pub is_merge: bool,
    pub is_initial: bool,
}

impl Commit {
    pub(crate) fn from_parts(parts: CommitParts) -> Self {
        let trailers: Vec<Trailer> = parts
            .trailers
            .into_iter()
            .map(|t| Trailer {
                token: t.token.trim().to_string(),
                value: t.value.trim().to_string(),
            })
            .collect();

        let breaking_footer = trailers
            .last()
            .is_some_and(|t| t.token == BREAKING_CHANGE_TOKEN);

        Commit {
            hash: String::new(),
            date: None,
            kind: CommitType::from_token(&parts.commit_type),
            commit_type: parts.commit_type,
            scope: parts.scope.filter(|s| !s.is_empty()),
            summary: parts.summary.trim_end().to_string(),
            body: parts.body.trim_end().to_string(),
            footer: parts.footer.trim_end().to_string(),
            trailers,
            is_breaking: parts.breaking_marker || breaking_footer,
            is_merge: parts.is_merge,
            is_initial: parts.is_initial,
        }
    }

    /// Stamp the short hash assigned by the log
    pub fn with_hash(mut self, hash: impl Into<String>) -> Self {
        self.hash = hash.into();
        self
    }

    /// Stamp the timestamp assigned by the log
    pub fn with_date(mut self, date: Option<NaiveDateTime>) -> Self {
        self.date = date;
        self
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    pub fn date(&self) -> Option<NaiveDateTime> {
        self.date
    }

    /// Raw type token as written in the message (empty for initial/merge commits)
    pub fn commit_type(&self) -> &str {
        &self.commit_type
    }

    pub fn kind(&self) -> CommitType {
        self.kind
    }

    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn footer(&self) -> &str {
        &self.footer
    }

    pub fn trailers(&self) -> &[Trailer] {
        &self.trailers
    }

    /// Token of the last footer trailer
    pub fn footer_token(&self) -> Option<&str> {
        self.trailers.last().map(|t| t.token.as_str())
    }

    /// Value of the last footer trailer
    pub fn footer_value(&self) -> Option<&str> {
        self.trailers
            .last()
            .map(|t| t.value.as_str())
            .filter(|v| !v.is_empty())
    }

    pub fn is_breaking(&self) -> bool {
        self.is_breaking
    }

    pub fn is_merge(&self) -> bool {
        self.is_merge
    }

    pub fn is_initial(&self) -> bool {
        self.is_initial
    }

    /// Whether this commit opens a new version section
    pub fn is_version_commit(&self) -> bool {
        matches!(self.kind, CommitType::Feature | CommitType::Fix) || self.is_breaking
    }

    /// Commit date rendered as `YYYY-MM-DD`, or empty when unknown
    pub fn date_str(&self) -> String {
        self.date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }
}

impl fmt::Display for Commit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {}",
            self.hash,
            self.commit_type,
            self.scope.as_deref().unwrap_or(""),
            self.summary,
            self.body,
            self.footer
        )
    }
}
