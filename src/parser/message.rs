//! Conventional commit message parser
//!
//! Line-oriented grammar, evaluated top to bottom:
//!
//! ```text
//! message  := initial | merge | typed
//! initial  := "Initial commit" ["."]
//! merge    := "Merge " <any text>
//! typed    := header NL blank* body? footer? <ignored>
//! header   := type ["(" scope ")"] ["!"] ": " summary [body-text]
//! body     := body-line (NL body-line)*
//! footer   := trailer (NL blank* trailer)*
//! trailer  := token ": " value
//! ```
//!
//! The summary stops at the first character outside its class; the rest of the
//! header line must be body text and opens the body. The body ends at the first
//! line outside the body class: if that line is a trailer the footer starts
//! there, otherwise nothing more is read. Text after the footer is dropped.

use tracing::trace;

use crate::domain::commit::{Commit, CommitParts, CommitType, Trailer};

/// Placeholder type token accepted for commits produced by custom tooling
pub const SHRUG_TOKEN: &str = "¯\\_(ツ)_/¯";

const INITIAL_COMMIT: &str = "Initial commit";
const MERGE_PREFIX: &str = "Merge ";

fn is_word(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_scope_char(c: char) -> bool {
    is_word(c) || c == '-'
}

fn is_summary_char(c: char) -> bool {
    is_word(c) || matches!(c, ' ' | ',' | '\'' | '.' | '`' | ':' | '-')
}

fn is_body_char(c: char) -> bool {
    is_word(c) || c.is_whitespace() || matches!(c, ',' | '\'' | '.' | '`' | '[' | ']' | '-')
}

fn is_token_char(c: char) -> bool {
    is_word(c) || c == ' ' || c == '\t' || c == '-'
}

fn is_value_char(c: char) -> bool {
    is_word(c) || (' '..='`').contains(&c)
}

/// Typed header line components
#[derive(Debug, PartialEq, Eq)]
struct Header<'a> {
    commit_type: &'a str,
    scope: Option<&'a str>,
    breaking: bool,
    summary: &'a str,
    /// Body text sharing the header line
    overflow: &'a str,
}

/// Split a type token off the front of the header line.
///
/// The token must be followed by `(`, `!` or `:` so that e.g. `feature:` or
/// `fixup:` are not mistaken for `feat`/`fix`.
fn lex_type(line: &str) -> Option<(&str, &str)> {
    CommitType::tokens()
        .chain(std::iter::once(SHRUG_TOKEN))
        .filter_map(|token| line.strip_prefix(token).map(|rest| (token, rest)))
        .find(|(_, rest)| rest.starts_with(['(', '!', ':']))
        .map(|(token, rest)| (&line[..token.len()], rest))
}

fn lex_header(line: &str) -> Option<Header<'_>> {
    let (commit_type, mut rest) = lex_type(line)?;

    let mut scope = None;
    if let Some(after_paren) = rest.strip_prefix('(') {
        let close = after_paren.find(')')?;
        let candidate = &after_paren[..close];
        if candidate.is_empty() || !candidate.chars().all(is_scope_char) {
            return None;
        }
        scope = Some(candidate);
        rest = &after_paren[close + 1..];
    }

    let breaking = match rest.strip_prefix('!') {
        Some(after_bang) => {
            rest = after_bang;
            true
        }
        None => false,
    };

    let text = rest.strip_prefix(": ")?;
    let split = text
        .find(|c: char| !is_summary_char(c))
        .unwrap_or(text.len());
    let (summary, overflow) = text.split_at(split);
    if summary.is_empty() || !overflow.chars().all(is_body_char) {
        return None;
    }

    Some(Header {
        commit_type,
        scope,
        breaking,
        summary,
        overflow,
    })
}

/// Parse a single `Token: Value` footer line
fn parse_trailer(line: &str) -> Option<Trailer> {
    let (token, value) = line.split_once(": ")?;
    if token.is_empty() || !token.chars().all(is_token_char) {
        return None;
    }
    if value.is_empty() || !value.chars().all(is_value_char) {
        return None;
    }
    Some(Trailer {
        token: token.to_string(),
        value: value.to_string(),
    })
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Body text, raw footer text and trailers following the header
fn parse_sections(lines: &[&str]) -> (String, String, Vec<Trailer>) {
    let start = lines
        .iter()
        .position(|line| !is_blank(line))
        .unwrap_or(lines.len());
    let content = &lines[start..];

    let body_end = content
        .iter()
        .position(|line| !line.chars().all(is_body_char))
        .unwrap_or(content.len());

    let mut trailers = Vec::new();
    let mut footer_end = body_end;
    for (idx, line) in content.iter().enumerate().skip(body_end) {
        if is_blank(line) {
            continue;
        }
        match parse_trailer(line) {
            Some(trailer) => {
                trailers.push(trailer);
                footer_end = idx + 1;
            }
            None => break,
        }
    }

    if footer_end < content.len() {
        trace!(line = footer_end, "ignoring text after the body and footer");
    }

    (
        content[..body_end].join("\n"),
        content[body_end..footer_end].join("\n"),
        trailers,
    )
}

/// Parse one commit description into a [`Commit`].
///
/// Returns `None` when the text is not a conventional commit (including free
/// text and unknown type tokens); callers drop such commits silently.
pub fn parse_commit(raw: &str) -> Option<Commit> {
    let lines: Vec<&str> = raw.lines().collect();
    let (&header, rest) = lines.split_first()?;

    let marker = header.trim_end();
    if marker == INITIAL_COMMIT || marker.strip_prefix(INITIAL_COMMIT) == Some(".") {
        return Some(Commit::from_parts(CommitParts {
            is_initial: true,
            ..Default::default()
        }));
    }

    if header.len() > MERGE_PREFIX.len() && header.starts_with(MERGE_PREFIX) {
        return Some(Commit::from_parts(CommitParts {
            is_merge: true,
            ..Default::default()
        }));
    }

    let parsed = lex_header(header)?;
    let mut section_lines = Vec::with_capacity(rest.len() + 1);
    if !parsed.overflow.is_empty() {
        section_lines.push(parsed.overflow);
    }
    section_lines.extend_from_slice(rest);
    let (body, footer, trailers) = parse_sections(&section_lines);

    Some(Commit::from_parts(CommitParts {
        commit_type: parsed.commit_type.to_string(),
        scope: parsed.scope.map(str::to_string),
        breaking_marker: parsed.breaking,
        summary: parsed.summary.to_string(),
        body,
        footer,
        trailers,
        is_merge: false,
        is_initial: false,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Examples from https://www.conventionalcommits.org/en/v1.0.0/#examples
    const COMMIT1: &str = "feat: allow provided config object to extend other configs

BREAKING CHANGE: `extends` key in config file is now used for extending other config files
";
    const COMMIT2: &str = "feat!: send an email to the customer when a product is shipped
";
    const COMMIT3: &str = "feat(api)!: send an email to the customer when a product is shipped
";
    const COMMIT4: &str = "chore!: drop support for Node 6

BREAKING CHANGE: use JavaScript features not available in Node 6.

";
    const COMMIT5: &str = "docs: correct spelling of CHANGELOG
";
    const COMMIT6: &str = "feat(lang): add Polish language
";
    const COMMIT7: &str = "fix: prevent racing of requests

Introduce a request id and a reference to latest request. Dismiss
incoming responses other than from latest request.

Remove timeouts which were used to mitigate the racing issue but are
obsolete now.

Reviewed-by: Z
Refs: #123
";

    #[test]
    fn test_parse_breaking_footer() {
        let parsed = parse_commit(COMMIT1).unwrap();
        assert_eq!(parsed.hash(), "");
        assert_eq!(parsed.commit_type(), "feat");
        assert_eq!(parsed.kind(), CommitType::Feature);
        assert_eq!(parsed.scope(), None);
        assert_eq!(
            parsed.summary(),
            "allow provided config object to extend other configs"
        );
        assert_eq!(parsed.body(), "");
        assert_eq!(
            parsed.footer(),
            "BREAKING CHANGE: `extends` key in config file is now used for extending other config files"
        );
        assert_eq!(parsed.footer_token(), Some("BREAKING CHANGE"));
        assert_eq!(
            parsed.footer_value(),
            Some("`extends` key in config file is now used for extending other config files")
        );
        assert!(parsed.is_breaking());
        assert!(!parsed.is_merge());
        assert!(!parsed.is_initial());
    }

    #[test]
    fn test_parse_breaking_marker() {
        let parsed = parse_commit(COMMIT2).unwrap();
        assert_eq!(parsed.commit_type(), "feat");
        assert_eq!(parsed.scope(), None);
        assert_eq!(
            parsed.summary(),
            "send an email to the customer when a product is shipped"
        );
        assert_eq!(parsed.body(), "");
        assert_eq!(parsed.footer(), "");
        assert_eq!(parsed.footer_token(), None);
        assert_eq!(parsed.footer_value(), None);
        assert!(parsed.is_breaking());
    }

    #[test]
    fn test_parse_breaking_marker_with_scope() {
        let parsed = parse_commit(COMMIT3).unwrap();
        assert_eq!(parsed.commit_type(), "feat");
        assert_eq!(parsed.scope(), Some("api"));
        assert!(parsed.is_breaking());
        assert_eq!(parsed.footer_token(), None);
    }

    #[test]
    fn test_parse_breaking_chore_with_trailing_blank_lines() {
        let parsed = parse_commit(COMMIT4).unwrap();
        assert_eq!(parsed.commit_type(), "chore");
        assert_eq!(parsed.kind(), CommitType::Chore);
        assert_eq!(parsed.summary(), "drop support for Node 6");
        assert_eq!(parsed.body(), "");
        assert_eq!(
            parsed.footer(),
            "BREAKING CHANGE: use JavaScript features not available in Node 6."
        );
        assert_eq!(parsed.footer_token(), Some("BREAKING CHANGE"));
        assert_eq!(
            parsed.footer_value(),
            Some("use JavaScript features not available in Node 6.")
        );
        assert!(parsed.is_breaking());
    }

    #[test]
    fn test_parse_docs() {
        let parsed = parse_commit(COMMIT5).unwrap();
        assert_eq!(parsed.commit_type(), "docs");
        assert_eq!(parsed.summary(), "correct spelling of CHANGELOG");
        assert!(!parsed.is_breaking());
        assert!(!parsed.is_version_commit());
    }

    #[test]
    fn test_parse_scope() {
        let parsed = parse_commit(COMMIT6).unwrap();
        assert_eq!(parsed.commit_type(), "feat");
        assert_eq!(parsed.scope(), Some("lang"));
        assert_eq!(parsed.summary(), "add Polish language");
        assert!(!parsed.is_breaking());
    }

    #[test]
    fn test_parse_body_and_trailers() {
        let parsed = parse_commit(COMMIT7).unwrap();
        assert_eq!(parsed.commit_type(), "fix");
        assert_eq!(parsed.summary(), "prevent racing of requests");
        assert_eq!(
            parsed.body(),
            "Introduce a request id and a reference to latest request. Dismiss
incoming responses other than from latest request.

Remove timeouts which were used to mitigate the racing issue but are
obsolete now."
        );
        assert_eq!(parsed.footer(), "Reviewed-by: Z\nRefs: #123");
        assert_eq!(parsed.trailers().len(), 2);
        assert_eq!(parsed.trailers()[0].token, "Reviewed-by");
        assert_eq!(parsed.footer_token(), Some("Refs"));
        assert_eq!(parsed.footer_value(), Some("#123"));
        assert!(!parsed.is_breaking());
    }

    #[test]
    fn test_parse_without_newline() {
        let parsed = parse_commit("feat: add get plugin version function").unwrap();
        assert_eq!(parsed.kind(), CommitType::Feature);
        assert_eq!(parsed.summary(), "add get plugin version function");
        assert_eq!(parsed.body(), "");
        assert_eq!(parsed.footer(), "");
        assert!(!parsed.is_breaking());
    }

    #[test]
    fn test_parse_is_deterministic() {
        for raw in [COMMIT1, COMMIT4, COMMIT7] {
            assert_eq!(parse_commit(raw), parse_commit(raw));
        }
    }

    #[test]
    fn test_breaking_only_from_last_trailer() {
        let parsed =
            parse_commit("fix: tweak\n\nBREAKING CHANGE: gone\nRefs: #9\n").unwrap();
        assert_eq!(parsed.footer_token(), Some("Refs"));
        assert!(!parsed.is_breaking());
    }

    #[test]
    fn test_footer_directly_after_header() {
        let parsed = parse_commit("fix: tweak\nRefs: #9").unwrap();
        assert_eq!(parsed.body(), "");
        assert_eq!(parsed.footer(), "Refs: #9");
    }

    #[test]
    fn test_body_with_foreign_characters_is_truncated() {
        let parsed =
            parse_commit("fix: tweak\n\nfirst line\nsee #5 for details\n\nRefs: #9\n").unwrap();
        assert_eq!(parsed.body(), "first line");
        assert_eq!(parsed.footer(), "");
        assert_eq!(parsed.footer_token(), None);
    }

    #[test]
    fn test_prose_after_footer_is_ignored() {
        let parsed = parse_commit("fix: tweak\n\nRefs: #9\nmore words\n").unwrap();
        assert_eq!(parsed.footer_token(), Some("Refs"));
        assert_eq!(parsed.footer(), "Refs: #9");
        assert_eq!(parsed.body(), "");
    }

    #[test]
    fn test_breaking_footer_followed_by_notes() {
        let parsed = parse_commit(
            "feat: new config loader\n\nBREAKING CHANGE: the old loader is gone\n\nMigrate by renaming the file.\n",
        )
        .unwrap();
        assert_eq!(parsed.footer_token(), Some("BREAKING CHANGE"));
        assert_eq!(parsed.footer_value(), Some("the old loader is gone"));
        assert_eq!(parsed.footer(), "BREAKING CHANGE: the old loader is gone");
        assert!(parsed.is_breaking());
    }

    #[test]
    fn test_footer_starts_after_body() {
        let parsed = parse_commit(
            "fix: tweak\n\nsome context\nReviewed-by: Z\n\nRefs: #9\n\nthanks to everyone\n",
        )
        .unwrap();
        assert_eq!(parsed.body(), "some context");
        assert_eq!(parsed.trailers().len(), 2);
        assert_eq!(parsed.footer_token(), Some("Refs"));
    }

    #[test]
    fn test_summary_continues_into_body() {
        let parsed = parse_commit("fix: update [deps]\n").unwrap();
        assert_eq!(parsed.kind(), CommitType::Fix);
        assert_eq!(parsed.summary(), "update");
        assert_eq!(parsed.body(), "[deps]");
        assert!(parsed.is_version_commit());

        let parsed = parse_commit("fix: update [deps]\n\nPinned versions.\n").unwrap();
        assert_eq!(parsed.body(), "[deps]\n\nPinned versions.");
    }

    #[test]
    fn test_parse_initial_commit() {
        for raw in ["Initial commit", "Initial commit.\n"] {
            let parsed = parse_commit(raw).unwrap();
            assert!(parsed.is_initial());
            assert!(!parsed.is_merge());
            assert_eq!(parsed.commit_type(), "");
            assert_eq!(parsed.kind(), CommitType::Unknown);
            assert!(!parsed.is_version_commit());
        }
        assert!(parse_commit("Initial commit of the parser").is_none());
    }

    #[test]
    fn test_parse_merge_commit() {
        let parsed = parse_commit("Merge branch 'main' into feature/x\n").unwrap();
        assert!(parsed.is_merge());
        assert_eq!(parsed.summary(), "");
        assert!(parse_commit("Merge ").is_none());
    }

    #[test]
    fn test_parse_shrug_token() {
        let parsed = parse_commit("¯\\_(ツ)_/¯: whatever works").unwrap();
        assert_eq!(parsed.commit_type(), SHRUG_TOKEN);
        assert_eq!(parsed.kind(), CommitType::Unknown);
        assert!(!parsed.is_version_commit());
    }

    #[test]
    fn test_rejects_non_conventional() {
        assert!(parse_commit("").is_none());
        assert!(parse_commit("Just a regular commit message").is_none());
        assert!(parse_commit("feature: not a known token").is_none());
        assert!(parse_commit("fixup: not a known token").is_none());
        assert!(parse_commit("feat:missing space").is_none());
        assert!(parse_commit("feat(): empty scope").is_none());
        assert!(parse_commit("feat(a b): spaced scope").is_none());
        assert!(parse_commit("fix: handle (null) values").is_none());
        assert!(parse_commit("Feat: capitalised").is_none());
    }

    #[test]
    fn test_every_known_token_parses() {
        for token in CommitType::tokens() {
            let parsed = parse_commit(&format!("{}: something", token)).unwrap();
            assert_eq!(parsed.commit_type(), token);
            assert_ne!(parsed.kind(), CommitType::Unknown);
        }
    }

    #[test]
    fn test_lex_header() {
        assert_eq!(
            lex_header("refactor(core-api)!: rewrite it"),
            Some(Header {
                commit_type: "refactor",
                scope: Some("core-api"),
                breaking: true,
                summary: "rewrite it",
                overflow: "",
            })
        );
        assert_eq!(
            lex_header("chore: bump\t[ci]").map(|h| (h.summary, h.overflow)),
            Some(("bump", "\t[ci]"))
        );
        assert_eq!(lex_header("ci: x").map(|h| h.commit_type), Some("ci"));
    }

    #[test]
    fn test_parse_trailer() {
        let trailer = parse_trailer("Co-authored by: Jane Doe <jane@example.com>").unwrap();
        assert_eq!(trailer.token, "Co-authored by");
        assert!(parse_trailer("Refs:#1").is_none());
        assert!(parse_trailer(": value").is_none());
        assert!(parse_trailer("Refs: {braces}").is_none());
    }
}
