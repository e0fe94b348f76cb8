//! Existing changelog document model
//!
//! The document is kept as plain lines; pulldown-cmark is only used to locate
//! level-2 headings, so that `##` lines inside code blocks are not mistaken
//! for version sections.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};
use regex::Regex;
use tracing::{debug, instrument};

use crate::domain::Version;
use crate::error::{AutoversionError, Result};

static HEADING_VERSION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[vV]?(?P<version>(?:0|[1-9]\d*)\.(?:0|[1-9]\d*)\.(?:0|[1-9]\d*)(?:-[0-9A-Za-z.-]+)?(?:\+[0-9A-Za-z.-]+)?)",
    )
    .expect("Invalid regex")
});

/// A level-2 heading of the changelog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionHeading {
    /// Zero-based line of the heading in the document
    pub line: usize,
    /// Leading heading text, or the text of its first link
    pub text: String,
}

/// Parsed changelog: raw lines plus the position of every version heading
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangelogDocument {
    lines: Vec<String>,
    headings: Vec<SectionHeading>,
    latest_version: Option<Version>,
}

impl ChangelogDocument {
    /// Parse changelog markdown
    ///
    /// Fails when the most recent section heading starts with something
    /// version-shaped that is not a valid semantic version.
    pub fn parse(markdown: &str) -> Result<Self> {
        let headings = collect_section_headings(markdown);

        let latest_version = match headings.first() {
            Some(heading) => version_from_heading(heading)?,
            None => None,
        };

        Ok(ChangelogDocument {
            lines: markdown.lines().map(str::to_string).collect(),
            headings,
            latest_version,
        })
    }

    /// Parse raw file content, rejecting anything that is not UTF-8
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let markdown = std::str::from_utf8(bytes)
            .map_err(|e| AutoversionError::document(format!("not valid UTF-8: {}", e)))?;
        Self::parse(markdown)
    }

    /// Load a changelog file; a missing file yields an empty document
    #[instrument]
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            debug!("changelog file not found, starting a new one");
            return Ok(Self::default());
        }
        let bytes = fs::read(path)?;
        Self::from_bytes(&bytes).map_err(|e| match e {
            AutoversionError::DocumentParse(msg) => {
                AutoversionError::document(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn headings(&self) -> &[SectionHeading] {
        &self.headings
    }

    /// Version of the topmost section, if the changelog has one
    pub fn latest_version(&self) -> Option<&Version> {
        self.latest_version.as_ref()
    }

    /// Line before which new sections go, or `None` when the document has no
    /// version sections yet (the header block must be written first).
    ///
    /// Prefers the first section whose heading mentions `base`, otherwise the
    /// first section of the document.
    pub fn insertion_index(&self, base: &Version) -> Option<usize> {
        let first = self.headings.first()?;
        let needle = base.to_string();
        let matching = self
            .headings
            .iter()
            .find(|heading| self.lines[heading.line].contains(&needle));
        Some(matching.unwrap_or(first).line)
    }
}

fn line_of_offset(markdown: &str, offset: usize) -> usize {
    markdown[..offset].matches('\n').count()
}

fn collect_section_headings(markdown: &str) -> Vec<SectionHeading> {
    let mut headings = Vec::new();
    let mut current: Option<SectionHeading> = None;
    // Text gathering stops at the first non-text event unless inside a leading link
    let mut gathering = false;
    let mut in_link = false;

    for (event, range) in Parser::new(markdown).into_offset_iter() {
        match event {
            Event::Start(Tag::Heading {
                level: HeadingLevel::H2,
                ..
            }) => {
                current = Some(SectionHeading {
                    line: line_of_offset(markdown, range.start),
                    text: String::new(),
                });
                gathering = true;
            }
            Event::End(TagEnd::Heading(HeadingLevel::H2)) => {
                headings.extend(current.take());
                gathering = false;
                in_link = false;
            }
            Event::Start(Tag::Link { .. }) if gathering => {
                let is_first_child = current.as_ref().is_some_and(|h| h.text.is_empty());
                if is_first_child {
                    in_link = true;
                } else {
                    gathering = false;
                }
            }
            Event::End(TagEnd::Link) if in_link => {
                in_link = false;
                gathering = false;
            }
            Event::Text(text) if gathering => {
                if let Some(heading) = current.as_mut() {
                    heading.text.push_str(&text);
                }
            }
            _ if gathering && !in_link && current.is_some() => gathering = false,
            _ => {}
        }
    }

    headings
}

fn version_from_heading(heading: &SectionHeading) -> Result<Option<Version>> {
    let Some(caps) = HEADING_VERSION_REGEX.captures(heading.text.trim_start()) else {
        return Ok(None);
    };
    let raw = &caps["version"];
    Version::parse(raw).map(Some).map_err(|e| {
        AutoversionError::document(format!(
            "heading on line {} has an invalid version '{}': {}",
            heading.line + 1,
            raw,
            e
        ))
    })
}
