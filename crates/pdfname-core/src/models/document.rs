//! Per-run document data: extracted text, field matches, composed names.

use std::fmt;

use serde::Serialize;

/// Text lines taken from the leading pages of a document.
///
/// Lines are trimmed; blank lines are kept so indices match the page layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedText {
    lines: Vec<String>,
}

impl ExtractedText {
    /// Split raw page text into lines. Returns `None` for blank text.
    pub fn from_raw(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        Some(Self {
            lines: text.lines().map(|l| l.trim().to_string()).collect(),
        })
    }

    /// All lines, in page order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The first line of the document.
    pub fn first_line(&self) -> &str {
        self.lines.first().map(String::as_str).unwrap_or_default()
    }

    /// All lines joined by a single space.
    pub fn joined(&self) -> String {
        self.lines.join(" ")
    }
}

/// Which fallback stage produced a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// A line carrying the field's keyword.
    Keyword,
    /// A line matched by corporation-suffix patterns.
    Suffix,
    /// The whole text, without a keyword anchor.
    Fallback,
    /// The first line of the document.
    FirstLine,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tier::Keyword => "keyword",
            Tier::Suffix => "suffix",
            Tier::Fallback => "fallback",
            Tier::FirstLine => "first line",
        };
        f.write_str(name)
    }
}

/// An extracted field value with its provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldMatch {
    /// Extracted value.
    pub value: String,
    /// Stage that produced the value.
    pub tier: Tier,
    /// Index of the matching pattern within its tier.
    pub pattern: usize,
    /// Zero-based line index, when the match came from a single line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

impl FieldMatch {
    pub fn new(value: impl Into<String>, tier: Tier, pattern: usize) -> Self {
        Self {
            value: value.into(),
            tier,
            pattern,
            line: None,
        }
    }

    pub fn on_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

/// Fields recovered from one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractedFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_number: Option<FieldMatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<FieldMatch>,
}

/// A file name safe to use in the download directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ComposedName(String);

impl ComposedName {
    pub(crate) fn new(name: String) -> Self {
        Self(name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<std::path::Path> for ComposedName {
    fn as_ref(&self) -> &std::path::Path {
        std::path::Path::new(&self.0)
    }
}

impl fmt::Display for ComposedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
