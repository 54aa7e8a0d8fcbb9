//! Company name extraction.

use regex::Regex;
use tracing::debug;

use super::FieldExtractor;
use super::patterns::{
    BOILERPLATE_KEYWORDS, COMPANY_KEYWORD, COMPANY_KEYWORD_PATTERNS, COMPANY_SUFFIX_PATTERNS,
    HANGUL_WORD, first_capture,
};
use crate::models::document::{ExtractedText, FieldMatch, Tier};

/// Shortest name accepted from a pattern match, in characters.
const MIN_NAME_CHARS: usize = 2;

/// Company name extractor.
///
/// Three tiers, each tried only when the previous one found nothing:
/// lines carrying the keyword, lines with a corporation suffix or
/// parenthetical (registry boilerplate skipped), then the first Hangul word
/// of the document.
#[derive(Debug, Default, Clone, Copy)]
pub struct CompanyNameExtractor;

impl CompanyNameExtractor {
    pub fn new() -> Self {
        Self
    }

    fn scan(
        &self,
        text: &ExtractedText,
        tier: Tier,
        patterns: &[Regex],
        accept_line: impl Fn(&str) -> bool,
    ) -> Option<FieldMatch> {
        for (index, line) in text.lines().iter().enumerate() {
            if line.is_empty() || !accept_line(line) {
                continue;
            }

            for (pattern, regex) in patterns.iter().enumerate() {
                let Some(name) = first_capture(regex, line) else {
                    continue;
                };
                if name.chars().count() >= MIN_NAME_CHARS {
                    debug!("Company name candidate on line {}: {}", index, line);
                    return Some(FieldMatch::new(name, tier, pattern).on_line(index));
                }
            }
        }

        None
    }

    fn from_first_line(&self, text: &ExtractedText) -> Option<FieldMatch> {
        HANGUL_WORD
            .find(text.first_line())
            .map(|word| FieldMatch::new(word.as_str(), Tier::FirstLine, 0).on_line(0))
    }
}

impl FieldExtractor for CompanyNameExtractor {
    fn extract(&self, text: &ExtractedText) -> Option<FieldMatch> {
        let found = self
            .scan(text, Tier::Keyword, &COMPANY_KEYWORD_PATTERNS, |line| {
                line.contains(COMPANY_KEYWORD)
            })
            .or_else(|| {
                self.scan(text, Tier::Suffix, &COMPANY_SUFFIX_PATTERNS, |line| {
                    !BOILERPLATE_KEYWORDS.iter().any(|k| line.contains(k))
                })
            })
            .or_else(|| self.from_first_line(text));

        match &found {
            Some(m) => debug!("Company name {} ({} tier, pattern {})", m.value, m.tier, m.pattern),
            None => debug!("No company name found"),
        }
        found
    }
}

/// Extract the company name from raw text.
pub fn extract_company_name(text: &str) -> Option<String> {
    let text = ExtractedText::from_raw(text)?;
    CompanyNameExtractor::new().extract(&text).map(|m| m.value)
}
