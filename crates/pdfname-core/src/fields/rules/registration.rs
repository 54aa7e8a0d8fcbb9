//! Business registration number extraction.

use tracing::debug;

use super::FieldExtractor;
use super::patterns::{
    REGISTRATION_GENERIC_PATTERNS, REGISTRATION_KEYWORD, REGISTRATION_KEYWORD_PATTERNS,
    first_capture,
};
use crate::models::document::{ExtractedText, FieldMatch, Tier};

/// Registration number extractor.
///
/// Lines carrying the keyword are tried first with every pattern; failing
/// that, the generic layouts are searched across the whole text. Unlike the
/// company name search, the fallback does not skip boilerplate lines.
#[derive(Debug, Default, Clone, Copy)]
pub struct RegistrationNumberExtractor;

impl RegistrationNumberExtractor {
    pub fn new() -> Self {
        Self
    }

    fn from_keyword_lines(&self, text: &ExtractedText) -> Option<FieldMatch> {
        let patterns = REGISTRATION_KEYWORD_PATTERNS
            .iter()
            .chain(REGISTRATION_GENERIC_PATTERNS.iter());

        for (index, line) in text.lines().iter().enumerate() {
            if line.is_empty() || !line.contains(REGISTRATION_KEYWORD) {
                continue;
            }
            debug!("Registration keyword on line {}: {}", index, line);

            for (pattern, regex) in patterns.clone().enumerate() {
                if let Some(number) = first_capture(regex, line) {
                    return Some(FieldMatch::new(number, Tier::Keyword, pattern).on_line(index));
                }
            }
        }

        None
    }

    fn from_joined_text(&self, text: &ExtractedText) -> Option<FieldMatch> {
        let joined = text.joined();

        REGISTRATION_GENERIC_PATTERNS
            .iter()
            .enumerate()
            .find_map(|(pattern, regex)| {
                first_capture(regex, &joined)
                    .map(|number| FieldMatch::new(number, Tier::Fallback, pattern))
            })
    }
}

impl FieldExtractor for RegistrationNumberExtractor {
    fn extract(&self, text: &ExtractedText) -> Option<FieldMatch> {
        let found = self
            .from_keyword_lines(text)
            .or_else(|| self.from_joined_text(text));

        match &found {
            Some(m) => debug!(
                "Registration number {} ({} tier, pattern {})",
                m.value, m.tier, m.pattern
            ),
            None => debug!("No registration number found"),
        }
        found
    }
}

/// Extract the registration number from raw text.
pub fn extract_registration_number(text: &str) -> Option<String> {
    let text = ExtractedText::from_raw(text)?;
    RegistrationNumberExtractor::new().extract(&text).map(|m| m.value)
}
