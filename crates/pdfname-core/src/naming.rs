//! File name composition.

use std::fmt::Write;

use chrono::NaiveDate;

use crate::error::{ExtractionError, Field};
use crate::models::config::NamingConfig;
use crate::models::document::{ComposedName, ExtractedFields, ExtractedText};

/// Characters rejected by common file systems.
const ILLEGAL_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

const EXTENSION: &str = ".pdf";

/// Remove characters that cannot appear in a file name.
pub fn sanitize(text: &str) -> String {
    text.chars()
        .filter(|c| !ILLEGAL_CHARS.contains(c) && !c.is_control())
        .collect()
}

/// Name a document after its first line.
///
/// The line is sanitized, cut to `max_title_chars` characters and trimmed;
/// an empty result falls back to `fallback_name`.
pub fn compose_from_first_line(text: &ExtractedText, config: &NamingConfig) -> ComposedName {
    let clean = sanitize(text.first_line());
    let title: String = clean.chars().take(config.max_title_chars).collect();

    let stem = match title.trim() {
        "" => config.fallback_name.as_str(),
        stem => stem,
    };

    ComposedName::new(format!("{}{}", stem, EXTENSION))
}

/// Name a document `{date}_{company}_{registration}.pdf`.
///
/// The company name is checked before the registration number, so a
/// document missing both reports the company name.
pub fn compose_from_fields(
    date: NaiveDate,
    company_name: Option<&str>,
    registration_number: Option<&str>,
    config: &NamingConfig,
) -> Result<ComposedName, ExtractionError> {
    let company = company_name
        .map(sanitize)
        .filter(|s| !s.trim().is_empty())
        .ok_or(ExtractionError::MissingField(Field::CompanyName))?;
    let registration = registration_number
        .map(sanitize)
        .filter(|s| !s.trim().is_empty())
        .ok_or(ExtractionError::MissingField(Field::RegistrationNumber))?;

    Ok(ComposedName::new(format!(
        "{}_{}_{}{}",
        date_prefix(date, &config.date_format)?,
        company.trim(),
        registration.trim(),
        EXTENSION
    )))
}

/// Render `date` with `format`, dropping characters a file name cannot hold.
fn date_prefix(date: NaiveDate, format: &str) -> Result<String, ExtractionError> {
    let mut prefix = String::new();
    write!(prefix, "{}", date.format(format))
        .map_err(|_| ExtractionError::InvalidDateFormat(format.to_string()))?;
    Ok(sanitize(&prefix))
}

/// [`compose_from_fields`] over parser output.
pub fn compose_from_extracted(
    date: NaiveDate,
    fields: &ExtractedFields,
    config: &NamingConfig,
) -> Result<ComposedName, ExtractionError> {
    compose_from_fields(
        date,
        fields.company_name.as_ref().map(|m| m.value.as_str()),
        fields.registration_number.as_ref().map(|m| m.value.as_str()),
        config,
    )
}
