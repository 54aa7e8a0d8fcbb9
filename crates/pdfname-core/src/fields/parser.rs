//! Runs every field extractor over a document.

use tracing::info;

use super::rules::{CompanyNameExtractor, FieldExtractor, RegistrationNumberExtractor};
use crate::models::document::{ExtractedFields, ExtractedText};

/// Field parser combining the registration number and company name rules.
#[derive(Debug, Default, Clone, Copy)]
pub struct FieldParser {
    registration: RegistrationNumberExtractor,
    company: CompanyNameExtractor,
}

impl FieldParser {
    /// Create a new parser.
    pub fn new() -> Self {
        Self::default()
    }

    /// Extract both fields from the document text.
    pub fn parse(&self, text: &ExtractedText) -> ExtractedFields {
        let fields = ExtractedFields {
            registration_number: self.registration.extract(text),
            company_name: self.company.extract(text),
        };

        info!(
            "Extracted company name {:?}, registration number {:?}",
            fields.company_name.as_ref().map(|m| m.value.as_str()),
            fields.registration_number.as_ref().map(|m| m.value.as_str()),
        );
        fields
    }
}
