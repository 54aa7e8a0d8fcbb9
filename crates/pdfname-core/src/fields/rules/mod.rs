//! Rule-based field extractors.

pub mod company;
pub mod patterns;
pub mod registration;

pub use company::{CompanyNameExtractor, extract_company_name};
pub use registration::{RegistrationNumberExtractor, extract_registration_number};

use crate::models::document::{ExtractedText, FieldMatch};

/// Trait for field extractors.
///
/// Extractors run their rules in a fixed order and return the first hit;
/// absence of a field is an ordinary outcome.
pub trait FieldExtractor {
    /// Extract the field from the document text.
    fn extract(&self, text: &ExtractedText) -> Option<FieldMatch>;
}
