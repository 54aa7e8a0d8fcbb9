//! Core library for renaming downloaded PDFs after their contents.
//!
//! This crate provides:
//! - Selection of the most recently modified PDF in a download directory
//! - First-page text extraction
//! - Registration number and company name extraction for Korean business documents
//! - File name composition and the rename itself

pub mod error;
pub mod fields;
pub mod models;
pub mod naming;
pub mod pdf;
pub mod rename;
pub mod select;

#[cfg(test)]
mod testing;

pub use error::{
    ExtractionError, Field, PdfError, PdfnameError, RenameError, Result, SelectionError,
};
pub use fields::{CompanyNameExtractor, FieldExtractor, FieldParser, RegistrationNumberExtractor};
pub use models::config::{NamingMode, PdfnameConfig};
pub use models::document::{ComposedName, ExtractedFields, ExtractedText, FieldMatch, Tier};
pub use pdf::{PdfExtractor, PdfPage, PdfProcessor};
pub use rename::{RenameOutcome, RenamePlan, Renamer};
pub use select::FileSelector;
