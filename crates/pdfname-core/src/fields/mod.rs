//! Registration number and company name extraction.

mod parser;
pub mod rules;

pub use parser::FieldParser;
pub use rules::{CompanyNameExtractor, FieldExtractor, RegistrationNumberExtractor};
