//! Error types for the pdfname-core library.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the pdfname library.
#[derive(Error, Debug)]
pub enum PdfnameError {
    /// File selection error.
    #[error("selection error: {0}")]
    Selection(#[from] SelectionError),

    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Field extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O error while reading or writing the configuration file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed or inconsistent configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised while looking for the document to rename.
#[derive(Error, Debug)]
pub enum SelectionError {
    /// The search directory does not exist.
    #[error("directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    /// The directory holds no file with the wanted extension.
    #[error("no .{extension} files in {}", dir.display())]
    NoMatchingFiles { dir: PathBuf, extension: String },

    /// The directory path could not be turned into a search pattern.
    #[error("invalid search pattern: {0}")]
    Pattern(String),

    /// Reading a directory entry or its metadata failed.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// The pages hold no extractable text (usually a scan).
    #[error("no text could be extracted from the PDF")]
    NoText,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),
}

/// A field the structured file name is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    RegistrationNumber,
    CompanyName,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::RegistrationNumber => f.write_str("registration number"),
            Field::CompanyName => f.write_str("company name"),
        }
    }
}

/// Errors related to field extraction and name composition.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// Required field is missing.
    #[error("missing required field: {0}")]
    MissingField(Field),

    /// The configured date format has a specifier chrono cannot render.
    #[error("invalid date format: {0:?}")]
    InvalidDateFormat(String),
}

/// Reasons a rename was not carried out.
///
/// These never abort a run: the renamer reports them in
/// [`RenameOutcome::Skipped`](crate::rename::RenameOutcome) and leaves the
/// source file where it was.
#[derive(Error, Debug)]
pub enum RenameError {
    /// The file is held open by another process.
    #[error("file is in use by another program")]
    DestinationLocked(#[source] std::io::Error),

    /// Another file already carries the target name.
    #[error("a different file named {} already exists", .0.display())]
    DestinationExists(PathBuf),

    /// Any other failure of the rename call.
    #[error("rename failed: {0}")]
    Filesystem(#[source] std::io::Error),
}

/// Result type for the pdfname library.
pub type Result<T> = std::result::Result<T, PdfnameError>;
