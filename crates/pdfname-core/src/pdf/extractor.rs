//! PDF text extraction using lopdf and pdf-extract.

use std::fs;
use std::path::Path;

use lopdf::Document;
use tracing::{debug, trace};

use super::{PdfProcessor, Result};
use crate::error::PdfError;
use crate::models::document::ExtractedText;

/// PDF text extractor using lopdf.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
}

/// Text from a single PDF page.
#[derive(Debug, Clone)]
pub struct PdfPage {
    /// Page number (1-indexed).
    pub number: u32,
    /// Extracted text, possibly blank for scanned pages.
    pub text: String,
}

impl PdfPage {
    /// Whether the page has any extractable text.
    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
        }
    }

    /// Read a PDF from disk and load it.
    ///
    /// The file is read into memory in one call, so no handle outlives this
    /// function whatever happens during parsing.
    pub fn open(path: &Path) -> Result<Self> {
        let data = fs::read(path)
            .map_err(|e| PdfError::Parse(format!("{}: {}", path.display(), e)))?;

        let mut extractor = Self::new();
        extractor.load(&data)?;
        Ok(extractor)
    }

    /// Text of the first `page_limit` pages (at least one).
    pub fn pages(&self, page_limit: u32) -> Result<Vec<PdfPage>> {
        let page_count = self.page_count();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        let last = page_limit.clamp(1, page_count);
        (1..=last)
            .map(|number| {
                let text = self.extract_page_text(number)?;
                trace!("Page {} yielded {} chars", number, text.len());
                Ok(PdfPage { number, text })
            })
            .collect()
    }

    /// Text lines of the first `page_limit` pages.
    ///
    /// Fails with [`PdfError::NoText`] when the pages carry no text layer.
    pub fn extract_lines(&self, page_limit: u32) -> Result<ExtractedText> {
        let pages = self.pages(page_limit)?;
        let text = pages
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        ExtractedText::from_raw(&text).ok_or(PdfError::NoText)
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Browser-saved statements are often encrypted with an empty user
        // password. pdf-extract reads `raw_data`, so it gets the decrypted bytes.
        self.raw_data = if doc.is_encrypted() {
            doc.decrypt("").map_err(|_| PdfError::Encrypted)?;
            debug!("Decrypted PDF with an empty password");

            let mut decrypted = Vec::new();
            doc.save_to(&mut decrypted)
                .map_err(|e| PdfError::Parse(format!("cannot re-serialize decrypted PDF: {}", e)))?;
            decrypted
        } else {
            data.to_vec()
        };

        let pages = doc.get_pages().len();
        if pages == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF: {} page(s), {} bytes", pages, self.raw_data.len());
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map_or(0, |doc| doc.get_pages().len() as u32)
    }

    fn extract_text(&self) -> Result<String> {
        if self.document.is_none() {
            return Err(PdfError::Parse("No document loaded".to_string()));
        }

        pdf_extract::extract_text_from_mem(&self.raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))
    }

    fn extract_page_text(&self, page: u32) -> Result<String> {
        let doc = self
            .document
            .as_ref()
            .ok_or_else(|| PdfError::Parse("No document loaded".to_string()))?;

        let page_count = self.page_count();
        if page == 0 || page > page_count {
            return Err(PdfError::InvalidPage(page));
        }

        match doc.extract_text(&[page]) {
            Ok(text) => Ok(text),
            // pdf-extract copes with some font encodings lopdf rejects; for a
            // single-page document its output is exactly that page.
            Err(e) if page_count == 1 => {
                debug!("lopdf text extraction failed ({}), retrying with pdf-extract", e);
                self.extract_text()
            }
            Err(e) => Err(PdfError::TextExtraction(e.to_string())),
        }
    }
}
