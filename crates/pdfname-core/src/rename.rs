//! Renames the latest downloaded document after its contents.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{ExtractionError, RenameError, Result};
use crate::fields::FieldParser;
use crate::models::config::{NamingMode, PdfnameConfig};
use crate::models::document::{ComposedName, ExtractedFields, ExtractedText};
use crate::naming::{compose_from_extracted, compose_from_first_line};
use crate::pdf::PdfExtractor;
use crate::select::FileSelector;

/// Everything known about the selected document before renaming it.
#[derive(Debug, Clone, Serialize)]
pub struct RenamePlan {
    /// The selected document.
    pub source: PathBuf,
    /// Text of the leading pages.
    #[serde(skip)]
    pub text: ExtractedText,
    /// Fields found in the text.
    pub fields: ExtractedFields,
    /// Name the document would get, or the field that prevents it.
    #[serde(serialize_with = "serialize_proposed")]
    pub proposed: std::result::Result<ComposedName, ExtractionError>,
}

fn serialize_proposed<S: serde::Serializer>(
    proposed: &std::result::Result<ComposedName, ExtractionError>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match proposed {
        Ok(name) => serializer.serialize_some(name.as_str()),
        Err(_) => serializer.serialize_none(),
    }
}

/// What happened to the document.
#[derive(Debug)]
pub enum RenameOutcome {
    /// The file now carries its new name.
    Renamed { from: PathBuf, to: PathBuf },
    /// The file already had the composed name.
    AlreadyNamed(PathBuf),
    /// The rename was not carried out; the file is untouched.
    Skipped {
        path: PathBuf,
        suggested: ComposedName,
        reason: RenameError,
    },
}

impl RenameOutcome {
    /// Where the document is after the run.
    pub fn path(&self) -> &Path {
        match self {
            RenameOutcome::Renamed { to, .. } => to,
            RenameOutcome::AlreadyNamed(path) => path,
            RenameOutcome::Skipped { path, .. } => path,
        }
    }
}

/// Selects, reads and renames the latest document in a directory.
pub struct Renamer<'c> {
    dir: PathBuf,
    config: &'c PdfnameConfig,
    selector: FileSelector,
    parser: FieldParser,
    date: Option<NaiveDate>,
}

impl<'c> Renamer<'c> {
    /// Create a renamer for `dir`.
    pub fn new(dir: impl Into<PathBuf>, config: &'c PdfnameConfig) -> Self {
        Self {
            dir: dir.into(),
            selector: FileSelector::new(&config.selector.extension),
            parser: FieldParser::new(),
            config,
            date: None,
        }
    }

    /// Use a fixed date instead of today's local date.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Directory searched for documents.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Select the latest document, read it and compose its new name.
    ///
    /// Nothing on disk changes.
    pub fn plan(&self, mode: NamingMode) -> Result<RenamePlan> {
        let source = self.selector.latest(&self.dir)?;

        let text = PdfExtractor::open(&source)?.extract_lines(self.config.pdf.page_limit)?;
        debug!("Extracted {} lines from {}", text.lines().len(), source.display());

        let fields = self.parser.parse(&text);
        let proposed = match mode {
            NamingMode::FirstLine => Ok(compose_from_first_line(&text, &self.config.naming)),
            NamingMode::Fields => {
                compose_from_extracted(self.today(), &fields, &self.config.naming)
            }
        };

        Ok(RenamePlan {
            source,
            text,
            fields,
            proposed,
        })
    }

    /// Rename the latest document.
    ///
    /// Selection, extraction and missing fields abort with an error; a
    /// rename that cannot be carried out is reported in the outcome instead.
    pub fn run(&self, mode: NamingMode) -> Result<RenameOutcome> {
        let plan = self.plan(mode)?;
        let name = plan.proposed?;
        info!("New file name: {}", name);

        Ok(rename_to(&plan.source, name))
    }

    fn today(&self) -> NaiveDate {
        self.date.unwrap_or_else(|| Local::now().date_naive())
    }
}

/// Give `source` the file name `name` within its own directory.
pub fn rename_to(source: &Path, name: ComposedName) -> RenameOutcome {
    let target = match source.parent() {
        Some(parent) => parent.join(&name),
        None => PathBuf::from(name.as_str()),
    };

    if target == source {
        info!("{} is already correctly named", source.display());
        return RenameOutcome::AlreadyNamed(source.to_path_buf());
    }

    if target.exists() && !same_file(source, &target) {
        warn!("Not renaming {}: {} exists", source.display(), target.display());
        return RenameOutcome::Skipped {
            path: source.to_path_buf(),
            suggested: name,
            reason: RenameError::DestinationExists(target),
        };
    }

    match fs::rename(source, &target) {
        Ok(()) => {
            info!("Renamed {} -> {}", source.display(), target.display());
            RenameOutcome::Renamed {
                from: source.to_path_buf(),
                to: target,
            }
        }
        Err(e) => {
            warn!("Failed to rename {}: {}", source.display(), e);
            let reason = if is_locked(&e) {
                RenameError::DestinationLocked(e)
            } else {
                RenameError::Filesystem(e)
            };
            RenameOutcome::Skipped {
                path: source.to_path_buf(),
                suggested: name,
                reason,
            }
        }
    }
}

/// Whether two paths name the same file, e.g. a case-only rename on a
/// case-insensitive file system.
fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Errors meaning another process holds the file.
fn is_locked(err: &io::Error) -> bool {
    // ERROR_SHARING_VIOLATION
    const WINDOWS_SHARING_VIOLATION: i32 = 32;

    matches!(
        err.kind(),
        io::ErrorKind::PermissionDenied | io::ErrorKind::ResourceBusy
    ) || (cfg!(windows) && err.raw_os_error() == Some(WINDOWS_SHARING_VIOLATION))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Field, PdfError, PdfnameError, SelectionError};
    use crate::testing::{build_pdf, build_unicode_pdf};
    use pretty_assertions::assert_eq;

    fn write_pdf(dir: &Path, name: &str, pages: &[&[&str]]) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, build_pdf(pages)).unwrap();
        path
    }

    fn file_names(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_first_line_rename() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_pdf(
            dir.path(),
            "download.pdf",
            &[&["Tax Invoice: 2024/01?", "Total 1000"]],
        );
        let config = PdfnameConfig::default();

        let outcome = Renamer::new(dir.path(), &config).run(NamingMode::FirstLine).unwrap();

        let expected = dir.path().join("Tax Invoice 202401.pdf");
        match &outcome {
            RenameOutcome::Renamed { from, to } => {
                assert_eq!(from, &source);
                assert_eq!(to, &expected);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(outcome.path(), expected.as_path());
        assert_eq!(file_names(dir.path()), vec!["Tax Invoice 202401.pdf"]);
    }

    #[test]
    fn test_rename_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        write_pdf(dir.path(), "download.pdf", &[&["Quarterly Report"]]);
        let config = PdfnameConfig::default();
        let renamer = Renamer::new(dir.path(), &config);

        let first = renamer.run(NamingMode::FirstLine).unwrap();
        assert!(matches!(first, RenameOutcome::Renamed { .. }));
        for _ in 0..2 {
            let outcome = renamer.run(NamingMode::FirstLine).unwrap();
            assert!(matches!(outcome, RenameOutcome::AlreadyNamed(_)));
        }
        assert_eq!(file_names(dir.path()), vec!["Quarterly Report.pdf"]);
    }

    #[test]
    fn test_existing_destination_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let existing = write_pdf(dir.path(), "Quarterly Report.pdf", &[&["Other"]]);
        let older = std::time::SystemTime::now() - std::time::Duration::from_secs(60);
        fs::File::options()
            .write(true)
            .open(&existing)
            .unwrap()
            .set_modified(older)
            .unwrap();
        let source = write_pdf(dir.path(), "download.pdf", &[&["Quarterly Report"]]);
        let config = PdfnameConfig::default();

        let outcome = Renamer::new(dir.path(), &config).run(NamingMode::FirstLine).unwrap();

        match outcome {
            RenameOutcome::Skipped { path, suggested, reason } => {
                assert_eq!(path, source);
                assert_eq!(suggested.as_str(), "Quarterly Report.pdf");
                assert!(matches!(reason, RenameError::DestinationExists(p) if p == existing));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(file_names(dir.path()), vec!["Quarterly Report.pdf", "download.pdf"]);
    }

    #[test]
    fn test_fields_mode_reports_missing_field() {
        let dir = tempfile::tempdir().unwrap();
        write_pdf(dir.path(), "download.pdf", &[&["Registration 123-45-67890"]]);
        let config = PdfnameConfig::default();

        let result = Renamer::new(dir.path(), &config).run(NamingMode::Fields);

        assert!(matches!(
            result,
            Err(PdfnameError::Extraction(ExtractionError::MissingField(Field::CompanyName)))
        ));
        assert_eq!(file_names(dir.path()), vec!["download.pdf"]);
    }

    #[test]
    fn test_plan_leaves_directory_alone() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_pdf(dir.path(), "download.pdf", &[&["Registration 123-45-67890"]]);
        let config = PdfnameConfig::default();
        let renamer = Renamer::new(dir.path(), &config)
            .with_date(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());

        let plan = renamer.plan(NamingMode::Fields).unwrap();
        assert_eq!(plan.source, source);
        assert_eq!(
            plan.fields.registration_number.as_ref().map(|m| m.value.as_str()),
            Some("123-45-67890")
        );
        assert_eq!(plan.fields.company_name, None);
        assert_eq!(plan.proposed, Err(ExtractionError::MissingField(Field::CompanyName)));

        let plan = renamer.plan(NamingMode::FirstLine).unwrap();
        assert_eq!(plan.proposed.unwrap().as_str(), "Registration 123-45-.pdf");
        assert_eq!(file_names(dir.path()), vec!["download.pdf"]);
    }

    #[test]
    fn test_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let config = PdfnameConfig::default();

        let result = Renamer::new(dir.path().join("missing"), &config).run(NamingMode::Fields);
        assert!(matches!(
            result,
            Err(PdfnameError::Selection(SelectionError::DirectoryNotFound(_)))
        ));
    }

    #[test]
    fn test_no_pdfs() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("readme.txt"), "hello").unwrap();
        let config = PdfnameConfig::default();

        let result = Renamer::new(dir.path(), &config).run(NamingMode::FirstLine);
        assert!(matches!(
            result,
            Err(PdfnameError::Selection(SelectionError::NoMatchingFiles { .. }))
        ));
    }

    #[test]
    fn test_scanned_pdf_without_text() {
        let dir = tempfile::tempdir().unwrap();
        write_pdf(dir.path(), "scan.pdf", &[&[]]);
        let config = PdfnameConfig::default();

        let result = Renamer::new(dir.path(), &config).run(NamingMode::FirstLine);
        assert!(matches!(result, Err(PdfnameError::Pdf(PdfError::NoText))));
        assert_eq!(file_names(dir.path()), vec!["scan.pdf"]);
    }

    #[test]
    fn test_fields_rename() {
        let dir = tempfile::tempdir().unwrap();
        let pdf = build_unicode_pdf(&[&[
            "사업자등록증",
            "상호 테스트상사 주식회사",
            "등록번호: 123-45-67890",
        ]]);
        let source = dir.path().join("download.pdf");
        fs::write(&source, pdf).unwrap();
        let config = PdfnameConfig::default();
        let renamer = Renamer::new(dir.path(), &config)
            .with_date(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());

        let outcome = renamer.run(config.naming.mode).unwrap();

        let expected = dir.path().join("240105_테스트상사_123-45-67890.pdf");
        match &outcome {
            RenameOutcome::Renamed { from, to } => {
                assert_eq!(from, &source);
                assert_eq!(to, &expected);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(file_names(dir.path()), vec!["240105_테스트상사_123-45-67890.pdf"]);

        let outcome = renamer.run(NamingMode::Fields).unwrap();
        assert!(matches!(outcome, RenameOutcome::AlreadyNamed(p) if p == expected));
    }

    #[test]
    fn test_rename_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("gone.pdf");

        let outcome = rename_to(&source, ComposedName::new("new.pdf".to_string()));
        match outcome {
            RenameOutcome::Skipped { path, reason, .. } => {
                assert_eq!(path, source);
                assert!(matches!(reason, RenameError::Filesystem(_)));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_lock_errors() {
        assert!(is_locked(&io::Error::from(io::ErrorKind::PermissionDenied)));
        assert!(is_locked(&io::Error::from(io::ErrorKind::ResourceBusy)));
        assert!(!is_locked(&io::Error::from(io::ErrorKind::NotFound)));
    }

}
