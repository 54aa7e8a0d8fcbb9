//! Subcommand implementations.

pub mod config;
pub mod dump;
pub mod inspect;
pub mod menu;
pub mod rename;

use std::path::{Path, PathBuf};
use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use pdfname_core::{ExtractionError, PdfError, PdfnameConfig, PdfnameError, SelectionError};

/// Configuration and search directory shared by the document commands.
pub struct Context {
    pub config: PdfnameConfig,
    pub dir: PathBuf,
}

impl Context {
    /// Load the configuration and resolve the search directory.
    ///
    /// An explicit `--config` must exist; otherwise the default config file
    /// is used when present.
    pub fn load(config_path: Option<&Path>, dir: Option<PathBuf>) -> anyhow::Result<Self> {
        let config = match config_path {
            Some(path) => PdfnameConfig::from_file(path)
                .map_err(|e| anyhow::anyhow!("Failed to load config {}: {}", path.display(), e))?,
            None => {
                let default_path = config::default_config_path();
                if default_path.exists() {
                    PdfnameConfig::from_file(&default_path)?
                } else {
                    PdfnameConfig::default()
                }
            }
        };

        let dir = match dir {
            Some(dir) => dir,
            None => config.selector.resolve_directory(&executable_dir()?),
        };
        debug!("Search directory: {}", dir.display());

        Ok(Self { config, dir })
    }
}

/// Directory holding the running executable.
fn executable_dir() -> anyhow::Result<PathBuf> {
    let exe = std::env::current_exe()?;
    Ok(exe
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(".")))
}

/// Spinner shown while a document is read.
pub(crate) fn spinner(message: &str) -> anyhow::Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}

/// Print a failed run the way a user can act on it.
pub(crate) fn report_error(err: &PdfnameError) {
    println!("{} {}", style("✗").red(), err);

    let hint = match err {
        PdfnameError::Selection(SelectionError::DirectoryNotFound(_)) => {
            Some("Download the PDF first, or pass --dir.")
        }
        PdfnameError::Selection(SelectionError::NoMatchingFiles { .. }) => {
            Some("Download the PDF and try again.")
        }
        PdfnameError::Pdf(PdfError::NoText) => {
            Some("The document may be a scan without a text layer.")
        }
        PdfnameError::Extraction(ExtractionError::InvalidDateFormat(_)) => {
            Some("Fix naming.date_format in the configuration file.")
        }
        PdfnameError::Extraction(_) => {
            Some("Run 'pdfname inspect --lines' to see the extracted text.")
        }
        _ => None,
    };

    if let Some(hint) = hint {
        println!("  {}", style(hint).dim());
    }
}
