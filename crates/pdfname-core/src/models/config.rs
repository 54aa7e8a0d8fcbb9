//! Configuration structures for the rename pipeline.

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{PdfnameError, Result};

/// Main configuration for pdfname.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfnameConfig {
    /// Where to look for the document.
    pub selector: SelectorConfig,

    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// File name composition configuration.
    pub naming: NamingConfig,
}

/// Download directory and file filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Absolute directory to search. Overrides `subdirectory` when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,

    /// Directory name resolved next to the executable.
    pub subdirectory: String,

    /// File extension to match, compared case-insensitively.
    pub extension: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            directory: None,
            subdirectory: ".playwright-mcp".to_string(),
            extension: "pdf".to_string(),
        }
    }
}

impl SelectorConfig {
    /// Resolve the directory to search.
    ///
    /// `base` is the directory `subdirectory` is relative to, normally the
    /// directory holding the running executable.
    pub fn resolve_directory(&self, base: &Path) -> PathBuf {
        match &self.directory {
            Some(dir) => dir.clone(),
            None => base.join(&self.subdirectory),
        }
    }
}

/// PDF processing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Number of leading pages to read text from.
    pub page_limit: u32,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self { page_limit: 1 }
    }
}

/// How the new file name is derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingMode {
    /// Sanitized first line of the document.
    FirstLine,
    /// `{date}_{company}_{registration}.pdf`.
    #[default]
    Fields,
}

/// File name composition configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    /// Naming variant used by `rename`.
    pub mode: NamingMode,

    /// Maximum characters kept from the first line.
    pub max_title_chars: usize,

    /// Stem used when the first line sanitizes to nothing.
    pub fallback_name: String,

    /// chrono format for the date prefix.
    pub date_format: String,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            mode: NamingMode::Fields,
            max_title_chars: 20,
            fallback_name: "renamed_pdf".to_string(),
            date_format: "%y%m%d".to_string(),
        }
    }
}

impl NamingConfig {
    /// Reject values the naming step could not use.
    pub fn validate(&self) -> Result<()> {
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(PdfnameError::Config(format!(
                "naming.date_format {:?} is not a valid chrono format",
                self.date_format
            )));
        }
        if self.max_title_chars == 0 {
            return Err(PdfnameError::Config(
                "naming.max_title_chars must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl PdfnameConfig {
    /// Load and validate configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| PdfnameError::Config(format!("{}: {}", path.display(), e)))?;
        config.naming.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| PdfnameError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_missing_keys_take_defaults() {
        let config: PdfnameConfig =
            serde_json::from_str(r#"{"naming": {"mode": "first_line"}}"#).unwrap();

        assert_eq!(config.naming.mode, NamingMode::FirstLine);
        assert_eq!(config.naming.max_title_chars, 20);
        assert_eq!(config.selector, SelectorConfig::default());
        assert_eq!(config.pdf.page_limit, 1);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = PdfnameConfig::default();
        config.selector.directory = Some(PathBuf::from("/tmp/downloads"));
        config.naming.fallback_name = "document".to_string();
        config.save(&path).unwrap();

        assert_eq!(PdfnameConfig::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_load_rejects_bad_date_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"naming": {"date_format": "%y%Q"}}"#).unwrap();

        let err = PdfnameConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, PdfnameError::Config(ref msg) if msg.contains("%y%Q")));
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();

        let missing = PdfnameConfig::from_file(&dir.path().join("missing.json"));
        assert!(matches!(missing, Err(PdfnameError::Io(_))));

        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(PdfnameConfig::from_file(&path), Err(PdfnameError::Config(_))));
    }

    #[test]
    fn test_resolve_directory() {
        let selector = SelectorConfig::default();
        assert_eq!(
            selector.resolve_directory(Path::new("/opt/tool")),
            PathBuf::from("/opt/tool/.playwright-mcp")
        );

        let selector = SelectorConfig {
            directory: Some(PathBuf::from("/data/in")),
            ..SelectorConfig::default()
        };
        assert_eq!(
            selector.resolve_directory(Path::new("/opt/tool")),
            PathBuf::from("/data/in")
        );
    }
}
