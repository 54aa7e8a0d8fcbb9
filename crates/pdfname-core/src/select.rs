//! Selection of the most recently modified document in a directory.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use glob::{MatchOptions, Pattern, glob_with};
use tracing::{debug, info};

use crate::error::SelectionError;

/// A file that passed the extension filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub path: PathBuf,
    pub modified: SystemTime,
}

/// Finds files by extension, compared case-insensitively.
#[derive(Debug, Clone)]
pub struct FileSelector {
    extension: String,
}

impl FileSelector {
    /// Create a selector for `extension`, with or without its leading dot.
    pub fn new(extension: impl AsRef<str>) -> Self {
        Self {
            extension: extension.as_ref().trim_start_matches('.').to_string(),
        }
    }

    /// All matching regular files in `dir`, newest first.
    pub fn candidates(&self, dir: &Path) -> Result<Vec<Candidate>, SelectionError> {
        if !dir.is_dir() {
            return Err(SelectionError::DirectoryNotFound(dir.to_path_buf()));
        }

        let pattern = self.pattern(dir)?;
        let options = MatchOptions {
            case_sensitive: false,
            require_literal_separator: true,
            require_literal_leading_dot: false,
        };
        let paths = glob_with(&pattern, options)
            .map_err(|e| SelectionError::Pattern(e.to_string()))?;

        let mut candidates = Vec::new();
        for entry in paths {
            let path = entry.map_err(|e| SelectionError::Io {
                path: e.path().to_path_buf(),
                source: e.into(),
            })?;

            let metadata = path.metadata().map_err(|source| SelectionError::Io {
                path: path.clone(),
                source,
            })?;
            if !metadata.is_file() {
                continue;
            }

            let modified = metadata.modified().map_err(|source| SelectionError::Io {
                path: path.clone(),
                source,
            })?;
            candidates.push(Candidate { path, modified });
        }

        debug!("Found {} .{} files in {}", candidates.len(), self.extension, dir.display());

        // Stable sort: equal timestamps keep glob's alphabetical order.
        candidates.sort_by(|a, b| b.modified.cmp(&a.modified));
        Ok(candidates)
    }

    /// The most recently modified matching file in `dir`.
    ///
    /// Files sharing the newest timestamp are not ordered in any meaningful
    /// way; whichever sorts first alphabetically is returned.
    pub fn latest(&self, dir: &Path) -> Result<PathBuf, SelectionError> {
        let latest = self
            .candidates(dir)?
            .into_iter()
            .next()
            .ok_or_else(|| SelectionError::NoMatchingFiles {
                dir: dir.to_path_buf(),
                extension: self.extension.clone(),
            })?;

        info!("Latest file: {}", latest.path.display());
        Ok(latest.path)
    }

    fn pattern(&self, dir: &Path) -> Result<String, SelectionError> {
        let dir = dir.to_str().ok_or_else(|| {
            SelectionError::Pattern(format!("non UTF-8 path: {}", dir.display()))
        })?;

        let file_pattern = format!("*.{}", Pattern::escape(&self.extension));
        let pattern = Path::new(&Pattern::escape(dir)).join(file_pattern);
        Ok(pattern.to_string_lossy().into_owned())
    }
}

impl Default for FileSelector {
    fn default() -> Self {
        Self::new("pdf")
    }
}
