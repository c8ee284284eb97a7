//! Directory scanning.
//!
//! A scan looks only at the immediate children of the root directory, splitting
//! them into regular files and existing subfolders. The resulting
//! [`DirectorySnapshot`] is the sole input to classification and is serializable
//! to JSON for the diagnostic side file.

use crate::config::ScanFilter;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// A regular file found at the top level of the scanned directory.
#[derive(Debug, Clone, Serialize)]
pub struct FileEntry {
    /// The file name, including any extension.
    pub name: String,
    /// The full path to the file.
    pub path: PathBuf,
    /// The extension, lowercased and including the leading dot; empty when the
    /// file has none.
    pub extension: String,
}

/// The top-level contents of a directory at scan time.
#[derive(Debug, Clone, Serialize)]
pub struct DirectorySnapshot {
    /// The scanned root directory.
    #[serde(rename = "path")]
    pub root: PathBuf,
    /// Names of the immediate subdirectories.
    pub existing_folders: Vec<String>,
    /// The immediate regular files, sorted by name.
    pub files: Vec<FileEntry>,
}

impl DirectorySnapshot {
    /// True when the scan found no files to organize.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Writes the snapshot as pretty-printed JSON, overwriting any previous copy.
    pub fn write_json(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        fs::write(path, json)
    }
}

/// Errors produced while scanning a directory.
#[derive(Debug)]
pub enum ScanError {
    /// The root path does not exist.
    RootNotFound { path: PathBuf },
    /// The root path exists but is not a directory.
    NotADirectory { path: PathBuf },
    /// The directory listing could not be read.
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl std::fmt::Display for ScanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RootNotFound { path } => {
                write!(f, "Directory not found: {}", path.display())
            }
            Self::NotADirectory { path } => {
                write!(f, "Not a directory: {}", path.display())
            }
            Self::ReadFailed { path, source } => {
                write!(f, "Failed to read directory {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for ScanError {}

/// Scans the immediate children of `root` into a [`DirectorySnapshot`].
///
/// Subdirectories are recorded by name only; files excluded by `filter` are
/// omitted from the snapshot entirely. Entries whose type cannot be determined
/// are skipped.
///
/// # Examples
///
/// ```no_run
/// use tidysort::config::ScanFilter;
/// use tidysort::scanner::scan;
/// use std::path::Path;
///
/// let snapshot = scan(Path::new("/home/user/Downloads"), &ScanFilter::none())?;
/// println!("{} files, {} folders", snapshot.files.len(), snapshot.existing_folders.len());
/// # Ok::<(), tidysort::scanner::ScanError>(())
/// ```
pub fn scan(root: &Path, filter: &ScanFilter) -> Result<DirectorySnapshot, ScanError> {
    if !root.exists() {
        return Err(ScanError::RootNotFound {
            path: root.to_path_buf(),
        });
    }
    if !root.is_dir() {
        return Err(ScanError::NotADirectory {
            path: root.to_path_buf(),
        });
    }

    let entries = fs::read_dir(root).map_err(|e| ScanError::ReadFailed {
        path: root.to_path_buf(),
        source: e,
    })?;

    let mut existing_folders: Vec<String> = Vec::new();
    let mut files: Vec<FileEntry> = Vec::new();

    for entry in entries.flatten() {
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        let name = entry.file_name().to_string_lossy().to_string();

        if file_type.is_dir() {
            existing_folders.push(name);
        } else if file_type.is_file() {
            let path = entry.path();
            if filter.should_include(&path) {
                let extension = extension_of(&path);
                files.push(FileEntry {
                    name,
                    path,
                    extension,
                });
            }
        }
    }

    // Directory listing order is platform-defined; sort for stable logs and plans.
    existing_folders.sort();
    files.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(DirectorySnapshot {
        root: root.to_path_buf(),
        existing_folders,
        files,
    })
}

/// Returns the lowercased, dot-prefixed extension of a path, or an empty string.
fn extension_of(path: &Path) -> String {
    match path.extension() {
        Some(ext) => format!(".{}", ext.to_string_lossy().to_lowercase()),
        None => String::new(),
    }
}
