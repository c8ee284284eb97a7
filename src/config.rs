//! Scan filter configuration.
//!
//! An optional TOML file tells the scanner which top-level files to leave out of
//! the snapshot. The default configuration excludes nothing, so without a config
//! file every regular file in the directory is scanned, hidden files included.
//!
//! ```toml
//! [scan]
//! skip_hidden = true
//! skip_names = ["Thumbs.db", "desktop.ini"]
//! skip_extensions = ["tmp", "partial"]
//! skip_patterns = ["~$*"]
//! skip_regex = ['^\d{8}-backup']
//! ```

use glob::Pattern;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Default config file looked up in the working directory.
pub const CONFIG_FILE: &str = "tidysort.toml";

/// Errors from loading or compiling the scan configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// An explicitly requested config file does not exist.
    NotFound(PathBuf),
    /// The file is not valid TOML for the expected structure.
    Invalid(String),
    /// A glob pattern failed to compile.
    BadPattern(String),
    /// A regex failed to compile, with the compiler's reason.
    BadRegex { pattern: String, reason: String },
    /// The file exists but could not be read.
    Io(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NotFound(path) => {
                write!(f, "Configuration file not found: {}", path.display())
            }
            ConfigError::Invalid(msg) => write!(f, "Invalid configuration: {}", msg),
            ConfigError::BadPattern(pattern) => {
                write!(f, "Invalid glob pattern '{}'", pattern)
            }
            ConfigError::BadRegex { pattern, reason } => {
                write!(f, "Invalid regex pattern '{}': {}", pattern, reason)
            }
            ConfigError::Io(msg) => write!(f, "IO error reading configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// The on-disk configuration shape.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScanConfig {
    #[serde(default)]
    pub scan: ScanRules,
}

/// Rules under the `[scan]` table.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScanRules {
    /// Skip files whose name starts with a dot. Off by default.
    #[serde(default)]
    pub skip_hidden: bool,

    /// Exact file names to skip.
    #[serde(default)]
    pub skip_names: Vec<String>,

    /// Extensions to skip, with or without the leading dot.
    #[serde(default)]
    pub skip_extensions: Vec<String>,

    /// Glob patterns matched against the file name.
    #[serde(default)]
    pub skip_patterns: Vec<String>,

    /// Regex patterns matched against the file name.
    #[serde(default)]
    pub skip_regex: Vec<String>,
}

impl ScanConfig {
    /// Loads the configuration.
    ///
    /// An explicit path must exist; otherwise `tidysort.toml` in the working
    /// directory is used when present, and the empty default when not.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load_from_file(path);
        }

        let local = PathBuf::from(CONFIG_FILE);
        if local.exists() {
            return Self::load_from_file(&local);
        }

        Ok(Self::default())
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        toml::from_str(&content).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Validates and compiles the rules into a matcher for the scanner.
    pub fn compile(self) -> Result<ScanFilter, ConfigError> {
        let patterns = self
            .scan
            .skip_patterns
            .iter()
            .map(|p| Pattern::new(p).map_err(|_| ConfigError::BadPattern(p.clone())))
            .collect::<Result<Vec<_>, _>>()?;

        let regexes = self
            .scan
            .skip_regex
            .iter()
            .map(|p| {
                Regex::new(p).map_err(|e| ConfigError::BadRegex {
                    pattern: p.clone(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ScanFilter {
            skip_hidden: self.scan.skip_hidden,
            names: self.scan.skip_names.into_iter().collect(),
            extensions: self
                .scan
                .skip_extensions
                .iter()
                .map(|ext| ext.trim_start_matches('.').to_lowercase())
                .collect(),
            patterns,
            regexes,
        })
    }
}

/// Compiled skip rules applied by the scanner to each candidate file.
pub struct ScanFilter {
    skip_hidden: bool,
    names: HashSet<String>,
    extensions: HashSet<String>,
    patterns: Vec<Pattern>,
    regexes: Vec<Regex>,
}

impl ScanFilter {
    /// A filter that includes everything.
    pub fn none() -> Self {
        Self {
            skip_hidden: false,
            names: HashSet::new(),
            extensions: HashSet::new(),
            patterns: Vec::new(),
            regexes: Vec::new(),
        }
    }

    /// Whether the scanner should include this file in the snapshot.
    pub fn should_include(&self, path: &Path) -> bool {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();

        if self.skip_hidden && name.starts_with('.') {
            return false;
        }

        if self.names.contains(name.as_ref()) {
            return false;
        }

        if let Some(ext) = path.extension() {
            let ext = ext.to_string_lossy().to_lowercase();
            if self.extensions.contains(&ext) {
                return false;
            }
        }

        if self.patterns.iter().any(|p| p.matches(&name)) {
            return false;
        }

        if self.regexes.iter().any(|r| r.is_match(&name)) {
            return false;
        }

        true
    }
}

impl Default for ScanFilter {
    fn default() -> Self {
        Self::none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(rules: ScanRules) -> ScanFilter {
        ScanConfig { scan: rules }
            .compile()
            .expect("Rules should compile")
    }

    #[test]
    fn test_default_filter_includes_everything() {
        let filter = ScanFilter::none();
        assert!(filter.should_include(Path::new("report.pdf")));
        assert!(filter.should_include(Path::new(".hidden")));
        assert!(filter.should_include(Path::new("no_extension")));
    }

    #[test]
    fn test_default_config_compiles_to_empty_filter() {
        let filter = ScanConfig::default().compile().expect("Should compile");
        assert!(filter.should_include(Path::new(".DS_Store")));
        assert!(filter.should_include(Path::new("anything.tmp")));
    }

    #[test]
    fn test_skip_hidden() {
        let filter = compile(ScanRules {
            skip_hidden: true,
            ..Default::default()
        });
        assert!(!filter.should_include(Path::new(".DS_Store")));
        assert!(filter.should_include(Path::new("visible.txt")));
    }

    #[test]
    fn test_skip_exact_names() {
        let filter = compile(ScanRules {
            skip_names: vec!["Thumbs.db".to_string()],
            ..Default::default()
        });
        assert!(!filter.should_include(Path::new("Thumbs.db")));
        assert!(filter.should_include(Path::new("photo.jpg")));
    }

    #[test]
    fn test_skip_extensions_normalizes_dot_and_case() {
        let filter = compile(ScanRules {
            skip_extensions: vec![".TMP".to_string(), "bak".to_string()],
            ..Default::default()
        });
        assert!(!filter.should_include(Path::new("download.tmp")));
        assert!(!filter.should_include(Path::new("notes.BAK")));
        assert!(filter.should_include(Path::new("notes.txt")));
    }

    #[test]
    fn test_skip_glob_patterns() {
        let filter = compile(ScanRules {
            skip_patterns: vec!["~$*".to_string()],
            ..Default::default()
        });
        assert!(!filter.should_include(Path::new("~$draft.docx")));
        assert!(filter.should_include(Path::new("draft.docx")));
    }

    #[test]
    fn test_skip_regex() {
        let filter = compile(ScanRules {
            skip_regex: vec![r"^\d{8}-backup".to_string()],
            ..Default::default()
        });
        assert!(!filter.should_include(Path::new("20240101-backup.zip")));
        assert!(filter.should_include(Path::new("backup.zip")));
    }

    #[test]
    fn test_invalid_glob_is_rejected() {
        let result = ScanConfig {
            scan: ScanRules {
                skip_patterns: vec!["[unclosed".to_string()],
                ..Default::default()
            },
        }
        .compile();
        assert!(matches!(result, Err(ConfigError::BadPattern(_))));
    }

    #[test]
    fn test_invalid_regex_is_rejected() {
        let result = ScanConfig {
            scan: ScanRules {
                skip_regex: vec!["[unclosed(".to_string()],
                ..Default::default()
            },
        }
        .compile();
        assert!(matches!(result, Err(ConfigError::BadRegex { .. })));
    }

    #[test]
    fn test_parse_toml_document() {
        let config: ScanConfig = toml::from_str(
            r#"
            [scan]
            skip_hidden = true
            skip_names = ["Thumbs.db"]
            skip_extensions = ["tmp"]
            "#,
        )
        .expect("Should parse");

        assert!(config.scan.skip_hidden);
        assert_eq!(config.scan.skip_names, vec!["Thumbs.db"]);
        let filter = config.compile().expect("Should compile");
        assert!(!filter.should_include(Path::new("scratch.tmp")));
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let result = ScanConfig::load(Some(Path::new("/no/such/tidysort.toml")));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }
}
