//! Static extension-to-category rules.
//!
//! The rule table is an *ordered* list of (category, extension set) pairs and
//! lookup is first-match. Ordering is part of the contract: `.jsp` appears under
//! both "Web Files" and "Developer Files" in the source data, and the earlier
//! listing wins, so `.jsp` always classifies as "Web Files".
//!
//! # Examples
//!
//! ```
//! use tidysort::category::CategoryTable;
//!
//! let table = CategoryTable::new();
//! assert_eq!(table.classify(".pdf"), Some("Document Files"));
//! assert_eq!(table.classify(".jsp"), Some("Web Files"));
//! assert_eq!(table.classify(".xyz"), None);
//! ```

use crate::logger::RunLogger;
use crate::plan::{Classifier, OrganizationPlan};
use crate::scanner::DirectorySnapshot;
use std::collections::HashSet;

/// The built-in rules, in match order. Extensions are lowercased and
/// dot-prefixed, the same normal form the scanner produces.
const RULES: &[(&str, &[&str])] = &[
    (
        "Image Files",
        &[
            ".jpg", ".jpeg", ".png", ".gif", ".bmp", ".svg", ".tiff", ".ico", ".webp", ".heic",
        ],
    ),
    (
        "Video Files",
        &[
            ".mp4", ".mkv", ".avi", ".mov", ".wmv", ".flv", ".webm", ".mpg", ".mpeg", ".3gp",
        ],
    ),
    (
        "Audio Files",
        &[".mp3", ".wav", ".flac", ".ogg", ".aac", ".m4a", ".wma"],
    ),
    (
        "Document Files",
        &[
            ".pdf", ".doc", ".docx", ".odt", ".rtf", ".xls", ".xlsx", ".ppt", ".pptx", ".epub",
        ],
    ),
    ("Text Files", &[".txt", ".md", ".log", ".csv"]),
    // "Web Files" must stay ahead of "Developer Files": both list .jsp and the
    // first listing wins.
    (
        "Web Files",
        &[
            ".html", ".htm", ".xhtml", ".css", ".js", ".jsp", ".php", ".asp", ".aspx",
        ],
    ),
    (
        "Developer Files",
        &[
            ".py", ".java", ".c", ".cpp", ".h", ".hpp", ".cs", ".rs", ".go", ".rb", ".sh", ".jsp",
            ".sql", ".json", ".xml", ".yml", ".yaml", ".toml",
        ],
    ),
    (
        "Archive Files",
        &[".zip", ".rar", ".7z", ".tar", ".gz", ".bz2", ".xz", ".iso"],
    ),
    (
        "Executable Files",
        &[".exe", ".msi", ".bat", ".apk", ".deb", ".rpm", ".dmg"],
    ),
    ("Font Files", &[".ttf", ".otf", ".woff", ".woff2"]),
];

/// The static classifier: ordered categories with their extension sets.
pub struct CategoryTable {
    entries: Vec<(&'static str, HashSet<&'static str>)>,
}

impl CategoryTable {
    /// Builds the table from the built-in rules.
    pub fn new() -> Self {
        Self {
            entries: RULES
                .iter()
                .map(|(category, extensions)| (*category, extensions.iter().copied().collect()))
                .collect(),
        }
    }

    /// Returns the category for an extension, or `None` when no rule matches.
    ///
    /// The extension is expected dot-prefixed; case is ignored. Lookup walks the
    /// categories in declaration order and stops at the first containing set.
    pub fn classify(&self, extension: &str) -> Option<&'static str> {
        if extension.is_empty() {
            return None;
        }
        let extension = extension.to_lowercase();
        self.entries
            .iter()
            .find(|(_, extensions)| extensions.contains(extension.as_str()))
            .map(|(category, _)| *category)
    }

    /// Builds an organization plan for a snapshot.
    ///
    /// Files whose extension matches no category are omitted from the plan and
    /// therefore left where they are.
    pub fn plan_for(&self, snapshot: &DirectorySnapshot) -> OrganizationPlan {
        let mut plan = OrganizationPlan::new();
        for file in &snapshot.files {
            if let Some(category) = self.classify(&file.extension) {
                plan.assign(&file.name, category);
            }
        }
        plan
    }
}

impl Default for CategoryTable {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier for CategoryTable {
    fn classify_snapshot(
        &self,
        snapshot: &DirectorySnapshot,
        logger: &RunLogger,
    ) -> OrganizationPlan {
        let plan = self.plan_for(snapshot);
        logger.info(format!(
            "Rule table matched {} of {} files.",
            plan.len(),
            snapshot.files.len()
        ));
        plan
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::FileEntry;
    use std::path::PathBuf;

    fn snapshot_of(names: &[(&str, &str)]) -> DirectorySnapshot {
        DirectorySnapshot {
            root: PathBuf::from("/tmp/target"),
            existing_folders: Vec::new(),
            files: names
                .iter()
                .map(|(name, ext)| FileEntry {
                    name: name.to_string(),
                    path: PathBuf::from("/tmp/target").join(name),
                    extension: ext.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_unique_extensions_classify_to_their_category() {
        let table = CategoryTable::new();
        assert_eq!(table.classify(".png"), Some("Image Files"));
        assert_eq!(table.classify(".mkv"), Some("Video Files"));
        assert_eq!(table.classify(".flac"), Some("Audio Files"));
        assert_eq!(table.classify(".docx"), Some("Document Files"));
        assert_eq!(table.classify(".txt"), Some("Text Files"));
        assert_eq!(table.classify(".css"), Some("Web Files"));
        assert_eq!(table.classify(".rs"), Some("Developer Files"));
        assert_eq!(table.classify(".7z"), Some("Archive Files"));
        assert_eq!(table.classify(".msi"), Some("Executable Files"));
        assert_eq!(table.classify(".woff2"), Some("Font Files"));
    }

    #[test]
    fn test_duplicate_jsp_resolves_to_first_listed_category() {
        let table = CategoryTable::new();
        assert_eq!(table.classify(".jsp"), Some("Web Files"));
    }

    #[test]
    fn test_classify_ignores_case() {
        let table = CategoryTable::new();
        assert_eq!(table.classify(".PDF"), Some("Document Files"));
        assert_eq!(table.classify(".Jpg"), Some("Image Files"));
    }

    #[test]
    fn test_unknown_and_empty_extensions_are_unmatched() {
        let table = CategoryTable::new();
        assert_eq!(table.classify(".xyz"), None);
        assert_eq!(table.classify(""), None);
    }

    #[test]
    fn test_plan_omits_unmatched_files() {
        let table = CategoryTable::new();
        let snapshot = snapshot_of(&[
            ("a.txt", ".txt"),
            ("b.xyz", ".xyz"),
            ("Makefile", ""),
            ("c.png", ".png"),
        ]);

        let plan = table.plan_for(&snapshot);

        assert_eq!(plan.len(), 2);
        assert_eq!(plan.folder_for("a.txt"), Some("Text Files"));
        assert_eq!(plan.folder_for("c.png"), Some("Image Files"));
        assert_eq!(plan.folder_for("b.xyz"), None);
        assert_eq!(plan.folder_for("Makefile"), None);
    }

    #[test]
    fn test_every_extension_lives_in_at_most_two_categories() {
        // The one known duplicate is .jsp; anything else appearing twice is a
        // table maintenance mistake.
        let mut seen: std::collections::HashMap<&str, usize> = std::collections::HashMap::new();
        for (_, extensions) in RULES {
            for ext in *extensions {
                *seen.entry(ext).or_insert(0) += 1;
            }
        }
        for (ext, count) in seen {
            if ext == ".jsp" {
                assert_eq!(count, 2);
            } else {
                assert_eq!(count, 1, "extension {} listed more than once", ext);
            }
        }
    }
}
