//! Sheet source trait and structured error types.
//!
//! A `SheetSource` supplies the delimited text of one tab. The runner never
//! retries: a failing tab is reported to the caller, who decides whether to
//! abort the board or rank the remaining tabs.

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("tab '{tab}' not found in sheet '{sheet_id}'")]
    TabNotFound { sheet_id: String, tab: String },

    #[error("invalid tab name '{tab}'")]
    InvalidTabName { tab: String },

    #[error("cannot read tab '{tab}' from {path}: {source}")]
    Io {
        tab: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Supplier of raw tab text.
pub trait SheetSource: Send + Sync {
    /// Human-readable name of this source.
    fn name(&self) -> &str;

    /// Fetch the tab's contents as delimited text.
    fn fetch_tab(&self, sheet_id: &str, tab: &str) -> Result<String, SourceError>;
}

/// Reads `<root>/<tab>.csv`, one exported file per tab.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File path for a tab. Tab names must be a single plain path component.
    pub fn tab_path(&self, tab: &str) -> Result<PathBuf, SourceError> {
        let mut components = Path::new(tab).components();
        let single = matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        );
        if !single || tab.contains(['/', '\\']) {
            return Err(SourceError::InvalidTabName {
                tab: tab.to_string(),
            });
        }
        Ok(self.root.join(format!("{tab}.csv")))
    }
}

impl SheetSource for DirectorySource {
    fn name(&self) -> &str {
        "directory"
    }

    fn fetch_tab(&self, sheet_id: &str, tab: &str) -> Result<String, SourceError> {
        let path = self.tab_path(tab)?;
        std::fs::read_to_string(&path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                SourceError::TabNotFound {
                    sheet_id: sheet_id.to_string(),
                    tab: tab.to_string(),
                }
            } else {
                SourceError::Io {
                    tab: tab.to_string(),
                    path,
                    source,
                }
            }
        })
    }
}

/// In-memory tabs, keyed by tab name. Ignores the sheet id.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    tabs: HashMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tab(mut self, tab: impl Into<String>, text: impl Into<String>) -> Self {
        self.tabs.insert(tab.into(), text.into());
        self
    }

    pub fn insert(&mut self, tab: impl Into<String>, text: impl Into<String>) {
        self.tabs.insert(tab.into(), text.into());
    }
}

impl SheetSource for MemorySource {
    fn name(&self) -> &str {
        "memory"
    }

    fn fetch_tab(&self, sheet_id: &str, tab: &str) -> Result<String, SourceError> {
        self.tabs
            .get(tab)
            .cloned()
            .ok_or_else(|| SourceError::TabNotFound {
                sheet_id: sheet_id.to_string(),
                tab: tab.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_source_returns_tab_text() {
        let src = MemorySource::new().with_tab("Alice", "a,b");
        assert_eq!(src.fetch_tab("sheet", "Alice").unwrap(), "a,b");
    }

    #[test]
    fn memory_source_insert_replaces_tab() {
        let mut src = MemorySource::new().with_tab("Alice", "old");
        src.insert("Alice", "new");
        src.insert("Bob", "b");
        assert_eq!(src.fetch_tab("sheet", "Alice").unwrap(), "new");
        assert_eq!(src.fetch_tab("sheet", "Bob").unwrap(), "b");
    }

    #[test]
    fn memory_source_missing_tab() {
        let err = MemorySource::new().fetch_tab("sheet", "Bob").unwrap_err();
        assert!(matches!(err, SourceError::TabNotFound { .. }));
        assert_eq!(err.to_string(), "tab 'Bob' not found in sheet 'sheet'");
    }

    #[test]
    fn directory_source_reads_csv_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Alice.csv"), "Realized P/L:,10").unwrap();
        let src = DirectorySource::new(dir.path());
        assert_eq!(src.root(), dir.path());
        assert_eq!(src.fetch_tab("s", "Alice").unwrap(), "Realized P/L:,10");
    }

    #[test]
    fn directory_source_missing_file_is_tab_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = DirectorySource::new(dir.path()).fetch_tab("s", "Ghost").unwrap_err();
        assert!(matches!(err, SourceError::TabNotFound { .. }));
    }

    #[test]
    fn tab_names_cannot_escape_root() {
        let src = DirectorySource::new("/data");
        for tab in ["../etc/passwd", "a/b", "..", "/abs"] {
            assert!(
                matches!(src.tab_path(tab), Err(SourceError::InvalidTabName { .. })),
                "{tab} should be rejected"
            );
        }
        assert_eq!(src.tab_path("Team One").unwrap(), PathBuf::from("/data/Team One.csv"));
    }
}
