//! Scenario catalog for the host menu.

use std::path::{Path, PathBuf};

use crate::loaders::{LoadResult, ScenarioDocument, read_file};

/// Scenario names, read once and cached for the menu.
///
/// A failed read leaves the cache empty, so the next access tries again.
#[derive(Debug)]
pub struct ScenarioCatalog {
    path: PathBuf,
    names: Vec<String>,
}

impl ScenarioCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            names: Vec::new(),
        }
    }

    /// Reads all scenario names from `path` in document order.
    pub fn load(path: &Path) -> LoadResult<Vec<String>> {
        let content = read_file(path)?;
        let document = ScenarioDocument::parse(&content)?;
        Ok(document.names())
    }

    /// Cached names; loads on first access.
    pub fn names(&mut self) -> &[String] {
        if self.names.is_empty() {
            match Self::load(&self.path) {
                Ok(names) => self.names = names,
                Err(err) => tracing::warn!("scenario catalog unavailable: {:#}", err),
            }
        }
        &self.names
    }

    pub fn get(&mut self, index: usize) -> Option<&str> {
        self.names().get(index).map(String::as_str)
    }

    /// Drops the cache so the next access re-reads the file.
    pub fn refresh(&mut self) {
        self.names.clear();
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MISSIONS: &str = "<missions>\
        <element><name>First</name></element>\
        <element><name> Second </name></element>\
        </missions>";

    #[test]
    fn caches_names_after_first_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missions.xml");
        std::fs::write(&path, MISSIONS).unwrap();

        let mut catalog = ScenarioCatalog::new(&path);
        assert_eq!(catalog.names(), ["First", "Second"]);

        std::fs::remove_file(&path).unwrap();
        assert_eq!(catalog.get(1), Some("Second"));

        catalog.refresh();
        assert!(catalog.names().is_empty());
    }

    #[test]
    fn missing_file_yields_empty_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let mut catalog = ScenarioCatalog::new(dir.path().join("none.xml"));
        assert!(catalog.names().is_empty());
        assert_eq!(catalog.get(0), None);
    }
}
