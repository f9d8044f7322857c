//! Per-run syntax tree cache
//!
//! One parsed tree per source unit, keyed by path. The cache is append-only
//! for the duration of an analysis run: source units are assumed immutable,
//! entries are never evicted. It is an explicit, constructed component;
//! callers share it via `Arc`, tests build an isolated cache per case.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use crate::node::Tree;
use crate::parser::{parse, ParseError};

#[derive(Debug, Default)]
pub struct SyntaxCache {
    trees: RwLock<HashMap<PathBuf, Arc<Tree>>>,
}

impl SyntaxCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the unit at `path` on first request; later requests return the
    /// stored tree. Failures are not cached.
    pub fn get_tree(&self, path: &Path) -> Result<Arc<Tree>, ParseError> {
        if let Some(tree) = self.lookup(path) {
            return Ok(tree);
        }
        let source = fs::read_to_string(path).map_err(|source| ParseError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        self.parse_and_store(path, &source)
    }

    /// Variant for in-memory sources (tests, editors); same cache contract.
    pub fn get_tree_from(&self, path: &Path, source: &str) -> Result<Arc<Tree>, ParseError> {
        if let Some(tree) = self.lookup(path) {
            return Ok(tree);
        }
        self.parse_and_store(path, source)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.trees
            .read()
            .map(|trees| trees.contains_key(path))
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.trees.read().map(|trees| trees.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lookup(&self, path: &Path) -> Option<Arc<Tree>> {
        self.trees
            .read()
            .ok()
            .and_then(|trees| trees.get(path).cloned())
    }

    /// Parsing happens outside the write lock; if two callers race, the
    /// first stored tree wins and the losing parse is discarded. Both
    /// parses come from the same immutable source, so the trees agree.
    fn parse_and_store(&self, path: &Path, source: &str) -> Result<Arc<Tree>, ParseError> {
        let tree = Arc::new(parse(source)?);
        let mut trees = self.trees.write().unwrap_or_else(|poison| poison.into_inner());
        Ok(trees
            .entry(path.to_path_buf())
            .or_insert(tree)
            .clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SOURCE: &str = "<?php\nclass Cached\n{\n    public function run()\n    {\n        $this->helper();\n    }\n}\n";

    #[test]
    fn second_request_returns_the_stored_tree() {
        let cache = SyntaxCache::new();
        let path = Path::new("/virtual/cached.php");

        let first = cache.get_tree_from(path, SOURCE).unwrap();
        let second = cache.get_tree_from(path, SOURCE).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn trees_are_structurally_equal_across_parses() {
        let cache_a = SyntaxCache::new();
        let cache_b = SyntaxCache::new();
        let path = Path::new("/virtual/same.php");

        let a = cache_a.get_tree_from(path, SOURCE).unwrap();
        let b = cache_b.get_tree_from(path, SOURCE).unwrap();

        assert_eq!(*a, *b);
    }

    #[test]
    fn parse_failure_is_not_cached() {
        let cache = SyntaxCache::new();
        let path = Path::new("/virtual/broken.php");

        assert!(cache.get_tree_from(path, "<?php class {").is_err());
        assert!(!cache.contains(path));
        // a corrected unit under the same identity parses fine
        assert!(cache.get_tree_from(path, "<?php class Ok {}").is_ok());
    }

    #[test]
    fn reads_units_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SOURCE.as_bytes()).unwrap();

        let cache = SyntaxCache::new();
        let tree = cache.get_tree(file.path()).unwrap();
        assert!(!tree.is_empty());
        assert!(cache.contains(file.path()));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let cache = SyntaxCache::new();
        let err = cache.get_tree(Path::new("/nonexistent/unit.php")).unwrap_err();
        assert!(matches!(err, ParseError::Read { .. }));
    }

    #[test]
    fn concurrent_first_population_stores_one_tree() {
        let cache = Arc::new(SyntaxCache::new());
        let path = PathBuf::from("/virtual/raced.php");

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let path = path.clone();
                std::thread::spawn(move || cache.get_tree_from(&path, SOURCE).unwrap())
            })
            .collect();

        let trees: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for tree in &trees[1..] {
            assert!(Arc::ptr_eq(&trees[0], tree));
        }
        assert_eq!(cache.len(), 1);
    }
}
