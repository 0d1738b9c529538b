//! Collision-free name allocation
//!
//! A [`NamePool`] hands out identifiers derived from a prefix: the prefix
//! itself when free, otherwise the prefix followed by the smallest positive
//! integer that yields a free name. A [`NameAllocator`] adds a key -> name
//! binding map on top, so callers can find the name last allocated for a
//! logical key (typically a column name).

use crate::error::{CompileError, Result};
use std::collections::{HashMap, HashSet};

/// Set of allocated names in one namespace. Never shrinks.
#[derive(Debug, Clone, Default)]
pub struct NamePool {
    names: HashSet<String>,
    /// prefix -> smallest suffix that may still be free
    next_suffix: HashMap<String, u64>,
}

impl NamePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh name derived from `prefix`
    pub fn allocate(&mut self, prefix: &str) -> Result<String> {
        if prefix.is_empty() {
            return Err(CompileError::InvalidArgument(
                "name prefix must not be empty".to_string(),
            ));
        }

        if self.names.insert(prefix.to_string()) {
            return Ok(prefix.to_string());
        }

        // Suffixes below the cached one were all taken once, and the pool
        // never releases names.
        let mut suffix = self.next_suffix.get(prefix).copied().unwrap_or(1);
        let name = loop {
            let candidate = format!("{}{}", prefix, suffix);
            if !self.names.contains(&candidate) {
                break candidate;
            }
            suffix += 1;
        };
        self.next_suffix.insert(prefix.to_string(), suffix + 1);
        self.names.insert(name.clone());
        Ok(name)
    }

    /// Reserve `name` exactly. Returns false if it was already taken.
    pub fn reserve(&mut self, name: &str) -> bool {
        self.names.insert(name.to_string())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Name pool with a key -> current name binding map
///
/// Allocating for a key rebinds it; earlier names stay in the pool.
#[derive(Debug, Clone, Default)]
pub struct NameAllocator {
    pool: NamePool,
    bindings: HashMap<String, String>,
}

impl NameAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh name for `key` and bind `key` to it
    pub fn allocate(&mut self, key: &str) -> Result<String> {
        let name = self.pool.allocate(key)?;
        self.bindings.insert(key.to_string(), name.clone());
        Ok(name)
    }

    /// Allocate a fresh name derived from `prefix` without binding any key
    pub fn fresh(&mut self, prefix: &str) -> Result<String> {
        self.pool.allocate(prefix)
    }

    /// The name currently bound to `key`, allocating one if there is none
    pub fn lookup_or_allocate(&mut self, key: &str) -> Result<String> {
        match self.bindings.get(key) {
            Some(name) => Ok(name.clone()),
            None => self.allocate(key),
        }
    }

    /// The name currently bound to `key`
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.bindings.get(key).map(String::as_str)
    }

    /// Bind `key` to an already allocated name
    pub fn bind(&mut self, key: &str, name: &str) -> Result<()> {
        if !self.pool.contains(name) {
            return Err(CompileError::InvalidArgument(format!(
                "cannot bind '{}' to unallocated name '{}'",
                key, name
            )));
        }
        self.bindings.insert(key.to_string(), name.to_string());
        Ok(())
    }

    /// Reserve `name` exactly, without binding any key
    pub fn reserve(&mut self, name: &str) -> bool {
        self.pool.reserve(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.pool.contains(name)
    }

    pub fn is_bound(&self, key: &str) -> bool {
        self.bindings.contains_key(key)
    }

    pub fn pool(&self) -> &NamePool {
        &self.pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_prefix_sequence() {
        let mut pool = NamePool::new();
        let names: Vec<String> = (0..5).map(|_| pool.allocate("x").unwrap()).collect();
        assert_eq!(names, vec!["x", "x1", "x2", "x3", "x4"]);
    }

    #[test]
    fn test_suffix_skips_taken_names() {
        let mut pool = NamePool::new();
        assert_eq!(pool.allocate("x1").unwrap(), "x1");
        assert_eq!(pool.allocate("x").unwrap(), "x");
        assert_eq!(pool.allocate("x").unwrap(), "x2");
        assert_eq!(pool.allocate("x1").unwrap(), "x11");
    }

    #[test]
    fn test_reserved_name_is_skipped() {
        let mut pool = NamePool::new();
        assert!(pool.reserve("t"));
        assert!(pool.reserve("t1"));
        assert!(!pool.reserve("t"));
        assert_eq!(pool.allocate("t").unwrap(), "t2");
    }

    #[test]
    fn test_empty_prefix_rejected() {
        let mut pool = NamePool::new();
        assert!(matches!(
            pool.allocate(""),
            Err(CompileError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_pool_never_shrinks() {
        let mut pool = NamePool::new();
        pool.allocate("a").unwrap();
        pool.allocate("a").unwrap();
        pool.allocate("b").unwrap();
        assert_eq!(pool.len(), 3);
        assert!(pool.contains("a1"));
    }

    #[test]
    fn test_lookup_or_allocate_reuses_binding() {
        let mut names = NameAllocator::new();
        let first = names.lookup_or_allocate("Features").unwrap();
        let second = names.lookup_or_allocate("Features").unwrap();
        assert_eq!(first, "Features");
        assert_eq!(first, second);
    }

    #[test]
    fn test_allocate_rebinds_key() {
        let mut names = NameAllocator::new();
        names.allocate("Text").unwrap();
        let rebound = names.allocate("Text").unwrap();
        assert_eq!(rebound, "Text1");
        assert_eq!(names.lookup("Text"), Some("Text1"));
        assert!(names.contains("Text"));
    }

    #[test]
    fn test_distinct_keys_get_distinct_names() {
        let mut names = NameAllocator::new();
        let a = names.allocate("col").unwrap();
        let b = names.lookup_or_allocate("col1").unwrap();
        let c = names.allocate("col").unwrap();
        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_ne!(a, c);
    }

    #[test]
    fn test_fresh_leaves_bindings_alone() {
        let mut names = NameAllocator::new();
        names.allocate("Score").unwrap();
        let copy = names.fresh("Score").unwrap();
        assert_eq!(copy, "Score1");
        assert_eq!(names.lookup("Score"), Some("Score"));
        assert!(!names.is_bound("tmp"));
        names.fresh("tmp").unwrap();
        assert!(!names.is_bound("tmp"));
    }

    #[test]
    fn test_bind_requires_allocated_name() {
        let mut names = NameAllocator::new();
        assert!(names.bind("Score", "nowhere").is_err());
        let name = names.allocate("tmp").unwrap();
        names.bind("Score", &name).unwrap();
        assert_eq!(names.lookup("Score"), Some("tmp"));
        assert!(names.is_bound("Score"));
    }
}
