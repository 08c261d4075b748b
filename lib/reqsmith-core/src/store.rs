//! Ordered multimap storage for headers and query parameters.
//!
//! A [`Store`] maps keys to ordered lists of values, preserving per-key
//! insertion order. Header stores canonicalize key case; query stores keep
//! keys verbatim.

use indexmap::IndexMap;

use crate::{Error, Result};

/// How subsequent mutation calls treat the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Add the given values to the key's existing list.
    Append,
    /// Discard the key's existing values, then add the given ones.
    Replace,
    /// Remove the key entirely.
    Delete,
    /// Treat the key as a regular expression and remove every matching key.
    RemoveMatching,
}

/// Key comparison policy for a [`Store`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCase {
    /// Keys are stored and compared verbatim.
    Sensitive,
    /// Keys are canonicalized to conventional HTTP header capitalization,
    /// so two keys differing only in case are the same entry.
    Insensitive,
}

/// Ordered key to value-list map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Store {
    entries: IndexMap<String, Vec<String>>,
    case: KeyCase,
}

impl Store {
    /// Creates a store with case-sensitive keys (query parameters).
    #[must_use]
    pub fn case_sensitive() -> Self {
        Self {
            entries: IndexMap::new(),
            case: KeyCase::Sensitive,
        }
    }

    /// Creates a store with case-insensitive, canonicalized keys (headers).
    #[must_use]
    pub fn case_insensitive() -> Self {
        Self {
            entries: IndexMap::new(),
            case: KeyCase::Insensitive,
        }
    }

    fn canonical(&self, key: &str) -> String {
        match self.case {
            KeyCase::Sensitive => key.to_owned(),
            KeyCase::Insensitive => canonical_header_name(key),
        }
    }

    /// Applies `mode` to the store for `key` and `values`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Pattern`] when `mode` is [`Mode::RemoveMatching`] and
    /// `key` is not a valid regular expression; the store is left unchanged.
    pub fn apply(&mut self, mode: Mode, key: &str, values: Vec<String>) -> Result<()> {
        match mode {
            Mode::Append => self.add(key, values),
            Mode::Replace => self.replace(key, values),
            Mode::Delete => self.delete_key(key),
            Mode::RemoveMatching => self.delete_matching(key)?,
        }
        Ok(())
    }

    /// Adds all given values to the key's list, creating the key if absent.
    ///
    /// Adding zero values is a no-op: the key is not created.
    pub fn add(&mut self, key: &str, values: impl IntoIterator<Item = impl Into<String>>) {
        let mut values = values.into_iter().peekable();
        if values.peek().is_none() {
            return;
        }
        let key = self.canonical(key);
        self.entries
            .entry(key)
            .or_default()
            .extend(values.map(Into::into));
    }

    /// Replaces the key's values with the given ones.
    ///
    /// Replacing with zero values removes the key entirely.
    pub fn replace(&mut self, key: &str, values: impl IntoIterator<Item = impl Into<String>>) {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        let key = self.canonical(key);
        if values.is_empty() {
            self.entries.shift_remove(&key);
        } else {
            self.entries.insert(key, values);
        }
    }

    /// Removes the key and all its values.
    pub fn delete_key(&mut self, key: &str) {
        let key = self.canonical(key);
        self.entries.shift_remove(&key);
    }

    /// Removes every key whose (canonical) name matches `pattern`.
    ///
    /// Matches are collected against a snapshot of the current keys and
    /// removed after the scan completes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Pattern`] for an invalid regular expression; the
    /// store is left unchanged.
    pub fn delete_matching(&mut self, pattern: &str) -> Result<()> {
        let re = regex::Regex::new(pattern).map_err(Error::from)?;
        let doomed: Vec<String> = self
            .entries
            .keys()
            .filter(|key| re.is_match(key))
            .cloned()
            .collect();
        for key in &doomed {
            self.entries.shift_remove(key);
        }
        Ok(())
    }

    /// All values for the key, in insertion order.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.entries.get(&self.canonical(key)).map(Vec::as_slice)
    }

    /// First value for the key.
    #[must_use]
    pub fn first(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(|values| values.first()).map(String::as_str)
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// (key, values) pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(key, values)| (key.as_str(), values.as_slice()))
    }

    /// Number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the store holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Canonicalizes a header name: each dash-separated segment starts with an
/// upper-case letter, the rest are lower-case (`content-type` becomes
/// `Content-Type`).
#[must_use]
pub fn canonical_header_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut start_of_segment = true;
    for c in name.chars() {
        if c == '-' {
            out.push('-');
            start_of_segment = true;
        } else if start_of_segment {
            out.extend(c.to_uppercase());
            start_of_segment = false;
        } else {
            out.extend(c.to_lowercase());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_preserves_order_across_calls() {
        let mut store = Store::case_sensitive();
        store.add("k", ["1", "2"]);
        store.add("k", ["3"]);
        assert_eq!(
            store.get("k"),
            Some(["1".to_string(), "2".to_string(), "3".to_string()].as_slice())
        );
    }

    #[test]
    fn add_without_values_does_not_create_key() {
        let mut store = Store::case_sensitive();
        store.add("k", Vec::<String>::new());
        assert!(store.is_empty());
    }

    #[test]
    fn replace_discards_previous_values() {
        let mut store = Store::case_sensitive();
        store.add("k", ["1", "2"]);
        store.replace("k", ["9"]);
        assert_eq!(store.get("k"), Some(["9".to_string()].as_slice()));
    }

    #[test]
    fn replace_with_no_values_removes_key() {
        let mut store = Store::case_sensitive();
        store.add("k", ["1"]);
        store.replace("k", Vec::<String>::new());
        assert_eq!(store.get("k"), None);
    }

    #[test]
    fn delete_key_removes_all_values() {
        let mut store = Store::case_sensitive();
        store.add("k", ["1", "2"]);
        store.add("other", ["x"]);
        store.delete_key("k");
        assert_eq!(store.get("k"), None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn delete_matching_removes_by_pattern() {
        let mut store = Store::case_sensitive();
        store.add("page", ["1"]);
        store.add("page_size", ["20"]);
        store.add("q", ["rust"]);
        store.delete_matching("^page").expect("valid pattern");
        assert_eq!(store.keys().collect::<Vec<_>>(), vec!["q"]);
    }

    #[test]
    fn delete_matching_invalid_pattern_leaves_store_unchanged() {
        let mut store = Store::case_sensitive();
        store.add("k", ["1"]);
        let err = store.delete_matching("[").expect_err("invalid pattern");
        assert!(err.is_pattern());
        assert_eq!(store.get("k"), Some(["1".to_string()].as_slice()));
    }

    #[test]
    fn apply_dispatches_modes() {
        let mut store = Store::case_sensitive();
        store
            .apply(Mode::Append, "k", vec!["1".into(), "2".into()])
            .expect("append");
        store.apply(Mode::Replace, "k", vec!["3".into()]).expect("replace");
        assert_eq!(store.get("k"), Some(["3".to_string()].as_slice()));
        store.apply(Mode::Delete, "k", Vec::new()).expect("delete");
        assert!(store.is_empty());
    }

    #[test]
    fn insensitive_store_canonicalizes_keys() {
        let mut store = Store::case_insensitive();
        store.add("content-type", ["text/plain"]);
        store.add("CONTENT-TYPE", ["application/json"]);
        assert_eq!(store.len(), 1);
        assert_eq!(store.keys().collect::<Vec<_>>(), vec!["Content-Type"]);
        assert_eq!(store.first("Content-Type"), Some("text/plain"));
    }

    #[test]
    fn sensitive_store_keeps_distinct_cases() {
        let mut store = Store::case_sensitive();
        store.add("Key", ["a"]);
        store.add("key", ["b"]);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn canonical_header_name_forms() {
        assert_eq!(canonical_header_name("content-type"), "Content-Type");
        assert_eq!(canonical_header_name("x-request-id"), "X-Request-Id");
        assert_eq!(canonical_header_name("ETAG"), "Etag");
    }
}
