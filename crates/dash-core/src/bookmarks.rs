//! Session bookmark set keyed by row identity

use crate::row_key::row_key;
use crate::table::Row;
use std::borrow::Borrow;
use std::collections::HashSet;

/// Rows the user has marked during a session.
///
/// Membership is by row key, so rows with identical values share a
/// bookmark. Nothing is persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bookmarks {
    keys: HashSet<String>,
}

impl Bookmarks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bookmark a row. Returns false if it was already bookmarked.
    pub fn add(&mut self, row: &Row) -> bool {
        self.keys.insert(row_key(row))
    }

    /// Remove a row's bookmark. Returns false if it was not bookmarked.
    pub fn remove(&mut self, row: &Row) -> bool {
        self.keys.remove(&row_key(row))
    }

    /// Flip a row's bookmark, returning whether it is bookmarked afterwards
    pub fn toggle(&mut self, row: &Row) -> bool {
        self.toggle_key(row_key(row))
    }

    /// Flip a bookmark by its row key
    pub fn toggle_key(&mut self, key: String) -> bool {
        if self.keys.remove(&key) {
            false
        } else {
            self.keys.insert(key);
            true
        }
    }

    pub fn is_bookmarked(&self, row: &Row) -> bool {
        self.keys.contains(&row_key(row))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    /// Bookmarked keys, sorted
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.keys.iter().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Keep only bookmarked rows, preserving order
    pub fn filter_bookmarked<'a, R: Borrow<Row>>(&self, rows: &'a [R]) -> Vec<&'a R> {
        rows.iter()
            .filter(|row| self.is_bookmarked((*row).borrow()))
            .collect()
    }
}
