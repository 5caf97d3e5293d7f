//! Row identity keys for bookmarking and deduplication

use crate::table::Row;

/// Separator placed between values in a row key
pub const KEY_SEPARATOR: char = '|';

/// Derive the identity key of a row.
///
/// The key is the row's values in iteration order joined with `|`; absent
/// values contribute an empty string. Rows with the same values in the same
/// order always share a key.
///
/// Values are not escaped, so a value containing `|` can make two different
/// rows collide (`["a|b", "c"]` and `["a", "b|c"]` both give `a|b|c`).
pub fn row_key(row: &Row) -> String {
    let mut key = String::new();
    for (i, value) in row.values().enumerate() {
        if i > 0 {
            key.push(KEY_SEPARATOR);
        }
        key.push_str(value.unwrap_or_default());
    }
    key
}
