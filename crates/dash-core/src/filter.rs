//! Multi-column, multi-value row filtering
//!
//! Constraints combine with AND across columns and OR within a column: a row
//! passes when, for every filterable column with a non-empty selection, its
//! value is one of the selected values.

use crate::error::{Error, Result};
use crate::table::Row;
use serde::Serialize;
use std::borrow::Borrow;
use std::collections::{BTreeMap, HashSet};

/// Per-column sets of accepted values.
///
/// A column with no entry, or an empty entry, is unconstrained. Selected
/// values keep the order in which they were chosen and never repeat.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterSelection {
    columns: BTreeMap<String, Vec<String>>,
}

impl FilterSelection {
    /// Create a selection with no constraints
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the accepted values for a column
    pub fn set<I, S>(&mut self, column: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut deduped: Vec<String> = Vec::new();
        for value in values {
            let value = value.into();
            if !deduped.contains(&value) {
                deduped.push(value);
            }
        }
        self.columns.insert(column.into(), deduped);
    }

    /// Add the value if it is not selected, remove it if it is.
    ///
    /// Returns whether the value is selected afterwards.
    pub fn toggle(&mut self, column: &str, value: &str) -> bool {
        let selected = self.columns.entry(column.to_string()).or_default();
        match selected.iter().position(|v| v == value) {
            Some(pos) => {
                selected.remove(pos);
                false
            }
            None => {
                selected.push(value.to_string());
                true
            }
        }
    }

    /// Accepted values for a column, empty when unconstrained
    pub fn selected(&self, column: &str) -> &[String] {
        self.columns.get(column).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Check whether a specific value is selected for a column
    pub fn is_selected(&self, column: &str, value: &str) -> bool {
        self.selected(column).iter().any(|v| v == value)
    }

    /// Remove the constraint on one column
    pub fn clear_column(&mut self, column: &str) {
        self.columns.remove(column);
    }

    /// Remove every constraint
    pub fn clear(&mut self) {
        self.columns.clear();
    }

    /// True when at least one column has a non-empty selection
    pub fn is_active(&self) -> bool {
        self.columns.values().any(|values| !values.is_empty())
    }

    /// Columns with a non-empty selection
    pub fn active_columns(&self) -> impl Iterator<Item = &str> {
        self.columns
            .iter()
            .filter(|(_, values)| !values.is_empty())
            .map(|(column, _)| column.as_str())
    }

    /// Display text for a column's dropdown label: the selected values
    /// joined with ", ", or "All" when unconstrained.
    pub fn summary(&self, column: &str) -> String {
        let selected = self.selected(column);
        if selected.is_empty() {
            "All".to_string()
        } else {
            selected.join(", ")
        }
    }

    /// Fail if any active column is not one of `headers`
    pub fn check_columns<H: AsRef<str>>(&self, headers: &[H]) -> Result<()> {
        match self
            .active_columns()
            .find(|column| !headers.iter().any(|h| h.as_ref() == *column))
        {
            Some(column) => Err(Error::UnknownColumn(column.to_string())),
            None => Ok(()),
        }
    }
}

/// Distinct values available for one filterable column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    /// Column name
    pub column: String,
    /// Distinct values, in order of first appearance
    pub values: Vec<String>,
}

/// Return the rows that satisfy every active constraint on `filter_columns`.
///
/// Entries in `selection` for columns outside `filter_columns` are ignored.
/// The result borrows from `rows` and preserves their order.
pub fn apply_filters<'a, R, C>(
    rows: &'a [R],
    selection: &FilterSelection,
    filter_columns: &[C],
) -> Vec<&'a R>
where
    R: Borrow<Row>,
    C: AsRef<str>,
{
    filter_except(rows, selection, filter_columns, None)
}

/// Build the option list for every filterable column.
///
/// Each column's options come from the rows passing all *other* active
/// constraints, so narrowing one column never hides its own alternatives.
/// Absent values are not offered.
pub fn filter_options<R, C>(
    rows: &[R],
    selection: &FilterSelection,
    filter_columns: &[C],
) -> Vec<FilterOptions>
where
    R: Borrow<Row>,
    C: AsRef<str>,
{
    filter_columns
        .iter()
        .map(|column| {
            let column = column.as_ref();
            let candidates = filter_except(rows, selection, filter_columns, Some(column));

            let mut seen = HashSet::new();
            let values = candidates
                .into_iter()
                .filter_map(|row| <R as Borrow<Row>>::borrow(row).get(column))
                .filter(|value| seen.insert(*value))
                .map(str::to_string)
                .collect();

            FilterOptions {
                column: column.to_string(),
                values,
            }
        })
        .collect()
}

/// Case-insensitive substring search over an option list.
///
/// An empty query matches everything.
pub fn search_options<'a, S: AsRef<str>>(options: &'a [S], query: &str) -> Vec<&'a str> {
    let needle = query.to_lowercase();
    options
        .iter()
        .map(AsRef::<str>::as_ref)
        .filter(|option| option.to_lowercase().contains(&needle))
        .collect()
}

fn filter_except<'a, R, C>(
    rows: &'a [R],
    selection: &FilterSelection,
    filter_columns: &[C],
    skip: Option<&str>,
) -> Vec<&'a R>
where
    R: Borrow<Row>,
    C: AsRef<str>,
{
    let constraints: Vec<(&str, &[String])> = filter_columns
        .iter()
        .map(AsRef::<str>::as_ref)
        .filter(|column| Some(*column) != skip)
        .map(|column| (column, selection.selected(column)))
        .filter(|(_, accepted)| !accepted.is_empty())
        .collect();

    rows.iter()
        .filter(|row| {
            let row: &Row = (*row).borrow();
            constraints.iter().all(|(column, accepted)| {
                row.get(column)
                    .is_some_and(|value| accepted.iter().any(|a| a == value))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(number: &str, mod350: &str, mod8000: &str) -> Row {
        [("number", number), ("mod350", mod350), ("mod8000", mod8000)]
            .into_iter()
            .collect()
    }

    fn dataset() -> Vec<Row> {
        vec![
            row("1", "0", "1"),
            row("2", "1", "0"),
            row("3", "0", "0"),
            row("4", "1", "1"),
        ]
    }

    const COLUMNS: [&str; 2] = ["mod350", "mod8000"];

    #[test]
    fn test_no_filters_returns_all() {
        let data = dataset();
        let result = apply_filters(&data, &FilterSelection::new(), &COLUMNS);

        assert_eq!(result, data.iter().collect::<Vec<_>>());
    }

    #[test]
    fn test_empty_filter_columns_returns_all() {
        let data = dataset();
        let mut selection = FilterSelection::new();
        selection.set("mod350", ["2"]);

        let no_columns: [&str; 0] = [];
        assert_eq!(apply_filters(&data, &selection, &no_columns).len(), 4);
    }

    #[test]
    fn test_single_column() {
        let data = dataset();
        let mut selection = FilterSelection::new();
        selection.set("mod350", ["0"]);

        let result = apply_filters(&data, &selection, &COLUMNS);
        assert_eq!(result, vec![&data[0], &data[2]]);
    }

    #[test]
    fn test_multiple_columns_and() {
        let data = dataset();
        let mut selection = FilterSelection::new();
        selection.set("mod350", ["0"]);
        selection.set("mod8000", ["1"]);

        let result = apply_filters(&data, &selection, &COLUMNS);
        assert_eq!(result, vec![&row("1", "0", "1")]);
    }

    #[test]
    fn test_multiple_values_or() {
        let data = dataset();
        let mut selection = FilterSelection::new();
        selection.set("mod350", ["0", "1"]);
        selection.set("mod8000", ["0"]);

        let result = apply_filters(&data, &selection, &COLUMNS);
        assert_eq!(result, vec![&data[1], &data[2]]);
    }

    #[test]
    fn test_no_matches() {
        let data = dataset();
        let mut selection = FilterSelection::new();
        selection.set("mod350", ["2"]);

        assert!(apply_filters(&data, &selection, &COLUMNS).is_empty());
    }

    #[test]
    fn test_empty_entry_is_unconstrained() {
        let data = dataset();
        let mut selection = FilterSelection::new();
        selection.set("mod350", Vec::<String>::new());

        assert_eq!(apply_filters(&data, &selection, &COLUMNS).len(), 4);
    }

    #[test]
    fn test_non_filter_column_ignored() {
        let data = dataset();
        let mut selection = FilterSelection::new();
        selection.set("number", ["99"]);

        assert_eq!(apply_filters(&data, &selection, &COLUMNS).len(), 4);
    }

    #[test]
    fn test_absent_value_never_matches() {
        let mut short = Row::new();
        short.insert("number", Some("5".to_string()));
        short.insert("mod350", None);
        short.insert("mod8000", None);
        let data = vec![short];

        let mut selection = FilterSelection::new();
        selection.set("mod350", ["0"]);
        assert!(apply_filters(&data, &selection, &COLUMNS).is_empty());

        selection.clear();
        assert_eq!(apply_filters(&data, &selection, &COLUMNS).len(), 1);
    }

    #[test]
    fn test_idempotent() {
        let data = dataset();
        let mut selection = FilterSelection::new();
        selection.set("mod8000", ["1"]);

        let once = apply_filters(&data, &selection, &COLUMNS);
        let twice = apply_filters(&once, &selection, &COLUMNS);
        assert_eq!(twice, once.iter().collect::<Vec<_>>());
    }

    #[test]
    fn test_toggle_and_summary() {
        let mut selection = FilterSelection::new();
        assert_eq!(selection.summary("mod350"), "All");

        assert!(selection.toggle("mod350", "1"));
        assert!(selection.toggle("mod350", "0"));
        assert_eq!(selection.summary("mod350"), "1, 0");
        assert!(selection.is_selected("mod350", "0"));

        assert!(!selection.toggle("mod350", "1"));
        assert_eq!(selection.selected("mod350"), &["0".to_string()]);
        assert!(selection.is_active());

        selection.toggle("mod350", "0");
        assert!(!selection.is_active());
    }

    #[test]
    fn test_set_dedups() {
        let mut selection = FilterSelection::new();
        selection.set("mod350", ["1", "0", "1"]);
        assert_eq!(selection.selected("mod350"), &["1".to_string(), "0".to_string()]);
    }

    #[test]
    fn test_check_columns() {
        let mut selection = FilterSelection::new();
        selection.set("mod350", ["0"]);
        assert!(selection.check_columns(&COLUMNS).is_ok());

        selection.set("bogus", ["x"]);
        let err = selection.check_columns(&COLUMNS).unwrap_err();
        assert!(matches!(err, Error::UnknownColumn(c) if c == "bogus"));
    }

    #[test]
    fn test_filter_options_ignore_own_constraint() {
        let data = dataset();
        let mut selection = FilterSelection::new();
        selection.set("mod350", ["0"]);

        let options = filter_options(&data, &selection, &COLUMNS);
        assert_eq!(
            options,
            vec![
                FilterOptions {
                    column: "mod350".to_string(),
                    values: vec!["0".to_string(), "1".to_string()],
                },
                FilterOptions {
                    column: "mod8000".to_string(),
                    values: vec!["1".to_string(), "0".to_string()],
                },
            ]
        );

        selection.set("mod8000", ["0"]);
        let options = filter_options(&data, &selection, &COLUMNS);
        assert_eq!(options[0].values, vec!["1".to_string(), "0".to_string()]);
        assert_eq!(options[1].values, vec!["1".to_string(), "0".to_string()]);
    }

    #[test]
    fn test_filter_options_narrowed_by_other_columns() {
        let data = vec![row("1", "0", "a"), row("2", "1", "b"), row("3", "0", "c")];
        let mut selection = FilterSelection::new();
        selection.set("mod350", ["0"]);

        let options = filter_options(&data, &selection, &COLUMNS);
        assert_eq!(options[1].values, vec!["a".to_string(), "c".to_string()]);
    }

    #[test]
    fn test_search_options() {
        let options = vec!["Alpha".to_string(), "beta".to_string(), "ALPS".to_string()];

        assert_eq!(search_options(&options, "alp"), vec!["Alpha", "ALPS"]);
        assert_eq!(search_options(&options, ""), vec!["Alpha", "beta", "ALPS"]);
        assert!(search_options(&options, "zeta").is_empty());
    }
}
