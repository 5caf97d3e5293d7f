//! Dashboard session: one loaded table plus the user's filters, bookmarks
//! and position in the paginated view.
//!
//! Rows flow through `all or bookmarked -> apply_filters -> page -> window`.

use crate::bookmarks::Bookmarks;
use crate::config::DashboardConfig;
use crate::error::Result;
use crate::filter::{apply_filters, filter_options, FilterOptions, FilterSelection};
use crate::pager::Pager;
use crate::parser::{parse_csv, parse_csv_str};
use crate::row_key::row_key;
use crate::table::{Row, Table};
use std::path::Path;
use tracing::debug;

/// Session state for exploring a single dataset
#[derive(Debug, Clone)]
pub struct Dashboard {
    table: Table,
    filters: FilterSelection,
    bookmarks: Bookmarks,
    pager: Pager,
    view_bookmarks: bool,
}

impl Dashboard {
    /// Start a session over an already parsed table
    pub fn new(table: Table, config: &DashboardConfig) -> Self {
        Self {
            table,
            filters: FilterSelection::new(),
            bookmarks: Bookmarks::new(),
            pager: Pager::new(config),
            view_bookmarks: false,
        }
    }

    /// Load and parse a dataset file
    pub fn load<P: AsRef<Path>>(path: P, config: &DashboardConfig) -> Result<Self> {
        Ok(Self::new(parse_csv(path)?, config))
    }

    /// Parse dataset text
    pub fn from_text(text: &str, config: &DashboardConfig) -> Self {
        Self::new(parse_csv_str(text), config)
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn headers(&self) -> &[String] {
        &self.table.headers
    }

    /// Every header except the identifier column
    pub fn filter_columns(&self) -> &[String] {
        self.table.filter_columns()
    }

    pub fn filters(&self) -> &FilterSelection {
        &self.filters
    }

    pub fn bookmarks(&self) -> &Bookmarks {
        &self.bookmarks
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    /// Replace the selected values for a column
    pub fn set_filter<I, S>(&mut self, column: &str, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filters.set(column, values);
        debug!(column, selected = ?self.filters.selected(column), "filter changed");
        self.pager.reset();
    }

    /// Toggle one value in a column's selection
    pub fn toggle_filter(&mut self, column: &str, value: &str) -> bool {
        let selected = self.filters.toggle(column, value);
        debug!(column, value, selected, "filter toggled");
        self.pager.reset();
        selected
    }

    pub fn clear_filter(&mut self, column: &str) {
        self.filters.clear_column(column);
        self.pager.reset();
    }

    /// Drop every filter constraint
    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.pager.reset();
    }

    pub fn view_bookmarks(&self) -> bool {
        self.view_bookmarks
    }

    /// Switch between all rows and bookmarked rows only
    pub fn set_view_bookmarks(&mut self, enabled: bool) {
        if self.view_bookmarks != enabled {
            self.view_bookmarks = enabled;
            self.pager.reset();
        }
    }

    pub fn toggle_view_bookmarks(&mut self) -> bool {
        self.set_view_bookmarks(!self.view_bookmarks);
        self.view_bookmarks
    }

    pub fn is_bookmarked(&self, row: &Row) -> bool {
        self.bookmarks.is_bookmarked(row)
    }

    /// Flip the bookmark on a row, returning whether it is now bookmarked
    pub fn toggle_bookmark(&mut self, row: &Row) -> bool {
        let bookmarked = self.bookmarks.toggle(row);
        self.clamp_pager();
        bookmarked
    }

    /// Flip the bookmark on the `index`th row of the current window
    pub fn toggle_bookmark_at(&mut self, index: usize) -> Option<bool> {
        let key = self.visible_rows().get(index).map(|row| row_key(row))?;
        let bookmarked = self.bookmarks.toggle_key(key);
        self.clamp_pager();
        Some(bookmarked)
    }

    /// All rows, or only bookmarked ones when the bookmark view is on
    pub fn effective_rows(&self) -> Vec<&Row> {
        if self.view_bookmarks {
            self.bookmarks.filter_bookmarked(&self.table.rows)
        } else {
            self.table.rows.iter().collect()
        }
    }

    /// Effective rows passing the current filters
    pub fn filtered_rows(&self) -> Vec<&Row> {
        let effective = self.effective_rows();
        apply_filters(&effective, &self.filters, self.filter_columns())
            .into_iter()
            .copied()
            .collect()
    }

    /// Option lists for every filterable column, drawn from the full table
    pub fn filter_options(&self) -> Vec<FilterOptions> {
        filter_options(&self.table.rows, &self.filters, self.filter_columns())
    }

    pub fn total_pages(&self) -> usize {
        self.pager.total_pages(self.filtered_rows().len())
    }

    /// Filtered rows on the current page
    pub fn page_rows(&self) -> Vec<&Row> {
        self.pager.page_slice(&self.filtered_rows()).to_vec()
    }

    /// Rows in the current window of the current page
    pub fn visible_rows(&self) -> Vec<&Row> {
        let page = self.page_rows();
        self.pager.window_slice(&page).to_vec()
    }

    /// `(first, last, page_len)` for the "Rows a–b of n" label
    pub fn window_range(&self) -> (usize, usize, usize) {
        self.pager.window_range(self.page_rows().len())
    }

    pub fn next_page(&mut self) -> bool {
        let count = self.filtered_rows().len();
        self.pager.next_page(count)
    }

    pub fn prev_page(&mut self) -> bool {
        self.pager.prev_page()
    }

    pub fn next_window(&mut self) -> bool {
        let page_len = self.page_rows().len();
        self.pager.next_window(page_len)
    }

    pub fn prev_window(&mut self) -> bool {
        self.pager.prev_window()
    }

    fn clamp_pager(&mut self) {
        if self.view_bookmarks {
            let count = self.filtered_rows().len();
            self.pager.clamp(count);
        }
    }
}
