//! Page and window navigation over a filtered row list
//!
//! Rows are split into pages, and each page is shown a window at a time.
//! The window offset returns to zero whenever the page changes.

use crate::config::DashboardConfig;

/// Current page (1-based) and window offset (0-based) within that page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page: usize,
    window: usize,
    rows_per_page: usize,
    window_size: usize,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(&DashboardConfig::default())
    }
}

impl Pager {
    /// Create a pager on page 1, window 0.
    ///
    /// Sizes of zero are treated as one.
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            page: 1,
            window: 0,
            rows_per_page: config.rows_per_page.max(1),
            window_size: config.window_size.max(1),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn rows_per_page(&self) -> usize {
        self.rows_per_page
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Number of pages needed for `row_count` rows (zero for no rows)
    pub fn total_pages(&self, row_count: usize) -> usize {
        row_count.div_ceil(self.rows_per_page)
    }

    /// Index of the last window on a full page
    pub fn max_window(&self) -> usize {
        self.rows_per_page.div_ceil(self.window_size) - 1
    }

    /// Advance one page, clamped to the last page. Returns whether it moved.
    pub fn next_page(&mut self, row_count: usize) -> bool {
        if self.page < self.total_pages(row_count) {
            self.set_page(self.page + 1);
            true
        } else {
            false
        }
    }

    /// Go back one page, clamped to page 1. Returns whether it moved.
    pub fn prev_page(&mut self) -> bool {
        if self.page > 1 {
            self.set_page(self.page - 1);
            true
        } else {
            false
        }
    }

    /// Advance one window within the current page.
    ///
    /// `page_len` is the number of rows on the current page; the window
    /// never moves past them or past `max_window`.
    pub fn next_window(&mut self, page_len: usize) -> bool {
        let at_end = (self.window + 1) * self.window_size >= page_len;
        if self.window < self.max_window() && !at_end {
            self.window += 1;
            true
        } else {
            false
        }
    }

    /// Go back one window, clamped to 0
    pub fn prev_window(&mut self) -> bool {
        if self.window > 0 {
            self.window -= 1;
            true
        } else {
            false
        }
    }

    /// Return to the first window of the current page
    pub fn reset_window(&mut self) {
        self.window = 0;
    }

    /// Return to page 1, window 0
    pub fn reset(&mut self) {
        self.page = 1;
        self.window = 0;
    }

    /// Pull the page back inside range after the row count shrinks
    pub fn clamp(&mut self, row_count: usize) {
        let last = self.total_pages(row_count).max(1);
        if self.page > last {
            self.set_page(last);
        }
    }

    /// Rows on the current page
    pub fn page_slice<'a, T>(&self, rows: &'a [T]) -> &'a [T] {
        let start = ((self.page - 1) * self.rows_per_page).min(rows.len());
        let end = (start + self.rows_per_page).min(rows.len());
        &rows[start..end]
    }

    /// Rows in the current window of a page
    pub fn window_slice<'a, T>(&self, page_rows: &'a [T]) -> &'a [T] {
        let start = (self.window * self.window_size).min(page_rows.len());
        let end = (start + self.window_size).min(page_rows.len());
        &page_rows[start..end]
    }

    /// 1-based first and last row numbers of the window, and the page
    /// length, as shown in "Rows 21–40 of 100"
    pub fn window_range(&self, page_len: usize) -> (usize, usize, usize) {
        let first = self.window * self.window_size + 1;
        let last = ((self.window + 1) * self.window_size).min(page_len);
        (first, last, page_len)
    }

    fn set_page(&mut self, page: usize) {
        if page != self.page {
            self.page = page;
            self.window = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pager() -> Pager {
        Pager::default()
    }

    #[test]
    fn test_total_pages() {
        let p = pager();
        assert_eq!(p.total_pages(0), 0);
        assert_eq!(p.total_pages(1), 1);
        assert_eq!(p.total_pages(100), 1);
        assert_eq!(p.total_pages(101), 2);
        assert_eq!(p.max_window(), 4);
    }

    #[test]
    fn test_page_navigation_clamps() {
        let mut p = pager();
        assert!(!p.prev_page());
        assert!(p.next_page(250));
        assert!(p.next_page(250));
        assert!(!p.next_page(250));
        assert_eq!(p.page(), 3);

        assert!(p.prev_page());
        assert_eq!(p.page(), 2);
    }

    #[test]
    fn test_next_page_with_no_rows_stays_on_first() {
        let mut p = pager();
        assert!(!p.next_page(0));
        assert_eq!(p.page(), 1);
    }

    #[test]
    fn test_page_change_resets_window() {
        let mut p = pager();
        assert!(p.next_window(100));
        assert!(p.next_window(100));
        assert_eq!(p.window(), 2);

        p.next_page(300);
        assert_eq!(p.window(), 0);

        p.next_window(100);
        p.prev_page();
        assert_eq!(p.window(), 0);
    }

    #[test]
    fn test_window_navigation_limits() {
        let mut p = pager();
        for _ in 0..10 {
            p.next_window(100);
        }
        assert_eq!(p.window(), 4);

        let mut p = pager();
        assert!(p.next_window(35));
        assert!(!p.next_window(35));
        assert_eq!(p.window(), 1);
        assert!(p.prev_window());
        assert!(!p.prev_window());
    }

    #[test]
    fn test_slices() {
        let rows: Vec<usize> = (0..250).collect();
        let mut p = pager();
        p.next_page(rows.len());
        p.next_page(rows.len());

        let page = p.page_slice(&rows);
        assert_eq!(page.len(), 50);
        assert_eq!(page[0], 200);

        p.next_window(page.len());
        let window = p.window_slice(page);
        assert_eq!(window, &rows[220..240]);
        assert_eq!(p.window_range(page.len()), (21, 40, 50));
    }

    #[test]
    fn test_slices_out_of_range_are_empty() {
        let rows: Vec<usize> = (0..250).collect();
        let mut p = pager();
        p.next_page(rows.len());
        p.next_page(rows.len());

        let fewer = &rows[..10];
        assert!(p.page_slice(fewer).is_empty());

        p.clamp(fewer.len());
        assert_eq!(p.page(), 1);
        assert_eq!(p.page_slice(fewer).len(), 10);
    }

    #[test]
    fn test_custom_sizes() {
        let p = Pager::new(&DashboardConfig {
            rows_per_page: 10,
            window_size: 3,
        });
        assert_eq!(p.max_window(), 3);
        assert_eq!(p.total_pages(25), 3);
    }
}
