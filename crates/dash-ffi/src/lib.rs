//! C FFI bindings for dash-core
//!
//! This crate provides a C-compatible API over a dashboard session so a
//! native UI can drive filtering, bookmarking and paging.

use dash_core::{Dashboard, DashboardConfig};
use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_int};
use std::ptr;

/// Opaque handle to a dashboard session
pub struct FfiDashboard {
    inner: Dashboard,
}

unsafe fn to_str<'a>(s: *const c_char) -> Option<&'a str> {
    if s.is_null() {
        None
    } else {
        CStr::from_ptr(s).to_str().ok()
    }
}

fn into_c_string(s: impl Into<Vec<u8>>) -> *mut c_char {
    CString::new(s)
        .map(CString::into_raw)
        .unwrap_or(ptr::null_mut())
}

fn boxed(inner: Dashboard) -> *mut FfiDashboard {
    Box::into_raw(Box::new(FfiDashboard { inner }))
}

/// Open a dataset file
///
/// # Safety
/// - `path` must be a valid C string
/// - Returns null on error
#[no_mangle]
pub unsafe extern "C" fn dash_open_path(path: *const c_char) -> *mut FfiDashboard {
    let Some(path) = to_str(path) else {
        return ptr::null_mut();
    };

    match Dashboard::load(path, &DashboardConfig::default()) {
        Ok(dashboard) => boxed(dashboard),
        Err(_) => ptr::null_mut(),
    }
}

/// Open a dataset from text already in memory
///
/// # Safety
/// - `text` must be a valid C string
/// - Returns null if `text` is null or not UTF-8
#[no_mangle]
pub unsafe extern "C" fn dash_open_text(text: *const c_char) -> *mut FfiDashboard {
    match to_str(text) {
        Some(text) => boxed(Dashboard::from_text(text, &DashboardConfig::default())),
        None => ptr::null_mut(),
    }
}

/// Free a dashboard
///
/// # Safety
/// - `dash` must be a valid pointer returned by `dash_open_*` or null
#[no_mangle]
pub unsafe extern "C" fn dash_free(dash: *mut FfiDashboard) {
    if !dash.is_null() {
        drop(Box::from_raw(dash));
    }
}

/// Get the number of columns
///
/// # Safety
/// - `dash` must be a valid pointer returned by `dash_open_*`
#[no_mangle]
pub unsafe extern "C" fn dash_header_count(dash: *const FfiDashboard) -> usize {
    if dash.is_null() {
        return 0;
    }
    (*dash).inner.headers().len()
}

/// Get a column name by index
///
/// # Safety
/// - `dash` must be a valid pointer returned by `dash_open_*`
/// - Returns null if index is out of bounds
/// - Caller must free the returned string with `dash_free_string`
#[no_mangle]
pub unsafe extern "C" fn dash_header(dash: *const FfiDashboard, index: usize) -> *mut c_char {
    if dash.is_null() {
        return ptr::null_mut();
    }

    (*dash)
        .inner
        .headers()
        .get(index)
        .map(|h| into_c_string(h.as_str()))
        .unwrap_or(ptr::null_mut())
}

/// Toggle a value in a column's filter selection
///
/// Returns 1 if the value is now selected, 0 if it was deselected, -1 on
/// invalid arguments.
///
/// # Safety
/// - `dash` must be a valid pointer returned by `dash_open_*`
/// - `column` and `value` must be valid C strings
#[no_mangle]
pub unsafe extern "C" fn dash_toggle_filter(
    dash: *mut FfiDashboard,
    column: *const c_char,
    value: *const c_char,
) -> c_int {
    if dash.is_null() {
        return -1;
    }
    let (Some(column), Some(value)) = (to_str(column), to_str(value)) else {
        return -1;
    };

    c_int::from((*dash).inner.toggle_filter(column, value))
}

/// Remove every filter constraint
///
/// # Safety
/// - `dash` must be a valid pointer returned by `dash_open_*`
#[no_mangle]
pub unsafe extern "C" fn dash_clear_filters(dash: *mut FfiDashboard) {
    if !dash.is_null() {
        (*dash).inner.clear_filters();
    }
}

/// Get the filter options of every filterable column as a JSON array
///
/// # Safety
/// - `dash` must be a valid pointer returned by `dash_open_*`
/// - Caller must free the returned string with `dash_free_string`
#[no_mangle]
pub unsafe extern "C" fn dash_filter_options_json(dash: *const FfiDashboard) -> *mut c_char {
    if dash.is_null() {
        return ptr::null_mut();
    }

    match serde_json::to_string(&(*dash).inner.filter_options()) {
        Ok(json) => into_c_string(json),
        Err(_) => ptr::null_mut(),
    }
}

/// Number of rows passing the current filters
///
/// # Safety
/// - `dash` must be a valid pointer returned by `dash_open_*`
#[no_mangle]
pub unsafe extern "C" fn dash_filtered_count(dash: *const FfiDashboard) -> usize {
    if dash.is_null() {
        return 0;
    }
    (*dash).inner.filtered_rows().len()
}

/// Number of rows in the current window
///
/// # Safety
/// - `dash` must be a valid pointer returned by `dash_open_*`
#[no_mangle]
pub unsafe extern "C" fn dash_visible_count(dash: *const FfiDashboard) -> usize {
    if dash.is_null() {
        return 0;
    }
    (*dash).inner.visible_rows().len()
}

/// Get a cell of the current window
///
/// # Safety
/// - `dash` must be a valid pointer returned by `dash_open_*`
/// - Returns null if row or col is out of bounds or the value is absent
/// - Caller must free the returned string with `dash_free_string`
#[no_mangle]
pub unsafe extern "C" fn dash_visible_cell(
    dash: *const FfiDashboard,
    row: usize,
    col: usize,
) -> *mut c_char {
    if dash.is_null() {
        return ptr::null_mut();
    }

    let dashboard = &(*dash).inner;
    let Some(column) = dashboard.headers().get(col) else {
        return ptr::null_mut();
    };

    dashboard
        .visible_rows()
        .get(row)
        .and_then(|r| r.get(column))
        .map(into_c_string)
        .unwrap_or(ptr::null_mut())
}

/// Get the row key of a row in the current window
///
/// # Safety
/// - `dash` must be a valid pointer returned by `dash_open_*`
/// - Returns null if row is out of bounds
/// - Caller must free the returned string with `dash_free_string`
#[no_mangle]
pub unsafe extern "C" fn dash_visible_row_key(dash: *const FfiDashboard, row: usize) -> *mut c_char {
    if dash.is_null() {
        return ptr::null_mut();
    }

    (*dash)
        .inner
        .visible_rows()
        .get(row)
        .map(|r| into_c_string(dash_core::row_key(r)))
        .unwrap_or(ptr::null_mut())
}

/// Check whether a row in the current window is bookmarked
///
/// # Safety
/// - `dash` must be a valid pointer returned by `dash_open_*`
#[no_mangle]
pub unsafe extern "C" fn dash_visible_is_bookmarked(dash: *const FfiDashboard, row: usize) -> bool {
    if dash.is_null() {
        return false;
    }

    let dashboard = &(*dash).inner;
    dashboard
        .visible_rows()
        .get(row)
        .is_some_and(|r| dashboard.is_bookmarked(r))
}

/// Toggle the bookmark on a row of the current window
///
/// Returns 1 if now bookmarked, 0 if not, -1 if row is out of bounds.
///
/// # Safety
/// - `dash` must be a valid pointer returned by `dash_open_*`
#[no_mangle]
pub unsafe extern "C" fn dash_toggle_bookmark(dash: *mut FfiDashboard, row: usize) -> c_int {
    if dash.is_null() {
        return -1;
    }

    match (*dash).inner.toggle_bookmark_at(row) {
        Some(bookmarked) => c_int::from(bookmarked),
        None => -1,
    }
}

/// Show only bookmarked rows, or all rows
///
/// # Safety
/// - `dash` must be a valid pointer returned by `dash_open_*`
#[no_mangle]
pub unsafe extern "C" fn dash_set_view_bookmarks(dash: *mut FfiDashboard, enabled: bool) {
    if !dash.is_null() {
        (*dash).inner.set_view_bookmarks(enabled);
    }
}

/// Current page (1-based)
///
/// # Safety
/// - `dash` must be a valid pointer returned by `dash_open_*`
#[no_mangle]
pub unsafe extern "C" fn dash_page(dash: *const FfiDashboard) -> usize {
    if dash.is_null() {
        return 0;
    }
    (*dash).inner.pager().page()
}

/// Total number of pages for the current filters
///
/// # Safety
/// - `dash` must be a valid pointer returned by `dash_open_*`
#[no_mangle]
pub unsafe extern "C" fn dash_total_pages(dash: *const FfiDashboard) -> usize {
    if dash.is_null() {
        return 0;
    }
    (*dash).inner.total_pages()
}

/// Advance one page
///
/// # Safety
/// - `dash` must be a valid pointer returned by `dash_open_*`
#[no_mangle]
pub unsafe extern "C" fn dash_next_page(dash: *mut FfiDashboard) -> bool {
    !dash.is_null() && (*dash).inner.next_page()
}

/// Go back one page
///
/// # Safety
/// - `dash` must be a valid pointer returned by `dash_open_*`
#[no_mangle]
pub unsafe extern "C" fn dash_prev_page(dash: *mut FfiDashboard) -> bool {
    !dash.is_null() && (*dash).inner.prev_page()
}

/// Advance one window within the page
///
/// # Safety
/// - `dash` must be a valid pointer returned by `dash_open_*`
#[no_mangle]
pub unsafe extern "C" fn dash_next_window(dash: *mut FfiDashboard) -> bool {
    !dash.is_null() && (*dash).inner.next_window()
}

/// Go back one window within the page
///
/// # Safety
/// - `dash` must be a valid pointer returned by `dash_open_*`
#[no_mangle]
pub unsafe extern "C" fn dash_prev_window(dash: *mut FfiDashboard) -> bool {
    !dash.is_null() && (*dash).inner.prev_window()
}

/// Free a string returned by other FFI functions
///
/// # Safety
/// - `s` must be a valid pointer returned by a dash_* function or null
#[no_mangle]
pub unsafe extern "C" fn dash_free_string(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}
