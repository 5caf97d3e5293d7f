//! dash-core: Core library for exploring delimited text datasets
//!
//! This library provides functionality to:
//! - Parse comma-delimited text into a header list and ordered rows
//! - Filter rows by multiple values across multiple columns
//! - Derive stable row keys for bookmarking and deduplication
//! - Track bookmarks, filters and page/window position for a session
//! - Export filtered rows as CSV or JSON

pub mod bookmarks;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod export;
pub mod filter;
pub mod pager;
pub mod parser;
pub mod row_key;
pub mod table;

pub use bookmarks::Bookmarks;
pub use config::DashboardConfig;
pub use dashboard::Dashboard;
pub use error::{Error, Result};
pub use export::{export_rows, write_csv, write_json, ExportFormat};
pub use filter::{apply_filters, filter_options, search_options, FilterOptions, FilterSelection};
pub use pager::Pager;
pub use parser::{parse_csv, parse_csv_str};
pub use row_key::row_key;
pub use table::{Row, Table};
