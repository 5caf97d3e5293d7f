//! Dashboard configuration

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default number of rows on one page
pub const DEFAULT_ROWS_PER_PAGE: usize = 100;

/// Default number of rows shown at once within a page
pub const DEFAULT_WINDOW_SIZE: usize = 20;

/// Table layout settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Rows per page
    pub rows_per_page: usize,
    /// Rows per window inside a page
    pub window_size: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
            window_size: DEFAULT_WINDOW_SIZE,
        }
    }
}

impl DashboardConfig {
    /// Load configuration from a JSON file; missing fields take defaults
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject sizes that would make paging meaningless
    pub fn validate(&self) -> Result<()> {
        if self.rows_per_page == 0 {
            return Err(Error::InvalidConfig("rows_per_page must be at least 1".to_string()));
        }
        if self.window_size == 0 {
            return Err(Error::InvalidConfig("window_size must be at least 1".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::default();
        assert_eq!(config.rows_per_page, 100);
        assert_eq!(config.window_size, 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_partial() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"window_size": 10}}"#).unwrap();

        let config = DashboardConfig::load(file.path()).unwrap();
        assert_eq!(config.rows_per_page, 100);
        assert_eq!(config.window_size, 10);
    }

    #[test]
    fn test_load_rejects_zero() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"rows_per_page": 0}}"#).unwrap();

        let err = DashboardConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_load_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        assert!(matches!(
            DashboardConfig::load(file.path()).unwrap_err(),
            Error::Json(_)
        ));
    }
}
