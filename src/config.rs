//! Report configuration.
//!
//! Everything about the report layout that is not derived from the payslips
//! themselves: which field keys the columns, the priority order of field
//! groups, and which fields are left out of the column-oriented report.
//! Defaults describe the standard monthly reports; a TOML file may override
//! any of them.

use crate::error::{PayslipError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Layout settings for the payslip reports.
///
/// # Example
///
/// ```
/// use payslip_reports::ReportConfig;
///
/// let config = ReportConfig::from_toml_str(r#"unwanted_fields = [".m.Account"]"#).unwrap();
/// assert_eq!(config.unwanted_fields, vec![".m.Account".to_string()]);
/// assert_eq!(config.header_field, ".m.Pay Date");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    /// Field path that identifies a payslip, e.g. `.m.Pay Date`.
    pub header_field: String,

    /// Priority prefixes for ordering report categories.
    pub field_order: Vec<String>,

    /// Field paths left out of the column-oriented report.
    pub unwanted_fields: Vec<String>,

    /// Substring a text file must contain to be treated as a payslip.
    pub marker: String,

    /// File name of the row-oriented report.
    pub rows_file: String,

    /// File name of the column-oriented report.
    pub columns_file: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        let paths =
            |items: &[&str]| -> Vec<String> { items.iter().map(|s| s.to_string()).collect() };

        ReportConfig {
            header_field: ".m.Pay Date".to_string(),
            field_order: paths(&[
                ".m.Pay Date",
                ".m.Pay",
                ".m.",
                ".d.p",
                ".d.d",
                ".d.t",
                ".d.et",
                ".d.ytd",
            ]),
            unwanted_fields: paths(&[
                ".m.Company Name",
                ".m.Account",
                ".m.Sort Code",
                ".m.NI Number",
                ".m.NI Category",
                ".m.Pay Method",
            ]),
            marker: "Employee Number".to_string(),
            rows_file: "payslips-month-rows.csv".to_string(),
            columns_file: "payslips-month-columns.csv".to_string(),
        }
    }
}

impl ReportConfig {
    /// Loads a configuration file.
    ///
    /// Keys missing from the file keep their defaults; unknown keys are an
    /// error.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| PayslipError::Config {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        toml::from_str(&text).map_err(|e| PayslipError::Config {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Parses configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| PayslipError::Config {
            path: "<inline>".to_string(),
            message: e.to_string(),
        })
    }

    /// Returns `true` if `path` is excluded from the column-oriented report.
    pub fn is_unwanted(&self, path: &str) -> bool {
        self.unwanted_fields.iter().any(|field| field == path)
    }
}
