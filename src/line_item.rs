//! Splitting of `label   amount` table cells.
//!
//! Labels may contain single spaces ("Basic Salary"), so the label and the
//! value are told apart by a run of at least two whitespace characters.

use crate::amount::Amount;
use crate::error::{PayslipError, Result};
use regex::Regex;
use std::str::FromStr;
use std::sync::LazyLock;

/// Two or more whitespace characters between a label and its value.
static WIDE_GAP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s\s+").expect("valid regex"));

/// A colon followed by whitespace, as in `Net Pay:   1,934.36`.
static COLON_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r":\s+").expect("valid regex"));

/// One labeled amount from a payslip table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    /// Item description, e.g. `Basic Salary`
    pub label: String,

    /// Signed amount
    pub amount: Amount,
}

/// Splits a `label   amount` cell into a [`LineItem`].
///
/// The cell must split into exactly two parts on wide whitespace gaps.
pub fn split_line_item(cell: &str) -> Result<LineItem> {
    let cell = cell.trim();
    let parts: Vec<&str> = WIDE_GAP_RE.split(cell).collect();

    match parts.as_slice() {
        [label, amount] => Ok(LineItem {
            label: label.trim().to_string(),
            amount: Amount::from_str(amount)?,
        }),
        _ => Err(PayslipError::LineItem {
            cell: cell.to_string(),
        }),
    }
}

/// Splits a `Label: amount` cell into a [`LineItem`].
pub fn split_colon_item(cell: &str) -> Result<LineItem> {
    let (label, value) = split_once(&COLON_RE, cell)?;
    Ok(LineItem {
        label,
        amount: Amount::from_str(&value)?,
    })
}

/// Splits a metadata cell into a label and a text value.
///
/// Cells containing a colon use the `Label: value` form, anything else the
/// `Label   value` form. Only the first separator counts, so values may
/// contain further gaps or colons.
pub fn split_labeled(cell: &str) -> Result<(String, String)> {
    let separator = if cell.contains(':') {
        &*COLON_RE
    } else {
        &*WIDE_GAP_RE
    };
    split_once(separator, cell)
}

fn split_once(separator: &Regex, cell: &str) -> Result<(String, String)> {
    let cell = cell.trim();
    let mut parts = separator.splitn(cell, 2);

    match (parts.next(), parts.next()) {
        (Some(label), Some(value)) => Ok((label.trim().to_string(), value.trim().to_string())),
        _ => Err(PayslipError::LineItem {
            cell: cell.to_string(),
        }),
    }
}
