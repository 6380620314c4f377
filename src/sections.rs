//! Parsers for the individual blocks of a payslip.
//!
//! Every table in the layout is bounded by pipes, so a well-formed row
//! carries 4 pipes and splits into 5 cells: an empty one on each side and
//! 3 content cells in between.

use crate::amount::Amount;
use crate::error::{PayslipError, Result};
use crate::line_item::{split_colon_item, split_labeled, split_line_item};
use log::debug;
use std::collections::BTreeMap;

/// Metadata labels mapped to their text values.
pub type Metadata = BTreeMap<String, String>;

/// Item labels mapped to signed amounts.
pub type LineItems = BTreeMap<String, Amount>;

/// Cells per bounded table row.
const ROW_CELLS: usize = 5;

/// Pipes in a bounded table row.
const ROW_PIPES: usize = ROW_CELLS - 1;

/// The three line-item sets held by the payments table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentsTable {
    pub payments: LineItems,
    pub deductions: LineItems,
    pub ytd: LineItems,
}

/// Splits a bounded row into its 3 content cells.
fn content_cells<'a>(row: &'a str, section: &'static str) -> Result<[&'a str; 3]> {
    let cells: Vec<&str> = row.split('|').collect();
    match cells.as_slice() {
        [_, first, second, third, _] => Ok([*first, *second, *third]),
        _ => Err(PayslipError::Structure {
            section,
            found: cells.len(),
            expected: ROW_CELLS,
        }),
    }
}

/// Parses the metadata block (employee name, pay date, tax code, ...).
///
/// Duplicate labels keep the last value seen.
pub fn parse_metadata(text: &str) -> Result<Metadata> {
    let mut metadata = Metadata::new();

    for row in text.lines().filter(|row| !row.trim().is_empty()) {
        for cell in content_cells(row, "metadata row")? {
            let cell = cell.trim();
            if cell.is_empty() {
                continue;
            }
            let (label, value) = split_labeled(cell)?;
            metadata.insert(label, value);
        }
    }

    debug!("Parsed {} metadata fields", metadata.len());
    Ok(metadata)
}

/// Parses the payments table into payments, deductions and YTD balances.
///
/// Each column is independent: a row may fill any subset of the three sets.
pub fn parse_payments_table(text: &str) -> Result<PaymentsTable> {
    let mut table = PaymentsTable::default();

    for row in text.lines().map(str::trim).filter(|row| !row.is_empty()) {
        let [payment, deduction, ytd] = content_cells(row, "payments row")?;

        for (cell, items) in [
            (payment, &mut table.payments),
            (deduction, &mut table.deductions),
            (ytd, &mut table.ytd),
        ] {
            let cell = cell.trim();
            if cell.is_empty() {
                continue;
            }
            let item = split_line_item(cell)?;
            items.insert(item.label, item.amount);
        }
    }

    debug!(
        "Parsed {} payments, {} deductions, {} YTD balances",
        table.payments.len(),
        table.deductions.len(),
        table.ytd.len()
    );
    Ok(table)
}

/// Parses the single totals row: payment total, deduction total and net pay.
pub fn parse_totals(text: &str) -> Result<LineItems> {
    let mut totals = LineItems::new();

    for cell in content_cells(text, "totals row")? {
        let item = split_colon_item(cell)?;
        totals.insert(item.label, item.amount);
    }

    Ok(totals)
}

/// Parses the employer totals footer.
///
/// The first line is a heading. Lines without exactly 4 pipes are page
/// furniture and are ignored; only the first column ("this employer") is
/// read from the rest.
pub fn parse_employer_totals(text: &str) -> Result<LineItems> {
    let mut totals = LineItems::new();

    for row in text.trim().lines().skip(1).map(str::trim) {
        if row.is_empty() || row.matches('|').count() != ROW_PIPES {
            continue;
        }

        let [this_employer, _, _] = content_cells(row, "employer totals row")?;
        let item = split_line_item(this_employer)?;
        totals.insert(item.label, item.amount);
    }

    debug!("Parsed {} employer totals", totals.len());
    Ok(totals)
}
