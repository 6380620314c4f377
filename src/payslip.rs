//! Top-level payslip parser.
//!
//! The layout is recovered in two structural splits:
//!
//! 1. Lines of dashes divide the document into address, metadata and
//!    payment data.
//! 2. Lines of dashes ending in a pipe divide the payment data into heading,
//!    column headers, payments table, totals row, a blank gap and the
//!    employer totals footer.
//!
//! Each split must produce exactly the expected number of parts; anything
//! else means the document is not in the expected format. Windows line
//! endings are folded to `\n` first.

use crate::error::{PayslipError, Result};
use crate::sections::{
    parse_employer_totals, parse_metadata, parse_payments_table, parse_totals, LineItems,
    Metadata,
};
use crate::tree::{FlatRecord, Node};
use log::debug;
use regex::Regex;
use std::sync::LazyLock;

/// Metadata label holding the pay date.
pub const PAY_DATE: &str = "Pay Date";

/// Separator between the top-level blocks: indentation then dashes.
static SECTION_SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s+?-+$").expect("valid regex"));

/// Separator inside the payment data: indentation, dashes, then a pipe.
static TABLE_SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s+?-+\|$").expect("valid regex"));

/// Amounts below the metadata block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PayData {
    pub payments: LineItems,
    pub deductions: LineItems,
    pub ytd: LineItems,
    pub totals: LineItems,
    pub employer_totals: LineItems,
}

/// One parsed payslip.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Payslip {
    pub metadata: Metadata,
    pub data: PayData,
}

impl Payslip {
    /// Parses the text of one payslip.
    ///
    /// # Errors
    ///
    /// Returns [`PayslipError::Structure`] if either split yields the wrong
    /// number of parts, or the section parsers' errors for malformed rows,
    /// line items and amounts.
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.replace("\r\n", "\n");
        let [_address, metadata, payment_data] =
            split_exact::<3>(&SECTION_SEPARATOR_RE, &text, "payslip")?;

        let [_heading, _column_headers, payments_table, totals_row, _gap, employer_footer] =
            split_exact::<6>(&TABLE_SEPARATOR_RE, payment_data, "payment data")?;

        let metadata = parse_metadata(metadata)?;
        let table = parse_payments_table(payments_table)?;
        let totals = parse_totals(totals_row)?;
        let employer_totals = parse_employer_totals(employer_footer)?;

        Ok(Payslip {
            metadata,
            data: PayData {
                payments: table.payments,
                deductions: table.deductions,
                ytd: table.ytd,
                totals,
                employer_totals,
            },
        })
    }

    /// Returns the pay date, if the metadata carries one.
    pub fn pay_date(&self) -> Option<&str> {
        self.metadata.get(PAY_DATE).map(String::as_str)
    }

    /// Returns the payslip as a tree keyed `m` (metadata) and `d` (data),
    /// with the data subdivided into `p`, `d`, `ytd`, `t` and `et`.
    pub fn to_tree(&self) -> Node {
        let amounts =
            |items: &LineItems| Node::leaves(items.iter().map(|(k, v)| (k.as_str(), *v)));

        Node::branch([
            (
                "m",
                Node::leaves(self.metadata.iter().map(|(k, v)| (k.as_str(), v.as_str()))),
            ),
            (
                "d",
                Node::branch([
                    ("p", amounts(&self.data.payments)),
                    ("d", amounts(&self.data.deductions)),
                    ("ytd", amounts(&self.data.ytd)),
                    ("t", amounts(&self.data.totals)),
                    ("et", amounts(&self.data.employer_totals)),
                ]),
            ),
        ])
    }

    /// Flattens the payslip into dotted field paths.
    pub fn flatten(&self) -> FlatRecord {
        self.to_tree().flatten()
    }
}

/// Splits `text` on `separator`, requiring exactly `N` parts.
fn split_exact<'a, const N: usize>(
    separator: &Regex,
    text: &'a str,
    section: &'static str,
) -> Result<[&'a str; N]> {
    let parts: Vec<&'a str> = separator.split(text).collect();
    debug!("Split {} into {} parts", section, parts.len());

    <[&'a str; N]>::try_from(parts).map_err(|parts| PayslipError::Structure {
        section,
        found: parts.len(),
        expected: N,
    })
}
