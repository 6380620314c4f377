//! # Payslip Reports
//!
//! Parses fixed-layout plaintext payslips (as extracted from payslip PDFs)
//! and aggregates a series of them into monthly CSV reports.
//!
//! ## Design Principles
//!
//! - **Strict layout**: two structural splits with exact part counts; any
//!   other shape rejects the document
//! - **Fixed-point amounts**: 2 decimal places via `rust_decimal`
//! - **Explicit tree**: payslips flatten through a `Leaf | Branch` tree into
//!   dotted field paths such as `.d.p.Basic Salary`
//! - **Deterministic output**: categories ordered by priority prefix then
//!   lexicographically; payslips in file name order
//!
//! ## Example
//!
//! ```no_run
//! use payslip_reports::{payslip_files, PayslipReport, ReportConfig};
//!
//! let mut report = PayslipReport::new(ReportConfig::default());
//! for path in payslip_files("payslips").unwrap() {
//!     if let Some(text) = report.read_payslip(&path).unwrap() {
//!         report.add_file(&path, &text).unwrap();
//!     }
//! }
//! report.write_reports(".").unwrap();
//! ```

pub mod amount;
pub mod categories;
pub mod config;
pub mod error;
pub mod extract;
pub mod line_item;
pub mod payslip;
pub mod report;
pub mod sections;
pub mod tree;

pub use amount::Amount;
pub use categories::{order_categories, CategoryCounts};
pub use config::ReportConfig;
pub use error::{PayslipError, Result};
pub use extract::{extract_dir, extract_pdf, Extraction};
pub use line_item::{split_line_item, LineItem};
pub use payslip::{PayData, Payslip, PAY_DATE};
pub use report::{payslip_files, FileOutcome, ParsedPayslip, PayslipReport};
pub use sections::{LineItems, Metadata};
pub use tree::{FlatRecord, Node, Value};
