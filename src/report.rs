//! Batch report builder.
//!
//! Collects parsed payslips in the order they are added (filename order when
//! driven from a directory) and renders two CSV views of them: one row per
//! payslip, and one column per payslip.

use crate::categories::CategoryCounts;
use crate::config::ReportConfig;
use crate::error::{PayslipError, Result};
use crate::payslip::Payslip;
use crate::tree::FlatRecord;
use log::{debug, info, warn};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// A payslip accepted into the report.
#[derive(Debug, Clone)]
pub struct ParsedPayslip {
    /// Where the payslip came from, for log messages.
    pub source: String,

    /// Value of the configured header field.
    pub pay_date: String,

    /// Flattened fields.
    pub fields: FlatRecord,
}

/// What happened to one payslip file.
#[derive(Debug)]
pub enum FileOutcome {
    /// Parsed and added to the report.
    Parsed,

    /// Failed to parse; left out of the report.
    Rejected(PayslipError),
}

/// Accumulates payslips and writes the monthly reports.
///
/// # Output Ordering
///
/// Categories follow the configured priority prefixes, lexicographic within
/// each group. Payslips appear in the order they were added.
pub struct PayslipReport {
    config: ReportConfig,

    /// Accepted payslips in insertion order.
    payslips: Vec<ParsedPayslip>,

    /// Field path occurrences across accepted payslips.
    categories: CategoryCounts,
}

impl PayslipReport {
    /// Creates an empty report.
    pub fn new(config: ReportConfig) -> Self {
        PayslipReport {
            config,
            payslips: Vec::new(),
            categories: CategoryCounts::new(),
        }
    }

    /// Returns `true` if `text` carries the payslip marker.
    pub fn is_payslip(&self, text: &str) -> bool {
        text.contains(&self.config.marker)
    }

    /// Parses one payslip and adds it to the report.
    ///
    /// # Errors
    ///
    /// Returns the parse error, or [`PayslipError::MissingField`] when the
    /// header field is absent. The report is unchanged on error.
    pub fn add_document(&mut self, source: &str, text: &str) -> Result<()> {
        let payslip = Payslip::parse(text)?;
        debug!("{}:\n{}", source, payslip.to_tree());

        let fields = payslip.flatten();
        let pay_date = fields
            .get(&self.config.header_field)
            .map(|value| value.to_string())
            .ok_or_else(|| PayslipError::MissingField {
                field: self.config.header_field.clone(),
            })?;

        if let Some(existing) = self.payslips.iter().find(|p| p.pay_date == pay_date) {
            warn!(
                "{}: pay date {} already seen in {}",
                source, pay_date, existing.source
            );
        }

        self.categories.record(&fields);
        self.payslips.push(ParsedPayslip {
            source: source.to_string(),
            pay_date,
            fields,
        });

        Ok(())
    }

    /// Reads one text file, returning its text if it carries the payslip
    /// marker.
    pub fn read_payslip<P: AsRef<Path>>(&self, path: P) -> Result<Option<String>> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;

        if !self.is_payslip(&text) {
            debug!("{}: no '{}' marker", path.display(), self.config.marker);
            return Ok(None);
        }

        Ok(Some(text))
    }

    /// Adds the text of a payslip file read with [`read_payslip`].
    ///
    /// Files failing to parse are logged at warn level and reported as
    /// [`FileOutcome::Rejected`].
    ///
    /// [`read_payslip`]: PayslipReport::read_payslip
    pub fn add_file<P: AsRef<Path>>(&mut self, path: P, text: &str) -> Result<FileOutcome> {
        let path = path.as_ref();

        match self.add_document(&path.display().to_string(), text) {
            Ok(()) => Ok(FileOutcome::Parsed),
            Err(e) if e.is_document_error() => {
                warn!("{}: {}", path.display(), e);
                Ok(FileOutcome::Rejected(e))
            }
            Err(e) => Err(e),
        }
    }

    /// Returns the accepted payslips in insertion order.
    pub fn payslips(&self) -> &[ParsedPayslip] {
        &self.payslips
    }

    /// Returns every category in report order.
    pub fn categories(&self) -> Vec<String> {
        self.categories.ordered(&self.config.field_order)
    }

    /// Returns the categories of the column-oriented report.
    pub fn column_categories(&self) -> Vec<String> {
        self.categories()
            .into_iter()
            .filter(|category| !self.config.is_unwanted(category))
            .collect()
    }

    /// Writes the row-oriented report: a header of categories, then one row
    /// per payslip. Missing fields are empty cells.
    pub fn write_rows<W: Write>(&self, writer: W) -> Result<()> {
        let categories = self.categories();
        let mut csv_writer = csv::Writer::from_writer(writer);

        if !categories.is_empty() {
            csv_writer.write_record(&categories)?;
        }

        for payslip in &self.payslips {
            csv_writer.write_record(categories.iter().map(|category| {
                payslip
                    .fields
                    .get(category)
                    .map(|value| value.to_string())
                    .unwrap_or_default()
            }))?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Writes the column-oriented report: no header, one row per category
    /// with its label first and then one cell per payslip.
    pub fn write_columns<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        for category in self.column_categories() {
            let cells = self.payslips.iter().map(|payslip| {
                payslip
                    .fields
                    .get(&category)
                    .map(|value| value.to_string())
                    .unwrap_or_default()
            });
            csv_writer.write_record(std::iter::once(category.clone()).chain(cells))?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Writes both reports into `dir` under their configured file names.
    ///
    /// Returns the paths written, rows report first.
    pub fn write_reports<P: AsRef<Path>>(&self, dir: P) -> Result<(PathBuf, PathBuf)> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        for category in self.categories.incomplete() {
            debug!(
                "{} present in {} of {} payslips",
                category,
                self.categories.count(category),
                self.categories.records()
            );
        }

        let rows_path = dir.join(&self.config.rows_file);
        self.write_rows(BufWriter::new(File::create(&rows_path)?))?;
        info!(
            "Wrote {} payslips to {}",
            self.payslips.len(),
            rows_path.display()
        );

        let columns_path = dir.join(&self.config.columns_file);
        self.write_columns(BufWriter::new(File::create(&columns_path)?))?;
        info!(
            "Wrote {} categories to {}",
            self.column_categories().len(),
            columns_path.display()
        );

        Ok((rows_path, columns_path))
    }
}

impl Default for PayslipReport {
    fn default() -> Self {
        Self::new(ReportConfig::default())
    }
}

/// Lists the `*.txt` files of `dir`, sorted by file name.
pub fn payslip_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<_>>()?;
    files.retain(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "txt"));
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYSLIP: &str = "Acme
    --------------------
| Employee Number: 7 | Pay Date: {date} | Pay Method: BACS |
    --------------------
| heading | | |
    -------------------|
| columns | | |
    -------------------|
|  Basic Salary   {basic}  |  Income Tax   100.00  |  |
    -------------------|
| Total Payments:  {basic} | Total Deductions:  100.00 | Net Pay:  1.00 |
    -------------------|

    -------------------|
Employer Totals
|  Taxable Pay   {basic}  |  |  |
";

    fn payslip(date: &str, basic: &str) -> String {
        PAYSLIP.replace("{date}", date).replace("{basic}", basic)
    }

    fn report_with(docs: &[(&str, &str)]) -> PayslipReport {
        let mut report = PayslipReport::default();
        for (idx, (date, basic)) in docs.iter().enumerate() {
            report
                .add_document(&format!("doc{}", idx), &payslip(date, basic))
                .unwrap();
        }
        report
    }

    fn render<F>(write: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> Result<()>,
    {
        let mut output = Vec::new();
        write(&mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_add_document() {
        let report = report_with(&[("30/04/2019", "1,000.00")]);
        assert_eq!(report.payslips().len(), 1);
        assert_eq!(report.payslips()[0].pay_date, "30/04/2019");
        assert_eq!(report.payslips()[0].source, "doc0");
    }

    #[test]
    fn test_missing_pay_date_rejected() {
        let mut report = PayslipReport::default();
        let text = payslip("30/04/2019", "1.00").replace("Pay Date", "Paid On");
        match report.add_document("doc", &text) {
            Err(PayslipError::MissingField { field }) => assert_eq!(field, ".m.Pay Date"),
            other => panic!("Expected missing field, got {:?}", other),
        }
        assert!(report.payslips().is_empty());
        assert!(report.categories().is_empty());
    }

    #[test]
    fn test_categories_ordered() {
        let report = report_with(&[("30/04/2019", "1.00")]);
        assert_eq!(
            report.categories(),
            vec![
                ".m.Pay Date",
                ".m.Pay Method",
                ".m.Employee Number",
                ".d.p.Basic Salary",
                ".d.d.Income Tax",
                ".d.t.Net Pay",
                ".d.t.Total Deductions",
                ".d.t.Total Payments",
                ".d.et.Taxable Pay",
            ]
        );
        assert!(!report
            .column_categories()
            .contains(&".m.Pay Method".to_string()));
    }

    #[test]
    fn test_write_rows() {
        let report = report_with(&[("30/04/2019", "1,000.00"), ("31/05/2019", "2,000.00")]);
        let output = render(|out| report.write_rows(out));
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with(".m.Pay Date,.m.Pay Method,"));
        assert!(lines[1].starts_with("30/04/2019,BACS,7,1000.00,100.00,"));
        assert!(lines[2].starts_with("31/05/2019,BACS,7,2000.00,"));
    }

    #[test]
    fn test_write_columns() {
        let report = report_with(&[("30/04/2019", "1,000.00"), ("31/05/2019", "2,000.00")]);
        let output = render(|out| report.write_columns(out));
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], ".m.Pay Date,30/04/2019,31/05/2019");
        assert_eq!(lines[1], ".m.Employee Number,7,7");
        assert_eq!(lines[2], ".d.p.Basic Salary,1000.00,2000.00");
        assert!(!output.contains("Pay Method"));
    }

    #[test]
    fn test_duplicate_pay_dates_keep_separate_columns() {
        let report = report_with(&[("30/04/2019", "1,000.00"), ("30/04/2019", "1,500.00")]);
        let output = render(|out| report.write_columns(out));

        assert!(output.contains(".m.Pay Date,30/04/2019,30/04/2019"));
        assert!(output.contains(".d.p.Basic Salary,1000.00,1500.00"));
    }

    #[test]
    fn test_empty_report_writes_nothing() {
        let report = PayslipReport::default();
        assert_eq!(render(|out| report.write_rows(out)), "");
        assert_eq!(render(|out| report.write_columns(out)), "");
    }
}
