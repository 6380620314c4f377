//! Error types for payslip parsing and reporting.

use thiserror::Error;

/// Result type alias for payslip operations
pub type Result<T> = std::result::Result<T, PayslipError>;

/// Errors that can occur while parsing payslips or writing reports.
///
/// `Structure`, `Amount`, `LineItem` and `MissingField` are local to one
/// document: the report builder rejects that document and moves on. The
/// remaining variants abort the batch.
#[derive(Error, Debug)]
pub enum PayslipError {
    /// Failed to read an input file or write a report
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV writing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A structural split produced the wrong number of parts
    #[error("Unexpected layout in {section}: found {found} parts, expected {expected}")]
    Structure {
        section: &'static str,
        found: usize,
        expected: usize,
    },

    /// Unparseable currency amount
    #[error("Invalid amount '{text}'")]
    Amount { text: String },

    /// Cell without the separator between label and value
    #[error("Invalid line item '{cell}'")]
    LineItem { cell: String },

    /// A required metadata field is absent
    #[error("Missing required field '{field}'")]
    MissingField { field: String },

    /// Configuration file could not be read or parsed
    #[error("Invalid configuration '{path}': {message}")]
    Config { path: String, message: String },

    /// PDF text extraction failed
    #[error("Failed to extract text from '{path}': {message}")]
    Pdf { path: String, message: String },

    /// Missing command-line argument
    #[error("Missing argument. Usage: {usage}")]
    MissingArgument { usage: &'static str },
}

impl PayslipError {
    /// Returns `true` if the error only concerns the document being parsed.
    pub fn is_document_error(&self) -> bool {
        matches!(
            self,
            PayslipError::Structure { .. }
                | PayslipError::Amount { .. }
                | PayslipError::LineItem { .. }
                | PayslipError::MissingField { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structure_error_message() {
        let err = PayslipError::Structure {
            section: "payslip",
            found: 2,
            expected: 3,
        };
        assert_eq!(
            err.to_string(),
            "Unexpected layout in payslip: found 2 parts, expected 3"
        );
        assert!(err.is_document_error());
    }

    #[test]
    fn test_io_error_is_not_document_error() {
        let err = PayslipError::from(std::io::Error::other("disk full"));
        assert!(!err.is_document_error());
    }
}
