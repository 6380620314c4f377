//! Payslip PDF to text CLI
//!
//! Extracts the text of every PDF in a directory into `.txt` files that
//! `payslip-report` can read. Existing text files are left alone.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin payslip-to-text -- pdfs/ payslips/
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `info` to control logging verbosity

use payslip_reports::{extract_dir, Extraction, PayslipError, Result};
use std::env;
use std::process;

const USAGE: &str = "payslip-to-text <pdf-dir> <txt-dir>";

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        return Err(PayslipError::MissingArgument { usage: USAGE });
    }

    let (source_dir, dest_dir) = (&args[1], &args[2]);
    let count = extract_dir(source_dir, dest_dir, |pdf, txt, outcome| {
        println!("{}", pdf.display());
        println!("{}", txt.display());
        match outcome {
            Extraction::AlreadyExists => println!("Already exists. Skipping..."),
            Extraction::Extracted => println!("Extracted."),
        }
    })?;
    println!("{} PDFs processed.", count);

    Ok(())
}
