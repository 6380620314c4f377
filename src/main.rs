//! Payslip Report CLI
//!
//! Parses every payslip text file in a directory and writes the
//! row-oriented and column-oriented monthly reports.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin payslip-report -- payslips/ reports/
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity
//! - `PAYSLIP_REPORT_CONFIG`: Path to a TOML file overriding report settings

use payslip_reports::{
    payslip_files, FileOutcome, PayslipError, PayslipReport, ReportConfig, Result,
};
use std::env;
use std::path::PathBuf;
use std::process;

const USAGE: &str = "payslip-report <payslips-dir> [output-dir]";

const CONFIG_ENV: &str = "PAYSLIP_REPORT_CONFIG";

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        return Err(PayslipError::MissingArgument { usage: USAGE });
    }

    let input_dir = PathBuf::from(&args[1]);
    let output_dir = args
        .get(2)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    let config = match env::var_os(CONFIG_ENV) {
        Some(path) => ReportConfig::load(path)?,
        None => ReportConfig::default(),
    };

    let mut report = PayslipReport::new(config);
    for path in payslip_files(&input_dir)? {
        let Some(text) = report.read_payslip(&path)? else {
            println!("Skipping {} ...", path.display());
            continue;
        };

        println!("Parsing {} ...", path.display());
        if let FileOutcome::Rejected(e) = report.add_file(&path, &text)? {
            println!("Rejected {}: {}", path.display(), e);
        }
    }

    report.write_reports(&output_dir)?;
    println!("Done.");

    Ok(())
}
