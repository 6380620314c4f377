//! PDF to text conversion for payslip downloads.
//!
//! Payslips usually arrive as PDFs. Their text is extracted once into a
//! sibling `.txt` file, which is what the parser reads. Existing text files
//! are never overwritten, so a directory can be re-synced cheaply.

use crate::error::{PayslipError, Result};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

/// Result of extracting one PDF.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extraction {
    /// Text was extracted and written.
    Extracted,

    /// The destination already existed; nothing was done.
    AlreadyExists,
}

/// Extracts the text of `pdf` into `txt` unless `txt` already exists.
///
/// # Errors
///
/// Returns [`PayslipError::Pdf`] if the PDF cannot be decoded, or an I/O
/// error if it cannot be read or the text cannot be written.
pub fn extract_pdf<P, Q>(pdf: P, txt: Q) -> Result<Extraction>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let (pdf, txt) = (pdf.as_ref(), txt.as_ref());

    if txt.exists() {
        debug!("{} already exists", txt.display());
        return Ok(Extraction::AlreadyExists);
    }

    let bytes = fs::read(pdf)?;
    let text = pdf_extract::extract_text_from_mem(&bytes).map_err(|e| PayslipError::Pdf {
        path: pdf.display().to_string(),
        message: e.to_string(),
    })?;

    fs::write(txt, text.as_bytes())?;
    info!(
        "Extracted {} characters from {} to {}",
        text.len(),
        pdf.display(),
        txt.display()
    );

    Ok(Extraction::Extracted)
}

/// Lists the `*.pdf` files of `dir` paired with their `.txt` destination in
/// `dest`, sorted by file name.
pub fn pdf_jobs<P, Q>(dir: P, dest: Q) -> Result<Vec<(PathBuf, PathBuf)>>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let mut pdfs: Vec<PathBuf> = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<_>>()?;
    pdfs.retain(|path| {
        path.is_file()
            && path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
    });
    pdfs.sort();

    let dest = dest.as_ref();
    Ok(pdfs
        .into_iter()
        .filter_map(|pdf| {
            let name = pdf.file_name()?;
            let txt = dest.join(name).with_extension("txt");
            Some((pdf, txt))
        })
        .collect())
}

/// Extracts every PDF of `source` into `dest`, creating `dest` if needed.
///
/// `on_job` sees each PDF, its text destination and the outcome, in file
/// name order. Stops at the first PDF that fails.
pub fn extract_dir<P, Q, F>(source: P, dest: Q, mut on_job: F) -> Result<usize>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    F: FnMut(&Path, &Path, Extraction),
{
    fs::create_dir_all(dest.as_ref())?;

    let jobs = pdf_jobs(source, dest)?;
    for (pdf, txt) in &jobs {
        let outcome = extract_pdf(pdf, txt)?;
        on_job(pdf, txt, outcome);
    }

    Ok(jobs.len())
}
