use log::debug;
use std::path::Path;
use std::process::Command;

use crate::error::{PayslipError, Result};

const CONVERTER: &str = "wkhtmltopdf";

/// Whether the external converter can be run
pub fn converter_available() -> bool {
    Command::new(CONVERTER).arg("--version").output().is_ok()
}

/// Convert an HTML file written to disk into a PDF using wkhtmltopdf.
pub fn convert_html(html_path: &Path, pdf_path: &Path) -> Result<()> {
    if !converter_available() {
        return Err(PayslipError::ConverterNotFound);
    }

    debug!(
        "converting {} -> {}",
        html_path.display(),
        pdf_path.display()
    );

    // Payslips embed fonts and logos as data URIs, nothing is fetched
    let output = Command::new(CONVERTER)
        .args(["--quiet", "--encoding", "utf-8", "--page-size", "A4"])
        .arg(html_path)
        .arg(pdf_path)
        .output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(PayslipError::PdfConversion(stderr.trim().to_string()));
    }

    Ok(())
}
