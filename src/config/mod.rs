mod company;

pub use company::{Address, CompanyInfo, Config, RenderSettings};

use crate::error::{PayslipError, Result};
use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the config directory path (~/.payslip/)
pub fn config_dir() -> Result<PathBuf> {
    // First try XDG-style directories
    if let Some(proj_dirs) = ProjectDirs::from("", "", "payslip") {
        return Ok(proj_dirs.config_dir().to_path_buf());
    }

    // Fallback to ~/.payslip/
    let home = dirs_home().ok_or_else(|| {
        PayslipError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        ))
    })?;

    Ok(home.join(".payslip"))
}

fn dirs_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

/// Expand ~ in paths
pub fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs_home() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Resolve the configured output directory. Relative paths are taken
/// relative to the config directory.
pub fn resolve_output_dir(output_dir: &str, config_dir: &Path) -> PathBuf {
    let path = expand_path(output_dir);
    if path.is_absolute() {
        path
    } else {
        config_dir.join(path)
    }
}

/// Load the main config.toml
pub fn load_config(config_dir: &Path) -> Result<Config> {
    let path = config_dir.join("config.toml");
    if !path.exists() {
        return Err(PayslipError::ConfigFileNotFound(path));
    }
    let content = fs::read_to_string(&path)?;
    toml::from_str(&content).map_err(|e| PayslipError::ConfigParse { path, source: e })
}

/// Load a payslip or report input file. The format is picked from the
/// file extension: `.toml` or `.json`.
pub fn load_input<T: DeserializeOwned>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Err(PayslipError::InputNotFound(path.to_path_buf()));
    }
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    let content = fs::read_to_string(path)?;
    let parsed = match ext.as_deref() {
        Some("toml") => toml::from_str(&content).map_err(|e| e.to_string()),
        Some("json") => serde_json::from_str(&content).map_err(|e| e.to_string()),
        _ => return Err(PayslipError::UnsupportedInput(path.to_path_buf())),
    };

    parsed.map_err(|reason| PayslipError::InputParse {
        path: path.to_path_buf(),
        reason,
    })
}

/// Template content for config.toml
pub const CONFIG_TEMPLATE: &str = r#"[company]
company_name = "Your Company (Pvt) Ltd"
company_phone = "+94 11 234 5678"       # optional
company_email = "payroll@example.com"   # optional

[company.address]                       # optional, every part optional
street = "12 Main Street"
city = "Colombo"
# state = "Western"
country = "Sri Lanka"

[render]
numeric_font = "CrashNumberingGothic"   # falls back to monospace when not embedded
footer_message = "Thank You for Being a Part with Us"
output_dir = "output"                   # relative to this directory
"#;

/// Template content for sample-payslip.toml
pub const PAYSLIP_TEMPLATE: &str = r#"# Render with:
#   payslip render sample-payslip.toml
#
# Without earnings_rows the fixed earnings layout is used: Basic, Bike & Fuel,
# Mobile Data, Mobile Phone, 80%, Visit and Adjustment. There are no 100% or
# RC amount rows; put such figures in earnings_rows or allowance_rows instead.

specific_code = "PS-2025-03-0001"

[employee]
name = "Jane Perera"
job_title = "Field Technician"
code = "EMP-0042"
bank_name = "Commercial Bank"
branch_name = "Kandy"
account_no = "8001234567"
payment_date = "2025-03-31"
project_name = "North Grid"
period = "March 2025"

[amounts]
working_days = 26
rc_count = 4
dc_count = 2
basic_salary = 50000.0
bike_fuel = 7500.0
mobile_data = 1200.0
mobile_phone = 800.0
value_80 = 0.0
visit = 2500.0
adjustment = 0.0
gross_salary = 62000.0
net_salary = 55340.0
total_deduction = 6660.0
epf_employer = 6000.0
etf_employer = 1500.0
contribution_total = 7500.0

[[deduction_rows]]
label = "EPF 8%"
value = 4000.0

[[deduction_rows]]
label = "Loan"
value = 2660.0

[[allowance_rows]]
label = "Site Allowance"
value = 1500.0
"#;

/// Template content for sample-report.toml
pub const REPORT_TEMPLATE: &str = r#"# Render with:
#   payslip report deposit-tools sample-report.toml

[record]
period = "2025-03"
date = "2025-03-31"
total_amount = 4500.0

[[details]]
employeeId = "EMP-0042"
employeeName = "Jane Perera"
jobRole = "Field Technician"
depositAmount = 3000.0

[[details]]
employeeId = "EMP-0043"
employeeName = "Nimal Silva"
depositAmount = 1500.0
"#;
