use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::CompanyInfo;

/// One labelled earnings or deduction entry
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct LineItem {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub value: Option<f64>,
}

impl LineItem {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value: Some(value),
        }
    }

    /// A row is shown when it has a label or a strictly positive value
    pub fn is_displayable(&self) -> bool {
        !self.label.trim().is_empty() || self.value.is_some_and(|v| v > 0.0)
    }
}

/// Who the payslip is for. All fields optional; absent fields render blank.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct EmployeeInfo {
    pub name: Option<String>,
    pub job_title: Option<String>,
    /// E.P.F number
    pub code: Option<String>,
    pub bank_name: Option<String>,
    pub branch_name: Option<String>,
    pub account_no: Option<String>,
    pub payment_date: Option<NaiveDate>,
    pub project_name: Option<String>,
    pub department_name: Option<String>,
    /// Pay period as displayed, e.g. "March 2025"
    pub period: Option<String>,
}

/// Already-computed payroll figures for one employee and one period.
/// Nothing here is recomputed or validated.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct PayrollAmounts {
    pub working_days: Option<f64>,
    pub rc_count: Option<f64>,
    pub dc_count: Option<f64>,

    pub basic_salary: Option<f64>,
    pub bike_fuel: Option<f64>,
    pub mobile_data: Option<f64>,
    pub mobile_phone: Option<f64>,
    pub value_80: Option<f64>,
    pub visit: Option<f64>,
    pub adjustment: Option<f64>,

    pub gross_salary: Option<f64>,
    pub net_salary: Option<f64>,

    pub epf_employee: Option<f64>,
    pub epf_employer: Option<f64>,
    pub etf_employer: Option<f64>,
    pub total_deduction: Option<f64>,
    pub contribution_total: Option<f64>,
}

/// Everything a single payslip render needs
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct PayslipInput {
    pub employee: EmployeeInfo,
    pub amounts: PayrollAmounts,

    /// Dynamic header cells; the legacy Days/RC/DC header is used when absent
    pub header_rows: Option<Vec<LineItem>>,
    /// Dynamic earnings rows; the legacy fixed earnings layout is used when absent
    pub earnings_rows: Option<Vec<LineItem>>,
    pub deduction_rows: Vec<LineItem>,

    /// Custom allowance rows placed beneath Bike & Fuel in the legacy layout
    pub allowance_rows: Vec<LineItem>,
    /// Pre-rendered allowance markup. Its row count is inferred from the
    /// `<tr>` markers it contains. Ignored when `allowance_rows` is set.
    pub allowance_markup: Option<String>,

    pub company: Option<CompanyInfo>,
    /// Logo image as a data URI
    pub logo: Option<String>,
    /// Base64 TrueType payload for the numeric font
    pub font: Option<String>,
    /// Free-text identifier printed at the foot of the slip
    pub specific_code: Option<String>,
}
