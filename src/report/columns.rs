use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::format::{currency, escape, grouped, integer};

/// One generic detail record, keyed by column key
pub type DetailRecord = BTreeMap<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Right,
    Center,
}

impl Align {
    pub fn css_class(self) -> &'static str {
        match self {
            Align::Left => "text-left",
            Align::Right => "text-right",
            Align::Center => "text-center",
        }
    }
}

/// How a cell value is turned into text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellFormat {
    Text,
    Integer,
    Currency,
    /// Thousands separators, up to three fractional digits
    Grouped,
}

impl CellFormat {
    pub fn is_numeric(self) -> bool {
        !matches!(self, CellFormat::Text)
    }

    /// Format a number; missing numbers render as the zero placeholder.
    pub fn number(self, value: Option<f64>) -> String {
        match self {
            CellFormat::Text => value.map(|v| v.to_string()).unwrap_or_default(),
            CellFormat::Integer => integer(value),
            CellFormat::Currency => currency(value),
            CellFormat::Grouped => grouped(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnConfig {
    pub label: String,
    pub key: String,
    #[serde(default)]
    pub align: Align,
    #[serde(default)]
    pub format: Option<CellFormat>,
    /// Shown when the record has no value for this column
    #[serde(default)]
    pub fallback: Option<String>,
}

impl ColumnConfig {
    pub fn new(label: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            key: key.into(),
            align: Align::Left,
            format: None,
            fallback: None,
        }
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn format(mut self, format: CellFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = Some(fallback.into());
        self
    }

    /// Escaped cell text for this column of `record`
    pub fn cell(&self, record: &DetailRecord) -> String {
        let value = record.get(&self.key).filter(|v| !is_blank(v));

        let text = match (value, self.format) {
            (None, _) if self.fallback.is_some() => self.fallback.clone().unwrap_or_default(),
            (value, Some(format)) if format.is_numeric() => {
                format.number(value.and_then(as_number))
            }
            (Some(value), _) => as_text(value),
            (None, _) => String::new(),
        };

        escape(&text)
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// The built-in single-column payroll reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportKind {
    DepositTools,
    LossesRecovery,
    OtherDeductions,
}

impl ReportKind {
    pub fn title(self) -> &'static str {
        match self {
            ReportKind::DepositTools => "Deposit/Tools Report",
            ReportKind::LossesRecovery => "Losses Recovery Report",
            ReportKind::OtherDeductions => "Other Deductions Report",
        }
    }

    pub fn total_label(self) -> &'static str {
        match self {
            ReportKind::DepositTools => "TOTAL DEPOSIT",
            ReportKind::LossesRecovery => "TOTAL LOSSES",
            ReportKind::OtherDeductions => "TOTAL DEDUCTIONS",
        }
    }

    pub fn columns(self) -> Vec<ColumnConfig> {
        let (id_key, amount_label, amount_key) = match self {
            ReportKind::DepositTools => ("employeeId", "DEPOSIT AMOUNT", "depositAmount"),
            ReportKind::LossesRecovery => ("displayId", "LOSSES AMOUNT", "lossesAmount"),
            ReportKind::OtherDeductions => ("displayId", "DEDUCTION", "deductionAmount"),
        };

        let job_role = ColumnConfig::new("JOB ROLE", "jobRole");
        let job_role = match self {
            ReportKind::DepositTools => job_role.fallback("N/A"),
            _ => job_role,
        };

        vec![
            ColumnConfig::new("EMP ID", id_key),
            ColumnConfig::new("NAME", "employeeName"),
            job_role,
            ColumnConfig::new(amount_label, amount_key)
                .align(Align::Right)
                .format(CellFormat::Grouped),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> DetailRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn numeric_cells_default_to_zero() {
        let column = ColumnConfig::new("AMOUNT", "amount").format(CellFormat::Grouped);
        assert_eq!(column.cell(&record(json!({}))), "0");
        assert_eq!(column.cell(&record(json!({"amount": 1500}))), "1,500");
        assert_eq!(column.cell(&record(json!({"amount": "2500.5"}))), "2,500.5");
    }

    #[test]
    fn text_cells_use_fallback_when_blank() {
        let column = ColumnConfig::new("JOB ROLE", "jobRole").fallback("N/A");
        assert_eq!(column.cell(&record(json!({"jobRole": ""}))), "N/A");
        assert_eq!(column.cell(&record(json!({"jobRole": null}))), "N/A");
        assert_eq!(column.cell(&record(json!({"jobRole": "Driver"}))), "Driver");

        let plain = ColumnConfig::new("NAME", "employeeName");
        assert_eq!(plain.cell(&record(json!({}))), "");
        assert_eq!(plain.cell(&record(json!({"employeeName": "A & B"}))), "A &amp; B");
    }

    #[test]
    fn presets_end_with_a_right_aligned_amount() {
        for kind in [
            ReportKind::DepositTools,
            ReportKind::LossesRecovery,
            ReportKind::OtherDeductions,
        ] {
            let columns = kind.columns();
            let last = columns.last().unwrap();
            assert_eq!(columns.len(), 4);
            assert_eq!(last.align, Align::Right);
            assert_eq!(last.format, Some(CellFormat::Grouped));
        }
    }
}
