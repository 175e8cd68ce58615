use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::CompanyInfo;
use crate::format::{escape, escape_opt, long_date, period_label};
use crate::payslip::{company_line, contact_line, logo_img};

use super::columns::{CellFormat, ColumnConfig, DetailRecord, ReportKind};

/// Aggregate facts for the whole report
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct AggregateRecord {
    /// `YYYY-MM` or free text
    pub period: Option<String>,
    pub date: Option<NaiveDate>,
    pub total_amount: Option<f64>,
}

/// A report input file: the aggregate plus its detail rows
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct ReportInput {
    pub record: AggregateRecord,
    pub details: Vec<DetailRecord>,
    pub company: Option<CompanyInfo>,
    /// Logo image as a data URI
    pub logo: Option<String>,
}

/// Complete data for rendering a single-column report
#[derive(Debug, Clone)]
pub struct ColumnReport<'a> {
    pub title: String,
    pub columns: Vec<ColumnConfig>,
    pub details: &'a [DetailRecord],
    pub record: &'a AggregateRecord,
    pub total_label: String,
    pub company: Option<&'a CompanyInfo>,
    pub logo: Option<&'a str>,
}

/// Render one of the built-in reports from an input file's contents.
pub fn render_preset(kind: ReportKind, input: &ReportInput) -> String {
    let report = ColumnReport {
        title: kind.title().to_string(),
        columns: kind.columns(),
        details: &input.details,
        record: &input.record,
        total_label: kind.total_label().to_string(),
        company: input.company.as_ref(),
        logo: input.logo.as_deref(),
    };
    render_column_report(&report)
}

const REPORT_CSS: &str = r#"
    @page { margin: 10mm; }
    body { font-family: Arial, sans-serif; font-size: 12px; margin: 0; padding: 10px; }
    .report-container { width: 100%; max-width: 900px; margin: 0 auto; }
    .company { font-size: 16px; font-weight: bold; text-align: center; margin: 0; }
    .title { font-size: 14px; font-weight: bold; text-align: center; margin: 4px 0; }
    .meta { text-align: center; margin: 0 0 12px 0; }
    table { width: 100%; border-collapse: collapse; }
    th { background: #f0f0f0; border-bottom: 1px solid #000; padding: 4px; }
    td { border-bottom: 0.5px solid #ccc; padding: 4px; }
    .text-left { text-align: left; }
    .text-right { text-align: right; }
    .text-center { text-align: center; }
    .total-row td { font-weight: bold; border-top: 1px solid #000; border-bottom: none; }
    .footer { display: flex; justify-content: space-between; margin-top: 15px; font-size: 10px; }
    .footer p { margin: 5px 0; }
    .logo { max-width: 100px; max-height: 100px; }
"#;

fn header_cells(columns: &[ColumnConfig]) -> String {
    let mut out = String::from(r#"<th class="text-center">#</th>"#);
    for column in columns {
        out.push_str(&format!(
            r#"<th class="{}">{}</th>"#,
            column.align.css_class(),
            escape(&column.label)
        ));
    }
    out
}

fn detail_rows(columns: &[ColumnConfig], details: &[DetailRecord]) -> String {
    details
        .iter()
        .enumerate()
        .map(|(idx, record)| {
            let cells: String = columns
                .iter()
                .map(|column| {
                    format!(
                        r#"<td class="{}">{}</td>"#,
                        column.align.css_class(),
                        column.cell(record)
                    )
                })
                .collect();
            format!(r#"<tr><td class="text-center">{}</td>{}</tr>"#, idx + 1, cells)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// The caller-labelled total, formatted like the last column
fn total_row(columns: &[ColumnConfig], label: &str, total: Option<f64>) -> String {
    let label = match label.trim() {
        "" => "TOTAL",
        label => label,
    };
    let format = columns
        .last()
        .and_then(|c| c.format)
        .filter(|f| f.is_numeric())
        .unwrap_or(CellFormat::Grouped);

    format!(
        r#"<tr class="total-row"><td colspan="{}" class="text-right">{}</td><td class="text-right">{}</td></tr>"#,
        columns.len().max(1),
        escape(label),
        format.number(total),
    )
}

/// Render a single-column tabular report: one column per `ColumnConfig`,
/// one row per detail record, then the total row.
pub fn render_column_report(report: &ColumnReport<'_>) -> String {
    let company = report.company.cloned().unwrap_or_default();
    let period = report
        .record
        .period
        .as_deref()
        .map(period_label)
        .unwrap_or_default();
    let date = report.record.date.map(long_date).unwrap_or_default();

    let meta = [
        (!period.is_empty()).then(|| format!("Period: {}", escape(&period))),
        (!date.is_empty()).then(|| format!("Date: {date}")),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join(" | ");

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="UTF-8">
  <title>{title}</title>
  <style>{css}  </style>
</head>
<body>
  <div class="report-container">
    <p class="company">{company_name}</p>
    <p class="title">{title}</p>
    <p class="meta">{meta}</p>

    <table>
<thead><tr>{header}</tr></thead>
<tbody>
{rows}
{total}
</tbody>
    </table>

    <div class="footer">
      <div style="flex: 1;">
        <p>{company_line}</p>
        <p>{contact_line}</p>
      </div>
      <div style="flex: 0;">{logo}</div>
    </div>
  </div>
</body>
</html>
"#,
        title = escape(&report.title),
        css = REPORT_CSS,
        company_name = escape_opt(company.company_name.as_deref()),
        meta = meta,
        header = header_cells(&report.columns),
        rows = detail_rows(&report.columns, report.details),
        total = total_row(&report.columns, &report.total_label, report.record.total_amount),
        company_line = company_line(&company),
        contact_line = contact_line(&company),
        logo = logo_img(report.logo),
    )
}
