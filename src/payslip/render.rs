use crate::config::{CompanyInfo, RenderSettings};
use crate::format::{currency, escape, escape_opt, integer, slip_date};

use super::balance::{balance, BalancedRows};
use super::fragment::RowFragment;
use super::model::PayslipInput;
use super::normalize::{normalize, LEFT_COLUMNS};

/// Columns available to the deductions side of the table
pub const RIGHT_COLUMNS: usize = 3;

/// Loop index after which the pre-rendered block is emitted, directly
/// beneath the Bike & Fuel row of the legacy layout.
pub const INJECT_AFTER_ROW: usize = 2;

pub(crate) const SPACER_CELL: &str = r#"<td class="spacer"></td>"#;

/// One row of the merged table body
#[derive(Debug, Clone, PartialEq)]
pub enum TableRow<'a> {
    Pair {
        left: Option<&'a RowFragment>,
        right: Option<&'a RowFragment>,
    },
    /// Pre-rendered markup emitted verbatim
    Raw(&'a str),
}

/// Normalize and balance the input into synchronized rows.
pub fn layout(input: &PayslipInput) -> BalancedRows {
    balance(normalize(input))
}

/// Pair the two sides row by row, placing the pre-rendered block after
/// loop row `INJECT_AFTER_ROW`.
pub fn merge(rows: &BalancedRows) -> Vec<TableRow<'_>> {
    let count = rows.loop_rows();
    let block = rows.block.as_ref().map(|b| b.markup());
    let mut merged = Vec::with_capacity(count + 1);

    for i in 0..count {
        merged.push(TableRow::Pair {
            left: rows.left.get(i),
            right: rows.right.get(i),
        });
        if i == INJECT_AFTER_ROW {
            merged.extend(block.map(TableRow::Raw));
        }
    }

    // Too few rows to reach the injection point
    if count <= INJECT_AFTER_ROW {
        merged.extend(block.map(TableRow::Raw));
    }

    merged
}

/// Render the merged rows as table body markup, one row per line.
pub fn body_markup(rows: &[TableRow<'_>]) -> String {
    rows.iter()
        .map(|row| match row {
            TableRow::Pair { left, right } => format!(
                "<tr>{}{}{}</tr>",
                left.map_or_else(|| absent_cells(LEFT_COLUMNS), left_cells),
                SPACER_CELL,
                right.map_or_else(|| absent_cells(RIGHT_COLUMNS), right_cells),
            ),
            TableRow::Raw(markup) => markup.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub(crate) fn left_cells(fragment: &RowFragment) -> String {
    cells(fragment, LEFT_COLUMNS)
}

pub(crate) fn right_cells(fragment: &RowFragment) -> String {
    cells(fragment, RIGHT_COLUMNS)
}

pub(crate) fn blank_right_cells() -> String {
    right_cells(&RowFragment::Placeholder)
}

fn absent_cells(columns: usize) -> String {
    format!(r#"<td colspan="{columns}"></td>"#)
}

fn colspan(span: usize) -> String {
    if span > 1 {
        format!(r#" colspan="{span}""#)
    } else {
        String::new()
    }
}

/// A fragment laid into `columns` table columns
fn cells(fragment: &RowFragment, columns: usize) -> String {
    let value_span = colspan(columns - 1);

    match fragment {
        RowFragment::Line { label, value, bold } => {
            let weight = if *bold { " bold" } else { "" };
            format!(
                r#"<td class="col-label{weight}">{}</td><td class="col-value{weight}"{value_span}>{}</td>"#,
                escape(label),
                currency(*value),
            )
        }
        RowFragment::Header(header) => {
            let mut out: String = header
                .iter()
                .map(|cell| {
                    format!(
                        r#"<td class="col-label count"{}>{}: {}</td>"#,
                        colspan(cell.span),
                        escape(&cell.label),
                        integer(cell.value),
                    )
                })
                .collect();
            let used: usize = header.iter().map(|c| c.span).sum();
            if used < columns {
                out.push_str(&absent_cells(columns - used));
            }
            out
        }
        RowFragment::Heading(title) => format!(
            r#"<td colspan="{columns}" class="section-header">{}</td>"#,
            escape(title)
        ),
        RowFragment::Placeholder => {
            format!(r#"<td class="col-label"></td><td class="col-value"{value_span}></td>"#)
        }
    }
}

fn summary_row(input: &PayslipInput) -> String {
    format!(
        concat!(
            r#"<tr class="summary-row">"#,
            r#"<td colspan="{left}" class="text-center">TOTAL EARNINGS</td>"#,
            r#"<td class="col-value">{gross}</td>"#,
            "{spacer}",
            r#"<td colspan="{right}" class="text-center">NET PAY</td>"#,
            r#"<td class="col-value net-pay">{net}</td>"#,
            "</tr>"
        ),
        left = LEFT_COLUMNS - 1,
        gross = currency(input.amounts.gross_salary),
        spacer = SPACER_CELL,
        right = RIGHT_COLUMNS - 1,
        net = currency(input.amounts.net_salary),
    )
}

const BASE_CSS: &str = r#"
    @page { margin: 10mm; }
    body {
      font-family: Arial, sans-serif;
      font-size: 12px;
      line-height: 1.35;
      margin: 0;
      padding: 10px;
      -webkit-print-color-adjust: exact;
      print-color-adjust: exact;
    }
    .payslip-container { width: 100%; max-width: 900px; margin: 0 auto; }
    table { width: 100%; border-collapse: collapse; }
    td { padding: 1px 3px; vertical-align: middle; line-height: 1.2; }
    .header-title { font-size: 14px; font-weight: bold; text-align: center; padding: 5px 0; }
    .info-label { font-weight: bold; width: 15%; }
    .info-value { width: 35%; padding: 1px 2px; }
    .info-right-label { font-weight: bold; width: 15%; text-align: right; padding-right: 10px; }
    .info-right-value { width: 35%; padding: 1px 2px; }
    .section-header { font-weight: bold; text-align: center; }
    .text-right { text-align: right; }
    .text-center { text-align: center; }
    .bold { font-weight: bold; }
    .spacer { width: 3%; }
    .col-label { width: 18%; }
    .col-value { width: 8%; text-align: right; }
    .count { font-weight: bold; }
    .summary-row { font-weight: bold; }
    .net-pay { font-size: 13px; }
    .thanks { margin: 5px 0; text-align: center; font-weight: bold; font-size: 14px; }
    .footer { display: flex; justify-content: space-between; margin-top: 0; padding-top: 5px; font-size: 10px; }
    .footer p { margin: 5px 0; text-align: left; }
    .footer .code { font-size: 9px; color: #666; }
    .logo { max-width: 100px; max-height: 100px; }
"#;

/// `@font-face` for the numeric font plus the rules that use it. Without an
/// embedded payload the family resolves locally, then to monospace.
fn font_css(family: &str, payload: Option<&str>) -> String {
    let family: String = family
        .chars()
        .filter(|c| !matches!(c, '\'' | '"' | '\\' | '<' | '>' | ';' | '{' | '}'))
        .collect();

    let src = match payload.map(str::trim).filter(|p| !p.is_empty()) {
        Some(p) if p.starts_with("data:") => format!("url('{p}') format('truetype')"),
        Some(p) => format!("url('data:font/ttf;base64,{p}') format('truetype')"),
        None => format!("local('{family}')"),
    };

    format!(
        "    @font-face {{ font-family: '{family}'; src: {src}; }}\n    \
         .col-value, .count {{ font-family: '{family}', monospace; }}\n"
    )
}

fn info_row(left_label: &str, left_value: String, right_label: &str, right_value: String) -> String {
    format!(
        concat!(
            "<tr>",
            r#"<td class="info-label">{}</td>"#,
            r#"<td class="info-value" colspan="2">{}</td>"#,
            r#"<td style="width: 5%;"></td>"#,
            r#"<td class="info-right-label">{}</td>"#,
            r#"<td class="info-right-value">{}</td>"#,
            "</tr>"
        ),
        left_label, left_value, right_label, right_value
    )
}

fn employee_block(input: &PayslipInput) -> String {
    let e = &input.employee;
    let location = e
        .project_name
        .as_deref()
        .filter(|p| !p.trim().is_empty())
        .or(e.department_name.as_deref());

    [
        info_row(
            "Name",
            escape_opt(e.name.as_deref()),
            "Pay Slip",
            escape_opt(e.period.as_deref()),
        ),
        info_row(
            "Occupation",
            escape_opt(e.job_title.as_deref()),
            "E.P.F No",
            escape_opt(e.code.as_deref()),
        ),
        info_row(
            "Bank",
            escape_opt(e.bank_name.as_deref()),
            "Branch",
            escape_opt(e.branch_name.as_deref()),
        ),
        info_row(
            "Account No",
            escape_opt(e.account_no.as_deref()),
            "Paid On",
            e.payment_date.map(slip_date).unwrap_or_default(),
        ),
        info_row(
            "Contract No",
            escape_opt(e.project_name.as_deref()),
            "Location",
            escape_opt(location),
        ),
    ]
    .join("\n")
}

fn non_blank(s: &Option<String>) -> Option<&str> {
    s.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// `Name | street, city, ...` with the separator only when an address exists
pub(crate) fn company_line(company: &CompanyInfo) -> String {
    let name = escape_opt(non_blank(&company.company_name));
    let parts = company
        .address
        .as_ref()
        .map(|a| a.parts())
        .unwrap_or_default();

    if parts.is_empty() {
        name
    } else {
        let address = escape(&parts.join(", "));
        if name.is_empty() {
            address
        } else {
            format!("{name} | {address}")
        }
    }
}

/// `Tel: x | E-mail: y`, each half only when present
pub(crate) fn contact_line(company: &CompanyInfo) -> String {
    let phone = non_blank(&company.company_phone).map(|p| format!("Tel: {}", escape(p)));
    let email = non_blank(&company.company_email).map(|e| format!("E-mail: {}", escape(e)));

    [phone, email].into_iter().flatten().collect::<Vec<_>>().join(" | ")
}

pub(crate) fn logo_img(logo: Option<&str>) -> String {
    logo.map(str::trim)
        .filter(|l| !l.is_empty())
        .map(|l| format!(r#"<img src="{}" alt="Company Logo" class="logo">"#, escape(l)))
        .unwrap_or_default()
}

/// Render a complete, self-contained payslip document.
///
/// Output depends only on the arguments, so identical inputs produce
/// byte-identical documents.
pub fn render_payslip(input: &PayslipInput, settings: &RenderSettings) -> String {
    let company = input.company.clone().unwrap_or_default();
    let rows = layout(input);
    let body = body_markup(&merge(&rows));

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="UTF-8">
  <title>Payslip - {name}</title>
  <style>{css}{font_css}  </style>
</head>
<body>
  <div class="payslip-container">
    <table style="margin-bottom: 10px;">
      <tr><td colspan="6" class="header-title">{header_title}</td></tr>
    </table>

    <table style="margin-bottom: 15px;">
{employee}
    </table>

    <table class="grid-border">
<tr class="section-header"><td colspan="{left_cols}" class="text-center">EARNINGS</td>{spacer}<td colspan="{right_cols}" class="text-center">DEDUCTIONS</td></tr>
{body}
{summary}
    </table>

    <p class="thanks">{footer_message}</p>

    <div class="footer">
      <div style="flex: 1;">
        <p>{company_line}</p>
        <p>{contact_line}</p>
        <p class="code">{specific_code}</p>
      </div>
      <div style="flex: 0;">{logo}</div>
    </div>
  </div>
</body>
</html>
"#,
        name = escape_opt(input.employee.name.as_deref()),
        css = BASE_CSS,
        font_css = font_css(&settings.numeric_font, input.font.as_deref()),
        header_title = escape_opt(non_blank(&company.company_name)),
        employee = employee_block(input),
        left_cols = LEFT_COLUMNS,
        spacer = SPACER_CELL,
        right_cols = RIGHT_COLUMNS,
        body = body,
        summary = summary_row(input),
        footer_message = escape(&settings.footer_message),
        company_line = company_line(&company),
        contact_line = contact_line(&company),
        specific_code = escape_opt(input.specific_code.as_deref()),
        logo = logo_img(input.logo.as_deref()),
    )
}
